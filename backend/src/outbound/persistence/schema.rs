//! Diesel table definitions for the portal schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered users. Passwords are stored verbatim.
    users (id) {
        id -> Int4,
        name -> Text,
        /// Unique, stored trimmed and as typed.
        email -> Text,
        password -> Text,
    }
}

diesel::table! {
    /// Vaccine catalogue and stock counts.
    vaccines (id) {
        id -> Int4,
        /// Name as first entered.
        name -> Text,
        /// Unique matching key derived from `name`.
        name_key -> Text,
        /// Never negative (`CHECK (stock >= 0)`).
        stock -> Int4,
    }
}

diesel::table! {
    /// Bookings; `vaccine` is the catalogue name at booking time.
    bookings (id) {
        id -> Int4,
        user_id -> Int4,
        vaccine -> Text,
        date -> Text,
        /// `pending` or `done`.
        status -> Text,
    }
}

diesel::table! {
    /// Requests for vaccines that could not be booked.
    requests (id) {
        id -> Int4,
        user_id -> Int4,
        vaccine_name -> Text,
        vaccine_key -> Text,
        /// `pending` or `available now`.
        status -> Text,
    }
}

diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(requests -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, vaccines, bookings, requests);
