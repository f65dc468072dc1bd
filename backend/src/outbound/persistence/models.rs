//! Internal Diesel row structs.
//!
//! Never exposed to the domain; repositories convert them on the way out.

use diesel::prelude::*;

use super::schema::{bookings, requests, users, vaccines};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vaccines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VaccineRow {
    pub id: i32,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vaccines)]
pub(crate) struct NewVaccineRow<'a> {
    pub name: &'a str,
    pub name_key: &'a str,
    pub stock: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub vaccine: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub user_id: i32,
    pub vaccine: &'a str,
    pub date: &'a str,
    pub status: &'a str,
}

/// Booking joined with its owner; column order matches the select tuple.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct AdminBookingRow {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub vaccine: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RequestRow {
    pub id: i32,
    pub user_id: i32,
    pub vaccine_name: String,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = requests)]
pub(crate) struct NewRequestRow<'a> {
    pub user_id: i32,
    pub vaccine_name: &'a str,
    pub vaccine_key: &'a str,
    pub status: &'a str,
}

/// Request joined with its owner's name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct AdminRequestRow {
    pub id: i32,
    pub user_name: String,
    pub vaccine_name: String,
    pub status: String,
}
