//! Form bodies posted by the portal pages and their validated actions.
//!
//! Every field is optional at the serde level so a missing field surfaces
//! as a validation error naming that field, not as an opaque extractor
//! failure.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    BookingDate, BookingDateError, BookingId, Error, LoginCredentials, Registration, RequestId,
    StockAmount, UserValidationError, VaccineName, VaccineValidationError,
};

fn invalid(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, Error> {
    value.ok_or_else(|| invalid(field, "missing_field", format!("{field} is required")))
}

pub(crate) fn map_user_validation(err: UserValidationError) -> Error {
    invalid(err.field(), err.code(), err.to_string())
}

fn map_vaccine_validation(field: &str, err: VaccineValidationError) -> Error {
    invalid(field, err.code(), err.to_string())
}

fn map_date_validation(err: BookingDateError) -> Error {
    let code = match err {
        BookingDateError::Empty => "empty_date",
        BookingDateError::Malformed(_) => "invalid_date",
    };
    invalid("date", code, err.to_string())
}

fn parse_id(field: &str, raw: &str) -> Result<i32, Error> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| invalid(field, "invalid_id", format!("{field} must be a numeric id")))
}

fn vaccine_name(field: &str, raw: &str) -> Result<VaccineName, Error> {
    VaccineName::new(raw).map_err(|err| map_vaccine_validation(field, err))
}

fn stock_amount(field: &str, raw: &str) -> Result<StockAmount, Error> {
    StockAmount::parse(raw).map_err(|err| map_vaccine_validation(field, err))
}

/// `POST /register` body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<RegisterForm> for Registration {
    type Error = Error;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let name = required("name", form.name.as_deref())?;
        let email = required("email", form.email.as_deref())?;
        let password = required("password", form.password.as_deref())?;
        Registration::try_from_parts(name, email, password).map_err(map_user_validation)
    }
}

/// `POST /login` and `POST /admin` body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginForm {
    /// Validate the submitted pair.
    ///
    /// A missing field is a malformed request. A present but unusable value
    /// cannot match any account, so it fails as `rejection`.
    pub fn into_credentials(self, rejection: &str) -> Result<LoginCredentials, Error> {
        let email = required("email", self.email.as_deref())?;
        let password = required("password", self.password.as_deref())?;
        LoginCredentials::try_from_parts(email, password).map_err(|err| {
            debug!(field = err.field(), code = err.code(), "login form rejected");
            Error::unauthorized(rejection)
        })
    }
}

/// `POST /user_dashboard` body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserDashboardForm {
    /// Vaccine to book; requires `date`.
    #[serde(default)]
    pub vaccine: Option<String>,
    #[serde(default)]
    #[schema(example = "2026-03-01")]
    pub date: Option<String>,
    /// Vaccine to request.
    #[serde(default)]
    pub request_vaccine: Option<String>,
}

/// Action selected by a user dashboard submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Book {
        vaccine: VaccineName,
        date: BookingDate,
    },
    Request {
        vaccine: VaccineName,
    },
}

impl UserDashboardForm {
    /// Pick the submitted action. A booking wins over a request; a body with
    /// neither only refreshes the page.
    pub fn into_action(self) -> Result<Option<UserAction>, Error> {
        if let Some(raw) = self.vaccine.as_deref() {
            let vaccine = vaccine_name("vaccine", raw)?;
            let date = BookingDate::parse(required("date", self.date.as_deref())?)
                .map_err(map_date_validation)?;
            return Ok(Some(UserAction::Book { vaccine, date }));
        }
        self.request_vaccine
            .as_deref()
            .map(|raw| vaccine_name("request_vaccine", raw).map(|vaccine| UserAction::Request { vaccine }))
            .transpose()
    }
}

/// `POST /admin_dashboard` body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AdminDashboardForm {
    /// Booking to cancel.
    #[serde(default)]
    pub delete_id: Option<String>,
    /// Booking to mark done.
    #[serde(default)]
    pub done_id: Option<String>,
    /// Vaccine to add or top up; requires `new_stock`.
    #[serde(default)]
    pub new_vaccine: Option<String>,
    #[serde(default)]
    pub new_stock: Option<String>,
    /// Name of the vaccine to restock; requires `restock_amount`.
    #[serde(default)]
    pub restock_id: Option<String>,
    #[serde(default)]
    pub restock_amount: Option<String>,
    /// Request to discard.
    #[serde(default)]
    pub delete_request: Option<String>,
}

/// Action selected by an admin dashboard submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    DeleteBooking(BookingId),
    MarkDone(BookingId),
    AddOrRestock {
        vaccine: VaccineName,
        amount: StockAmount,
    },
    Restock {
        vaccine: VaccineName,
        amount: StockAmount,
    },
    DeleteRequest(RequestId),
}

impl TryFrom<AdminDashboardForm> for AdminAction {
    type Error = Error;

    /// Fields are checked in a fixed order; the first one present decides
    /// the action. `restock_id` only counts together with `restock_amount`.
    fn try_from(form: AdminDashboardForm) -> Result<Self, Self::Error> {
        if let Some(raw) = form.delete_id.as_deref() {
            return parse_id("delete_id", raw).map(|id| Self::DeleteBooking(BookingId::new(id)));
        }
        if let Some(raw) = form.done_id.as_deref() {
            return parse_id("done_id", raw).map(|id| Self::MarkDone(BookingId::new(id)));
        }
        if let Some(raw) = form.new_vaccine.as_deref() {
            return Ok(Self::AddOrRestock {
                vaccine: vaccine_name("new_vaccine", raw)?,
                amount: stock_amount("new_stock", required("new_stock", form.new_stock.as_deref())?)?,
            });
        }
        if let (Some(name), Some(amount)) =
            (form.restock_id.as_deref(), form.restock_amount.as_deref())
        {
            return Ok(Self::Restock {
                vaccine: vaccine_name("restock_id", name)?,
                amount: stock_amount("restock_amount", amount)?,
            });
        }
        if let Some(raw) = form.delete_request.as_deref() {
            return parse_id("delete_request", raw)
                .map(|id| Self::DeleteRequest(RequestId::new(id)));
        }
        Err(Error::invalid_request("no recognised admin action in form")
            .with_details(json!({ "code": "unknown_action" })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn detail(err: &Error, key: &str) -> Option<String> {
        err.details()
            .and_then(|d| d.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_owned)
    }

    fn admin_form(pairs: &[(&str, &str)]) -> AdminDashboardForm {
        let mut form = AdminDashboardForm::default();
        for (key, value) in pairs {
            let slot = match *key {
                "delete_id" => &mut form.delete_id,
                "done_id" => &mut form.done_id,
                "new_vaccine" => &mut form.new_vaccine,
                "new_stock" => &mut form.new_stock,
                "restock_id" => &mut form.restock_id,
                "restock_amount" => &mut form.restock_amount,
                "delete_request" => &mut form.delete_request,
                other => panic!("unknown admin field {other}"),
            };
            *slot = Some((*value).to_owned());
        }
        form
    }

    fn login_form(email: Option<&str>, password: Option<&str>) -> LoginForm {
        LoginForm {
            email: email.map(str::to_owned),
            password: password.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(Some("not-an-email"), Some("pw"))]
    #[case(Some("ada@example.com"), Some(""))]
    #[case(Some("   "), Some("pw"))]
    fn unusable_login_values_fail_as_the_rejection(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let err = login_form(email, password)
            .into_credentials("Invalid credentials!")
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials!");
    }

    #[rstest]
    #[case(None, Some("pw"), "email")]
    #[case(Some("ada@example.com"), None, "password")]
    fn missing_login_fields_stay_malformed(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] field: &str,
    ) {
        let err = login_form(email, password)
            .into_credentials("Invalid credentials!")
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field").as_deref(), Some(field));
        assert_eq!(detail(&err, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    fn login_keeps_the_email_as_typed() {
        let creds = login_form(Some(" Ada@Example.com "), Some("pw"))
            .into_credentials("Invalid credentials!")
            .expect("valid pair");
        assert_eq!(creds.email().as_ref(), "Ada@Example.com");
    }

    #[rstest]
    fn booking_wins_over_request() {
        let form = UserDashboardForm {
            vaccine: Some("Covaxin".into()),
            date: Some("2026-03-01".into()),
            request_vaccine: Some("Sputnik X".into()),
        };
        match form.into_action().expect("valid form") {
            Some(UserAction::Book { vaccine, date }) => {
                assert_eq!(vaccine.as_ref(), "Covaxin");
                assert_eq!(date.to_string(), "2026-03-01");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[rstest]
    fn empty_user_form_only_refreshes() {
        assert_eq!(UserDashboardForm::default().into_action(), Ok(None));
    }

    #[rstest]
    #[case(Some("tomorrow"), "invalid_date")]
    #[case(None, "missing_field")]
    fn booking_requires_a_calendar_date(#[case] date: Option<&str>, #[case] code: &str) {
        let form = UserDashboardForm {
            vaccine: Some("Covaxin".into()),
            date: date.map(str::to_owned),
            request_vaccine: None,
        };
        let err = form.into_action().expect_err("date rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field").as_deref(), Some("date"));
        assert_eq!(detail(&err, "code").as_deref(), Some(code));
    }

    #[rstest]
    #[case(&[("delete_id", "4")], AdminAction::DeleteBooking(BookingId::new(4)))]
    #[case(&[("done_id", "2"), ("delete_request", "9")], AdminAction::MarkDone(BookingId::new(2)))]
    #[case(&[("restock_id", "Covaxin"), ("delete_request", "9")], AdminAction::DeleteRequest(RequestId::new(9)))]
    fn admin_fields_are_checked_in_order(
        #[case] pairs: &[(&str, &str)],
        #[case] expected: AdminAction,
    ) {
        assert_eq!(AdminAction::try_from(admin_form(pairs)), Ok(expected));
    }

    #[rstest]
    fn add_or_restock_trims_the_name() {
        let action = AdminAction::try_from(admin_form(&[
            ("new_vaccine", "  Sputnik X "),
            ("new_stock", "5"),
        ]))
        .expect("valid action");
        match action {
            AdminAction::AddOrRestock { vaccine, amount } => {
                assert_eq!(vaccine.as_ref(), "Sputnik X");
                assert_eq!(amount.value(), 5);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[rstest]
    #[case(&[("new_vaccine", "Zeta"), ("new_stock", "ten")], "new_stock", "amount_not_a_number")]
    #[case(&[("new_vaccine", "Zeta")], "new_stock", "missing_field")]
    #[case(&[("new_vaccine", "Zeta"), ("new_stock", "-2")], "new_stock", "negative_amount")]
    #[case(&[("restock_id", "Covaxin"), ("restock_amount", "")], "restock_amount", "empty_amount")]
    #[case(&[("delete_id", "abc")], "delete_id", "invalid_id")]
    fn malformed_admin_input_is_rejected(
        #[case] pairs: &[(&str, &str)],
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = AdminAction::try_from(admin_form(pairs)).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field").as_deref(), Some(field));
        assert_eq!(detail(&err, "code").as_deref(), Some(code));
    }

    #[rstest]
    fn unknown_admin_action_is_rejected() {
        let err = AdminAction::try_from(AdminDashboardForm::default()).expect_err("rejected");
        assert_eq!(detail(&err, "code").as_deref(), Some("unknown_action"));
    }

    #[rstest]
    fn registration_reports_missing_field() {
        let form = RegisterForm {
            name: Some("Ada".into()),
            email: None,
            password: Some("pw".into()),
        };
        let err = Registration::try_from(form).expect_err("rejected");
        assert_eq!(detail(&err, "field").as_deref(), Some("email"));
    }
}
