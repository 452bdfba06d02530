use crate::db::DbAppointment;
use serde::{Deserialize, Serialize};

/// Wire format for calendar dates, both inbound and outbound.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterParentRequest {
    pub name: String,
    pub email: String,
}

/// `dob` is kept as raw text; the service parses it after the parent lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct AddChildRequest {
    pub name: String,
    pub dob: String,
    pub parent_email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub child_name: String,
    pub vaccine: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentsQuery {
    pub child_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppointmentView {
    pub vaccine: String,
    pub date: String,
}

impl From<DbAppointment> for AppointmentView {
    fn from(a: DbAppointment) -> Self {
        Self {
            vaccine: a.vaccine,
            date: a.date.format(DATE_FORMAT).to_string(),
        }
    }
}
