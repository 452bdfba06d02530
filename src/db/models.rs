use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbParent {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbChild {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub parent_id: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub child_id: i64,
    pub vaccine: String,
    pub date: NaiveDate,
    pub reminder_sent: bool,
}
