use crate::error::KeeperError;
use chrono::NaiveDate;
use tracing::info;

/// Everything a delivery channel needs to tell a parent about tomorrow's appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotice {
    pub appointment_id: i64,
    pub parent_name: String,
    pub parent_email: String,
    pub child_name: String,
    pub vaccine: String,
    pub date: NaiveDate,
}

impl ReminderNotice {
    pub fn message(&self) -> String {
        format!(
            "Reminder: Your child {} has a vaccination appointment for {} on {}.",
            self.child_name,
            self.vaccine,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Delivery channel for reminder notices.
pub trait ReminderNotifier: Send + Sync {
    fn notify(&self, notice: &ReminderNotice) -> Result<(), KeeperError>;
}

/// Writes notices to the diagnostic log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ReminderNotifier for LogNotifier {
    fn notify(&self, notice: &ReminderNotice) -> Result<(), KeeperError> {
        info!(
            target: "reminder",
            appointment_id = notice.appointment_id,
            parent = %notice.parent_name,
            email = %notice.parent_email,
            "{}",
            notice.message()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_iso_date() {
        let notice = ReminderNotice {
            appointment_id: 1,
            parent_name: "A".to_string(),
            parent_email: "a@x.com".to_string(),
            child_name: "Kid1".to_string(),
            vaccine: "MMR".to_string(),
            date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
        };
        assert_eq!(
            notice.message(),
            "Reminder: Your child Kid1 has a vaccination appointment for MMR on 2099-01-01."
        );
        assert!(LogNotifier.notify(&notice).is_ok());
    }
}
