use crate::db::RegistryStorage;
use crate::error::KeeperError;
use crate::service::notifier::{ReminderNotice, ReminderNotifier};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a single `remind_one` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStep {
    Reminded,
    /// Already flagged, rescheduled, or gone by the time the step ran.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub reminded: usize,
    pub skipped: usize,
}

/// Finds appointments due tomorrow that have not been reminded, notifies, and flags them.
#[derive(Clone)]
pub struct ReminderSweep {
    storage: RegistryStorage,
    notifier: Arc<dyn ReminderNotifier>,
}

impl ReminderSweep {
    pub fn new(storage: RegistryStorage, notifier: Arc<dyn ReminderNotifier>) -> Self {
        Self { storage, notifier }
    }

    /// Run one sweep relative to `today`. Stops at the first error; rows processed
    /// before it stay flagged.
    pub async fn run(&self, today: NaiveDate) -> Result<SweepReport, KeeperError> {
        let Some(due) = today.checked_add_days(Days::new(1)) else {
            warn!(today = %today, "no calendar day after today; nothing to sweep");
            return Ok(SweepReport::default());
        };

        let candidates = self.storage.list_due_unreminded(due).await?;
        let mut report = SweepReport::default();
        for appt in candidates {
            match self.remind_one(appt.id, due).await? {
                ReminderStep::Reminded => report.reminded += 1,
                ReminderStep::Skipped => report.skipped += 1,
            }
        }

        info!(
            due = %due,
            reminded = report.reminded,
            skipped = report.skipped,
            "reminder sweep finished"
        );
        Ok(report)
    }

    /// Read one appointment, notify its parent, and flag it. Re-reads the row so a
    /// repeated or overlapping call skips work that is already done.
    pub async fn remind_one(
        &self,
        appointment_id: i64,
        due: NaiveDate,
    ) -> Result<ReminderStep, KeeperError> {
        let Some(appt) = self.storage.get_appointment(appointment_id).await? else {
            return Ok(ReminderStep::Skipped);
        };
        if appt.reminder_sent || appt.date != due {
            debug!(id = appt.id, "appointment no longer pending; skipping");
            return Ok(ReminderStep::Skipped);
        }

        let child = self.storage.get_child(appt.child_id).await?.ok_or(
            KeeperError::OrphanedChild {
                appointment_id: appt.id,
                child_id: appt.child_id,
            },
        )?;
        let parent = self.storage.get_parent(child.parent_id).await?.ok_or(
            KeeperError::OrphanedParent {
                child_id: child.id,
                parent_id: child.parent_id,
            },
        )?;

        let notice = ReminderNotice {
            appointment_id: appt.id,
            parent_name: parent.name,
            parent_email: parent.email,
            child_name: child.name,
            vaccine: appt.vaccine,
            date: appt.date,
        };
        self.notifier.notify(&notice)?;

        if !self.storage.mark_reminded(appt.id).await? {
            // another sweep flagged it between our read and write
            debug!(id = appt.id, "reminder flag already set");
        }
        Ok(ReminderStep::Reminded)
    }
}
