pub mod notifier;
pub mod registry;
pub mod reminders;

pub use notifier::{LogNotifier, ReminderNotice, ReminderNotifier};
pub use registry::Registry;
pub use reminders::{ReminderStep, ReminderSweep, SweepReport};
