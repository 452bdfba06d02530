use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::db::RegistryStorage;
use crate::handlers::registry::{
    add_child, get_appointments, register_parent, schedule_appointment, send_reminders,
};
use crate::service::{Registry, ReminderNotifier, ReminderSweep};

/// Shared handler state; every handler reaches the store through it.
#[derive(Clone)]
pub struct KeeperState {
    pub registry: Registry,
    pub sweep: ReminderSweep,
}

impl KeeperState {
    pub fn new(storage: RegistryStorage, notifier: Arc<dyn ReminderNotifier>) -> Self {
        Self {
            registry: Registry::new(storage.clone()),
            sweep: ReminderSweep::new(storage, notifier),
        }
    }
}

pub fn keeper_router(state: KeeperState) -> Router {
    Router::new()
        .route("/register_parent", post(register_parent))
        .route("/add_child", post(add_child))
        .route("/schedule_appointment", post(schedule_appointment))
        .route("/get_appointments", get(get_appointments))
        .route("/send_reminders", post(send_reminders))
        .with_state(state)
}
