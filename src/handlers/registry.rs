use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;
use tracing::info;

use crate::error::MessageBody;
use crate::types::{
    AddChildRequest, AppointmentView, AppointmentsQuery, RegisterParentRequest,
    ScheduleAppointmentRequest,
};
use crate::{KeeperError, router::KeeperState};

/// POST /register_parent
pub async fn register_parent(
    State(state): State<KeeperState>,
    Json(req): Json<RegisterParentRequest>,
) -> Result<Json<MessageBody>, KeeperError> {
    info!(email = %req.email, "POST /register_parent");
    state.registry.register_parent(&req.name, &req.email).await?;
    Ok(Json(MessageBody::new("Parent registered successfully")))
}

/// POST /add_child
pub async fn add_child(
    State(state): State<KeeperState>,
    Json(req): Json<AddChildRequest>,
) -> Result<Json<MessageBody>, KeeperError> {
    info!(child = %req.name, parent_email = %req.parent_email, "POST /add_child");
    state
        .registry
        .add_child(&req.name, &req.dob, &req.parent_email)
        .await?;
    Ok(Json(MessageBody::new("Child added successfully")))
}

/// POST /schedule_appointment
pub async fn schedule_appointment(
    State(state): State<KeeperState>,
    Json(req): Json<ScheduleAppointmentRequest>,
) -> Result<Json<MessageBody>, KeeperError> {
    info!(child = %req.child_name, vaccine = %req.vaccine, "POST /schedule_appointment");
    state
        .registry
        .schedule_appointment(&req.child_name, &req.vaccine, &req.date)
        .await?;
    Ok(Json(MessageBody::new("Appointment scheduled successfully")))
}

/// GET /get_appointments?child_name=... ; a missing name is treated as an unknown child.
pub async fn get_appointments(
    State(state): State<KeeperState>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentView>>, KeeperError> {
    info!(child = ?query.child_name, "GET /get_appointments");
    let Some(child_name) = query.child_name.as_deref() else {
        return Err(KeeperError::ChildNotFound);
    };
    let list = state.registry.list_appointments(child_name).await?;
    Ok(Json(list))
}

/// POST /send_reminders
pub async fn send_reminders(
    State(state): State<KeeperState>,
) -> Result<Json<MessageBody>, KeeperError> {
    let today = Local::now().date_naive();
    info!(today = %today, "POST /send_reminders");
    state.sweep.run(today).await?;
    Ok(Json(MessageBody::new("Reminders sent successfully")))
}
