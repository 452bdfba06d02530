use crate::db::RegistryStorage;
use crate::error::KeeperError;
use crate::types::registry::{AppointmentView, DATE_FORMAT};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Create/read operations over parents, children and appointments.
#[derive(Clone)]
pub struct Registry {
    storage: RegistryStorage,
}

impl Registry {
    pub fn new(storage: RegistryStorage) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &RegistryStorage {
        &self.storage
    }

    /// No pre-check: the UNIQUE constraint on email is the duplicate guard.
    pub async fn register_parent(&self, name: &str, email: &str) -> Result<i64, KeeperError> {
        let id = self.storage.insert_parent(name, email).await?;
        info!(id, email = %email, "parent registered");
        Ok(id)
    }

    pub async fn add_child(
        &self,
        name: &str,
        dob: &str,
        parent_email: &str,
    ) -> Result<i64, KeeperError> {
        let parent = self
            .storage
            .find_parent_by_email(parent_email)
            .await?
            .ok_or(KeeperError::ParentNotFound)?;
        let dob = parse_date("dob", dob)?;
        let id = self.storage.insert_child(name, dob, parent.id).await?;
        info!(id, parent_id = parent.id, child = %name, "child added");
        Ok(id)
    }

    pub async fn schedule_appointment(
        &self,
        child_name: &str,
        vaccine: &str,
        date: &str,
    ) -> Result<i64, KeeperError> {
        let child = self
            .storage
            .find_child_by_name(child_name)
            .await?
            .ok_or(KeeperError::ChildNotFound)?;
        let date = parse_date("date", date)?;
        let id = self.storage.insert_appointment(child.id, vaccine, date).await?;
        info!(id, child_id = child.id, vaccine = %vaccine, date = %date, "appointment scheduled");
        Ok(id)
    }

    pub async fn list_appointments(
        &self,
        child_name: &str,
    ) -> Result<Vec<AppointmentView>, KeeperError> {
        let child = self
            .storage
            .find_child_by_name(child_name)
            .await?
            .ok_or(KeeperError::ChildNotFound)?;
        let rows = self.storage.list_appointments_for_child(child.id).await?;
        debug!(child_id = child.id, count = rows.len(), "appointments listed");
        Ok(rows.into_iter().map(AppointmentView::from).collect())
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, KeeperError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| KeeperError::InvalidDate {
        field,
        value: value.to_string(),
        source,
    })
}
