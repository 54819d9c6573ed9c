//! Repair sessions: one visit of a device through the shop

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::{clean, require_device, require_user};
use crate::domain::{DeviceStatus, DomainError, DomainResult, RepairSession, RepositoryProvider};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct CreateRepairSession {
    pub device_id: i32,
    pub status: Option<DeviceStatus>,
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRepairSession {
    pub status: Option<DeviceStatus>,
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

pub struct RepairSessionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RepairSessionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        input: CreateRepairSession,
    ) -> DomainResult<RepairSession> {
        require_user(self.repos.as_ref(), actor_id).await?;
        require_device(self.repos.as_ref(), input.device_id).await?;

        let mut session = RepairSession::new(input.device_id, actor_id);
        session.status = input.status.unwrap_or_default();
        if let Some(received) = input.received_date {
            session.received_date = received;
        }
        session.expected_return_date = input.expected_return_date;
        session.note = clean(input.note);
        session.assigned_to = self.resolve_assignee(input.assigned_to).await?;

        let session = self.repos.repair_sessions().save(session).await?;
        info!(
            session_id = session.id,
            device_id = session.device_id,
            created_by = %actor_id,
            "Repair session opened"
        );
        Ok(session)
    }

    pub async fn update(&self, id: i32, input: UpdateRepairSession) -> DomainResult<RepairSession> {
        let mut session = self.get(id).await?;

        if let Some(status) = input.status {
            session.status = status;
        }
        if let Some(received) = input.received_date {
            session.received_date = received;
        }
        if input.expected_return_date.is_some() {
            session.expected_return_date = input.expected_return_date;
        }
        if input.note.is_some() {
            session.note = clean(input.note);
        }
        if input.assigned_to.is_some() {
            session.assigned_to = self.resolve_assignee(input.assigned_to).await?;
        }

        self.repos.repair_sessions().update(session).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<RepairSession> {
        self.repos
            .repair_sessions()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RepairSession", "id", id))
    }

    /// Newest first
    pub async fn list_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairSession>> {
        require_device(self.repos.as_ref(), device_id).await?;
        self.repos.repair_sessions().find_by_device(device_id).await
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<RepairSession>> {
        self.repos.repair_sessions().list(page).await
    }

    async fn resolve_assignee(&self, assignee: Option<String>) -> DomainResult<Option<String>> {
        match clean(assignee) {
            Some(user_id) => {
                require_user(self.repos.as_ref(), &user_id).await?;
                Ok(Some(user_id))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    #[tokio::test]
    async fn defaults_to_received_now() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "front@shop.vn", UserRole::Receptionist).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = RepairSessionService::new(repos);

        let before = Utc::now();
        let session = svc
            .create(
                &staff.id,
                CreateRepairSession {
                    device_id: device.id,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(session.status, DeviceStatus::Received);
        assert!(session.received_date >= before - chrono::Duration::seconds(1));
        assert_eq!(session.created_by, staff.id);
    }

    #[tokio::test]
    async fn list_by_device_is_newest_first() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "front@shop.vn", UserRole::Receptionist).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = RepairSessionService::new(repos);

        let input = CreateRepairSession {
            device_id: device.id,
            ..Default::default()
        };
        let first = svc.create(&staff.id, input.clone()).await.unwrap();
        let second = svc.create(&staff.id, input).await.unwrap();

        let sessions = svc.list_by_device(device.id).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, second.id);
        assert_eq!(sessions[1].id, first.id);
    }

    #[tokio::test]
    async fn unknown_device_is_not_found() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "front@shop.vn", UserRole::Receptionist).await;
        let svc = RepairSessionService::new(repos);

        let err = svc
            .create(
                &staff.id,
                CreateRepairSession {
                    device_id: 77,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Device", .. }));
    }
}
