//! Read side of the per-device audit trail

use std::sync::Arc;

use super::require_device;
use crate::domain::{ActionType, DomainResult, RealtimeLog, RepositoryProvider};

pub struct RealtimeLogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RealtimeLogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Newest first, optionally restricted to one action
    pub async fn list_by_device(
        &self,
        device_id: i32,
        action: Option<ActionType>,
    ) -> DomainResult<Vec<RealtimeLog>> {
        require_device(self.repos.as_ref(), device_id).await?;
        self.repos
            .realtime_logs()
            .find_by_device(device_id, action)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, NewRealtimeLog, UserRole};
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    #[tokio::test]
    async fn newest_first_with_action_filter() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        repos
            .realtime_logs()
            .append(
                device.id,
                NewRealtimeLog::new(ActionType::StatusChanged, "RECEIVED -> REPAIRING", &staff.id),
            )
            .await
            .unwrap();
        repos
            .realtime_logs()
            .append(
                device.id,
                NewRealtimeLog::new(ActionType::Assigned, "Assigned", &staff.id),
            )
            .await
            .unwrap();
        let svc = RealtimeLogService::new(repos);

        let all = svc.list_by_device(device.id, None).await.unwrap();
        let actions: Vec<_> = all.iter().map(|l| l.action).collect();
        assert_eq!(
            actions,
            vec![ActionType::Assigned, ActionType::StatusChanged, ActionType::Created]
        );

        let status_only = svc
            .list_by_device(device.id, Some(ActionType::StatusChanged))
            .await
            .unwrap();
        assert_eq!(status_only.len(), 1);
    }

    #[tokio::test]
    async fn unknown_device_is_not_found() {
        let svc = RealtimeLogService::new(memory_repos().await);
        let err = svc.list_by_device(5, None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Device", .. }));
    }
}
