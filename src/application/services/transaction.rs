//! Payments: one settled transaction per device

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{clean, require_device, resolve_session};
use crate::domain::{DomainError, DomainResult, PaymentMethod, RepositoryProvider, Transaction};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub total: i64,
    pub discount: i64,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

pub struct TransactionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TransactionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: TransactionInput) -> DomainResult<Transaction> {
        require_device(self.repos.as_ref(), input.device_id).await?;
        self.ensure_first_for_device(input.device_id, None).await?;
        let session =
            resolve_session(self.repos.as_ref(), input.device_id, input.repair_session_id).await?;

        let mut tx = Transaction::new(
            input.device_id,
            input.total,
            input.discount,
            input.payment_method,
        );
        tx.repair_session_id = session.map(|s| s.id);
        tx.note = clean(input.note);
        tx.settle()?;

        let tx = self.repos.transactions().save(tx).await?;
        info!(
            transaction_id = tx.id,
            device_id = tx.device_id,
            final_amount = tx.final_amount,
            method = %tx.payment_method,
            "Transaction recorded"
        );
        Ok(tx)
    }

    pub async fn update(&self, id: i32, input: TransactionInput) -> DomainResult<Transaction> {
        let mut tx = self.get(id).await?;

        if input.device_id != tx.device_id {
            require_device(self.repos.as_ref(), input.device_id).await?;
        }
        self.ensure_first_for_device(input.device_id, Some(id)).await?;
        let session =
            resolve_session(self.repos.as_ref(), input.device_id, input.repair_session_id).await?;

        tx.device_id = input.device_id;
        tx.repair_session_id = session.map(|s| s.id);
        tx.total = input.total;
        tx.discount = input.discount;
        tx.payment_method = input.payment_method;
        tx.note = clean(input.note);
        tx.settle()?;

        self.repos.transactions().update(tx).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Transaction> {
        self.repos
            .transactions()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction", "id", id))
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Transaction>> {
        self.repos.transactions().list(page).await
    }

    pub async fn list_by_device(&self, device_id: i32) -> DomainResult<Vec<Transaction>> {
        require_device(self.repos.as_ref(), device_id).await?;
        self.repos.transactions().find_by_device(device_id).await
    }

    /// Sum of final amounts for transactions created in `[start, end]`
    pub async fn revenue(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<i64> {
        if end < start {
            return Err(DomainError::Validation(
                "end must not be before start".into(),
            ));
        }
        let txs = self
            .repos
            .transactions()
            .find_created_between(start, end)
            .await?;
        Ok(txs.iter().map(|t| t.final_amount).sum())
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.transactions().delete(id).await?;
        info!(transaction_id = id, "Transaction deleted");
        Ok(())
    }

    async fn ensure_first_for_device(&self, device_id: i32, excluding: Option<i32>) -> DomainResult<()> {
        if self
            .repos
            .transactions()
            .exists_for_device(device_id, excluding)
            .await?
        {
            warn!(device_id, "Rejected second transaction for device");
            return Err(DomainError::InvalidState(format!(
                "Device {} already has a transaction",
                device_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    fn input(device_id: i32, total: i64, discount: i64) -> TransactionInput {
        TransactionInput {
            device_id,
            repair_session_id: None,
            total,
            discount,
            payment_method: PaymentMethod::Cash,
            note: None,
        }
    }

    #[tokio::test]
    async fn second_transaction_for_device_is_invalid_state() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = TransactionService::new(repos);

        let tx = svc.create(input(device.id, 500_000, 50_000)).await.unwrap();
        assert_eq!(tx.final_amount, 450_000);

        let err = svc.create(input(device.id, 10, 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn discount_above_total_is_rejected() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = TransactionService::new(repos);

        let err = svc.create(input(device.id, 500_000, 600_000)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert!(svc.list_by_device(device.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn self_update_is_not_a_duplicate() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = TransactionService::new(repos);

        let tx = svc.create(input(device.id, 500_000, 0)).await.unwrap();
        let tx = svc
            .update(tx.id, input(device.id, 500_000, 100_000))
            .await
            .unwrap();
        assert_eq!(tx.final_amount, 400_000);

        let err = svc
            .update(tx.id, input(device.id, 500_000, 600_000))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn moving_a_transaction_onto_a_paid_device_is_rejected() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let first = seed_device(repos.as_ref(), &staff.id).await;
        let second = seed_device(repos.as_ref(), &staff.id).await;
        let svc = TransactionService::new(repos);

        svc.create(input(first.id, 100, 0)).await.unwrap();
        let tx = svc.create(input(second.id, 200, 0)).await.unwrap();
        let err = svc.update(tx.id, input(first.id, 200, 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn revenue_sums_final_amounts_in_range() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let a = seed_device(repos.as_ref(), &staff.id).await;
        let b = seed_device(repos.as_ref(), &staff.id).await;
        let svc = TransactionService::new(repos);

        let start = Utc::now() - chrono::Duration::minutes(1);
        svc.create(input(a.id, 300_000, 50_000)).await.unwrap();
        svc.create(input(b.id, 200_000, 0)).await.unwrap();
        let end = Utc::now() + chrono::Duration::minutes(1);

        assert_eq!(svc.revenue(start, end).await.unwrap(), 450_000);
        let later = end + chrono::Duration::days(1);
        assert_eq!(svc.revenue(end, later).await.unwrap(), 0);
        assert!(svc.revenue(end, start).await.is_err());
    }
}
