use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::transaction::TransactionRepository;
use crate::domain::{DomainError, DomainResult, PaymentMethod, Transaction};
use crate::infrastructure::database::entities::transaction;
use crate::shared::{PageRequest, PaginatedResult};

const DUPLICATE: &str = "Transaction already exists for this device";

pub struct SeaOrmTransactionRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn method_to_entity(method: PaymentMethod) -> transaction::PaymentMethod {
    match method {
        PaymentMethod::Cash => transaction::PaymentMethod::Cash,
        PaymentMethod::Card => transaction::PaymentMethod::Card,
        PaymentMethod::BankTransfer => transaction::PaymentMethod::BankTransfer,
        PaymentMethod::EWallet => transaction::PaymentMethod::EWallet,
    }
}

fn method_to_domain(method: transaction::PaymentMethod) -> PaymentMethod {
    match method {
        transaction::PaymentMethod::Cash => PaymentMethod::Cash,
        transaction::PaymentMethod::Card => PaymentMethod::Card,
        transaction::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
        transaction::PaymentMethod::EWallet => PaymentMethod::EWallet,
    }
}

fn model_to_domain(m: transaction::Model) -> Transaction {
    Transaction {
        id: m.id,
        device_id: m.device_id,
        repair_session_id: m.repair_session_id,
        total: m.total,
        discount: m.discount,
        final_amount: m.final_amount,
        payment_method: method_to_domain(m.payment_method),
        note: m.note,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl TransactionRepository for SeaOrmTransactionRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Transaction>> {
        let model = transaction::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_latest_for_device(&self, device_id: i32) -> DomainResult<Option<Transaction>> {
        let model = transaction::Entity::find()
            .filter(transaction::Column::DeviceId.eq(device_id))
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<Transaction>> {
        let models = transaction::Entity::find()
            .filter(transaction::Column::DeviceId.eq(device_id))
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_for_device(&self, device_id: i32, excluding: Option<i32>) -> DomainResult<bool> {
        let mut query =
            transaction::Entity::find().filter(transaction::Column::DeviceId.eq(device_id));
        if let Some(id) = excluding {
            query = query.filter(transaction::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Transaction>> {
        let paginator = transaction::Entity::find()
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Transaction>> {
        let models = transaction::Entity::find()
            .filter(transaction::Column::CreatedAt.gte(start))
            .filter(transaction::Column::CreatedAt.lte(end))
            .order_by_asc(transaction::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, tx: Transaction) -> DomainResult<Transaction> {
        let model = transaction::ActiveModel {
            device_id: Set(tx.device_id),
            repair_session_id: Set(tx.repair_session_id),
            total: Set(tx.total),
            discount: Set(tx.discount),
            final_amount: Set(tx.final_amount),
            payment_method: Set(method_to_entity(tx.payment_method)),
            note: Set(tx.note),
            created_at: Set(tx.created_at),
            updated_at: Set(tx.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(write_err(DUPLICATE))?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, tx: Transaction) -> DomainResult<Transaction> {
        let existing = transaction::Entity::find_by_id(tx.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Transaction", "id", tx.id))?;

        let mut active: transaction::ActiveModel = existing.into();
        active.device_id = Set(tx.device_id);
        active.repair_session_id = Set(tx.repair_session_id);
        active.total = Set(tx.total);
        active.discount = Set(tx.discount);
        active.final_amount = Set(tx.final_amount);
        active.payment_method = Set(method_to_entity(tx.payment_method));
        active.note = Set(tx.note);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err(DUPLICATE))?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = transaction::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Transaction", "id", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, PaymentMethod, Transaction, UserRole};
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    fn payment(device_id: i32, total: i64) -> Transaction {
        let mut tx = Transaction::new(device_id, total, 0, PaymentMethod::Cash);
        tx.settle().unwrap();
        tx
    }

    #[tokio::test]
    async fn second_insert_for_a_device_is_a_conflict() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;

        repos.transactions().save(payment(device.id, 100_000)).await.unwrap();
        let err = repos
            .transactions()
            .save(payment(device.id, 200_000))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repos.transactions().find_by_device(device.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].total, 100_000);
    }

    #[tokio::test]
    async fn moving_a_payment_onto_a_paid_device_is_a_conflict() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let paid = seed_device(repos.as_ref(), &staff.id).await;
        let other = seed_device(repos.as_ref(), &staff.id).await;

        repos.transactions().save(payment(paid.id, 100_000)).await.unwrap();
        let mut moving = repos
            .transactions()
            .save(payment(other.id, 50_000))
            .await
            .unwrap();

        moving.device_id = paid.id;
        let err = repos.transactions().update(moving.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let unchanged = repos.transactions().find_by_id(moving.id).await.unwrap().unwrap();
        assert_eq!(unchanged.device_id, other.id);
    }
}
