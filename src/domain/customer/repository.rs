use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Customer>>;
    /// Case-insensitive substring match over name, phone and email.
    async fn search(&self, query: &str, page: PageRequest)
        -> DomainResult<PaginatedResult<Customer>>;
    async fn save(&self, customer: Customer) -> DomainResult<Customer>;
    async fn update(&self, customer: Customer) -> DomainResult<Customer>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
