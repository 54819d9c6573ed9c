//! Customer registry

use std::sync::Arc;

use tracing::info;

use super::clean;
use crate::domain::{Customer, DomainError, DomainResult, RepositoryProvider};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: CustomerInput) -> DomainResult<Customer> {
        let mut customer = Customer::new("", "");
        apply(&mut customer, input)?;

        let customer = self.repos.customers().save(customer).await?;
        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: i32, input: CustomerInput) -> DomainResult<Customer> {
        let mut customer = self.get(id).await?;
        apply(&mut customer, input)?;
        self.repos.customers().update(customer).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id))
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Customer>> {
        self.repos.customers().list(page).await
    }

    /// Substring match on name, phone or email
    pub async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Customer>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list(page).await;
        }
        self.repos.customers().search(query, page).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.customers().delete(id).await?;
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

fn apply(customer: &mut Customer, input: CustomerInput) -> DomainResult<()> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::missing_field("name"));
    }
    let phone = input.phone.trim();
    if phone.is_empty() {
        return Err(DomainError::missing_field("phone"));
    }

    customer.name = name.to_string();
    customer.phone = phone.to_string();
    customer.email = clean(input.email);
    customer.address = clean(input.address);
    customer.note = clean(input.note);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::memory_repos;

    fn input(name: &str, phone: &str) -> CustomerInput {
        CustomerInput {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn phone_is_required() {
        let svc = CustomerService::new(memory_repos().await);
        let err = svc.create(input("Mai", "  ")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("phone")));
    }

    #[tokio::test]
    async fn search_matches_name_or_phone() {
        let svc = CustomerService::new(memory_repos().await);
        svc.create(input("Nguyen Van A", "0901000111")).await.unwrap();
        svc.create(input("Tran Thi B", "0912000222")).await.unwrap();

        let by_name = svc.search("Tran", PageRequest::default()).await.unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].name, "Tran Thi B");

        let by_phone = svc.search("0901", PageRequest::default()).await.unwrap();
        assert_eq!(by_phone.items[0].name, "Nguyen Van A");
    }

    #[tokio::test]
    async fn update_and_delete_unknown_customer_is_not_found() {
        let svc = CustomerService::new(memory_repos().await);
        assert!(matches!(
            svc.update(99, input("X", "1")).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(svc.delete(99).await, Err(DomainError::NotFound { .. })));
    }
}
