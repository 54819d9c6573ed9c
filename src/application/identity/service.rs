//! User management and login
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::{PageRequest, PaginatedResult};

const MIN_PASSWORD_LEN: usize = 6;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    /// Defaults to TECHNICIAN
    pub role: Option<UserRole>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}

/// Orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_email(email.trim()).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &user.email, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        self.repos.users().record_login(&user.id).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    pub async fn list_users(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>> {
        self.repos.users().list(page).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create_user(&self, cmd: CreateUser) -> DomainResult<User> {
        let email = normalize_email(&cmd.email)?;
        if cmd.full_name.trim().is_empty() {
            return Err(DomainError::missing_field("fullName"));
        }
        validate_password(&cmd.password)?;

        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!("Email already registered: {}", email)));
        }

        let hash = hash_password(&cmd.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let mut user = User::new(
            cmd.full_name.trim(),
            email,
            hash,
            cmd.role.unwrap_or_default(),
        );
        user.phone = cmd.phone;

        let user = self.repos.users().save(user).await?;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, cmd: UpdateUser) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;

        if let Some(email) = cmd.email {
            let email = normalize_email(&email)?;
            if let Some(other) = self.repos.users().find_by_email(&email).await? {
                if other.id != user.id {
                    return Err(DomainError::Conflict(format!(
                        "Email already registered: {}",
                        email
                    )));
                }
            }
            user.email = email;
        }
        if let Some(name) = cmd.full_name {
            if name.trim().is_empty() {
                return Err(DomainError::missing_field("fullName"));
            }
            user.full_name = name.trim().to_string();
        }
        if let Some(password) = cmd.password {
            validate_password(&password)?;
            user.password_hash = hash_password(&password)
                .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;
        }
        if cmd.phone.is_some() {
            user.phone = cmd.phone;
        }
        if let Some(role) = cmd.role {
            user.role = role;
        }

        self.repos.users().update(user).await
    }

    pub async fn set_active(&self, id: &str, active: bool) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;
        user.is_active = active;
        let user = self.repos.users().update(user).await?;
        info!(user_id = %user.id, active, "User activation changed");
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Create the bootstrap admin when no user exists yet.
    /// Returns the new account, or `None` when users were already present.
    pub async fn ensure_admin(
        &self,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }

        let admin = self
            .create_user(CreateUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                phone: None,
                role: Some(UserRole::Admin),
            })
            .await?;
        Ok(Some(admin))
    }
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::missing_field("email"));
    }
    if !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    Ok(email)
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::memory_repos;

    async fn service() -> UserService {
        UserService::new(memory_repos().await, JwtConfig::default())
    }

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            full_name: "Linh Tran".into(),
            email: email.into(),
            password: "secret123".into(),
            phone: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_technician_and_hashes_password() {
        let svc = service().await;
        let user = svc.create_user(new_user("Tech@Shop.test")).await.unwrap();

        assert_eq!(user.role, UserRole::Technician);
        assert_eq!(user.email, "tech@shop.test");
        assert_ne!(user.password_hash, "secret123");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let svc = service().await;
        svc.create_user(new_user("a@shop.test")).await.unwrap();
        let err = svc.create_user(new_user("A@shop.test")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_issues_token_and_rejects_bad_password() {
        let svc = service().await;
        svc.create_user(new_user("front@shop.test")).await.unwrap();

        let auth = svc.login("front@shop.test", "secret123").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert!(!auth.token.is_empty());

        let err = svc.login("front@shop.test", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        let err = svc.login("nobody@shop.test", "secret123").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn deactivated_user_cannot_log_in() {
        let svc = service().await;
        let user = svc.create_user(new_user("old@shop.test")).await.unwrap();
        svc.set_active(&user.id, false).await.unwrap();

        let err = svc.login("old@shop.test", "secret123").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m.contains("disabled")));
    }

    #[tokio::test]
    async fn update_keeps_own_email_but_rejects_taken_one() {
        let svc = service().await;
        let a = svc.create_user(new_user("a@shop.test")).await.unwrap();
        svc.create_user(new_user("b@shop.test")).await.unwrap();

        let same = UpdateUser {
            email: Some("a@shop.test".into()),
            full_name: Some("Renamed".into()),
            ..Default::default()
        };
        let updated = svc.update_user(&a.id, same).await.unwrap();
        assert_eq!(updated.full_name, "Renamed");

        let taken = UpdateUser {
            email: Some("b@shop.test".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_user(&a.id, taken).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn ensure_admin_only_runs_on_empty_table() {
        let svc = service().await;
        let first = svc
            .ensure_admin("admin@shop.test", "Admin", "admin123")
            .await
            .unwrap();
        assert_eq!(first.map(|u| u.role), Some(UserRole::Admin));

        let second = svc
            .ensure_admin("other@shop.test", "Admin", "admin123")
            .await
            .unwrap();
        assert!(second.is_none());
    }
}
