use crate::application::{load_actor, require_admin};
use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::user_role::UserRole;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub initial_deposit: f64,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub initial_deposit: Option<f64>,
}

pub struct AccountUseCase {
    users: Arc<dyn UserRepository>,
}

impl AccountUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create the first admin account on a fresh database. Every other
    /// account is admin-gated, so this is the only ungated write; it is
    /// refused once any admin exists.
    pub fn bootstrap(
        &self,
        email: String,
        name: String,
        password: String,
    ) -> Result<User, DomainError> {
        if !self.users.list(Some(UserRole::Admin))?.is_empty() {
            return Err(DomainError::InvalidInput(
                "An admin account already exists".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::InvalidInput(format!("Invalid email: {email}")));
        }
        if password.len() < 6 {
            return Err(DomainError::InvalidInput(
                "Password must be at least 6 characters".into(),
            ));
        }
        let hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::InvalidInput(format!("Password hashing failed: {e}")))?;
        let user = User::new(email, name, UserRole::Admin, 0.0, hash);
        self.users.add(&user)?;
        Ok(user)
    }

    pub fn add(&self, actor_id: &str, new: NewUser) -> Result<User, DomainError> {
        require_admin(&self.users, actor_id)?;

        if !new.email.contains('@') {
            return Err(DomainError::InvalidInput(format!(
                "Invalid email: {}",
                new.email
            )));
        }
        if new.password.len() < 6 {
            return Err(DomainError::InvalidInput(
                "Password must be at least 6 characters".into(),
            ));
        }
        if !new.initial_deposit.is_finite() || new.initial_deposit < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Initial deposit must be non-negative, got {}",
                new.initial_deposit
            )));
        }
        if self.users.get_by_email(&new.email)?.is_some() {
            return Err(DomainError::InvalidInput(format!(
                "Email already registered: {}",
                new.email
            )));
        }

        let hash = bcrypt::hash(&new.password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::InvalidInput(format!("Password hashing failed: {e}")))?;
        let user = User::new(new.email, new.name, new.role, new.initial_deposit, hash);
        self.users.add(&user)?;
        Ok(user)
    }

    /// Verify credentials and return the account. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let invalid = || DomainError::Forbidden("invalid credentials".into());
        let user = self.users.get_by_email(email)?.ok_or_else(invalid)?;
        let ok = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !ok {
            return Err(invalid());
        }
        Ok(user)
    }

    pub fn update(&self, actor_id: &str, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        require_admin(&self.users, actor_id)?;
        let mut user = self
            .users
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {id}")))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            if !email.contains('@') {
                return Err(DomainError::InvalidInput(format!("Invalid email: {email}")));
            }
            user.email = email;
        }
        if let Some(deposit) = patch.initial_deposit {
            if !deposit.is_finite() || deposit < 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "Initial deposit must be non-negative, got {deposit}"
                )));
            }
            user.initial_deposit = deposit;
        }

        self.users.update(&user)?;
        Ok(user)
    }

    pub fn get(&self, actor_id: &str, id: &str) -> Result<User, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        if !actor.role.is_admin() && actor.id != id {
            return Err(DomainError::Forbidden(
                "clients may only view their own account".into(),
            ));
        }
        self.users
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {id}")))
    }

    /// All client accounts, for the admin roster view.
    pub fn list(&self, actor_id: &str) -> Result<Vec<User>, DomainError> {
        require_admin(&self.users, actor_id)?;
        self.users.list(Some(UserRole::Client))
    }

    pub fn remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        require_admin(&self.users, actor_id)?;
        self.users.remove(id)
    }
}
