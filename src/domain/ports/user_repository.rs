use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::values::user_role::UserRole;

pub trait UserRepository: Send + Sync {
    fn add(&self, user: &User) -> Result<(), DomainError>;
    fn update(&self, user: &User) -> Result<(), DomainError>;
    fn remove(&self, id: &str) -> Result<(), DomainError>;
    fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, DomainError>;
}
