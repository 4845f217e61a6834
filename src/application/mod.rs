pub mod accounts;
pub mod announcements;
pub mod portfolio;
pub mod trades;

use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use std::sync::Arc;

/// Resolve the acting user or fail with NotFound.
pub(crate) fn load_actor(
    users: &Arc<dyn UserRepository>,
    actor_id: &str,
) -> Result<User, DomainError> {
    users
        .get(actor_id)?
        .ok_or_else(|| DomainError::NotFound(format!("User not found: {actor_id}")))
}

/// Resolve the acting user and require the admin role.
pub(crate) fn require_admin(
    users: &Arc<dyn UserRepository>,
    actor_id: &str,
) -> Result<User, DomainError> {
    let actor = load_actor(users, actor_id)?;
    if !actor.role.is_admin() {
        return Err(DomainError::Forbidden("admin access required".into()));
    }
    Ok(actor)
}
