use crate::domain::entities::announcement::{Announcement, Reply};
use crate::domain::error::DomainError;

pub trait AnnouncementRepository: Send + Sync {
    fn add(&self, announcement: &Announcement) -> Result<(), DomainError>;
    fn remove(&self, id: &str) -> Result<(), DomainError>;
    fn get(&self, id: &str) -> Result<Option<Announcement>, DomainError>;
    /// All announcements, newest first.
    fn list(&self) -> Result<Vec<Announcement>, DomainError>;

    fn add_reply(&self, reply: &Reply) -> Result<(), DomainError>;
    fn remove_reply(&self, id: &str) -> Result<(), DomainError>;
    fn get_reply(&self, id: &str) -> Result<Option<Reply>, DomainError>;
    /// Replies under one announcement, oldest first.
    fn list_replies(&self, announcement_id: &str) -> Result<Vec<Reply>, DomainError>;
}
