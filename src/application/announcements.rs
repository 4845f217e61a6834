use crate::application::load_actor;
use crate::domain::entities::announcement::{Announcement, Reply};
use crate::domain::error::DomainError;
use crate::domain::ports::announcement_repository::AnnouncementRepository;
use crate::domain::ports::user_repository::UserRepository;
use std::sync::Arc;

pub struct AnnouncementUseCase {
    announcements: Arc<dyn AnnouncementRepository>,
    users: Arc<dyn UserRepository>,
}

impl AnnouncementUseCase {
    pub fn new(
        announcements: Arc<dyn AnnouncementRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            announcements,
            users,
        }
    }

    /// Post an announcement. Any account may post; the title is stored
    /// upper-cased.
    pub fn post(
        &self,
        actor_id: &str,
        title: String,
        content: String,
    ) -> Result<Announcement, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        if title.trim().is_empty() {
            return Err(DomainError::InvalidInput("Title must not be empty".into()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Content must not be empty".into(),
            ));
        }
        let announcement = Announcement::new(title, content, actor.id);
        self.announcements.add(&announcement)?;
        Ok(announcement)
    }

    pub fn list(&self, actor_id: &str) -> Result<Vec<Announcement>, DomainError> {
        load_actor(&self.users, actor_id)?;
        self.announcements.list()
    }

    pub fn get(&self, actor_id: &str, id: &str) -> Result<Announcement, DomainError> {
        load_actor(&self.users, actor_id)?;
        self.announcements
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Announcement not found: {id}")))
    }

    /// Only the author may delete; replies go with the announcement.
    pub fn remove(&self, actor_id: &str, id: &str) -> Result<(), DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        let announcement = self
            .announcements
            .get(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Announcement not found: {id}")))?;
        if announcement.author_id != actor.id {
            return Err(DomainError::Forbidden(
                "only the author may delete an announcement".into(),
            ));
        }
        self.announcements.remove(id)
    }

    pub fn reply(
        &self,
        actor_id: &str,
        announcement_id: &str,
        content: String,
    ) -> Result<Reply, DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        if content.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Content must not be empty".into(),
            ));
        }
        if self.announcements.get(announcement_id)?.is_none() {
            return Err(DomainError::NotFound(format!(
                "Announcement not found: {announcement_id}"
            )));
        }
        let reply = Reply::new(
            announcement_id.to_string(),
            actor.id,
            actor.name,
            content,
        );
        self.announcements.add_reply(&reply)?;
        Ok(reply)
    }

    pub fn replies(&self, actor_id: &str, announcement_id: &str) -> Result<Vec<Reply>, DomainError> {
        load_actor(&self.users, actor_id)?;
        self.announcements.list_replies(announcement_id)
    }

    pub fn remove_reply(&self, actor_id: &str, reply_id: &str) -> Result<(), DomainError> {
        let actor = load_actor(&self.users, actor_id)?;
        let reply = self
            .announcements
            .get_reply(reply_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Reply not found: {reply_id}")))?;
        if reply.user_id != actor.id {
            return Err(DomainError::Forbidden(
                "only the author may delete a reply".into(),
            ));
        }
        self.announcements.remove_reply(reply_id)
    }
}
