use crate::domain::entities::announcement::{Announcement, Reply};
use crate::domain::error::DomainError;
use crate::domain::ports::announcement_repository::AnnouncementRepository;
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct SqliteAnnouncementRepo {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAnnouncementRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn parse_timestamp(s: &str) -> chrono::DateTime<chrono::Utc> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now())
    }

    fn row_to_announcement(row: &rusqlite::Row) -> Result<Announcement, rusqlite::Error> {
        let created_str: String = row.get(4)?;
        Ok(Announcement {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author_id: row.get(3)?,
            created_at: Self::parse_timestamp(&created_str),
        })
    }

    fn row_to_reply(row: &rusqlite::Row) -> Result<Reply, rusqlite::Error> {
        let created_str: String = row.get(5)?;
        Ok(Reply {
            id: row.get(0)?,
            announcement_id: row.get(1)?,
            user_id: row.get(2)?,
            user_name: row.get(3)?,
            content: row.get(4)?,
            created_at: Self::parse_timestamp(&created_str),
        })
    }
}

impl AnnouncementRepository for SqliteAnnouncementRepo {
    fn add(&self, announcement: &Announcement) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO announcements (id, title, content, author_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                announcement.id,
                announcement.title,
                announcement.content,
                announcement.author_id,
                announcement.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add announcement: {e}")))?;
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM announcements WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete announcement: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!(
                "Announcement not found: {id}"
            )));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Announcement>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT id, title, content, author_id, created_at FROM announcements WHERE id = ?1",
            params![id],
            Self::row_to_announcement,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn list(&self) -> Result<Vec<Announcement>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, content, author_id, created_at FROM announcements
                 ORDER BY created_at DESC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let announcements = stmt
            .query_map([], Self::row_to_announcement)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(announcements)
    }

    fn add_reply(&self, reply: &Reply) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO replies (id, announcement_id, user_id, user_name, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                reply.id,
                reply.announcement_id,
                reply.user_id,
                reply.user_name,
                reply.content,
                reply.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add reply: {e}")))?;
        Ok(())
    }

    fn remove_reply(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM replies WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete reply: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Reply not found: {id}")));
        }
        Ok(())
    }

    fn get_reply(&self, id: &str) -> Result<Option<Reply>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT id, announcement_id, user_id, user_name, content, created_at
             FROM replies WHERE id = ?1",
            params![id],
            Self::row_to_reply,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn list_replies(&self, announcement_id: &str) -> Result<Vec<Reply>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, announcement_id, user_id, user_name, content, created_at
                 FROM replies WHERE announcement_id = ?1 ORDER BY created_at ASC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let replies = stmt
            .query_map(params![announcement_id], Self::row_to_reply)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(replies)
    }
}
