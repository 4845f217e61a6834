use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::user_role::UserRole;
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

const USER_COLUMNS: &str = "id, email, name, role, initial_deposit, password_hash, created_at";

pub struct SqliteUserRepo {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn row_to_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
        let role_str: String = row.get(3)?;
        let created_str: String = row.get(6)?;

        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            role: role_str.parse().unwrap_or_else(|_| {
                eprintln!("Warning: invalid role '{role_str}' in user, defaulting to CLIENT");
                UserRole::Client
            }),
            initial_deposit: row.get(4)?,
            password_hash: row.get(5)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

impl UserRepository for SqliteUserRepo {
    fn add(&self, user: &User) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO users (id, email, name, role, initial_deposit, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id,
                user.email,
                user.name,
                user.role.to_string(),
                user.initial_deposit,
                user.password_hash,
                user.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add user: {e}")))?;
        Ok(())
    }

    fn update(&self, user: &User) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE users SET email = ?1, name = ?2, initial_deposit = ?3 WHERE id = ?4",
                params![user.email, user.name, user.initial_deposit, user.id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update user: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("User not found: {}", user.id)));
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete user: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("User not found: {id}")));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            Self::row_to_user,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            Self::row_to_user,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {USER_COLUMNS} FROM users");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(role) = role {
            sql.push_str(" WHERE role = ?1");
            param_values.push(Box::new(role.to_string()));
        }
        sql.push_str(" ORDER BY name ASC");

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let users = stmt
            .query_map(params_refs.as_slice(), Self::row_to_user)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(users)
    }
}
