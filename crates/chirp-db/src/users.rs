use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use chirp_core::store::CredentialStore;
use chirp_types::models::{RefreshToken, User};

use crate::{Database, duplicate_or};
use crate::rows::{self, USER_COLUMNS, time_at, to_sql_time};

const REFRESH_TOKEN_COLUMNS: &str =
    "id, user_id, refresh_token, expires_at, created_at, updated_at";

fn refresh_token(row: &rusqlite::Row<'_>) -> rusqlite::Result<RefreshToken> {
    Ok(RefreshToken {
        id: row.get(0)?,
        user_id: row.get(1)?,
        token: row.get(2)?,
        expires_at: time_at(row, 3)?,
        created_at: time_at(row, 4)?,
        updated_at: time_at(row, 5)?,
    })
}

impl CredentialStore for Database {
    fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
                (username, email, password_hash),
            )
            .map_err(duplicate_or)?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
            Ok(conn.query_row(&sql, [id], rows::user).optional()?)
        })
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS);
            Ok(conn.query_row(&sql, [email], rows::user).optional()?)
        })
    }

    fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM users WHERE email = ?1 OR username = ?2 LIMIT 1",
                USER_COLUMNS
            );
            Ok(conn
                .query_row(&sql, [email, username], rows::user)
                .optional()?)
        })
    }

    fn update_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE users SET username = ?1, email = ?2, password = ?3, updated_at = datetime('now')
                 WHERE id = ?4",
                params![user.username, user.email, user.password, user.id],
            )?;
            Ok(())
        })
    }

    fn find_live_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM refresh_tokens
                 WHERE user_id = ?1 AND expires_at >= ?2
                 ORDER BY expires_at DESC
                 LIMIT 1",
                REFRESH_TOKEN_COLUMNS
            );
            Ok(conn
                .query_row(&sql, params![user_id, to_sql_time(now)], refresh_token)
                .optional()?)
        })
    }

    fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM refresh_tokens WHERE refresh_token = ?1",
                REFRESH_TOKEN_COLUMNS
            );
            Ok(conn.query_row(&sql, [token], refresh_token).optional()?)
        })
    }

    fn store_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO refresh_tokens (user_id, refresh_token, expires_at) VALUES (?1, ?2, ?3)",
                params![user_id, token, to_sql_time(expires_at)],
            )?;
            Ok(())
        })
    }

    fn delete_refresh_token(&self, token: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM refresh_tokens WHERE refresh_token = ?1", [token])?;
            Ok(())
        })
    }
}
