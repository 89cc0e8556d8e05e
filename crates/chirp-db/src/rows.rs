//! Row decoding shared by the query modules. SQLite keeps timestamps as
//! `YYYY-MM-DD HH:MM:SS` text in UTC, the same shape `datetime('now')` writes.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Row, types::Type};

use chirp_types::models::{Comment, Post, TIMESTAMP_FORMAT, User};

pub(crate) fn to_sql_time(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn time_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_time(idx, &raw)
}

pub(crate) fn opt_time_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse_time(idx, &s)).transpose()
}

fn parse_time(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|ndt| ndt.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) const USER_COLUMNS: &str = "id, username, email, password, created_at, updated_at";

pub(crate) fn user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at: time_at(row, 4)?,
        updated_at: time_at(row, 5)?,
    })
}

/// Expects `id, user_id, title, content, deleted_at, created_at, updated_at`.
pub(crate) fn post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        deleted_at: opt_time_at(row, 4)?,
        created_at: time_at(row, 5)?,
        updated_at: time_at(row, 6)?,
    })
}

/// Expects `id, post_id, user_id, content, deleted_at, created_at, updated_at`.
pub(crate) fn comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        deleted_at: opt_time_at(row, 4)?,
        created_at: time_at(row, 5)?,
        updated_at: time_at(row, 6)?,
    })
}
