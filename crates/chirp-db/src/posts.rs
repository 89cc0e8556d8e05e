use anyhow::Result;
use rusqlite::{OptionalExtension, params};

use chirp_core::store::PostStore;
use chirp_types::models::{Post, PostSummary};

use crate::Database;
use crate::rows;

const POST_COLUMNS: &str = "id, user_id, title, content, deleted_at, created_at, updated_at";

// Author name and both counters in one pass (no N+1 per listed post).
const SUMMARY_SELECT: &str = "
    SELECT p.id, p.user_id, p.title, p.content, p.deleted_at, p.created_at, p.updated_at,
           u.username,
           (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id),
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id AND c.deleted_at IS NULL)
    FROM posts p
    JOIN users u ON u.id = p.user_id";

fn summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostSummary> {
    Ok(PostSummary {
        post: rows::post(row)?,
        username: row.get(7)?,
        likes_count: row.get(8)?,
        comments_count: row.get(9)?,
    })
}

impl PostStore for Database {
    fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (user_id, title, content) VALUES (?1, ?2, ?3)",
                params![user_id, title, content],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_post(&self, id: i64) -> Result<Option<Post>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM posts WHERE id = ?1 AND deleted_at IS NULL",
                POST_COLUMNS
            );
            Ok(conn.query_row(&sql, [id], rows::post).optional()?)
        })
    }

    fn get_post_summary(&self, id: i64) -> Result<Option<PostSummary>> {
        self.with_conn(|conn| {
            let sql = format!("{} WHERE p.id = ?1 AND p.deleted_at IS NULL", SUMMARY_SELECT);
            Ok(conn.query_row(&sql, [id], summary).optional()?)
        })
    }

    fn list_posts(&self, author: Option<i64>, limit: i64, offset: i64) -> Result<Vec<PostSummary>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{} WHERE p.deleted_at IS NULL AND (?1 IS NULL OR p.user_id = ?1)
                 ORDER BY p.created_at DESC, p.id DESC
                 LIMIT ?2 OFFSET ?3",
                SUMMARY_SELECT
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![author, limit, offset], summary)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn count_posts(&self, author: Option<i64>) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL AND (?1 IS NULL OR user_id = ?1)",
                params![author],
                |r| r.get(0),
            )?)
        })
    }

    fn update_post(&self, id: i64, title: &str, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE posts SET title = ?1, content = ?2, updated_at = datetime('now')
                 WHERE id = ?3 AND deleted_at IS NULL",
                params![title, content, id],
            )?;
            Ok(())
        })
    }

    fn delete_post(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE posts SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
                [id],
            )?;
            Ok(())
        })
    }
}
