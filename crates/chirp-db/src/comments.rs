use anyhow::Result;
use rusqlite::{OptionalExtension, params};

use chirp_core::store::CommentStore;
use chirp_types::models::{Comment, CommentSummary};

use crate::Database;
use crate::rows;

const COMMENT_COLUMNS: &str = "id, post_id, user_id, content, deleted_at, created_at, updated_at";

const SUMMARY_SELECT: &str = "
    SELECT c.id, c.post_id, c.user_id, c.content, c.deleted_at, c.created_at, c.updated_at,
           u.username,
           (SELECT COUNT(*) FROM comment_likes l WHERE l.comment_id = c.id)
    FROM comments c
    JOIN users u ON u.id = c.user_id";

fn summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentSummary> {
    Ok(CommentSummary {
        comment: rows::comment(row)?,
        username: row.get(7)?,
        likes_count: row.get(8)?,
    })
}

impl CommentStore for Database {
    fn create_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (post_id, user_id, content) VALUES (?1, ?2, ?3)",
                params![post_id, user_id, content],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM comments WHERE id = ?1 AND deleted_at IS NULL",
                COMMENT_COLUMNS
            );
            Ok(conn.query_row(&sql, [id], rows::comment).optional()?)
        })
    }

    fn get_comment_summary(&self, id: i64) -> Result<Option<CommentSummary>> {
        self.with_conn(|conn| {
            let sql = format!("{} WHERE c.id = ?1 AND c.deleted_at IS NULL", SUMMARY_SELECT);
            Ok(conn.query_row(&sql, [id], summary).optional()?)
        })
    }

    fn list_comments(&self, post_id: i64, limit: i64, offset: i64) -> Result<Vec<CommentSummary>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{} WHERE c.post_id = ?1 AND c.deleted_at IS NULL
                 ORDER BY c.created_at DESC, c.id DESC
                 LIMIT ?2 OFFSET ?3",
                SUMMARY_SELECT
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![post_id, limit, offset], summary)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn count_comments(&self, post_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM comments WHERE post_id = ?1 AND deleted_at IS NULL",
                [post_id],
                |r| r.get(0),
            )?)
        })
    }

    fn update_comment(&self, id: i64, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE comments SET content = ?1, updated_at = datetime('now')
                 WHERE id = ?2 AND deleted_at IS NULL",
                params![content, id],
            )?;
            Ok(())
        })
    }

    fn delete_comment(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE comments SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
                [id],
            )?;
            Ok(())
        })
    }
}
