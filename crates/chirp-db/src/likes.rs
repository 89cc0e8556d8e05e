use anyhow::Result;
use rusqlite::params;

use chirp_core::store::{LikeStore, LikeTarget};

use crate::{Database, duplicate_or};

/// (table, target column, target id)
fn table_for(target: LikeTarget) -> (&'static str, &'static str, i64) {
    match target {
        LikeTarget::Post(id) => ("post_likes", "post_id", id),
        LikeTarget::Comment(id) => ("comment_likes", "comment_id", id),
    }
}

impl LikeStore for Database {
    fn is_liked(&self, target: LikeTarget, user_id: i64) -> Result<bool> {
        let (table, column, id) = table_for(target);
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE {} = ?1 AND user_id = ?2",
                table, column
            );
            let count: i64 = conn.query_row(&sql, params![id, user_id], |r| r.get(0))?;
            Ok(count > 0)
        })
    }

    fn like(&self, target: LikeTarget, user_id: i64) -> Result<()> {
        let (table, column, id) = table_for(target);
        self.with_conn(|conn| {
            let sql = format!("INSERT INTO {} ({}, user_id) VALUES (?1, ?2)", table, column);
            conn.execute(&sql, params![id, user_id]).map_err(duplicate_or)?;
            Ok(())
        })
    }

    fn unlike(&self, target: LikeTarget, user_id: i64) -> Result<()> {
        let (table, column, id) = table_for(target);
        self.with_conn(|conn| {
            let sql = format!("DELETE FROM {} WHERE {} = ?1 AND user_id = ?2", table, column);
            conn.execute(&sql, params![id, user_id])?;
            Ok(())
        })
    }

    fn count_likes(&self, target: LikeTarget) -> Result<i64> {
        let (table, column, id) = table_for(target);
        self.with_conn(|conn| {
            let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?1", table, column);
            Ok(conn.query_row(&sql, [id], |r| r.get(0))?)
        })
    }
}
