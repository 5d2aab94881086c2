//! Choice-list persistence queries
//!
//! The persisted set is wholesale-replaced on save: delete all rows for the
//! user, then insert the new list, inside one transaction. There is no
//! diff/patch path; a save either fully supersedes the previous set or
//! leaves it untouched.

use crate::db::ChoiceEntry;
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Read a user's choice rows, ascending by rank
pub async fn get_choices(pool: &SqlitePool, user_id: &str) -> Result<Vec<ChoiceEntry>> {
    let rows = sqlx::query_as::<_, (String, String, String, i64)>(
        r#"
        SELECT id, user_id, program_id, choice_order
        FROM uni_choices
        WHERE user_id = ?
        ORDER BY choice_order ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ChoiceEntry {
            id: row.0,
            user_id: row.1,
            program_id: row.2,
            choice_order: row.3,
        })
        .collect())
}

/// Replace a user's entire choice set (delete-all, then insert-all)
pub async fn replace_choices(
    pool: &SqlitePool,
    user_id: &str,
    entries: &[ChoiceEntry],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM uni_choices WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO uni_choices (id, user_id, program_id, choice_order)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.program_id)
        .bind(entry.choice_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    debug!("Replaced choice set for {} ({} rows)", user_id, entries.len());
    Ok(())
}
