use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use wishwall_core::domain::comments::{Comment, LikeAction, NewComment};

#[derive(Debug, Error)]
pub enum CommentsRepoError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("comment id already exists: {0}")]
    DuplicateId(String),
}

pub async fn list_comments(pool: &SqlitePool) -> Result<Vec<Comment>, CommentsRepoError> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, text, likes, timestamp
        FROM comments
        ORDER BY likes DESC, timestamp DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    let mut comments = Vec::with_capacity(rows.len());
    for row in rows {
        comments.push(map_comment(&row)?);
    }
    Ok(comments)
}

pub async fn insert_comment(
    pool: &SqlitePool,
    comment: &NewComment,
) -> Result<(), CommentsRepoError> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (id, name, text, likes, timestamp)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(comment.id.as_str())
    .bind(&comment.name)
    .bind(&comment.text)
    .bind(comment.likes)
    .bind(comment.timestamp)
    .execute(pool)
    .await;
    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(CommentsRepoError::DuplicateId(comment.id.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Adjusts the like counter in one statement so concurrent requests never
/// lose an update. The counter saturates at `i64::MAX` and floors at zero.
/// Returns whether a comment with `id` exists.
pub async fn apply_like(
    pool: &SqlitePool,
    id: &str,
    action: LikeAction,
) -> Result<bool, CommentsRepoError> {
    let statement = match action {
        LikeAction::Like => {
            r#"
            UPDATE comments
            SET likes = CASE
                WHEN likes < 9223372036854775807 THEN likes + 1
                ELSE likes
            END
            WHERE id = ?1
            "#
        }
        LikeAction::Unlike => {
            r#"
            UPDATE comments
            SET likes = MAX(likes - 1, 0)
            WHERE id = ?1
            "#
        }
    };
    let result = sqlx::query(statement).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn ping(pool: &SqlitePool) -> Result<(), CommentsRepoError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

fn map_comment(row: &SqliteRow) -> Result<Comment, CommentsRepoError> {
    Ok(Comment {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        text: row.try_get("text")?,
        likes: row.try_get("likes")?,
        timestamp: row.try_get("timestamp")?,
    })
}
