//! SQLite Chat History Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{ChatHistoryPort, HistoryError};
use crate::domain::{ChatMessage, ChatRole};

/// SQLite 对话记录
pub struct SqliteChatHistory {
    pool: DbPool,
}

impl SqliteChatHistory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MessageRow {
    role: String,
    content: String,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = HistoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role = ChatRole::from_str(&row.role).ok_or_else(|| {
            HistoryError::SerializationError(format!("Unknown chat role: {}", row.role))
        })?;
        Ok(ChatMessage {
            role,
            content: row.content,
        })
    }
}

fn db_error(e: sqlx::Error) -> HistoryError {
    HistoryError::DatabaseError(e.to_string())
}

async fn insert_from(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    start: i64,
    messages: &[ChatMessage],
) -> Result<(), HistoryError> {
    let now = Utc::now().to_rfc3339();
    for (offset, message) in messages.iter().enumerate() {
        sqlx::query(
            "INSERT INTO chat_messages (position, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(start + offset as i64)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(&now)
        .execute(&mut **tx)
        .await
        .map_err(db_error)?;
    }
    Ok(())
}

#[async_trait]
impl ChatHistoryPort for SqliteChatHistory {
    async fn load(&self) -> Result<Vec<ChatMessage>, HistoryError> {
        let rows: Vec<MessageRow> =
            sqlx::query_as("SELECT role, content FROM chat_messages ORDER BY position, id")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        rows.into_iter().map(ChatMessage::try_from).collect()
    }

    async fn save(&self, messages: &[ChatMessage]) -> Result<(), HistoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM chat_messages")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        insert_from(&mut tx, 0, messages).await?;

        tx.commit().await.map_err(db_error)?;
        tracing::debug!(count = messages.len(), "Chat history saved to SQLite");
        Ok(())
    }

    /// 只插入新消息，不重写整张表
    async fn append(&self, messages: &[ChatMessage]) -> Result<(), HistoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM chat_messages")
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error)?;
        insert_from(&mut tx, next, messages).await?;

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }
}
