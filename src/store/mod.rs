mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// A pre-generated, PIN-protected token granting a limited number of
/// result views. `student_id` is set when the card is bound to one student
/// at generation time; unbound cards work for any student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScratchCard {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub pin: String,
    pub student_id: Option<String>,
    pub uses: i32,
    pub created_at: OffsetDateTime,
}

/// Outcome of the conditional use decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardUpdate {
    Applied { remaining: i32 },
    /// The stored counter no longer matches what the caller observed
    /// (or the card is gone); nothing was written.
    Conflict,
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn find_student(&self, student_id: &str) -> anyhow::Result<Option<Student>>;

    /// Exact-match lookup; PINs are unique at the store level.
    async fn find_card_by_pin(&self, pin: &str) -> anyhow::Result<Option<ScratchCard>>;

    /// Decrement the card's remaining uses by one, but only if the stored
    /// counter still equals `observed_uses` and is positive. The read and
    /// write are atomic per card, so concurrent redemptions of the same
    /// card serialize here while other cards proceed untouched.
    async fn consume_card_use(&self, pin: &str, observed_uses: i32) -> anyhow::Result<CardUpdate>;
}
