use axum::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{CardUpdate, ResultStore, ScratchCard, Student};

/// In-memory store used when no `DATABASE_URL` is configured (the demo mode
/// the original app ships with) and as the substitute store in tests.
/// Students are keyed by id, cards by PIN.
#[derive(Default)]
pub struct MemoryStore {
    students: DashMap<String, Student>,
    cards: DashMap<String, ScratchCard>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the demo dataset: a few enrolled students,
    /// one student-bound card, one card anyone may use, one exhausted card.
    pub fn demo() -> Self {
        let store = Self::new();
        store.insert_student("stu-001", "Ada Obi");
        store.insert_student("stu-002", "Jonas Petrov");
        store.insert_student("stu-003", "Mary Mensah");
        store.insert_card("444455556666", Some("stu-001"), 3);
        store.insert_card("111122223333", None, 5);
        store.insert_card("999900001111", None, 0);
        store
    }

    pub fn insert_student(&self, id: &str, name: &str) {
        self.students.insert(
            id.to_string(),
            Student {
                id: id.to_string(),
                name: name.to_string(),
                created_at: OffsetDateTime::now_utc(),
            },
        );
    }

    pub fn insert_card(&self, pin: &str, student_id: Option<&str>, uses: i32) {
        self.cards.insert(
            pin.to_string(),
            ScratchCard {
                id: Uuid::new_v4(),
                pin: pin.to_string(),
                student_id: student_id.map(|s| s.to_string()),
                uses,
                created_at: OffsetDateTime::now_utc(),
            },
        );
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn find_student(&self, student_id: &str) -> anyhow::Result<Option<Student>> {
        Ok(self.students.get(student_id).map(|s| s.clone()))
    }

    async fn find_card_by_pin(&self, pin: &str) -> anyhow::Result<Option<ScratchCard>> {
        Ok(self.cards.get(pin).map(|c| c.clone()))
    }

    async fn consume_card_use(&self, pin: &str, observed_uses: i32) -> anyhow::Result<CardUpdate> {
        // get_mut holds the entry's shard lock, so the compare and the
        // decrement happen as one step per card.
        Ok(match self.cards.get_mut(pin) {
            Some(mut card) if card.uses == observed_uses && card.uses > 0 => {
                card.uses -= 1;
                CardUpdate::Applied {
                    remaining: card.uses,
                }
            }
            _ => CardUpdate::Conflict,
        })
    }
}
