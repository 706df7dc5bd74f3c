//! Quest tracking.

use serde::{Deserialize, Serialize};

/// Whether a quest is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    /// Still being pursued.
    #[default]
    Active,
    /// Finished.
    Completed,
}

/// A quest the character has taken on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Quest title.
    pub title: String,
    /// Current status.
    #[serde(default)]
    pub status: QuestStatus,
}

/// Ordered list of quests. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestLog {
    quests: Vec<Quest>,
}

impl QuestLog {
    /// Create an empty quest log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new active quest.
    pub fn add(&mut self, title: impl Into<String>) {
        self.quests.push(Quest {
            title: title.into(),
            status: QuestStatus::Active,
        });
    }

    /// Complete an active quest by title, case-insensitively. Returns true if found.
    pub fn complete(&mut self, title: &str) -> bool {
        let wanted = title.to_lowercase();
        for quest in &mut self.quests {
            if quest.status == QuestStatus::Active && quest.title.to_lowercase() == wanted {
                quest.status = QuestStatus::Completed;
                return true;
            }
        }
        false
    }

    /// Complete the n-th active quest (0-based). Returns the title if found.
    pub fn complete_active(&mut self, index: usize) -> Option<String> {
        let quest = self
            .quests
            .iter_mut()
            .filter(|q| q.status == QuestStatus::Active)
            .nth(index)?;
        quest.status = QuestStatus::Completed;
        Some(quest.title.clone())
    }

    /// All active quests.
    pub fn active(&self) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.status == QuestStatus::Active)
            .collect()
    }

    /// All quests, active and completed.
    pub fn all(&self) -> &[Quest] {
        &self.quests
    }

    /// Number of active quests.
    pub fn active_count(&self) -> usize {
        self.active().len()
    }
}
