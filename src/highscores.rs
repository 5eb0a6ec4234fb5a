//! High score leaderboard system
//!
//! Persisted to SessionStorage (cleared when the tab closes), tracks the top 5
//! scores and renders them as a plain-text listing for export.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Filename offered for the exported listing
pub const EXPORT_FILENAME: &str = "Space_Escape_Leaderboard.txt";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Pilot name as typed
    pub name: String,
    /// Final score of the run
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
///
/// Serialized as a bare JSON array of `{name, score}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// SessionStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spaceEscapeLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a finished run.
    ///
    /// The entry goes after every existing entry with an equal or higher
    /// score, then the board is trimmed. Returns the rank achieved
    /// (1-indexed) or None if the entry fell off the end.
    pub fn add(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Restore sort order and size after deserializing untrusted data
    fn normalize(&mut self) {
        // Stable, so equal scores keep their stored order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Parse a stored leaderboard. Malformed data yields an empty board.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Leaderboard>(json) {
            Ok(mut board) => {
                board.normalize();
                board
            }
            Err(e) => {
                log::warn!("Ignoring malformed leaderboard data: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // A Vec of plain structs always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    /// Plain-text listing for download, or None when there is nothing to export
    pub fn export_text(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let mut content = String::from("--- SPACE ESCAPE: SESSION LEADERBOARD ---\n\n");
        for (i, entry) in self.entries.iter().enumerate() {
            content.push_str(&format!(
                "{}. {} - {} pt\n",
                i + 1,
                entry.name.to_uppercase(),
                entry.score
            ));
        }
        Some(content)
    }

    /// Load high scores from SessionStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::session_get(Self::STORAGE_KEY) {
            let scores = Self::from_json(&json);
            log::info!("Loaded {} high scores", scores.len());
            return scores;
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to SessionStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if crate::platform::session_set(Self::STORAGE_KEY, &self.to_json()) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
