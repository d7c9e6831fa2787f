use chrono::{Duration, Utc};
use notesnap_lib::{Note, NoteSnapError, NotesApi, Result};

/// In-memory stand-in for the remote API. `failing()` mimics a device with
/// no network: every call errors on the first (and only) attempt.
pub struct StubApi {
    pub seed: Vec<Note>,
    pub fail: bool,
}

impl StubApi {
    pub fn seeded(count: usize) -> Self {
        let now = Utc::now();
        let seed = (0..count)
            .map(|position| Note {
                id: (position + 1).to_string(),
                title: format!("Seed note {}", position + 1),
                description: format!("Body of seed note {}", position + 1),
                created_at: now - Duration::days(position as i64),
                location: None,
                photo_uri: None,
                synced: Some(true),
            })
            .collect();
        Self { seed, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            seed: Vec::new(),
            fail: true,
        }
    }
}

impl NotesApi for StubApi {
    async fn fetch_seed(&self) -> Result<Vec<Note>> {
        if self.fail {
            return Err(NoteSnapError::Fetch("stub is offline".to_string()));
        }
        Ok(self.seed.clone())
    }

    async fn create_remote(&self, _title: &str, _description: &str) -> Result<i64> {
        if self.fail {
            return Err(NoteSnapError::Create("stub is offline".to_string()));
        }
        Ok(101)
    }

    async fn update_remote(&self, id: &str, _title: &str, _description: &str) -> Result<i64> {
        if self.fail {
            return Err(NoteSnapError::Update("stub is offline".to_string()));
        }
        Ok(id.parse().unwrap_or(0))
    }
}
