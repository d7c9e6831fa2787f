use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A GPS fix attached to a note. Absent means no location was captured.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Fixed at first save, never updated on edit.
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<NoteLocation>,
    /// Reference to a locally readable image, if the user attached one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    /// `Some(false)` marks a note that exists only locally; `Some(true)` or
    /// `None` means the last save reached the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced: Option<bool>,
}

impl Note {
    pub fn is_local_only(&self) -> bool {
        self.synced == Some(false)
    }
}

/// What the edit form collects before a note exists.
#[derive(Clone, Debug, Default)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub location: Option<NoteLocation>,
    pub photo_uri: Option<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the title must be at least 3 characters")]
    TitleTooShort,
    #[error("the description must be at least 5 characters")]
    DescriptionTooShort,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Edit-boundary validation; the store itself accepts anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().chars().count() < 3 {
            return Err(ValidationError::TitleTooShort);
        }
        if self.description.trim().chars().count() < 5 {
            return Err(ValidationError::DescriptionTooShort);
        }
        Ok(())
    }
}

/// Mints an id for a note created locally. Seeded notes keep the id the
/// remote collection assigned them. The token is the millisecond epoch,
/// nudged forward when two notes land in the same millisecond so ids stay
/// unique within the process.
pub fn mint_note_id() -> String {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    let mut last = LAST.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST.compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => last = observed,
        }
    }
}
