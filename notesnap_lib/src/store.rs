use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, broadcast};

use crate::api::NotesApi;
use crate::note::{Note, NoteDraft, mint_note_id};
use crate::query;

/// Shown to the user when the seed fetch fails. The list stays usable.
pub const LOAD_ERROR_MESSAGE: &str = "Could not fetch notes from the API. Check your connection.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreState {
    /// Display order: newest-first for seeded notes, with locally created
    /// notes prepended and edited notes kept in place.
    pub notes: Vec<Note>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl StoreState {
    pub fn initial() -> Self {
        Self {
            notes: Vec::new(),
            is_loading: true,
            last_error: None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Action {
    LoadStart,
    LoadSuccess(Vec<Note>),
    LoadError(String),
    Upsert(Note),
    Remove(String),
}

/// The pure transition function; all side effects live in [`NoteStore`].
pub fn reduce(mut state: StoreState, action: Action) -> StoreState {
    match action {
        Action::LoadStart => {
            state.is_loading = true;
            state.last_error = None;
        }
        Action::LoadSuccess(notes) => {
            state.is_loading = false;
            state.notes = notes;
            state.last_error = None;
        }
        Action::LoadError(message) => {
            state.is_loading = false;
            state.last_error = Some(message);
        }
        Action::Upsert(note) => {
            match state.notes.iter().position(|n| n.id == note.id) {
                Some(index) => state.notes[index] = note,
                None => state.notes.insert(0, note),
            }
        }
        Action::Remove(id) => state.notes.retain(|n| n.id != id),
    }
    state
}

/// Change feed a screen layer can subscribe to.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    NotesLoaded { notes: Vec<Note> },
    NoteUpserted { note: Note },
    NoteRemoved { id: String },
    LoadFailed { message: String },
}

/// The process-wide note container: one instance, shared by reference with
/// whichever screens need it. State is memory-only and rebuilt from the
/// remote read on every launch.
pub struct NoteStore<A: NotesApi> {
    api: A,
    state: Arc<RwLock<StoreState>>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl<A: NotesApi> NoteStore<A> {
    pub fn new(api: A) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            api,
            state: Arc::new(RwLock::new(StoreState::initial())),
            event_tx,
        }
    }

    /// Builds the store and runs the initial load, as the app does on launch.
    pub async fn with_initial_load(api: A) -> Self {
        let store = Self::new(api);
        store.reload().await;
        store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    async fn dispatch(&self, action: Action) {
        let mut guard = self.state.write().await;
        let prev = std::mem::take(&mut *guard);
        *guard = reduce(prev, action);
    }

    /// Replaces local state with the remote seed. A failure surfaces through
    /// `last_error` and a `LoadFailed` event, never as a panic. Overlapping
    /// reloads are not fenced against each other; the last dispatch wins.
    pub async fn reload(&self) {
        self.dispatch(Action::LoadStart).await;
        match self.api.fetch_seed().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "seed fetch succeeded");
                self.dispatch(Action::LoadSuccess(notes.clone())).await;
                let _ = self.event_tx.send(StoreEvent::NotesLoaded { notes });
            }
            Err(err) => {
                tracing::warn!(error = %err, "seed fetch failed");
                self.dispatch(Action::LoadError(LOAD_ERROR_MESSAGE.to_string()))
                    .await;
                let _ = self.event_tx.send(StoreEvent::LoadFailed {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                });
            }
        }
    }

    /// Saves a draft locally and mirrors it to the API. Edit mode reuses the
    /// existing id and creation time; add mode mints a fresh id. A failed
    /// remote call downgrades the note to `synced = Some(false)` instead of
    /// failing the save — local durability never depends on the network.
    pub async fn save(&self, draft: NoteDraft, existing_id: Option<String>) -> Note {
        let title = draft.title.trim().to_string();
        let description = draft.description.trim().to_string();

        let editing = existing_id.is_some();
        let (id, created_at) = match existing_id {
            Some(id) => {
                let created_at = self
                    .get_by_id(&id)
                    .map(|note| note.created_at)
                    .unwrap_or_else(Utc::now);
                (id, created_at)
            }
            None => (mint_note_id(), Utc::now()),
        };

        let remote = if editing {
            self.api.update_remote(&id, &title, &description).await.map(|_| ())
        } else {
            self.api.create_remote(&title, &description).await.map(|_| ())
        };
        let synced = match remote {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, id, "remote save failed; keeping note local-only");
                false
            }
        };

        let note = Note {
            id,
            title,
            description,
            created_at,
            location: draft.location,
            photo_uri: draft.photo_uri,
            synced: Some(synced),
        };
        self.upsert(note.clone()).await;
        note
    }

    pub async fn upsert(&self, note: Note) {
        self.dispatch(Action::Upsert(note.clone())).await;
        let _ = self.event_tx.send(StoreEvent::NoteUpserted { note });
    }

    /// No-op when the id is absent; the event fires only for a real removal.
    pub async fn remove(&self, id: &str) {
        let mut guard = self.state.write().await;
        let existed = guard.notes.iter().any(|n| n.id == id);
        let prev = std::mem::take(&mut *guard);
        *guard = reduce(prev, Action::Remove(id.to_string()));
        drop(guard);

        if existed {
            let _ = self.event_tx.send(StoreEvent::NoteRemoved { id: id.to_string() });
        }
    }

    // Fast synchronous queries; non-blocking so they are safe to call from
    // an async context while a reload is pending.
    pub fn snapshot(&self) -> StoreState {
        self.state
            .try_read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Note> {
        self.state
            .try_read()
            .ok()?
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn search(&self, query_text: &str) -> Vec<Note> {
        match self.state.try_read() {
            Ok(guard) => query::filter(&guard.notes, query_text),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state
            .try_read()
            .map(|guard| guard.is_loading)
            .unwrap_or(false)
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.try_read().ok()?.last_error.clone()
    }
}
