mod common;

use common::StubApi;
use notesnap_lib::{LOAD_ERROR_MESSAGE, NoteDraft, NoteStore, StoreEvent};

#[tokio::test]
async fn initial_load_seeds_store_newest_first() {
    let store = NoteStore::with_initial_load(StubApi::seeded(3)).await;

    let state = store.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.last_error, None);
    assert_eq!(state.notes.len(), 3);

    // The first seed record carries the latest synthetic timestamp.
    let newest = state.notes[0].created_at;
    assert!(state.notes.iter().all(|n| n.created_at <= newest));
    assert!(state.notes.iter().all(|n| n.synced == Some(true)));
}

#[tokio::test]
async fn reload_failure_sets_error_but_keeps_store_usable() {
    let store = NoteStore::with_initial_load(StubApi::failing()).await;

    let state = store.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.last_error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    assert!(state.notes.is_empty());

    // The store still accepts reads and mutations after a failed load.
    assert_eq!(store.get_by_id("1"), None);
    assert!(store.search("anything").is_empty());
}

#[tokio::test]
async fn save_with_failing_remote_keeps_note_locally() {
    let store = NoteStore::with_initial_load(StubApi::failing()).await;

    let draft = NoteDraft::new("Groceries", "milk, bread, eggs");
    let note = store.save(draft, None).await;

    assert_eq!(note.synced, Some(false));
    let stored = store.get_by_id(&note.id).expect("note should be stored");
    assert_eq!(stored, note);
    assert!(stored.is_local_only());
}

#[tokio::test]
async fn save_with_reachable_remote_marks_note_synced() {
    let store = NoteStore::with_initial_load(StubApi::seeded(0)).await;

    let note = store.save(NoteDraft::new("Trip", "pack the bags"), None).await;

    assert_eq!(note.synced, Some(true));
    assert_eq!(store.snapshot().notes.len(), 1);
}

#[tokio::test]
async fn new_notes_are_prepended_to_the_seed() {
    let store = NoteStore::with_initial_load(StubApi::seeded(2)).await;

    let note = store.save(NoteDraft::new("Fresh", "just created"), None).await;

    let state = store.snapshot();
    assert_eq!(state.notes.len(), 3);
    assert_eq!(state.notes[0].id, note.id);
}

#[tokio::test]
async fn edit_preserves_id_creation_time_and_position() {
    let store = NoteStore::with_initial_load(StubApi::seeded(3)).await;
    let original = store.get_by_id("2").expect("seed note 2 exists");

    let draft = NoteDraft::new("Renamed", "new description here");
    let updated = store.save(draft, Some("2".to_string())).await;

    assert_eq!(updated.id, "2");
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.title, "Renamed");

    // Position is retained: still the second entry.
    let state = store.snapshot();
    assert_eq!(state.notes.len(), 3);
    assert_eq!(state.notes[1].id, "2");
    assert_eq!(state.notes[1].title, "Renamed");
}

#[tokio::test]
async fn save_trims_title_and_description() {
    let store = NoteStore::with_initial_load(StubApi::seeded(0)).await;

    let note = store
        .save(NoteDraft::new("  Spaced  ", "  padded body  "), None)
        .await;

    assert_eq!(note.title, "Spaced");
    assert_eq!(note.description, "padded body");
}

#[tokio::test]
async fn remove_drops_note_and_second_remove_is_a_noop() {
    let store = NoteStore::with_initial_load(StubApi::seeded(2)).await;

    store.remove("1").await;
    assert_eq!(store.get_by_id("1"), None);
    let after_first = store.snapshot();

    store.remove("1").await;
    assert_eq!(store.snapshot(), after_first);
}

#[tokio::test]
async fn get_by_id_returns_latest_upsert() {
    let store = NoteStore::with_initial_load(StubApi::seeded(1)).await;

    let first = store.save(NoteDraft::new("Version one", "first body"), None).await;
    let second = store
        .save(
            NoteDraft::new("Version two", "second body"),
            Some(first.id.clone()),
        )
        .await;

    let found = store.get_by_id(&first.id).expect("note exists");
    assert_eq!(found, second);
}

#[tokio::test]
async fn search_filters_title_and_description() {
    let store = NoteStore::with_initial_load(StubApi::seeded(0)).await;
    store.save(NoteDraft::new("Groceries", "milk and bread"), None).await;
    store.save(NoteDraft::new("Workout", "leg day plan"), None).await;

    assert_eq!(store.search("").len(), 2);
    assert_eq!(store.search("BREAD").len(), 1);
    assert!(store.search("dentist").is_empty());
}

#[tokio::test]
async fn events_report_loads_and_mutations() {
    let store = NoteStore::new(StubApi::seeded(2));
    let mut events = store.subscribe();

    store.reload().await;
    match events.recv().await.unwrap() {
        StoreEvent::NotesLoaded { notes } => assert_eq!(notes.len(), 2),
        other => panic!("expected NotesLoaded, got {other:?}"),
    }

    let note = store.save(NoteDraft::new("Evented", "watched save"), None).await;
    match events.recv().await.unwrap() {
        StoreEvent::NoteUpserted { note: upserted } => assert_eq!(upserted.id, note.id),
        other => panic!("expected NoteUpserted, got {other:?}"),
    }

    store.remove(&note.id).await;
    match events.recv().await.unwrap() {
        StoreEvent::NoteRemoved { id } => assert_eq!(id, note.id),
        other => panic!("expected NoteRemoved, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_load_emits_user_facing_message() {
    let store = NoteStore::new(StubApi::failing());
    let mut events = store.subscribe();

    store.reload().await;
    match events.recv().await.unwrap() {
        StoreEvent::LoadFailed { message } => assert_eq!(message, LOAD_ERROR_MESSAGE),
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}
