use crate::note::Note;

/// Case-insensitive substring match against title and description together.
/// An empty or whitespace-only query matches everything.
pub fn matches(note: &Note, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let haystack = format!("{} {}", note.title, note.description).to_lowercase();
    haystack.contains(&needle)
}

/// Filters a collection without reordering it.
pub fn filter(notes: &[Note], query: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| matches(note, query))
        .cloned()
        .collect()
}
