use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::note::Note;
use crate::{NoteSnapError, Result};

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// How many remote records seed the collection on load.
pub const SEED_LIMIT: usize = 12;

const DEMO_USER_ID: i64 = 1;

/// The remote side of the notes collection. The store only needs these three
/// calls; a failed attempt is final (no retries).
#[allow(async_fn_in_trait)]
pub trait NotesApi {
    async fn fetch_seed(&self) -> Result<Vec<Note>>;

    /// Returns the id the remote assigned. Callers ignore it; the local id
    /// stays authoritative.
    async fn create_remote(&self, title: &str, description: &str) -> Result<i64>;

    async fn update_remote(&self, id: &str, title: &str, description: &str) -> Result<i64>;
}

#[derive(Debug, Deserialize)]
pub struct RemotePost {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct PostPatch<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostId {
    id: i64,
}

/// Maps one external record to a [`Note`]. Seed notes are backdated by one
/// day per position so the list reads as chronological, newest first.
pub(crate) fn seed_note(post: RemotePost, position: usize, now: DateTime<Utc>) -> Note {
    Note {
        id: post.id.to_string(),
        title: post.title,
        description: post.body,
        created_at: now - Duration::days(position as i64),
        location: None,
        photo_uri: None,
        synced: Some(true),
    }
}

/// Typed HTTP client for the demo notes collection.
pub struct RemoteApi {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl NotesApi for RemoteApi {
    async fn fetch_seed(&self) -> Result<Vec<Note>> {
        let resp = self
            .client
            .get(format!("{}/posts", self.base_url))
            .send()
            .await
            .map_err(|e| NoteSnapError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NoteSnapError::Fetch(format!("HTTP {}", resp.status())));
        }

        let posts: Vec<RemotePost> = resp
            .json()
            .await
            .map_err(|e| NoteSnapError::Fetch(e.to_string()))?;

        let now = Utc::now();
        Ok(posts
            .into_iter()
            .take(SEED_LIMIT)
            .enumerate()
            .map(|(position, post)| seed_note(post, position, now))
            .collect())
    }

    async fn create_remote(&self, title: &str, description: &str) -> Result<i64> {
        let body = NewPost {
            title,
            body: description,
            user_id: DEMO_USER_ID,
        };
        let resp = self
            .client
            .post(format!("{}/posts", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| NoteSnapError::Create(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NoteSnapError::Create(format!("HTTP {}", resp.status())));
        }

        let created: PostId = resp
            .json()
            .await
            .map_err(|e| NoteSnapError::Create(e.to_string()))?;
        Ok(created.id)
    }

    async fn update_remote(&self, id: &str, title: &str, description: &str) -> Result<i64> {
        let body = PostPatch {
            title,
            body: description,
        };
        let resp = self
            .client
            .patch(format!("{}/posts/{}", self.base_url, id))
            .json(&body)
            .send()
            .await
            .map_err(|e| NoteSnapError::Update(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NoteSnapError::Update(format!("HTTP {}", resp.status())));
        }

        let updated: PostId = resp
            .json()
            .await
            .map_err(|e| NoteSnapError::Update(e.to_string()))?;
        Ok(updated.id)
    }
}
