mod device;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use notesnap_lib::device::{attach_photo, capture_location};
use notesnap_lib::{DEFAULT_API_URL, Note, NoteDraft, NoteStore, RemoteApi, ValidationError};
use thiserror::Error;

use crate::device::{EnvGps, FilePhoto, GPS_ENV};

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("No note with id {0}")]
    NotFound(String),
}

type Result<T> = std::result::Result<T, CliError>;

#[derive(Parser)]
#[command(name = "notesnap")]
#[command(about = "Notes with GPS and photo capture, mirrored to a demo API", long_about = None)]
struct Cli {
    /// Print resolved configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Override the API base URL (default: https://jsonplaceholder.typicode.com)
    #[arg(short, long)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List {
        /// Case-insensitive search over title and description
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one note in full
    Show { id: String },

    /// Create a new note
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        /// Attach an image file
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Capture GPS coordinates from the configured source
        #[arg(long)]
        gps: bool,
    },

    /// Edit an existing note
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Replace the attached image
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Refresh the GPS coordinates from the configured source
        #[arg(long)]
        gps: bool,
    },

    /// Delete a note (local only; the demo API keeps its copy)
    Delete { id: String },
}

fn get_api_url(cli_override: Option<String>) -> String {
    cli_override
        .or_else(|| std::env::var("NOTESNAP_API").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Collects the draft for a save, capturing GPS and photo on request. A
/// capability failure drops only that attachment and tells the user; the
/// save itself proceeds.
fn build_draft(
    title: String,
    description: String,
    existing: Option<&Note>,
    photo: Option<PathBuf>,
    gps: bool,
) -> NoteDraft {
    let mut location = existing.and_then(|n| n.location);
    let mut photo_uri = existing.and_then(|n| n.photo_uri.clone());

    if gps {
        match capture_location(&EnvGps::from_env()) {
            Ok(fix) => location = Some(fix),
            Err(err) => eprintln!("Warning: {err}. Saving without a location."),
        }
    }

    if let Some(path) = photo {
        match attach_photo(&FilePhoto::new(path)) {
            Ok(uri) => photo_uri = Some(uri),
            Err(err) => eprintln!("Warning: {err}. Saving without a photo."),
        }
    }

    NoteDraft {
        title,
        description,
        location,
        photo_uri,
    }
}

fn print_summary(note: &Note) {
    let marker = if note.is_local_only() { "  [OFFLINE]" } else { "" };
    println!("\n[{}] {}{}", note.created_at.format("%Y-%m-%d %H:%M"), note.title, marker);
    println!("  id: {}", note.id);
}

fn print_detail(note: &Note) {
    println!("\n{}", note.title);
    println!("{}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("\n{}", note.description);
    match note.location {
        Some(fix) => println!("\nGPS: {:.5}, {:.5}", fix.latitude, fix.longitude),
        None => println!("\nGPS: none recorded"),
    }
    match &note.photo_uri {
        Some(uri) => println!("Photo: {uri}"),
        None => println!("Photo: none"),
    }
    if note.is_local_only() {
        println!("Status: OFFLINE (not yet synced to the API)");
    }
}

fn report_saved(note: &Note) {
    if note.is_local_only() {
        println!("Saved locally. The API could not be reached; the note is marked OFFLINE.");
    } else {
        println!("Saved and synced to the API.");
    }
    print_detail(note);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_url = get_api_url(cli.api.clone());

    if cli.print_config {
        println!("Config:");
        println!("  API: {api_url}");
        match std::env::var(GPS_ENV) {
            Ok(coords) => println!("  GPS source: {coords}"),
            Err(_) => println!("  GPS source: <none>"),
        }
        return Ok(());
    }

    // One store per invocation; state is rebuilt from the API on each run.
    let store = NoteStore::with_initial_load(RemoteApi::new(&api_url)).await;
    if let Some(message) = store.last_error() {
        eprintln!("Warning: {message}");
        eprintln!("Continuing with an empty list.");
    }

    match cli.command {
        Commands::List { query } => {
            let notes = store.search(query.as_deref().unwrap_or(""));
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                for note in &notes {
                    print_summary(note);
                }
                println!("\nTotal: {} note(s)", notes.len());
            }
        }

        Commands::Show { id } => {
            let note = store.get_by_id(&id).ok_or(CliError::NotFound(id))?;
            print_detail(&note);
        }

        Commands::Add {
            title,
            description,
            photo,
            gps,
        } => {
            let draft = build_draft(title, description, None, photo, gps);
            draft.validate()?;
            let note = store.save(draft, None).await;
            report_saved(&note);
        }

        Commands::Edit {
            id,
            title,
            description,
            photo,
            gps,
        } => {
            let existing = store
                .get_by_id(&id)
                .ok_or_else(|| CliError::NotFound(id.clone()))?;
            let draft = build_draft(
                title.unwrap_or_else(|| existing.title.clone()),
                description.unwrap_or_else(|| existing.description.clone()),
                Some(&existing),
                photo,
                gps,
            );
            draft.validate()?;
            let note = store.save(draft, Some(id)).await;
            report_saved(&note);
        }

        Commands::Delete { id } => {
            if store.get_by_id(&id).is_none() {
                return Err(CliError::NotFound(id));
            }
            store.remove(&id).await;
            println!("Deleted note {id}.");
        }
    }

    Ok(())
}
