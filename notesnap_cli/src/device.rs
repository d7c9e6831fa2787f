//! Capability sources for a terminal: GPS coordinates come from an
//! environment variable, photos are attached from image files on disk.

use std::path::PathBuf;

use notesnap_lib::device::{Capability, LocationSource, PermissionStatus, PhotoSource};
use notesnap_lib::{NoteLocation, NoteSnapError, Result};

/// Holds a "latitude,longitude" pair. Unset means the user has not granted
/// the CLI a location source.
pub const GPS_ENV: &str = "NOTESNAP_GPS";

pub struct EnvGps {
    raw: Option<String>,
}

impl EnvGps {
    pub fn from_env() -> Self {
        Self {
            raw: std::env::var(GPS_ENV).ok(),
        }
    }
}

impl LocationSource for EnvGps {
    fn permission(&self) -> PermissionStatus {
        if self.raw.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn last_known(&self) -> Option<NoteLocation> {
        None
    }

    fn current(&self) -> Result<NoteLocation> {
        let raw = self.raw.as_deref().unwrap_or_default();
        parse_coordinates(raw).ok_or_else(|| NoteSnapError::Capture {
            capability: Capability::Location,
            message: format!("{GPS_ENV} must look like \"52.22977,21.01178\", got \"{raw}\""),
        })
    }
}

fn parse_coordinates(raw: &str) -> Option<NoteLocation> {
    let (latitude, longitude) = raw.split_once(',')?;
    Some(NoteLocation {
        latitude: latitude.trim().parse().ok()?,
        longitude: longitude.trim().parse().ok()?,
    })
}

/// Stands in for the gallery picker: attaches an existing image file.
pub struct FilePhoto {
    path: PathBuf,
}

impl FilePhoto {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhotoSource for FilePhoto {
    fn capability(&self) -> Capability {
        Capability::Gallery
    }

    fn permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn acquire(&self) -> Result<String> {
        if self.path.is_file() {
            Ok(format!("file://{}", self.path.display()))
        } else {
            Err(NoteSnapError::Capture {
                capability: Capability::Gallery,
                message: format!("no readable image at {}", self.path.display()),
            })
        }
    }
}
