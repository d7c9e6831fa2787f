//! Seams for the device capabilities the note form uses. The front end
//! supplies the platform-specific sources; the helpers here apply the
//! permission gate and the capture order, and a failure aborts only the
//! single capture without touching store state.

use std::fmt;

use crate::note::NoteLocation;
use crate::{NoteSnapError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Camera,
    Gallery,
    Location,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Gallery => "gallery",
            Self::Location => "location",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

pub trait LocationSource {
    fn permission(&self) -> PermissionStatus;

    /// A cached fix, if the platform has one. Tried before a fresh reading
    /// because a fresh reading can be slow or unavailable on some devices.
    fn last_known(&self) -> Option<NoteLocation>;

    fn current(&self) -> Result<NoteLocation>;
}

pub trait PhotoSource {
    fn capability(&self) -> Capability;

    fn permission(&self) -> PermissionStatus;

    /// A URI to a locally readable image.
    fn acquire(&self) -> Result<String>;
}

/// Permission gate, then the cached fix, then a fresh reading.
pub fn capture_location<S: LocationSource>(source: &S) -> Result<NoteLocation> {
    if source.permission() == PermissionStatus::Denied {
        return Err(NoteSnapError::PermissionDenied(Capability::Location));
    }
    if let Some(fix) = source.last_known() {
        return Ok(fix);
    }
    source.current()
}

/// Permission gate, then the capture itself.
pub fn attach_photo<S: PhotoSource>(source: &S) -> Result<String> {
    if source.permission() == PermissionStatus::Denied {
        return Err(NoteSnapError::PermissionDenied(source.capability()));
    }
    source.acquire()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeGps {
        permission: PermissionStatus,
        last_known: Option<NoteLocation>,
        current_called: Cell<bool>,
    }

    impl FakeGps {
        fn new(permission: PermissionStatus, last_known: Option<NoteLocation>) -> Self {
            Self {
                permission,
                last_known,
                current_called: Cell::new(false),
            }
        }
    }

    impl LocationSource for FakeGps {
        fn permission(&self) -> PermissionStatus {
            self.permission
        }

        fn last_known(&self) -> Option<NoteLocation> {
            self.last_known
        }

        fn current(&self) -> Result<NoteLocation> {
            self.current_called.set(true);
            Err(NoteSnapError::Capture {
                capability: Capability::Location,
                message: "no fix".to_string(),
            })
        }
    }

    #[test]
    fn test_denied_permission_aborts_before_capture() {
        let gps = FakeGps::new(PermissionStatus::Denied, None);
        let result = capture_location(&gps);
        assert!(matches!(
            result,
            Err(NoteSnapError::PermissionDenied(Capability::Location))
        ));
        assert!(!gps.current_called.get());
    }

    #[test]
    fn test_last_known_fix_wins_over_fresh_reading() {
        let fix = NoteLocation {
            latitude: 52.22977,
            longitude: 21.01178,
        };
        let gps = FakeGps::new(PermissionStatus::Granted, Some(fix));
        assert_eq!(capture_location(&gps).unwrap(), fix);
        assert!(!gps.current_called.get());
    }

    #[test]
    fn test_failed_reading_surfaces_as_capture_error() {
        let gps = FakeGps::new(PermissionStatus::Granted, None);
        let result = capture_location(&gps);
        assert!(matches!(result, Err(NoteSnapError::Capture { .. })));
        assert!(gps.current_called.get());
    }
}
