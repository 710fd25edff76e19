//! Input snapshots
//!
//! The sequencer never polls a window system. Each frame the host samples
//! its input backend into an [`InputSnapshot`] and passes it into the scene
//! update, which keeps command sequencing deterministic and testable.

/// Boolean input state for one frame
///
/// `advance_held` is the plain advance chord (space / left mouse);
/// `skip_held` is the skip modifier (ctrl / right mouse). Plain advance is
/// edge-latched by the sequencer so holding the key does not repeat-fire;
/// the skip modifier acts every frame it is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Space or left mouse button is down
    pub advance_held: bool,
    /// Ctrl or right mouse button is down
    pub skip_held: bool,
}

impl InputSnapshot {
    /// Snapshot with no buttons down
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot with the advance chord held
    pub fn advance() -> Self {
        Self {
            advance_held: true,
            skip_held: false,
        }
    }

    /// Snapshot with the skip modifier held
    pub fn skip() -> Self {
        Self {
            advance_held: false,
            skip_held: true,
        }
    }
}
