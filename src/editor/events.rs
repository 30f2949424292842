//! Events the editor reports to its host.

use std::time::Duration;

/// Notifications emitted by [`super::MagicEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Playback progress for status displays.
    Progress {
        /// Upcoming text the lecturer is about to "type".
        next_line: String,
        /// Characters still hidden.
        remaining: usize,
        /// How long the host should keep the message visible.
        timeout: Duration,
    },

    /// The user asked to run the code (Ctrl/Cmd+Return).
    ExecuteRequested,
}
