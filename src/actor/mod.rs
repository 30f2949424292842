//! Actor Model: message-passing concurrency for the terminal front end.
//!
//! - **Input Actor**: polls terminal events on its own thread
//! - **Reveal Pacer**: one-shot deadlines for paced playback
//! - **Main Loop**: owns the editor, waits on both with `select!`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ──────────────────▶ │              │
//! └──────────────┘                     │  Main Loop   │
//!                                      │ (MagicEditor)│
//! ┌──────────────┐      Instant        │              │
//! │ RevealPacer  │ ──────────────────▶ │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;
mod pacer;

pub use input::{convert_event, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers};
pub use pacer::RevealPacer;
