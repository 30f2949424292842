//! Terminal output: frame buffering and session setup.

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::{SessionConfig, TerminalSession};
