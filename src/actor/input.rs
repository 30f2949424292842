//! Input Actor: dedicated thread for polling terminal events.
//!
//! Runs crossterm's blocking event polling off the main thread and
//! forwards key, paste and resize events over a channel, so the main
//! loop can `select!` over input and reveal ticks together.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("spice-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                debug!("Input receiver dropped");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read terminal event");
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
///
/// Key releases, mouse and focus events are dropped.
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            Some(InputEvent::Key {
                code,
                modifiers: convert_modifiers(key_event.modifiers),
            })
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost => None,
    }
}

/// Convert crossterm `KeyCode` to our `KeyCode`.
fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

/// Convert crossterm `KeyModifiers` to our `KeyModifiers`.
fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    out.set(KeyModifiers::SUPER, mods.contains(event::KeyModifiers::SUPER));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn press(code: event::KeyCode, mods: event::KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: mods,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_convert_ctrl_tab() {
        let event = convert_event(press(event::KeyCode::Tab, event::KeyModifiers::CONTROL));
        assert_eq!(event, Some(InputEvent::key(KeyCode::Tab, KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_release_is_dropped() {
        let event = Event::Key(KeyEvent {
            code: event::KeyCode::Char('a'),
            modifiers: event::KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(event), None);
    }

    #[test]
    fn test_resize_and_paste() {
        assert_eq!(
            convert_event(Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );
        assert_eq!(
            convert_event(Event::Paste("x".into())),
            Some(InputEvent::Paste("x".into()))
        );
        assert_eq!(convert_event(Event::FocusLost), None);
    }

    #[test]
    fn test_unbound_keys_are_dropped() {
        let page = convert_event(press(event::KeyCode::PageDown, event::KeyModifiers::NONE));
        assert_eq!(page, None);
        let f5 = convert_event(press(event::KeyCode::F(5), event::KeyModifiers::NONE));
        assert_eq!(f5, Some(InputEvent::key(KeyCode::F(5), KeyModifiers::empty())));
    }
}
