//! Widget trait shared by the editor view and the status bar.

use crate::actor::InputEvent;
use crate::layout::Rect;
use crate::terminal::OutputBuffer;

/// A UI component that can be rendered into a frame and handle input.
pub trait Widget {
    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Set the bounds of this widget.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Render this widget into the frame.
    ///
    /// The widget should only draw within its bounds.
    fn render(&self, out: &mut OutputBuffer);

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by this widget,
    /// `false` if it should propagate to other widgets.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Check if this widget needs to be redrawn.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
