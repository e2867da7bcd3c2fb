//! Interface to the render backend.

use markup::{Extent, MouseButton};

use crate::action::ActionId;
use crate::context::Context;

/// A render backend driven by [`Dispatch`](crate::Dispatch).
///
/// Every call receives the context in effect at that point of the markup.
/// Backend failures are the backend's own concern, so nothing here returns
/// an error.
pub trait Renderer {
    /// Draw a run of literal text.
    fn render_text(&mut self, ctx: &Context<'_>, text: &str);

    /// Move the cursor horizontally without drawing text.
    fn render_offset(&mut self, ctx: &Context<'_>, offset: Extent);

    /// A clickable region starts at the current cursor position.
    fn action_open(&mut self, ctx: &Context<'_>, button: MouseButton, id: ActionId);

    /// The region `id` ends at the current cursor position.
    fn action_close(&mut self, ctx: &Context<'_>, id: ActionId);
}
