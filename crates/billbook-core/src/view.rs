//! Surface seam between the form controller and whatever draws it.

use crate::form::FormPresentation;
use crate::render::{ListRegion, SearchRegion};

/// Drawing and prompting operations the controller needs from a surface.
///
/// Every method is synchronous; the controller only calls them between
/// requests.
pub trait View {
    /// Replace the list region.
    fn render_list(&mut self, region: &ListRegion);

    /// Replace the search result region.
    fn render_search(&mut self, region: &SearchRegion);

    /// Redraw the form after a value or mode change.
    fn render_form(&mut self, form: &FormPresentation);

    /// Bring the form into view after entering edit mode.
    fn focus_form(&mut self) {}

    /// Inline, non-blocking error display.
    fn show_error(&mut self, message: &str);

    /// Inline notice for input that was rejected before any request.
    fn warn(&mut self, message: &str);

    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;
}
