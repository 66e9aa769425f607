//! The seam between the route table and the application's view layer.

/// A page-level renderable unit bound to a route.
///
/// Views are owned by the application's view layer; the route table only carries a
/// reference to them, and the [`Router`](crate::Router) mounts them by writing their
/// markup into the outlet element when the location matches.
pub trait View {
    /// Produces the markup for this page.
    fn render(&self) -> String;
}
