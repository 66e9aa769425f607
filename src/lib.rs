//! Client-side, history-mode routing for the study viewer front-end.
//!
//! This crate is intended for use in front-end WebAssembly environments. It holds the
//! application's route table (an ordered sequence of path → view bindings) and a
//! [`Router`] that matches the current location against the table, mounts the matching
//! view, and keeps the browser history in sync via the History API.
//!
//! The route table is constructed once during application bootstrap and handed to the
//! router; it is never mutated afterwards. Pass the router explicitly into your root
//! component rather than stashing it in a global.
//!
//! ```ignore
//! use study_router::{Router, RouterOptions, routes::routes};
//!
//! let router = Router::new(routes(), RouterOptions::default())?;
//! router.push_named("Student")?;
//! ```

pub mod callback;
pub mod route;
pub mod router;
pub mod routes;
pub mod view;

pub use route::{RouteDescriptor, RouteTable, RouteTableError};
pub use router::{NavigationState, Router, RouterError, RouterOptions};
pub use view::View;
