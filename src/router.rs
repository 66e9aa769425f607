//! History-mode navigation controller.
//!
//! The [`Router`] owns a [`RouteTable`], resolves the current location against it,
//! mounts the matching view into an outlet element, and keeps the browser history in
//! sync. Back/forward navigation is picked up through a `popstate` listener that is
//! removed when the last clone of the router is dropped.

use crate::{
    callback::{OnNavigate, OnNotFound},
    route::{RouteDescriptor, RouteTable},
};
use gloo_events::EventListener;
use gloo_utils::{document, window};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt, mem, rc::Rc};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::{debug, warn};
use web_sys::{
    Element, Event, History,
    wasm_bindgen::{JsCast, JsValue},
};

/// Element id the router mounts views into when none is configured.
pub const DEFAULT_OUTLET_ID: &str = "app";

/// The error type for the router.
#[derive(Error, Debug)]
pub enum RouterError {
    /// The route table failed validation.
    #[error("route table error: {0}")]
    Table(#[from] crate::route::RouteTableError),
    /// Programmatic navigation referenced a name that is not in the table.
    #[error("no route named `{0}` in the table")]
    UnknownRoute(String),
    /// The outlet element does not exist in the document.
    #[error("outlet element `#{0}` not found in the document")]
    MissingOutlet(String),
    /// A History or Location API call failed.
    #[error("history API error: {0}")]
    History(String),
}

impl From<JsValue> for RouterError {
    fn from(err: JsValue) -> Self {
        RouterError::History(format!("{err:?}"))
    }
}

/// The state payload the router stores with each history entry, and the shape of the
/// currently active route reported by [`Router::current`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Symbolic name of the active route.
    pub name: String,
    /// Path of the active route.
    pub path: String,
}

struct RouterInner {
    table: RouteTable,
    outlet: Element,
    current: RefCell<Option<NavigationState>>,
    on_navigate: Option<OnNavigate>,
    on_not_found: Option<OnNotFound>,
    // Set once after construction; dropped with the last router clone, which removes
    // the popstate listener from the window.
    popstate: RefCell<Option<EventListener>>,
}

impl fmt::Debug for RouterInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterInner")
            .field("table", &self.table)
            .field("current", &self.current.borrow())
            .field("on_navigate", &self.on_navigate.is_some())
            .field("on_not_found", &self.on_not_found.is_some())
            .finish()
    }
}

/// The navigation controller for the application.
///
/// Constructed once during bootstrap with the route table and passed explicitly into
/// the root component. Clones share the same state.
#[derive(Clone, Debug)]
pub struct Router(Rc<RouterInner>);

impl Router {
    /// Creates a router over the given table, performs the initial navigation for the
    /// current location, and starts listening for `popstate` events.
    ///
    /// Fails if the outlet element is missing or the History API is unavailable. An
    /// unmatched initial location is not an error; it is reported through the
    /// `on_not_found` callback and the outlet is left untouched.
    pub fn new(table: RouteTable, options: RouterOptions) -> Result<Self, RouterError> {
        let RouterOptions {
            outlet,
            on_navigate,
            on_not_found,
        } = options;

        let outlet_id = outlet.unwrap_or_else(|| DEFAULT_OUTLET_ID.to_string());
        let outlet = document()
            .get_element_by_id(&outlet_id)
            .ok_or(RouterError::MissingOutlet(outlet_id))?;

        let router = Router(Rc::new(RouterInner {
            table,
            outlet,
            current: RefCell::new(None),
            on_navigate,
            on_not_found,
            popstate: RefCell::new(None),
        }));

        // Initial navigation: resolve whatever location the document was loaded at.
        let path = window().location().pathname()?;
        router.replace(&path)?;

        // The listener captures a weak reference so the listener itself does not keep
        // the router alive.
        let weak = Rc::downgrade(&router.0);
        let listener = EventListener::new(&window(), "popstate", move |event| {
            if let Some(inner) = weak.upgrade() {
                Router(inner).handle_popstate(event);
            }
        });
        router.0.popstate.borrow_mut().replace(listener);

        Ok(router)
    }

    /// Navigates to `path`, pushing a new history entry.
    ///
    /// An unmatched path is reported through `on_not_found` and pushes nothing.
    pub fn push(&self, path: &str) -> Result<(), RouterError> {
        self.navigate(path, false)
    }

    /// Navigates to `path`, replacing the current history entry.
    pub fn replace(&self, path: &str) -> Result<(), RouterError> {
        self.navigate(path, true)
    }

    /// Navigates to the route named `name`, pushing a new history entry.
    ///
    /// This is the programmatic form: call sites name the route instead of
    /// hard-coding its path.
    pub fn push_named(&self, name: &str) -> Result<(), RouterError> {
        let path = self.path_of(name)?;
        self.push(&path)
    }

    /// Navigates to the route named `name`, replacing the current history entry.
    pub fn replace_named(&self, name: &str) -> Result<(), RouterError> {
        let path = self.path_of(name)?;
        self.replace(&path)
    }

    /// The currently active route, if the last resolved location matched the table.
    pub fn current(&self) -> Option<NavigationState> {
        self.0.current.borrow().clone()
    }

    /// The table this router resolves against.
    pub fn table(&self) -> &RouteTable {
        &self.0.table
    }

    fn path_of(&self, name: &str) -> Result<String, RouterError> {
        self.0
            .table
            .get(name)
            .map(|entry| entry.path.clone())
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))
    }

    fn navigate(&self, path: &str, replace: bool) -> Result<(), RouterError> {
        let Some(descriptor) = self.0.table.resolve(path) else {
            self.not_found(path);
            return Ok(());
        };

        let state = NavigationState {
            name: descriptor.name.clone(),
            path: path.to_string(),
        };
        let js_state = serde_wasm_bindgen::to_value(&state)
            .map_err(|err| RouterError::History(err.to_string()))?;

        let history = self.history()?;
        if replace {
            history.replace_state_with_url(&js_state, "", Some(path))?;
        } else {
            history.push_state_with_url(&js_state, "", Some(path))?;
        }

        self.mount(descriptor, state);
        Ok(())
    }

    /// Back/forward navigation. Prefers the state payload stored with the history
    /// entry; entries created outside this router carry no payload, so fall back to
    /// the location itself.
    fn handle_popstate(&self, event: &Event) {
        let state = event
            .dyn_ref::<web_sys::PopStateEvent>()
            .map(|event| event.state())
            .and_then(|state| serde_wasm_bindgen::from_value::<NavigationState>(state).ok());

        let path = match state {
            Some(state) => state.path,
            None => match window().location().pathname() {
                Ok(path) => path,
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    warn!("popstate: could not read location: {_err:?}");
                    return;
                }
            },
        };

        match self.0.table.resolve(&path) {
            Some(descriptor) => {
                let state = NavigationState {
                    name: descriptor.name.clone(),
                    path,
                };
                self.mount(descriptor, state);
            }
            None => self.not_found(&path),
        }
    }

    fn mount(&self, descriptor: &RouteDescriptor, state: NavigationState) {
        #[cfg(feature = "tracing")]
        debug!("navigating to {} ({})", state.path, state.name);

        self.0.outlet.set_inner_html(&descriptor.view.render());
        self.0.current.borrow_mut().replace(state);

        if let Some(on_navigate) = &self.0.on_navigate {
            (on_navigate.0.borrow_mut())(descriptor.clone());
        }
    }

    fn not_found(&self, path: &str) {
        #[cfg(feature = "tracing")]
        warn!("no route matches {path}");

        if let Some(on_not_found) = &self.0.on_not_found {
            (on_not_found.0.borrow_mut())(path.to_string());
        }
    }

    fn history(&self) -> Result<History, RouterError> {
        window().history().map_err(Into::into)
    }
}

/// Options for [`Router::new`].
#[derive(Default, Clone)]
pub struct RouterOptions {
    /// Id of the element views are mounted into. Defaults to [`DEFAULT_OUTLET_ID`].
    pub outlet: Option<String>,
    /// Callback executed after each successful navigation.
    pub on_navigate: Option<OnNavigate>,
    /// Callback executed when a location matches no table entry.
    pub on_not_found: Option<OnNotFound>,
}

impl fmt::Debug for RouterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterOptions")
            .field("outlet", &self.outlet)
            .field("on_navigate", &self.on_navigate.is_some())
            .field("on_not_found", &self.on_not_found.is_some())
            .finish()
    }
}

impl RouterOptions {
    /// Returns a new `RouterOptionsBuilder` to construct a `RouterOptions` struct.
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }
}

/// Builder for the [`RouterOptions`].
#[derive(Default)]
pub struct RouterOptionsBuilder {
    outlet: Option<String>,
    on_navigate: Option<OnNavigate>,
    on_not_found: Option<OnNotFound>,
}

impl RouterOptionsBuilder {
    /// Id of the element views are mounted into.
    pub fn outlet(&mut self, outlet: impl Into<String>) -> &mut Self {
        self.outlet = Some(outlet.into());
        self
    }

    /// Callback executed after each successful navigation.
    pub fn on_navigate(&mut self, on_navigate: impl Into<OnNavigate>) -> &mut Self {
        self.on_navigate = Some(on_navigate.into());
        self
    }

    /// Callback executed when a location matches no table entry.
    pub fn on_not_found(&mut self, on_not_found: impl Into<OnNotFound>) -> &mut Self {
        self.on_not_found = Some(on_not_found.into());
        self
    }

    /// Builds the [`RouterOptions`] struct.
    pub fn build(&mut self) -> RouterOptions {
        RouterOptions {
            outlet: mem::take(&mut self.outlet),
            on_navigate: mem::take(&mut self.on_navigate),
            on_not_found: mem::take(&mut self.on_not_found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_tokens};

    #[test]
    fn navigation_state_round_trips_as_camel_case() {
        let state = NavigationState {
            name: "StudyList".to_string(),
            path: "/".to_string(),
        };

        assert_tokens(
            &state,
            &[
                Token::Struct {
                    name: "NavigationState",
                    len: 2,
                },
                Token::Str("name"),
                Token::Str("StudyList"),
                Token::Str("path"),
                Token::Str("/"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn options_builder_defaults_to_no_callbacks() {
        let options = RouterOptions::builder().outlet("root").build();
        assert_eq!(options.outlet.as_deref(), Some("root"));
        assert!(options.on_navigate.is_none());
        assert!(options.on_not_found.is_none());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::routes::routes;
    use std::{cell::RefCell, rc::Rc};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn install_outlet(id: &str) -> Element {
        let document = document();
        if let Some(stale) = document.get_element_by_id(id) {
            stale.remove();
        }
        let outlet = document.create_element("div").unwrap();
        outlet.set_id(id);
        document.body().unwrap().append_child(&outlet).unwrap();
        outlet
    }

    fn dispatch_popstate() {
        let event = document().create_event("Event").unwrap();
        event.init_event("popstate");
        window().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn missing_outlet_is_an_error() {
        let err = Router::new(
            routes(),
            RouterOptions::builder().outlet("does-not-exist").build(),
        )
        .unwrap_err();
        assert!(matches!(err, RouterError::MissingOutlet(id) if id == "does-not-exist"));
    }

    #[wasm_bindgen_test]
    fn initial_navigation_mounts_the_matching_view() {
        let outlet = install_outlet("outlet-initial");
        let router = Router::new(
            routes(),
            RouterOptions::builder().outlet("outlet-initial").build(),
        )
        .unwrap();

        // The harness's start-up path is not ours to assume; steer to "/" explicitly.
        router.replace("/").unwrap();
        assert!(outlet.inner_html().contains("study-list"));
        assert_eq!(router.current().unwrap().name, "StudyList");
    }

    #[wasm_bindgen_test]
    fn push_updates_location_and_outlet() {
        let outlet = install_outlet("outlet-push");
        let router = Router::new(
            routes(),
            RouterOptions::builder().outlet("outlet-push").build(),
        )
        .unwrap();

        router.push("/student").unwrap();
        assert_eq!(window().location().pathname().unwrap(), "/student");
        assert!(outlet.inner_html().contains("student"));
        assert_eq!(
            router.current().unwrap(),
            NavigationState {
                name: "Student".to_string(),
                path: "/student".to_string(),
            }
        );

        // Put the location back for the other tests.
        router.replace("/").unwrap();
    }

    #[wasm_bindgen_test]
    fn push_named_resolves_the_path() {
        let _outlet = install_outlet("outlet-named");
        let router = Router::new(
            routes(),
            RouterOptions::builder().outlet("outlet-named").build(),
        )
        .unwrap();

        router.push_named("Student").unwrap();
        assert_eq!(window().location().pathname().unwrap(), "/student");

        let err = router.push_named("Missing").unwrap_err();
        assert!(matches!(err, RouterError::UnknownRoute(name) if name == "Missing"));

        router.replace_named("StudyList").unwrap();
        assert_eq!(window().location().pathname().unwrap(), "/");
    }

    #[wasm_bindgen_test]
    fn unmatched_path_invokes_on_not_found_and_keeps_the_outlet() {
        let outlet = install_outlet("outlet-miss");
        let missed = Rc::new(RefCell::new(Vec::new()));
        let missed_clone = missed.clone();
        let router = Router::new(
            routes(),
            RouterOptions::builder()
                .outlet("outlet-miss")
                .on_not_found(move |path: String| missed_clone.borrow_mut().push(path))
                .build(),
        )
        .unwrap();

        router.replace("/").unwrap();
        // Drop anything recorded for the harness's own start-up location.
        missed.borrow_mut().clear();
        let before = outlet.inner_html();

        router.push("/nope").unwrap();
        assert_eq!(outlet.inner_html(), before);
        assert_eq!(window().location().pathname().unwrap(), "/");
        assert_eq!(missed.borrow().as_slice(), ["/nope".to_string()]);
    }

    #[wasm_bindgen_test]
    fn popstate_restores_the_view_for_the_location() {
        let outlet = install_outlet("outlet-pop");
        let router = Router::new(
            routes(),
            RouterOptions::builder().outlet("outlet-pop").build(),
        )
        .unwrap();

        router.push("/student").unwrap();
        assert!(outlet.inner_html().contains("student"));

        // Simulate the browser restoring an entry created outside the router: move
        // the location without a state payload, then fire popstate.
        window()
            .history()
            .unwrap()
            .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some("/"))
            .unwrap();
        dispatch_popstate();

        assert!(outlet.inner_html().contains("study-list"));
        assert_eq!(router.current().unwrap().name, "StudyList");
    }

    #[wasm_bindgen_test]
    fn on_navigate_fires_after_each_mount() {
        let _outlet = install_outlet("outlet-nav");
        let visited = Rc::new(RefCell::new(Vec::new()));
        let visited_clone = visited.clone();
        let router = Router::new(
            routes(),
            RouterOptions::builder()
                .outlet("outlet-nav")
                .on_navigate(move |route: RouteDescriptor| {
                    visited_clone.borrow_mut().push(route.name)
                })
                .build(),
        )
        .unwrap();

        router.replace("/").unwrap();
        router.push("/student").unwrap();
        router.replace("/").unwrap();

        assert!(visited.borrow().ends_with(&[
            "StudyList".to_string(),
            "Student".to_string(),
            "StudyList".to_string(),
        ]));
    }
}
