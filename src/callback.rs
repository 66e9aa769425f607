//! Navigation callback handlers for route activation and unmatched locations.

use crate::route::RouteDescriptor;
use std::{cell::RefCell, rc::Rc};

pub(crate) type OnNavigateInner = Box<dyn FnMut(RouteDescriptor)>;

/// The callback executed after a route has been activated, taking the matched
/// [`RouteDescriptor`] as an argument.
///
/// # Usage
/// ```
/// use study_router::callback::OnNavigate;
///
/// let on_navigate = OnNavigate::from(|route| {
///     // Update navigation chrome, page title, etc.
/// });
/// ```
#[derive(Clone)]
pub struct OnNavigate(pub(crate) Rc<RefCell<OnNavigateInner>>);

impl<F> From<F> for OnNavigate
where
    F: FnMut(RouteDescriptor) + 'static,
{
    fn from(f: F) -> Self {
        OnNavigate(Rc::new(RefCell::new(Box::new(f))))
    }
}

pub(crate) type OnNotFoundInner = Box<dyn FnMut(String)>;

/// The callback executed when a location matches no entry in the route table, taking
/// the unmatched path as an argument.
///
/// The table ships without a catch-all route, so this is the only place an unmatched
/// location surfaces.
///
/// # Usage
/// ```
/// use study_router::callback::OnNotFound;
///
/// let on_not_found = OnNotFound::from(|path| {
///     // Surface the unmatched path to the user.
/// });
/// ```
#[derive(Clone)]
pub struct OnNotFound(pub(crate) Rc<RefCell<OnNotFoundInner>>);

impl<F> From<F> for OnNotFound
where
    F: FnMut(String) + 'static,
{
    fn from(f: F) -> Self {
        OnNotFound(Rc::new(RefCell::new(Box::new(f))))
    }
}
