//! Injectable fail-fast strategy for configuration errors.

use std::fmt;
use std::rc::Rc;

use crate::error::NavigationFailure;

/// Receives configuration-class failures: missing handlers, missing fallbacks and
/// dependency wiring mistakes.
///
/// The default handler panics, which surfaces misconfigured routing immediately in
/// development. Tests swap in a recording closure to observe failures instead.
///
/// # Example
///
/// ```rust
/// use router_service::{FailureHandler, NavigationFailure};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let handler = FailureHandler::new(move |failure: &NavigationFailure| {
///     sink.borrow_mut().push(failure.clone());
/// });
///
/// handler.fail(NavigationFailure::HandlerMissing { identifier: "home".into() });
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Clone)]
pub struct FailureHandler {
    handler: Rc<dyn Fn(&NavigationFailure)>,
}

impl FailureHandler {
    /// Wrap a closure as a failure handler.
    pub fn new(handler: impl Fn(&NavigationFailure) + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
        }
    }

    /// Report a failure.
    pub fn fail(&self, failure: NavigationFailure) {
        tracing::error!(%failure, "navigation failure");
        (self.handler)(&failure);
    }
}

impl Default for FailureHandler {
    fn default() -> Self {
        Self::new(|failure| panic!("{failure}"))
    }
}

impl fmt::Debug for FailureHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureHandler").finish_non_exhaustive()
    }
}
