//! Boundary with the host presentation layer.
//!
//! The router never renders anything. It hands a built [`Screen`] to the host's
//! [`Presenter`] together with the screen it was requested from and a
//! [`PresentationStyle`].

use std::any::Any;
use std::fmt::Debug;

use tokio::sync::oneshot;

/// An opaque presentable unit owned by the host (a view controller, a widget tree, ...).
pub trait Screen: Debug {
    /// Downcast support.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Screen + '_ {
    /// Check if this screen is of type `S`.
    pub fn is<S: Screen + 'static>(&self) -> bool {
        self.as_any().is::<S>()
    }

    /// Downcast to screen type `S`.
    pub fn downcast_ref<S: Screen + 'static>(&self) -> Option<&S> {
        self.as_any().downcast_ref::<S>()
    }
}

/// How a modal is laid out over its presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPresentation {
    /// Platform default sheet.
    #[default]
    Automatic,
    /// Covers the whole window.
    FullScreen,
    /// Partially covers the presenter.
    PageSheet,
    /// Centered form.
    FormSheet,
    /// Drawn over the presenter, which stays visible.
    OverCurrentContext,
}

/// The animation used to bring a modal on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalTransition {
    /// Slides up from the bottom edge.
    #[default]
    CoverVertical,
    /// Cross dissolve.
    CrossDissolve,
    /// Horizontal flip.
    FlipHorizontal,
}

/// Parameters of a custom modal presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub presentation: ModalPresentation,
    pub transition: ModalTransition,
    /// Whether the user may dismiss the modal with a gesture
    pub interactive_dismissal: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            presentation: ModalPresentation::default(),
            transition: ModalTransition::default(),
            interactive_dismissal: true,
        }
    }
}

/// The presentation requested for a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PresentationStyle {
    /// Push onto the originating screen's navigation stack.
    #[default]
    Push,
    /// Present modally with the platform defaults.
    DefaultModal,
    /// Present modally with explicit parameters.
    CustomModal(ModalConfig),
}

impl PresentationStyle {
    /// Short label used in logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::DefaultModal => "modal",
            Self::CustomModal(_) => "custom_modal",
        }
    }

    /// Check if this style presents modally.
    pub fn is_modal(&self) -> bool {
        !matches!(self, Self::Push)
    }
}

/// Callback run by the presenter once its transition has finished.
pub type Completion = Box<dyn FnOnce()>;

/// The host's presentation layer.
///
/// Implementations may run `completion` synchronously or later; the router does not
/// wait for it and gives no ordering guarantee against a subsequent navigation.
pub trait Presenter {
    /// Present `screen` from `from`.
    fn present(
        &self,
        screen: Box<dyn Screen>,
        from: &dyn Screen,
        style: &PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    );
}

/// A completion callback paired with a receiver that resolves when it runs.
///
/// Lets async hosts await the end of a transition. The receiver errors if the
/// presenter drops the callback without calling it.
///
/// # Example
///
/// ```rust
/// use router_service::completion_channel;
///
/// # async fn example() {
/// let (completion, finished) = completion_channel();
/// completion();
/// assert!(finished.await.is_ok());
/// # }
/// ```
pub fn completion_channel() -> (Completion, oneshot::Receiver<()>) {
    let (tx, rx) = oneshot::channel();
    let completion: Completion = Box::new(move || {
        let _ = tx.send(());
    });
    (completion, rx)
}
