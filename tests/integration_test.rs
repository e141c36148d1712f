//! Integration tests for the router service
//!
//! These tests drive complete navigations through a recording presenter.

use futures::StreamExt;
use router_service::prelude::*;
use router_service::{
    DependencyEntry, DependencyKey, ModalConfig, NavigationState, RegistryError,
    ResolutionError, RouteDecodingError, RouterConfig,
};
use serde::Deserialize;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// =============================================================================
// Host Doubles
// =============================================================================

#[derive(Debug, PartialEq)]
struct Label(String);

impl Screen for Label {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Origin;

impl Screen for Origin {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Presentation {
    label: String,
    style: &'static str,
    animated: bool,
}

/// Presenter that records what it was asked to show and runs completions inline.
#[derive(Default)]
struct RecordingPresenter {
    presented: RefCell<Vec<Presentation>>,
}

impl RecordingPresenter {
    fn labels(&self) -> Vec<String> {
        self.presented
            .borrow()
            .iter()
            .map(|presentation| presentation.label.clone())
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn present(
        &self,
        screen: Box<dyn Screen>,
        _from: &dyn Screen,
        style: &PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    ) {
        let label = screen
            .downcast_ref::<Label>()
            .map(|label| label.0.clone())
            .unwrap_or_default();
        self.presented.borrow_mut().push(Presentation {
            label,
            style: style.label(),
            animated,
        });
        if let Some(completion) = completion {
            completion();
        }
    }
}

/// Store that records every key it is asked for.
#[derive(Default)]
struct SpyStore {
    inner: DependencyStore,
    lookups: RefCell<Vec<&'static str>>,
}

impl Store for SpyStore {
    fn insert(&self, entry: DependencyEntry) {
        self.inner.insert(entry);
    }

    fn entry(&self, key: &DependencyKey) -> Option<DependencyEntry> {
        self.lookups.borrow_mut().push(key.type_name());
        self.inner.entry(key)
    }
}

/// Log sink shared with a `tracing_subscriber` writer.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type Failures = Rc<RefCell<Vec<NavigationFailure>>>;

fn recording_failures() -> (FailureHandler, Failures) {
    let seen: Failures = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handler = FailureHandler::new(move |failure| sink.borrow_mut().push(failure.clone()));
    (handler, seen)
}

// =============================================================================
// Routes
// =============================================================================

#[derive(Debug, Deserialize)]
struct Foo {}

impl Route for Foo {
    fn identifier() -> &'static str {
        "foo"
    }
}

#[derive(Debug, Deserialize)]
struct Bar {
    id: u32,
}

impl Route for Bar {
    fn identifier() -> &'static str {
        "bar"
    }
}

#[derive(Debug, Deserialize)]
struct Baz {}

impl Route for Baz {
    fn identifier() -> &'static str {
        "baz"
    }
}

#[derive(Debug, Deserialize)]
struct Experiment {}

#[derive(Debug, Deserialize)]
struct Vault {}

impl Route for Experiment {}
impl Route for Vault {}

// =============================================================================
// Dependencies
// =============================================================================

trait Greeting {
    fn text(&self) -> String;
}

struct Hello;

impl Greeting for Hello {
    fn text(&self) -> String {
        "hello".to_string()
    }
}

#[derive(Default)]
struct Flags {
    beta: Cell<bool>,
}

// =============================================================================
// Features
// =============================================================================

struct FooFeature {
    greeting: Rc<dyn Greeting>,
}

impl Feature for FooFeature {
    type Dependencies = Rc<dyn Greeting>;

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::single(|greeting: Rc<dyn Greeting>| greeting)
    }

    fn new(greeting: Rc<dyn Greeting>) -> Self {
        Self { greeting }
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(Label(format!("foo: {}", self.greeting.text())))
    }
}

struct BarFeature;

impl Feature for BarFeature {
    type Dependencies = ();

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|| ())
    }

    fn new(_: ()) -> Self {
        Self
    }

    fn build(&self, route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        let id = route
            .and_then(|route| route.downcast_ref::<Bar>())
            .map(|bar| bar.id)
            .unwrap_or_default();
        Box::new(Label(format!("bar {id}")))
    }
}

struct BetaFeature {
    flags: Rc<Flags>,
}

impl Feature for BetaFeature {
    type Dependencies = Rc<Flags>;

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::single(|flags: Rc<Flags>| flags)
    }

    fn new(flags: Rc<Flags>) -> Self {
        Self { flags }
    }

    fn is_enabled(&self) -> bool {
        self.flags.beta.get()
    }

    fn fallback(&self, _route: &dyn DynRoute) -> Option<FeatureType> {
        Some(FeatureType::of::<StableFeature>())
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(Label("beta".to_string()))
    }
}

struct StableFeature;

impl Feature for StableFeature {
    type Dependencies = ();

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|| ())
    }

    fn new(_: ()) -> Self {
        Self
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(Label("stable".to_string()))
    }
}

struct LockedFeature;

impl Feature for LockedFeature {
    type Dependencies = ();

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|| ())
    }

    fn new(_: ()) -> Self {
        Self
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        unreachable!("a disabled feature without fallback is never built")
    }
}

struct HomeFeature {
    navigator: Rc<dyn Navigator>,
    flags: Rc<Flags>,
}

impl Feature for HomeFeature {
    type Dependencies = (Rc<dyn Navigator>, Rc<Flags>);

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|navigator: Rc<dyn Navigator>, flags: Rc<Flags>| {
            (navigator, flags)
        })
    }

    fn new((navigator, flags): Self::Dependencies) -> Self {
        Self { navigator, flags }
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        // Home opens the experiment as soon as it is built.
        self.flags.beta.set(true);
        self.navigator
            .navigate(&Experiment {}, &Origin, PresentationStyle::Push, false, None);
        Box::new(Label("home".to_string()))
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug)]
struct FooHandler;

impl RouteHandler for FooHandler {
    fn routes(&self) -> Vec<AnyRouteType> {
        vec![AnyRouteType::of::<Foo>()]
    }

    fn destination(&self, _route: &dyn DynRoute, _from: &dyn Screen) -> FeatureType {
        FeatureType::of::<FooFeature>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct BarHandler;

impl RouteHandler for BarHandler {
    fn routes(&self) -> Vec<AnyRouteType> {
        vec![AnyRouteType::of::<Bar>()]
    }

    fn destination(&self, _route: &dyn DynRoute, _from: &dyn Screen) -> FeatureType {
        FeatureType::of::<BarFeature>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct GatedHandler;

impl RouteHandler for GatedHandler {
    fn routes(&self) -> Vec<AnyRouteType> {
        vec![AnyRouteType::of::<Experiment>(), AnyRouteType::of::<Vault>()]
    }

    fn destination(&self, route: &dyn DynRoute, _from: &dyn Screen) -> FeatureType {
        if route.is::<Vault>() {
            FeatureType::of::<LockedFeature>()
        } else {
            FeatureType::of::<BetaFeature>()
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Harness {
    router: Rc<RouterService>,
    presenter: Rc<RecordingPresenter>,
    failures: Failures,
}

impl Harness {
    fn new() -> Self {
        let presenter = Rc::new(RecordingPresenter::default());
        let (failure, failures) = recording_failures();
        let router = RouterBuilder::new(presenter.clone())
            .with_failure_handler(failure)
            .with_handler(FooHandler)
            .with_handler(BarHandler)
            .with_handler(GatedHandler)
            .build()
            .unwrap();

        router.register::<dyn Greeting, _>(|| Rc::new(Hello));
        router
            .store()
            .register_singleton::<Flags, _>(|| Rc::new(Flags::default()));

        Self {
            router,
            presenter,
            failures,
        }
    }

    fn flags(&self) -> Rc<Flags> {
        self.router.store().get::<Flags>().unwrap()
    }

    fn push(&self, route: &dyn DynRoute) {
        self.router
            .navigate(route, &Origin, PresentationStyle::Push, true, None);
    }
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_routes_dispatch_to_their_handlers() {
    let harness = Harness::new();

    assert!(harness.router.handler(&Foo {}).unwrap().is::<FooHandler>());
    assert!(harness.router.handler(&Bar { id: 0 }).unwrap().is::<BarHandler>());
    assert!(harness.router.handler(&Baz {}).is_none());

    harness.push(&Foo {});
    harness.push(&Bar { id: 7 });

    assert_eq!(harness.presenter.labels(), vec!["foo: hello", "bar 7"]);
    assert!(harness.failures.borrow().is_empty());
    assert_eq!(harness.router.last_state(), NavigationState::Presented);
}

#[test]
fn test_unregistered_route_reports_missing_handler() {
    let harness = Harness::new();

    harness.push(&Baz {});

    assert!(harness.presenter.labels().is_empty());
    assert_eq!(
        *harness.failures.borrow(),
        vec![NavigationFailure::HandlerMissing {
            identifier: "baz".to_string()
        }]
    );
    assert_eq!(harness.router.last_state(), NavigationState::Failed);
}

#[test]
fn test_disabled_feature_presents_its_fallback() {
    let harness = Harness::new();

    harness.push(&Experiment {});
    harness.flags().beta.set(true);
    harness.push(&Experiment {});

    assert_eq!(harness.presenter.labels(), vec!["stable", "beta"]);
    assert!(harness.failures.borrow().is_empty());
}

#[test]
fn test_disabled_feature_without_fallback_fails() {
    let harness = Harness::new();

    harness.push(&Vault {});

    assert!(harness.presenter.labels().is_empty());
    assert!(matches!(
        harness.failures.borrow().as_slice(),
        [NavigationFailure::FallbackMissing { feature, identifier }]
            if feature.ends_with("LockedFeature") && identifier == "Vault"
    ));
}

#[test]
fn test_missing_dependency_reports_resolution_failure() {
    let presenter = Rc::new(RecordingPresenter::default());
    let (failure, failures) = recording_failures();
    let router = RouterBuilder::new(presenter.clone())
        .with_failure_handler(failure)
        .with_handler(FooHandler)
        .build()
        .unwrap();

    router.navigate(&Foo {}, &Origin, PresentationStyle::Push, true, None);

    assert!(presenter.labels().is_empty());
    assert!(matches!(
        failures.borrow().as_slice(),
        [NavigationFailure::Resolution(ResolutionError::MissingDependency { dependency, requested_by })]
            if dependency.contains("Greeting") && requested_by.contains("Greeting")
    ));
}

#[test]
fn test_style_animation_and_completion_are_forwarded() {
    let harness = Harness::new();
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();

    harness.router.navigate(
        &Bar { id: 1 },
        &Origin,
        PresentationStyle::CustomModal(ModalConfig::default()),
        false,
        Some(Box::new(move || flag.set(true))),
    );

    assert_eq!(
        *harness.presenter.presented.borrow(),
        vec![Presentation {
            label: "bar 1".to_string(),
            style: "custom_modal",
            animated: false,
        }]
    );
    assert!(finished.get());
}

#[test]
fn test_completion_may_navigate_again() {
    let harness = Harness::new();
    let router = harness.router.clone();

    harness.router.navigate(
        &Foo {},
        &Origin,
        PresentationStyle::DefaultModal,
        true,
        Some(Box::new(move || {
            router.navigate(&Bar { id: 2 }, &Origin, PresentationStyle::Push, true, None);
        })),
    );

    assert_eq!(harness.presenter.labels(), vec!["foo: hello", "bar 2"]);
}

#[test]
fn test_open_navigates_to_a_route_string() {
    let harness = Harness::new();

    harness
        .router
        .open(r#"bar|{"id":5}"#, &Origin, PresentationStyle::Push, true, None)
        .unwrap();

    assert_eq!(harness.presenter.labels(), vec!["bar 5"]);
    assert!(matches!(
        harness
            .router
            .open("baz|{}", &Origin, PresentationStyle::Push, true, None),
        Err(RouterError::Decoding(RouteDecodingError::UnregisteredRoute(ref scheme))) if scheme == "baz"
    ));
    assert!(matches!(
        harness
            .router
            .open("not a link", &Origin, PresentationStyle::Push, true, None),
        Err(RouterError::Decoding(RouteDecodingError::FailedToParseRouteString(_)))
    ));
    assert_eq!(harness.presenter.labels(), vec!["bar 5"]);
    assert!(harness.failures.borrow().is_empty());
}

#[test]
fn test_unique_handler_registration_rejects_owned_routes() {
    let harness = Harness::new();

    assert!(matches!(
        harness.router.register_unique_handler(FooHandler),
        Err(RouterError::Registry(RegistryError::AlreadyRegistered(ref identifier))) if identifier == "foo"
    ));

    let router = RouterService::new(Rc::new(RecordingPresenter::default()));
    router.register_unique_handler(BarHandler).unwrap();
    assert_eq!(router.identifiers(), vec!["bar"]);
}

#[test]
fn test_debug_config_logs_state_transitions() {
    fn captured_logs(config: RouterConfig) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let (failure, _failures) = recording_failures();
            let router = RouterBuilder::new(Rc::new(RecordingPresenter::default()))
                .with_config(config)
                .with_failure_handler(failure)
                .with_handler(BarHandler)
                .build()
                .unwrap();
            router.navigate(&Bar { id: 1 }, &Origin, PresentationStyle::Push, true, None);
        });
        buffer.contents()
    }

    let quiet = captured_logs(RouterConfig::new());
    let debug = captured_logs(RouterConfig::new().debug());

    assert!(!quiet.contains("navigation state"));
    assert!(debug.contains("navigation state"));
    assert!(debug.contains("Presented"));
}

#[test]
#[should_panic(expected = "no handler registered for route baz")]
fn test_default_failure_handler_panics() {
    let router = RouterService::new(Rc::new(RecordingPresenter::default()));
    router.navigate(&Baz {}, &Origin, PresentationStyle::Push, true, None);
}

// =============================================================================
// Root Screen Tests
// =============================================================================

#[test]
fn test_navigation_root_builds_without_presenting() {
    let harness = Harness::new();

    let root = harness
        .router
        .navigation_root(FeatureType::of::<StableFeature>())
        .unwrap();

    assert_eq!(root.downcast_ref::<Label>(), Some(&Label("stable".to_string())));
    assert!(harness.presenter.labels().is_empty());
}

#[test]
fn test_features_can_depend_on_the_router() {
    let harness = Harness::new();

    let root = harness
        .router
        .navigation_root(FeatureType::of::<HomeFeature>())
        .unwrap();

    assert_eq!(root.downcast_ref::<Label>(), Some(&Label("home".to_string())));
    assert_eq!(harness.presenter.labels(), vec!["beta"]);
}

#[test]
fn test_navigation_root_reports_unresolved_dependencies() {
    let presenter = Rc::new(RecordingPresenter::default());
    let (failure, failures) = recording_failures();
    let router = RouterBuilder::new(presenter)
        .with_failure_handler(failure)
        .build()
        .unwrap();

    assert!(router
        .navigation_root(FeatureType::of::<FooFeature>())
        .is_none());
    assert_eq!(failures.borrow().len(), 1);
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_router_registers_itself_weakly() {
    let store: Rc<dyn Store> = Rc::new(DependencyStore::new());
    let router = RouterBuilder::new(Rc::new(RecordingPresenter::default()))
        .with_store(store.clone())
        .build()
        .unwrap();

    let navigator = store.get::<dyn Navigator>().unwrap();
    assert_eq!(
        Rc::as_ptr(&navigator) as *const (),
        Rc::as_ptr(&router) as *const ()
    );

    drop(navigator);
    drop(router);
    assert!(store.contains::<dyn Navigator>());
    assert!(store.get::<dyn Navigator>().is_none());
}

#[test]
fn test_features_resolve_through_the_injected_store() {
    let spy = Rc::new(SpyStore::default());
    let presenter = Rc::new(RecordingPresenter::default());
    let router = RouterBuilder::new(presenter.clone())
        .with_store(spy.clone())
        .with_handler(FooHandler)
        .build()
        .unwrap();
    router.register::<dyn Greeting, _>(|| Rc::new(Hello));

    router.navigate(&Foo {}, &Origin, PresentationStyle::Push, true, None);

    assert_eq!(presenter.labels(), vec!["foo: hello"]);
    assert!(spy
        .lookups
        .borrow()
        .iter()
        .any(|name| name.ends_with("Greeting")));
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = RouterBuilder::new(Rc::new(RecordingPresenter::default()))
        .with_config(RouterConfig::new().with_event_buffer(0))
        .build();

    assert!(matches!(result, Err(RouterError::Config(_))));
}

#[test]
fn test_oversized_event_buffer_is_rejected() {
    let result = RouterBuilder::new(Rc::new(RecordingPresenter::default()))
        .with_config(RouterConfig::new().with_event_buffer(usize::MAX))
        .build_with_events();

    assert!(matches!(result, Err(RouterError::Config(ref reason)) if reason.contains("at most")));
}

#[test]
fn test_router_resolves_registered_dependencies() {
    let harness = Harness::new();

    let greeting = harness.router.resolve::<dyn Greeting>().unwrap();
    assert_eq!(greeting.text(), "hello");

    struct Unregistered;
    assert!(matches!(
        harness.router.resolve::<Unregistered>(),
        Err(RouterError::Resolution(ResolutionError::MissingDependency { dependency, .. }))
            if dependency.ends_with("Unregistered")
    ));
}

#[test]
fn test_router_dependency_slots_report_to_its_failure_handler() {
    let harness = Harness::new();
    let slot = harness.router.dependency::<dyn Greeting>();

    slot.resolve(harness.router.store());
    assert!(slot.is_resolved());
    assert!(harness.failures.borrow().is_empty());

    slot.resolve(harness.router.store());
    assert!(matches!(
        harness.failures.borrow().as_slice(),
        [NavigationFailure::DoubleResolution { dependency }] if dependency.contains("Greeting")
    ));

    harness
        .router
        .failure_handler()
        .fail(NavigationFailure::HandlerMissing {
            identifier: "elsewhere".to_string(),
        });
    assert_eq!(harness.failures.borrow().len(), 2);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_route_strings_decode_through_the_router() {
    let harness = Harness::new();

    let route = harness
        .router
        .decode_any_route(r#"bar|{"id":3}"#)
        .unwrap();
    assert_eq!(route.value().downcast_ref::<Bar>().map(|bar| bar.id), Some(3));

    harness.push(route.value());
    assert_eq!(harness.presenter.labels(), vec!["bar 3"]);
}

#[test]
fn test_route_string_errors() {
    let harness = Harness::new();
    let router = &harness.router;

    assert!(matches!(
        router.decode_any_route("bar"),
        Err(RouteDecodingError::FailedToParseRouteString(_))
    ));
    assert!(matches!(
        router.decode_any_route("baz|{}"),
        Err(RouteDecodingError::UnregisteredRoute(ref scheme)) if scheme == "baz"
    ));
    assert!(matches!(
        router.decode_any_route("bar|{}"),
        Err(RouteDecodingError::Decode { ref identifier, .. }) if identifier == "bar"
    ));
}

#[test]
fn test_any_route_fields_decode_in_router_scope() {
    #[derive(Debug, Deserialize)]
    struct Notification {
        title: String,
        destination: AnyRoute,
    }

    let harness = Harness::new();
    let json = r#"{"title": "New follower", "destination": "bar|{\"id\":9}"}"#;

    let notification = harness
        .router
        .decoding_scope(|| serde_json::from_str::<Notification>(json))
        .unwrap();

    assert_eq!(notification.title, "New follower");
    assert!(notification.destination.value().is::<Bar>());
    assert_eq!(notification.destination.route_string(), r#"bar|{"id":9}"#);
}

// =============================================================================
// Event Stream Tests
// =============================================================================

#[tokio::test]
async fn test_navigation_events_are_streamed() {
    let presenter = Rc::new(RecordingPresenter::default());
    let (failure, _failures) = recording_failures();
    let (router, events) = RouterBuilder::new(presenter)
        .with_failure_handler(failure)
        .with_handler(BarHandler)
        .build_with_events()
        .unwrap();

    router.navigation_root(FeatureType::of::<StableFeature>());
    router.navigate(&Bar { id: 4 }, &Origin, PresentationStyle::DefaultModal, true, None);
    router.navigate(&Baz {}, &Origin, PresentationStyle::Push, true, None);
    drop(router);

    let events: Vec<NavigationEvent> = events.collect().await;
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        NavigationEvent::RootBuilt { feature } if feature.ends_with("StableFeature")
    ));
    assert!(matches!(
        &events[1],
        NavigationEvent::Presented { identifier, style: "modal", fallback: false, .. } if identifier == "bar"
    ));
    assert_eq!(
        events[2],
        NavigationEvent::Failed {
            identifier: Some("baz".to_string()),
            reason: "no handler registered for route baz".to_string(),
        }
    );
}

#[tokio::test]
async fn test_full_event_buffer_drops_events() {
    let (failure, _failures) = recording_failures();
    let (router, events) = RouterBuilder::new(Rc::new(RecordingPresenter::default()))
        .with_failure_handler(failure)
        .with_config(RouterConfig::new().with_event_buffer(1))
        .build_with_events()
        .unwrap();

    router.navigation_root(FeatureType::of::<StableFeature>());
    router.navigation_root(FeatureType::of::<StableFeature>());
    drop(router);

    let events: Vec<NavigationEvent> = events.collect().await;
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_navigation_continues_after_stream_is_dropped() {
    let presenter = Rc::new(RecordingPresenter::default());
    let (failure, failures) = recording_failures();
    let (router, events) = RouterBuilder::new(presenter.clone())
        .with_failure_handler(failure)
        .with_handler(BarHandler)
        .build_with_events()
        .unwrap();

    drop(events);
    router.navigate(&Bar { id: 6 }, &Origin, PresentationStyle::Push, true, None);
    router.navigate(&Bar { id: 8 }, &Origin, PresentationStyle::Push, true, None);

    assert_eq!(presenter.labels(), vec!["bar 6", "bar 8"]);
    assert!(failures.borrow().is_empty());
    assert_eq!(router.last_state(), NavigationState::Presented);
}
