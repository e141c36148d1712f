//! Example: Opening deep links with the router service
//!
//! A console "host" presents screens by printing them. Deep links arrive as
//! route strings, are decoded through the router and navigated to.
//!
//! Run with `RUST_LOG`-style verbosity fixed at debug:
//!
//! ```text
//! cargo run --example deep_link
//! ```

use router_service::prelude::*;
use router_service::RouterConfig;
use serde::Deserialize;
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Host
// =============================================================================

#[derive(Debug)]
struct TextScreen(String);

impl Screen for TextScreen {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(
        &self,
        screen: Box<dyn Screen>,
        from: &dyn Screen,
        style: &PresentationStyle,
        animated: bool,
        completion: Option<Completion>,
    ) {
        println!("[{}{}] {:?} -> {:?}", style.label(), if animated { ", animated" } else { "" }, from, screen);
        if let Some(completion) = completion {
            completion();
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Profile {
    user_id: u64,
}

impl Route for Profile {
    fn identifier() -> &'static str {
        "profile"
    }
}

#[derive(Debug, Deserialize)]
struct Settings {}

impl Route for Settings {
    fn identifier() -> &'static str {
        "settings"
    }
}

// =============================================================================
// Dependencies
// =============================================================================

trait Directory {
    fn display_name(&self, user_id: u64) -> String;
}

struct StaticDirectory;

impl Directory for StaticDirectory {
    fn display_name(&self, user_id: u64) -> String {
        match user_id {
            1 => "Ada".to_string(),
            2 => "Grace".to_string(),
            other => format!("user #{other}"),
        }
    }
}

#[derive(Default)]
struct RemoteFlags {
    new_settings: Cell<bool>,
}

// =============================================================================
// Features
// =============================================================================

struct ProfileFeature {
    directory: Rc<dyn Directory>,
}

impl Feature for ProfileFeature {
    type Dependencies = Rc<dyn Directory>;

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::single(|directory: Rc<dyn Directory>| directory)
    }

    fn new(directory: Rc<dyn Directory>) -> Self {
        Self { directory }
    }

    fn build(&self, route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        let name = route
            .and_then(|route| route.downcast_ref::<Profile>())
            .map(|profile| self.directory.display_name(profile.user_id))
            .unwrap_or_else(|| "me".to_string());
        Box::new(TextScreen(format!("Profile of {name}")))
    }
}

struct NewSettingsFeature {
    flags: Rc<RemoteFlags>,
}

impl Feature for NewSettingsFeature {
    type Dependencies = Rc<RemoteFlags>;

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::single(|flags: Rc<RemoteFlags>| flags)
    }

    fn new(flags: Rc<RemoteFlags>) -> Self {
        Self { flags }
    }

    fn is_enabled(&self) -> bool {
        self.flags.new_settings.get()
    }

    fn fallback(&self, _route: &dyn DynRoute) -> Option<FeatureType> {
        Some(FeatureType::of::<LegacySettingsFeature>())
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(TextScreen("Settings (new)".to_string()))
    }
}

struct LegacySettingsFeature;

impl Feature for LegacySettingsFeature {
    type Dependencies = ();

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|| ())
    }

    fn new(_: ()) -> Self {
        Self
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(TextScreen("Settings (legacy)".to_string()))
    }
}

struct HomeFeature;

impl Feature for HomeFeature {
    type Dependencies = ();

    fn dependencies_initializer() -> DependenciesInitializer {
        DependenciesInitializer::new(|| ())
    }

    fn new(_: ()) -> Self {
        Self
    }

    fn build(&self, _route: Option<&dyn DynRoute>) -> Box<dyn Screen> {
        Box::new(TextScreen("Home".to_string()))
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug)]
struct AccountHandler;

impl RouteHandler for AccountHandler {
    fn routes(&self) -> Vec<AnyRouteType> {
        vec![AnyRouteType::of::<Profile>(), AnyRouteType::of::<Settings>()]
    }

    fn destination(&self, route: &dyn DynRoute, _from: &dyn Screen) -> FeatureType {
        if route.is::<Profile>() {
            FeatureType::of::<ProfileFeature>()
        } else {
            FeatureType::of::<NewSettingsFeature>()
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> RouterResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let router = RouterBuilder::new(Rc::new(ConsolePresenter))
        .with_config(RouterConfig::new().with_name("demo").verbose())
        .with_failure_handler(FailureHandler::new(|failure| {
            eprintln!("navigation failed: {failure}");
        }))
        .with_handler(AccountHandler)
        .build()?;

    router.register::<dyn Directory, _>(|| Rc::new(StaticDirectory));
    router
        .store()
        .register_singleton::<RemoteFlags, _>(|| Rc::new(RemoteFlags::default()));

    let Some(home) = router.navigation_root(FeatureType::of::<HomeFeature>()) else {
        return Ok(());
    };

    let links = [
        r#"profile|{"user_id":1}"#,
        r#"profile|{"user_id":2,"admin":true}"#,
        "settings|{}",
        "inbox|{}",
        "not a link",
    ];

    for link in links {
        match router.decode_any_route(link) {
            Ok(route) => router.navigate(
                route.value(),
                home.as_ref(),
                PresentationStyle::Push,
                true,
                None,
            ),
            Err(error) => println!("rejected {link:?}: {error}"),
        }
    }

    if let Some(flags) = router.store().get::<RemoteFlags>() {
        flags.new_settings.set(true);
    }
    router.open(
        "settings|{}",
        home.as_ref(),
        PresentationStyle::DefaultModal,
        true,
        Some(Box::new(|| println!("settings shown"))),
    )?;

    Ok(())
}
