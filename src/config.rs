//! Configuration for the router service.

/// Base trait for configuration types.
///
/// # Example
///
/// ```rust
/// use router_service::Config;
///
/// #[derive(Debug, Clone)]
/// struct HostConfig {
///     verbose: bool,
/// }
///
/// impl Config for HostConfig {
///     fn name(&self) -> &str {
///         "host"
///     }
///
///     fn is_verbose(&self) -> bool {
///         self.verbose
///     }
/// }
/// ```
pub trait Config {
    /// Returns the configuration name/identifier.
    fn name(&self) -> &str {
        "default"
    }

    /// Returns whether verbose output is enabled.
    fn is_verbose(&self) -> bool {
        false
    }

    /// Returns whether debug mode is enabled.
    fn is_debug(&self) -> bool {
        false
    }

    /// Validates the configuration.
    ///
    /// Returns Ok(()) if valid, or an error message describing the issue.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Default capacity of the navigation event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Largest navigation event channel capacity tokio can allocate.
pub const MAX_EVENT_BUFFER: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Configuration consumed by [`RouterBuilder`](crate::RouterBuilder).
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Configuration name, used as the router's log span label
    pub name: String,
    /// Log presentations at `info` instead of `debug`
    pub verbose: bool,
    /// Log every navigation state transition at `debug` instead of `trace`
    pub debug: bool,
    /// Capacity of the navigation event channel
    pub event_buffer: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            verbose: false,
            debug: false,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl RouterConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the navigation event channel capacity.
    pub fn with_event_buffer(mut self, size: usize) -> Self {
        self.event_buffer = size;
        self
    }

    /// Enable verbose output.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Enable debug mode.
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }
}

impl Config for RouterConfig {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            "router"
        } else {
            &self.name
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn is_debug(&self) -> bool {
        self.debug
    }

    fn validate(&self) -> Result<(), String> {
        if self.event_buffer == 0 {
            Err("event_buffer must be greater than 0".to_string())
        } else if self.event_buffer > MAX_EVENT_BUFFER {
            Err(format!("event_buffer must be at most {MAX_EVENT_BUFFER}"))
        } else {
            Ok(())
        }
    }
}
