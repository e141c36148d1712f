//! Navigation event streams.
//!
//! A router built with [`RouterBuilder::build_with_events`](crate::RouterBuilder::build_with_events)
//! reports every navigation outcome on an async stream. Sending never blocks the
//! navigating thread: when the buffer is full the event is dropped and logged.

use std::pin::Pin;

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::config::DEFAULT_EVENT_BUFFER;

/// Type alias for a boxed async stream of events.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Outcome of a navigation, as observed by event subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A root screen was built.
    RootBuilt { feature: &'static str },
    /// A screen was handed to the presenter.
    Presented {
        identifier: String,
        feature: &'static str,
        style: &'static str,
        /// Whether the primary feature was disabled and its fallback was presented
        fallback: bool,
    },
    /// A navigation stopped at the failure handler.
    Failed {
        identifier: Option<String>,
        reason: String,
    },
}

/// A sender for events in an async stream.
#[derive(Debug)]
pub struct EventSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> EventSender<T> {
    /// Create a new event sender from an mpsc sender.
    pub fn new(tx: mpsc::Sender<T>) -> Self {
        Self { tx }
    }

    /// Try to send an event without waiting.
    ///
    /// Returns `Ok(())` if the event was sent, or `Err(event)` if the
    /// channel is full or closed.
    pub fn try_send(&self, event: T) -> Result<(), T> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(v) => v,
            mpsc::error::TrySendError::Closed(v) => v,
        })
    }

    /// Check if the receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> Clone for EventSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Builder for creating event streams.
///
/// # Example
///
/// ```rust
/// use router_service::{NavigationEvent, StreamBuilder};
///
/// let (sender, _stream) = StreamBuilder::<NavigationEvent>::new()
///     .buffer_size(16)
///     .build();
///
/// sender
///     .try_send(NavigationEvent::RootBuilt { feature: "Home" })
///     .unwrap();
/// ```
pub struct StreamBuilder<T> {
    buffer_size: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Send + 'static> StreamBuilder<T> {
    /// Create a new stream builder with default settings.
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_EVENT_BUFFER,
            _marker: std::marker::PhantomData,
        }
    }

    /// Set the buffer size for the underlying channel.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Build the stream and sender.
    pub fn build(self) -> (EventSender<T>, EventStream<T>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let sender = EventSender::new(tx);
        let stream: EventStream<T> = Box::pin(ReceiverStream::new(rx));
        (sender, stream)
    }
}

impl<T: Send + 'static> Default for StreamBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an event stream with the default buffer size.
pub fn create_stream<T: Send + 'static>() -> (EventSender<T>, EventStream<T>) {
    StreamBuilder::<T>::new().build()
}
