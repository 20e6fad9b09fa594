//! Event Bus implementation.
//!
//! Each editing session owns one bus and hands `Arc<EventBus>` clones to the
//! registries and the undo/redo manager. Observers either register a
//! synchronous handler, which runs on the publishing thread, or take a
//! broadcast receiver and poll it from a task.
//!
//! A bus can also keep a journal of the last few events, numbered in
//! publication order, so a view that attaches late can catch up.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};
use crate::types::{thread_safe_rw, DataCallback, ThreadSafeRw, ThreadSafeRwMap};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = self.0.simple().to_string();
        write!(f, "sub-{}", &id[..8])
    }
}

/// Which events a handler wants
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Events from any of these categories
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = DataCallback<EditorEvent>;

/// Sizing of an event bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Capacity of the broadcast channel; slow receivers lag past this.
    pub channel_capacity: usize,
    /// Number of recent events kept in the journal. Zero disables it.
    pub journal_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            journal_size: 0,
        }
    }
}

/// An event together with its position in publication order
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub sequence: u64,
    pub event: EditorEvent,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Nobody is listening; the event was still journaled.
    #[error("No active subscribers")]
    NoSubscribers,
    #[error("Event channel is closed")]
    ChannelClosed,
    #[error("Receiver lagged, {0} events dropped")]
    Lagged(u64),
}

/// Publishes editor events to handlers and receivers
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
    handlers: ThreadSafeRwMap<SubscriptionId, (EventFilter, EventHandler)>,
    journal: ThreadSafeRw<VecDeque<JournalEntry>>,
    next_sequence: AtomicU64,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// A zero `channel_capacity` is raised to one.
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: thread_safe_rw(HashMap::new()),
            journal: thread_safe_rw(VecDeque::with_capacity(config.journal_size)),
            next_sequence: AtomicU64::new(1),
            config,
        }
    }

    /// Deliver `event` to matching handlers and to every receiver.
    ///
    /// Returns the number of handlers and receivers reached, or
    /// [`EventBusError::NoSubscribers`] when there were none.
    pub fn publish(&self, event: EditorEvent) -> Result<usize, EventBusError> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        self.record(sequence, &event);

        let mut delivered = 0;
        {
            let handlers = self.handlers.read();
            for (filter, handler) in handlers.values() {
                if filter.matches(&event) {
                    handler(event.clone());
                    delivered += 1;
                }
            }
        }

        let listeners = self.subscriber_count() + self.sender.receiver_count();
        delivered += self.sender.send(event).unwrap_or(0);
        if listeners == 0 {
            return Err(EventBusError::NoSubscribers);
        }
        Ok(delivered)
    }

    /// Register a handler called synchronously for each matching event.
    ///
    /// The handler must not subscribe or unsubscribe on this bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// A receiver for polling events from an async task
    pub fn receiver(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Journaled events with a sequence number greater than `after`,
    /// oldest first. Pass 0 for the whole journal.
    pub fn journal_since(&self, after: u64) -> Vec<JournalEntry> {
        self.journal
            .read()
            .iter()
            .filter(|entry| entry.sequence > after)
            .cloned()
            .collect()
    }

    /// Sequence number of the most recently published event, 0 if none
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence.load(Ordering::Relaxed) - 1
    }

    pub fn clear_journal(&self) {
        self.journal.write().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn record(&self, sequence: u64, event: &EditorEvent) {
        if self.config.journal_size == 0 {
            return;
        }
        let mut journal = self.journal.write();
        if journal.len() == self.config.journal_size {
            journal.pop_front();
        }
        journal.push_back(JournalEntry {
            sequence,
            event: event.clone(),
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("last_sequence", &self.last_sequence())
            .field("config", &self.config)
            .finish()
    }
}

/// Create a bus ready to be shared between the components of a session
pub fn shared_event_bus(config: EventBusConfig) -> Arc<EventBus> {
    Arc::new(EventBus::with_config(config))
}
