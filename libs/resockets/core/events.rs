use crate::traits::transport::CloseInfo;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The closed set of event kinds a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Open,
    Message,
    Close,
    Error,
}

/// Payload delivered to listeners
#[derive(Debug, Clone)]
pub enum SocketEvent {
    /// Connection established
    Open,
    /// Parsed JSON body of an inbound frame
    Message(Value),
    /// Connection ended; close metadata when the peer sent any
    Close(Option<CloseInfo>),
    /// Transport-level error description
    Error(String),
}

impl SocketEvent {
    /// The kind this event is dispatched under
    pub fn kind(&self) -> EventKind {
        match self {
            SocketEvent::Open => EventKind::Open,
            SocketEvent::Message(_) => EventKind::Message,
            SocketEvent::Close(_) => EventKind::Close,
            SocketEvent::Error(_) => EventKind::Error,
        }
    }
}

/// Identity of one listener registration.
///
/// Registering the same closure twice yields two distinct ids; removal
/// goes by id, never by comparing callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Callback = Arc<dyn Fn(&SocketEvent) + Send + Sync>;

/// Insertion-ordered listener table keyed by event kind.
#[derive(Default)]
pub struct ListenerTable {
    entries: Mutex<HashMap<EventKind, Vec<(ListenerId, Callback)>>>,
    next_id: AtomicU64,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future occurrence of `kind`.
    pub fn add(
        &self,
        kind: EventKind,
        callback: impl Fn(&SocketEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .entry(kind)
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove one registration; unknown ids are a no-op.
    pub fn remove(&self, kind: EventKind, id: ListenerId) {
        if let Some(list) = self.entries.lock().get_mut(&kind) {
            list.retain(|(entry_id, _)| *entry_id != id);
        }
    }

    /// Invoke every listener registered for the event's kind, in
    /// registration order. Callbacks run outside the table lock so they
    /// may register or remove listeners themselves.
    pub fn emit(&self, event: &SocketEvent) {
        let callbacks: Vec<Callback> = {
            let entries = self.entries.lock();
            match entries.get(&event.kind()) {
                Some(list) => list.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
                None => Vec::new(),
            }
        };
        for callback in callbacks {
            callback(event);
        }
    }
}
