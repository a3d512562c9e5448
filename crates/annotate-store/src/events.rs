//! Store notifications
//!
//! The adapter reports successful mutations as [`AnnotationEvent`]s on an
//! [`EventBus`]. The bus fans out to synchronous listeners registered with
//! [`EventBus::subscribe`] and to async consumers holding a
//! [`tokio::sync::broadcast::Receiver`].

use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use annotate_types::{Annotation, Comment};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::StoreError;

pub const DEFAULT_CAPACITY: usize = 64;
/// Largest broadcast buffer a bus will allocate
pub const MAX_CAPACITY: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum AnnotationEvent {
    #[serde(rename = "annotation:add", rename_all = "camelCase")]
    AnnotationAdded {
        document_id: String,
        page_number: u32,
        annotation: Annotation,
    },
    #[serde(rename = "annotation:edit", rename_all = "camelCase")]
    AnnotationEdited {
        document_id: String,
        annotation_id: String,
        annotation: Annotation,
    },
    #[serde(rename = "annotation:delete", rename_all = "camelCase")]
    AnnotationDeleted {
        document_id: String,
        annotation_id: String,
    },
    #[serde(rename = "comment:add", rename_all = "camelCase")]
    CommentAdded {
        document_id: String,
        annotation_id: String,
        comment: Comment,
    },
    #[serde(rename = "comment:delete", rename_all = "camelCase")]
    CommentDeleted {
        document_id: String,
        comment_id: String,
    },
}

impl AnnotationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationEvent::AnnotationAdded { .. } => "annotation:add",
            AnnotationEvent::AnnotationEdited { .. } => "annotation:edit",
            AnnotationEvent::AnnotationDeleted { .. } => "annotation:delete",
            AnnotationEvent::CommentAdded { .. } => "comment:add",
            AnnotationEvent::CommentDeleted { .. } => "comment:delete",
        }
    }

    pub fn document_id(&self) -> &str {
        match self {
            AnnotationEvent::AnnotationAdded { document_id, .. }
            | AnnotationEvent::AnnotationEdited { document_id, .. }
            | AnnotationEvent::AnnotationDeleted { document_id, .. }
            | AnnotationEvent::CommentAdded { document_id, .. }
            | AnnotationEvent::CommentDeleted { document_id, .. } => document_id,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&AnnotationEvent) -> anyhow::Result<()> + Send + Sync>;

pub struct EventBus {
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    sender: broadcast::Sender<AnnotationEvent>,
    next_id: AtomicU64,
}

impl EventBus {
    /// `capacity` bounds how far a broadcast receiver may lag before it starts
    /// missing events. It is clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self {
            listeners: RwLock::new(Vec::new()),
            sender,
            next_id: AtomicU64::new(0),
        }
    }

    /// The process-wide bus adapters use unless given their own
    pub fn global() -> Arc<EventBus> {
        static GLOBAL: OnceLock<Arc<EventBus>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(EventBus::default())))
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&AnnotationEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the listener was already gone
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn receiver(&self) -> broadcast::Receiver<AnnotationEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Deliver `event` to every listener and receiver.
    ///
    /// A listener that fails is logged and skipped. A panicking listener is
    /// treated the same way where panics unwind; under `panic = "abort"` it
    /// still takes the process down. Returns the number of listeners that
    /// accepted the event.
    pub fn emit(&self, event: AnnotationEvent) -> usize {
        tracing::debug!(
            "Emitting {} for document {}",
            event.name(),
            event.document_id()
        );

        // Listeners may subscribe from inside a callback
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        let mut delivered = 0;
        for listener in listeners {
            match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => tracing::warn!("Listener failed on {}: {:#}", event.name(), e),
                Err(_) => tracing::warn!("Listener panicked on {}", event.name()),
            }
        }

        // No receivers is not an error
        let _ = self.sender.send(event);
        delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

/// Await `call` and, if it succeeds, emit the event `payload` derives from its
/// result. Failures propagate unchanged and emit nothing; `payload` returning
/// `None` also suppresses the event.
pub async fn wrap_with_notification<T, Fut, P>(
    bus: &EventBus,
    call: Fut,
    payload: P,
) -> Result<T, StoreError>
where
    Fut: Future<Output = Result<T, StoreError>>,
    P: FnOnce(&T) -> Option<AnnotationEvent>,
{
    let result = call.await?;
    if let Some(event) = payload(&result) {
        bus.emit(event);
    }
    Ok(result)
}
