//! Contract tests for the store adapter
//!
//! Runs the adapter against an in-memory backend and against definitions
//! assembled from handlers, checking stamping and event emission.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use annotate_store::{
    AnnotationEvent, BackendDefinition, EventBus, Handler, Operation, StoreAdapter,
    StoreBackend, StoreConfig, StoreError, UnknownOperationPolicy,
};
use annotate_types::{Annotation, AnnotationKind, Comment, Geometry, HistoryStatus, Rect};
use async_trait::async_trait;
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================
// Test doubles
// ============================================================

/// In-memory backend that assigns uuids and keeps per-document lists
#[derive(Default)]
struct MemoryBackend {
    annotations: Mutex<HashMap<String, Vec<Annotation>>>,
    comments: Mutex<Vec<(String, Comment)>>,
}

impl MemoryBackend {
    /// Seed a record exactly as given, including a possibly wrong document id
    fn seed(&self, document_id: &str, annotation: Annotation) {
        self.annotations
            .lock()
            .unwrap()
            .entry(document_id.to_string())
            .or_default()
            .push(annotation);
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn get_all_annotations(&self, document_id: &str) -> Result<Vec<Annotation>, StoreError> {
        Ok(self
            .annotations
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_annotations(
        &self,
        document_id: &str,
        page_number: u32,
    ) -> Result<Vec<Annotation>, StoreError> {
        let all = self.get_all_annotations(document_id).await?;
        Ok(all
            .into_iter()
            .filter(|a| a.page_number == Some(page_number))
            .collect())
    }

    async fn get_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        let all = self.get_all_annotations(document_id).await?;
        Ok(all
            .into_iter()
            .find(|a| a.uuid.as_deref() == Some(annotation_id)))
    }

    async fn add_annotation(
        &self,
        document_id: &str,
        page_number: u32,
        mut annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        annotation.uuid = Some(uuid::Uuid::new_v4().to_string());
        annotation.page_number = Some(page_number);
        annotation.document_id = Some(document_id.to_string());
        self.seed(document_id, annotation.clone());
        Ok(annotation)
    }

    async fn edit_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
        mut annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        let mut annotations = self.annotations.lock().unwrap();
        let stored = annotations
            .get_mut(document_id)
            .and_then(|list| {
                list.iter_mut()
                    .find(|a| a.uuid.as_deref() == Some(annotation_id))
            })
            .ok_or_else(|| anyhow::anyhow!("no annotation {}", annotation_id))?;
        annotation.uuid = Some(annotation_id.to_string());
        annotation.page_number = stored.page_number;
        *stored = annotation.clone();
        Ok(annotation)
    }

    async fn delete_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<bool, StoreError> {
        let mut annotations = self.annotations.lock().unwrap();
        let Some(list) = annotations.get_mut(document_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|a| a.uuid.as_deref() != Some(annotation_id));
        Ok(list.len() != before)
    }

    async fn get_comments(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|(doc, c)| doc == document_id && c.annotation_id == annotation_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn add_comment(
        &self,
        document_id: &str,
        annotation_id: &str,
        content: &str,
    ) -> Result<Comment, StoreError> {
        let mut comment = Comment::new(annotation_id, content);
        comment.id = Some(uuid::Uuid::new_v4().to_string());
        comment.document_id = Some(document_id.to_string());
        self.comments
            .lock()
            .unwrap()
            .push((document_id.to_string(), comment.clone()));
        Ok(comment)
    }

    async fn delete_comment(&self, document_id: &str, comment_id: &str) -> Result<bool, StoreError> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|(doc, c)| !(doc == document_id && c.id.as_deref() == Some(comment_id)));
        Ok(comments.len() != before)
    }
}

/// Backend that implements nothing
struct EmptyBackend;

impl StoreBackend for EmptyBackend {}

fn rectangle() -> Annotation {
    Annotation::new(
        AnnotationKind::Rectangle,
        Geometry::Rect(Rect::new(10.0, 20.0, 30.0, 40.0)),
    )
    .with_field("color", "0000FF")
}

/// Adapter on an isolated bus plus a log of everything emitted
fn adapter<B: StoreBackend>(backend: B) -> (StoreAdapter<B>, Arc<Mutex<Vec<AnnotationEvent>>>) {
    init_tracing();
    let bus = Arc::new(EventBus::default());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    bus.subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
        Ok(())
    });
    (StoreAdapter::with_notifier(backend, bus), events)
}

// ============================================================
// Reads
// ============================================================

#[tokio::test]
async fn get_annotations_stamps_document_id() {
    let backend = MemoryBackend::default();
    let mut foreign = rectangle().with_uuid("a1");
    foreign.page_number = Some(1);
    foreign.document_id = Some("some-other-doc".to_string());
    backend.seed("doc1", foreign);
    let mut unstamped = rectangle().with_uuid("a2");
    unstamped.page_number = Some(2);
    backend.seed("doc1", unstamped);

    let (adapter, events) = adapter(backend);

    let page = adapter.get_annotations("doc1", 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].document_id.as_deref(), Some("doc1"));

    let all = adapter.get_all_annotations("doc1").await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|a| a.document_id.as_deref() == Some("doc1")));

    let single = adapter.get_annotation("doc1", "a2").await.unwrap().unwrap();
    assert_eq!(single.document_id.as_deref(), Some("doc1"));

    assert!(events.lock().unwrap().is_empty(), "reads must not emit");
}

#[tokio::test]
async fn missing_annotation_is_none() {
    let (adapter, _) = adapter(MemoryBackend::default());
    assert_eq!(adapter.get_annotation("doc1", "nope").await.unwrap(), None);
    assert!(adapter.get_all_annotations("doc1").await.unwrap().is_empty());
}

// ============================================================
// Mutations
// ============================================================

#[tokio::test]
async fn add_annotation_emits_once_with_stored_annotation() {
    let (adapter, events) = adapter(MemoryBackend::default());

    let added = adapter.add_annotation("doc1", 1, rectangle()).await.unwrap();
    assert!(added.uuid.is_some());
    assert_eq!(added.kind, AnnotationKind::Rectangle);

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![AnnotationEvent::AnnotationAdded {
            document_id: "doc1".to_string(),
            page_number: 1,
            annotation: added.clone(),
        }]
    );
}

#[tokio::test]
async fn delete_annotation_emits_only_on_success() {
    let (adapter, events) = adapter(MemoryBackend::default());
    let added = adapter.add_annotation("doc1", 1, rectangle()).await.unwrap();
    let uuid = added.uuid.unwrap();
    events.lock().unwrap().clear();

    assert!(!adapter.delete_annotation("doc1", "unknown").await.unwrap());
    assert!(events.lock().unwrap().is_empty());

    assert!(adapter.delete_annotation("doc1", &uuid).await.unwrap());
    assert_eq!(
        *events.lock().unwrap(),
        vec![AnnotationEvent::AnnotationDeleted {
            document_id: "doc1".to_string(),
            annotation_id: uuid.clone(),
        }]
    );

    // Already gone
    assert!(!adapter.delete_annotation("doc1", &uuid).await.unwrap());
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn edit_annotation_emits_edit_with_stored_annotation() {
    let (adapter, events) = adapter(MemoryBackend::default());
    let added = adapter.add_annotation("doc1", 4, rectangle()).await.unwrap();
    let uuid = added.uuid.clone().unwrap();
    events.lock().unwrap().clear();

    let moved = Annotation::new(
        AnnotationKind::Rectangle,
        Geometry::Rect(Rect::new(50.0, 60.0, 30.0, 40.0)),
    )
    .with_field("color", "00FF00");
    let edited = adapter.edit_annotation("doc1", &uuid, moved).await.unwrap();
    assert_eq!(edited.uuid.as_deref(), Some(uuid.as_str()));
    assert_eq!(edited.page_number, Some(4));

    assert_eq!(
        *events.lock().unwrap(),
        vec![AnnotationEvent::AnnotationEdited {
            document_id: "doc1".to_string(),
            annotation_id: uuid.clone(),
            annotation: edited.clone(),
        }]
    );
    assert_eq!(
        adapter.get_annotation("doc1", &uuid).await.unwrap().unwrap().geometry,
        edited.geometry
    );
}

#[tokio::test]
async fn comments_emit_add_and_successful_delete() {
    let (adapter, events) = adapter(MemoryBackend::default());

    let comment = adapter.add_comment("doc1", "a1", "Looks good").await.unwrap();
    let comment_id = comment.id.clone().unwrap();
    assert_eq!(
        adapter.get_comments("doc1", "a1").await.unwrap(),
        vec![comment.clone()]
    );

    assert!(!adapter.delete_comment("doc1", "missing").await.unwrap());
    assert!(adapter.delete_comment("doc1", &comment_id).await.unwrap());

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            AnnotationEvent::CommentAdded {
                document_id: "doc1".to_string(),
                annotation_id: "a1".to_string(),
                comment: comment.clone(),
            },
            AnnotationEvent::CommentDeleted {
                document_id: "doc1".to_string(),
                comment_id,
            },
        ]
    );
}

#[tokio::test]
async fn backend_failure_propagates_without_event() {
    let definition = BackendDefinition::default()
        .define(
            "editAnnotation",
            Handler::edit_annotation(|_, _, _| async {
                Err(StoreError::Backend(anyhow::anyhow!("disk full")))
            }),
        )
        .unwrap();
    let (adapter, events) = adapter(definition);

    let err = adapter
        .edit_annotation("doc1", "a1", rectangle())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert!(events.lock().unwrap().is_empty());
}

// ============================================================
// History
// ============================================================

#[tokio::test]
async fn history_passes_through_without_events() {
    let definition = BackendDefinition::from_entries(
        UnknownOperationPolicy::Reject,
        vec![
            ("undo", Handler::undo(|_| async { Ok(true) })),
            ("redo", Handler::redo(|_| async { Ok(false) })),
            ("clearHistory", Handler::clear_history(|_| async { Ok(true) })),
            (
                "historyStatus",
                Handler::history_status(|_| async { Ok(HistoryStatus::from([true, false, true])) }),
            ),
        ],
    )
    .unwrap();
    let (adapter, events) = adapter(definition);

    assert!(adapter.undo("doc1").await.unwrap());
    assert!(!adapter.redo("doc1").await.unwrap());
    assert!(adapter.clear_history("doc1").await.unwrap());
    assert_eq!(
        adapter.history_status("doc1").await.unwrap(),
        HistoryStatus {
            can_undo: true,
            can_redo: false,
            can_clear: true,
        }
    );
    assert!(events.lock().unwrap().is_empty());
}

// ============================================================
// Definitions
// ============================================================

#[tokio::test]
async fn unimplemented_operation_is_named() {
    let (adapter, events) = adapter(EmptyBackend);

    let err = adapter.add_annotation("doc1", 1, rectangle()).await.unwrap_err();
    assert_eq!(err.missing_operation(), Some(Operation::AddAnnotation));
    assert!(err.to_string().contains("addAnnotation"));

    let err = adapter.history_status("doc1").await.unwrap_err();
    assert!(err.to_string().contains("historyStatus"));
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn definition_handlers_receive_arguments() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let definition = BackendDefinition::default()
        .define(
            "getAnnotations",
            Handler::get_annotations(move |doc, page| {
                log.lock().unwrap().push(format!("{}#{}", doc, page));
                async { Ok(vec![rectangle().with_uuid("a1")]) }
            }),
        )
        .unwrap();
    let (adapter, _) = adapter(definition);

    let page = adapter.get_annotations("lease.pdf", 3).await.unwrap();
    assert_eq!(page[0].document_id.as_deref(), Some("lease.pdf"));
    assert_eq!(*seen.lock().unwrap(), vec!["lease.pdf#3".to_string()]);

    let err = adapter.get_all_annotations("lease.pdf").await.unwrap_err();
    assert_eq!(err.missing_operation(), Some(Operation::GetAllAnnotations));
}

#[tokio::test]
async fn unknown_definition_keys_follow_config_policy() {
    let config = StoreConfig::from_str("[store]\nunknown_operations = \"reject\"\n").unwrap();
    let result = BackendDefinition::from_config(&config)
        .define("getAnnotatons", Handler::get_annotations(|_, _| async { Ok(Vec::new()) }));
    assert!(matches!(result, Err(StoreError::UnknownOperation(name)) if name == "getAnnotatons"));

    let lenient = BackendDefinition::from_config(&StoreConfig::default())
        .define("getAnnotatons", Handler::get_annotations(|_, _| async { Ok(Vec::new()) }))
        .unwrap();
    assert!(!lenient.implements(Operation::GetAnnotations));
}

// ============================================================
// Notification bus
// ============================================================

#[tokio::test]
async fn failing_listener_does_not_block_others() {
    init_tracing();
    let bus = Arc::new(EventBus::default());
    bus.subscribe(|_| anyhow::bail!("listener exploded"));
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    bus.subscribe(move |event| {
        sink.lock().unwrap().push(event.name());
        Ok(())
    });

    let adapter = StoreAdapter::with_notifier(MemoryBackend::default(), Arc::clone(&bus));
    let added = adapter.add_annotation("doc1", 1, rectangle()).await.unwrap();
    adapter
        .delete_annotation("doc1", added.uuid.as_deref().unwrap())
        .await
        .unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec!["annotation:add", "annotation:delete"]
    );
}

#[tokio::test]
async fn broadcast_receivers_see_events_in_order() {
    let config = StoreConfig::from_str("[events]\ncapacity = 4\n").unwrap();
    let adapter = StoreAdapter::with_config(MemoryBackend::default(), &config);
    let mut rx = adapter.bus().receiver();

    let added = adapter.add_annotation("doc1", 2, rectangle()).await.unwrap();
    let uuid = added.uuid.clone().unwrap();
    adapter.delete_annotation("doc1", &uuid).await.unwrap();

    let first = rx.recv().await.unwrap();
    assert_eq!(first.name(), "annotation:add");
    assert_eq!(first.document_id(), "doc1");
    let second = rx.recv().await.unwrap();
    assert_eq!(
        second,
        AnnotationEvent::AnnotationDeleted {
            document_id: "doc1".to_string(),
            annotation_id: uuid,
        }
    );
}
