//! The store adapter
//!
//! [`StoreAdapter`] is the only way the rest of the overlay talks to a backend.
//! It applies the same post-processing whatever the backend does:
//! - reads stamp the requested `document_id` onto every returned annotation
//! - successful mutations are announced on the event bus
//! - deletes announce only when something was actually deleted
//!
//! Backend failures propagate unchanged and are never retried.

use std::sync::Arc;

use annotate_types::{Annotation, Comment, HistoryStatus};

use crate::backend::StoreBackend;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::events::{wrap_with_notification, AnnotationEvent, EventBus};

/// Adapter over a type-erased backend
pub type SharedAdapter = StoreAdapter<Arc<dyn StoreBackend>>;

pub struct StoreAdapter<B> {
    backend: B,
    bus: Arc<EventBus>,
}

impl<B: StoreBackend> StoreAdapter<B> {
    /// Adapter publishing on [`EventBus::global`]
    pub fn new(backend: B) -> Self {
        Self::with_notifier(backend, EventBus::global())
    }

    /// Adapter publishing on its own bus
    pub fn with_notifier(backend: B, bus: Arc<EventBus>) -> Self {
        Self { backend, bus }
    }

    /// Adapter with an isolated bus sized from `config`
    pub fn with_config(backend: B, config: &StoreConfig) -> Self {
        Self::with_notifier(backend, Arc::new(EventBus::new(config.events.capacity)))
    }

    /// Erase the backend type so the adapter can be installed process-wide
    pub fn into_shared(self) -> SharedAdapter
    where
        B: 'static,
    {
        StoreAdapter {
            backend: Arc::new(self.backend),
            bus: self.bus,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub async fn get_all_annotations(&self, document_id: &str) -> Result<Vec<Annotation>, StoreError> {
        tracing::debug!("getAllAnnotations document={}", document_id);
        let annotations = self.backend.get_all_annotations(document_id).await?;
        Ok(stamp_all(annotations, document_id))
    }

    pub async fn get_annotations(
        &self,
        document_id: &str,
        page_number: u32,
    ) -> Result<Vec<Annotation>, StoreError> {
        tracing::debug!("getAnnotations document={} page={}", document_id, page_number);
        let annotations = self
            .backend
            .get_annotations(document_id, page_number)
            .await?;
        Ok(stamp_all(annotations, document_id))
    }

    pub async fn get_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        tracing::debug!("getAnnotation document={} id={}", document_id, annotation_id);
        let annotation = self
            .backend
            .get_annotation(document_id, annotation_id)
            .await?;
        Ok(annotation.map(|a| stamp(a, document_id)))
    }

    /// Returns the backend's annotation unchanged
    pub async fn add_annotation(
        &self,
        document_id: &str,
        page_number: u32,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        tracing::debug!("addAnnotation document={} page={}", document_id, page_number);
        wrap_with_notification(
            &self.bus,
            self.backend
                .add_annotation(document_id, page_number, annotation),
            |added| {
                Some(AnnotationEvent::AnnotationAdded {
                    document_id: document_id.to_string(),
                    page_number,
                    annotation: added.clone(),
                })
            },
        )
        .await
    }

    pub async fn edit_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        tracing::debug!("editAnnotation document={} id={}", document_id, annotation_id);
        wrap_with_notification(
            &self.bus,
            self.backend
                .edit_annotation(document_id, annotation_id, annotation),
            |edited| {
                Some(AnnotationEvent::AnnotationEdited {
                    document_id: document_id.to_string(),
                    annotation_id: annotation_id.to_string(),
                    annotation: edited.clone(),
                })
            },
        )
        .await
    }

    pub async fn delete_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<bool, StoreError> {
        tracing::debug!("deleteAnnotation document={} id={}", document_id, annotation_id);
        wrap_with_notification(
            &self.bus,
            self.backend.delete_annotation(document_id, annotation_id),
            |deleted| {
                deleted.then(|| AnnotationEvent::AnnotationDeleted {
                    document_id: document_id.to_string(),
                    annotation_id: annotation_id.to_string(),
                })
            },
        )
        .await
    }

    pub async fn get_comments(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Vec<Comment>, StoreError> {
        tracing::debug!("getComments document={} annotation={}", document_id, annotation_id);
        self.backend.get_comments(document_id, annotation_id).await
    }

    pub async fn add_comment(
        &self,
        document_id: &str,
        annotation_id: &str,
        content: &str,
    ) -> Result<Comment, StoreError> {
        tracing::debug!("addComment document={} annotation={}", document_id, annotation_id);
        wrap_with_notification(
            &self.bus,
            self.backend.add_comment(document_id, annotation_id, content),
            |comment| {
                Some(AnnotationEvent::CommentAdded {
                    document_id: document_id.to_string(),
                    annotation_id: annotation_id.to_string(),
                    comment: comment.clone(),
                })
            },
        )
        .await
    }

    pub async fn delete_comment(&self, document_id: &str, comment_id: &str) -> Result<bool, StoreError> {
        tracing::debug!("deleteComment document={} id={}", document_id, comment_id);
        wrap_with_notification(
            &self.bus,
            self.backend.delete_comment(document_id, comment_id),
            |deleted| {
                deleted.then(|| AnnotationEvent::CommentDeleted {
                    document_id: document_id.to_string(),
                    comment_id: comment_id.to_string(),
                })
            },
        )
        .await
    }

    pub async fn undo(&self, document_id: &str) -> Result<bool, StoreError> {
        let done = self.backend.undo(document_id).await?;
        tracing::debug!("undo document={} done={}", document_id, done);
        Ok(done)
    }

    pub async fn redo(&self, document_id: &str) -> Result<bool, StoreError> {
        let done = self.backend.redo(document_id).await?;
        tracing::debug!("redo document={} done={}", document_id, done);
        Ok(done)
    }

    pub async fn clear_history(&self, document_id: &str) -> Result<bool, StoreError> {
        let done = self.backend.clear_history(document_id).await?;
        tracing::debug!("clearHistory document={} done={}", document_id, done);
        Ok(done)
    }

    pub async fn history_status(&self, document_id: &str) -> Result<HistoryStatus, StoreError> {
        tracing::debug!("historyStatus document={}", document_id);
        self.backend.history_status(document_id).await
    }
}

impl<B> std::fmt::Debug for StoreAdapter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

fn stamp(mut annotation: Annotation, document_id: &str) -> Annotation {
    annotation.document_id = Some(document_id.to_string());
    annotation
}

fn stamp_all(annotations: Vec<Annotation>, document_id: &str) -> Vec<Annotation> {
    annotations
        .into_iter()
        .map(|annotation| stamp(annotation, document_id))
        .collect()
}
