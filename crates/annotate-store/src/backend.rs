//! Persistence backend interface
//!
//! A backend stores annotations and comments however it likes (memory, local
//! storage, a remote API). Every operation is optional: the default body fails
//! with [`StoreError::NotImplemented`] naming the operation, so a backend only
//! overrides what it supports.
//!
//! Backends see raw calls. Event emission and `document_id` stamping are the
//! adapter's job; see [`crate::StoreAdapter`].

use annotate_types::{Annotation, Comment, HistoryStatus};
use async_trait::async_trait;

use crate::error::StoreError;
use crate::operation::Operation;

#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn get_all_annotations(&self, _document_id: &str) -> Result<Vec<Annotation>, StoreError> {
        Err(StoreError::NotImplemented(Operation::GetAllAnnotations))
    }

    async fn get_annotations(
        &self,
        _document_id: &str,
        _page_number: u32,
    ) -> Result<Vec<Annotation>, StoreError> {
        Err(StoreError::NotImplemented(Operation::GetAnnotations))
    }

    /// `Ok(None)` when the annotation does not exist
    async fn get_annotation(
        &self,
        _document_id: &str,
        _annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        Err(StoreError::NotImplemented(Operation::GetAnnotation))
    }

    /// Persist a new annotation and return it as stored (typically with a uuid)
    async fn add_annotation(
        &self,
        _document_id: &str,
        _page_number: u32,
        _annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        Err(StoreError::NotImplemented(Operation::AddAnnotation))
    }

    async fn edit_annotation(
        &self,
        _document_id: &str,
        _annotation_id: &str,
        _annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        Err(StoreError::NotImplemented(Operation::EditAnnotation))
    }

    /// `Ok(false)` when nothing was deleted
    async fn delete_annotation(
        &self,
        _document_id: &str,
        _annotation_id: &str,
    ) -> Result<bool, StoreError> {
        Err(StoreError::NotImplemented(Operation::DeleteAnnotation))
    }

    async fn get_comments(
        &self,
        _document_id: &str,
        _annotation_id: &str,
    ) -> Result<Vec<Comment>, StoreError> {
        Err(StoreError::NotImplemented(Operation::GetComments))
    }

    async fn add_comment(
        &self,
        _document_id: &str,
        _annotation_id: &str,
        _content: &str,
    ) -> Result<Comment, StoreError> {
        Err(StoreError::NotImplemented(Operation::AddComment))
    }

    async fn delete_comment(&self, _document_id: &str, _comment_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::NotImplemented(Operation::DeleteComment))
    }

    async fn undo(&self, _document_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::NotImplemented(Operation::Undo))
    }

    async fn redo(&self, _document_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::NotImplemented(Operation::Redo))
    }

    async fn clear_history(&self, _document_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::NotImplemented(Operation::ClearHistory))
    }

    async fn history_status(&self, _document_id: &str) -> Result<HistoryStatus, StoreError> {
        Err(StoreError::NotImplemented(Operation::HistoryStatus))
    }
}

/// Backend that implements no operation. Every call fails with
/// [`StoreError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstractBackend;

impl StoreBackend for AbstractBackend {}

#[async_trait]
impl<B: StoreBackend + ?Sized> StoreBackend for std::sync::Arc<B> {
    async fn get_all_annotations(&self, document_id: &str) -> Result<Vec<Annotation>, StoreError> {
        (**self).get_all_annotations(document_id).await
    }

    async fn get_annotations(
        &self,
        document_id: &str,
        page_number: u32,
    ) -> Result<Vec<Annotation>, StoreError> {
        (**self).get_annotations(document_id, page_number).await
    }

    async fn get_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        (**self).get_annotation(document_id, annotation_id).await
    }

    async fn add_annotation(
        &self,
        document_id: &str,
        page_number: u32,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        (**self).add_annotation(document_id, page_number, annotation).await
    }

    async fn edit_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        (**self)
            .edit_annotation(document_id, annotation_id, annotation)
            .await
    }

    async fn delete_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<bool, StoreError> {
        (**self).delete_annotation(document_id, annotation_id).await
    }

    async fn get_comments(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Vec<Comment>, StoreError> {
        (**self).get_comments(document_id, annotation_id).await
    }

    async fn add_comment(
        &self,
        document_id: &str,
        annotation_id: &str,
        content: &str,
    ) -> Result<Comment, StoreError> {
        (**self).add_comment(document_id, annotation_id, content).await
    }

    async fn delete_comment(&self, document_id: &str, comment_id: &str) -> Result<bool, StoreError> {
        (**self).delete_comment(document_id, comment_id).await
    }

    async fn undo(&self, document_id: &str) -> Result<bool, StoreError> {
        (**self).undo(document_id).await
    }

    async fn redo(&self, document_id: &str) -> Result<bool, StoreError> {
        (**self).redo(document_id).await
    }

    async fn clear_history(&self, document_id: &str) -> Result<bool, StoreError> {
        (**self).clear_history(document_id).await
    }

    async fn history_status(&self, document_id: &str) -> Result<HistoryStatus, StoreError> {
        (**self).history_status(document_id).await
    }
}
