//! Backends assembled from named handlers
//!
//! A [`BackendDefinition`] is built from `(name, Handler)` pairs, where the name
//! is the operation's camelCase name (`"getAnnotations"`, `"addComment"`, ...).
//! A handler is installed only when its name matches the operation it
//! implements. Anything else is flagged according to the
//! [`UnknownOperationPolicy`], so a typo never silently leaves an operation
//! unimplemented.

use std::collections::HashMap;
use std::future::Future;

use annotate_types::{Annotation, Comment, HistoryStatus};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use crate::backend::StoreBackend;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::operation::Operation;

/// What to do with a definition entry whose name matches no operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownOperationPolicy {
    /// Log a warning and ignore the entry
    #[default]
    Warn,
    /// Fail with [`StoreError::UnknownOperation`]
    Reject,
}

type Reply<T> = BoxFuture<'static, Result<T, StoreError>>;

/// An async handler for one operation. Arguments are passed owned.
pub enum Handler {
    GetAllAnnotations(Box<dyn Fn(String) -> Reply<Vec<Annotation>> + Send + Sync>),
    GetAnnotations(Box<dyn Fn(String, u32) -> Reply<Vec<Annotation>> + Send + Sync>),
    GetAnnotation(Box<dyn Fn(String, String) -> Reply<Option<Annotation>> + Send + Sync>),
    AddAnnotation(Box<dyn Fn(String, u32, Annotation) -> Reply<Annotation> + Send + Sync>),
    EditAnnotation(Box<dyn Fn(String, String, Annotation) -> Reply<Annotation> + Send + Sync>),
    DeleteAnnotation(Box<dyn Fn(String, String) -> Reply<bool> + Send + Sync>),
    GetComments(Box<dyn Fn(String, String) -> Reply<Vec<Comment>> + Send + Sync>),
    AddComment(Box<dyn Fn(String, String, String) -> Reply<Comment> + Send + Sync>),
    DeleteComment(Box<dyn Fn(String, String) -> Reply<bool> + Send + Sync>),
    Undo(Box<dyn Fn(String) -> Reply<bool> + Send + Sync>),
    Redo(Box<dyn Fn(String) -> Reply<bool> + Send + Sync>),
    ClearHistory(Box<dyn Fn(String) -> Reply<bool> + Send + Sync>),
    HistoryStatus(Box<dyn Fn(String) -> Reply<HistoryStatus> + Send + Sync>),
}

impl Handler {
    pub fn operation(&self) -> Operation {
        match self {
            Handler::GetAllAnnotations(_) => Operation::GetAllAnnotations,
            Handler::GetAnnotations(_) => Operation::GetAnnotations,
            Handler::GetAnnotation(_) => Operation::GetAnnotation,
            Handler::AddAnnotation(_) => Operation::AddAnnotation,
            Handler::EditAnnotation(_) => Operation::EditAnnotation,
            Handler::DeleteAnnotation(_) => Operation::DeleteAnnotation,
            Handler::GetComments(_) => Operation::GetComments,
            Handler::AddComment(_) => Operation::AddComment,
            Handler::DeleteComment(_) => Operation::DeleteComment,
            Handler::Undo(_) => Operation::Undo,
            Handler::Redo(_) => Operation::Redo,
            Handler::ClearHistory(_) => Operation::ClearHistory,
            Handler::HistoryStatus(_) => Operation::HistoryStatus,
        }
    }

    pub fn get_all_annotations<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Annotation>, StoreError>> + Send + 'static,
    {
        Handler::GetAllAnnotations(Box::new(move |doc| f(doc).boxed()))
    }

    pub fn get_annotations<F, Fut>(f: F) -> Self
    where
        F: Fn(String, u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Annotation>, StoreError>> + Send + 'static,
    {
        Handler::GetAnnotations(Box::new(move |doc, page| f(doc, page).boxed()))
    }

    pub fn get_annotation<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Annotation>, StoreError>> + Send + 'static,
    {
        Handler::GetAnnotation(Box::new(move |doc, id| f(doc, id).boxed()))
    }

    pub fn add_annotation<F, Fut>(f: F) -> Self
    where
        F: Fn(String, u32, Annotation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Annotation, StoreError>> + Send + 'static,
    {
        Handler::AddAnnotation(Box::new(move |doc, page, annotation| {
            f(doc, page, annotation).boxed()
        }))
    }

    pub fn edit_annotation<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String, Annotation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Annotation, StoreError>> + Send + 'static,
    {
        Handler::EditAnnotation(Box::new(move |doc, id, annotation| {
            f(doc, id, annotation).boxed()
        }))
    }

    pub fn delete_annotation<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, StoreError>> + Send + 'static,
    {
        Handler::DeleteAnnotation(Box::new(move |doc, id| f(doc, id).boxed()))
    }

    pub fn get_comments<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Comment>, StoreError>> + Send + 'static,
    {
        Handler::GetComments(Box::new(move |doc, id| f(doc, id).boxed()))
    }

    pub fn add_comment<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Comment, StoreError>> + Send + 'static,
    {
        Handler::AddComment(Box::new(move |doc, id, content| {
            f(doc, id, content).boxed()
        }))
    }

    pub fn delete_comment<F, Fut>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, StoreError>> + Send + 'static,
    {
        Handler::DeleteComment(Box::new(move |doc, id| f(doc, id).boxed()))
    }

    pub fn undo<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, StoreError>> + Send + 'static,
    {
        Handler::Undo(Box::new(move |doc| f(doc).boxed()))
    }

    pub fn redo<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, StoreError>> + Send + 'static,
    {
        Handler::Redo(Box::new(move |doc| f(doc).boxed()))
    }

    pub fn clear_history<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, StoreError>> + Send + 'static,
    {
        Handler::ClearHistory(Box::new(move |doc| f(doc).boxed()))
    }

    pub fn history_status<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HistoryStatus, StoreError>> + Send + 'static,
    {
        Handler::HistoryStatus(Box::new(move |doc| f(doc).boxed()))
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Handler").field(&self.operation()).finish()
    }
}

/// A [`StoreBackend`] whose operations are supplied as named handlers
#[derive(Debug, Default)]
pub struct BackendDefinition {
    policy: UnknownOperationPolicy,
    handlers: HashMap<Operation, Handler>,
}

impl BackendDefinition {
    pub fn new(policy: UnknownOperationPolicy) -> Self {
        Self {
            policy,
            handlers: HashMap::new(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.store.unknown_operations)
    }

    /// Build a definition from `(name, handler)` entries in one go
    pub fn from_entries<I, S>(policy: UnknownOperationPolicy, entries: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(Self::new(policy), |definition, (name, handler)| {
                definition.define(name.as_ref(), handler)
            })
    }

    /// Install `handler` under `name`.
    ///
    /// `name` must be exactly the name of the handler's operation. A later entry
    /// for the same operation replaces the earlier one.
    ///
    /// # Errors
    /// [`StoreError::UnknownOperation`] for a mismatched name under
    /// [`UnknownOperationPolicy::Reject`].
    pub fn define(mut self, name: &str, handler: Handler) -> Result<Self, StoreError> {
        let operation = handler.operation();
        if name == operation.as_str() {
            self.handlers.insert(operation, handler);
            return Ok(self);
        }

        match self.policy {
            UnknownOperationPolicy::Warn => {
                tracing::warn!(
                    "Ignoring store definition entry {:?}: expected {:?} for this handler",
                    name,
                    operation.as_str()
                );
                Ok(self)
            }
            UnknownOperationPolicy::Reject => Err(StoreError::UnknownOperation(name.to_string())),
        }
    }

    pub fn policy(&self) -> UnknownOperationPolicy {
        self.policy
    }

    pub fn implements(&self, operation: Operation) -> bool {
        self.handlers.contains_key(&operation)
    }

    /// Implemented operations in canonical order
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.implements(*op))
            .collect()
    }
}

#[async_trait]
impl StoreBackend for BackendDefinition {
    async fn get_all_annotations(&self, document_id: &str) -> Result<Vec<Annotation>, StoreError> {
        match self.handlers.get(&Operation::GetAllAnnotations) {
            Some(Handler::GetAllAnnotations(f)) => f(document_id.to_string()).await,
            _ => Err(StoreError::NotImplemented(Operation::GetAllAnnotations)),
        }
    }

    async fn get_annotations(
        &self,
        document_id: &str,
        page_number: u32,
    ) -> Result<Vec<Annotation>, StoreError> {
        match self.handlers.get(&Operation::GetAnnotations) {
            Some(Handler::GetAnnotations(f)) => f(document_id.to_string(), page_number).await,
            _ => Err(StoreError::NotImplemented(Operation::GetAnnotations)),
        }
    }

    async fn get_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, StoreError> {
        match self.handlers.get(&Operation::GetAnnotation) {
            Some(Handler::GetAnnotation(f)) => {
                f(document_id.to_string(), annotation_id.to_string()).await
            }
            _ => Err(StoreError::NotImplemented(Operation::GetAnnotation)),
        }
    }

    async fn add_annotation(
        &self,
        document_id: &str,
        page_number: u32,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        match self.handlers.get(&Operation::AddAnnotation) {
            Some(Handler::AddAnnotation(f)) => {
                f(document_id.to_string(), page_number, annotation).await
            }
            _ => Err(StoreError::NotImplemented(Operation::AddAnnotation)),
        }
    }

    async fn edit_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
        annotation: Annotation,
    ) -> Result<Annotation, StoreError> {
        match self.handlers.get(&Operation::EditAnnotation) {
            Some(Handler::EditAnnotation(f)) => {
                f(document_id.to_string(), annotation_id.to_string(), annotation).await
            }
            _ => Err(StoreError::NotImplemented(Operation::EditAnnotation)),
        }
    }

    async fn delete_annotation(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<bool, StoreError> {
        match self.handlers.get(&Operation::DeleteAnnotation) {
            Some(Handler::DeleteAnnotation(f)) => {
                f(document_id.to_string(), annotation_id.to_string()).await
            }
            _ => Err(StoreError::NotImplemented(Operation::DeleteAnnotation)),
        }
    }

    async fn get_comments(
        &self,
        document_id: &str,
        annotation_id: &str,
    ) -> Result<Vec<Comment>, StoreError> {
        match self.handlers.get(&Operation::GetComments) {
            Some(Handler::GetComments(f)) => {
                f(document_id.to_string(), annotation_id.to_string()).await
            }
            _ => Err(StoreError::NotImplemented(Operation::GetComments)),
        }
    }

    async fn add_comment(
        &self,
        document_id: &str,
        annotation_id: &str,
        content: &str,
    ) -> Result<Comment, StoreError> {
        match self.handlers.get(&Operation::AddComment) {
            Some(Handler::AddComment(f)) => {
                f(
                    document_id.to_string(),
                    annotation_id.to_string(),
                    content.to_string(),
                )
                .await
            }
            _ => Err(StoreError::NotImplemented(Operation::AddComment)),
        }
    }

    async fn delete_comment(&self, document_id: &str, comment_id: &str) -> Result<bool, StoreError> {
        match self.handlers.get(&Operation::DeleteComment) {
            Some(Handler::DeleteComment(f)) => {
                f(document_id.to_string(), comment_id.to_string()).await
            }
            _ => Err(StoreError::NotImplemented(Operation::DeleteComment)),
        }
    }

    async fn undo(&self, document_id: &str) -> Result<bool, StoreError> {
        match self.handlers.get(&Operation::Undo) {
            Some(Handler::Undo(f)) => f(document_id.to_string()).await,
            _ => Err(StoreError::NotImplemented(Operation::Undo)),
        }
    }

    async fn redo(&self, document_id: &str) -> Result<bool, StoreError> {
        match self.handlers.get(&Operation::Redo) {
            Some(Handler::Redo(f)) => f(document_id.to_string()).await,
            _ => Err(StoreError::NotImplemented(Operation::Redo)),
        }
    }

    async fn clear_history(&self, document_id: &str) -> Result<bool, StoreError> {
        match self.handlers.get(&Operation::ClearHistory) {
            Some(Handler::ClearHistory(f)) => f(document_id.to_string()).await,
            _ => Err(StoreError::NotImplemented(Operation::ClearHistory)),
        }
    }

    async fn history_status(&self, document_id: &str) -> Result<HistoryStatus, StoreError> {
        match self.handlers.get(&Operation::HistoryStatus) {
            Some(Handler::HistoryStatus(f)) => f(document_id.to_string()).await,
            _ => Err(StoreError::NotImplemented(Operation::HistoryStatus)),
        }
    }
}
