//! Store adapter for annotation persistence
//!
//! Wraps a pluggable [`StoreBackend`] so that every backend gets the same
//! document-id stamping and change notifications. Backends can be written as a
//! trait impl or assembled at runtime from named handlers with
//! [`BackendDefinition`].

pub mod adapter;
pub mod backend;
pub mod config;
pub mod definition;
pub mod error;
pub mod events;
pub mod operation;
pub mod registry;

pub use adapter::{SharedAdapter, StoreAdapter};
pub use backend::{AbstractBackend, StoreBackend};
pub use config::StoreConfig;
pub use definition::{BackendDefinition, Handler, UnknownOperationPolicy};
pub use error::StoreError;
pub use events::{wrap_with_notification, AnnotationEvent, EventBus, ListenerId};
pub use operation::Operation;
pub use registry::{get_annotations, reset_store_adapter, set_store_adapter, store_adapter};
