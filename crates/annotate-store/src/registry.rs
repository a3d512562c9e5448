//! The process-wide current adapter
//!
//! Collaborators that are not handed an adapter explicitly look up "the" adapter
//! here. Until one is installed the current adapter wraps [`AbstractBackend`],
//! so every call fails with [`StoreError::NotImplemented`].

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use annotate_types::Annotation;

use crate::adapter::{SharedAdapter, StoreAdapter};
use crate::backend::{AbstractBackend, StoreBackend};
use crate::error::StoreError;

fn slot() -> &'static RwLock<Arc<SharedAdapter>> {
    static CURRENT: OnceLock<RwLock<Arc<SharedAdapter>>> = OnceLock::new();
    CURRENT.get_or_init(|| RwLock::new(Arc::new(abstract_adapter())))
}

fn abstract_adapter() -> SharedAdapter {
    StoreAdapter::new(AbstractBackend).into_shared()
}

/// The adapter currently installed
pub fn store_adapter() -> Arc<SharedAdapter> {
    Arc::clone(&slot().read().unwrap_or_else(PoisonError::into_inner))
}

/// Install `adapter` as the current adapter and return the one it replaces.
///
/// Callers already holding the previous adapter keep using it.
pub fn set_store_adapter<B>(adapter: StoreAdapter<B>) -> Arc<SharedAdapter>
where
    B: StoreBackend + 'static,
{
    let adapter = Arc::new(adapter.into_shared());
    let mut current = slot().write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!("Installing store adapter");
    std::mem::replace(&mut *current, adapter)
}

/// Put back the abstract adapter
pub fn reset_store_adapter() -> Arc<SharedAdapter> {
    let mut current = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, Arc::new(abstract_adapter()))
}

/// Annotations of one page, read through the current adapter
pub async fn get_annotations(
    document_id: &str,
    page_number: u32,
) -> Result<Vec<Annotation>, StoreError> {
    store_adapter()
        .get_annotations(document_id, page_number)
        .await
}
