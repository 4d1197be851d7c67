//! The key-value store seam.
//!
//! The function only ever needs three single-item calls keyed by `id`. The
//! store client is injected behind [`PostStore`] so handlers can be exercised
//! without AWS.

use async_trait::async_trait;
use thiserror::Error;

use crate::post::Post;

/// Failure reported by a [`PostStore`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transport, service or SDK failure.
    #[error("{0}")]
    Backend(String),

    /// The item exists but does not have the shape of a post.
    #[error("{0}")]
    MalformedItem(String),
}

/// Single-item access to the posts table.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Load the post stored under `id`, or `None` when the key is absent.
    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Write `post` unconditionally, replacing any item with the same id.
    async fn put(&self, post: &Post) -> Result<(), StoreError>;

    /// Remove the item stored under `id`. Absent keys are not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
