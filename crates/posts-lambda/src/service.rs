//! Post operations against the injected store.
//!
//! Each operation is one independent cycle: decode, at most one read, at most
//! one write. Every store call runs under the same deadline and is never
//! retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use posts_lambda_shared::{decode_post, ApiGatewayProxyRequest};
use posts_lib::{new_post_id, Error, Post, PostStore, Result, StoreError, StoreOperation};

/// Resource service for posts.
///
/// Holds nothing but the store handle and the per-call deadline, so one
/// instance is shared by every invocation of a warm function.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    timeout: Duration,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Load the post stored under `id`.
    pub async fn fetch(&self, id: &str) -> Result<Post> {
        self.load(id).await
    }

    /// Store the request body as a new post under a freshly generated id.
    ///
    /// Any `id` in the body is discarded. The write is unconditional.
    pub async fn create(&self, request: &ApiGatewayProxyRequest) -> Result<Post> {
        let post = decode_post(request)?.with_id(new_post_id());
        self.save(&post).await?;
        Ok(post)
    }

    /// Merge the request body into the post stored under `id` and write the
    /// result back.
    ///
    /// The body is decoded before the store is touched, so a malformed body
    /// is a 400 even when `id` does not exist.
    pub async fn replace(&self, id: &str, request: &ApiGatewayProxyRequest) -> Result<Post> {
        let update = decode_post(request)?;
        let mut post = self.load(id).await?;
        post.merge(&update);
        self.save(&post).await?;
        Ok(post)
    }

    /// Delete the post stored under `id`. Deleting a missing post succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        // No post can be stored under an empty key.
        if id.is_empty() {
            return Ok(());
        }
        self.bounded(StoreOperation::Delete, self.store.delete(id))
            .await
    }

    async fn load(&self, id: &str) -> Result<Post> {
        // DynamoDB rejects empty key values outright.
        if id.is_empty() {
            return Err(Error::NotFound);
        }
        self.bounded(StoreOperation::Get, self.store.get(id))
            .await?
            .ok_or(Error::NotFound)
    }

    async fn save(&self, post: &Post) -> Result<()> {
        self.bounded(StoreOperation::Put, self.store.put(post)).await
    }

    async fn bounded<T, F>(&self, operation: StoreOperation, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|err| Error::from_store(operation, err)),
            Err(_) => Err(Error::StoreTimeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }
}
