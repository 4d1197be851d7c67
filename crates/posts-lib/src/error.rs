use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Convenient result alias for the posts library.
pub type Result<T> = std::result::Result<T, Error>;

/// Store call being performed when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Get,
    Put,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            StoreOperation::Get => "getting",
            StoreOperation::Put => "creating new",
            StoreOperation::Delete => "deleting",
        };
        f.write_str(verb)
    }
}

/// Top-level error type for post operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be decoded into a post.
    #[error("invalid request body: {0}")]
    Decode(String),

    /// No post is stored under the requested id.
    #[error("post item not found")]
    NotFound,

    /// The HTTP method has no matching operation.
    #[error("method {method} not allowed")]
    MethodNotAllowed { method: String },

    /// The key-value store rejected or failed the call.
    #[error("error when {operation} post item: {message}")]
    Store {
        operation: StoreOperation,
        message: String,
    },

    /// The store call did not complete before the deadline.
    #[error(
        "store call timed out after {}ms while {} post item",
        .timeout.as_millis(),
        .operation
    )]
    StoreTimeout {
        operation: StoreOperation,
        timeout: Duration,
    },

    /// A stored item could not be turned back into a post.
    #[error("error when unmarshalling post item: {0}")]
    ItemDecode(String),

    /// Startup configuration was invalid.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Wrap a [`StoreError`] raised during `operation`.
    pub fn from_store(operation: StoreOperation, err: StoreError) -> Self {
        match err {
            StoreError::MalformedItem(message) => Error::ItemDecode(message),
            StoreError::Backend(message) => Error::Store { operation, message },
        }
    }
}
