//! Posts library entry points.
//!
//! This crate owns the `Post` record, the zero-value merge used by partial
//! replaces, the [`PostStore`] seam the function talks to, and the DynamoDB
//! implementation of that seam. Lambda glue (event shapes, response building)
//! lives in `posts-lambda-shared`; the function itself in `posts-lambda`.

#![deny(warnings)]

pub mod dynamo;
pub mod error;
pub mod post;
pub mod settings;
pub mod store;

pub use dynamo::DynamoStore;
pub use error::{Error, Result, StoreOperation};
pub use post::{new_post_id, Post};
pub use settings::{StoreSettings, DEFAULT_STORE_TIMEOUT, DEFAULT_TABLE_NAME};
pub use store::{PostStore, StoreError};
