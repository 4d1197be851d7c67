//! Shared infrastructure for the posts AWS Lambda function.
//!
//! This crate provides the API Gateway glue the handler needs:
//!
//! - [`ProxyRequestExt`]: lookups on the `aws_lambda_events` REST proxy request
//! - [`decode_post`]: Payload decoding, including base64-flagged bodies
//! - [`json_response`], [`error_from`] and [`ErrorBody`]: status code + JSON body
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory stores and request builders
//! for handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod codec;
mod events;
mod response;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
pub use aws_lambda_events::encodings::Body;
pub use codec::{decode_body, decode_post};
pub use events::ProxyRequestExt;
pub use response::{
    body_text, empty_response, error_from, error_response, json_response, status_for, ErrorBody,
    CONTENT_TYPE_JSON,
};
pub use tracing_init::{init_tracing, LogFormat};
