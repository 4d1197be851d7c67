//! Request body decoding.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use posts_lib::{Error, Post, Result};

use crate::events::ProxyRequestExt;

/// Decode the request body into a candidate post.
///
/// Honors the `isBase64Encoded` flag. Missing, unknown and `null` fields fall
/// back to zero values, and a body of literal `null` is an empty post;
/// malformed base64 or JSON is an [`Error::Decode`].
pub fn decode_post(request: &ApiGatewayProxyRequest) -> Result<Post> {
    decode_body(request.body_str(), request.is_base64_encoded)
}

/// Decode a raw body, base64-decoding it first when `is_base64` is set.
pub fn decode_body(body: &str, is_base64: bool) -> Result<Post> {
    if is_base64 {
        let bytes = STANDARD
            .decode(body)
            .map_err(|e| Error::Decode(format!("malformed base64 body: {e}")))?;
        parse_post(serde_json::from_slice(&bytes))
    } else {
        parse_post(serde_json::from_str(body))
    }
}

fn parse_post(parsed: serde_json::Result<Option<Post>>) -> Result<Post> {
    parsed
        .map(Option::unwrap_or_default)
        .map_err(|e| Error::Decode(e.to_string()))
}
