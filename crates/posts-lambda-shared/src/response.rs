//! Response building for API Gateway proxy responses.
//!
//! Success bodies are the JSON encoding of the value; errors always use the
//! two-field [`ErrorBody`] shape. A body that fails to serialize degrades to a
//! bare 500 with no body.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use posts_lib::Error;

/// Content type attached to every JSON response.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error payload returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// Map a library error to the HTTP status it is reported with.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Decode(_) => StatusCode::BAD_REQUEST,
        Error::NotFound => StatusCode::NOT_FOUND,
        Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        Error::Store { .. }
        | Error::StoreTimeout { .. }
        | Error::ItemDecode(_)
        | Error::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A response with a status code and no body.
pub fn empty_response(status: StatusCode) -> ApiGatewayProxyResponse {
    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = i64::from(status.as_u16());
    response
}

/// A JSON response; degrades to a bare 500 if `body` cannot be serialized.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> ApiGatewayProxyResponse {
    match serde_json::to_string(body) {
        Ok(body) => {
            let mut response = empty_response(status);
            response
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
            response.body = Some(Body::Text(body));
            response
        }
        Err(e) => {
            error!(error = %e, "failed to serialize response body");
            empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// An error response with the given status and message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiGatewayProxyResponse {
    json_response(
        status,
        &ErrorBody {
            status: status.as_u16(),
            message: message.into(),
        },
    )
}

/// An error response for a library error, using [`status_for`].
pub fn error_from(err: &Error) -> ApiGatewayProxyResponse {
    error_response(status_for(err), err.to_string())
}

/// Text of a response body, if it has one.
pub fn body_text(response: &ApiGatewayProxyResponse) -> Option<&str> {
    match response.body.as_ref()? {
        Body::Text(text) => Some(text.as_str()),
        Body::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        Body::Empty => None,
    }
}
