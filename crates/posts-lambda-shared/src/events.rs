//! API Gateway REST proxy event accessors.
//!
//! The event shapes come from `aws_lambda_events::apigw`; this module adds
//! the few lookups the function needs on top of them.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;

/// Convenience lookups on an inbound proxy request.
pub trait ProxyRequestExt {
    /// Look up a single path parameter.
    fn path_parameter(&self, name: &str) -> Option<&str>;

    /// Body text, treating a missing body as empty.
    fn body_str(&self) -> &str;

    /// API Gateway request id from the request context, if present.
    fn gateway_request_id(&self) -> Option<&str>;
}

impl ProxyRequestExt for ApiGatewayProxyRequest {
    fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.get(name).map(String::as_str)
    }

    fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    fn gateway_request_id(&self) -> Option<&str> {
        self.request_context.request_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_proxy_event() {
        let event = json!({
            "resource": "/posts/{id}",
            "path": "/posts/abc",
            "httpMethod": "PUT",
            "pathParameters": {"id": "abc"},
            "headers": {"Content-Type": "application/json"},
            "body": "{\"title\":\"Z\"}",
            "isBase64Encoded": false,
            "requestContext": {
                "requestId": "req-1",
                "stage": "prod",
                "httpMethod": "PUT",
                "resourcePath": "/posts/{id}",
                "identity": {"sourceIp": "127.0.0.1"}
            }
        });
        let request: ApiGatewayProxyRequest = serde_json::from_value(event).unwrap();

        assert_eq!(request.http_method.as_str(), "PUT");
        assert_eq!(request.path_parameter("id"), Some("abc"));
        assert_eq!(request.body_str(), "{\"title\":\"Z\"}");
        assert_eq!(request.gateway_request_id(), Some("req-1"));
    }

    #[test]
    fn null_collections_are_tolerated() {
        let event = json!({
            "httpMethod": "POST",
            "pathParameters": null,
            "headers": null,
            "queryStringParameters": null,
            "body": null,
            "requestContext": {
                "requestId": "req-2",
                "httpMethod": "POST",
                "identity": {}
            }
        });
        let request: ApiGatewayProxyRequest = serde_json::from_value(event).unwrap();

        assert_eq!(request.path_parameter("id"), None);
        assert_eq!(request.body_str(), "");
        assert!(!request.is_base64_encoded);
    }
}
