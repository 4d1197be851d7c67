//! HTTP method dispatch.

use http::StatusCode;
use tracing::{error, info, warn};

use posts_lambda_shared::{
    empty_response, error_from, json_response, status_for, ApiGatewayProxyRequest,
    ApiGatewayProxyResponse, ProxyRequestExt,
};
use posts_lib::{Error, Result};

use crate::service::PostService;

/// Operation selected by the request's HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Replace,
    Delete,
}

impl Operation {
    /// Map an HTTP method to an operation. Matching is exact: API Gateway
    /// always sends upper-case methods.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Operation::Fetch),
            "POST" => Some(Operation::Create),
            "PUT" => Some(Operation::Replace),
            "DELETE" => Some(Operation::Delete),
            _ => None,
        }
    }
}

/// Routes proxy requests to [`PostService`] operations.
#[derive(Clone)]
pub struct Router {
    service: PostService,
}

impl Router {
    pub fn new(service: PostService) -> Self {
        Self { service }
    }

    /// Handle one proxy request. Every outcome, including failures, is an
    /// HTTP-shaped response.
    pub async fn handle(
        &self,
        request: &ApiGatewayProxyRequest,
        request_id: &str,
    ) -> ApiGatewayProxyResponse {
        let method = request.http_method.as_str();
        let Some(operation) = Operation::from_method(method) else {
            warn!(request_id = %request_id, method = %method, "method not allowed");
            return error_from(&Error::MethodNotAllowed {
                method: method.to_string(),
            });
        };

        let id = request.path_parameter("id").unwrap_or_default();
        info!(
            request_id = %request_id,
            operation = ?operation,
            post_id = %id,
            "handling post request"
        );

        let service = &self.service;
        let outcome = match operation {
            Operation::Fetch => respond(StatusCode::OK, service.fetch(id).await),
            Operation::Create => respond(StatusCode::CREATED, service.create(request).await),
            Operation::Replace => respond(StatusCode::OK, service.replace(id, request).await),
            Operation::Delete => service
                .delete(id)
                .await
                .map(|()| empty_response(StatusCode::NO_CONTENT)),
        };

        match outcome {
            Ok(response) => {
                info!(
                    request_id = %request_id,
                    operation = ?operation,
                    status = response.status_code,
                    "post request completed"
                );
                response
            }
            Err(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!(
                        request_id = %request_id,
                        operation = ?operation,
                        post_id = %id,
                        error = %err,
                        "post request failed"
                    );
                } else {
                    warn!(
                        request_id = %request_id,
                        operation = ?operation,
                        post_id = %id,
                        error = %err,
                        "post request rejected"
                    );
                }
                error_from(&err)
            }
        }
    }
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T>,
) -> Result<ApiGatewayProxyResponse> {
    result.map(|body| json_response(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use posts_lambda_shared::body_text;
    use posts_lambda_shared::test_utils::{
        mock_request_id, proxy_request, FailingStore, MemoryStore,
    };

    fn router(store: impl posts_lib::PostStore + 'static) -> Router {
        Router::new(PostService::new(Arc::new(store), Duration::from_secs(10)))
    }

    #[test]
    fn maps_methods_to_operations() {
        assert_eq!(Operation::from_method("GET"), Some(Operation::Fetch));
        assert_eq!(Operation::from_method("POST"), Some(Operation::Create));
        assert_eq!(Operation::from_method("PUT"), Some(Operation::Replace));
        assert_eq!(Operation::from_method("DELETE"), Some(Operation::Delete));
        assert_eq!(Operation::from_method("PATCH"), None);
        assert_eq!(Operation::from_method("get"), None);
    }

    #[tokio::test]
    async fn unsupported_method_is_405_without_touching_store() {
        let store = MemoryStore::default();
        let request = proxy_request("PATCH", Some("p1"), Some("{not json"));

        let response = router(store.clone())
            .handle(&request, &mock_request_id("patch"))
            .await;

        assert_eq!(response.status_code, 405);
        let body: serde_json::Value =
            serde_json::from_str(body_text(&response).unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": 405, "message": "method PATCH not allowed"})
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_path_parameter_is_not_found_without_store_call() {
        let router = router(FailingStore::new("key attribute cannot be empty"));

        for (method, status) in [("GET", 404), ("PUT", 404), ("DELETE", 204)] {
            let request = proxy_request(method, None, Some(r#"{"title":"Z"}"#));
            let response = router.handle(&request, &mock_request_id("no-id")).await;
            assert_eq!(response.status_code, status, "method {method}");
        }
    }
}
