//! AWS Lambda function serving CRUD operations on posts.
//!
//! API Gateway proxy events are routed by HTTP method to [`PostService`],
//! which reads and writes single items in the posts table.

#![deny(warnings)]

mod router;
mod service;

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;

use posts_lambda_shared::{
    init_tracing, ApiGatewayProxyRequest, ApiGatewayProxyResponse, ProxyRequestExt,
};
use posts_lib::{DynamoStore, StoreSettings};

pub use router::{Operation, Router};
pub use service::PostService;

/// Entry point used by the Lambda runtime.
///
/// Builds the store client once at cold start and shares it across
/// invocations.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let settings = StoreSettings::from_env()?;
    let store = DynamoStore::from_settings(&settings).await;
    info!(
        table = %store.table_name(),
        timeout_ms = settings.timeout.as_millis() as u64,
        "posts function initialized"
    );

    let router = Router::new(PostService::new(Arc::new(store), settings.timeout));
    let router = &router;
    lambda_runtime::run(service_fn(move |event| handler(router, event))).await
}

/// Lambda handler invoked per request.
///
/// Never fails: every outcome, including store errors, is returned as an
/// HTTP-shaped response.
pub async fn handler(
    router: &Router,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, context) = event.into_parts();
    let request_id = if context.request_id.is_empty() {
        request.gateway_request_id().unwrap_or_default().to_string()
    } else {
        context.request_id
    };

    Ok(router.handle(&request, &request_id).await)
}
