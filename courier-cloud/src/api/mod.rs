//! HTTP API for courier-cloud

pub mod addresses;
pub mod health;
pub mod orders;

use axum::routing::{get, post};
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::user_auth::user_auth_middleware;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // JWT authenticated
    let api = Router::new()
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders/{order_number}", get(orders::get_order))
        .route("/api/addresses", get(addresses::list_addresses))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crate::db::MemoryOrderStore;
    use axum::body::Body;
    use http::StatusCode;

    #[tokio::test]
    async fn test_health_is_public_and_tagged_with_request_id() {
        let store = MemoryOrderStore::new();
        let request = http::Request::get("/health").body(Body::empty()).unwrap();

        let (status, headers, body) = send(app(&store), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "courier-cloud");
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let store = MemoryOrderStore::new();
        let request = http::Request::get("/api/addresses")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = send(app(&store), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 1001);
    }
}
