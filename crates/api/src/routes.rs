//! Route table and middleware stack

use axum::BoxError;
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::handler::Handler;
use axum::http::HeaderName;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter, get, on};
use std::any::Any;
use std::time::Duration;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::handlers::{health, items, object_members};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Which HTTP methods a route answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Methods {
    /// Parameters from the query string on GET, JSON body on POST
    GetAndPost,
    PostOnly,
}

impl Methods {
    pub fn filter(self) -> MethodFilter {
        match self {
            Methods::GetAndPost => MethodFilter::GET.or(MethodFilter::POST),
            Methods::PostOnly => MethodFilter::POST,
        }
    }
}

/// A path bound to a handler and the methods it is registered for
pub struct Route {
    pub path: &'static str,
    pub methods: Methods,
    handler: MethodRouter<AppState>,
}

impl Route {
    pub fn new<H, T>(path: &'static str, methods: Methods, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            path,
            methods,
            handler: on(methods.filter(), handler),
        }
    }
}

pub fn item_routes() -> Vec<Route> {
    vec![
        Route::new("/items.create", Methods::GetAndPost, items::create_item),
        Route::new("/items.get", Methods::GetAndPost, items::get_item),
        Route::new("/items.list", Methods::GetAndPost, items::list_items),
        Route::new("/items.delete", Methods::GetAndPost, items::delete_item),
    ]
}

pub fn object_member_routes() -> Vec<Route> {
    vec![
        Route::new(
            "/object-members.create",
            Methods::GetAndPost,
            object_members::create_link,
        ),
        Route::new(
            "/object-members.delete",
            Methods::GetAndPost,
            object_members::delete_link,
        ),
    ]
}

fn register_routes(router: Router<AppState>, routes: Vec<Route>) -> Router<AppState> {
    routes
        .into_iter()
        .fold(router, |router, route| router.route(route.path, route.handler))
}

/// All routes bound to `state`, without middleware
pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/ping", get(health::ping));
    let router = register_routes(router, item_routes());
    let router = register_routes(router, object_member_routes());
    router.with_state(state)
}

/// Request ids, tracing, per-request timeout and panic recovery
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(request_timeout))
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// The complete application
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    with_middleware(router(state), request_timeout)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("Request timed out");
        return ApiError::Timeout.into_response();
    }
    ApiError::Internal(err.to_string()).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Request handler panicked: {}", detail);

    ApiError::Internal("internal server error".to_string()).into_response()
}
