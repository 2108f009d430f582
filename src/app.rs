use axum::{middleware, routing::any, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api, config::AppConfig, fetcher::PageFetcher, middleware as mw};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
}

pub fn build_router(config: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState {
        fetcher: PageFetcher::new(&config.http_client)?,
    };

    Ok(router(state))
}

fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", any(api::reading_time::estimate))
        .route("/*website", any(api::reading_time::estimate))
        .with_state(state);

    with_layers(routes)
}

fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(middleware::from_fn(mw::assign_request_id))
        .layer(TraceLayer::new_for_http().make_span_with(mw::request_span))
        .layer(cors)
        .layer(CatchPanicLayer::custom(mw::panic_response));

    router.layer(middleware)
}
