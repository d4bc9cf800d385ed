use axum::Router;
use axum::middleware::from_fn;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use webaudit_core::AppError;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let audit_routes = Router::new()
        .route(
            "/api/audits",
            get(handlers::audits::list_audits_handler)
                .post(handlers::audits::create_audit_handler),
        )
        .route(
            "/api/audits/{audit_id}",
            get(handlers::audits::get_audit_handler),
        )
        .route(
            "/api/audits/{audit_id}/report",
            get(handlers::audits::audit_report_handler),
        )
        .route_layer(from_fn(middleware::resolve_identity));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(audit_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
