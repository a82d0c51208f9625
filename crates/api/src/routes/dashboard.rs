//! Dashboard routes.
//!
//! Eight read-only aggregate endpoints plus the derived-insights endpoint.
//! Route set mirrors the dashboard renderer's fetch fan-out: the renderer
//! requests all eight aggregates together, and `/insights` performs the
//! same join-all internally before deriving the report.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use salient_core::insights::InsightEngine;
use salient_db::{DashboardError, DashboardRepository};
use salient_shared::AppError;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(get_revenue))
        .route("/profit", get(get_profit))
        .route("/top-products", get(get_top_products))
        .route("/profitable-products", get(get_profitable_products))
        .route("/monthly-sales", get(get_monthly_sales))
        .route("/category-performance", get(get_category_performance))
        .route("/customer-acquisition", get(get_customer_acquisition))
        .route("/customer-metrics", get(get_customer_metrics))
        .route("/insights", get(get_insights))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Maps a repository failure to the single "data unavailable" error state.
fn data_unavailable(err: &DashboardError) -> Response {
    error!(error = %err, "Dashboard query failed");
    let app_err = AppError::Database(err.to_string());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": app_err.error_code(),
            "message": "An error occurred while fetching data"
        })),
    )
        .into_response()
}

fn repo(state: &AppState) -> DashboardRepository {
    DashboardRepository::new((*state.db).clone())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/dashboard/revenue
#[axum::debug_handler]
async fn get_revenue(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_revenue_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/profit
///
/// With no sales yet the aggregate has nothing to report; the response
/// keeps the field shape with null values rather than a bare null body.
#[axum::debug_handler]
async fn get_profit(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_profit_summary().await {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(json!({
                "total_revenue": null,
                "total_cost": null,
                "total_profit": null,
                "profit_margin_percentage": null
            })),
        )
            .into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/top-products
#[axum::debug_handler]
async fn get_top_products(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_top_products_by_revenue().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/profitable-products
#[axum::debug_handler]
async fn get_profitable_products(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_top_products_by_profit().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/monthly-sales
#[axum::debug_handler]
async fn get_monthly_sales(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_monthly_sales().await {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/category-performance
#[axum::debug_handler]
async fn get_category_performance(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_category_performance().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/customer-acquisition
#[axum::debug_handler]
async fn get_customer_acquisition(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_customer_acquisition().await {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/customer-metrics
///
/// Mirrors the `/profit` shape: zero buying customers yields a count of
/// zero with null revenue fields, never a bare null body.
#[axum::debug_handler]
async fn get_customer_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_customer_metrics().await {
        Ok(Some(metrics)) => (StatusCode::OK, Json(metrics)).into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(json!({
                "total_customers": 0,
                "total_revenue": null,
                "average_revenue_per_customer": null
            })),
        )
            .into_response(),
        Err(e) => data_unavailable(&e),
    }
}

/// GET /api/dashboard/insights
///
/// Assembles a consistent snapshot from all eight aggregates (join-all:
/// one failed fetch fails the whole refresh) and derives the insight
/// report from it.
#[axum::debug_handler]
async fn get_insights(State(state): State<AppState>) -> impl IntoResponse {
    match repo(&state).query_snapshot().await {
        Ok(snapshot) => {
            let report = InsightEngine::derive_insights(&snapshot);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => data_unavailable(&e),
    }
}
