pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::cv::handlers as cv;
use crate::jobs::handlers as analysis;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis jobs
        .route("/api/v1/analysis", get(analysis::handle_list_analyses))
        .route(
            "/api/v1/analysis/start",
            post(analysis::handle_start_analysis),
        )
        .route(
            "/api/v1/analysis/status/:task_id",
            get(analysis::handle_analysis_status),
        )
        .route(
            "/api/v1/analysis/:task_id",
            delete(analysis::handle_delete_analysis),
        )
        // CVs
        .route("/api/v1/cv", get(cv::handle_list_cvs))
        .route(
            "/api/v1/cv/upload",
            post(cv::handle_upload_cv).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/cv/:cv_id",
            get(cv::handle_get_cv).delete(cv::handle_delete_cv),
        )
        .route(
            "/api/v1/cv/:cv_id/download",
            get(cv::handle_create_download_link),
        )
        // Public short-link redirect
        .route("/dl/:short_code", get(cv::handle_redirect_download))
        .with_state(state)
}
