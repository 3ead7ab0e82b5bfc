use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde::Serialize;
use std::sync::Arc;

use crate::cleanup::cleanup_week;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::form::{validate_manual_assignment, ManualAssignmentRequest};
use crate::parser::AssignmentRecord;
use crate::store::AssignmentStore;

/// Shared handler state; the store is injected by whoever starts the server
pub struct AppState {
    pub store: Arc<dyn AssignmentStore>,
}

#[derive(Serialize)]
pub struct ManualAssignmentResponse {
    week: String,
    assignment: AssignmentRecord,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    week: String,
    deleted: String,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"ok": true}))
}

// All assignments for a week, auto and manual
async fn get_schedule(
    week: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let records = state.store.list(&week)?;
    Ok(HttpResponse::Ok().json(records))
}

async fn save_manual_assignment(
    req: web::Json<ManualAssignmentRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let assignment = validate_manual_assignment(&req).map_err(AppError::Validation)?;
    let week = req.week.trim().to_string();
    let record = state.store.insert(&week, assignment)?;

    tracing::info!(week = %week, id = %record.id, "saved manual assignment");
    Ok(HttpResponse::Ok().json(ManualAssignmentResponse {
        week,
        assignment: record,
    }))
}

async fn get_manual_assignment(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (week, id) = path.into_inner();
    match state.store.get(&week, &id)? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(AppError::NotFound { week, id }),
    }
}

async fn delete_manual_assignment(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (week, id) = path.into_inner();
    if !state.store.delete(&week, &id)? {
        return Err(AppError::NotFound { week, id });
    }

    tracing::info!(week = %week, id = %id, "deleted manual assignment");
    Ok(HttpResponse::Ok().json(DeleteResponse { week, deleted: id }))
}

async fn cleanup_duplicate_assignments(
    week: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let week = week.into_inner();
    let report = cleanup_week(state.store.as_ref(), &week).map_err(|e| {
        tracing::error!(week = %week, error = %e, "cleanup failed");
        AppError::Cleanup(e)
    })?;
    Ok(HttpResponse::Ok().json(report))
}

/// Registers every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/schedule/{week}", web::get().to(get_schedule))
        .route("/assignments/manual", web::post().to(save_manual_assignment))
        .service(
            web::resource("/assignments/manual/{week}/{id}")
                .route(web::get().to(get_manual_assignment))
                .route(web::delete().to(delete_manual_assignment)),
        )
        .route(
            "/assignments/cleanup/{week}",
            web::post().to(cleanup_duplicate_assignments),
        );
}

pub async fn start_server(
    config: ServerConfig,
    store: Arc<dyn AssignmentStore>,
) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { store });

    tracing::info!(host = %config.host, port = config.port, "starting assignment cleanup server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
