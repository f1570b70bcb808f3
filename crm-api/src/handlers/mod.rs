pub mod contacts;
pub mod deals;
pub mod tasks;

use actix_web::{get, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::database::Database;
use crate::error::ApiError;

#[get("/health")]
async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Unparseable or missing JSON bodies are client errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Invalid request body: {}", err)).into()
    })
}

/// Registers every route; shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health)
        .route("/api/contacts", web::get().to(contacts::list_contacts))
        .route("/api/contacts", web::post().to(contacts::create_contact))
        .route("/api/contacts/{id}", web::get().to(contacts::get_contact))
        .route("/api/contacts/{id}", web::put().to(contacts::update_contact))
        .route("/api/contacts/{id}", web::delete().to(contacts::delete_contact))
        .route("/api/deals", web::get().to(deals::list_deals))
        .route("/api/deals", web::post().to(deals::create_deal))
        .route("/api/deals/{id}", web::get().to(deals::get_deal))
        .route("/api/deals/{id}", web::put().to(deals::update_deal))
        .route("/api/deals/{id}", web::delete().to(deals::delete_deal))
        .route("/api/tasks", web::get().to(tasks::list_tasks))
        .route("/api/tasks", web::post().to(tasks::create_task))
        .route("/api/tasks/{id}", web::get().to(tasks::get_task))
        .route("/api/tasks/{id}", web::put().to(tasks::update_task))
        .route("/api/tasks/{id}", web::delete().to(tasks::delete_task));
}
