use actix_web::{web, HttpResponse};
use shared_types::{CreateContactRequest, StatusResponse, UpdateContactRequest};
use std::sync::Arc;
use tracing::info;

use crate::database::contacts as contacts_db;
use crate::database::Database;
use crate::error::{parse_id, ApiError};

pub async fn list_contacts(db: web::Data<Arc<Database>>) -> Result<HttpResponse, ApiError> {
    let contacts = contacts_db::list_contacts(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::store("Error fetching contacts", e))?;

    Ok(HttpResponse::Ok().json(contacts))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let contact_id = parse_id(&path, "contact")?;

    let contact = contacts_db::get_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(|e| ApiError::store("Error fetching contact", e))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn create_contact(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateContactRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = request.into_inner();

    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name cannot be empty"));
    }

    let contact = contacts_db::insert_contact(db.async_connection.clone(), &req)
        .await
        .map_err(|e| ApiError::store("Error creating contact", e))?;

    info!("Created contact {}", contact.id);

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn update_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<UpdateContactRequest>,
) -> Result<HttpResponse, ApiError> {
    let contact_id = parse_id(&path, "contact")?;
    let req = request.into_inner();

    let mut contact = contacts_db::get_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(|e| ApiError::store("Error updating contact", e))?;

    req.apply_to(&mut contact);

    if contact.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name cannot be empty"));
    }

    contacts_db::update_contact(db.async_connection.clone(), contact_id, &contact)
        .await
        .map_err(|e| ApiError::store("Error updating contact", e))?;

    info!("Updated contact {}", contact_id);

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let contact_id = parse_id(&path, "contact")?;

    contacts_db::delete_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(|e| ApiError::store("Error deleting contact", e))?;

    info!("Deleted contact {}", contact_id);

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
