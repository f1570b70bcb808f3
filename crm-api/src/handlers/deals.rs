use actix_web::{web, HttpResponse};
use shared_types::{CreateDealRequest, UpdateDealRequest};
use std::sync::Arc;
use tracing::{debug, info};

use crate::database::deals as deals_db;
use crate::database::Database;
use crate::error::{parse_id, ApiError};

pub async fn list_deals(db: web::Data<Arc<Database>>) -> Result<HttpResponse, ApiError> {
    let deals = deals_db::list_deals(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::store("Error fetching deals", e))?;

    debug!("Fetched {} deals", deals.len());

    Ok(HttpResponse::Ok().json(deals))
}

pub async fn get_deal(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deal_id = parse_id(&path, "deal")?;

    let deal = deals_db::get_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store_with_details("Error fetching deal", e))?;

    Ok(HttpResponse::Ok().json(deal))
}

pub async fn create_deal(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateDealRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = request.into_inner();

    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name cannot be empty"));
    }

    let deal_id = deals_db::insert_deal(db.async_connection.clone(), &req)
        .await
        .map_err(|e| ApiError::store("Error creating deal", e))?;

    let deal = deals_db::get_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store("Error creating deal", e))?;

    info!("Created deal {} at stage {}", deal.id, deal.stage);

    Ok(HttpResponse::Ok().json(deal))
}

pub async fn update_deal(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<UpdateDealRequest>,
) -> Result<HttpResponse, ApiError> {
    let deal_id = parse_id(&path, "deal")?;
    let req = request.into_inner();

    debug!("Received deal update payload: {:?}", req);

    let mut deal = deals_db::get_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store_with_details("Error updating deal", e))?;

    req.apply_to(&mut deal);

    if deal.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name cannot be empty"));
    }

    deals_db::update_deal(db.async_connection.clone(), deal_id, &deal)
        .await
        .map_err(|e| ApiError::store_with_details("Error updating deal", e))?;

    let updated = deals_db::get_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store_with_details("Error updating deal", e))?;

    info!("Updated deal {}", deal_id);

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_deal(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deal_id = parse_id(&path, "deal")?;

    let deal = deals_db::get_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store_with_details("Error deleting deal", e))?;

    deals_db::delete_deal(db.async_connection.clone(), deal_id)
        .await
        .map_err(|e| ApiError::store_with_details("Error deleting deal", e))?;

    info!("Deleted deal {}", deal_id);

    Ok(HttpResponse::Ok().json(deal))
}
