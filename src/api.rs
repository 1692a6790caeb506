use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::db::Database;
use crate::error::ApiError;
use crate::forms::{ItemForm, ReviewForm};
use crate::models::item::ItemWithReviews;

/// How many reviews an item response carries at most.
const REVIEW_LIMIT: u32 = 5;

/// Route table, shared between `main` and the integration tests.
///
/// The two POST routes accept unverified-origin requests by design: there is
/// no session or CSRF layer on this API, and no authentication (explicit
/// non-goal).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::resource("/items")
                .route(web::post().to(create_item))
                .route(web::route().to(method_not_accepted)),
        )
        .service(web::resource("/items/{item_id}").route(web::get().to(get_item)))
        .service(
            web::resource("/items/{item_id}/reviews")
                .route(web::post().to(create_review))
                .route(web::route().to(method_not_accepted)),
        );
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// GET /items/{item_id} — the item plus its latest reviews, newest first.
/// Read-only.
pub async fn get_item(
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    debug!("fetching item {}", item_id);

    let item = db
        .get_item(item_id)
        .await?
        .ok_or(ApiError::ItemNotFound(item_id))?;
    let reviews = db.recent_reviews(item_id, REVIEW_LIMIT).await?;

    info!("returning item {} with {} reviews", item_id, reviews.len());
    Ok(HttpResponse::Ok().json(ItemWithReviews::new(item, reviews)))
}

/// POST /items/{item_id}/reviews — attach a review to an existing item.
/// Checked in order: body decodes, schema holds, item exists.
pub async fn create_review(
    db: web::Data<Database>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();

    let value: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::MalformedBody)?;
    let form = ReviewForm::parse(&value).map_err(|err| {
        debug!("review rejected for item {}: {}", item_id, err);
        ApiError::InvalidFormat
    })?;

    if !db.item_exists(item_id).await? {
        return Err(ApiError::ItemNotFound(item_id));
    }

    let review = db.insert_review(item_id, &form.text, form.grade).await?;
    info!("review {} created for item {}", review.id, item_id);
    Ok(HttpResponse::Created().json(json!({ "id": review.id })))
}

/// POST /items — create a new item.
pub async fn create_item(
    db: web::Data<Database>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let value: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::MalformedBody)?;
    let form = ItemForm::parse(&value).map_err(|err| {
        debug!("item rejected: {}", err);
        ApiError::InvalidFormat
    })?;

    let item = db
        .insert_item(&form.title, &form.description, form.price)
        .await?;
    info!("item {} created: {}", item.id, item.title);
    Ok(HttpResponse::Created().json(json!({ "id": item.id })))
}

/// Fallback for the creation endpoints: anything but POST is a 400.
pub async fn method_not_accepted() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAccepted)
}
