use axum::{
    Json, Router,
    extract::{Multipart, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    dto::products::{AdjustStockParams, CreateProductForm, DeleteParams, SearchQuery},
    error::{AppError, AppResult},
    models::Product,
    services::product_service,
    state::AppState,
};

pub const ALLOWED_METHODS: &str = "POST, GET, PATCH, DELETE";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        axum::routing::post(create_product)
            .get(list_products)
            .patch(adjust_stock)
            .delete(delete_product)
            // axum's default 405 would advertise the methods in its own
            // order; keep the Allow header an exact, stable set.
            .fallback(method_not_allowed),
    )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("name" = Option<String>, Query, description = "Case-sensitive substring filter on product names"),
    ),
    responses(
        (status = 200, description = "Full or filtered product collection", body = Vec<Product>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state, query.name).await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/api/products",
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 400, description = "Missing field or non-integer amount"),
        (status = 405, description = "A product with that name already exists"),
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let form = CreateProductForm::from_multipart(multipart).await?;
    let product = product_service::create_product(&state, form).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    patch,
    path = "/api/products",
    params(
        ("id" = String, Query, description = "Product id"),
        ("amount" = i64, Query, description = "Signed delta added to the stock amount"),
    ),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Missing or malformed id/amount"),
        (status = 404, description = "No product with that id"),
    ),
    tag = "products"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    params: Result<Query<AdjustStockParams>, QueryRejection>,
) -> AppResult<Json<Product>> {
    let Query(params) = params.map_err(|err| AppError::InvalidInput(err.body_text()))?;
    let product = product_service::adjust_stock(&state, &params.id, params.amount).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products",
    params(
        ("id" = String, Query, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Product and its photo removed"),
        (status = 400, description = "Missing id"),
        (status = 404, description = "No product with that id"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> AppResult<StatusCode> {
    let Query(params) = params.map_err(|err| AppError::InvalidInput(err.body_text()))?;
    product_service::delete_product(&state, &params.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        format!("Method Not Allowed. Allowed: {ALLOWED_METHODS}"),
    )
}
