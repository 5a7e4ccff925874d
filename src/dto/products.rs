use axum::body::Bytes;
use axum::extract::Multipart;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    /// Case-sensitive substring to match against product names.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockParams {
    pub id: String,
    /// Signed delta added to the current amount.
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteParams {
    pub id: String,
}

#[derive(Debug)]
pub struct PhotoUpload {
    pub original_name: String,
    pub bytes: Bytes,
}

/// The create form, validated before any mutation happens. `name`,
/// `category` and `amount` are required text fields; `photo` is an optional
/// file part.
#[derive(Debug)]
pub struct CreateProductForm {
    pub name: String,
    pub category: String,
    pub amount: i64,
    pub photo: Option<PhotoUpload>,
}

impl CreateProductForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut name = None;
        let mut category = None;
        let mut amount = None;
        let mut photo = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::InvalidInput(err.to_string()))?
        {
            match field.name() {
                Some("name") => name = Some(text_field(field, "name").await?),
                Some("category") => category = Some(text_field(field, "category").await?),
                Some("amount") => amount = Some(text_field(field, "amount").await?),
                Some("photo") => {
                    let original_name = field.file_name().unwrap_or("photo").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|err| AppError::InvalidInput(err.to_string()))?;
                    // Browsers send an empty part when no file was picked.
                    if !bytes.is_empty() {
                        photo = Some(PhotoUpload {
                            original_name,
                            bytes,
                        });
                    }
                }
                _ => {}
            }
        }

        let amount = amount
            .ok_or_else(|| missing("amount"))?
            .parse::<i64>()
            .map_err(|_| AppError::InvalidInput("amount must be an integer".into()))?;

        Ok(Self {
            name: name.ok_or_else(|| missing("name"))?,
            category: category.ok_or_else(|| missing("category"))?,
            amount,
            photo,
        })
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|_| AppError::InvalidInput(format!("field {name} is not valid text")))
}

fn missing(name: &str) -> AppError {
    AppError::InvalidInput(format!("missing field: {name}"))
}
