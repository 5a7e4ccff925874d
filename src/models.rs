use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An inventory item. The whole collection lives in one JSON document,
/// serialized in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub category: String,
    pub id: String,
    pub name: String,
    /// Stock count. Deltas may push it negative; no floor is enforced.
    pub amount: i64,
    /// Filename in the upload directory, if a photo was uploaded.
    pub photo: Option<String>,
}

/// A validated product draft. The store mints the `id` when inserting.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub amount: i64,
    pub photo: Option<String>,
}
