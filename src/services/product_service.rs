use crate::dto::products::CreateProductForm;
use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// Full collection, or the subset whose name contains `query` as a
/// case-sensitive substring. An empty result is a success, not an error.
pub async fn list_products(state: &AppState, query: Option<String>) -> AppResult<Vec<Product>> {
    let products = state.store.read_all().await?;
    match query {
        Some(q) if !q.is_empty() => Ok(products
            .into_iter()
            .filter(|p| p.name.contains(&q))
            .collect()),
        _ => Ok(products),
    }
}

pub async fn create_product(state: &AppState, form: CreateProductForm) -> AppResult<Product> {
    let photo = match form.photo {
        Some(upload) => Some(
            state
                .uploads
                .store(&upload.original_name, &upload.bytes)
                .await?,
        ),
        None => None,
    };

    let draft = NewProduct {
        name: form.name,
        category: form.category,
        amount: form.amount,
        photo: photo.clone(),
    };

    match state.store.insert(draft).await? {
        Some(product) => {
            tracing::info!(id = %product.id, name = %product.name, "product created");
            Ok(product)
        }
        None => {
            // The photo was already written; don't leave it orphaned.
            if let Some(filename) = photo {
                state.uploads.delete(&filename).await;
            }
            Err(AppError::Conflict)
        }
    }
}

pub async fn adjust_stock(state: &AppState, id: &str, delta: i64) -> AppResult<Product> {
    match state.store.adjust_amount(id, delta).await? {
        Some(product) => Ok(product),
        None => Err(AppError::NotFound),
    }
}

pub async fn delete_product(state: &AppState, id: &str) -> AppResult<()> {
    match state.store.remove(id).await? {
        Some(removed) => {
            if let Some(photo) = &removed.photo {
                state.uploads.delete(photo).await;
            }
            tracing::info!(id = %removed.id, "product deleted");
            Ok(())
        }
        None => Err(AppError::NotFound),
    }
}
