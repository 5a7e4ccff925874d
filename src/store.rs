use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

use crate::models::{NewProduct, Product};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product document I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("product document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The storage accessor for the product document.
///
/// The document is one JSON array holding every product; each operation reads
/// it whole and each mutation writes it back whole. A single mutex serializes
/// all access, so concurrent read-modify-write sequences cannot drop each
/// other's writes.
pub struct ProductStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the document as an empty collection if it does not exist yet.
    /// `read_all` itself does not recover from a missing document.
    pub async fn ensure_document(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        self.persist(&[]).await
    }

    /// Parses the entire document. Fails if it is missing, unreadable, or
    /// not well-formed JSON.
    pub async fn read_all(&self) -> Result<Vec<Product>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Replaces the document contents with the given collection.
    pub async fn write_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.persist(products).await
    }

    /// Appends a new product unless one with the same name already exists.
    /// Returns `None` on a name collision. The id is minted here, under the
    /// lock, so it is unique against the persisted collection.
    pub async fn insert(&self, draft: NewProduct) -> Result<Option<Product>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut products = self.load().await?;

        if products.iter().any(|p| p.name == draft.name) {
            return Ok(None);
        }

        let product = Product {
            category: draft.category,
            id: mint_id(&products),
            name: draft.name,
            amount: draft.amount,
            photo: draft.photo,
        };
        products.push(product.clone());
        self.persist(&products).await?;
        Ok(Some(product))
    }

    /// Adds a signed delta to the matching product's amount. The result may
    /// go negative. Returns `None` when no product has the given id.
    pub async fn adjust_amount(
        &self,
        id: &str,
        delta: i64,
    ) -> Result<Option<Product>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut products = self.load().await?;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.amount += delta;
        let updated = product.clone();

        self.persist(&products).await?;
        Ok(Some(updated))
    }

    /// Removes the matching product and returns it, so the caller can clean
    /// up its photo file. Returns `None` when no product has the given id.
    pub async fn remove(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut products = self.load().await?;

        let Some(pos) = products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = products.remove(pos);

        self.persist(&products).await?;
        Ok(Some(removed))
    }

    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let bytes = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn persist(&self, products: &[Product]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(products)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Timestamp-derived id token, bumped past any id already in the collection.
fn mint_id(products: &[Product]) -> String {
    let mut token = Utc::now().timestamp_millis();
    while products.iter().any(|p| p.id == token.to_string()) {
        token += 1;
    }
    token.to_string()
}
