use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::ProductStore;
use crate::uploads::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(ProductStore::new(&config.data_file)),
            uploads: Arc::new(UploadStore::new(&config.upload_dir)),
        }
    }
}
