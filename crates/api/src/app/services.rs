use std::path::PathBuf;
use std::sync::Arc;

use vitrine_catalog::Supplier;
use vitrine_infra::{CatalogReader, CatalogWriter, InMemoryCatalog, MediaStore, PostgresCatalog};

/// Runtime configuration, sourced from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub use_persistent_store: bool,
    pub database_url: Option<String>,
    pub upload_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            use_persistent_store: std::env::var("USE_PERSISTENT_STORES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            database_url: std::env::var("DATABASE_URL").ok(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "Files".to_string())
                .into(),
        }
    }
}

/// Backing services shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    pub reader: Arc<dyn CatalogReader>,
    pub writer: Arc<dyn CatalogWriter>,
    pub media: Arc<MediaStore>,
}

pub async fn build_services(config: &AppConfig) -> AppServices {
    let media = Arc::new(MediaStore::new(config.upload_dir.clone()));

    if config.use_persistent_store {
        let database_url = config
            .database_url
            .as_deref()
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

        let pool = sqlx::PgPool::connect(database_url)
            .await
            .expect("failed to connect to Postgres");

        let store = PostgresCatalog::new(pool);
        store
            .ensure_schema()
            .await
            .expect("failed to ensure catalog schema");

        tracing::info!("catalog store: postgres");
        let store = Arc::new(store);
        return AppServices {
            reader: store.clone(),
            writer: store,
            media,
        };
    }

    // In-memory wiring (dev/test): seeded suppliers so the selection list is
    // usable out of the box.
    let store = Arc::new(InMemoryCatalog::with_suppliers([
        Supplier::new("Acme Wholesale", "10.680.168/0001-01", true),
        Supplier::new("Northwind Trading", "32.493.556/0001-88", true),
    ]));

    tracing::info!("catalog store: in-memory");
    AppServices {
        reader: store.clone(),
        writer: store,
        media,
    }
}
