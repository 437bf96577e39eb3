use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_suppliers))
}

/// Supplier reference data, read-only from this module's perspective.
pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let suppliers = match services.reader.suppliers().await {
        Ok(suppliers) => suppliers,
        Err(e) => return errors::store_error_to_response(e),
    };

    let page = dto::SupplierListPage {
        suppliers: suppliers.into_iter().map(dto::supplier_view).collect(),
    };
    (StatusCode::OK, Json(page)).into_response()
}
