//! Product administration: listing, detail, create/edit forms, delete.
//!
//! Each handler is one unit of work: it builds a fresh `Notifier`, runs the
//! flow, and either redirects (success) or re-renders the form page with the
//! collected notifications (recoverable failure). Nothing is persisted while
//! the notifier holds any message.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Multipart, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use vitrine_catalog::{Product, Supplier};
use vitrine_core::{Notifier, ProductId};
use vitrine_infra::ImageUpload;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/new", get(new_product_form))
        .route("/:id", get(product_detail).post(edit_product))
        .route("/:id/edit", get(edit_product_form))
        .route("/:id/delete", get(delete_confirmation).post(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.reader.products_with_suppliers().await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    let page = dto::ProductListPage {
        products: items.into_iter().map(dto::product_view).collect(),
    };
    (StatusCode::OK, Json(page)).into_response()
}

pub async fn product_detail(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match services.reader.product_with_supplier(id).await {
        Ok(Some(joined)) => {
            (StatusCode::OK, Json(dto::ProductDetailPage { product: dto::product_view(joined) }))
                .into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn new_product_form(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let suppliers = match services.reader.suppliers().await {
        Ok(suppliers) => suppliers,
        Err(e) => return errors::store_error_to_response(e),
    };

    form_page(StatusCode::OK, dto::ProductForm::default(), suppliers, &Notifier::new())
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let (form, upload) = match read_product_form(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    // The selection list rides along on every outcome, so a failed submit
    // re-renders the form identically.
    let suppliers = match services.reader.suppliers().await {
        Ok(suppliers) => suppliers,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut notifier = Notifier::new();
    let Some(draft) = validate_against_suppliers(&form, &suppliers, &mut notifier) else {
        return form_page(StatusCode::UNPROCESSABLE_ENTITY, form, suppliers, &notifier);
    };

    let mut product = Product::new(
        draft.supplier_id,
        draft.name,
        draft.description,
        draft.price,
        draft.active,
    );

    if let Some(upload) = upload {
        let prefix = format!("{}_", Uuid::now_v7());
        match services.media.store(&upload, &prefix, &mut notifier).await {
            Ok(true) => product.image = Some(format!("{prefix}{}", upload.file_name())),
            Ok(false) => {
                return form_page(StatusCode::UNPROCESSABLE_ENTITY, form, suppliers, &notifier)
            }
            Err(e) => return errors::io_error_to_response(e),
        }
    }

    if let Err(e) = services.writer.add_product(product).await {
        return errors::store_error_to_response(e);
    }

    Redirect::to("/products").into_response()
}

pub async fn edit_product_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let joined = match services.reader.product_with_supplier(id).await {
        Ok(Some(joined)) => joined,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let suppliers = match services.reader.suppliers().await {
        Ok(suppliers) => suppliers,
        Err(e) => return errors::store_error_to_response(e),
    };

    form_page(
        StatusCode::OK,
        dto::ProductForm::from_product(&joined.product),
        suppliers,
        &Notifier::new(),
    )
}

pub async fn edit_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(form): Form<dto::ProductForm>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let suppliers = match services.reader.suppliers().await {
        Ok(suppliers) => suppliers,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut notifier = Notifier::new();
    let Some(draft) = validate_against_suppliers(&form, &suppliers, &mut notifier) else {
        // The supplier list is not re-populated on an edit failure; the page
        // renders with what was submitted.
        return form_page(StatusCode::UNPROCESSABLE_ENTITY, form, Vec::new(), &notifier);
    };

    let existing = match services.reader.product_with_supplier(id).await {
        Ok(Some(joined)) => joined.product,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    // Creation time and stored image carry through; edit never uploads.
    let updated = Product {
        id,
        supplier_id: draft.supplier_id,
        name: draft.name,
        description: draft.description,
        price: draft.price,
        active: draft.active,
        created_at: existing.created_at,
        image: existing.image,
    };

    if let Err(e) = services.writer.update_product(updated).await {
        return errors::store_error_to_response(e);
    }

    Redirect::to("/products").into_response()
}

pub async fn delete_confirmation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match services.reader.product_with_supplier(id).await {
        Ok(Some(joined)) => {
            (StatusCode::OK, Json(dto::DeleteConfirmPage { product: dto::product_view(joined) }))
                .into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Idempotent: deleting an id that no longer exists still redirects.
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    if let Err(e) = services.writer.delete_product(id).await {
        return errors::store_error_to_response(e);
    }

    Redirect::to("/products").into_response()
}

/// Structural validation plus the reference check: the submitted supplier must
/// be one of the offered options.
fn validate_against_suppliers(
    form: &dto::ProductForm,
    suppliers: &[Supplier],
    notifier: &mut Notifier,
) -> Option<dto::ProductDraft> {
    let draft = form.validate(notifier)?;
    if !suppliers.iter().any(|s| s.id == draft.supplier_id) {
        notifier.notify("a supplier must be selected");
        return None;
    }
    Some(draft)
}

fn form_page(
    status: StatusCode,
    form: dto::ProductForm,
    suppliers: Vec<Supplier>,
    notifier: &Notifier,
) -> axum::response::Response {
    (status, Json(dto::ProductFormPage::new(form, suppliers, notifier))).into_response()
}

/// Pull the product fields and the optional image part out of a multipart
/// submission. A part named `image` without a client file name counts as "no
/// image attached".
async fn read_product_form(
    mut multipart: Multipart,
) -> Result<(dto::ProductForm, Option<ImageUpload>), axum::response::Response> {
    let mut form = dto::ProductForm::default();
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_form",
                    e.to_string(),
                ))
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        return Err(errors::json_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_form",
                            e.to_string(),
                        ))
                    }
                };
                if !file_name.is_empty() {
                    upload = Some(ImageUpload::new(file_name, bytes.to_vec()));
                }
            }
            _ => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => {
                        return Err(errors::json_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_form",
                            e.to_string(),
                        ))
                    }
                };
                match name.as_str() {
                    "name" => form.name = value,
                    "description" => form.description = value,
                    "price" => form.price = value,
                    "supplier_id" => form.supplier_id = value,
                    "active" => form.active = matches!(value.as_str(), "true" | "on" | "1"),
                    _ => {}
                }
            }
        }
    }

    Ok((form, upload))
}
