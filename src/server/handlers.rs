//! HTTP handlers for the invoice form actions
//!
//! Forms arrive as `application/x-www-form-urlencoded`. Outcomes map to
//! responses as follows:
//!
//! | Outcome                       | Response                        |
//! |-------------------------------|---------------------------------|
//! | `Redirect { to }`             | `303 See Other`, `Location: to` |
//! | `Completed`                   | `204 No Content`                |
//! | `Failed` with field errors    | `422` + form state JSON         |
//! | `Failed` from the store       | `500` + form state JSON         |

use crate::core::actions::InvoiceActions;
use crate::core::cache::ViewCache;
use crate::core::effects::ActionOutcome;
use crate::core::error::ActionError;
use crate::core::store::InvoiceStore;
use crate::core::validation::FormData;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state for the invoice routes
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub store: Arc<dyn InvoiceStore>,
    pub views: Arc<ViewCache>,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { to } => Redirect::to(&to).into_response(),
            ActionOutcome::Completed => StatusCode::NO_CONTENT.into_response(),
            ActionOutcome::Failed(state) => {
                let status = if state.is_validation_failure() {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(state)).into_response()
            }
        }
    }
}

/// GET {invoices_path} - the cached invoice list view
pub async fn list_invoices(State(state): State<AppState>) -> Result<Json<Value>, ActionError> {
    let path = state.actions.invoices_path().to_string();
    let store = state.store.clone();

    let view = state
        .views
        .get_or_render(&path, || async move {
            let invoices = store.list().await?;
            let count = invoices.len();
            Ok::<_, anyhow::Error>(json!({
                "invoices": invoices,
                "count": count
            }))
        })
        .await
        .map_err(|e| {
            tracing::error!(path = %path, error = %e, "failed to render invoice list");
            ActionError::Internal("Failed to load invoices".to_string())
        })?;

    Ok(Json(view))
}

/// POST {invoices_path} - create from form
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<FormData>,
) -> ActionOutcome {
    state.actions.create_invoice(&form).await
}

/// POST {invoices_path}/{id}/edit - update from form
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> ActionOutcome {
    state.actions.update_invoice(&id, &form).await
}

/// POST {invoices_path}/{id}/delete
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ActionOutcome {
    state.actions.delete_invoice(&id).await
}
