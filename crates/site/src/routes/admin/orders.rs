//! Admin order management: status updates and deletion.
//!
//! Orders are created by checkout only; the admin overwrites status (any
//! value to any value, no transition rules) and deletes records.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use mowlid_core::{OrderRowId, OrderStatus};
use serde::Deserialize;
use tracing::instrument;

use super::{ListQuery, error_redirect};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::store::OrderRow;

const LIST_PATH: &str = "/admin/orders";

/// Status dropdown form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Orders management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderRow>,
    pub statuses: &'static [OrderStatus],
    pub error: Option<String>,
}

/// List orders, newest first, with status dropdowns.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.store().list_orders().await {
        Ok(orders) => OrdersTemplate {
            orders,
            statuses: &OrderStatus::ALL,
            error: query.error,
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list orders");
            OrdersTemplate {
                orders: Vec::new(),
                statuses: &OrderStatus::ALL,
                error: Some("Failed to load orders".to_string()),
            }
            .into_response()
        }
    }
}

/// Overwrite an order's status.
#[instrument(skip(state, form))]
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        return error_redirect(LIST_PATH, "Unknown order status");
    };

    match state
        .store()
        .update_order_status(OrderRowId::new(id), status)
        .await
    {
        Ok(row) => {
            tracing::info!(order_id = %row.order_id, status = %status, "order status updated");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to update order status");
            error_redirect(LIST_PATH, "Failed to update order status")
        }
    }
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    match state.store().delete_order(OrderRowId::new(id)).await {
        Ok(()) => {
            tracing::info!(id, "order deleted");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to delete order");
            error_redirect(LIST_PATH, "Failed to delete order")
        }
    }
}
