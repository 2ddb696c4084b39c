//! JSON HTTP routes for quoting and checkout.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::{Catalog, Material, MaterialCategory};
use crate::checkout::{CheckoutSummary, Customer, EmailDraft, PaymentMethod};
use crate::error::QuoteError;
use crate::layout::compute_layout;
use crate::order::{LineItem, Order};
use crate::types::{LayoutResult, MaterialPricing, PrintRequest, RollCatalog};

#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub rolls: RollCatalog,
    pub order_email: String,
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            QuoteError::InvalidRequest(_)
            | QuoteError::InvalidPricing(_)
            | QuoteError::InvalidRollCatalog(_)
            | QuoteError::NoMaterialSelected => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            QuoteError::UnknownMaterial(_) | QuoteError::LineItemNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            QuoteError::EmptyOrder => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_ORDER"),
            QuoteError::InvalidConfig { .. } => {
                tracing::error!("configuration error: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub print: PrintRequest,
    #[serde(default)]
    pub material_id: Option<String>,
    /// Ad-hoc sell price per m², used when no material is given.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub waste_price: Option<f64>,
    /// Overrides the configured roll widths (cm).
    #[serde(default)]
    pub rolls: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub layout: LayoutResult,
    pub description: String,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    #[serde(flatten)]
    pub print: PrintRequest,
    #[serde(default)]
    pub material_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub payment: PaymentMethod,
    #[serde(default)]
    pub customer: Customer,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub items: Vec<LineItem>,
    pub summary: CheckoutSummary,
    pub email: EmailDraft,
    pub mailto: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/materials", get(materials))
        .route("/quote", post(quote))
        .route("/order", post(order))
        .with_state(Arc::new(state))
}

#[derive(Debug, Serialize)]
pub struct MaterialGroup {
    pub category: MaterialCategory,
    pub label: &'static str,
    pub materials: Vec<Material>,
}

async fn materials(State(state): State<Arc<AppState>>) -> Json<Vec<MaterialGroup>> {
    let groups = state
        .catalog
        .by_category()
        .into_iter()
        .map(|g| MaterialGroup {
            category: g.category,
            label: g.label,
            materials: g.materials.into_iter().cloned().collect(),
        })
        .collect();
    Json(groups)
}

/// A catalog material wins over an ad-hoc price; a blank id counts as none.
fn pricing_for(
    catalog: &Catalog,
    material_id: Option<&str>,
    price: Option<f64>,
    waste_price: Option<f64>,
) -> Result<MaterialPricing, QuoteError> {
    let material_id = material_id.map(str::trim).filter(|id| !id.is_empty());
    match (material_id, price) {
        (None, Some(price)) => MaterialPricing::new(price, waste_price),
        _ => Ok(catalog.resolve(material_id)?.pricing()),
    }
}

async fn quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, QuoteError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /quote"
    );

    req.print.validate()?;
    let pricing = pricing_for(
        &state.catalog,
        req.material_id.as_deref(),
        req.price,
        req.waste_price,
    )?;
    let rolls = match req.rolls {
        Some(widths) => RollCatalog::new(widths)?,
        None => state.rolls.clone(),
    };

    let layout = compute_layout(&req.print, &pricing, &rolls);
    Ok(Json(QuoteResponse {
        description: layout.description(),
        unit_price: layout.unit_cost(),
        total_price: layout.total_cost(),
        layout,
    }))
}

async fn order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, QuoteError> {
    tracing::info!(items = req.items.len(), payment = ?req.payment, "POST /order");

    let mut order = Order::new();
    for item in &req.items {
        item.print.validate()?;
        let material = state.catalog.resolve(item.material_id.as_deref())?;
        let layout = compute_layout(&item.print, &material.pricing(), &state.rolls);
        order.add(material, &item.print, &layout);
    }

    let summary = CheckoutSummary::new(&order, req.payment)?;
    let email = EmailDraft::compose(&state.order_email, &req.customer, &order, &summary);
    Ok(Json(OrderResponse {
        items: order.items().to_vec(),
        summary,
        mailto: email.mailto_url(),
        email,
    }))
}
