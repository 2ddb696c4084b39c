use serde::Serialize;

use crate::catalog::Material;
use crate::error::{QuoteError, Result};
use crate::types::{LayoutResult, PrintRequest};

/// Snapshot of a confirmed quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub id: u64,
    pub material_id: String,
    pub material_name: String,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub final_width_m: f64,
    pub final_height_m: f64,
    pub details: String,
}

/// Line items in the order they were added, with a running subtotal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Order {
    items: Vec<LineItem>,
    #[serde(skip)]
    next_id: u64,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the quote into a new line item.
    pub fn add(
        &mut self,
        material: &Material,
        request: &PrintRequest,
        layout: &LayoutResult,
    ) -> &LineItem {
        self.next_id += 1;
        let item = LineItem {
            id: self.next_id,
            material_id: material.id.clone(),
            material_name: material.name.clone(),
            width: request.width,
            height: request.height,
            margin: request.margin,
            quantity: request.quantity,
            unit_price: layout.unit_cost(),
            total_price: layout.total_cost(),
            final_width_m: layout.final_width_m(),
            final_height_m: layout.final_height_m(),
            details: layout.description(),
        };
        tracing::info!(
            id = item.id,
            material = %item.material_id,
            total = item.total_price,
            "line item added"
        );
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub fn remove(&mut self, id: u64) -> Result<LineItem> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(QuoteError::LineItemNotFound(id))?;
        tracing::info!(id, "line item removed");
        Ok(self.items.remove(idx))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.total_price)
    }
}
