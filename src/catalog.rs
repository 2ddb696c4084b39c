//! Printable materials and their prices.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::types::MaterialPricing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialCategory {
    Photo,
    FineArt,
    Canvas,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 3] = [
        MaterialCategory::Photo,
        MaterialCategory::FineArt,
        MaterialCategory::Canvas,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Photo => "Photo line",
            MaterialCategory::FineArt => "Fine Art line",
            MaterialCategory::Canvas => "Canvas line",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub sell_price_per_m2: f64,
    /// Cost basis, used as the waste price when present.
    #[serde(default)]
    pub cost_price_per_m2: Option<f64>,
    pub description: String,
    pub category: MaterialCategory,
}

impl Material {
    /// Ad-hoc material for a price typed in by hand rather than picked from the catalog.
    pub fn custom(pricing: MaterialPricing) -> Self {
        Self {
            id: "custom".to_string(),
            name: "Custom material".to_string(),
            sell_price_per_m2: pricing.sell_price_per_m2,
            cost_price_per_m2: pricing.waste_price_per_m2,
            description: String::new(),
            category: MaterialCategory::Photo,
        }
    }

    pub fn pricing(&self) -> MaterialPricing {
        MaterialPricing {
            sell_price_per_m2: self.sell_price_per_m2,
            waste_price_per_m2: self.cost_price_per_m2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: MaterialCategory,
    pub label: &'static str,
    pub materials: Vec<&'a Material>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// The house paper range.
    pub fn seed() -> Self {
        let material = |id: &str, name: &str, price: f64, description: &str, category| Material {
            id: id.to_string(),
            name: name.to_string(),
            sell_price_per_m2: price,
            cost_price_per_m2: None,
            description: description.to_string(),
            category,
        };
        Self::new(vec![
            material(
                "p1",
                "Hahnemühle Photo Rag 308g",
                450.0,
                "100% cotton paper with a smooth texture, the most popular Fine Art choice.",
                MaterialCategory::FineArt,
            ),
            material(
                "p2",
                "Hahnemühle Bamboo 290g",
                480.0,
                "90% bamboo fibres, eco-friendly with a warm natural tone.",
                MaterialCategory::FineArt,
            ),
            material(
                "ph1",
                "Photo Matte 200g",
                250.0,
                "High-resolution matte paper, ideal for shoots and sample books.",
                MaterialCategory::Photo,
            ),
            material(
                "ph2",
                "Photo Glossy 240g",
                280.0,
                "High-gloss paper with sharp detail and strong contrast.",
                MaterialCategory::Photo,
            ),
            material(
                "c1",
                "Canvas Canson PhotoArt Pro",
                380.0,
                "High-quality water-resistant canvas.",
                MaterialCategory::Canvas,
            ),
        ])
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Looks up the selected material, failing when nothing is selected.
    pub fn resolve(&self, id: Option<&str>) -> Result<&Material> {
        let id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(QuoteError::NoMaterialSelected)?;
        self.get(id)
            .ok_or_else(|| QuoteError::UnknownMaterial(id.to_string()))
    }

    /// Materials grouped Photo, Fine Art, Canvas; catalog order within each group.
    pub fn by_category(&self) -> Vec<CategoryGroup<'_>> {
        MaterialCategory::ALL
            .iter()
            .map(|&category| CategoryGroup {
                category,
                label: category.label(),
                materials: self
                    .materials
                    .iter()
                    .filter(|m| m.category == category)
                    .collect(),
            })
            .collect()
    }
}
