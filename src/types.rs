use serde::{Deserialize, Serialize};

use crate::config::{CM_PER_M, DEFAULT_WASTE_PRICE_RATIO, STANDARD_ROLL_WIDTHS_CM};
use crate::error::{QuoteError, Result};

/// A rectangle in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area_m2(&self) -> f64 {
        (self.width / CM_PER_M) * (self.height / CM_PER_M)
    }

    /// Grows both dimensions by `margin` on each side.
    pub fn inflated(&self, margin: f64) -> Self {
        Self {
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Available roll stock widths (cm), kept sorted ascending.
///
/// The order matters: the optimizer breaks cost ties in favour of the
/// first candidate it evaluates, so iteration must be reproducible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollCatalog {
    widths: Vec<f64>,
}

impl RollCatalog {
    pub fn new(mut widths: Vec<f64>) -> Result<Self> {
        if widths.is_empty() {
            return Err(QuoteError::InvalidRollCatalog(
                "at least one roll width is required".to_string(),
            ));
        }
        if let Some(bad) = widths.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(QuoteError::InvalidRollCatalog(format!(
                "roll width must be positive, got {bad}"
            )));
        }
        widths.sort_by(f64::total_cmp);
        widths.dedup();
        Ok(Self { widths })
    }

    /// The 61cm and 111cm rolls stocked by default.
    pub fn standard() -> Self {
        Self {
            widths: STANDARD_ROLL_WIDTHS_CM.to_vec(),
        }
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn widest(&self) -> f64 {
        self.widths.last().copied().unwrap_or(0.0)
    }
}

impl Default for RollCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-m² prices for a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPricing {
    pub sell_price_per_m2: f64,
    /// Explicit price for off-cut area. `None` means
    /// [`DEFAULT_WASTE_PRICE_RATIO`] of the sell price.
    #[serde(default)]
    pub waste_price_per_m2: Option<f64>,
}

impl MaterialPricing {
    pub fn new(sell_price_per_m2: f64, waste_price_per_m2: Option<f64>) -> Result<Self> {
        if !sell_price_per_m2.is_finite() || sell_price_per_m2 <= 0.0 {
            return Err(QuoteError::InvalidPricing(format!(
                "sell price must be positive, got {sell_price_per_m2}"
            )));
        }
        if let Some(waste) = waste_price_per_m2
            && (!waste.is_finite() || waste < 0.0)
        {
            return Err(QuoteError::InvalidPricing(format!(
                "waste price must be non-negative, got {waste}"
            )));
        }
        Ok(Self {
            sell_price_per_m2,
            waste_price_per_m2,
        })
    }

    pub fn waste_rate(&self) -> f64 {
        self.waste_price_per_m2
            .unwrap_or(self.sell_price_per_m2 * DEFAULT_WASTE_PRICE_RATIO)
    }
}

/// A customer's requested print, in centimeters, before margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintRequest {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl PrintRequest {
    pub fn new(width: f64, height: f64, margin: f64, quantity: u32) -> Self {
        Self {
            width,
            height,
            margin,
            quantity,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Print size with the margin added on every side.
    pub fn inflated(&self) -> Size {
        self.size().inflated(self.margin)
    }

    /// Input gate run by callers before quoting. The optimizer assumes it passed.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(QuoteError::InvalidRequest(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if self.quantity == 0 {
            return Err(QuoteError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Inflated width runs across the roll.
    Portrait,
    /// Inflated height runs across the roll.
    Landscape,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// The print placed on a roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedLayout {
    pub roll_width: f64,
    pub orientation: Orientation,
    /// Length pulled off the roll, in cm.
    pub used_length: f64,
    /// Unprinted strip left across the roll, in cm.
    pub waste_width: f64,
    pub total_area_m2: f64,
    pub print_area_m2: f64,
    pub waste_area_m2: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    /// Print area over consumed roll area, as an unrounded percentage.
    pub utilization: f64,
    pub final_width_m: f64,
    pub final_height_m: f64,
}

impl FittedLayout {
    pub fn utilization_percent(&self) -> u32 {
        self.utilization.round() as u32
    }
}

/// The print is wider than every roll in both orientations; priced by plain area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OversizedLayout {
    pub area_m2: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub final_width_m: f64,
    pub final_height_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutResult {
    Fitted(FittedLayout),
    Oversized(OversizedLayout),
}

impl LayoutResult {
    pub fn unit_cost(&self) -> f64 {
        match self {
            LayoutResult::Fitted(f) => f.unit_cost,
            LayoutResult::Oversized(o) => o.unit_cost,
        }
    }

    pub fn total_cost(&self) -> f64 {
        match self {
            LayoutResult::Fitted(f) => f.total_cost,
            LayoutResult::Oversized(o) => o.total_cost,
        }
    }

    pub fn final_width_m(&self) -> f64 {
        match self {
            LayoutResult::Fitted(f) => f.final_width_m,
            LayoutResult::Oversized(o) => o.final_width_m,
        }
    }

    pub fn final_height_m(&self) -> f64 {
        match self {
            LayoutResult::Fitted(f) => f.final_height_m,
            LayoutResult::Oversized(o) => o.final_height_m,
        }
    }

    /// True when fallback area pricing was used.
    pub fn is_oversized(&self) -> bool {
        matches!(self, LayoutResult::Oversized(_))
    }

    pub fn fitted(&self) -> Option<&FittedLayout> {
        match self {
            LayoutResult::Fitted(f) => Some(f),
            LayoutResult::Oversized(_) => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            LayoutResult::Fitted(f) => format!(
                "Roll {}cm (utilization {}%)",
                f.roll_width,
                f.utilization_percent()
            ),
            LayoutResult::Oversized(_) => "Size exceeds standard rolls".to_string(),
        }
    }
}
