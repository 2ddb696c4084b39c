//! Roll layout optimizer.
//!
//! Places a single print on the cheapest roll. Every roll is tried in
//! both orientations and the candidates are compared by cost rather than
//! by raw waste, because off-cut area is billed at a different rate than
//! printed area.

use crate::config::CM_PER_M;
use crate::types::{
    FittedLayout, LayoutResult, MaterialPricing, Orientation, OversizedLayout, PrintRequest,
    RollCatalog, Size,
};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    roll_width: f64,
    orientation: Orientation,
    used_length: f64,
    waste_width: f64,
    total_area_m2: f64,
    print_area_m2: f64,
    waste_area_m2: f64,
    unit_cost: f64,
}

/// Finds the cheapest placement of `request` across `rolls`.
///
/// Assumes `request` passed [`PrintRequest::validate`]. Rolls are evaluated
/// in ascending width order, portrait before landscape, and a later
/// candidate only wins on strictly lower cost, so ties go to the first one
/// evaluated. Falls back to plain area pricing when nothing fits.
pub fn compute_layout(
    request: &PrintRequest,
    pricing: &MaterialPricing,
    rolls: &RollCatalog,
) -> LayoutResult {
    let print = request.inflated();
    let quantity = f64::from(request.quantity);

    let mut best: Option<Candidate> = None;
    for &roll_width in rolls.widths() {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let Some(candidate) = evaluate(print, roll_width, orientation, pricing) else {
                continue;
            };
            tracing::debug!(
                roll_width,
                %orientation,
                unit_cost = candidate.unit_cost,
                "layout candidate"
            );
            if best.is_none_or(|b| candidate.unit_cost < b.unit_cost) {
                best = Some(candidate);
            }
        }
    }

    let final_width_m = print.width / CM_PER_M;
    let final_height_m = print.height / CM_PER_M;

    match best {
        Some(c) => {
            tracing::debug!(
                roll_width = c.roll_width,
                orientation = %c.orientation,
                unit_cost = c.unit_cost,
                "selected layout"
            );
            LayoutResult::Fitted(FittedLayout {
                roll_width: c.roll_width,
                orientation: c.orientation,
                used_length: c.used_length,
                waste_width: c.waste_width,
                total_area_m2: c.total_area_m2,
                print_area_m2: c.print_area_m2,
                waste_area_m2: c.waste_area_m2,
                unit_cost: c.unit_cost,
                total_cost: c.unit_cost * quantity,
                utilization: c.print_area_m2 / c.total_area_m2 * 100.0,
                final_width_m,
                final_height_m,
            })
        }
        None => {
            let area_m2 = final_width_m * final_height_m;
            let unit_cost = area_m2 * pricing.sell_price_per_m2;
            tracing::debug!(%print, widest = rolls.widest(), "print exceeds every roll");
            LayoutResult::Oversized(OversizedLayout {
                area_m2,
                unit_cost,
                total_cost: unit_cost * quantity,
                final_width_m,
                final_height_m,
            })
        }
    }
}

fn evaluate(
    print: Size,
    roll_width: f64,
    orientation: Orientation,
    pricing: &MaterialPricing,
) -> Option<Candidate> {
    let (across, used_length) = match orientation {
        Orientation::Portrait => (print.width, print.height),
        Orientation::Landscape => (print.height, print.width),
    };
    if across > roll_width {
        return None;
    }

    let total_area_m2 = (roll_width / CM_PER_M) * (used_length / CM_PER_M);
    let print_area_m2 = print.area_m2();
    let waste_area_m2 = total_area_m2 - print_area_m2;
    let unit_cost =
        print_area_m2 * pricing.sell_price_per_m2 + waste_area_m2 * pricing.waste_rate();

    Some(Candidate {
        roll_width,
        orientation,
        used_length,
        waste_width: roll_width - across,
        total_area_m2,
        print_area_m2,
        waste_area_m2,
        unit_cost,
    })
}
