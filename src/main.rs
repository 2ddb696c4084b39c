use clap::Parser;
use roll_quote::catalog::{Catalog, Material};
use roll_quote::checkout::{
    CheckoutSummary, Customer, EmailDraft, PaymentMethod, format_money, printable_summary,
};
use roll_quote::config::{DEFAULT_ORDER_EMAIL, parse_roll_widths};
use roll_quote::error::{QuoteError, Result};
use roll_quote::layout::compute_layout;
use roll_quote::order::Order;
use roll_quote::render;
use roll_quote::types::{LayoutResult, MaterialPricing, PrintRequest, RollCatalog};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "roll_quote",
    about = "Large-format print quoting on standard roll widths"
)]
struct Cli {
    /// Print size in cm (WxH, e.g. 50x70)
    #[arg(long, required_unless_present_any = ["items", "list_materials"])]
    size: Option<String>,

    /// Order items as WxH:qty (e.g. 50x70:2 30x40:5); builds an order and checks out
    #[arg(long = "item", num_args = 1.., conflicts_with = "size")]
    items: Vec<String>,

    /// Margin added on each side, in cm
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Number of copies (with --size)
    #[arg(long, default_value_t = 1)]
    qty: u32,

    /// Material id from the catalog (see --list-materials)
    #[arg(long)]
    material: Option<String>,

    /// Sell price per m², instead of a catalog material
    #[arg(long, conflicts_with = "material")]
    price: Option<f64>,

    /// Waste price per m² (defaults to 30% of the sell price)
    #[arg(long, requires = "price")]
    waste_price: Option<f64>,

    /// Roll widths in cm, comma-separated
    #[arg(long, default_value = "61,111", value_parser = parse_rolls)]
    rolls: RollCatalog,

    /// Payment method: pix, card, or cash
    #[arg(long, default_value = "pix")]
    payment: PaymentMethod,

    /// Customer name
    #[arg(long, default_value = "")]
    name: String,

    /// Customer email
    #[arg(long, default_value = "")]
    email: String,

    /// Customer phone
    #[arg(long, default_value = "")]
    phone: String,

    /// Print the mailto: link for the order email
    #[arg(long)]
    mailto: bool,

    /// Show ASCII layout of the roll
    #[arg(long)]
    layout: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// List catalog materials and exit
    #[arg(long)]
    list_materials: bool,

    /// Log optimizer decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_rolls(s: &str) -> std::result::Result<RollCatalog, String> {
    parse_roll_widths(s).map_err(|e| e.to_string())
}

fn parse_dimensions(s: &str) -> Result<(f64, f64)> {
    let invalid = || QuoteError::InvalidRequest(format!("invalid dimensions '{s}', expected WxH"));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = w.trim().parse::<f64>().map_err(|_| invalid())?;
    let height = h.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((width, height))
}

fn parse_item(s: &str, margin: f64) -> Result<PrintRequest> {
    let (dims, qty) = s.split_once(':').unwrap_or((s, "1"));
    let (width, height) = parse_dimensions(dims)?;
    let quantity = qty
        .trim()
        .parse::<u32>()
        .map_err(|_| QuoteError::InvalidRequest(format!("invalid quantity in '{s}'")))?;
    let request = PrintRequest::new(width, height, margin, quantity);
    request.validate()?;
    Ok(request)
}

fn print_layout(request: &PrintRequest, result: &LayoutResult, show_layout: bool) {
    println!(
        "Print {}x{}cm, margin {}cm, {} cop{}",
        request.width,
        request.height,
        request.margin,
        request.quantity,
        if request.quantity == 1 { "y" } else { "ies" }
    );
    println!(
        "  final size {:.2} x {:.2} m",
        result.final_width_m(),
        result.final_height_m()
    );
    match result {
        LayoutResult::Fitted(f) => {
            println!(
                "  roll {}cm {}, {:.1}cm used, {:.1}cm waste strip",
                f.roll_width, f.orientation, f.used_length, f.waste_width
            );
            println!(
                "  {:.4} m² printed + {:.4} m² waste",
                f.print_area_m2, f.waste_area_m2
            );
            if show_layout {
                print!("{}", render::render_layout(f));
            }
        }
        LayoutResult::Oversized(o) => {
            println!("  exceeds every roll, priced by area ({:.4} m²)", o.area_m2);
        }
    }
    println!("  {}", result.description());
    println!(
        "  unit {}  total {}",
        format_money(result.unit_cost()),
        format_money(result.total_cost())
    );
}

fn run(cli: Cli) -> Result<()> {
    let catalog = Catalog::seed();

    if cli.list_materials {
        for group in catalog.by_category() {
            println!("{}:", group.label);
            for m in group.materials {
                println!(
                    "  {:<4} {} ({}/m²)",
                    m.id,
                    m.name,
                    format_money(m.sell_price_per_m2)
                );
            }
        }
        return Ok(());
    }

    if let Some(size) = &cli.size {
        let (width, height) = parse_dimensions(size)?;
        let request = PrintRequest::new(width, height, cli.margin, cli.qty);
        request.validate()?;
        let pricing = match cli.price {
            Some(price) => MaterialPricing::new(price, cli.waste_price)?,
            None => catalog.resolve(cli.material.as_deref())?.pricing(),
        };
        let result = compute_layout(&request, &pricing, &cli.rolls);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
        } else {
            print_layout(&request, &result, cli.layout);
        }
        return Ok(());
    }

    let material = match cli.price {
        Some(price) => Material::custom(MaterialPricing::new(price, cli.waste_price)?),
        None => catalog.resolve(cli.material.as_deref())?.clone(),
    };
    let mut order = Order::new();
    for item in &cli.items {
        let request = parse_item(item, cli.margin)?;
        let result = compute_layout(&request, &material.pricing(), &cli.rolls);
        if !cli.json {
            print_layout(&request, &result, cli.layout);
        }
        order.add(&material, &request, &result);
    }

    let customer = Customer {
        name: cli.name,
        email: cli.email,
        phone: cli.phone,
    };
    let summary = CheckoutSummary::new(&order, cli.payment)?;
    let email = EmailDraft::compose(DEFAULT_ORDER_EMAIL, &customer, &order, &summary);

    if cli.json {
        let out = serde_json::json!({
            "items": order.items(),
            "summary": summary,
            "mailto": email.mailto_url(),
            "email": email,
        });
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        return Ok(());
    }

    println!();
    print!("{}", printable_summary(&customer, &order, &summary));
    if cli.mailto {
        println!();
        println!("{}", email.mailto_url());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
