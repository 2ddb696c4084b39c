//! Order totals, payment discounts and the outgoing order email.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::{CARD_INSTALLMENTS, CASH_DISCOUNT_RATE, CURRENCY_SYMBOL};
use crate::error::{QuoteError, Result};
use crate::order::Order;

pub fn format_money(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL} {amount:.2}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Pix,
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn discount_rate(&self) -> f64 {
        match self {
            PaymentMethod::Pix | PaymentMethod::Cash => CASH_DISCOUNT_RATE,
            PaymentMethod::Card => 0.0,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Pix | PaymentMethod::Cash => {
                format!("PIX/Cash (-{:.0}%)", CASH_DISCOUNT_RATE * 100.0)
            }
            PaymentMethod::Card => "Card".to_string(),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(format!(
                "invalid payment method '{s}', expected: pix, card, or cash"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Installments {
    pub count: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub payment: PaymentMethod,
    pub subtotal: f64,
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub final_total: f64,
    pub installments: Option<Installments>,
}

impl CheckoutSummary {
    pub fn new(order: &Order, payment: PaymentMethod) -> Result<Self> {
        if order.is_empty() {
            return Err(QuoteError::EmptyOrder);
        }
        let subtotal = order.subtotal();
        let discount_rate = payment.discount_rate();
        let final_total = subtotal * (1.0 - discount_rate);
        let installments = (payment == PaymentMethod::Card).then(|| Installments {
            count: CARD_INSTALLMENTS,
            amount: final_total / f64::from(CARD_INSTALLMENTS),
        });
        Ok(Self {
            payment,
            subtotal,
            discount_rate,
            discount_amount: subtotal * discount_rate,
            final_total,
            installments,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn compose(
        recipient: &str,
        customer: &Customer,
        order: &Order,
        summary: &CheckoutSummary,
    ) -> Self {
        let mut body = String::from("Hello, I would like to place the following order:\n\n");
        let _ = writeln!(body, "Customer: {}", customer.name);
        let _ = writeln!(body, "Email: {}", customer.email);
        let _ = writeln!(body, "Phone: {}", customer.phone);
        body.push_str("\nItems:\n");
        let lines: Vec<String> = order
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "{}. {} - {}x{}cm ({}un) - {}",
                    i + 1,
                    item.material_name,
                    item.width,
                    item.height,
                    item.quantity,
                    format_money(item.total_price)
                )
            })
            .collect();
        body.push_str(&lines.join("\n"));
        let _ = writeln!(
            body,
            "\n\nTotal: {} ({})",
            format_money(summary.final_total),
            summary.payment.label()
        );

        Self {
            to: recipient.to_string(),
            subject: format!("Print order - {}", customer.name),
            body,
        }
    }

    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            percent_encode(&self.subject),
            percent_encode(&self.body)
        )
    }
}

/// Encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Plain-text receipt for printing or saving.
pub fn printable_summary(customer: &Customer, order: &Order, summary: &CheckoutSummary) -> String {
    let mut out = String::from("Order summary\n\n");
    let _ = writeln!(out, "Name:  {}", customer.name);
    let _ = writeln!(out, "Email: {}", customer.email);
    let _ = writeln!(out, "Phone: {}", customer.phone);
    out.push('\n');

    for (i, item) in order.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}  {}",
            i + 1,
            item.material_name,
            format_money(item.total_price)
        );
        let border = if item.margin > 0.0 {
            format!(" + {}cm border", item.margin)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "   {}x{}cm{} ({}un) - {}",
            item.width, item.height, border, item.quantity, item.details
        );
    }

    out.push('\n');
    let _ = writeln!(out, "Subtotal: {}", format_money(summary.subtotal));
    if summary.discount_rate > 0.0 {
        let _ = writeln!(
            out,
            "Discount ({:.0}%): - {}",
            summary.discount_rate * 100.0,
            format_money(summary.discount_amount)
        );
    }
    let _ = writeln!(out, "Total: {}", format_money(summary.final_total));
    if let Some(plan) = summary.installments {
        let _ = writeln!(out, "or {}x of {}", plan.count, format_money(plan.amount));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::layout::compute_layout;
    use crate::types::{PrintRequest, RollCatalog};
    use pretty_assertions::assert_eq;

    fn order_with(items: &[(&str, PrintRequest)]) -> Order {
        let catalog = Catalog::seed();
        let rolls = RollCatalog::standard();
        let mut order = Order::new();
        for (id, req) in items {
            let material = catalog.get(id).unwrap();
            let layout = compute_layout(req, &material.pricing(), &rolls);
            order.add(material, req, &layout);
        }
        order
    }

    fn customer() -> Customer {
        Customer {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            phone: "11 99999-0000".to_string(),
        }
    }

    #[test]
    fn test_pix_and_cash_discount() {
        // 200x200 oversized on Photo Matte: 4 m² x 250 = 1000
        let order = order_with(&[("ph1", PrintRequest::new(200.0, 200.0, 0.0, 1))]);
        for payment in [PaymentMethod::Pix, PaymentMethod::Cash] {
            let summary = CheckoutSummary::new(&order, payment).unwrap();
            assert!((summary.subtotal - 1000.0).abs() < 1e-9);
            assert!((summary.discount_amount - 150.0).abs() < 1e-9);
            assert!((summary.final_total - 850.0).abs() < 1e-9);
            assert!(summary.installments.is_none());
        }
    }

    #[test]
    fn test_card_installments() {
        let order = order_with(&[("ph1", PrintRequest::new(200.0, 200.0, 0.0, 1))]);
        let summary = CheckoutSummary::new(&order, PaymentMethod::Card).unwrap();
        assert_eq!(summary.discount_rate, 0.0);
        assert!((summary.final_total - 1000.0).abs() < 1e-9);
        let plan = summary.installments.unwrap();
        assert_eq!(plan.count, 3);
        assert!((plan.amount - 333.333_333).abs() < 1e-3);
    }

    #[test]
    fn test_empty_order_rejected() {
        let order = Order::new();
        assert_eq!(
            CheckoutSummary::new(&order, PaymentMethod::Pix),
            Err(QuoteError::EmptyOrder)
        );
    }

    #[test]
    fn test_payment_from_str() {
        assert_eq!("PIX".parse::<PaymentMethod>(), Ok(PaymentMethod::Pix));
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_email_body() {
        let order = order_with(&[
            ("p1", PrintRequest::new(50.0, 70.0, 0.0, 2)),
            ("ph1", PrintRequest::new(200.0, 200.0, 0.0, 1)),
        ]);
        let summary = CheckoutSummary::new(&order, PaymentMethod::Card).unwrap();
        let email = EmailDraft::compose("orders@example.com", &customer(), &order, &summary);
        assert_eq!(email.subject, "Print order - Ana Souza");
        assert_eq!(
            email.body,
            "Hello, I would like to place the following order:\n\n\
             Customer: Ana Souza\n\
             Email: ana@example.com\n\
             Phone: 11 99999-0000\n\
             \nItems:\n\
             1. Hahnemühle Photo Rag 308g - 50x70cm (2un) - R$ 335.79\n\
             2. Photo Matte 200g - 200x200cm (1un) - R$ 1000.00\n\
             \nTotal: R$ 1335.79 (Card)\n"
        );
    }

    #[test]
    fn test_mailto_url_encoding() {
        let email = EmailDraft {
            to: "orders@example.com".to_string(),
            subject: "Print order - Zé".to_string(),
            body: "a b\n(1un)".to_string(),
        };
        assert_eq!(
            email.mailto_url(),
            "mailto:orders@example.com?subject=Print%20order%20-%20Z%C3%A9&body=a%20b%0A%281un%29"
        );
    }

    #[test]
    fn test_printable_summary_shows_discount() {
        let order = order_with(&[("ph1", PrintRequest::new(200.0, 200.0, 0.0, 1))]);
        let summary = CheckoutSummary::new(&order, PaymentMethod::Pix).unwrap();
        let text = printable_summary(&customer(), &order, &summary);
        assert!(text.contains("Name:  Ana Souza"));
        assert!(text.contains("Size exceeds standard rolls"));
        assert!(text.contains("Discount (15%): - R$ 150.00"));
        assert!(text.contains("Total: R$ 850.00"));
        assert!(!text.contains("or 3x"));
    }

    #[test]
    fn test_printable_summary_shows_border() {
        let order = order_with(&[
            ("ph1", PrintRequest::new(30.0, 40.0, 2.0, 1)),
            ("ph1", PrintRequest::new(20.0, 25.0, 0.0, 1)),
        ]);
        let summary = CheckoutSummary::new(&order, PaymentMethod::Card).unwrap();
        let text = printable_summary(&customer(), &order, &summary);
        assert!(text.contains("   30x40cm + 2cm border (1un) - Roll 61cm"));
        assert!(text.contains("   20x25cm (1un) - Roll 61cm"));
        assert_eq!(text.matches("border").count(), 1);
    }
}
