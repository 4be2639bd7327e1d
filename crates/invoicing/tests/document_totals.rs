use argentum_core::helper::round_half_up;
use argentum_core::params_from_json;
use argentum_invoicing::{Document, DocumentKind, DocumentModel};
use proptest::prelude::*;
use serde_json::json;

const EPSILON: f64 = 1e-9;

fn issuer() -> serde_json::Value {
    json!({
        "id": "AAA010101AAA",
        "name": "Acme S.A.",
        "email": "billing@acme.example",
        "address": {
            "address_1": "Av. Reforma 1",
            "locality": "CDMX",
            "country": "MX"
        }
    })
}

fn receiver() -> serde_json::Value {
    json!({ "id": "XAXX010101000", "name": "Público en general" })
}

#[test]
fn ticket_with_item_discount_and_shared_vat() -> anyhow::Result<()> {
    argentum_observability::init();

    let ticket = Document::ticket(params_from_json(json!({
        "from": issuer(),
        "currency": "mxn",
        "items": [
            { "name": "Item A", "price": 100, "quantity": 1, "taxes": [{ "type": "vat", "rate": 16 }] },
            { "name": "Item B", "price": 50, "quantity": 2, "discount": 10, "taxes": [{ "type": "vat", "rate": 16 }] }
        ]
    })))?;

    ticket.validate()?;

    assert!((ticket.subtotal() - 200.0).abs() < EPSILON);

    let taxes = ticket.taxes();
    assert_eq!(taxes.count(), 1);
    let vat = &taxes.all()[0];
    assert_eq!(vat.name(), Some("VAT"));
    assert!((vat.base_amount().unwrap_or_default() - 190.0).abs() < EPSILON);

    assert!((ticket.taxes_amount() - 30.40).abs() < EPSILON);
    assert!((ticket.discounts_amount() - 10.0).abs() < EPSILON);
    assert!((ticket.total() - 220.40).abs() < EPSILON);
    assert_eq!(ticket.format_currency(ticket.total()), "220.40");

    Ok(())
}

#[test]
fn invoice_requires_receiver_and_view_reports_totals() -> anyhow::Result<()> {
    argentum_observability::init();

    let params = json!({
        "from": issuer(),
        "items": [
            { "name": "Consulting", "price": "1000.00", "quantity": 3, "taxes": [{ "name": "IVA", "rate": 16 }] }
        ]
    });

    let incomplete = Document::invoice(params_from_json(params.clone()))?;
    let err = incomplete.validate().unwrap_err();
    assert_eq!(err.to_string(), "The to parameter is required");
    assert!(err.is_validation());

    let mut complete = params;
    complete["to"] = receiver();
    let invoice = Document::invoice(params_from_json(complete))?;
    invoice.validate()?;

    let model: &dyn DocumentModel = &invoice;
    assert_eq!(model.document_type(), "invoice");

    let view = model.view();
    assert_eq!(view.taxes.len(), 1);
    assert_eq!(view.taxes[0].tax_type.as_deref(), Some("iva"));
    assert!((view.taxes_amount - 480.0).abs() < EPSILON);
    assert!((view.total - 3480.0).abs() < EPSILON);

    let rendered = serde_json::to_value(&view)?;
    assert_eq!(rendered["type"], "invoice");
    assert_eq!(rendered["parameters"]["to"]["name"], "Público en general");
    assert_eq!(rendered["taxes"][0]["base_amount"], 3000.0);

    Ok(())
}

#[test]
fn credit_note_relates_to_original_invoice() -> anyhow::Result<()> {
    let invoice = json!({ "id": "F-100", "from": issuer(), "to": receiver() });
    let note = Document::credit_note(params_from_json(json!({
        "from": issuer(),
        "to": receiver(),
        "relations": [{ "type": "credits", "name": "Original", "object": "F-100" }],
        "items": [{ "name": "Refund", "price": 10, "quantity": 1 }]
    })))?;
    note.validate()?;
    assert_eq!(note.kind(), DocumentKind::CreditNote);
    assert_eq!(note.relations()[0].name(), Some("Original"));

    let original = Document::invoice(params_from_json(invoice))?;
    assert_eq!(original.id(), Some("F-100"));
    Ok(())
}

fn item_strategy() -> impl Strategy<Value = (u32, u32, u32, usize)> {
    // price in cents, quantity, discount in cents, index into RATES
    (1u32..100_000, 0u32..20, 0u32..1_000, 0usize..RATES.len())
}

const RATES: [(&str, f64); 3] = [("vat", 16.0), ("ieps", 8.0), ("ret", -10.67)];

fn ticket_from(lines: &[(u32, u32, u32, usize)]) -> Document {
    let items: Vec<serde_json::Value> = lines
        .iter()
        .enumerate()
        .map(|(n, &(price, quantity, discount, rate))| {
            let (kind, rate) = RATES[rate];
            json!({
                "name": format!("Item {n}"),
                "price": f64::from(price) / 100.0,
                "quantity": quantity,
                "discount": f64::from(discount) / 100.0,
                "taxes": [{ "type": kind, "rate": rate }]
            })
        })
        .collect();

    Document::ticket(params_from_json(json!({ "from": issuer(), "items": items })))
        .expect("generated ticket is well formed")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: total = subtotal - discounts + taxes, also through the view.
    #[test]
    fn total_identity_holds(lines in prop::collection::vec(item_strategy(), 0..12)) {
        let ticket = ticket_from(&lines);
        let expected = ticket.subtotal() - ticket.discounts_amount() + ticket.taxes_amount();
        prop_assert!((ticket.total() - expected).abs() < EPSILON);
        prop_assert!((ticket.view().total - expected).abs() < EPSILON);
    }

    /// Property: each tax type is rounded once over its accumulated base.
    #[test]
    fn taxes_round_once_per_type(lines in prop::collection::vec(item_strategy(), 1..12)) {
        let ticket = ticket_from(&lines);

        let mut expected = 0.0;
        for (kind, rate) in RATES {
            let base: f64 = ticket
                .items()
                .iter()
                .filter(|item| item.taxes()[0].tax_type() == Some(kind))
                .map(|item| item.amount() - item.discount())
                .sum();
            if ticket.items().iter().any(|item| item.taxes()[0].tax_type() == Some(kind)) {
                expected += round_half_up(base * rate / 100.0, 2);
            }
        }

        prop_assert!((ticket.taxes_amount() - expected).abs() < 1e-6);
    }

    /// Property: a fixed amount on the first occurrence wins over the rate.
    #[test]
    fn fixed_amount_takes_precedence(
        fixed in -500.0f64..500.0,
        lines in prop::collection::vec(item_strategy(), 1..8),
    ) {
        let mut ticket = ticket_from(&lines);
        let mut taxes = ticket.items()[0].taxes().to_vec();
        taxes[0].set_fixed_amount(fixed);
        let mut items: Vec<_> = ticket.items().to_vec();
        for item in &mut items {
            item.set_taxes(taxes.clone());
        }
        ticket.set_items(items);

        let synthesized = ticket.taxes();
        prop_assert_eq!(synthesized.count(), 1);
        prop_assert_eq!(ticket.taxes_amount(), fixed);
    }
}
