//! Normalization of DigiKey V4 products into [`ComponentAvailability`].

use partscout_core::{ComponentAvailability, ComponentGrade, Distributor, PriceBreak};
use serde_json::Value;

use super::types::Product;
use crate::heuristics::{infer_grade, parse_temperature_range};

/// Deserializes one raw product, logging and dropping it on failure.
pub(crate) fn decode_product(raw: Value) -> Option<Product> {
    match serde_json::from_value::<Product>(raw) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(distributor = "digikey", error = %e, "dropping malformed product record");
            None
        }
    }
}

/// Coerces a JSON number or numeric string to `f64`.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(['$', ','], "").parse::<f64>().ok(),
        _ => None,
    }
}

/// Parses one `{BreakQuantity, UnitPrice}` entry. Unparseable entries yield `None`.
pub(crate) fn parse_price_break(raw: &Value) -> Option<PriceBreak> {
    let quantity = number(raw.get("BreakQuantity")?)?;
    let unit_price = number(raw.get("UnitPrice")?)?;
    if quantity < 0.0 || quantity.fract() > 0.0 || unit_price < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quantity = quantity as u64;
    Some(PriceBreak::usd(quantity, unit_price))
}

fn stock(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0),
        _ => 0,
    }
}

fn lead_time(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Converts one DigiKey product into the canonical record, or `None` when
/// neither the product nor `fallback_mpn` supplies a part number.
pub(crate) fn normalize_product(
    product: Product,
    fallback_mpn: &str,
) -> Option<ComponentAvailability> {
    let Some(mpn) = non_empty(product.manufacturer_part_number)
        .or_else(|| non_empty(Some(fallback_mpn.to_owned())))
    else {
        tracing::warn!(distributor = "digikey", "dropping product without a manufacturer part number");
        return None;
    };
    let manufacturer = product
        .manufacturer
        .and_then(|m| non_empty(m.name))
        .unwrap_or_else(|| "Unknown".to_owned());
    let description = non_empty(product.product_description)
        .or_else(|| product.description.and_then(|d| non_empty(d.product_description)))
        .unwrap_or_default();

    let mut component =
        ComponentAvailability::new(mpn, manufacturer, description, Distributor::DigiKey);
    component.stock = stock(product.quantity_available.as_ref());
    component.price_breaks = product
        .standard_pricing
        .iter()
        .filter_map(parse_price_break)
        .collect();
    component.datasheet_url = non_empty(product.primary_datasheet);
    component.product_url = non_empty(product.product_url);
    component.lead_time = lead_time(product.standard_lead_time);
    component.package = product.packaging.and_then(|p| non_empty(p.name));

    let mut range = None;
    let mut grade = None;
    for param in &product.parameters {
        if range.is_none() && param.parameter.to_lowercase().contains("operating temperature") {
            range = parse_temperature_range(&param.value);
        }
        if grade.is_none() {
            grade = infer_grade(&param.value);
        }
        component
            .specs
            .entry(param.parameter.clone())
            .or_insert_with(|| param.value.clone());
    }
    if let Some((lo, hi)) = range {
        component.set_temperature_range(Some(lo), Some(hi));
    }
    component.grade = grade.unwrap_or(ComponentGrade::Unknown);

    Some(component)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
