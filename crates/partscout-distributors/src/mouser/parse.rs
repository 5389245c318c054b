//! Normalization of Mouser search responses into [`ComponentAvailability`].

use partscout_core::{ComponentAvailability, ComponentGrade, Distributor, PriceBreak};
use serde_json::Value;

use super::types::{Part, SearchResponse};
use crate::error::DistributorError;
use crate::heuristics::{infer_grade, parse_price, parse_stock, parse_temperature, parse_temperature_range};

/// Decodes a search response into its parts, dropping any part that fails to
/// deserialize.
///
/// # Errors
///
/// - [`DistributorError::Deserialize`] if the envelope itself is malformed.
/// - [`DistributorError::Api`] if Mouser reported errors and returned no parts.
pub(crate) fn decode_parts(body: Value) -> Result<Vec<Part>, DistributorError> {
    let response: SearchResponse =
        serde_json::from_value(body).map_err(|e| DistributorError::Deserialize {
            context: "mouser search response".to_owned(),
            source: e,
        })?;

    let raw_parts = response.search_results.map(|r| r.parts).unwrap_or_default();

    if raw_parts.is_empty() && !response.errors.is_empty() {
        let message = response
            .errors
            .iter()
            .map(|e| match (&e.code, &e.message) {
                (Some(code), Some(msg)) => format!("{code}: {msg}"),
                (None, Some(msg)) => msg.clone(),
                (Some(code), None) => code.clone(),
                (None, None) => "unknown error".to_owned(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(DistributorError::Api(message));
    }

    Ok(raw_parts
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Part>(raw) {
            Ok(part) => Some(part),
            Err(e) => {
                tracing::warn!(distributor = "mouser", error = %e, "dropping malformed part record");
                None
            }
        })
        .collect())
}

/// Picks the first part reporting stock, falling back to the first part.
pub(crate) fn select_part(parts: Vec<Part>) -> Option<Part> {
    let position = parts
        .iter()
        .position(|p| p.availability.as_deref().is_some_and(|a| a.contains("In Stock")))
        .unwrap_or(0);
    parts.into_iter().nth(position)
}

/// Parses one `{Quantity, Price, Currency}` entry. Malformed entries yield `None`.
pub(crate) fn parse_price_break(raw: &Value) -> Option<PriceBreak> {
    let quantity = match raw.get("Quantity")? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok()?,
        _ => return None,
    };
    let unit_price = match raw.get("Price")? {
        Value::String(s) => parse_price(s)?,
        Value::Number(n) => n.as_f64().filter(|p| *p >= 0.0)?,
        _ => return None,
    };
    let currency = raw
        .get("Currency")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or("USD")
        .to_owned();
    Some(PriceBreak {
        quantity,
        unit_price,
        currency,
    })
}

/// Converts one Mouser part into the canonical record.
///
/// `fallback_mpn` stands in for a missing part number. A part with neither is
/// dropped.
pub(crate) fn normalize_part(
    part: Part,
    fallback_mpn: &str,
) -> Option<ComponentAvailability> {
    let Some(mpn) = non_empty(part.manufacturer_part_number)
        .or_else(|| non_empty(Some(fallback_mpn.to_owned())))
    else {
        tracing::warn!(distributor = "mouser", "dropping part without a manufacturer part number");
        return None;
    };
    let manufacturer = non_empty(part.manufacturer).unwrap_or_else(|| "Unknown".to_owned());
    let description = part.description.unwrap_or_default();

    let mut component =
        ComponentAvailability::new(mpn, manufacturer, description, Distributor::Mouser);
    component.stock = part.availability.as_deref().map_or(0, parse_stock);
    component.price_breaks = part.price_breaks.iter().filter_map(parse_price_break).collect();
    component.datasheet_url = non_empty(part.data_sheet_url);
    component.product_url = non_empty(part.product_detail_url);
    component.lead_time = non_empty(part.lead_time);
    component.package = non_empty(part.package_type);

    let mut range = None;
    let mut min = None;
    let mut max = None;
    let mut grade = None;
    for attr in &part.product_attributes {
        let name = attr.attribute_name.to_lowercase();
        if name.contains("minimum operating temperature") {
            min = min.or_else(|| parse_temperature(&attr.attribute_value));
        } else if name.contains("maximum operating temperature") {
            max = max.or_else(|| parse_temperature(&attr.attribute_value));
        } else if name.contains("operating temperature") {
            range = range.or_else(|| parse_temperature_range(&attr.attribute_value));
        }
        if grade.is_none() {
            grade = infer_grade(&attr.attribute_value).or_else(|| infer_grade(&attr.attribute_name));
        }
        component
            .specs
            .entry(attr.attribute_name.clone())
            .or_insert_with(|| attr.attribute_value.clone());
    }

    if let Some(number) = non_empty(part.mouser_part_number) {
        component.specs.insert("Mouser Part Number".to_owned(), number);
    }
    if let Some(status) = non_empty(part.lifecycle_status) {
        component.specs.insert("Lifecycle Status".to_owned(), status);
    }

    match (range, min, max) {
        (_, Some(lo), Some(hi)) => component.set_temperature_range(Some(lo), Some(hi)),
        (Some((lo, hi)), _, _) => component.set_temperature_range(Some(lo), Some(hi)),
        _ => {}
    }
    component.grade = grade
        .or_else(|| infer_grade(&component.description))
        .unwrap_or(ComponentGrade::Unknown);

    Some(component)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn part_from(value: Value) -> Part {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn price_breaks_skip_malformed_entries() {
        let part = part_from(json!({
            "ManufacturerPartNumber": "LM2596S-ADJ/NOPB",
            "PriceBreaks": [
                {"Quantity": 1, "Price": "$3.10"},
                {"Quantity": "bad"}
            ]
        }));
        let component = normalize_part(part, "LM2596").expect("part number present");
        assert_eq!(component.price_breaks, vec![PriceBreak::usd(1, 3.10)]);
    }

    #[test]
    fn price_break_variants() {
        assert_eq!(
            parse_price_break(&json!({"Quantity": "1,000", "Price": "$1,234.50", "Currency": "EUR"})),
            Some(PriceBreak {
                quantity: 1000,
                unit_price: 1234.50,
                currency: "EUR".to_owned()
            })
        );
        assert_eq!(parse_price_break(&json!({"Quantity": 10, "Price": "$-1.00"})), None);
        assert_eq!(parse_price_break(&json!({"Quantity": 10})), None);
        assert_eq!(parse_price_break(&json!({"Price": "$1.00"})), None);
    }

    #[test]
    fn stock_and_direct_fields() {
        let part = part_from(json!({
            "ManufacturerPartNumber": "STM32F407VGT6",
            "MouserPartNumber": "511-STM32F407VGT6",
            "Manufacturer": "STMicroelectronics",
            "Description": "ARM Microcontrollers - MCU",
            "DataSheetUrl": "https://example.com/ds.pdf",
            "ProductDetailUrl": "",
            "Availability": "2,845 In Stock",
            "LeadTime": "12 Weeks",
            "LifecycleStatus": "Active"
        }));
        let c = normalize_part(part, "STM32F407VGT6").expect("part number present");
        assert_eq!(c.stock, 2845);
        assert_eq!(c.manufacturer, "STMicroelectronics");
        assert_eq!(c.datasheet_url.as_deref(), Some("https://example.com/ds.pdf"));
        assert_eq!(c.product_url, None);
        assert_eq!(c.lead_time.as_deref(), Some("12 Weeks"));
        assert_eq!(c.specs.get("Mouser Part Number").map(String::as_str), Some("511-STM32F407VGT6"));
        assert_eq!(c.grade, ComponentGrade::Unknown);
        assert_eq!(c.temp_min, None);
    }

    #[test]
    fn missing_fields_fall_back() {
        let c = normalize_part(Part::default(), "XYZ-1").expect("part number present");
        assert_eq!(c.mpn, "XYZ-1");
        assert_eq!(c.manufacturer, "Unknown");
        assert_eq!(c.stock, 0);
        assert!(c.price_breaks.is_empty());
    }

    #[test]
    fn part_without_any_part_number_is_dropped() {
        let part = part_from(json!({"Availability": "12 In Stock", "Manufacturer": "Acme"}));
        assert!(normalize_part(part, "").is_none());
    }

    #[test]
    fn attributes_drive_temperature_and_grade() {
        let part = part_from(json!({
            "ManufacturerPartNumber": "TPS54360QDDARQ1",
            "ProductAttributes": [
                {"AttributeName": "Minimum Operating Temperature", "AttributeValue": "- 40 C"},
                {"AttributeName": "Maximum Operating Temperature", "AttributeValue": "+ 125 C"},
                {"AttributeName": "Qualification", "AttributeValue": "AEC-Q100"}
            ]
        }));
        let c = normalize_part(part, "TPS54360").expect("part number present");
        assert_eq!(c.temp_min, Some(-40.0));
        assert_eq!(c.temp_max, Some(125.0));
        assert_eq!(c.grade, ComponentGrade::Automotive);
        assert_eq!(c.specs.get("Qualification").map(String::as_str), Some("AEC-Q100"));
    }

    #[test]
    fn combined_temperature_attribute() {
        let part = part_from(json!({
            "ProductAttributes": [
                {"AttributeName": "Operating Temperature Range", "AttributeValue": "-40 C to +85 C"}
            ]
        }));
        let c = normalize_part(part, "X").expect("part number present");
        assert_eq!((c.temp_min, c.temp_max), (Some(-40.0), Some(85.0)));
    }

    #[test]
    fn selection_prefers_in_stock_part() {
        let parts = vec![
            part_from(json!({"ManufacturerPartNumber": "A", "Availability": "None"})),
            part_from(json!({"ManufacturerPartNumber": "B", "Availability": "12 In Stock"})),
        ];
        assert_eq!(select_part(parts).unwrap().manufacturer_part_number.as_deref(), Some("B"));

        let parts = vec![
            part_from(json!({"ManufacturerPartNumber": "A"})),
            part_from(json!({"ManufacturerPartNumber": "B"})),
        ];
        assert_eq!(select_part(parts).unwrap().manufacturer_part_number.as_deref(), Some("A"));
        assert!(select_part(Vec::new()).is_none());
    }

    #[test]
    fn errors_without_parts_are_api_errors() {
        let body = json!({
            "Errors": [{"Code": "Invalid", "Message": "Invalid unique identifier."}],
            "SearchResults": null
        });
        let err = decode_parts(body).unwrap_err();
        assert!(
            matches!(&err, DistributorError::Api(msg) if msg.contains("Invalid unique identifier")),
            "got: {err:?}"
        );
    }

    #[test]
    fn malformed_parts_are_dropped() {
        let body = json!({
            "Errors": [],
            "SearchResults": {"NumberOfResult": 2, "Parts": [
                {"ManufacturerPartNumber": 42},
                {"ManufacturerPartNumber": "OK-PART"}
            ]}
        });
        let parts = decode_parts(body).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].manufacturer_part_number.as_deref(), Some("OK-PART"));
    }

    #[test]
    fn empty_results_without_errors_are_empty() {
        assert!(decode_parts(json!({})).unwrap().is_empty());
    }
}
