//! DigiKey Product Information V4 wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordRequest<'a> {
    pub keywords: &'a str,
    pub record_count: u32,
    pub record_start_position: u32,
    pub filters: KeywordFilters<'a>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordFilters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_part_number: Option<ExactFilter<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExactFilter<'a> {
    pub filter_type: &'a str,
    pub values: Vec<&'a str>,
}

impl<'a> ExactFilter<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            filter_type: "Exact",
            values: vec![value],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordResponse {
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailsResponse {
    #[serde(default)]
    pub product: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(default, alias = "ManufacturerProductNumber")]
    pub manufacturer_part_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<NamedRef>,
    /// V4 nests the text under `Description.ProductDescription`; older
    /// payloads carry it flat.
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub description: Option<ProductDescription>,
    #[serde(default, alias = "DatasheetUrl")]
    pub primary_datasheet: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub quantity_available: Option<serde_json::Value>,
    #[serde(default)]
    pub standard_pricing: Vec<serde_json::Value>,
    #[serde(default, alias = "ManufacturerLeadWeeks")]
    pub standard_lead_time: Option<serde_json::Value>,
    #[serde(default)]
    pub packaging: Option<NamedRef>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductDescription {
    #[serde(default)]
    pub product_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(default, alias = "ParameterText")]
    pub parameter: String,
    #[serde(default, alias = "ValueText")]
    pub value: String,
}
