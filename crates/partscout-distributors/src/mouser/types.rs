//! Mouser Search API wire types.
//!
//! Only the fields the normalizer reads are modeled; everything is optional
//! because Mouser omits or blanks fields freely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartNumberSearch<'a> {
    pub mouser_part_number: &'a str,
    pub part_search_options: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PartNumberRequest<'a> {
    #[serde(rename = "SearchByPartRequest")]
    pub search: PartNumberSearch<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSearch<'a> {
    pub keyword: &'a str,
    /// 0 asks for every result.
    pub records: u32,
    pub starting_record: u32,
    pub search_options: &'a str,
    pub search_with_your_sign_up_language: &'a str,
}

#[derive(Debug, Serialize)]
pub struct KeywordRequest<'a> {
    #[serde(rename = "SearchByKeywordRequest")]
    pub search: KeywordSearch<'a>,
}

/// Top-level search response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
    #[serde(default)]
    pub search_results: Option<SearchResults>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResults {
    /// Kept raw so that one malformed part does not sink the whole page.
    #[serde(default)]
    pub parts: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Part {
    #[serde(default)]
    pub manufacturer_part_number: Option<String>,
    #[serde(default)]
    pub mouser_part_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data_sheet_url: Option<String>,
    #[serde(default)]
    pub product_detail_url: Option<String>,
    /// e.g. `"1,234 In Stock"`.
    #[serde(default)]
    pub availability: Option<String>,
    /// Entries are `{Quantity, Price: "$1.23", Currency}`; kept raw and
    /// parsed leniently.
    #[serde(default)]
    pub price_breaks: Vec<serde_json::Value>,
    #[serde(default)]
    pub lifecycle_status: Option<String>,
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub lead_time: Option<String>,
    #[serde(default)]
    pub product_attributes: Vec<ProductAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductAttribute {
    pub attribute_name: String,
    #[serde(default)]
    pub attribute_value: String,
}
