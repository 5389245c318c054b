//! Integration tests for `MouserClient` using wiremock HTTP mocks.

use partscout_core::{ComponentGrade, Distributor, PriceBreak, SearchFilters};
use partscout_distributors::{ClientSettings, DistributorError, MouserClient, PartSource};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MouserClient {
    MouserClient::with_base_url("test-key", ClientSettings::default(), base_url)
        .expect("client construction should not fail")
}

fn part_search_body() -> serde_json::Value {
    serde_json::json!({
        "Errors": [],
        "SearchResults": {
            "NumberOfResult": 2,
            "Parts": [
                {
                    "ManufacturerPartNumber": "LM2596S-ADJ/NOPB",
                    "Manufacturer": "Texas Instruments",
                    "Description": "Restricted listing",
                    "Availability": "",
                    "PriceBreaks": []
                },
                {
                    "ManufacturerPartNumber": "LM2596S-ADJ/NOPB",
                    "MouserPartNumber": "926-LM2596S-ADJ/NOPB",
                    "Manufacturer": "Texas Instruments",
                    "Description": "Switching Voltage Regulators SIMPLE SWITCHER 3A",
                    "DataSheetUrl": "https://www.ti.com/lit/ds/symlink/lm2596.pdf",
                    "ProductDetailUrl": "https://www.mouser.com/ProductDetail/926-LM2596S-ADJ-NOPB",
                    "Availability": "2,145 In Stock",
                    "LeadTime": "6 Weeks",
                    "PriceBreaks": [
                        {"Quantity": 1, "Price": "$3.10", "Currency": "USD"},
                        {"Quantity": 10, "Price": "$2.89", "Currency": "USD"},
                        {"Quantity": "bad"}
                    ],
                    "ProductAttributes": [
                        {"AttributeName": "Minimum Operating Temperature", "AttributeValue": "- 40 C"},
                        {"AttributeName": "Maximum Operating Temperature", "AttributeValue": "+ 125 C"}
                    ]
                }
            ]
        }
    })
}

#[tokio::test]
async fn search_by_mpn_returns_in_stock_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/search/partnumber"))
        .and(query_param("apiKey", "test-key"))
        .and(body_json(serde_json::json!({
            "SearchByPartRequest": {"mouserPartNumber": "LM2596S-ADJ/NOPB", "partSearchOptions": ""}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(part_search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let part = client
        .search_by_mpn("LM2596S-ADJ/NOPB")
        .await
        .expect("search should succeed")
        .expect("part should be found");

    assert_eq!(part.distributor, Distributor::Mouser);
    assert_eq!(part.mpn, "LM2596S-ADJ/NOPB");
    assert_eq!(part.stock, 2145);
    assert_eq!(
        part.price_breaks,
        vec![PriceBreak::usd(1, 3.10), PriceBreak::usd(10, 2.89)]
    );
    assert_eq!(part.lead_time.as_deref(), Some("6 Weeks"));
    assert_eq!((part.temp_min, part.temp_max), (Some(-40.0), Some(125.0)));
    assert!(part.is_aviation_suitable());
    assert!(!client.http().has_session(), "session must close after the call");

    // Same logical request is served from the cache (mock expects one hit).
    let again = client.search_by_mpn("LM2596S-ADJ/NOPB").await.unwrap();
    assert_eq!(again.as_ref().map(|p| p.stock), Some(2145));
}

#[tokio::test]
async fn search_by_mpn_without_parts_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/search/partnumber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Errors": [],
            "SearchResults": {"NumberOfResult": 0, "Parts": []}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.search_by_mpn("NOPE").await.unwrap().is_none());
}

#[tokio::test]
async fn api_errors_surface_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/search/partnumber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Errors": [{"Id": 0, "Code": "InvalidCharacters", "Message": "Invalid API key"}],
            "SearchResults": null
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_by_mpn("LM2596").await;
    assert!(
        matches!(&result, Err(DistributorError::Api(msg)) if msg.contains("Invalid API key")),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn keyword_search_normalizes_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/search/keyword"))
        .and(query_param("apiKey", "test-key"))
        .and(body_json(serde_json::json!({
            "SearchByKeywordRequest": {
                "keyword": "buck converter",
                "records": 0,
                "startingRecord": 0,
                "searchOptions": "",
                "searchWithYourSignUpLanguage": ""
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Errors": [],
            "SearchResults": {"Parts": [
                {
                    "ManufacturerPartNumber": "TPS54360QDDARQ1",
                    "Manufacturer": "Texas Instruments",
                    "Description": "Buck converter AEC-Q100",
                    "Availability": "3,247 In Stock",
                    "ProductAttributes": [
                        {"AttributeName": "Qualification", "AttributeValue": "AEC-Q100"}
                    ]
                },
                {
                    "ManufacturerPartNumber": "LM2596S-ADJ/NOPB",
                    "Manufacturer": "Texas Instruments",
                    "Description": "Buck converter",
                    "Availability": "2,145 In Stock"
                },
                {
                    "ManufacturerPartNumber": ["garbage"]
                }
            ]}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let all = client
        .search_by_keyword("buck converter", &SearchFilters::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2, "malformed part should be dropped");

    let automotive = client
        .search_by_keyword(
            "buck converter",
            &SearchFilters {
                grades: vec![ComponentGrade::Automotive],
                ..SearchFilters::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(automotive.len(), 1);
    assert_eq!(automotive[0].mpn, "TPS54360QDDARQ1");
}

#[tokio::test]
async fn http_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_by_mpn("LM2596").await;
    assert!(
        matches!(result, Err(DistributorError::UnexpectedStatus { status: 503, .. })),
        "got: {result:?}"
    );
    assert!(!client.http().has_session());
}
