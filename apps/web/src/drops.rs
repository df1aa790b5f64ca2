use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::{EndpointSource, ImageSlot, ProductId, ProductRecord, RenderedCard};
use crate::error::DropsError;

/// Upper bound on the "what's new" set.
pub const MAX_DROPS: usize = 4;

const TITLE_DISPLAY_LIMIT: usize = 35;
const TITLE_TRUNCATED_LEN: usize = 32;
const TITLE_ELLIPSIS: &str = "...";

/// Decodes a catalog response body into product records.
///
/// A body that parses but is not an array is reported with the server's
/// own `error` field when it carries one, so upstream failures stay
/// diagnosable from the page.
pub fn decode_products(body: &str) -> Result<Vec<ProductRecord>, DropsError> {
    let value: Value = serde_json::from_str(body).map_err(|err| DropsError::Format {
        message: err.to_string(),
    })?;

    if !value.is_array() {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Invalid response format")
            .to_string();
        return Err(DropsError::Format { message });
    }

    serde_json::from_value(value).map_err(|err| DropsError::Format {
        message: err.to_string(),
    })
}

/// Normalizes a catalog into the bounded new-drops set.
///
/// The primary endpoint already returns a curated list and passes
/// through unchanged. The fallback endpoint returns the full catalog:
/// newest first by `created_at`, capped at [`MAX_DROPS`]. Records
/// without a parsable timestamp sort last, and the sort is stable, so
/// source order breaks ties.
pub fn select_drops(
    mut products: Vec<ProductRecord>,
    source: EndpointSource,
) -> Vec<ProductRecord> {
    if source == EndpointSource::Primary {
        return products;
    }

    products.sort_by_key(|product| Reverse(created_at_key(product)));
    products.truncate(MAX_DROPS);
    products
}

fn created_at_key(product: &ProductRecord) -> Option<i64> {
    product.created_at.as_deref().and_then(parse_timestamp)
}

/// Timestamp formats seen across catalog exports: RFC 3339, the SQL-ish
/// space-separated form, and bare dates.
fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp_millis())
}

/// Projects one product into its presentational card.
///
/// Pure and deterministic: identical input yields an identical card,
/// and the record itself is never touched.
pub fn render_card(record: &ProductRecord) -> RenderedCard {
    RenderedCard {
        title: truncate_title(&record.title),
        full_title: record.title.clone(),
        price_label: format!("${}", record.price),
        detail_href: detail_href(&record.id),
        image: record
            .image_url()
            .map_or(ImageSlot::Placeholder, |url| {
                ImageSlot::Remote(url.to_string())
            }),
    }
}

/// Titles longer than 35 characters are cut to 32 and marked with an
/// ellipsis; anything shorter passes through untouched.
fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_DISPLAY_LIMIT {
        let mut truncated: String = title.chars().take(TITLE_TRUNCATED_LEN).collect();
        truncated.push_str(TITLE_ELLIPSIS);
        truncated
    } else {
        title.to_string()
    }
}

fn detail_href(id: &ProductId) -> String {
    format!("/product.html?id={}", urlencoding::encode(&id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Price;

    fn record(id: i64, title: &str, created_at: Option<&str>) -> ProductRecord {
        ProductRecord {
            id: ProductId::Number(id),
            title: title.to_string(),
            price: Price::Number(20.0),
            image: None,
            default_image: None,
            created_at: created_at.map(str::to_string),
        }
    }

    fn ids(products: &[ProductRecord]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn decode_accepts_an_array_body() {
        let body = r#"[{"id":1,"title":"Tee","price":20,"image":""},
                       {"id":"hoodie-xl","title":"Hoodie","price":"49.90"}]"#;

        let products = decode_products(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::Number(1));
        assert_eq!(products[1].id, ProductId::Text("hoodie-xl".to_string()));
        assert_eq!(products[1].price, Price::Text("49.90".to_string()));
    }

    #[test]
    fn decode_surfaces_the_server_error_field() {
        let err = decode_products(r#"{"error":"Printify token expired"}"#).unwrap_err();
        assert_eq!(
            err,
            DropsError::Format {
                message: "Printify token expired".to_string()
            }
        );
    }

    #[test]
    fn decode_falls_back_to_a_generic_format_message() {
        let err = decode_products(r#"{"status":"down"}"#).unwrap_err();
        assert_eq!(
            err,
            DropsError::Format {
                message: "Invalid response format".to_string()
            }
        );
    }

    #[test]
    fn decode_rejects_unparsable_bodies() {
        assert!(matches!(
            decode_products("<html>502</html>"),
            Err(DropsError::Format { .. })
        ));
        assert!(matches!(
            decode_products("[1, 2, 3]"),
            Err(DropsError::Format { .. })
        ));
    }

    #[test]
    fn primary_listing_passes_through_unchanged() {
        let products = vec![
            record(3, "C", Some("2025-01-01")),
            record(1, "A", None),
            record(2, "B", Some("2025-06-01")),
            record(4, "D", None),
            record(5, "E", Some("2025-03-01")),
        ];
        let before = ids(&products);

        let selected = select_drops(products, EndpointSource::Primary);
        assert_eq!(ids(&selected), before);
    }

    #[test]
    fn fallback_listing_keeps_the_four_newest() {
        let products: Vec<ProductRecord> = (1..=10)
            .map(|day| {
                record(
                    day,
                    "Drop",
                    Some(&format!("2025-06-{:02}T12:00:00Z", 11 - day)),
                )
            })
            .collect();

        let selected = select_drops(products, EndpointSource::Fallback);
        assert_eq!(ids(&selected), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn fallback_sorting_is_stable_for_equal_timestamps() {
        let products = vec![
            record(1, "A", Some("2025-06-01T00:00:00Z")),
            record(2, "B", Some("2025-06-01T00:00:00Z")),
            record(3, "C", Some("2025-06-02T00:00:00Z")),
        ];

        let selected = select_drops(products, EndpointSource::Fallback);
        assert_eq!(ids(&selected), vec!["3", "1", "2"]);
    }

    #[test]
    fn missing_or_unparsable_timestamps_sort_last() {
        let products = vec![
            record(1, "A", None),
            record(2, "B", Some("2025-06-01T00:00:00Z")),
            record(3, "C", Some("last week")),
            record(4, "D", Some("2025-06-03T00:00:00Z")),
        ];

        let selected = select_drops(products, EndpointSource::Fallback);
        assert_eq!(ids(&selected), vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn empty_catalog_yields_an_empty_drop_set() {
        assert!(select_drops(Vec::new(), EndpointSource::Fallback).is_empty());
    }

    #[test]
    fn timestamp_formats_parse_consistently() {
        assert!(parse_timestamp("2025-06-01T12:30:00Z").is_some());
        assert!(parse_timestamp("2025-06-01 12:30:00").is_some());
        assert!(parse_timestamp("2025-06-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());

        // The SQL-ish form and its RFC 3339 spelling agree on ordering.
        assert_eq!(
            parse_timestamp("2025-06-01 12:30:00"),
            parse_timestamp("2025-06-01T12:30:00Z")
        );
    }

    #[test]
    fn titles_at_the_display_limit_are_untouched() {
        let title = "a".repeat(35);
        assert_eq!(truncate_title(&title), title);
    }

    #[test]
    fn titles_past_the_display_limit_are_cut_to_32_plus_ellipsis() {
        let title = format!("{}XYZQ", "a".repeat(32));
        assert_eq!(title.chars().count(), 36);

        let truncated = truncate_title(&title);
        assert_eq!(truncated, format!("{}...", "a".repeat(32)));
        assert_eq!(truncated.chars().count(), 35);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "é".repeat(36);
        let truncated = truncate_title(&title);
        assert_eq!(truncated, format!("{}...", "é".repeat(32)));
    }

    #[test]
    fn card_prices_are_rendered_verbatim() {
        let mut product = record(1, "Tee", None);
        assert_eq!(render_card(&product).price_label, "$20");

        product.price = Price::Text("19.90".to_string());
        assert_eq!(render_card(&product).price_label, "$19.90");
    }

    #[test]
    fn card_links_percent_encode_the_id() {
        let mut product = record(7, "Tee", None);
        assert_eq!(render_card(&product).detail_href, "/product.html?id=7");

        product.id = ProductId::Text("summer tee/2025".to_string());
        assert_eq!(
            render_card(&product).detail_href,
            "/product.html?id=summer%20tee%2F2025"
        );
    }

    #[test]
    fn cards_without_a_usable_image_get_the_placeholder() {
        let mut product = record(1, "Tee", None);
        product.image = Some(String::new());
        assert_eq!(render_card(&product).image, ImageSlot::Placeholder);

        product.default_image = Some("/fallback.png".to_string());
        assert_eq!(
            render_card(&product).image,
            ImageSlot::Remote("/fallback.png".to_string())
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut product = record(9, &"Limited run oversized tee".repeat(3), Some("2025-06-01"));
        product.image = Some("/tee.png".to_string());

        assert_eq!(render_card(&product), render_card(&product));
    }
}
