use std::fmt;

use serde::Deserialize;

/// Which endpoint ultimately satisfied a catalog request.
///
/// The curated route returns a ready-to-render set; the fallback route
/// returns the full catalog and still needs selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    Primary,
    Fallback,
}

/// Product identifier as the API ships it. Numeric ids and string slugs
/// both occur, so the field accepts either and stringifies on use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Price as shipped by the API. Displayed verbatim behind a currency
/// prefix; the front-end never converts, rounds, or validates it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// One product as returned by either catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "defaultImage")]
    pub default_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProductRecord {
    /// First non-empty image URL, preferring `image` over `defaultImage`.
    pub fn image_url(&self) -> Option<&str> {
        [self.image.as_deref(), self.default_image.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    }
}

/// A successfully retrieved product listing, tagged with the endpoint
/// that produced it.
#[derive(Debug)]
pub struct FetchedCatalog {
    pub source: EndpointSource,
    pub products: Vec<ProductRecord>,
}

/// Presentational projection of one product. Recreated on every render
/// cycle and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard {
    /// Display title, truncated for the card heading.
    pub title: String,
    /// Untruncated title, used for alt text and the hover tooltip.
    pub full_title: String,
    pub price_label: String,
    pub detail_href: String,
    pub image: ImageSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSlot {
    Remote(String),
    Placeholder,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_images(image: Option<&str>, default_image: Option<&str>) -> ProductRecord {
        ProductRecord {
            id: ProductId::Number(1),
            title: "Tee".to_string(),
            price: Price::Number(20.0),
            image: image.map(str::to_string),
            default_image: default_image.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn image_url_prefers_image_over_default() {
        let record = record_with_images(Some("/a.png"), Some("/b.png"));
        assert_eq!(record.image_url(), Some("/a.png"));
    }

    #[test]
    fn image_url_skips_empty_strings() {
        let record = record_with_images(Some(""), Some("/b.png"));
        assert_eq!(record.image_url(), Some("/b.png"));

        let record = record_with_images(Some(""), None);
        assert_eq!(record.image_url(), None);
    }

    #[test]
    fn numeric_price_displays_like_the_wire_value() {
        assert_eq!(Price::Number(20.0).to_string(), "20");
        assert_eq!(Price::Number(20.5).to_string(), "20.5");
        assert_eq!(Price::Text("19.90".to_string()).to_string(), "19.90");
    }

    #[test]
    fn product_id_stringifies_both_shapes() {
        assert_eq!(ProductId::Number(42).to_string(), "42");
        assert_eq!(ProductId::Text("hoodie-xl".to_string()).to_string(), "hoodie-xl");
    }
}
