use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity - a row in the products table
///
/// The id is assigned by the store on first insert; an instance without an id
/// never leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i64,
    /// Product name
    pub name: String,
    /// Manufacturer name
    pub maker: String,
    /// Sale price, non-negative
    pub price: i64,
    /// Optional image URL (static asset or CDN)
    pub image_url: Option<String>,
}

/// DTO carrying the mutable fields of a product.
///
/// Used both for creation and for replacement on update; there are no
/// per-field partial semantics.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub maker: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Overwrite every mutable field with the source's values.
    ///
    /// This is a full replacement, not a merge: a `None` image_url in the
    /// source clears a previously stored value.
    pub fn change_with(&mut self, source: ProductData) {
        self.name = source.name;
        self.maker = source.maker;
        self.price = source.price;
        self.image_url = source.image_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe(id: i64) -> Product {
        Product {
            id,
            name: "Shoe".to_string(),
            maker: "Acme".to_string(),
            price: 5000,
            image_url: Some("shoe.png".to_string()),
        }
    }

    #[test]
    fn test_change_with_overwrites_all_fields() {
        let mut product = shoe(1);

        product.change_with(ProductData {
            name: "Boot".to_string(),
            maker: "Acme2".to_string(),
            price: 6000,
            image_url: Some("boot.png".to_string()),
        });

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Boot");
        assert_eq!(product.maker, "Acme2");
        assert_eq!(product.price, 6000);
        assert_eq!(product.image_url.as_deref(), Some("boot.png"));
    }

    #[test]
    fn test_change_with_clears_absent_image_url() {
        let mut product = shoe(1);

        product.change_with(ProductData {
            name: "Boot".to_string(),
            maker: "Acme2".to_string(),
            price: 6000,
            image_url: None,
        });

        assert_eq!(product.image_url, None);
    }

    #[test]
    fn test_serializes_image_url_as_camel_case() {
        let json = serde_json::to_value(shoe(2)).unwrap();
        assert_eq!(json["imageUrl"], "shoe.png");
        assert_eq!(json["id"], 2);
    }

    #[test]
    fn test_product_data_accepts_missing_image_url() {
        let data: ProductData =
            serde_json::from_str(r#"{"name":"Shoe","maker":"Acme","price":5000}"#).unwrap();
        assert_eq!(data.image_url, None);
    }
}
