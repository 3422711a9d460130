//! Request bodies sent to the admin endpoints.

use bazaar_core::{CategoryId, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// `POST /login` body.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Create/update body for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub stock: i64,
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_featured: bool,
}

/// Create/update body for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `PATCH /admin/orders/{id}` body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_input_keeps_nullable_fields() {
        let input = ProductInput {
            name: "Dates".into(),
            name_ar: None,
            description: None,
            description_ar: None,
            price: Decimal::new(2500, 2),
            sale_price: None,
            stock: 4,
            category_id: None,
            image: None,
            is_featured: false,
        };
        let value = serde_json::to_value(&input).unwrap();
        // Cleared sale price and category must reach the backend as null
        assert_eq!(value["sale_price"], json!(null));
        assert_eq!(value["category_id"], json!(null));
        assert!(value.get("name_ar").is_none());
        assert_eq!(value["stock"], json!(4));
    }

    #[test]
    fn test_status_update_body() {
        let body = serde_json::to_value(StatusUpdate {
            status: OrderStatus::Shipped,
        })
        .unwrap();
        assert_eq!(body, json!({"status": "shipped"}));
    }
}
