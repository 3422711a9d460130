//! Request types sent to the backend.

use std::str::FromStr;

use bazaar_core::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// Product listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    pub const ALL: [Self; 4] = [Self::Newest, Self::PriceAsc, Self::PriceDesc, Self::Name];

    /// Query-string value sent to the backend and used in links.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Name => "name",
        }
    }

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Newest => "products.sort.newest",
            Self::PriceAsc => "products.sort.price_asc",
            Self::PriceDesc => "products.sort.price_desc",
            Self::Name => "products.sort.name",
        }
    }
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_param() == s)
            .ok_or_else(|| format!("unknown sort: {s}"))
    }
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pub page: u32,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub featured: bool,
    pub sort: ProductSort,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
            search: None,
            category: None,
            featured: false,
            sort: ProductSort::default(),
        }
    }
}

impl ProductQuery {
    /// Search results are too varied to be worth caching.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.search.is_none()
    }

    /// Query-string pairs for the request.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.max(1).to_string())];
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = self.category {
            params.push(("category_id", category.to_string()));
        }
        if self.featured {
            params.push(("featured", "1".to_string()));
        }
        if self.sort != ProductSort::Newest {
            params.push(("sort", self.sort.as_param().to_string()));
        }
        params
    }
}

/// One line of an order submission. The backend prices it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub shipping_address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub locale: String,
    pub items: Vec<OrderLineRequest>,
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_params() {
        assert_eq!(
            ProductQuery::default().to_params(),
            vec![("page", "1".to_string())]
        );
    }

    #[test]
    fn test_full_query_params() {
        let query = ProductQuery {
            page: 0,
            per_page: Some(12),
            search: Some("oud".into()),
            category: Some(CategoryId::new(4)),
            featured: true,
            sort: ProductSort::PriceDesc,
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "1".to_string()),
                ("per_page", "12".to_string()),
                ("search", "oud".to_string()),
                ("category_id", "4".to_string()),
                ("featured", "1".to_string()),
                ("sort", "price_desc".to_string()),
            ]
        );
        assert!(!query.is_cacheable());
    }

    #[test]
    fn test_sort_round_trips_through_param() {
        for sort in ProductSort::ALL {
            assert_eq!(sort.as_param().parse::<ProductSort>().unwrap(), sort);
        }
        assert!("cheapest".parse::<ProductSort>().is_err());
    }

    #[test]
    fn test_order_request_omits_empty_optionals() {
        let body = serde_json::to_value(OrderRequest {
            customer_name: "Sara".into(),
            customer_phone: "0500000000".into(),
            customer_email: None,
            shipping_address: "King Fahd Rd".into(),
            city: "Riyadh".into(),
            notes: None,
            locale: "ar".into(),
            items: vec![OrderLineRequest {
                product_id: ProductId::new(3),
                quantity: 2,
            }],
        })
        .unwrap();
        assert!(body.get("customer_email").is_none());
        assert!(body.get("notes").is_none());
        assert_eq!(body["items"][0]["product_id"], 3);
    }
}
