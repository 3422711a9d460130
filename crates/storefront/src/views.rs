//! Display data shared by several page templates.
//!
//! Templates only read fields from these structs; every price, label and URL
//! is formatted here for the request's locale.

use bazaar_core::{Category, Page, Product, ProductId};

use crate::backend::ProductSort;
use crate::config::BackendConfig;
use crate::middleware::PageContext;
use crate::models::CartLine;

/// Product tile used in grids.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: ProductId,
    pub url: String,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    /// List price, shown struck through when on sale.
    pub compare_at: Option<String>,
    pub in_stock: bool,
    pub wishlisted: bool,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, ctx: &PageContext, assets: &BackendConfig) -> Self {
        Self {
            id: product.id,
            url: format!("/products/{}", product.id),
            name: product.localized_name(ctx.locale).to_string(),
            image: product
                .image
                .as_deref()
                .and_then(|path| assets.resolve_image(path)),
            price: ctx.price(product.effective_price()),
            compare_at: product.is_on_sale().then(|| ctx.price(product.price)),
            in_stock: product.in_stock(),
            wishlisted: ctx.wishlist.contains(product.id),
        }
    }

    #[must_use]
    pub fn list(products: &[Product], ctx: &PageContext, assets: &BackendConfig) -> Vec<Self> {
        products
            .iter()
            .map(|p| Self::new(p, ctx, assets))
            .collect()
    }
}

/// Category tile.
#[derive(Debug, Clone)]
pub struct CategoryCard {
    pub url: String,
    pub name: String,
    pub image: Option<String>,
    pub count_label: Option<String>,
    /// Preselected in the product filter dropdown.
    pub selected: bool,
}

impl CategoryCard {
    #[must_use]
    pub fn new(category: &Category, ctx: &PageContext, assets: &BackendConfig) -> Self {
        Self {
            url: format!("/categories/{}", category.id),
            name: category.localized_name(ctx.locale).to_string(),
            image: category
                .image
                .as_deref()
                .and_then(|path| assets.resolve_image(path)),
            count_label: category.products_count.map(|count| {
                ctx.i18n
                    .f("categories.products_count", &[("count", &count.to_string())])
            }),
            selected: false,
        }
    }
}

/// Option in a `<select>`.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    /// Sort choices for the product listing.
    #[must_use]
    pub fn sorts(current: ProductSort, ctx: &PageContext) -> Vec<Self> {
        ProductSort::ALL
            .into_iter()
            .map(|sort| Self {
                value: sort.as_param().to_string(),
                label: ctx.i18n.t(sort.i18n_key()).to_string(),
                selected: sort == current,
            })
            .collect()
    }
}

/// Previous/next links for a paginated listing.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub label: String,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl Pagination {
    /// Build links for `page`, keeping the other query `params`.
    ///
    /// Returns `None` when everything fits on one page.
    #[must_use]
    pub fn new<T>(
        page: &Page<T>,
        path: &str,
        params: &[(&str, String)],
        ctx: &PageContext,
    ) -> Option<Self> {
        if page.last_page <= 1 {
            return None;
        }
        let link = |n: u32| page_url(path, params, n);
        Some(Self {
            label: ctx.i18n.f(
                "common.page_of",
                &[
                    ("current", &page.current_page.to_string()),
                    ("last", &page.last_page.to_string()),
                ],
            ),
            prev_url: page.has_prev().then(|| link(page.current_page - 1)),
            next_url: page.has_next().then(|| link(page.current_page + 1)),
        })
    }
}

/// `path?params&page=n`, omitting `page` for the first page.
#[must_use]
pub fn page_url(path: &str, params: &[(&str, String)], page: u32) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// A cart line ready for display.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub url: String,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl CartLineView {
    #[must_use]
    pub fn new(line: &CartLine, ctx: &PageContext, assets: &BackendConfig) -> Self {
        Self {
            product_id: line.product_id,
            url: format!("/products/{}", line.product_id),
            name: line.localized_name(ctx.locale).to_string(),
            image: line
                .image
                .as_deref()
                .and_then(|path| assets.resolve_image(path)),
            unit_price: ctx.price(line.unit_price),
            quantity: line.quantity,
            line_total: ctx.price_or_dash(line.line_total()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_first_page_has_no_page_param() {
        assert_eq!(page_url("/products", &[], 1), "/products");
        assert_eq!(
            page_url("/products", &[("q", "oud".to_string())], 1),
            "/products?q=oud"
        );
    }

    #[test]
    fn test_page_url_encodes_and_skips_empty() {
        assert_eq!(
            page_url(
                "/products",
                &[("q", "عطر ورد".to_string()), ("sort", String::new())],
                3
            ),
            "/products?q=%D8%B9%D8%B7%D8%B1+%D9%88%D8%B1%D8%AF&page=3"
        );
    }
}
