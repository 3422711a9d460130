//! Dashboard overview: totals, recent orders and low-stock products.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use bazaar_core::{Order, Product};
use rust_decimal::Decimal;
use tracing::instrument;

use super::list_or_empty;
use super::orders::OrderRowView;
use super::products::ProductRowView;
use crate::error::Result;
use crate::middleware::{PageContext, RequireAdminAuth};
use crate::state::AppState;

/// Orders shown in the "recent" panel.
const RECENT_ORDERS: usize = 5;

/// Products shown in the "low stock" panel.
const LOW_STOCK_ROWS: usize = 10;

/// Aggregates over the fetched rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub products: usize,
    pub orders: usize,
    pub open_orders: usize,
    pub customers: usize,
    /// `None` when the sum overflowed.
    pub revenue: Option<Decimal>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(products: &[Product], orders: &[Order], customers: usize) -> Self {
        Self {
            products: products.len(),
            orders: orders.len(),
            open_orders: orders.iter().filter(|o| o.status.is_open()).count(),
            customers,
            revenue: orders
                .iter()
                .filter(|o| o.status.counts_toward_revenue())
                .try_fold(Decimal::ZERO, |sum, o| sum.checked_add(o.total)),
        }
    }
}

/// Newest first; orders without a timestamp go last.
#[must_use]
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<&Order> {
    let mut recent: Vec<&Order> = orders.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

/// Tracked-stock products at or below `threshold`, lowest first.
#[must_use]
pub fn low_stock(products: &[Product], threshold: i64, limit: usize) -> Vec<&Product> {
    let mut low: Vec<&Product> = products
        .iter()
        .filter(|p| p.stock.is_some_and(|s| s <= threshold))
        .collect();
    low.sort_by_key(|p| p.stock);
    low.truncate(limit);
    low
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub stats: DashboardStats,
    pub revenue: String,
    pub recent: Vec<OrderRowView>,
    pub low_stock: Vec<ProductRowView>,
}

/// Dashboard page handler.
#[instrument(skip(admin, state, ctx), fields(admin_id = %admin.id))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
) -> Result<DashboardTemplate> {
    let api = state.api();
    let (products, orders, customers) = tokio::join!(
        api.products(&admin.token),
        api.orders(&admin.token, None),
        api.customers(&admin.token, None),
    );
    let products = list_or_empty(products, &mut ctx, "products")?;
    let orders = list_or_empty(orders, &mut ctx, "orders")?;
    let customers = list_or_empty(customers, &mut ctx, "customers")?;

    let stats = DashboardStats::compute(&products, &orders, customers.len());
    let threshold = state.config().low_stock_threshold;

    Ok(DashboardTemplate {
        revenue: ctx.price_or_dash(stats.revenue),
        recent: recent_orders(&orders, RECENT_ORDERS)
            .into_iter()
            .map(|o| OrderRowView::new(o, &ctx))
            .collect(),
        low_stock: low_stock(&products, threshold, LOW_STOCK_ROWS)
            .into_iter()
            .map(|p| ProductRowView::new(p, &ctx, state.config()))
            .collect(),
        stats,
        ctx,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(id: i64, status: &str, total: &str, created: &str) -> Order {
        serde_json::from_value(json!({
            "id": id,
            "status": status,
            "customer_name": "Layla",
            "total": total,
            "created_at": created,
        }))
        .unwrap()
    }

    fn product(id: i64, stock: Option<i64>) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("P{id}"),
            "price": "10.00",
            "stock": stock,
        }))
        .unwrap()
    }

    #[test]
    fn test_revenue_skips_cancelled_orders() {
        let orders = vec![
            order(1, "delivered", "100.00", "2026-01-01T10:00:00Z"),
            order(2, "cancelled", "40.00", "2026-01-02T10:00:00Z"),
            order(3, "pending", "25.50", "2026-01-03T10:00:00Z"),
        ];
        let stats = DashboardStats::compute(&[], &orders, 4);
        assert_eq!(stats.revenue, Some(Decimal::new(12550, 2)));
        assert_eq!(stats.orders, 3);
        assert_eq!(stats.open_orders, 1);
        assert_eq!(stats.customers, 4);
    }

    #[test]
    fn test_revenue_overflow_is_none() {
        let max = Decimal::MAX.to_string();
        let orders = vec![
            order(1, "delivered", &max, "2026-01-01T10:00:00Z"),
            order(2, "shipped", &max, "2026-01-02T10:00:00Z"),
        ];
        let stats = DashboardStats::compute(&[], &orders, 0);
        assert_eq!(stats.revenue, None);
        assert_eq!(stats.orders, 2);
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let orders = vec![
            order(1, "pending", "1", "2026-01-01T10:00:00Z"),
            order(2, "pending", "1", "2026-03-01T10:00:00Z"),
            order(3, "pending", "1", "2026-02-01T10:00:00Z"),
        ];
        let ids: Vec<i64> = recent_orders(&orders, 2).iter().map(|o| o.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_low_stock_ignores_untracked() {
        let products = vec![
            product(1, Some(9)),
            product(2, Some(0)),
            product(3, None),
            product(4, Some(5)),
        ];
        let ids: Vec<i64> = low_stock(&products, 5, 10)
            .iter()
            .map(|p| p.id.as_i64())
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
