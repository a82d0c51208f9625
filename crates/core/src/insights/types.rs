//! Dashboard snapshot and insight report types.
//!
//! Every record here is an immutable value: the snapshot is assembled once
//! per refresh from the eight aggregate queries, and the insight report is
//! freshly constructed output, never aliasing into the input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate snapshot records
// ============================================================================

/// Total revenue across all sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    /// Sum of all sale totals. `None` when there are no sales rows.
    pub total_revenue: Option<Decimal>,
}

/// Revenue, cost, and profit totals across all sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSummary {
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total cost of goods sold.
    pub total_cost: Decimal,
    /// Total profit (revenue minus cost, may be negative).
    pub total_profit: Decimal,
    /// Profit margin as a percentage, rounded to 2 decimal places.
    pub profit_margin_percentage: Decimal,
}

/// Per-product performance aggregate.
///
/// Appears in two ordered sequences: top products by revenue and top
/// products by profit, both descending and limited to 5 entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product ID.
    pub product_id: i32,
    /// Product name.
    pub product_name: String,
    /// Product category.
    pub category: String,
    /// Total revenue attributed to this product.
    pub total_revenue: Decimal,
    /// Total profit attributed to this product (may be negative).
    pub total_profit: Decimal,
    /// Profit margin as a percentage, rounded to 2 decimal places.
    pub profit_margin_percentage: Decimal,
}

/// One month of the sales series, ordered by (year, month) ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySalesPoint {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Total sales for the month.
    pub total_sales: Decimal,
    /// Total sales for the preceding month. `None` for the first point.
    pub previous_month_sales: Option<Decimal>,
    /// Month-over-month growth as a percentage, rounded to 2 decimal
    /// places. `None` for the first point or when the previous month is
    /// absent or had zero sales.
    pub month_over_month_growth: Option<Decimal>,
}

impl MonthlySalesPoint {
    /// Short label for the month ("Jan" through "Dec", empty if out of
    /// range).
    #[must_use]
    pub const fn month_label(&self) -> &'static str {
        match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            12 => "Dec",
            _ => "",
        }
    }
}

/// Per-category performance aggregate, one row per distinct category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    /// Category name.
    pub category: String,
    /// Total revenue for the category.
    pub category_revenue: Decimal,
    /// Total profit for the category (may be negative).
    pub category_profit: Decimal,
    /// Profit margin as a percentage, rounded to 2 decimal places.
    pub profit_margin: Decimal,
}

/// New customers signed up in a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAcquisitionPoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// Number of new customers in that month.
    pub new_customers: i64,
}

/// Summary metrics over the customer base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerMetrics {
    /// Number of distinct customers with at least one sale.
    pub total_customers: i64,
    /// Total revenue across those customers.
    pub total_revenue: Decimal,
    /// Average revenue per customer, rounded to 2 decimal places.
    /// Only constructed when `total_customers > 0`.
    pub average_revenue_per_customer: Decimal,
}

/// One consistent set of all eight aggregate query results, fetched
/// together and consumed as a single unit by insight derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Revenue summary.
    pub revenue: RevenueSummary,
    /// Profit breakdown. `None` when there are no sales rows.
    pub profit: Option<ProfitSummary>,
    /// Top products by revenue, descending, at most 5.
    pub top_products_by_revenue: Vec<ProductRecord>,
    /// Top products by profit, descending, at most 5.
    pub top_products_by_profit: Vec<ProductRecord>,
    /// Monthly sales series, (year, month) ascending.
    pub monthly_sales: Vec<MonthlySalesPoint>,
    /// Per-category performance.
    pub categories: Vec<CategoryPerformance>,
    /// Customer acquisition series, ascending by month.
    pub customer_acquisition: Vec<CustomerAcquisitionPoint>,
    /// Customer summary metrics. `None` when there are no customers with
    /// sales.
    pub customer_metrics: Option<CustomerMetrics>,
}

// ============================================================================
// Insight report records
// ============================================================================

/// Outcome of the concerning-product scan over the top-by-revenue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConcerningProduct {
    /// A top-revenue product is operating at a loss: the one with the
    /// highest revenue among the loss-makers.
    Negative {
        /// Product name.
        product: String,
        /// Its (negative) total profit.
        total_profit: Decimal,
        /// Its total revenue.
        total_revenue: Decimal,
    },
    /// No loss-makers in the list; the product with the thinnest margin
    /// instead.
    LowMargin {
        /// Product name.
        product: String,
        /// Its profit margin percentage.
        profit_margin: Decimal,
    },
    /// The top-products list was empty.
    NotAvailable,
}

impl ConcerningProduct {
    /// Product label for display, `"N/A"` when no product data exists.
    #[must_use]
    pub fn product_label(&self) -> &str {
        match self {
            Self::Negative { product, .. } | Self::LowMargin { product, .. } => product,
            Self::NotAvailable => "N/A",
        }
    }
}

/// Profit warning narrative fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitWarning {
    /// The concerning-product finding.
    #[serde(flatten)]
    pub finding: ConcerningProduct,
    /// Renderer-ready narrative text.
    pub message: String,
}

/// Growth opportunity narrative fact (most profitable category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthOpportunity {
    /// Category with the highest profit margin, `"N/A"` when the category
    /// list was empty. Kept even when the winning margin is not positive,
    /// because the action list references it.
    pub category: String,
    /// The winning margin (0 sentinel for an empty list).
    pub margin: Decimal,
    /// Whether the winning margin is positive. `false` signals that all
    /// categories are concerning.
    pub is_opportunity: bool,
    /// Renderer-ready narrative text.
    pub message: String,
}

/// Revenue pattern narrative fact (highest-growth month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePattern {
    /// Short label of the month with the highest month-over-month growth,
    /// `"N/A"` when the monthly series was empty.
    pub month: String,
    /// The winning growth percentage (0 sentinel for an empty series).
    pub growth: Decimal,
    /// Whether the winning growth is positive. `false` signals that no
    /// significant growth was detected.
    pub is_growth: bool,
    /// Renderer-ready narrative text.
    pub message: String,
}

/// Customer acquisition narrative fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNote {
    /// Average revenue per customer, carried verbatim from the metrics
    /// aggregate. `None` signals insufficient tracking.
    pub average_revenue_per_customer: Option<Decimal>,
    /// Renderer-ready narrative text.
    pub message: String,
}

/// Full derived-insight report: four narrative facts plus the fixed-order
/// action list, consumed by the external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Profit warning.
    pub profit_warning: ProfitWarning,
    /// Growth opportunity.
    pub growth_opportunity: GrowthOpportunity,
    /// Revenue pattern.
    pub revenue_pattern: RevenuePattern,
    /// Customer acquisition note.
    pub customer_note: CustomerNote,
    /// Exactly three directives: pricing review, category investment,
    /// growth-driver analysis, in that order.
    pub recommended_actions: [String; 3],
}
