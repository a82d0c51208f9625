//! Dashboard repository for the eight aggregate queries.
//!
//! Every query is a pure read; the repository owns the zero-denominator
//! guards so the insight engine downstream never sees a ratio it cannot
//! trust.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryOrder, QuerySelect, Statement,
};

use salient_core::insights::{
    CategoryPerformance, CustomerAcquisitionPoint, CustomerMetrics, DashboardSnapshot,
    MonthlySalesPoint, ProductRecord, ProfitSummary, RevenueSummary,
};

use crate::entities::product_performance;
use crate::entities::sales;

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Top-N limit for the product rankings.
const TOP_PRODUCT_LIMIT: u64 = 5;

/// Dashboard repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct MonthlyTotalRow {
    year: i32,
    month: i32,
    total_sales: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct AcquisitionRow {
    month: NaiveDate,
    new_customers: i64,
}

#[derive(Debug, FromQueryResult)]
struct CustomerTotalsRow {
    total_customers: i64,
    total_revenue: Option<Decimal>,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Queries total revenue across all sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_revenue_summary(&self) -> Result<RevenueSummary, DashboardError> {
        let total: Option<Option<Decimal>> = sales::Entity::find()
            .select_only()
            .column_as(sales::Column::TotalPrice.sum(), "total_revenue")
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(RevenueSummary {
            total_revenue: total.flatten(),
        })
    }

    /// Queries the profit breakdown: revenue, cost, profit, margin.
    ///
    /// Returns `None` when there are no sales rows or total revenue is zero
    /// (the margin ratio would be undefined).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_profit_summary(&self) -> Result<Option<ProfitSummary>, DashboardError> {
        let row: Option<(Option<Decimal>, Option<Decimal>)> = product_performance::Entity::find()
            .select_only()
            .column_as(
                product_performance::Column::TotalRevenue.sum(),
                "total_revenue",
            )
            .column_as(
                product_performance::Column::TotalProfit.sum(),
                "total_profit",
            )
            .into_tuple()
            .one(&self.db)
            .await?;

        let Some((Some(total_revenue), Some(total_profit))) = row else {
            return Ok(None);
        };
        let Some(profit_margin_percentage) = profit_margin_pct(total_profit, total_revenue) else {
            return Ok(None);
        };

        Ok(Some(ProfitSummary {
            total_revenue,
            total_cost: total_revenue - total_profit,
            total_profit,
            profit_margin_percentage,
        }))
    }

    /// Queries the top 5 products by revenue, descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_top_products_by_revenue(
        &self,
    ) -> Result<Vec<ProductRecord>, DashboardError> {
        let rows = product_performance::Entity::find()
            .order_by_desc(product_performance::Column::TotalRevenue)
            .limit(TOP_PRODUCT_LIMIT)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(product_record).collect())
    }

    /// Queries the top 5 products by profit, descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_top_products_by_profit(
        &self,
    ) -> Result<Vec<ProductRecord>, DashboardError> {
        let rows = product_performance::Entity::find()
            .order_by_desc(product_performance::Column::TotalProfit)
            .limit(TOP_PRODUCT_LIMIT)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(product_record).collect())
    }

    /// Queries the monthly sales series, (year, month) ascending, with
    /// previous-month totals and month-over-month growth attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_monthly_sales(&self) -> Result<Vec<MonthlySalesPoint>, DashboardError> {
        let rows = MonthlyTotalRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            r"
            SELECT
                CAST(EXTRACT(YEAR FROM sale_date) AS INTEGER) AS year,
                CAST(EXTRACT(MONTH FROM sale_date) AS INTEGER) AS month,
                SUM(total_price) AS total_sales
            FROM sales
            GROUP BY 1, 2
            ORDER BY 1, 2
            ",
        ))
        .all(&self.db)
        .await?;

        let totals = rows
            .into_iter()
            .map(|row| {
                (
                    row.year,
                    u32::try_from(row.month).unwrap_or(0),
                    row.total_sales,
                )
            })
            .collect();

        Ok(attach_growth(totals))
    }

    /// Queries per-category revenue, profit, and margin, revenue
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_category_performance(
        &self,
    ) -> Result<Vec<CategoryPerformance>, DashboardError> {
        let rows: Vec<(String, Option<Decimal>, Option<Decimal>)> =
            product_performance::Entity::find()
                .select_only()
                .column(product_performance::Column::Category)
                .column_as(
                    product_performance::Column::TotalRevenue.sum(),
                    "category_revenue",
                )
                .column_as(
                    product_performance::Column::TotalProfit.sum(),
                    "category_profit",
                )
                .group_by(product_performance::Column::Category)
                .order_by_desc(product_performance::Column::TotalRevenue.sum())
                .into_tuple()
                .all(&self.db)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(category, revenue, profit)| {
                let category_revenue = revenue.unwrap_or(Decimal::ZERO);
                let category_profit = profit.unwrap_or(Decimal::ZERO);
                CategoryPerformance {
                    profit_margin: profit_margin_pct(category_profit, category_revenue)
                        .unwrap_or(Decimal::ZERO),
                    category,
                    category_revenue,
                    category_profit,
                }
            })
            .collect())
    }

    /// Queries new-customer counts per signup month, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_customer_acquisition(
        &self,
    ) -> Result<Vec<CustomerAcquisitionPoint>, DashboardError> {
        let rows = AcquisitionRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            r"
            SELECT
                CAST(DATE_TRUNC('month', signup_date) AS DATE) AS month,
                COUNT(*) AS new_customers
            FROM customers
            GROUP BY 1
            ORDER BY 1
            ",
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CustomerAcquisitionPoint {
                month: row.month,
                new_customers: row.new_customers,
            })
            .collect())
    }

    /// Queries customer summary metrics.
    ///
    /// Returns `None` when no customer has a sale yet (the per-customer
    /// average would divide by zero).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_customer_metrics(&self) -> Result<Option<CustomerMetrics>, DashboardError> {
        let row = CustomerTotalsRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            r"
            SELECT
                COUNT(DISTINCT customer_id) AS total_customers,
                SUM(total_price) AS total_revenue
            FROM sales
            ",
        ))
        .one(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        if row.total_customers == 0 {
            return Ok(None);
        }
        let Some(total_revenue) = row.total_revenue else {
            return Ok(None);
        };

        let average = (total_revenue / Decimal::from(row.total_customers))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Ok(Some(CustomerMetrics {
            total_customers: row.total_customers,
            total_revenue,
            average_revenue_per_customer: average,
        }))
    }

    /// Fetches all eight aggregates and assembles a consistent snapshot.
    ///
    /// Join-all semantics: if any query fails, the whole refresh fails.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the eight queries fails.
    pub async fn query_snapshot(&self) -> Result<DashboardSnapshot, DashboardError> {
        tracing::debug!("Assembling dashboard snapshot from aggregate queries");

        let (
            revenue,
            profit,
            top_products_by_revenue,
            top_products_by_profit,
            monthly_sales,
            categories,
            customer_acquisition,
            customer_metrics,
        ) = tokio::try_join!(
            self.query_revenue_summary(),
            self.query_profit_summary(),
            self.query_top_products_by_revenue(),
            self.query_top_products_by_profit(),
            self.query_monthly_sales(),
            self.query_category_performance(),
            self.query_customer_acquisition(),
            self.query_customer_metrics(),
        )?;

        Ok(DashboardSnapshot {
            revenue,
            profit,
            top_products_by_revenue,
            top_products_by_profit,
            monthly_sales,
            categories,
            customer_acquisition,
            customer_metrics,
        })
    }
}

// ============================================================================
// Pure helpers
// ============================================================================

/// Profit margin as a percentage, 2 decimal places, half away from zero
/// (matching Postgres `ROUND`). `None` when revenue is zero.
pub(crate) fn profit_margin_pct(profit: Decimal, revenue: Decimal) -> Option<Decimal> {
    if revenue.is_zero() {
        return None;
    }
    Some(
        (profit / revenue * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    )
}

/// Attaches previous-month totals and month-over-month growth to an
/// ordered (year, month, total) series.
///
/// The first point carries no previous total and no growth; a zero
/// previous month leaves growth undefined rather than dividing by zero.
pub(crate) fn attach_growth(totals: Vec<(i32, u32, Decimal)>) -> Vec<MonthlySalesPoint> {
    let mut points = Vec::with_capacity(totals.len());
    let mut previous: Option<Decimal> = None;

    for (year, month, total_sales) in totals {
        let growth = previous.and_then(|prev| {
            if prev.is_zero() {
                None
            } else {
                Some(
                    ((total_sales - prev) / prev * Decimal::ONE_HUNDRED)
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                )
            }
        });

        points.push(MonthlySalesPoint {
            year,
            month,
            total_sales,
            previous_month_sales: previous,
            month_over_month_growth: growth,
        });
        previous = Some(total_sales);
    }

    points
}

fn product_record(row: product_performance::Model) -> ProductRecord {
    ProductRecord {
        profit_margin_percentage: profit_margin_pct(row.total_profit, row.total_revenue)
            .unwrap_or(Decimal::ZERO),
        product_id: row.product_id,
        product_name: row.product_name,
        category: row.category,
        total_revenue: row.total_revenue,
        total_profit: row.total_profit,
    }
}
