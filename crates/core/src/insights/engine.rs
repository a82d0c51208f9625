//! Insight derivation engine.
//!
//! A single pure transformation over the aggregate snapshot, re-run on
//! every successful data refresh. No persisted or incremental state.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{
    CategoryPerformance, ConcerningProduct, CustomerMetrics, CustomerNote, DashboardSnapshot,
    GrowthOpportunity, InsightReport, MonthlySalesPoint, ProductRecord, ProfitWarning,
    RevenuePattern,
};

/// Engine deriving narrative insights from a dashboard snapshot.
pub struct InsightEngine;

impl InsightEngine {
    /// Derives the full insight report from a snapshot.
    ///
    /// Total over every snapshot shape: empty lists and absent metrics
    /// degrade to "not available" sentinels, never to an error.
    #[must_use]
    pub fn derive_insights(snapshot: &DashboardSnapshot) -> InsightReport {
        let profit_warning =
            Self::build_profit_warning(Self::find_concerning_product(
                &snapshot.top_products_by_revenue,
            ));
        let growth_opportunity =
            Self::build_growth_opportunity(Self::find_most_profitable_category(
                &snapshot.categories,
            ));
        let revenue_pattern =
            Self::build_revenue_pattern(Self::find_highest_growth_month(&snapshot.monthly_sales));
        let customer_note = Self::build_customer_note(snapshot.customer_metrics.as_ref());

        let recommended_actions = [
            format!(
                "Review pricing and cost structure for underperforming products, particularly {}.",
                profit_warning.finding.product_label()
            ),
            format!(
                "Invest in expanding the {} product category.",
                growth_opportunity.category
            ),
            format!(
                "Analyze factors behind {}'s performance to develop growth strategies.",
                revenue_pattern.month
            ),
        ];

        InsightReport {
            profit_warning,
            growth_opportunity,
            revenue_pattern,
            customer_note,
            recommended_actions,
        }
    }

    /// Scans the top-by-revenue list for the most concerning product.
    ///
    /// Loss-makers take priority, picking the highest revenue among them;
    /// otherwise the thinnest margin wins. Strict comparisons keep the
    /// first-encountered entry on ties.
    fn find_concerning_product(products: &[ProductRecord]) -> ConcerningProduct {
        let Some(first) = products.first() else {
            return ConcerningProduct::NotAvailable;
        };

        let mut loss_maker: Option<&ProductRecord> = None;
        for product in products {
            if product.total_profit < Decimal::ZERO
                && loss_maker.is_none_or(|current| product.total_revenue > current.total_revenue)
            {
                loss_maker = Some(product);
            }
        }

        if let Some(product) = loss_maker {
            return ConcerningProduct::Negative {
                product: product.product_name.clone(),
                total_profit: product.total_profit,
                total_revenue: product.total_revenue,
            };
        }

        let mut thinnest = first;
        for product in &products[1..] {
            if product.profit_margin_percentage < thinnest.profit_margin_percentage {
                thinnest = product;
            }
        }

        ConcerningProduct::LowMargin {
            product: thinnest.product_name.clone(),
            profit_margin: thinnest.profit_margin_percentage,
        }
    }

    /// Selects the category with the highest profit margin.
    ///
    /// The running maximum starts from the first row, not from zero, so an
    /// all-negative list still names a real category.
    fn find_most_profitable_category(categories: &[CategoryPerformance]) -> (String, Decimal) {
        let Some(first) = categories.first() else {
            return ("N/A".to_string(), Decimal::ZERO);
        };

        let mut best = first;
        for category in &categories[1..] {
            if category.profit_margin > best.profit_margin {
                best = category;
            }
        }

        (best.category.clone(), best.profit_margin)
    }

    /// Selects the month with the highest month-over-month growth.
    ///
    /// Absent growth compares as zero; the running maximum starts from the
    /// first point's growth-or-zero, not from a zero literal.
    fn find_highest_growth_month(points: &[MonthlySalesPoint]) -> (String, Decimal) {
        let Some(first) = points.first() else {
            return ("N/A".to_string(), Decimal::ZERO);
        };

        let mut best_month = first.month_label().to_string();
        let mut best_growth = first.month_over_month_growth.unwrap_or(Decimal::ZERO);
        for point in &points[1..] {
            let growth = point.month_over_month_growth.unwrap_or(Decimal::ZERO);
            if growth > best_growth {
                best_month = point.month_label().to_string();
                best_growth = growth;
            }
        }

        (best_month, best_growth)
    }

    fn build_profit_warning(finding: ConcerningProduct) -> ProfitWarning {
        let message = match &finding {
            ConcerningProduct::Negative {
                product,
                total_profit,
                ..
            } => format!(
                "{product} is generating significant revenue but operating at a loss of \
                 ${total_profit}. Urgent pricing or cost structure review needed."
            ),
            ConcerningProduct::LowMargin {
                product,
                profit_margin,
            } => format!(
                "{product} has the lowest profit margin at {profit_margin}%. Consider reviewing \
                 its pricing strategy."
            ),
            ConcerningProduct::NotAvailable => {
                "Product performance data is not available.".to_string()
            }
        };

        ProfitWarning { finding, message }
    }

    fn build_growth_opportunity((category, margin): (String, Decimal)) -> GrowthOpportunity {
        let is_opportunity = margin > Decimal::ZERO;
        let message = if is_opportunity {
            format!(
                "{category} has the highest profit margin at {margin}%. Consider expanding this \
                 product line and increasing marketing efforts."
            )
        } else {
            "All categories are currently showing concerning profit margins. Focus on cost \
             reduction and pricing strategies."
                .to_string()
        };

        GrowthOpportunity {
            category,
            margin,
            is_opportunity,
            message,
        }
    }

    fn build_revenue_pattern((month, growth): (String, Decimal)) -> RevenuePattern {
        let is_growth = growth > Decimal::ZERO;
        let message = if is_growth {
            let display =
                growth.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!(
                "{month} showed an extraordinary revenue spike ({display}% growth). Identifying \
                 and replicating these success factors could drive future growth."
            )
        } else {
            "No significant month-over-month growth detected. Analyze sales strategies and \
             market conditions to develop growth initiatives."
                .to_string()
        };

        RevenuePattern {
            month,
            growth,
            is_growth,
            message,
        }
    }

    fn build_customer_note(metrics: Option<&CustomerMetrics>) -> CustomerNote {
        match metrics {
            Some(metrics) => CustomerNote {
                average_revenue_per_customer: Some(metrics.average_revenue_per_customer),
                message: format!(
                    "The average revenue per customer is ${}, suggesting potential for increased \
                     customer lifetime value strategies.",
                    metrics.average_revenue_per_customer
                ),
            },
            None => CustomerNote {
                average_revenue_per_customer: None,
                message: "Develop more robust customer acquisition tracking to better understand \
                          your customer base and lifetime value."
                    .to_string(),
            },
        }
    }
}
