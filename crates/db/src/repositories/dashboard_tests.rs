//! Tests for the dashboard repository's pure helpers.
//!
//! The aggregate SQL itself needs a live database; the margin and
//! growth-series derivations are pure and tested here.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::dashboard::{attach_growth, profit_margin_pct};

// ============================================================================
// Profit margin
// ============================================================================

#[rstest]
#[case(dec!(25), dec!(100), dec!(25.00))]
#[case(dec!(-10), dec!(200), dec!(-5.00))]
#[case(dec!(1), dec!(3), dec!(33.33))]
#[case(dec!(0), dec!(50), dec!(0.00))]
fn test_profit_margin_pct(
    #[case] profit: Decimal,
    #[case] revenue: Decimal,
    #[case] expected: Decimal,
) {
    assert_eq!(profit_margin_pct(profit, revenue), Some(expected));
}

#[test]
fn test_profit_margin_pct_zero_revenue_is_undefined() {
    assert_eq!(profit_margin_pct(dec!(10), Decimal::ZERO), None);
}

#[test]
fn test_profit_margin_pct_rounds_half_away_from_zero() {
    // 12.345% must round to 12.35, not banker's 12.34.
    assert_eq!(
        profit_margin_pct(dec!(12.345), dec!(100)),
        Some(dec!(12.35))
    );
    assert_eq!(
        profit_margin_pct(dec!(-12.345), dec!(100)),
        Some(dec!(-12.35))
    );
}

// ============================================================================
// Growth series
// ============================================================================

#[test]
fn test_attach_growth_first_point_has_no_growth() {
    let points = attach_growth(vec![(2025, 1, dec!(4000))]);

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].previous_month_sales, None);
    assert_eq!(points[0].month_over_month_growth, None);
}

#[test]
fn test_attach_growth_computes_percentage_change() {
    let points = attach_growth(vec![
        (2025, 1, dec!(4000)),
        (2025, 2, dec!(4500)),
        (2025, 3, dec!(4365)),
    ]);

    assert_eq!(points[1].previous_month_sales, Some(dec!(4000)));
    assert_eq!(points[1].month_over_month_growth, Some(dec!(12.50)));
    assert_eq!(points[2].previous_month_sales, Some(dec!(4500)));
    assert_eq!(points[2].month_over_month_growth, Some(dec!(-3.00)));
}

#[test]
fn test_attach_growth_zero_previous_month_leaves_growth_undefined() {
    let points = attach_growth(vec![(2025, 1, dec!(0)), (2025, 2, dec!(500))]);

    assert_eq!(points[1].previous_month_sales, Some(dec!(0)));
    assert_eq!(points[1].month_over_month_growth, None);
}

#[test]
fn test_attach_growth_empty_series() {
    assert!(attach_growth(Vec::new()).is_empty());
}

// ============================================================================
// Property-based tests
// ============================================================================

/// Strategy for positive monthly totals with 2 fractional digits.
fn total_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    /// Growth is positive exactly when the month beat its predecessor.
    #[test]
    fn prop_growth_sign_matches_direction(
        totals in prop::collection::vec(total_strategy(), 2..12),
    ) {
        let series: Vec<(i32, u32, Decimal)> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| (2025, u32::try_from(i + 1).unwrap(), *total))
            .collect();

        let points = attach_growth(series);

        for window in points.windows(2) {
            let growth = window[1].month_over_month_growth.unwrap();
            match window[1].total_sales.cmp(&window[0].total_sales) {
                std::cmp::Ordering::Greater => prop_assert!(growth > Decimal::ZERO),
                std::cmp::Ordering::Less => prop_assert!(growth < Decimal::ZERO),
                std::cmp::Ordering::Equal => prop_assert_eq!(growth, Decimal::ZERO),
            }
        }
    }

    /// Every point's previous_month_sales echoes the preceding total, and
    /// the point count matches the input.
    #[test]
    fn prop_previous_month_chains(
        totals in prop::collection::vec(total_strategy(), 0..12),
    ) {
        let series: Vec<(i32, u32, Decimal)> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| (2025, u32::try_from(i + 1).unwrap(), *total))
            .collect();

        let points = attach_growth(series);

        prop_assert_eq!(points.len(), totals.len());
        if let Some(first) = points.first() {
            prop_assert_eq!(first.previous_month_sales, None);
        }
        for window in points.windows(2) {
            prop_assert_eq!(
                window[1].previous_month_sales,
                Some(window[0].total_sales)
            );
        }
    }

    /// The margin helper never returns more than 2 decimal places and is
    /// only undefined for zero revenue.
    #[test]
    fn prop_margin_scale_and_definedness(
        profit in -100_000_000i64..100_000_000i64,
        revenue in 1i64..100_000_000i64,
    ) {
        let profit = Decimal::new(profit, 2);
        let revenue = Decimal::new(revenue, 2);

        let margin = profit_margin_pct(profit, revenue).unwrap();
        prop_assert!(margin.scale() <= 2);
        if !margin.is_zero() {
            prop_assert_eq!(margin.is_sign_negative(), profit.is_sign_negative());
        }
    }
}
