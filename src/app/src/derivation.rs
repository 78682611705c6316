//! Recomputation rule: derived outputs and chart datasets as pure functions
//! of the primary inputs.

use crate::types::{ChartDatasets, DerivedOutputs, MarginPoint, PrimaryInputs, RevenuePoint};

/// Growth rate (percent) at which revenue equals the per-employee baseline.
pub const BASELINE_GROWTH_RATE: f64 = 8.0;
pub const REVENUE_PER_EMPLOYEE: f64 = 10_000.0;
pub const BASELINE_MARGIN: f64 = 15.0;
pub const MIN_MARGIN: f64 = 10.0;
pub const MAX_MARGIN: f64 = 25.0;

/// Revenue of the oldest charted year, in millions.
const REVENUE_SERIES_BASE: f64 = 6.0;
const REVENUE_SERIES_STEP: f64 = 1.2;
const REVENUE_SERIES_YEARS: i32 = 5;

/// Magnitude from which every `f64` is already a whole number.
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0;

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    if value.abs() >= INTEGRAL_MAGNITUDE {
        return value;
    }
    let rounded = value.round();
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

/// Round to one decimal place, ties toward positive infinity.
pub fn round1(value: f64) -> f64 {
    if value.abs() >= INTEGRAL_MAGNITUDE {
        return value;
    }
    round_half_up(value * 10.0) / 10.0
}

/// Keep a published value JSON encodable: overflow saturates at
/// `±f64::MAX`, NaN becomes 0.
pub fn finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Compute the derived outputs.
///
/// Intermediate values stay unrounded; only the published outputs are
/// rounded. A non-positive investment yields an ROI of 0. Values beyond the
/// `f64` range saturate at `±f64::MAX`.
pub fn derive_outputs(inputs: &PrimaryInputs) -> DerivedOutputs {
    let growth_delta = inputs.revenue_growth_rate - BASELINE_GROWTH_RATE;

    let revenue = inputs.employees as f64 * REVENUE_PER_EMPLOYEE * (1.0 + growth_delta * 0.1);
    let margin = (BASELINE_MARGIN + growth_delta * 0.5).clamp(MIN_MARGIN, MAX_MARGIN);

    let roi = if inputs.total_investment > 0 {
        let net_profit = revenue * (margin / 100.0);
        net_profit / inputs.total_investment as f64 * 100.0
    } else {
        0.0
    };

    DerivedOutputs {
        annual_revenue: finite(round_half_up(revenue)),
        profit_margin: round1(margin),
        roi_percentage: finite(round1(roi)),
    }
}

/// Compute both chart series.
///
/// The margin series is projected from the already derived (rounded)
/// `profit_margin`, so it always reflects the inputs it is computed with.
pub fn derive_charts(
    inputs: &PrimaryInputs,
    outputs: &DerivedOutputs,
    current_year: i32,
) -> ChartDatasets {
    ChartDatasets {
        revenue_series: revenue_series(inputs.revenue_growth_rate, current_year),
        margin_series: margin_series(outputs.profit_margin),
    }
}

fn revenue_series(growth_rate: f64, current_year: i32) -> Vec<RevenuePoint> {
    let first_year = current_year - (REVENUE_SERIES_YEARS - 1);

    (0..REVENUE_SERIES_YEARS)
        .map(|i| RevenuePoint {
            year: first_year + i,
            revenue: finite(round1(
                REVENUE_SERIES_BASE + f64::from(i) * REVENUE_SERIES_STEP + growth_rate / 10.0,
            )),
        })
        .collect()
}

fn margin_series(profit_margin: f64) -> Vec<MarginPoint> {
    [
        ("Q1", (profit_margin - 3.0).max(MIN_MARGIN)),
        ("Q2", (profit_margin - 1.0).max(12.0)),
        ("Q3", profit_margin),
        ("Q4", (profit_margin + 1.0).min(MAX_MARGIN)),
    ]
    .into_iter()
    .map(|(quarter, margin)| MarginPoint {
        quarter: quarter.to_string(),
        margin: round1(margin),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(employees: i64, growth: f64, investment: i64) -> PrimaryInputs {
        PrimaryInputs {
            employees,
            revenue_growth_rate: growth,
            total_investment: investment,
            ..Default::default()
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn ties_round_toward_positive_infinity() {
            assert_eq!(round_half_up(2.5), 3.0);
            assert_eq!(round_half_up(-2.5), -2.0);
            assert_eq!(round_half_up(-2.6), -3.0);
        }

        #[test]
        fn huge_values_are_left_unchanged() {
            assert_eq!(round_half_up(1.2e20), 1.2e20);
            assert_eq!(round1(1e300), 1e300);
            assert_eq!(round1(-1e300), -1e300);
        }

        #[test]
        fn finite_saturates_and_zeroes_nan() {
            assert_eq!(finite(f64::INFINITY), f64::MAX);
            assert_eq!(finite(f64::NEG_INFINITY), f64::MIN);
            assert_eq!(finite(f64::NAN), 0.0);
            assert_eq!(finite(9.5), 9.5);
        }

        #[test]
        fn one_decimal_absorbs_float_noise() {
            assert_eq!(round1(6.8 + 3.0 * 1.2), 10.4);
            assert_eq!(round1(13.200000000000001), 13.2);
        }
    }

    mod outputs {
        use super::*;

        #[test]
        fn defaults_match_reference_values() {
            let outputs = derive_outputs(&PrimaryInputs::default());

            assert_eq!(outputs.annual_revenue, 1_200_000.0);
            assert_eq!(outputs.profit_margin, 15.0);
            assert_eq!(outputs.roi_percentage, 9.0);
        }

        #[test]
        fn growth_above_baseline_raises_revenue_and_margin() {
            let outputs = derive_outputs(&inputs(120, 18.0, 2_000_000));

            assert_eq!(outputs.annual_revenue, 2_400_000.0);
            assert_eq!(outputs.profit_margin, 20.0);
            assert_eq!(outputs.roi_percentage, 24.0);
        }

        #[test]
        fn one_point_of_growth_adds_ten_percent_revenue() {
            let outputs = derive_outputs(&inputs(120, 9.0, 2_000_000));

            assert_eq!(outputs.annual_revenue, 1_320_000.0);
            assert_eq!(outputs.profit_margin, 15.5);
            assert_eq!(outputs.roi_percentage, 10.2);
        }

        #[test]
        fn margin_stays_within_bounds_for_extreme_growth() {
            for growth in [-1.0e9, -100.0, -12.0, 0.0, 8.0, 28.0, 40.0, 1.0e9] {
                let margin = derive_outputs(&inputs(120, growth, 2_000_000)).profit_margin;
                assert!(
                    (MIN_MARGIN..=MAX_MARGIN).contains(&margin),
                    "margin {margin} out of bounds for growth {growth}"
                );
            }
        }

        #[test]
        fn margin_clamps_at_both_ends() {
            assert_eq!(derive_outputs(&inputs(1, -50.0, 1)).profit_margin, 10.0);
            assert_eq!(derive_outputs(&inputs(1, 500.0, 1)).profit_margin, 25.0);
        }

        #[test]
        fn zero_investment_yields_zero_roi() {
            let outputs = derive_outputs(&inputs(120, 8.0, 0));

            assert_eq!(outputs.roi_percentage, 0.0);
            assert_eq!(outputs.annual_revenue, 1_200_000.0);
        }

        #[test]
        fn zero_employees_yield_zero_revenue() {
            let outputs = derive_outputs(&inputs(0, 8.0, 2_000_000));

            assert_eq!(outputs.annual_revenue, 0.0);
            assert_eq!(outputs.roi_percentage, 0.0);
        }

        #[test]
        fn huge_growth_rate_follows_formula_past_integer_range() {
            let outputs = derive_outputs(&inputs(120, 1e15, 2_000_000));

            let expected = 120.0 * REVENUE_PER_EMPLOYEE * (1.0 + (1e15 - 8.0) * 0.1);
            assert_eq!(outputs.annual_revenue, expected);
            assert!(outputs.annual_revenue > i64::MAX as f64);
            assert_eq!(outputs.profit_margin, MAX_MARGIN);
        }

        #[test]
        fn overflowing_growth_rate_saturates_outputs() {
            for growth in [1e307, f64::MAX, -f64::MAX] {
                let outputs = derive_outputs(&inputs(i64::MAX, growth, 1));

                assert!(outputs.annual_revenue.is_finite(), "revenue for {growth}");
                assert!(outputs.roi_percentage.is_finite(), "roi for {growth}");
            }

            let outputs = derive_outputs(&inputs(120, 1e307, 2_000_000));
            assert_eq!(outputs.annual_revenue, f64::MAX);
            assert_eq!(outputs.roi_percentage, f64::MAX);
        }

        #[test]
        fn derivation_is_idempotent() {
            let inputs = inputs(137, 11.3, 987_654);
            let first = derive_outputs(&inputs);
            let second = derive_outputs(&inputs);

            assert_eq!(first.annual_revenue, second.annual_revenue);
            assert_eq!(
                first.profit_margin.to_bits(),
                second.profit_margin.to_bits()
            );
            assert_eq!(
                first.roi_percentage.to_bits(),
                second.roi_percentage.to_bits()
            );
            assert_eq!(
                derive_charts(&inputs, &first, 2025),
                derive_charts(&inputs, &second, 2025)
            );
        }
    }

    mod charts {
        use super::*;

        #[test]
        fn revenue_series_covers_five_years_ending_now() {
            let series = revenue_series(8.0, 2025);

            let years: Vec<i32> = series.iter().map(|p| p.year).collect();
            let revenue: Vec<f64> = series.iter().map(|p| p.revenue).collect();

            assert_eq!(years, vec![2021, 2022, 2023, 2024, 2025]);
            assert_eq!(revenue, vec![6.8, 8.0, 9.2, 10.4, 11.6]);
        }

        #[test]
        fn revenue_series_stays_finite_for_extreme_growth() {
            assert!(revenue_series(f64::MAX, 2025).iter().all(|p| p.revenue.is_finite()));
        }

        #[test]
        fn revenue_series_shifts_with_growth_rate() {
            let series = revenue_series(18.0, 2025);
            assert_eq!(series[0].revenue, 7.8);
            assert_eq!(series[4].revenue, 12.6);
        }

        #[test]
        fn margin_series_applies_quarter_offsets() {
            let margins: Vec<f64> = margin_series(15.0).iter().map(|p| p.margin).collect();
            assert_eq!(margins, vec![12.0, 14.0, 15.0, 16.0]);
        }

        #[test]
        fn margin_series_floors_and_caps() {
            let low: Vec<f64> = margin_series(10.0).iter().map(|p| p.margin).collect();
            assert_eq!(low, vec![10.0, 12.0, 10.0, 11.0]);

            let high: Vec<f64> = margin_series(25.0).iter().map(|p| p.margin).collect();
            assert_eq!(high, vec![22.0, 24.0, 25.0, 25.0]);
        }

        #[test]
        fn margin_series_uses_quarter_labels() {
            let labels: Vec<String> = margin_series(15.0)
                .into_iter()
                .map(|p| p.quarter)
                .collect();
            assert_eq!(labels, vec!["Q1", "Q2", "Q3", "Q4"]);
        }
    }
}
