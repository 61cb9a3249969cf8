use crate::model::sales::{AggregateRecord, CellValue, MetricField, SalesRecord, GRAND_TOTAL_LABEL};

/// How a cell should be highlighted by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellClass {
    /// Shrinking month-to-date sales (red).
    Negative,
    /// Growth above the threshold (green).
    Positive,
    #[default]
    Neutral,
}

// Strictly greater than this is highlighted as growth; the threshold itself is neutral.
const GROWTH_THRESHOLD: f64 = 1.0;

/// Builds the Grand Total row for a record set.
///
/// Each column is summed independently. The three lakh/percentage columns are
/// rounded to one decimal after summing, the counts and P/D keep the full sum.
/// An empty set yields an all-zero row.
pub fn compute_aggregate(records: &[SalesRecord]) -> AggregateRecord {
    AggregateRecord {
        manager_name: GRAND_TOTAL_LABEL.to_string(),
        target_doctor_count: sum_counts(records.iter().map(|r| r.target_doctor_count)),
        engaged_doctor_count: sum_counts(records.iter().map(|r| r.engaged_doctor_count)),
        overall_secondary_lakh: round_to_tenth(sum_column(
            records,
            MetricField::OverallSecondaryLakh,
        )),
        engaged_doctor_secondary_lakh: round_to_tenth(sum_column(
            records,
            MetricField::EngagedDoctorSecondaryLakh,
        )),
        per_doctor_value: sum_column(records, MetricField::PerDoctorValue),
        month_to_date_sales_growth: round_to_tenth(sum_column(
            records,
            MetricField::MonthToDateSalesGrowth,
        )),
    }
}

/// Renders a cell. Rounded fields always carry exactly one decimal,
/// everything else is shown as-is. Text passes through.
pub fn format_field(value: &CellValue, field: MetricField) -> String {
    match value {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(n) if field.is_rounded() => to_fixed_one(*n),
        CellValue::Number(n) => plain_number(*n),
    }
}

pub fn classify_cell(value: f64, field: MetricField) -> CellClass {
    if field != MetricField::MonthToDateSalesGrowth {
        return CellClass::Neutral;
    }
    if value < 0.0 {
        CellClass::Negative
    } else if value > GROWTH_THRESHOLD {
        CellClass::Positive
    } else {
        CellClass::Neutral
    }
}

/// Rounds to the nearest tenth, judged on the exact binary value.
pub fn round_to_tenth(value: f64) -> f64 {
    to_fixed_one(value).parse().unwrap_or(value)
}

/// Fixed one-decimal text. Exact halves round away from zero, and a
/// negative zero is shown as `0.0`.
pub fn to_fixed_one(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value < 0.0 {
        return format!("-{}", to_fixed_one(-value));
    }
    if value.is_infinite() {
        return "Infinity".to_string();
    }

    let value = value.abs();
    // Only odd multiples of 0.25 sit exactly halfway between two tenths.
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{:.1}", value)
}

fn plain_number(value: f64) -> String {
    if value == 0.0 {
        // folds -0
        return "0".to_string();
    }
    value.to_string()
}

fn sum_counts(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, |acc, v| acc.saturating_add(v))
}

/// Float addition is not associative, so the column is summed in a canonical
/// order to make the total independent of row order.
fn sum_column(records: &[SalesRecord], field: MetricField) -> f64 {
    let mut values: Vec<f64> = records.iter().map(|r| r.value(field)).collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        tgt: u64,
        crm: u64,
        overall: f64,
        crm_sec: f64,
        pd: f64,
        mtd: f64,
    ) -> SalesRecord {
        SalesRecord {
            manager_name: name.to_string(),
            target_doctor_count: tgt,
            engaged_doctor_count: crm,
            overall_secondary_lakh: overall,
            engaged_doctor_secondary_lakh: crm_sec,
            per_doctor_value: pd,
            month_to_date_sales_growth: mtd,
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("Puneet Agarwal", 171, 8, 2.4, 0.7, 9091.0, 0.2),
            record("Anil Kumar Bind", 134, 28, 4.0, 2.8, 9998.0, 1.4),
            record("Shashank Shukla", 127, 10, 1.1, 0.6, 5587.0, 0.6),
            record("Ashwini Kumar Mathur", 128, 11, 1.2, 0.8, 7015.0, -0.1),
            record("Ramrao Giri", 129, 19, 1.9, 0.5, 4758.0, 1.6),
        ]
    }

    #[test]
    fn test_empty_input_is_zero_total() {
        let total = compute_aggregate(&[]);
        assert_eq!(total.manager_name, "Grand Total");
        assert_eq!(total.target_doctor_count, 0);
        assert_eq!(total.engaged_doctor_count, 0);
        assert_eq!(total.overall_secondary_lakh, 0.0);
        assert_eq!(total.engaged_doctor_secondary_lakh, 0.0);
        assert_eq!(total.per_doctor_value, 0.0);
        assert_eq!(total.month_to_date_sales_growth, 0.0);
        assert_eq!(
            format_field(&total.overall_secondary_lakh.into(), MetricField::OverallSecondaryLakh),
            "0.0"
        );
        assert_eq!(format_field(&total.per_doctor_value.into(), MetricField::PerDoctorValue), "0");
    }

    #[test]
    fn test_two_row_sum() {
        let records = &sample()[..2];
        let total = compute_aggregate(records);
        assert_eq!(total.target_doctor_count, 305);
        assert_eq!(total.engaged_doctor_count, 36);
        assert_eq!(total.per_doctor_value, 19089.0);
        assert_eq!(total.month_to_date_sales_growth, 1.6);
    }

    #[test]
    fn test_full_sample() {
        let total = compute_aggregate(&sample());
        assert_eq!(total.target_doctor_count, 689);
        assert_eq!(total.engaged_doctor_count, 76);
        assert_eq!(total.overall_secondary_lakh, 10.6);
        assert_eq!(total.engaged_doctor_secondary_lakh, 5.4);
        assert_eq!(total.per_doctor_value, 36449.0);
        assert_eq!(total.month_to_date_sales_growth, 3.7);
    }

    #[test]
    fn test_rounded_sum_formats_with_one_decimal() {
        let records: Vec<_> = [0.7, 2.8, 0.6]
            .iter()
            .map(|v| record("rm", 0, 0, 0.0, *v, 0.0, 0.0))
            .collect();
        let total = compute_aggregate(&records);
        assert_eq!(
            format_field(
                &total.engaged_doctor_secondary_lakh.into(),
                MetricField::EngagedDoctorSecondaryLakh
            ),
            "4.1"
        );
    }

    #[test]
    fn test_order_independence() {
        let mut records = vec![
            record("a", 1, 2, 0.1, 0.2, 1e16, 0.3),
            record("b", 3, 4, 0.2, 1e-3, 1.0, -0.7),
            record("c", 5, 6, 0.3, 7.77, -1e16, 0.45),
            record("d", 7, 8, 1e10, 0.01, 3.5, 2.25),
        ];
        let expected = compute_aggregate(&records);
        // every rotation and the reversal of each
        for _ in 0..records.len() {
            records.rotate_left(1);
            let forward = compute_aggregate(&records);
            let mut reversed = records.clone();
            reversed.reverse();
            let backward = compute_aggregate(&reversed);
            for field in MetricField::ALL {
                let bits = expected.value(field).to_bits();
                assert_eq!(forward.value(field).to_bits(), bits, "{field}");
                assert_eq!(backward.value(field).to_bits(), bits, "{field}");
            }
        }
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let records = sample();
        let before = records.clone();
        let first = compute_aggregate(&records);
        for _ in 0..3 {
            assert_eq!(compute_aggregate(&records), first);
        }
        assert_eq!(records, before);
    }

    #[test]
    fn test_classify_boundaries() {
        let mtd = MetricField::MonthToDateSalesGrowth;
        assert_eq!(classify_cell(0.0, mtd), CellClass::Neutral);
        assert_eq!(classify_cell(1.0, mtd), CellClass::Neutral);
        assert_eq!(classify_cell(1.0001, mtd), CellClass::Positive);
        assert_eq!(classify_cell(-0.0001, mtd), CellClass::Negative);
        assert_eq!(classify_cell(0.5, mtd), CellClass::Neutral);
    }

    #[test]
    fn test_classify_ignores_other_fields() {
        assert_eq!(classify_cell(-5.0, MetricField::OverallSecondaryLakh), CellClass::Neutral);
        assert_eq!(classify_cell(50.0, MetricField::PerDoctorValue), CellClass::Neutral);
    }

    #[test]
    fn test_format_plain_fields() {
        assert_eq!(format_field(&CellValue::from(305u64), MetricField::TargetDoctorCount), "305");
        assert_eq!(format_field(&CellValue::from(9091.0), MetricField::PerDoctorValue), "9091");
        assert_eq!(format_field(&CellValue::from(12.5), MetricField::PerDoctorValue), "12.5");
    }

    #[test]
    fn test_format_rounded_fields() {
        assert_eq!(format_field(&CellValue::from(4.0), MetricField::OverallSecondaryLakh), "4.0");
        assert_eq!(
            format_field(&CellValue::from(-0.1), MetricField::MonthToDateSalesGrowth),
            "-0.1"
        );
        assert_eq!(format_field(&CellValue::from(2.46), MetricField::OverallSecondaryLakh), "2.5");
    }

    #[test]
    fn test_format_text_passes_through() {
        assert_eq!(
            format_field(&CellValue::from("n/a"), MetricField::MonthToDateSalesGrowth),
            "n/a"
        );
        assert_eq!(format_field(&CellValue::from("12"), MetricField::TargetDoctorCount), "12");
    }

    #[test]
    fn test_to_fixed_one_ties_and_signs() {
        assert_eq!(to_fixed_one(0.25), "0.3");
        assert_eq!(to_fixed_one(0.75), "0.8");
        assert_eq!(to_fixed_one(-0.25), "-0.3");
        assert_eq!(to_fixed_one(-0.0), "0.0");
        assert_eq!(to_fixed_one(-0.04), "-0.0");
        // 1.45 is stored just below the half
        assert_eq!(to_fixed_one(1.45), "1.4");
        assert_eq!(to_fixed_one(f64::NAN), "NaN");
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(0.1 + 0.2), 0.3);
        assert_eq!(round_to_tenth(4.1000000000000005), 4.1);
        assert_eq!(round_to_tenth(3.7), 3.7);
    }
}
