use serde::{Deserialize, Serialize};
use std::fmt;

pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// One row of a sales sheet: a single manager's numbers.
///
/// Missing or `null` columns deserialize as zero (or an empty name) so one
/// malformed row does not blank the whole sheet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SalesRecord {
    #[serde(rename = "RM", default, deserialize_with = "super::null_default")]
    pub manager_name: String,
    #[serde(rename = "NoOfTGTDr", default, deserialize_with = "super::null_default")]
    pub target_doctor_count: u64,
    #[serde(rename = "NoOfCRMDr", default, deserialize_with = "super::null_default")]
    pub engaged_doctor_count: u64,
    #[serde(rename = "OverallSecL", default, deserialize_with = "super::null_default")]
    pub overall_secondary_lakh: f64,
    #[serde(rename = "CRMDrSecL", default, deserialize_with = "super::null_default")]
    pub engaged_doctor_secondary_lakh: f64,
    #[serde(rename = "PD", default, deserialize_with = "super::null_default")]
    pub per_doctor_value: f64,
    #[serde(rename = "MTDSales", default, deserialize_with = "super::null_default")]
    pub month_to_date_sales_growth: f64,
}

/// The synthetic Grand Total row. Same shape as a record, never persisted.
pub type AggregateRecord = SalesRecord;

impl SalesRecord {
    pub fn value(&self, field: MetricField) -> f64 {
        match field {
            MetricField::TargetDoctorCount => self.target_doctor_count as f64,
            MetricField::EngagedDoctorCount => self.engaged_doctor_count as f64,
            MetricField::OverallSecondaryLakh => self.overall_secondary_lakh,
            MetricField::EngagedDoctorSecondaryLakh => self.engaged_doctor_secondary_lakh,
            MetricField::PerDoctorValue => self.per_doctor_value,
            MetricField::MonthToDateSalesGrowth => self.month_to_date_sales_growth,
        }
    }

    pub fn is_grand_total(&self) -> bool {
        self.manager_name == GRAND_TOTAL_LABEL
    }
}

/// The numeric columns of a sales sheet, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    TargetDoctorCount,
    EngagedDoctorCount,
    OverallSecondaryLakh,
    EngagedDoctorSecondaryLakh,
    PerDoctorValue,
    MonthToDateSalesGrowth,
}

impl MetricField {
    pub const ALL: [MetricField; 6] = [
        MetricField::TargetDoctorCount,
        MetricField::EngagedDoctorCount,
        MetricField::OverallSecondaryLakh,
        MetricField::EngagedDoctorSecondaryLakh,
        MetricField::PerDoctorValue,
        MetricField::MonthToDateSalesGrowth,
    ];

    /// Fields rounded to one decimal in the aggregate and always shown with one decimal.
    pub fn is_rounded(self) -> bool {
        matches!(
            self,
            MetricField::OverallSecondaryLakh
                | MetricField::EngagedDoctorSecondaryLakh
                | MetricField::MonthToDateSalesGrowth
        )
    }

    pub fn header(self) -> &'static str {
        match self {
            MetricField::TargetDoctorCount => "No of TGT Dr",
            MetricField::EngagedDoctorCount => "No of CRM Dr",
            MetricField::OverallSecondaryLakh => "Overall Sec(L)",
            MetricField::EngagedDoctorSecondaryLakh => "CRM Dr Sec (L)",
            MetricField::PerDoctorValue => "P/D",
            MetricField::MonthToDateSalesGrowth => "MTD Sales",
        }
    }

    /// Column name used by the backend's sheet rows.
    pub fn key(self) -> &'static str {
        match self {
            MetricField::TargetDoctorCount => "NoOfTGTDr",
            MetricField::EngagedDoctorCount => "NoOfCRMDr",
            MetricField::OverallSecondaryLakh => "OverallSecL",
            MetricField::EngagedDoctorSecondaryLakh => "CRMDrSecL",
            MetricField::PerDoctorValue => "PD",
            MetricField::MonthToDateSalesGrowth => "MTDSales",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A cell value handed to the formatter. Text is passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}
