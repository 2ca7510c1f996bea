//! District summary record and everything derived from it.

pub mod format;
mod metrics;
mod narration;

use serde::{Deserialize, Serialize};

pub use metrics::{chart_data, ChartPoint, Metric};
pub use narration::narration;

/// One district's figures for a reporting period. Every figure is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub name: String,
    pub state: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default)]
    pub approved_labour_budget: Option<f64>,
    #[serde(default)]
    pub total_expenditure: Option<f64>,
    #[serde(default)]
    pub average_wage_rate: Option<f64>,
    #[serde(default)]
    pub total_households_worked: Option<f64>,
    #[serde(default)]
    pub total_individuals_worked: Option<f64>,
    #[serde(default)]
    pub women_persondays: Option<f64>,
    #[serde(default)]
    pub sc_persondays: Option<f64>,
    #[serde(default)]
    pub st_persondays: Option<f64>,
}

impl SummaryData {
    /// "Name, State" heading.
    pub fn heading(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }

    /// Reporting period line. A missing or empty month shows as a dash.
    pub fn period(&self) -> String {
        let month = self.month.as_deref().filter(|m| !m.is_empty()).unwrap_or("—");
        format!("Year: {} | Month: {}", self.year, month)
    }
}
