use insight_dom::Color;

use super::SummaryData;

/// The charted figures of a summary, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    ApprovedLabourBudget,
    TotalExpenditure,
    AverageWageRate,
    TotalHouseholdsWorked,
    TotalIndividualsWorked,
    WomenPersondays,
    ScPersondays,
    StPersondays,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::ApprovedLabourBudget,
        Metric::TotalExpenditure,
        Metric::AverageWageRate,
        Metric::TotalHouseholdsWorked,
        Metric::TotalIndividualsWorked,
        Metric::WomenPersondays,
        Metric::ScPersondays,
        Metric::StPersondays,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::ApprovedLabourBudget => "Approved Budget",
            Metric::TotalExpenditure => "Total Expenditure",
            Metric::AverageWageRate => "Avg Wage Rate",
            Metric::TotalHouseholdsWorked => "Households Worked",
            Metric::TotalIndividualsWorked => "Individuals Worked",
            Metric::WomenPersondays => "Women Persondays",
            Metric::ScPersondays => "SC Persondays",
            Metric::StPersondays => "ST Persondays",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Metric::ApprovedLabourBudget => Color::rgb(0x6E, 0xE7, 0xB7),
            Metric::TotalExpenditure => Color::rgb(0x34, 0xD3, 0x99),
            Metric::AverageWageRate => Color::rgb(0xFC, 0xD3, 0x4D),
            Metric::TotalHouseholdsWorked => Color::rgb(0xFD, 0xBA, 0x74),
            Metric::TotalIndividualsWorked => Color::rgb(0xFB, 0x92, 0x3C),
            Metric::WomenPersondays => Color::rgb(0xF8, 0x71, 0x71),
            Metric::ScPersondays => Color::rgb(0x60, 0xA5, 0xFA),
            Metric::StPersondays => Color::rgb(0x4A, 0xDE, 0x80),
        }
    }

    /// Money figures, shown with a rupee sign.
    pub fn is_currency(self) -> bool {
        matches!(self, Metric::ApprovedLabourBudget | Metric::TotalExpenditure)
    }

    pub fn value(self, summary: &SummaryData) -> Option<f64> {
        match self {
            Metric::ApprovedLabourBudget => summary.approved_labour_budget,
            Metric::TotalExpenditure => summary.total_expenditure,
            Metric::AverageWageRate => summary.average_wage_rate,
            Metric::TotalHouseholdsWorked => summary.total_households_worked,
            Metric::TotalIndividualsWorked => summary.total_individuals_worked,
            Metric::WomenPersondays => summary.women_persondays,
            Metric::ScPersondays => summary.sc_persondays,
            Metric::StPersondays => summary.st_persondays,
        }
    }
}

/// One bar of the summary chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub metric: Metric,
    pub value: f64,
}

impl ChartPoint {
    pub fn label(&self) -> &'static str {
        self.metric.label()
    }

    pub fn color(&self) -> Color {
        self.metric.color()
    }
}

/// Chartable figures in display order. Missing, zero, negative and
/// non-finite values are left out.
pub fn chart_data(summary: &SummaryData) -> Vec<ChartPoint> {
    Metric::ALL
        .iter()
        .filter_map(|&metric| {
            let value = metric.value(summary)?;
            (value.is_finite() && value > 0.0).then_some(ChartPoint { metric, value })
        })
        .collect()
}
