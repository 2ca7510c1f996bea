use super::format::group_thousands;
use super::SummaryData;

/// Spoken readout of a summary. Missing figures read as zero.
pub fn narration(summary: &SummaryData) -> String {
    let grouped = |value: Option<f64>| value.map_or_else(|| "0".to_string(), group_thousands);
    let wage = summary
        .average_wage_rate
        .map_or_else(|| "0".to_string(), |w| w.to_string());

    format!(
        "{name} district of {state}, year {year}. \
         Approved labour budget rupees {budget}, \
         total expenditure rupees {expenditure}. \
         {households} households and {individuals} individuals worked. \
         Women persondays {women}, SC {sc}, ST {st}. \
         Average wage rupees {wage} per day.",
        name = summary.name,
        state = summary.state,
        year = summary.year,
        budget = grouped(summary.approved_labour_budget),
        expenditure = grouped(summary.total_expenditure),
        households = grouped(summary.total_households_worked),
        individuals = grouped(summary.total_individuals_worked),
        women = grouped(summary.women_persondays),
        sc = grouped(summary.sc_persondays),
        st = grouped(summary.st_persondays),
        wage = wage,
    )
}
