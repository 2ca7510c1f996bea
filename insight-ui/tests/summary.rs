use insight_ui::summary::format::{compact, group_thousands, tooltip_value};
use insight_ui::{chart_data, narration, Metric, SummaryData};

fn kamrup() -> SummaryData {
    SummaryData {
        name: "Kamrup".into(),
        state: "Assam".into(),
        year: "2024-2025".into(),
        month: Some("June".into()),
        approved_labour_budget: Some(1_250_000.0),
        total_expenditure: Some(987_654.5),
        average_wage_rate: Some(249.5),
        total_households_worked: Some(15_230.0),
        total_individuals_worked: Some(21_004.0),
        women_persondays: Some(410_000.0),
        sc_persondays: Some(52_000.0),
        st_persondays: Some(73_500.0),
    }
}

// ============================================================================
// Chart Data
// ============================================================================

#[test]
fn test_chart_data_keeps_all_positive_values_in_order() {
    let points = chart_data(&kamrup());
    let metrics: Vec<Metric> = points.iter().map(|p| p.metric).collect();
    assert_eq!(metrics, Metric::ALL.to_vec());
    assert_eq!(points[0].label(), "Approved Budget");
    assert_eq!(points[0].value, 1_250_000.0);
}

#[test]
fn test_chart_data_drops_missing_zero_negative_and_nan() {
    let summary = SummaryData {
        approved_labour_budget: None,
        total_expenditure: Some(0.0),
        average_wage_rate: Some(-5.0),
        total_households_worked: Some(f64::NAN),
        total_individuals_worked: Some(f64::INFINITY),
        women_persondays: Some(12.0),
        sc_persondays: None,
        st_persondays: Some(3.0),
        ..kamrup()
    };

    let points = chart_data(&summary);
    let labels: Vec<&str> = points.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["Women Persondays", "ST Persondays"]);
}

#[test]
fn test_chart_data_empty_when_no_figures() {
    let summary = SummaryData {
        name: "Majuli".into(),
        state: "Assam".into(),
        year: "2024-2025".into(),
        ..Default::default()
    };
    assert!(chart_data(&summary).is_empty());
}

#[test]
fn test_metric_colours() {
    assert_eq!(
        Metric::ApprovedLabourBudget.color(),
        insight_dom::Color::hex("#6EE7B7").unwrap()
    );
    assert_eq!(
        Metric::StPersondays.color(),
        insight_dom::Color::hex("#4ADE80").unwrap()
    );
}

// ============================================================================
// Narration
// ============================================================================

#[test]
fn test_narration_full_record() {
    assert_eq!(
        narration(&kamrup()),
        "Kamrup district of Assam, year 2024-2025. \
         Approved labour budget rupees 1,250,000, \
         total expenditure rupees 987,654.5. \
         15,230 households and 21,004 individuals worked. \
         Women persondays 410,000, SC 52,000, ST 73,500. \
         Average wage rupees 249.5 per day."
    );
}

#[test]
fn test_narration_missing_figures_read_as_zero() {
    let summary = SummaryData {
        name: "Majuli".into(),
        state: "Assam".into(),
        year: "2023-2024".into(),
        average_wage_rate: Some(250.0),
        ..Default::default()
    };
    let text = narration(&summary);
    assert!(text.contains("Approved labour budget rupees 0,"));
    assert!(text.contains("0 households and 0 individuals worked."));
    assert!(text.contains("Women persondays 0, SC 0, ST 0."));
    assert!(text.ends_with("Average wage rupees 250 per day."));
}

#[test]
fn test_narration_wage_is_not_grouped() {
    let summary = SummaryData {
        average_wage_rate: Some(1234.5),
        ..kamrup()
    };
    assert!(narration(&summary).contains("Average wage rupees 1234.5 per day."));
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_tooltip_currency_prefix() {
    assert_eq!(
        tooltip_value(Metric::ApprovedLabourBudget, 1_250_000.0),
        "₹1,250,000"
    );
    assert_eq!(tooltip_value(Metric::TotalExpenditure, 99.5), "₹99.5");
    assert_eq!(tooltip_value(Metric::WomenPersondays, 410_000.0), "410,000");
}

#[test]
fn test_group_and_compact() {
    assert_eq!(group_thousands(21_004.0), "21,004");
    assert_eq!(group_thousands(1.23456), "1.235");
    assert_eq!(compact(410_000.0), "410K");
    assert_eq!(compact(1_250_000.0), "1.3M");
}

// ============================================================================
// Heading and Serde
// ============================================================================

#[test]
fn test_heading_and_period() {
    let summary = kamrup();
    assert_eq!(summary.heading(), "Kamrup, Assam");
    assert_eq!(summary.period(), "Year: 2024-2025 | Month: June");

    let no_month = SummaryData {
        month: None,
        ..kamrup()
    };
    assert_eq!(no_month.period(), "Year: 2024-2025 | Month: —");

    let empty_month = SummaryData {
        month: Some(String::new()),
        ..kamrup()
    };
    assert_eq!(empty_month.period(), "Year: 2024-2025 | Month: —");
}

#[test]
fn test_deserialize_camel_case_with_missing_fields() {
    let json = r#"{
        "name": "Barpeta",
        "state": "Assam",
        "year": "2024-2025",
        "approvedLabourBudget": 800000,
        "womenPersondays": 125000.5
    }"#;
    let summary: SummaryData = serde_json::from_str(json).unwrap();

    assert_eq!(summary.name, "Barpeta");
    assert_eq!(summary.month, None);
    assert_eq!(summary.approved_labour_budget, Some(800_000.0));
    assert_eq!(summary.women_persondays, Some(125_000.5));
    assert_eq!(summary.total_expenditure, None);
}
