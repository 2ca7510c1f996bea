use insight_dom::{Buffer, CustomContent, Rect};
use insight_ui::chart::{BarChart, EMPTY_MESSAGE};
use insight_ui::{ChartPoint, Metric};

fn points() -> Vec<ChartPoint> {
    vec![
        ChartPoint {
            metric: Metric::ApprovedLabourBudget,
            value: 2000.0,
        },
        ChartPoint {
            metric: Metric::TotalExpenditure,
            value: 1000.0,
        },
    ]
}

fn draw(chart: &BarChart, area: Rect) -> Buffer {
    let mut buf = Buffer::new(area.right(), area.bottom());
    chart.render(area, &mut buf);
    buf
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_empty_chart_shows_message() {
    let chart = BarChart::new(vec![]);
    let buf = draw(&chart, Rect::from_size(60, 9));

    assert_eq!(buf.row_text(4).trim(), EMPTY_MESSAGE);
    assert_eq!(chart.bar_at(Rect::from_size(60, 9), 30, 4), None);
}

#[test]
fn test_cramped_chart_with_data_is_not_reported_empty() {
    let chart = BarChart::new(points());
    let area = Rect::from_size(60, 4);
    let buf = draw(&chart, area);

    assert!(!buf.to_text().contains(EMPTY_MESSAGE));
    assert_eq!(buf.to_text().trim(), "");
    assert_eq!(chart.bar_at(area, 30, 2), None);
}

#[test]
fn test_axis_ticks_and_labels() {
    let chart = BarChart::new(points());
    let buf = draw(&chart, Rect::from_size(40, 12));
    let text = buf.to_text();

    // Scale for a 2000 maximum: 0, 500, 1K, 1.5K, 2K
    assert!(text.contains("2K"));
    assert!(text.contains("1.5K"));
    assert!(text.contains('└'));
    // Value labels and wrapped category labels
    assert!(text.contains("Approved"));
    assert!(text.contains("Budget"));
    assert!(text.contains("Total"));
}

#[test]
fn test_taller_bar_for_larger_value() {
    let chart = BarChart::new(points());
    let area = Rect::from_size(40, 12);
    let buf = draw(&chart, area);

    let column_height = |x: u16| {
        (0..area.height)
            .filter(|&y| buf.get(x, y).is_some_and(|c| c.char == '█'))
            .count()
    };
    let heights: Vec<usize> = (0..40).map(column_height).filter(|&h| h > 0).collect();
    let tallest = heights.iter().copied().max().unwrap_or(0);

    assert_eq!(tallest, 8);
    assert!(heights.contains(&4));
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_bar_at_maps_columns_to_bars() {
    let chart = BarChart::new(points());
    let area = Rect::new(10, 5, 40, 12);

    // Left of the plot (axis labels) is not a bar.
    assert_eq!(chart.bar_at(area, 10, 8), None);

    let hits: Vec<Option<usize>> = (10..50).map(|x| chart.bar_at(area, x, 10)).collect();
    assert!(hits.contains(&Some(0)));
    assert!(hits.contains(&Some(1)));
    assert!(!hits.contains(&Some(2)));

    // Above the chart area
    assert_eq!(chart.bar_at(area, 30, 5), None);
}

#[test]
fn test_intrinsic_size_grows_with_points() {
    let few = BarChart::new(points()).height(10);
    assert_eq!(few.intrinsic_size().1, 10);
    assert!(few.intrinsic_size().0 > 0);
}
