//! Headless rendering: one frame of the summary modal, as text.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use insight_dom::{Buffer, Rect, layout, render_to_buffer};
use insight_ui::{Narrator, SilentEngine, SummaryData};
use log::info;

use crate::app::{App, Options};
use crate::error::AppError;

/// Frame size given as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u16,
    pub height: u16,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 100,
            height: 36,
        }
    }
}

impl FromStr for FrameSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AppError::BadSize(s.to_string());
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(bad)?;
        let width: u16 = w.trim().parse().map_err(|_| bad())?;
        let height: u16 = h.trim().parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self { width, height })
    }
}

/// Render the dashboard with the summary for `index` open. No terminal, no
/// document listener, no speech.
pub fn render(
    districts: Vec<SummaryData>,
    index: usize,
    size: FrameSize,
    lang: insight_ui::Lang,
) -> Result<String, AppError> {
    if index >= districts.len() {
        return Err(AppError::SnapshotIndex {
            index,
            count: districts.len(),
        });
    }

    let options = Options {
        lang,
        reduced_motion: true,
    };
    let narrator = Narrator::new(Arc::new(SilentEngine));
    let (mut app, _messages) = App::new(districts, narrator, options, None);

    let now = Instant::now();
    app.open_summary(index, now);
    app.tick(now);

    let screen = Rect::from_size(size.width, size.height);
    let root = app.element(screen, now);
    let result = layout(&root, screen);
    let mut buf = Buffer::new(size.width, size.height);
    render_to_buffer(&root, &result, &mut buf);

    info!("Rendered snapshot of district {} at {}x{}", index, size.width, size.height);
    Ok(buf.to_text())
}

#[cfg(test)]
mod tests {
    use insight_ui::Lang;

    use super::*;

    fn districts() -> Vec<SummaryData> {
        vec![SummaryData {
            name: "Kamrup".into(),
            state: "Assam".into(),
            year: "2024-2025".into(),
            month: Some("June".into()),
            approved_labour_budget: Some(1_250_000.0),
            total_expenditure: Some(987_654.5),
            ..Default::default()
        }]
    }

    #[test]
    fn test_frame_size_parsing() {
        assert_eq!(
            "120x40".parse::<FrameSize>().unwrap(),
            FrameSize {
                width: 120,
                height: 40
            }
        );
        assert!("120".parse::<FrameSize>().is_err());
        assert!("0x40".parse::<FrameSize>().is_err());
        assert!(matches!(
            "wide x tall".parse::<FrameSize>(),
            Err(AppError::BadSize(_))
        ));
    }

    #[test]
    fn test_snapshot_shows_modal() {
        let text = render(districts(), 0, FrameSize::default(), Lang::En).unwrap();

        assert!(text.contains("Kamrup, Assam"));
        assert!(text.contains("Year: 2024-2025 | Month: June"));
        assert!(text.contains("Listen Summary"));
        assert!(text.contains("Close"));
        assert!(text.contains('╭'));
    }

    #[test]
    fn test_snapshot_index_out_of_range() {
        let err = render(districts(), 3, FrameSize::default(), Lang::En).unwrap_err();
        assert!(matches!(err, AppError::SnapshotIndex { index: 3, count: 1 }));
    }
}
