//! Terminal bar chart for summary figures.

mod render;
pub mod scale;

use insight_dom::{Buffer, CustomContent, Rect};

use crate::summary::ChartPoint;

pub use scale::Scale;

pub const EMPTY_MESSAGE: &str = "No data available for this district.";

/// Rows below the baseline used for category labels.
const LABEL_ROWS: u16 = 2;

/// Vertical bar chart: a y-axis with round ticks, one coloured bar per
/// point with its value on top, and category labels underneath.
#[derive(Debug, Clone)]
pub struct BarChart {
    points: Vec<ChartPoint>,
    height: u16,
}

/// Where everything goes inside a given area.
#[derive(Debug, Clone)]
pub(crate) struct Geometry {
    pub scale: Scale,
    /// Width of the tick label column, axis line excluded.
    pub axis_width: u16,
    /// First column right of the axis line.
    pub plot_x: u16,
    pub plot_width: u16,
    /// Topmost row bars may reach.
    pub plot_top: u16,
    /// Row holding the x-axis line.
    pub baseline: u16,
    pub slot_width: u16,
    pub bar_width: u16,
}

impl Geometry {
    pub fn plot_height(&self) -> u16 {
        self.baseline.saturating_sub(self.plot_top)
    }

    pub fn slot_x(&self, index: usize) -> u16 {
        self.plot_x + self.slot_width * index as u16
    }

    pub fn bar_x(&self, index: usize) -> u16 {
        self.slot_x(index) + (self.slot_width - self.bar_width) / 2
    }
}

impl BarChart {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self { points, height: 14 }
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the bar whose column contains (x, y), for hover tooltips.
    pub fn bar_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let geo = self.geometry(area)?;
        if y < geo.plot_top || y > geo.baseline + LABEL_ROWS || x < geo.plot_x {
            return None;
        }
        let index = ((x - geo.plot_x) / geo.slot_width) as usize;
        (index < self.points.len()).then_some(index)
    }

    pub(crate) fn geometry(&self, area: Rect) -> Option<Geometry> {
        if self.points.is_empty() {
            return None;
        }
        let max = self.points.iter().map(|p| p.value).fold(0.0, f64::max);
        let scale = Scale::for_max(max);

        let axis_width = scale
            .ticks
            .iter()
            .map(|&t| crate::summary::format::compact(t).len() as u16)
            .max()
            .unwrap_or(1);
        let plot_x = area.x + axis_width + 1;
        let plot_width = area.right().saturating_sub(plot_x);
        let slot_width = plot_width / self.points.len() as u16;
        // Room for the value row above the tallest bar, the baseline and labels.
        if slot_width == 0 || area.height < LABEL_ROWS + 3 {
            return None;
        }
        let bar_width = (slot_width * 3 / 5).max(1);

        Some(Geometry {
            scale,
            axis_width,
            plot_x,
            plot_width,
            plot_top: area.y + 1,
            baseline: area.bottom() - 1 - LABEL_ROWS,
            slot_width,
            bar_width,
        })
    }
}

impl CustomContent for BarChart {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.points.is_empty() {
            render::empty(area, buf);
        } else if let Some(geo) = self.geometry(area) {
            render::chart(self, &geo, area, buf);
        }
        // Otherwise there is data but no room to draw it.
    }

    fn intrinsic_size(&self) -> (u16, u16) {
        let width = 8 + 12 * self.points.len().max(4) as u16;
        (width, self.height)
    }
}
