/// Number of intervals between y-axis ticks.
pub const TICK_INTERVALS: usize = 4;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Y-axis scale with evenly spaced, round tick values starting at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl Scale {
    /// Smallest round scale whose top tick is at least `max`.
    pub fn for_max(max: f64) -> Self {
        let step = nice_step(max / TICK_INTERVALS as f64);
        let ticks = (0..=TICK_INTERVALS).map(|i| step * i as f64).collect();
        Self { step, ticks }
    }

    pub fn top(&self) -> f64 {
        self.step * TICK_INTERVALS as f64
    }

    /// Fraction of the axis height covered by `value`, clamped to 0..=1.
    pub fn fraction(&self, value: f64) -> f64 {
        let top = self.top();
        if top <= 0.0 {
            return 0.0;
        }
        (value / top).clamp(0.0, 1.0)
    }
}

/// Round `raw` up to 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = NICE_STEPS
        .iter()
        .copied()
        .find(|&s| s >= normalized - 1e-9)
        .unwrap_or(10.0);
    factor * magnitude
}
