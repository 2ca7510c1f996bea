//! Time-based motion curves.
//!
//! A [`Motion`] maps elapsed time to progress, 0.0 at the start and 1.0 at
//! rest. Tweens finish exactly at their duration; springs are simulated in
//! closed form and may overshoot before settling.

use std::time::Duration;

/// Displacement below which a spring counts as settled (fraction of travel).
const SPRING_REST_DELTA: f32 = 0.005;

/// Easing function for tweens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Tween { duration: Duration, easing: Easing },
    Spring { stiffness: f32, damping: f32, mass: f32 },
}

impl Motion {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self::Tween { duration, easing }
    }

    pub fn spring(stiffness: f32, damping: f32) -> Self {
        Self::Spring {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Progress after `elapsed`. 0.0 at the start, 1.0 at rest.
    pub fn sample(&self, elapsed: Duration) -> f32 {
        match *self {
            Motion::Tween { duration, easing } => {
                if duration.is_zero() {
                    return 1.0;
                }
                let t = (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0);
                easing.apply(t)
            }
            Motion::Spring { .. } => {
                if self.is_settled(elapsed) {
                    1.0
                } else {
                    1.0 - self.spring_displacement(elapsed.as_secs_f32())
                }
            }
        }
    }

    pub fn is_settled(&self, elapsed: Duration) -> bool {
        match *self {
            Motion::Tween { duration, .. } => elapsed >= duration,
            Motion::Spring { .. } => {
                let t = elapsed.as_secs_f32();
                let (omega, zeta) = self.spring_params();
                if zeta < 1.0 {
                    let decay = zeta * omega;
                    let damped = omega * (1.0 - zeta * zeta).sqrt();
                    let amplitude = (1.0 + (decay / damped).powi(2)).sqrt();
                    amplitude * (-decay * t).exp() < SPRING_REST_DELTA
                } else {
                    t > 0.0 && self.spring_displacement(t).abs() < SPRING_REST_DELTA
                }
            }
        }
    }

    /// (natural frequency, damping ratio)
    fn spring_params(&self) -> (f32, f32) {
        match *self {
            Motion::Spring {
                stiffness,
                damping,
                mass,
            } => {
                let mass = mass.max(f32::EPSILON);
                let stiffness = stiffness.max(f32::EPSILON);
                let omega = (stiffness / mass).sqrt();
                let zeta = damping / (2.0 * (stiffness * mass).sqrt());
                (omega, zeta)
            }
            Motion::Tween { .. } => (0.0, 1.0),
        }
    }

    /// Remaining displacement (1.0 at t = 0, released from rest).
    fn spring_displacement(&self, t: f32) -> f32 {
        let (omega, zeta) = self.spring_params();
        if zeta < 1.0 {
            let decay = zeta * omega;
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            (-decay * t).exp() * ((damped * t).cos() + (decay / damped) * (damped * t).sin())
        } else if (zeta - 1.0).abs() < f32::EPSILON {
            (-omega * t).exp() * (1.0 + omega * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }
}
