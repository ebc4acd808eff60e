use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing curves used by the room's animations.
///
/// The curves match the tween library conventions the room was authored
/// against: `power2.inOut`, `back.out(s)`, `back.in(s)` and
/// `elastic.out(amplitude, period)`. Every curve maps `0 -> 0` and `1 -> 1`;
/// back and elastic curves overshoot in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    Power2InOut,
    BackOut(f32),
    BackIn(f32),
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Evaluate the curve at normalized time `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::BackIn(overshoot) => t * t * ((overshoot + 1.0) * t - overshoot),
            Easing::ElasticOut { amplitude, period } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let a = amplitude.max(1.0);
                let p = period / amplitude.min(1.0);
                let shift = p / (2.0 * PI) * (1.0 / a).asin();
                let omega = 2.0 * PI / p;
                a * 2f32.powf(-10.0 * t) * ((t - shift) * omega).sin() + 1.0
            }
        }
    }

    /// True for curves whose output never leaves `[0, 1]`.
    pub fn is_bounded(self) -> bool {
        matches!(self, Easing::Linear | Easing::Power2InOut)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power2InOut
    }
}
