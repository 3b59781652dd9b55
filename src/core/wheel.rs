use crate::core::rng::RandomSource;
use serde::Serialize;
use std::f64::consts::TAU;

/// Animation tuning for a spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTuning {
    pub min_extra_turns: u32,
    pub max_extra_turns: u32,
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
}

impl Default for WheelTuning {
    fn default() -> Self {
        Self {
            min_extra_turns: 4,
            max_extra_turns: 6,
            min_duration_ms: 3200,
            max_duration_ms: 4000,
        }
    }
}

/// Where the wheel starts, where it stops and how long it takes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpinPlan {
    #[serde(rename = "startAngle")]
    pub start_angle: f64,
    #[serde(rename = "finalAngle")]
    pub final_angle: f64,
    #[serde(rename = "extraTurns")]
    pub extra_turns: u32,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl SpinPlan {
    /// Wheel angle `elapsed_ms` into the spin
    pub fn angle_at(&self, elapsed_ms: u64) -> f64 {
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
        };
        self.start_angle + (self.final_angle - self.start_angle) * ease_out_quart(t)
    }

    /// Angle the wheel rests at once the spin is over
    pub fn resting_angle(&self) -> f64 {
        self.final_angle.rem_euclid(TAU)
    }
}

/// Ease-out quartic on `t` in `[0, 1]`
#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Angle that puts the pointer over the middle of `sector`
pub fn target_angle(sector: usize, sectors: usize) -> f64 {
    let slice = TAU / sectors.max(1) as f64;
    TAU - (sector as f64 * slice + slice / 2.0)
}

/// Plan the animation for a spin that lands on `sector`
pub fn plan_spin<R: RandomSource + ?Sized>(
    sector: usize,
    sectors: usize,
    start_angle: f64,
    tuning: &WheelTuning,
    rng: &mut R,
) -> SpinPlan {
    let turn_span = tuning.max_extra_turns.saturating_sub(tuning.min_extra_turns) as usize + 1;
    let extra_turns = tuning.min_extra_turns + rng.next_index(turn_span) as u32;

    let duration_span = tuning.max_duration_ms.saturating_sub(tuning.min_duration_ms) as f64;
    let duration_ms = tuning.min_duration_ms + (rng.next_unit() * duration_span) as u64;

    SpinPlan {
        start_angle,
        final_angle: target_angle(sector, sectors) + extra_turns as f64 * TAU,
        extra_turns,
        duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRandom;

    #[test]
    fn test_target_angle_points_at_sector_middle() {
        // 4 sectors of 90 degrees: sector 0 spans [0, 90), middle at 45
        let angle = target_angle(0, 4);
        assert!((angle - (TAU - TAU / 8.0)).abs() < 1e-12);

        let angle = target_angle(3, 4);
        assert!((angle - TAU / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.5);
    }

    #[test]
    fn test_plan_reaches_final_angle() {
        let mut rng = ScriptedRandom::new(vec![2], vec![0.5]);
        let plan = plan_spin(1, 4, 0.3, &WheelTuning::default(), &mut rng);

        assert_eq!(plan.extra_turns, 6);
        assert_eq!(plan.duration_ms, 3600);
        assert_eq!(plan.angle_at(0), 0.3);
        assert!((plan.angle_at(plan.duration_ms) - plan.final_angle).abs() < 1e-9);
        assert!((plan.angle_at(plan.duration_ms * 2) - plan.final_angle).abs() < 1e-9);
        assert!((plan.resting_angle() - target_angle(1, 4)).abs() < 1e-9);
    }

    #[test]
    fn test_plan_uses_minimums() {
        let mut rng = ScriptedRandom::first();
        let plan = plan_spin(0, 12, 0.0, &WheelTuning::default(), &mut rng);
        assert_eq!(plan.extra_turns, 4);
        assert_eq!(plan.duration_ms, 3200);
    }
}
