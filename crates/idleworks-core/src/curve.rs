//! Purchase curves: production, cost, duration, payback and ROI per level
//!
//! All functions here are pure. Parameters are checked once by
//! [`CurveParams::validated`] so the curves can divide by durations and
//! raise multipliers to powers without further guards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Breakpoints of the designed payback curve
///
/// Flat early game, a linear decrease through two mid-game segments,
/// then slow logarithmic growth past `late_level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaybackCurve {
    /// Last level of the flat early segment
    pub early_level: u32,
    /// Last level of the first interpolated segment
    pub mid_level: u32,
    /// Last level of the second interpolated segment
    pub late_level: u32,
    /// Target payback (seconds) up to `early_level`
    pub early_target: f64,
    /// Target payback reached at `mid_level`
    pub mid_target: f64,
    /// Target payback reached at `late_level`
    pub late_target: f64,
    /// Payback never reported below this up to `early_level`
    pub early_floor: f64,
}

impl Default for PaybackCurve {
    fn default() -> Self {
        Self {
            early_level: 10,
            mid_level: 50,
            late_level: 150,
            early_target: 30.0,
            mid_target: 10.0,
            late_target: 3.0,
            early_floor: 15.0,
        }
    }
}

impl PaybackCurve {
    /// Target payback time in seconds for a level
    pub fn target(&self, level: u32) -> f64 {
        let l = level as f64;
        if level <= self.early_level {
            return self.early_target;
        }
        if level <= self.mid_level {
            let t = (l - self.early_level as f64) / (self.mid_level - self.early_level) as f64;
            return lerp(self.early_target, self.mid_target, t);
        }
        if level <= self.late_level {
            let t = (l - self.mid_level as f64) / (self.late_level - self.mid_level) as f64;
            return lerp(self.mid_target, self.late_target, t);
        }
        self.late_target + (l - (self.late_level as f64 - 1.0)).log10()
    }

    fn validated(self) -> Result<Self> {
        if !(self.early_level < self.mid_level && self.mid_level < self.late_level) {
            return Err(Error::invalid_config(
                "payback",
                format!(
                    "breakpoints must increase, got {} / {} / {}",
                    self.early_level, self.mid_level, self.late_level
                ),
            ));
        }
        for (field, value) in [
            ("payback.early_target", self.early_target),
            ("payback.mid_target", self.mid_target),
            ("payback.late_target", self.late_target),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_config(
                    field,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }
        let early_floor = require_non_negative("payback.early_floor", self.early_floor)?;
        Ok(Self {
            early_floor,
            ..self
        })
    }
}

/// Numeric parameters of an upgradeable action's curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParams {
    /// Production per cycle at level 1
    pub base_production: f64,
    /// Production growth per level
    pub production_multiplier: f64,
    /// Cost growth per level
    pub cost_multiplier: f64,
    /// Cycle duration (seconds) at level 1
    pub base_duration: f64,
    /// Cycle duration never drops below this
    pub min_duration: f64,
    /// Duration shrinks once every this many levels
    pub duration_step_levels: u32,
    /// Duration multiplier applied per step
    pub duration_decay_per_step: f64,
    /// Payback time never reported below this
    pub min_payback_time: f64,
    /// Growth of payback time past the late-game breakpoint
    pub endgame_payback_factor: f64,
    /// Designed target payback curve
    pub payback: PaybackCurve,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            base_production: 1.0,
            production_multiplier: 1.2,
            cost_multiplier: 1.15,
            base_duration: 1.0,
            min_duration: 0.1,
            duration_step_levels: 10,
            duration_decay_per_step: 0.95,
            min_payback_time: 0.5,
            endgame_payback_factor: 0.1,
            payback: PaybackCurve::default(),
        }
    }
}

impl CurveParams {
    /// Check parameter ranges
    ///
    /// Zero, negative or non-finite values the curves would divide by or
    /// exponentiate are rejected. Values inside the valid domain but below
    /// their documented floor are raised to it.
    pub fn validated(self) -> Result<Self> {
        let base_production = require_positive("base_production", self.base_production)?;
        let production_multiplier = floor_at(
            "production_multiplier",
            require_positive("production_multiplier", self.production_multiplier)?,
            1.0,
        );
        let cost_multiplier = floor_at(
            "cost_multiplier",
            require_positive("cost_multiplier", self.cost_multiplier)?,
            1.0,
        );
        let base_duration = floor_at(
            "base_duration",
            require_positive("base_duration", self.base_duration)?,
            0.1,
        );
        let min_duration = floor_at(
            "min_duration",
            require_positive("min_duration", self.min_duration)?,
            0.01,
        );
        if self.duration_step_levels == 0 {
            return Err(Error::invalid_config(
                "duration_step_levels",
                "must be at least 1",
            ));
        }
        let decay = require_positive("duration_decay_per_step", self.duration_decay_per_step)?;
        let duration_decay_per_step = clamp_to("duration_decay_per_step", decay, 0.5, 1.0);
        let min_payback_time = floor_at(
            "min_payback_time",
            require_non_negative("min_payback_time", self.min_payback_time)?,
            0.1,
        );
        let endgame = require_finite("endgame_payback_factor", self.endgame_payback_factor)?;
        let endgame_payback_factor = clamp_to("endgame_payback_factor", endgame, 0.0, 0.5);

        Ok(Self {
            base_production,
            production_multiplier,
            cost_multiplier,
            base_duration,
            min_duration,
            duration_step_levels: self.duration_step_levels,
            duration_decay_per_step,
            min_payback_time,
            endgame_payback_factor,
            payback: self.payback.validated()?,
        })
    }

    /// Production per cycle: `base × multiplier^(level-1)`
    pub fn production_for_level(&self, level: u32) -> f64 {
        self.base_production * self.production_multiplier.powf(level as f64 - 1.0)
    }

    /// Cycle duration, shrinking every `duration_step_levels` levels and
    /// floored at `min_duration`
    pub fn duration_for_level(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) / self.duration_step_levels;
        let duration = self.base_duration * self.duration_decay_per_step.powf(steps as f64);
        duration.max(self.min_duration)
    }

    /// Designed payback time for a level
    pub fn target_payback(&self, level: u32) -> f64 {
        self.payback.target(level)
    }

    /// Cost of a level for one resource
    ///
    /// Derived back from the target payback: the raw exponential cost is
    /// turned into a per-second rate over the cycle duration and scaled by
    /// the designed payback time.
    pub fn cost_for_level(&self, base_cost: f64, level: u32) -> f64 {
        let raw = base_cost * self.cost_multiplier.powf(level as f64);
        let per_second = raw / self.duration_for_level(level);
        per_second * self.target_payback(level)
    }

    /// Seconds of production needed to earn back `cost`
    pub fn payback_time(&self, cost: f64, production: f64, duration: f64, level: u32) -> f64 {
        let per_second = production / duration;
        let base = cost / per_second;

        if level <= self.payback.early_level {
            return base
                .max(self.payback.early_floor)
                .max(self.min_payback_time);
        }

        let mut payback = base;
        if level > self.payback.late_level {
            let ratio = level as f64 / self.payback.late_level as f64;
            payback *= 1.0 + self.endgame_payback_factor * ratio.log10();
        }
        payback.max(self.min_payback_time)
    }

    /// Payback time of a level for one resource's base cost
    pub fn payback_for_level(&self, base_cost: f64, level: u32) -> f64 {
        self.payback_time(
            self.cost_for_level(base_cost, level),
            self.production_for_level(level),
            self.duration_for_level(level),
            level,
        )
    }

    /// Production divided by cost
    pub fn roi(&self, base_cost: f64, level: u32) -> f64 {
        self.production_for_level(level) / self.cost_for_level(base_cost, level)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_config(field, format!("must be finite, got {}", value)))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(Error::invalid_config(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(value)
}

fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(Error::invalid_config(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}

fn floor_at(field: &'static str, value: f64, floor: f64) -> f64 {
    if value < floor {
        warn!(field, value, floor, "Curve parameter below floor, clamped");
        floor
    } else {
        value
    }
}

fn clamp_to(field: &'static str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, value, min, max, "Curve parameter out of range, clamped");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn scenario() -> CurveParams {
        CurveParams {
            base_production: 1.0,
            production_multiplier: 1.2,
            cost_multiplier: 1.15,
            base_duration: 1.0,
            min_duration: 0.1,
            duration_step_levels: 10,
            duration_decay_per_step: 0.95,
            ..CurveParams::default()
        }
        .validated()
        .unwrap()
    }

    #[test]
    fn test_example_scenario() {
        let params = scenario();
        assert!(approx(params.production_for_level(1), 1.0));
        assert!(approx(params.production_for_level(3), 1.44));
        assert!(approx(params.duration_for_level(1), 1.0));
        assert!(approx(params.duration_for_level(10), 1.0));
        assert!(approx(params.duration_for_level(11), 0.95));
        assert!(approx(params.duration_for_level(21), 0.9025));
    }

    #[test]
    fn test_duration_non_increasing_and_floored() {
        let params = scenario();
        let mut previous = params.duration_for_level(1);
        for level in 2..=1000 {
            let duration = params.duration_for_level(level);
            assert!(duration <= previous, "duration grew at level {}", level);
            assert!(duration >= params.min_duration);

            // Strict decrease by the decay factor across a step boundary
            if (level - 1) % params.duration_step_levels == 0 && previous > params.min_duration {
                let expected = (previous * params.duration_decay_per_step).max(params.min_duration);
                assert!(approx(duration, expected), "level {}", level);
                if expected > params.min_duration {
                    assert!(duration < previous);
                }
            }
            previous = duration;
        }
        assert!(approx(params.duration_for_level(10_000), 0.1));
    }

    #[test]
    fn test_level_zero_is_accepted() {
        let params = scenario();
        assert!(approx(params.duration_for_level(0), 1.0));
        assert!(approx(params.production_for_level(0), 1.0 / 1.2));
        assert!(approx(params.cost_for_level(10.0, 0), 10.0 * 30.0));
    }

    #[test]
    fn test_target_payback_breakpoints() {
        let params = scenario();
        assert!(approx(params.target_payback(1), 30.0));
        assert!(approx(params.target_payback(10), 30.0));
        assert!(approx(params.target_payback(30), 20.0));
        assert!(approx(params.target_payback(50), 10.0));
        assert!(approx(params.target_payback(100), 6.5));
        assert!(approx(params.target_payback(150), 3.0));
        assert!(approx(params.target_payback(151), 3.0 + 2f64.log10()));
        assert!(approx(params.target_payback(159), 4.0));
    }

    #[test]
    fn test_cost_back_derived_from_payback() {
        let params = scenario();
        // 10 × 1.15 / 1.0 × 30
        assert!(approx(params.cost_for_level(10.0, 1), 345.0));
        // 10 × 1.15^11 / 0.95 × 29.5
        let expected = 10.0 * 1.15f64.powi(11) / 0.95 * 29.5;
        assert!(approx(params.cost_for_level(10.0, 11), expected));
    }

    #[test]
    fn test_payback_time_rules() {
        let params = scenario();

        // Early levels never go below the 15s floor
        assert!(approx(params.payback_time(1.0, 10.0, 1.0, 5), 15.0));
        assert!(approx(params.payback_time(100.0, 1.0, 1.0, 5), 100.0));

        // Mid game is the plain ratio, floored at min_payback_time
        assert!(approx(params.payback_time(20.0, 2.0, 1.0, 60), 10.0));
        assert!(approx(params.payback_time(0.01, 2.0, 1.0, 60), 0.5));

        // Endgame: ×(1 + 0.1 × log10(1500/150)) = ×1.1
        assert!(approx(params.payback_time(20.0, 2.0, 1.0, 1500), 11.0));
    }

    #[test]
    fn test_roi_is_production_over_cost() {
        let params = scenario();
        assert!(approx(params.roi(10.0, 1), 1.0 / 345.0));
    }

    #[test]
    fn test_roi_favours_player_when_production_outgrows_cost() {
        let params = CurveParams {
            production_multiplier: 1.3,
            cost_multiplier: 1.1,
            ..CurveParams::default()
        }
        .validated()
        .unwrap();

        let early = params.roi(10.0, 11);
        let mid = params.roi(10.0, 50);
        let late = params.roi(10.0, 150);
        assert!(mid > early);
        assert!(late > mid);
    }

    #[test]
    fn test_validation_rejects_broken_parameters() {
        let zero_duration = CurveParams {
            base_duration: 0.0,
            ..CurveParams::default()
        };
        assert!(matches!(
            zero_duration.validated(),
            Err(Error::InvalidConfig { field: "base_duration", .. })
        ));

        let nan_multiplier = CurveParams {
            production_multiplier: f64::NAN,
            ..CurveParams::default()
        };
        assert!(nan_multiplier.validated().is_err());

        let no_steps = CurveParams {
            duration_step_levels: 0,
            ..CurveParams::default()
        };
        assert!(no_steps.validated().is_err());

        let negative_cost = CurveParams {
            cost_multiplier: -1.15,
            ..CurveParams::default()
        };
        assert!(negative_cost.validated().is_err());

        let bad_breakpoints = CurveParams {
            payback: PaybackCurve {
                mid_level: 5,
                ..PaybackCurve::default()
            },
            ..CurveParams::default()
        };
        assert!(bad_breakpoints.validated().is_err());
    }

    #[test]
    fn test_validation_clamps_to_floors() {
        let params = CurveParams {
            cost_multiplier: 0.9,
            production_multiplier: 0.5,
            base_duration: 0.05,
            min_duration: 0.001,
            duration_decay_per_step: 0.2,
            min_payback_time: 0.0,
            endgame_payback_factor: 2.0,
            ..CurveParams::default()
        }
        .validated()
        .unwrap();

        assert!(approx(params.cost_multiplier, 1.0));
        assert!(approx(params.production_multiplier, 1.0));
        assert!(approx(params.base_duration, 0.1));
        assert!(approx(params.min_duration, 0.01));
        assert!(approx(params.duration_decay_per_step, 0.5));
        assert!(approx(params.min_payback_time, 0.1));
        assert!(approx(params.endgame_payback_factor, 0.5));
    }

    #[test]
    fn test_params_ron_defaults() {
        let params: CurveParams = ron::from_str("(base_duration: 2.5, duration_step_levels: 5)").unwrap();
        assert!(approx(params.base_duration, 2.5));
        assert_eq!(params.duration_step_levels, 5);
        assert!(approx(params.cost_multiplier, 1.15));
        assert_eq!(params.payback, PaybackCurve::default());
    }
}
