use std::f64::consts::TAU;
use std::time::Duration;

use glam::{Mat4, Vec3};

/// Constant-speed rotation driven by absolute elapsed time.
///
/// Every method takes the time since the animation origin rather than a frame
/// delta; the same `elapsed` always yields the same matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Angular speed, radians per second. Non-negative.
    pub radians_per_second: f64,
}

impl Spin {
    /// Rotation about the vertical axis.
    pub fn about_y(radians_per_second: f64) -> Self {
        Self {
            axis: Vec3::Y,
            radians_per_second: radians_per_second.max(0.0),
        }
    }

    /// Rotation about the vertical axis completing one turn per `period`.
    ///
    /// A zero period yields a stationary spin.
    pub fn from_period(period: Duration) -> Self {
        let secs = period.as_secs_f64();
        Self::about_y(if secs > 0.0 { TAU / secs } else { 0.0 })
    }

    /// Time for one full turn.
    ///
    /// `None` if the spin is stationary or a turn takes longer than
    /// `Duration::MAX`.
    pub fn period(&self) -> Option<Duration> {
        if self.radians_per_second <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(TAU / self.radians_per_second).ok()
    }

    /// Unwrapped rotation angle; non-decreasing in `elapsed_secs`.
    ///
    /// Negative elapsed times are treated as zero.
    pub fn angle_at(&self, elapsed_secs: f64) -> f64 {
        elapsed_secs.max(0.0) * self.radians_per_second
    }

    /// Rotation angle reduced into `[0, 2π)`.
    pub fn phase_at(&self, elapsed_secs: f64) -> f64 {
        let phase = self.angle_at(elapsed_secs).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative remainders.
        if phase >= TAU { 0.0 } else { phase }
    }

    /// World matrix at `elapsed_secs`.
    pub fn world_at(&self, elapsed_secs: f64) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.phase_at(elapsed_secs) as f32)
    }
}
