//! Timed animation segments and per-layer media clocks.
//!
//! ## Usage
//!
//! The host supplies "now" as a [`MediaTime`] on a monotonic clock. Each
//! layer owns a [`LayerClock`] converting that wall time into a local time,
//! which is what segment begin times are expressed in. Freezing a clock and
//! later resuming it keeps every in-flight segment at the exact phase it was
//! paused at.

use std::time::Duration;

use lyon_path::math::Angle;
use tracing::trace;

use crate::geometry::Outline;

/// Seconds on the host's monotonic clock.
pub type MediaTime = f32;

/// Duration of the first morph step (current shape to the replace midpoint).
pub const FIRST_STEP_DURATION: Duration = Duration::from_millis(300);
/// Duration of the second morph step (midpoint to the final shape).
pub const SECOND_STEP_DURATION: Duration = Duration::from_millis(150);
/// Period of one full turn of the progressing-state rotation.
pub const ROTATION_PERIOD: Duration = Duration::from_millis(1500);

/// Total duration of the two-step shape morph.
pub fn morph_duration() -> f32 {
    FIRST_STEP_DURATION.as_secs_f32() + SECOND_STEP_DURATION.as_secs_f32()
}

/// A layer-local clock derived from wall-clock media time.
///
/// Local time is `(wall - begin_time) * rate + time_offset`. Pausing pins the
/// local time by dropping the rate to zero; resuming advances `begin_time` by
/// the wall-clock span spent frozen, so local time continues from the frozen
/// instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerClock {
    rate: f32,
    time_offset: MediaTime,
    begin_time: MediaTime,
}

impl Default for LayerClock {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerClock {
    /// Creates a running clock whose local time equals wall time.
    pub fn new() -> Self {
        Self {
            rate: 1.0,
            time_offset: 0.0,
            begin_time: 0.0,
        }
    }

    /// Converts wall-clock media time into this layer's local time.
    pub fn convert_time(&self, wall: MediaTime) -> MediaTime {
        (wall - self.begin_time) * self.rate + self.time_offset
    }

    /// Returns whether the clock is currently frozen.
    pub fn is_paused(&self) -> bool {
        self.rate == 0.0
    }

    /// Freezes the clock at its current local time. No-op when already
    /// paused.
    pub fn pause(&mut self, wall: MediaTime) {
        if self.is_paused() {
            return;
        }
        let frozen_at = self.convert_time(wall);
        self.rate = 0.0;
        self.time_offset = frozen_at;
        trace!(frozen_at, "layer clock paused");
    }

    /// Resumes a frozen clock from the exact local time it was paused at.
    /// No-op when already running.
    pub fn resume(&mut self, wall: MediaTime) {
        if !self.is_paused() {
            return;
        }
        let paused_at = self.time_offset;
        self.rate = 1.0;
        self.time_offset = 0.0;
        self.begin_time = 0.0;
        let since_pause = self.convert_time(wall) - paused_at;
        self.begin_time = since_pause;
        trace!(paused_at, since_pause, "layer clock resumed");
    }
}

/// A timed path transition between two outlines.
#[derive(Clone, Debug)]
pub struct PathMorph {
    /// Outline at the start of the segment.
    pub from: Outline,
    /// Outline at the end of the segment.
    pub to: Outline,
    /// Local time at which the segment begins.
    pub begin_time: MediaTime,
    /// Segment duration in seconds.
    pub duration: f32,
}

impl PathMorph {
    /// Creates a segment starting at `begin_time` in layer-local time.
    pub fn new(from: Outline, to: Outline, begin_time: MediaTime, duration: Duration) -> Self {
        Self {
            from,
            to,
            begin_time,
            duration: duration.as_secs_f32(),
        }
    }

    /// Phase of the segment at a local time, clamped to `[0.0, 1.0]`.
    pub fn phase_at(&self, local: MediaTime) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((local - self.begin_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Returns whether the segment has completed at a local time.
    pub fn is_finished_at(&self, local: MediaTime) -> bool {
        self.phase_at(local) >= 1.0
    }
}

/// An infinitely repeating full-turn rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// Local time at which the rotation begins.
    pub begin_time: MediaTime,
    /// Period of one full turn in seconds.
    pub period: f32,
}

impl Rotation {
    /// Creates a rotation starting at `begin_time` in layer-local time.
    pub fn new(begin_time: MediaTime, period: Duration) -> Self {
        Self {
            begin_time,
            period: period.as_secs_f32(),
        }
    }

    /// Rotation angle at a local time; zero before the rotation begins.
    pub fn angle_at(&self, local: MediaTime) -> Angle {
        if local <= self.begin_time || self.period <= 0.0 {
            return Angle::zero();
        }
        let turns = (local - self.begin_time) / self.period;
        Angle::two_pi() * turns.fract()
    }
}

/// A scheduled animation segment on a layer.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Timed path transition.
    PathMorph(PathMorph),
    /// Repeating rotation transform.
    Rotation(Rotation),
}

impl Segment {
    /// Returns the path morph, if this segment is one.
    pub fn as_path_morph(&self) -> Option<&PathMorph> {
        match self {
            Segment::PathMorph(morph) => Some(morph),
            Segment::Rotation(_) => None,
        }
    }

    /// Returns the rotation, if this segment is one.
    pub fn as_rotation(&self) -> Option<&Rotation> {
        match self {
            Segment::Rotation(rotation) => Some(rotation),
            Segment::PathMorph(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use lyon_path::math::point;

    use super::*;
    use crate::geometry::full_circle_outline;

    #[test]
    fn running_clock_tracks_wall_time() {
        let clock = LayerClock::new();
        assert_eq!(clock.convert_time(0.0), 0.0);
        assert_eq!(clock.convert_time(2.5), 2.5);
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut clock = LayerClock::new();
        clock.pause(1.0);
        assert!(clock.is_paused());
        assert_eq!(clock.convert_time(1.0), 1.0);
        assert_eq!(clock.convert_time(9.0), 1.0);
    }

    // Freezing at t0 and resuming after wall delta d must make local time
    // equal wall time minus the paused span, for every later wall instant.
    #[test]
    fn resume_subtracts_the_paused_span() {
        let mut clock = LayerClock::new();
        clock.pause(2.0);
        clock.resume(5.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.convert_time(5.0), 2.0);
        assert_eq!(clock.convert_time(8.0), 5.0);
    }

    #[test]
    fn repeated_pause_and_resume_accumulate() {
        let mut clock = LayerClock::new();
        clock.pause(1.0);
        clock.resume(2.0);
        clock.pause(4.0); // local 3.0
        clock.resume(10.0);
        assert_eq!(clock.convert_time(10.0), 3.0);
        assert_eq!(clock.convert_time(11.0), 4.0);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut clock = LayerClock::new();
        clock.pause(1.0);
        clock.pause(7.0);
        assert_eq!(clock.convert_time(9.0), 1.0);
        clock.resume(9.0);
        clock.resume(12.0);
        assert_eq!(clock.convert_time(9.0), 1.0);
        assert_eq!(clock.convert_time(10.0), 2.0);
    }

    #[test]
    fn path_morph_phase_is_clamped() {
        let outline = full_circle_outline(point(0.0, 0.0), 10.0, 2.0);
        let morph = PathMorph::new(
            outline.clone(),
            outline,
            1.0,
            Duration::from_millis(500),
        );
        assert_eq!(morph.phase_at(0.0), 0.0);
        assert_eq!(morph.phase_at(1.25), 0.5);
        assert_eq!(morph.phase_at(1.5), 1.0);
        assert_eq!(morph.phase_at(42.0), 1.0);
        assert!(morph.is_finished_at(1.5));
        assert!(!morph.is_finished_at(1.4));
    }

    #[test]
    fn rotation_wraps_every_period() {
        let rotation = Rotation::new(1.0, Duration::from_millis(1500));
        assert_eq!(rotation.angle_at(0.5), Angle::zero());
        assert_eq!(rotation.angle_at(1.0), Angle::zero());
        let quarter = rotation.angle_at(1.0 + 0.375);
        assert!((quarter.radians - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        let wrapped = rotation.angle_at(1.0 + 1.5 + 0.375);
        assert!((wrapped.radians - quarter.radians).abs() < 1e-4);
    }
}
