//! Persistent drawable shape layers.
//!
//! ## Usage
//!
//! The button owns three layers (border, cross glyph, progress arc). Each is
//! created once and mutated in place: paths are recomputed, never recreated,
//! and animation segments are keyed so that re-scheduling under the same key
//! replaces the previous segment.

use lyon_path::math::{Box2D, Point, point};
use smallvec::SmallVec;

use crate::{
    color::Color,
    geometry::Outline,
    timeline::{LayerClock, MediaTime, Segment},
};

/// A drawable surface with persistent identity.
///
/// Holds the current outline, styling, a local animation clock, and the
/// keyed animation segments a compositor would sample.
#[derive(Clone, Debug)]
pub struct ShapeLayer {
    outline: Option<Outline>,
    /// Stroke color of the outline.
    pub stroke_color: Color,
    /// Fill color of the outline.
    pub fill_color: Color,
    /// Whether the layer is currently hidden.
    pub hidden: bool,
    frame: Box2D,
    anchor: Point,
    clock: LayerClock,
    animations: SmallVec<[(&'static str, Segment); 3]>,
}

impl ShapeLayer {
    /// Creates an empty, visible layer covering `frame`.
    pub fn new(frame: Box2D) -> Self {
        Self {
            outline: None,
            stroke_color: Color::TRANSPARENT,
            fill_color: Color::TRANSPARENT,
            hidden: false,
            frame,
            anchor: point(0.5, 0.5),
            clock: LayerClock::new(),
            animations: SmallVec::new(),
        }
    }

    /// The current outline, if one has been set.
    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    /// Replaces the layer's outline (the model value a morph ends at).
    pub fn set_outline(&mut self, outline: Outline) {
        self.outline = Some(outline);
    }

    /// The layer's frame.
    pub fn frame(&self) -> Box2D {
        self.frame
    }

    /// Positions the layer; called on every layout pass.
    pub fn set_frame(&mut self, frame: Box2D) {
        self.frame = frame;
    }

    /// The rotation anchor, as a fraction of the frame size.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Sets the rotation anchor as a fraction of the frame size, so the
    /// pivot tracks layout changes.
    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// The layer's local clock.
    pub fn clock(&self) -> &LayerClock {
        &self.clock
    }

    /// Converts wall media time into this layer's local time.
    pub fn convert_time(&self, wall: MediaTime) -> MediaTime {
        self.clock.convert_time(wall)
    }

    /// Schedules a segment, replacing any previous segment under `key`.
    pub fn add_animation(&mut self, key: &'static str, segment: Segment) {
        if let Some(slot) = self.animations.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = segment;
        } else {
            self.animations.push((key, segment));
        }
    }

    /// Removes the segment under `key`. Returns whether one was present.
    pub fn remove_animation(&mut self, key: &str) -> bool {
        let before = self.animations.len();
        self.animations.retain(|(k, _)| *k != key);
        self.animations.len() != before
    }

    /// The segment under `key`, if scheduled.
    pub fn animation(&self, key: &str) -> Option<&Segment> {
        self.animations
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, segment)| segment)
    }

    /// Iterates over all scheduled segments with their keys.
    pub fn animations(&self) -> impl Iterator<Item = (&'static str, &Segment)> {
        self.animations.iter().map(|(k, segment)| (*k, segment))
    }

    /// Freezes the layer's clock, keeping every in-flight segment at its
    /// current phase.
    pub fn pause(&mut self, now: MediaTime) {
        self.clock.pause(now);
    }

    /// Resumes the layer's clock from the frozen phase.
    pub fn resume(&mut self, now: MediaTime) {
        self.clock.resume(now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{geometry::full_circle_outline, timeline::Rotation};

    fn test_frame() -> Box2D {
        Box2D::new(point(0.0, 0.0), point(100.0, 40.0))
    }

    #[test]
    fn adding_under_the_same_key_replaces() {
        let mut layer = ShapeLayer::new(test_frame());
        layer.add_animation(
            "rotation",
            Segment::Rotation(Rotation::new(0.0, Duration::from_millis(1500))),
        );
        layer.add_animation(
            "rotation",
            Segment::Rotation(Rotation::new(2.0, Duration::from_millis(1500))),
        );
        assert_eq!(layer.animations().count(), 1);
        let rotation = layer
            .animation("rotation")
            .and_then(Segment::as_rotation)
            .unwrap();
        assert_eq!(rotation.begin_time, 2.0);
    }

    #[test]
    fn remove_animation_reports_presence() {
        let mut layer = ShapeLayer::new(test_frame());
        assert!(!layer.remove_animation("rotation"));
        layer.add_animation(
            "rotation",
            Segment::Rotation(Rotation::new(0.0, Duration::from_millis(1500))),
        );
        assert!(layer.remove_animation("rotation"));
        assert_eq!(layer.animations().count(), 0);
    }

    #[test]
    fn pause_freezes_local_time_with_segments_intact() {
        let mut layer = ShapeLayer::new(test_frame());
        layer.set_outline(full_circle_outline(point(50.0, 20.0), 20.0, 3.0));
        layer.add_animation(
            "rotation",
            Segment::Rotation(Rotation::new(0.0, Duration::from_millis(1500))),
        );
        layer.pause(1.0);
        assert_eq!(layer.convert_time(5.0), 1.0);
        assert_eq!(layer.animations().count(), 1);
        layer.resume(5.0);
        assert_eq!(layer.convert_time(6.0), 2.0);
    }
}
