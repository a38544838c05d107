//! The two-phase button state machine.
//!
//! ## Usage
//!
//! [`MorphButton`] owns the three shape layers and drives every transition
//! between the default and progressing appearance. State and progress
//! changes are explicit method calls that report their outcome; the host
//! renders the layers, pumps [`MorphButton::poll`], and forwards lifecycle
//! suspend/resume events.

use lyon_path::math::{Box2D, Point, point};
use tracing::{debug, trace};

use crate::{
    content::{ContentStore, ContentVisibility},
    geometry,
    layer::ShapeLayer,
    style::{ButtonStyle, ResolvedStyle, StyleError},
    timeline::{
        FIRST_STEP_DURATION, MediaTime, PathMorph, ROTATION_PERIOD, Rotation,
        SECOND_STEP_DURATION, Segment, morph_duration,
    },
};

/// Animation key of the first morph step on the border layer.
pub const FIRST_STEP_KEY: &str = "first-step-morph";
/// Animation key of the second morph step on the border layer.
pub const SECOND_STEP_KEY: &str = "second-step-morph";
/// Animation key of the progressing-state rotation on the border layer.
pub const ROTATION_KEY: &str = "rotation";
/// Animation key of progress-overlay updates on the progress layer.
pub const PROGRESS_UPDATE_KEY: &str = "progress-update";

/// Visual states of the button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
    /// Idle appearance: rounded-rectangle border with visible content.
    #[default]
    Default,
    /// Processing appearance: rotating cut circle with a cross glyph.
    Progressing,
}

/// Outcome of a [`MorphButton::set_state`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Whether a shape morph was scheduled.
    pub morphed: bool,
    /// Whether the progress overlay was re-evaluated.
    pub overlay_refreshed: bool,
}

/// Animated shape state machine for a two-phase task lifecycle.
#[derive(Debug)]
pub struct MorphButton {
    style: ResolvedStyle,
    state: VisualState,
    progress: Option<f32>,
    bounds: Box2D,
    highlighted: bool,
    border_layer: ShapeLayer,
    cross_layer: ShapeLayer,
    progress_layer: ShapeLayer,
    content: ContentVisibility,
    pending_restore: Option<MediaTime>,
}

impl MorphButton {
    /// Creates a button in the default state, applied without animation.
    ///
    /// Resolves the style once (tint fallbacks, validation) and builds the
    /// three layers; they persist for the button's lifetime.
    pub fn new(
        style: &ButtonStyle,
        bounds: Box2D,
        store: &mut dyn ContentStore,
    ) -> Result<Self, StyleError> {
        let style = style.resolve()?;
        let center = geometry::shifted_center(&bounds, style.center_shift);

        let mut border_layer = ShapeLayer::new(bounds);
        border_layer.stroke_color = style.border_color;
        border_layer.fill_color = style.shape_background_color;
        border_layer.set_outline(geometry::default_outline(
            &bounds,
            style.corner_radius,
            style.border_width,
        ));

        let mut cross_layer = ShapeLayer::new(bounds);
        cross_layer.hidden = true;
        cross_layer.stroke_color = style.circle_border_color;
        cross_layer.set_outline(geometry::cross_outline(
            center,
            style.circle_radius,
            style.circle_border_width,
        ));

        let mut progress_layer = ShapeLayer::new(bounds);
        progress_layer.hidden = true;
        progress_layer.stroke_color = style.circle_border_color;

        store.set_label_opacity(1.0);

        Ok(Self {
            style,
            state: VisualState::Default,
            progress: None,
            bounds,
            highlighted: false,
            border_layer,
            cross_layer,
            progress_layer,
            content: ContentVisibility::new(),
            pending_restore: None,
        })
    }

    /// The current visual state.
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// The stored progress value, if any.
    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    /// The resolved style values in effect.
    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    /// The current bounds.
    pub fn bounds(&self) -> Box2D {
        self.bounds
    }

    /// The border layer (rounded rectangle or circular badge).
    pub fn border_layer(&self) -> &ShapeLayer {
        &self.border_layer
    }

    /// The cancel/cross glyph layer.
    pub fn cross_layer(&self) -> &ShapeLayer {
        &self.cross_layer
    }

    /// The progress-arc overlay layer.
    pub fn progress_layer(&self) -> &ShapeLayer {
        &self.progress_layer
    }

    /// The armed content-restore deadline, if a return fade is in flight.
    pub fn pending_content_restore(&self) -> Option<MediaTime> {
        self.pending_restore
    }

    /// Sets the visual state.
    ///
    /// A changed value runs the full transition sequence; the same value is
    /// a no-op for transition purposes but still re-evaluates the progress
    /// overlay.
    pub fn set_state(
        &mut self,
        state: VisualState,
        now: MediaTime,
        store: &mut dyn ContentStore,
    ) -> Transition {
        let morphed = state != self.state;
        if morphed {
            self.state = state;
            match state {
                VisualState::Progressing => self.transition_to_progressing(now, store),
                VisualState::Default => self.transition_to_default(now),
            }
            debug!(?state, now, "visual state changed");
        }
        self.refresh_progress_overlay(now);
        Transition {
            morphed,
            overlay_refreshed: true,
        }
    }

    /// Sets the progress value, returning what was stored.
    ///
    /// A non-`None` value requires the progressing state; violating that is
    /// a programming error and fails fast. Values above 1.0 are clamped to
    /// 1.0; values below 0.0 pass through and draw a reversed arc (see
    /// [`crate::geometry::progress_arc_outline`]). `None` is always legal
    /// and hides the overlay.
    pub fn set_progress(&mut self, progress: Option<f32>, now: MediaTime) -> Option<f32> {
        if progress.is_some() {
            assert!(
                self.state == VisualState::Progressing,
                "visual state must be Progressing while changing the progress value"
            );
        }
        self.progress = progress.map(|value| value.min(1.0));
        self.refresh_progress_overlay(now);
        self.progress
    }

    /// Repositions all layers and recomputes the current-state geometry.
    ///
    /// Paths are recomputed in place without animation; in-flight morphs
    /// keep their scheduled segments.
    pub fn layout(&mut self, bounds: Box2D) {
        self.bounds = bounds;
        self.border_layer.set_frame(bounds);
        self.cross_layer.set_frame(bounds);
        self.progress_layer.set_frame(bounds);

        let center = geometry::shifted_center(&bounds, self.style.center_shift);
        match self.state {
            VisualState::Default => self.border_layer.set_outline(geometry::default_outline(
                &bounds,
                self.style.corner_radius,
                self.style.border_width,
            )),
            VisualState::Progressing => {
                self.border_layer.set_outline(geometry::progressing_outline(
                    center,
                    self.style.circle_radius,
                    self.style.circle_border_width,
                    self.style.circle_cut_angle,
                ))
            }
        }
        self.cross_layer.set_outline(geometry::cross_outline(
            center,
            self.style.circle_radius,
            self.style.circle_border_width,
        ));
        if !self.progress_layer.hidden
            && let Some(fraction) = self.progress
        {
            self.progress_layer
                .set_outline(self.progress_arc(center, fraction));
        }
    }

    /// Freezes every layer clock; in-flight animations keep their phase.
    pub fn suspend(&mut self, now: MediaTime) {
        self.border_layer.pause(now);
        self.cross_layer.pause(now);
        self.progress_layer.pause(now);
        debug!(now, "suspended");
    }

    /// Resumes every layer clock from the frozen phase.
    pub fn resume(&mut self, now: MediaTime) {
        self.border_layer.resume(now);
        self.cross_layer.resume(now);
        self.progress_layer.resume(now);
        debug!(now, "resumed");
    }

    /// Fires due delayed completions.
    ///
    /// Returns `true` when the return-fade completion fired: label opacity
    /// back to 1.0 and saved content restored.
    pub fn poll(&mut self, now: MediaTime, store: &mut dyn ContentStore) -> bool {
        if let Some(at) = self.pending_restore
            && now >= at
        {
            self.pending_restore = None;
            store.set_label_opacity(1.0);
            self.content.show(store);
            debug!(now, "content restored after fade");
            return true;
        }
        false
    }

    /// Applies or clears the highlight color treatment.
    ///
    /// With color inversion enabled, the glyph and overlay strokes take the
    /// circle background color and the border fill takes the border color of
    /// the active state while highlighted. With inversion disabled only the
    /// highlighted flag is recorded; layer colors stay untouched.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        if !self.style.invert_colors_on_highlight {
            return;
        }
        let stroke = if highlighted {
            self.style.circle_background_color
        } else {
            self.style.circle_border_color
        };
        self.cross_layer.stroke_color = stroke;
        self.progress_layer.stroke_color = stroke;
        self.border_layer.fill_color = match (highlighted, self.state) {
            (true, VisualState::Default) => self.style.border_color,
            (true, VisualState::Progressing) => self.style.circle_border_color,
            (false, VisualState::Default) => self.style.shape_background_color,
            (false, VisualState::Progressing) => self.style.circle_background_color,
        };
    }

    /// Whether the highlight treatment is currently applied.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    fn transition_to_progressing(&mut self, now: MediaTime, store: &mut dyn ContentStore) {
        // A still-armed restore from an interrupted return fade would bring
        // content back while processing.
        self.pending_restore = None;

        self.content.hide(store);
        store.set_label_opacity(0.0);

        self.border_layer.stroke_color = self.style.circle_border_color;
        self.border_layer.fill_color = self.style.circle_background_color;
        self.cross_layer.hidden = false;

        let center = geometry::shifted_center(&self.bounds, self.style.center_shift);
        let replace = geometry::full_circle_outline(
            center,
            self.style.circle_radius,
            self.style.circle_border_width,
        );
        let target = geometry::progressing_outline(
            center,
            self.style.circle_radius,
            self.style.circle_border_width,
            self.style.circle_cut_angle,
        );
        let local = self.border_layer.convert_time(now);
        self.schedule_morph(replace, target, local);

        self.border_layer.set_anchor(self.rotation_anchor());
        self.border_layer.add_animation(
            ROTATION_KEY,
            Segment::Rotation(Rotation::new(local + morph_duration(), ROTATION_PERIOD)),
        );
    }

    fn transition_to_default(&mut self, now: MediaTime) {
        self.border_layer.remove_animation(ROTATION_KEY);
        self.border_layer.stroke_color = self.style.border_color;
        self.border_layer.fill_color = self.style.shape_background_color;
        self.cross_layer.hidden = true;

        let center = geometry::shifted_center(&self.bounds, self.style.center_shift);
        let replace = geometry::transition_rounded_outline(
            center,
            self.style.circle_radius,
            self.style.border_width,
        );
        let target = geometry::default_outline(
            &self.bounds,
            self.style.corner_radius,
            self.style.border_width,
        );
        let local = self.border_layer.convert_time(now);
        self.schedule_morph(replace, target, local);

        // Label fades back over the content-fade duration, delayed by the
        // full morph; content restore fires when that fade completes.
        self.pending_restore =
            Some(now + morph_duration() + self.style.content_fade_duration.as_secs_f32());
    }

    /// Schedules the two-step morph: current shape to the replace midpoint,
    /// then the midpoint to the final target.
    fn schedule_morph(
        &mut self,
        replace: geometry::Outline,
        target: geometry::Outline,
        local: MediaTime,
    ) {
        let current = self
            .border_layer
            .outline()
            .cloned()
            .unwrap_or_else(|| replace.clone());
        self.border_layer.add_animation(
            FIRST_STEP_KEY,
            Segment::PathMorph(PathMorph::new(
                current,
                replace.clone(),
                local,
                FIRST_STEP_DURATION,
            )),
        );
        self.border_layer.add_animation(
            SECOND_STEP_KEY,
            Segment::PathMorph(PathMorph::new(
                replace,
                target.clone(),
                local + FIRST_STEP_DURATION.as_secs_f32(),
                SECOND_STEP_DURATION,
            )),
        );
        self.border_layer.set_outline(target);
    }

    /// Re-evaluates the overlay after any state or progress change.
    fn refresh_progress_overlay(&mut self, now: MediaTime) {
        let hidden = self.state != VisualState::Progressing || self.progress.is_none();
        self.progress_layer.hidden = hidden;
        if hidden {
            return;
        }
        let Some(fraction) = self.progress else {
            return;
        };

        let center = geometry::shifted_center(&self.bounds, self.style.center_shift);
        let target = self.progress_arc(center, fraction);
        let local = self.progress_layer.convert_time(now);
        let current = self
            .progress_layer
            .outline()
            .cloned()
            .unwrap_or_else(|| self.progress_arc(center, 0.0));
        self.progress_layer.add_animation(
            PROGRESS_UPDATE_KEY,
            Segment::PathMorph(PathMorph::new(
                current,
                target.clone(),
                local,
                self.style.progress_update_duration,
            )),
        );
        self.progress_layer.set_outline(target);
        trace!(fraction, "progress overlay refreshed");
    }

    fn progress_arc(&self, center: Point, fraction: f32) -> geometry::Outline {
        geometry::progress_arc_outline(
            center,
            self.style.circle_radius - self.style.circle_border_width,
            self.style.circle_border_width,
            fraction,
        )
    }

    /// Rotation pivot as a fraction of the bounds, so it tracks layout.
    fn rotation_anchor(&self) -> Point {
        let width = self.bounds.width();
        let height = self.bounds.height();
        if width <= 0.0 || height <= 0.0 {
            return point(0.5, 0.5);
        }
        point(
            0.5 + self.style.center_shift.x / width,
            0.5 + self.style.center_shift.y / height,
        )
    }
}
