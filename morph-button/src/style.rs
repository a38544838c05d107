//! Style configuration for the morph button.
//!
//! ## Usage
//!
//! Build a [`ButtonStyle`] with the setter chain, then resolve it once at
//! construction time. Resolution applies tint fallbacks and validates the
//! configuration; the resolved values are read on every later geometry
//! recomputation.

use std::time::Duration;

use derive_setters::Setters;
use lyon_path::math::Vector;
use thiserror::Error;

use crate::color::Color;

/// Default values for [`ButtonStyle`].
pub struct MorphButtonDefaults;

impl MorphButtonDefaults {
    /// Corner radius of the default-state rounded rectangle.
    pub const CORNER_RADIUS: f32 = 5.0;
    /// Border width of the default-state rounded rectangle.
    pub const BORDER_WIDTH: f32 = 3.0;
    /// Radius of the progressing-state circle.
    pub const CIRCLE_RADIUS: f32 = 20.0;
    /// Border width of the progressing-state circle.
    pub const CIRCLE_BORDER_WIDTH: f32 = 3.0;
    /// Cut angle of the progressing-state circle, in degrees.
    pub const CIRCLE_CUT_ANGLE: f32 = 45.0;
    /// Duration of a progress-overlay path update.
    pub const PROGRESS_UPDATE_DURATION: Duration = Duration::from_millis(100);
    /// Duration of the label/content fade.
    pub const CONTENT_FADE_DURATION: Duration = Duration::from_millis(200);
}

/// Style configuration consumed by the geometry builder and layer styling.
///
/// Unset colors fall back to [`ButtonStyle::tint_color`] when the style is
/// resolved. Changing style fields takes effect on the next geometry
/// recomputation (transition or layout pass), never retroactively.
#[derive(Clone, Debug, Setters)]
pub struct ButtonStyle {
    /// Corner radius of the default-state border.
    pub corner_radius: f32,
    /// Border width of the default-state border.
    pub border_width: f32,
    /// Border color of the default state. Falls back to the tint color.
    #[setters(strip_option)]
    pub border_color: Option<Color>,
    /// Radius of the progressing-state circle.
    pub circle_radius: f32,
    /// Border width of the progressing-state circle.
    pub circle_border_width: f32,
    /// Border color of the progressing-state circle. Falls back to the tint
    /// color.
    #[setters(strip_option)]
    pub circle_border_color: Option<Color>,
    /// Background color of the progressing-state circle.
    pub circle_background_color: Color,
    /// Cut angle of the progressing-state circle, in degrees (0..=360).
    pub circle_cut_angle: f32,
    /// Duration of a single progress-overlay update animation.
    pub progress_update_duration: Duration,
    /// Duration of the label/content fade that accompanies a transition.
    pub content_fade_duration: Duration,
    /// Invert content and background colors while highlighted.
    pub invert_colors_on_highlight: bool,
    /// Use the tint color for the label instead of the host's own color.
    pub use_tint_color_for_text: bool,
    /// Tint color used as the fallback for unset color options.
    pub tint_color: Color,
    /// Background color behind the default-state shape. Falls back to the
    /// circle background color.
    #[setters(strip_option)]
    pub background_color: Option<Color>,
    /// Offset applied to the geometric center used as the animation and
    /// rotation pivot.
    pub center_shift: Vector,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            corner_radius: MorphButtonDefaults::CORNER_RADIUS,
            border_width: MorphButtonDefaults::BORDER_WIDTH,
            border_color: None,
            circle_radius: MorphButtonDefaults::CIRCLE_RADIUS,
            circle_border_width: MorphButtonDefaults::CIRCLE_BORDER_WIDTH,
            circle_border_color: None,
            circle_background_color: Color::WHITE,
            circle_cut_angle: MorphButtonDefaults::CIRCLE_CUT_ANGLE,
            progress_update_duration: MorphButtonDefaults::PROGRESS_UPDATE_DURATION,
            content_fade_duration: MorphButtonDefaults::CONTENT_FADE_DURATION,
            invert_colors_on_highlight: true,
            use_tint_color_for_text: true,
            tint_color: Color::from_rgb(0.0, 0.478, 1.0),
            background_color: None,
            center_shift: Vector::zero(),
        }
    }
}

impl ButtonStyle {
    /// Resolves the configuration into concrete values.
    ///
    /// Applies the tint fallback for unset colors and validates dimensions
    /// and the cut angle. This runs once at construction; there is no lazy
    /// re-resolution afterwards.
    pub fn resolve(&self) -> Result<ResolvedStyle, StyleError> {
        for (name, value) in [
            ("corner_radius", self.corner_radius),
            ("border_width", self.border_width),
            ("circle_radius", self.circle_radius),
            ("circle_border_width", self.circle_border_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StyleError::InvalidDimension { name, value });
            }
        }
        if !self.circle_cut_angle.is_finite()
            || !(0.0..=360.0).contains(&self.circle_cut_angle)
        {
            return Err(StyleError::CutAngleOutOfRange(self.circle_cut_angle));
        }
        for (name, duration) in [
            ("progress_update_duration", self.progress_update_duration),
            ("content_fade_duration", self.content_fade_duration),
        ] {
            if duration.is_zero() {
                return Err(StyleError::ZeroDuration { name });
            }
        }

        let shape_background_color = self
            .background_color
            .unwrap_or(self.circle_background_color);
        Ok(ResolvedStyle {
            corner_radius: self.corner_radius,
            border_width: self.border_width,
            border_color: self.border_color.unwrap_or(self.tint_color),
            circle_radius: self.circle_radius,
            circle_border_width: self.circle_border_width,
            circle_border_color: self.circle_border_color.unwrap_or(self.tint_color),
            circle_background_color: self.circle_background_color,
            circle_cut_angle: self.circle_cut_angle,
            progress_update_duration: self.progress_update_duration,
            content_fade_duration: self.content_fade_duration,
            invert_colors_on_highlight: self.invert_colors_on_highlight,
            label_color: self.use_tint_color_for_text.then_some(self.tint_color),
            shape_background_color,
            center_shift: self.center_shift,
        })
    }
}

/// A [`ButtonStyle`] with fallbacks applied and validation done.
#[derive(Clone, Debug)]
pub struct ResolvedStyle {
    /// Corner radius of the default-state border.
    pub corner_radius: f32,
    /// Border width of the default-state border.
    pub border_width: f32,
    /// Border color of the default state.
    pub border_color: Color,
    /// Radius of the progressing-state circle.
    pub circle_radius: f32,
    /// Border width of the progressing-state circle.
    pub circle_border_width: f32,
    /// Border color of the progressing-state circle.
    pub circle_border_color: Color,
    /// Background color of the progressing-state circle.
    pub circle_background_color: Color,
    /// Cut angle of the progressing-state circle, in degrees.
    pub circle_cut_angle: f32,
    /// Duration of a single progress-overlay update animation.
    pub progress_update_duration: Duration,
    /// Duration of the label/content fade.
    pub content_fade_duration: Duration,
    /// Invert content and background colors while highlighted.
    pub invert_colors_on_highlight: bool,
    /// Color the host should apply to the label, when tint-for-text is set.
    pub label_color: Option<Color>,
    /// Background color behind the default-state shape.
    pub shape_background_color: Color,
    /// Offset applied to the geometric center used as the animation pivot.
    pub center_shift: Vector,
}

/// Errors surfaced by [`ButtonStyle::resolve`].
#[derive(Debug, Error)]
pub enum StyleError {
    /// The circle cut angle is outside the supported range.
    #[error("circle cut angle must be within 0..=360 degrees, got {0}")]
    CutAngleOutOfRange(f32),
    /// A dimension is negative or not finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDimension {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A configured duration is zero.
    #[error("{name} must be non-zero")]
    ZeroDuration {
        /// Name of the offending field.
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_colors_fall_back_to_tint() {
        let tint = Color::from_rgb(0.2, 0.4, 0.6);
        let style = ButtonStyle::default().tint_color(tint);
        let resolved = style.resolve().unwrap();
        assert_eq!(resolved.border_color, tint);
        assert_eq!(resolved.circle_border_color, tint);
        assert_eq!(resolved.label_color, Some(tint));
    }

    #[test]
    fn explicit_colors_win_over_tint() {
        let style = ButtonStyle::default()
            .border_color(Color::BLACK)
            .use_tint_color_for_text(false);
        let resolved = style.resolve().unwrap();
        assert_eq!(resolved.border_color, Color::BLACK);
        assert_eq!(resolved.label_color, None);
    }

    #[test]
    fn shape_background_falls_back_to_circle_background() {
        let style = ButtonStyle::default().circle_background_color(Color::BLACK);
        let resolved = style.resolve().unwrap();
        assert_eq!(resolved.shape_background_color, Color::BLACK);

        let style = ButtonStyle::default().background_color(Color::WHITE);
        let resolved = style.resolve().unwrap();
        assert_eq!(resolved.shape_background_color, Color::WHITE);
    }

    #[test]
    fn cut_angle_out_of_range_is_rejected() {
        let style = ButtonStyle::default().circle_cut_angle(400.0);
        assert!(matches!(
            style.resolve(),
            Err(StyleError::CutAngleOutOfRange(_))
        ));
    }

    #[test]
    fn negative_dimension_is_rejected() {
        let style = ButtonStyle::default().circle_radius(-1.0);
        assert!(matches!(
            style.resolve(),
            Err(StyleError::InvalidDimension {
                name: "circle_radius",
                ..
            })
        ));
    }
}
