//! Pure outline builders for the button's visual states.
//!
//! ## Usage
//!
//! Every function here is side-effect free: it takes the current bounds plus
//! style values and returns an [`Outline`]. Layers keep the returned paths;
//! nothing in this module touches a layer.

use lyon_geom::Arc;
use lyon_path::{
    Path, Winding,
    builder::BorderRadii,
    math::{Angle, Box2D, Point, Vector, point, vector},
};

/// A vector path plus the stroke width it should be drawn with.
#[derive(Clone, Debug)]
pub struct Outline {
    /// The path geometry.
    pub path: Path,
    /// Stroke width for rendering the path.
    pub stroke_width: f32,
}

/// Returns the animation center: the bounds midpoint offset by `shift`.
pub fn shifted_center(bounds: &Box2D, shift: Vector) -> Point {
    bounds.center() + shift
}

/// Rounded-rectangle border outline for the default state, sized to `bounds`.
pub fn default_outline(bounds: &Box2D, corner_radius: f32, border_width: f32) -> Outline {
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        bounds,
        &BorderRadii::new(corner_radius),
        Winding::Positive,
    );
    Outline {
        path: builder.build(),
        stroke_width: border_width,
    }
}

/// Circle-with-gap outline for the progressing state.
///
/// The arc starts at `cut_angle_degrees` (converted to radians) and ends at a
/// full turn, leaving a visual gap of `cut_angle_degrees`.
pub fn progressing_outline(
    center: Point,
    circle_radius: f32,
    circle_border_width: f32,
    cut_angle_degrees: f32,
) -> Outline {
    let start = Angle::degrees(cut_angle_degrees);
    let sweep = Angle::two_pi() - start;
    arc_outline(center, circle_radius, start, sweep, circle_border_width)
}

/// Rounded rectangle inscribed in the circle's bounding box.
///
/// Used as the "squared circle" midpoint between the rectangular and circular
/// silhouettes during a morph.
pub fn transition_rounded_outline(
    center: Point,
    circle_radius: f32,
    border_width: f32,
) -> Outline {
    let rect = Box2D::new(
        point(center.x - circle_radius, center.y - circle_radius),
        point(center.x + circle_radius, center.y + circle_radius),
    );
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &rect,
        &BorderRadii::new(circle_radius),
        Winding::Positive,
    );
    Outline {
        path: builder.build(),
        stroke_width: border_width,
    }
}

/// Closed full circle, the other morph midpoint.
pub fn full_circle_outline(
    center: Point,
    circle_radius: f32,
    circle_border_width: f32,
) -> Outline {
    let mut builder = Path::builder();
    builder.add_circle(center, circle_radius, Winding::Positive);
    Outline {
        path: builder.build(),
        stroke_width: circle_border_width,
    }
}

/// X-glyph outline: two crossing diagonals spanning a square of side
/// `circle_radius` centered at `center`.
pub fn cross_outline(center: Point, circle_radius: f32, circle_border_width: f32) -> Outline {
    let half = circle_radius / 2.0;
    let mut builder = Path::builder();
    builder.begin(point(center.x - half, center.y + half));
    builder.line_to(point(center.x + half, center.y - half));
    builder.end(false);
    builder.begin(point(center.x + half, center.y + half));
    builder.line_to(point(center.x - half, center.y - half));
    builder.end(false);
    Outline {
        path: builder.build(),
        stroke_width: circle_border_width,
    }
}

/// Progress arc outline, sweeping clockwise from `-90°`.
///
/// The sweep is `360° × progress_fraction`. Fractions above 1.0 are expected
/// to be clamped by the caller; negative fractions pass through and produce a
/// visually reversed arc.
pub fn progress_arc_outline(
    center: Point,
    progress_radius: f32,
    border_width: f32,
    progress_fraction: f32,
) -> Outline {
    arc_outline(
        center,
        progress_radius,
        Angle::frac_pi_2() * -1.0,
        progress_arc_sweep(progress_fraction),
        border_width,
    )
}

/// Angular extent of the progress arc for a given fraction.
pub fn progress_arc_sweep(progress_fraction: f32) -> Angle {
    Angle::two_pi() * progress_fraction
}

fn arc_outline(
    center: Point,
    radius: f32,
    start_angle: Angle,
    sweep_angle: Angle,
    stroke_width: f32,
) -> Outline {
    let arc = Arc {
        center,
        radii: vector(radius, radius),
        start_angle,
        sweep_angle,
        x_rotation: Angle::zero(),
    };
    let mut builder = Path::builder();
    builder.begin(arc.from());
    if sweep_angle.radians.abs() > f32::EPSILON {
        arc.for_each_quadratic_bezier(&mut |segment| {
            builder.quadratic_bezier_to(segment.ctrl, segment.to);
        });
    }
    builder.end(false);
    Outline {
        path: builder.build(),
        stroke_width,
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use lyon_path::Event;

    use super::*;

    const EPS: f32 = 1e-3;

    fn endpoints(outline: &Outline) -> (Point, Point) {
        let mut first = None;
        let mut last = None;
        for event in outline.path.iter() {
            match event {
                Event::Begin { at } => {
                    first.get_or_insert(at);
                    last = Some(at);
                }
                Event::Line { to, .. }
                | Event::Quadratic { to, .. }
                | Event::Cubic { to, .. } => last = Some(to),
                Event::End { .. } => {}
            }
        }
        (first.unwrap(), last.unwrap())
    }

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).length() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn within(bounds: &Box2D, p: Point) -> bool {
        p.x >= bounds.min.x - EPS
            && p.x <= bounds.max.x + EPS
            && p.y >= bounds.min.y - EPS
            && p.y <= bounds.max.y + EPS
    }

    #[test]
    fn default_outline_is_closed_and_within_bounds() {
        let bounds = Box2D::new(point(0.0, 0.0), point(120.0, 44.0));
        let outline = default_outline(&bounds, 5.0, 3.0);

        let mut closed = false;
        for event in outline.path.iter() {
            match event {
                Event::Begin { at } => assert!(within(&bounds, at)),
                Event::Line { to, .. } => assert!(within(&bounds, to)),
                Event::Quadratic { ctrl, to, .. } => {
                    assert!(within(&bounds, ctrl));
                    assert!(within(&bounds, to));
                }
                Event::Cubic {
                    ctrl1, ctrl2, to, ..
                } => {
                    assert!(within(&bounds, ctrl1));
                    assert!(within(&bounds, ctrl2));
                    assert!(within(&bounds, to));
                }
                Event::End { close, .. } => closed |= close,
            }
        }
        assert!(closed, "default outline must be a closed path");
        assert_eq!(outline.stroke_width, 3.0);
    }

    #[test]
    fn progress_arc_sweep_is_proportional() {
        assert!((progress_arc_sweep(0.0).radians).abs() < EPS);
        assert!((progress_arc_sweep(0.5).radians - TAU / 2.0).abs() < EPS);
        assert!((progress_arc_sweep(1.0).radians - TAU).abs() < EPS);
    }

    #[test]
    fn progress_arc_starts_at_minus_ninety_degrees() {
        let center = point(50.0, 50.0);
        let outline = progress_arc_outline(center, 17.0, 3.0, 0.25);
        let (start, end) = endpoints(&outline);
        assert_close(start, point(50.0, 33.0));
        assert_close(end, point(67.0, 50.0));
    }

    #[test]
    fn progress_arc_is_degenerate_at_zero() {
        let center = point(10.0, 10.0);
        let outline = progress_arc_outline(center, 17.0, 3.0, 0.0);
        let (start, end) = endpoints(&outline);
        assert_close(start, end);
    }

    #[test]
    fn progress_arc_is_full_circle_at_one() {
        let center = point(10.0, 10.0);
        let outline = progress_arc_outline(center, 17.0, 3.0, 1.0);
        let (start, end) = endpoints(&outline);
        assert_close(start, point(10.0, -7.0));
        assert_close(end, start);
    }

    // Pins the unclamped-below-zero behavior: a negative fraction sweeps the
    // arc the other way around. Changing this to a clamp must change this
    // test.
    #[test]
    fn reversed_arc_for_negative_fraction() {
        let center = point(50.0, 50.0);
        let outline = progress_arc_outline(center, 17.0, 3.0, -0.25);
        let (_, end) = endpoints(&outline);
        assert_close(end, point(33.0, 50.0));
    }

    #[test]
    fn progressing_outline_leaves_the_cut_gap() {
        let center = point(40.0, 40.0);
        let radius = 20.0;
        let outline = progressing_outline(center, radius, 3.0, 90.0);
        let (start, end) = endpoints(&outline);
        // 90 degrees in screen coordinates is straight down from the center.
        assert_close(start, point(40.0, 60.0));
        assert_close(end, point(60.0, 40.0));

        // A zero cut angle closes the gap entirely.
        let full = progressing_outline(center, radius, 3.0, 0.0);
        let (full_start, full_end) = endpoints(&full);
        assert_close(full_start, full_end);
    }

    #[test]
    fn cross_outline_spans_the_glyph_square() {
        let center = point(30.0, 30.0);
        let outline = cross_outline(center, 20.0, 3.0);
        let mut begins = Vec::new();
        let mut ends = Vec::new();
        for event in outline.path.iter() {
            match event {
                Event::Begin { at } => begins.push(at),
                Event::Line { to, .. } => ends.push(to),
                _ => {}
            }
        }
        assert_eq!(begins.len(), 2);
        assert_close(begins[0], point(20.0, 40.0));
        assert_close(ends[0], point(40.0, 20.0));
        assert_close(begins[1], point(40.0, 40.0));
        assert_close(ends[1], point(20.0, 20.0));
    }

    #[test]
    fn shifted_center_offsets_the_midpoint() {
        let bounds = Box2D::new(point(0.0, 0.0), point(100.0, 40.0));
        let center = shifted_center(&bounds, vector(0.0, -6.0));
        assert_close(center, point(50.0, 14.0));
    }

    #[test]
    fn transition_rounded_outline_fits_the_circle_box() {
        let center = point(50.0, 25.0);
        let radius = 20.0;
        let outline = transition_rounded_outline(center, radius, 3.0);
        let circle_box = Box2D::new(
            point(center.x - radius, center.y - radius),
            point(center.x + radius, center.y + radius),
        );
        for event in outline.path.iter() {
            if let Event::Line { to, .. } | Event::Quadratic { to, .. } = event {
                assert!(within(&circle_box, to));
            }
        }
    }
}
