//! Drives a button through a full task lifecycle with a scripted clock and
//! logs what a renderer would sample at each step.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example lifecycle
//! ```

use lyon_path::math::{Box2D, point};
use morph_button::{
    ButtonStyle, Color, ContentImage, ContentStore, InteractionKind, MorphButton, VisualState,
    button::{PROGRESS_UPDATE_KEY, ROTATION_KEY},
    timeline::Segment,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Host-side content: one image per interaction state plus a label opacity.
struct DemoContent {
    images: [Option<ContentImage>; 3],
    label_opacity: f32,
}

impl DemoContent {
    fn new() -> Self {
        Self {
            images: [Some(ContentImage::Handle(7)), None, None],
            label_opacity: 1.0,
        }
    }

    fn slot(kind: InteractionKind) -> usize {
        match kind {
            InteractionKind::Normal => 0,
            InteractionKind::Highlighted => 1,
            InteractionKind::Disabled => 2,
        }
    }
}

impl ContentStore for DemoContent {
    fn image_for(&self, kind: InteractionKind) -> Option<ContentImage> {
        self.images[Self::slot(kind)].clone()
    }

    fn set_image(&mut self, kind: InteractionKind, image: Option<ContentImage>) {
        self.images[Self::slot(kind)] = image;
    }

    fn label_opacity(&self) -> f32 {
        self.label_opacity
    }

    fn set_label_opacity(&mut self, opacity: f32) {
        self.label_opacity = opacity;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut content = DemoContent::new();
    let bounds = Box2D::new(point(0.0, 0.0), point(160.0, 44.0));
    let style = ButtonStyle::default()
        .circle_background_color(Color::WHITE.with_alpha(0.92));
    let mut button = MorphButton::new(&style, bounds, &mut content)?;
    info!(state = ?button.state(), "button created");

    // t = 0.0s: the task starts.
    button.set_state(VisualState::Progressing, 0.0, &mut content);
    info!(
        label_opacity = content.label_opacity(),
        cross_hidden = button.cross_layer().hidden,
        "entered progressing state"
    );

    // The task reports progress every half second.
    for (now, fraction) in [(0.5, 0.25), (1.0, 0.5), (1.5, 0.8), (2.0, 1.0)] {
        button.set_progress(Some(fraction), now);
        if let Some(morph) = button
            .progress_layer()
            .animation(PROGRESS_UPDATE_KEY)
            .and_then(Segment::as_path_morph)
        {
            info!(now, fraction, begin = morph.begin_time, "overlay update");
        }
    }

    // t = 2.2s..2.7s: the app goes to the background and comes back; the
    // rotation resumes at the exact phase it was frozen at.
    button.suspend(2.2);
    let frozen = button.border_layer().convert_time(2.7);
    button.resume(2.7);
    if let Some(rotation) = button
        .border_layer()
        .animation(ROTATION_KEY)
        .and_then(Segment::as_rotation)
    {
        info!(
            frozen_local_time = frozen,
            frozen_angle = rotation.angle_at(frozen).radians,
            "suspended and resumed"
        );
    }

    // t = 3.0s: the task finishes and the button returns to default.
    button.set_progress(None, 3.0);
    button.set_state(VisualState::Default, 3.0, &mut content);
    info!(restore_at = button.pending_content_restore(), "returning");

    // The render loop keeps polling; the content comes back once the label
    // fade has run its course.
    let mut now = 3.0;
    while button.pending_content_restore().is_some() {
        now += 0.1;
        if button.poll(now, &mut content) {
            info!(
                now,
                label_opacity = content.label_opacity(),
                image = ?content.image_for(InteractionKind::Normal),
                "content restored"
            );
        }
    }

    Ok(())
}
