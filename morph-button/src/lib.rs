//! Animated two-phase progress button, modeled as a renderer-agnostic state
//! machine.
//!
//! The button has two visual states: a rounded-rectangle border around the
//! host's content, and a rotating cut circle with a cross glyph shown while a
//! task runs. Transitions between them are two-step shape morphs; while
//! progressing, an optional arc overlay reflects a fractional progress value.
//!
//! Nothing here renders. The crate produces [`geometry::Outline`] paths and
//! keyed animation segments on three persistent [`layer::ShapeLayer`]s; the
//! host samples them with its own clock and draws them with whatever it
//! draws with.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use morph_button::{ButtonStyle, MorphButton, VisualState};
//!
//! let mut button = MorphButton::new(&ButtonStyle::default(), bounds, &mut store)?;
//! button.set_state(VisualState::Progressing, now(), &mut store);
//! button.set_progress(Some(0.4), now());
//! // ... render loop samples button.border_layer() etc. ...
//! button.set_state(VisualState::Default, now(), &mut store);
//! button.poll(now(), &mut store);
//! ```
//!
//! Time is pushed in, never read: every mutating call takes `now` in seconds
//! on the host's monotonic clock, which keeps the whole state machine
//! deterministic and testable.

#![deny(missing_docs)]

pub mod button;
pub mod color;
pub mod content;
pub mod geometry;
pub mod layer;
pub mod style;
pub mod timeline;

pub use button::{MorphButton, Transition, VisualState};
pub use color::Color;
pub use content::{ContentImage, ContentStore, InteractionKind};
pub use style::{ButtonStyle, MorphButtonDefaults, ResolvedStyle, StyleError};
pub use timeline::MediaTime;
