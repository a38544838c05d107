//! Reversible hiding of host-owned foreground content.
//!
//! ## Usage
//!
//! The host exposes its label opacity and per-interaction-state images
//! through [`ContentStore`]. [`ContentVisibility`] captures images into
//! transient slots while content is hidden and restores them when shown
//! again. Hiding is idempotent: a second hide never overwrites an already
//! captured slot.

/// Interaction states the host keeps separate images for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// Resting state.
    Normal,
    /// Pressed/hovered state.
    Highlighted,
    /// Disabled state.
    Disabled,
}

impl InteractionKind {
    /// All interaction states, in slot order.
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Normal,
        InteractionKind::Highlighted,
        InteractionKind::Disabled,
    ];

    fn slot(self) -> usize {
        match self {
            InteractionKind::Normal => 0,
            InteractionKind::Highlighted => 1,
            InteractionKind::Disabled => 2,
        }
    }
}

/// Opaque handle to a host-owned image.
///
/// The placeholder is an empty stand-in substituted for real images while
/// content is hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentImage {
    /// The empty stand-in shown while content is hidden.
    Placeholder,
    /// A host image identified by an opaque id.
    Handle(u64),
}

/// Host-side store for foreground content.
///
/// The label and images stay owned by the host; the button only reads and
/// writes through these accessors.
pub trait ContentStore {
    /// The image currently set for an interaction state.
    fn image_for(&self, kind: InteractionKind) -> Option<ContentImage>;
    /// Replaces the image for an interaction state.
    fn set_image(&mut self, kind: InteractionKind, image: Option<ContentImage>);
    /// Current label opacity.
    fn label_opacity(&self) -> f32;
    /// Sets the label opacity.
    fn set_label_opacity(&mut self, opacity: f32);
}

/// Captures and restores foreground images around state transitions.
#[derive(Clone, Debug, Default)]
pub struct ContentVisibility {
    saved: [Option<ContentImage>; 3],
}

impl ContentVisibility {
    /// Creates a manager with all slots unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hides foreground content, substituting the placeholder image.
    ///
    /// A slot is only captured when it is currently unset, so calling hide
    /// twice without an intervening show keeps the original capture.
    pub fn hide(&mut self, store: &mut dyn ContentStore) {
        for kind in InteractionKind::ALL {
            let slot = kind.slot();
            if self.saved[slot].is_none() {
                self.saved[slot] = store.image_for(kind);
            }
            store.set_image(kind, Some(ContentImage::Placeholder));
        }
    }

    /// Restores every captured image and clears its slot.
    ///
    /// Slots that held no image before hiding keep the placeholder.
    pub fn show(&mut self, store: &mut dyn ContentStore) {
        for kind in InteractionKind::ALL {
            if let Some(image) = self.saved[kind.slot()].take() {
                store.set_image(kind, Some(image));
            }
        }
    }
}
