//! Deterministic rendering of a [`VisualSchema`].
//!
//! A [`Renderer`] turns a schema and a frame index into [`DrawCommands`].
//! Rendering is a pure function of its inputs: the same schema and frame
//! always produce the same commands, and the schema is never modified.

pub mod animation;
pub mod backend;
pub mod commands;
pub mod noise;
pub mod silhouette;

use crate::schema::VisualSchema;
use std::time::Duration;

pub use commands::{DrawCommand, DrawCommands};
pub use silhouette::SilhouetteRenderer;

/// Fastest redraw interval, reached at full motion.
pub const MIN_FRAME_DELAY_MS: f64 = 600.0;

/// Redraw interval at the smallest non-zero motion.
pub const BASE_FRAME_DELAY_MS: f64 = 2000.0;

/// Trait for all renderers.
pub trait Renderer {
    /// Name of this renderer.
    fn name(&self) -> &'static str;

    /// Draw frame `frame` of `schema`. Frame 0 is the still image.
    fn render(&self, schema: &VisualSchema, frame: u64) -> DrawCommands;
}

/// One frame of a schema, borrowed for the duration of a draw.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub schema: &'a VisualSchema,
    pub index: u64,
}

impl<'a> RenderFrame<'a> {
    pub fn new(schema: &'a VisualSchema, index: u64) -> Self {
        Self { schema, index }
    }

    pub fn draw(&self, renderer: &impl Renderer) -> DrawCommands {
        renderer.render(self.schema, self.index)
    }

    /// The frame after this one, or `None` when the schema is still.
    pub fn next(&self) -> Option<RenderFrame<'a>> {
        frame_delay(self.schema.motion).map(|_| Self::new(self.schema, self.index + 1))
    }
}

/// Delay between redraws for a motion knob value, or `None` for a still
/// image.
pub fn frame_delay(motion: f64) -> Option<Duration> {
    if motion <= 0.0 || motion.is_nan() {
        return None;
    }
    let motion = motion.min(1.0);
    let ms = (BASE_FRAME_DELAY_MS - 1400.0 * motion).max(MIN_FRAME_DELAY_MS);
    Some(Duration::from_millis(ms.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_frames_have_no_successor() {
        let schema = VisualSchema::default();
        assert!(RenderFrame::new(&schema, 0).next().is_none());

        let moving = VisualSchema {
            motion: 0.3,
            ..VisualSchema::default()
        };
        let next = RenderFrame::new(&moving, 4).next().unwrap();
        assert_eq!(next.index, 5);
    }

    #[test]
    fn still_images_have_no_delay() {
        assert_eq!(frame_delay(0.0), None);
        assert_eq!(frame_delay(-1.0), None);
        assert_eq!(frame_delay(f64::NAN), None);
    }

    #[test]
    fn delay_shrinks_with_motion() {
        assert_eq!(frame_delay(0.5), Some(Duration::from_millis(1300)));
        assert_eq!(frame_delay(1.0), Some(Duration::from_millis(600)));
        assert_eq!(frame_delay(3.0), Some(Duration::from_millis(600)));
        assert!(frame_delay(0.05).unwrap() > frame_delay(0.95).unwrap());
    }
}
