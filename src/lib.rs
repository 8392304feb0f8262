//! Reverie - deterministic visuals from short memories.
//!
//! A free-text memory is scored on four emotion axes (valence, arousal,
//! social, nostalgia), classified into a scenario, and folded into an
//! immutable [`VisualSchema`] with a seed derived from the text. A seeded
//! renderer turns the schema into smoke-silhouette artwork: same text and
//! knobs, same picture.
//!
//! ```no_run
//! use reverie::{generate, RawMemoryInput, Renderer, SilhouetteRenderer};
//!
//! let schema = generate(&RawMemoryInput::from_text("Rain on the window at night"));
//! let svg = SilhouetteRenderer::default().render(&schema, 0).to_svg();
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod fragments;
pub mod input;
pub mod lexicon;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod scenario;
pub mod schema;
pub mod seed;

pub use config::ReverieConfig;
pub use error::{Error, Result};
pub use features::{AxisScores, BoundaryMode, RawFeatures, Scorer};
pub use input::{Knobs, RawMemoryInput};
pub use palette::{Palette, Rgb};
pub use pipeline::{generate, MemoryPipeline};
pub use render::backend::{PromptBackend, RenderingBackend, SvgBackend};
pub use render::{DrawCommands, Renderer, SilhouetteRenderer};
pub use scenario::{ScenarioTag, ScenarioTags, SymbolId};
pub use schema::{Scene, VisualSchema};
