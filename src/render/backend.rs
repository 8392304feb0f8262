//! Rendering backends - each turns a schema into a different output file.

use crate::error::Result;
use crate::palette::Palette;
use crate::render::{RenderFrame, SilhouetteRenderer};
use crate::schema::{Scene, VisualSchema};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for all rendering backends.
pub trait RenderingBackend {
    /// Name of this backend.
    fn name(&self) -> &'static str;

    /// File extension for this backend's output.
    fn extension(&self) -> &'static str;

    /// Produce the output for one frame of `schema`.
    fn render_image(&self, schema: &VisualSchema, frame: u64) -> Result<String>;

    /// Render and write to `directory`, creating it if needed. Returns the
    /// written path, named after the seed and frame.
    fn save(&self, schema: &VisualSchema, frame: u64, directory: &Path) -> Result<PathBuf> {
        let output = self.render_image(schema, frame)?;
        fs::create_dir_all(directory)?;
        let path = directory.join(format!(
            "reverie_{}_{:04}.{}",
            schema.seed,
            frame,
            self.extension()
        ));
        fs::write(&path, output)?;
        tracing::debug!(backend = self.name(), path = %path.display(), "saved frame");
        Ok(path)
    }
}

/// SVG output from the silhouette renderer.
#[derive(Default)]
pub struct SvgBackend {
    renderer: SilhouetteRenderer,
}

impl SvgBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: SilhouetteRenderer::new(width, height),
        }
    }
}

impl RenderingBackend for SvgBackend {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render_image(&self, schema: &VisualSchema, frame: u64) -> Result<String> {
        Ok(RenderFrame::new(schema, frame).draw(&self.renderer).to_svg())
    }
}

/// Text prompt describing the schema for an external image model.
///
/// The prompt depends only on the schema, so it is the same for every
/// frame and carries the seed for models that accept one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBackend;

impl PromptBackend {
    fn mood(schema: &VisualSchema) -> &'static str {
        let s = &schema.scores;
        match (s.valence, s.arousal) {
            (v, a) if v > 0.3 && a > 0.5 => "joyful and lively",
            (v, _) if v > 0.3 => "warm and gentle",
            (v, a) if v < -0.3 && a > 0.5 => "tense and restless",
            (v, _) if v < -0.3 => "heavy and subdued",
            _ => "quiet and contemplative",
        }
    }

    fn palette(palette: &Palette) -> String {
        let [background, primary, secondary] = palette.colors();
        format!("{} on a {} ground, accents of {}", primary, background, secondary)
    }
}

impl RenderingBackend for PromptBackend {
    fn name(&self) -> &'static str {
        "prompt"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render_image(&self, schema: &VisualSchema, _frame: u64) -> Result<String> {
        let schema = schema.sanitized();
        let mut prompt = String::from("Abstract smoke-silhouette artwork of a remembered moment");

        let figures = match schema.scene {
            Scene::Group => "a loose group of figures dissolving into smoke",
            Scene::Portrait => "a single figure dissolving into smoke",
        };
        let _ = write!(prompt, ", {}", figures);

        if let Some(scenario) = schema.scenario {
            let _ = write!(
                prompt,
                ", {} scene around a glowing {} motif",
                scenario, schema.symbol
            );
        } else {
            let _ = write!(prompt, ", around a glowing core");
        }

        let others: Vec<&str> = schema
            .scenario_tags
            .iter()
            .filter(|tag| Some(*tag) != schema.scenario)
            .map(|tag| tag.name())
            .collect();
        if !others.is_empty() {
            let _ = write!(prompt, ", hints of {}", others.join(" and "));
        }

        let _ = write!(
            prompt,
            ". Mood: {}. Palette: {}.",
            Self::mood(&schema),
            Self::palette(&schema.palette)
        );
        let _ = write!(
            prompt,
            " Smoke density {:.2}, brightness {:.2}",
            schema.smoke_density, schema.brightness
        );
        if !schema.is_still() {
            let _ = write!(prompt, ", slow drifting motion {:.2}", schema.motion);
        }
        let _ = write!(
            prompt,
            ". Floating words: {}. Seed {}.",
            schema.fragments.join(", "),
            schema.seed
        );
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawMemoryInput;
    use crate::pipeline::generate;

    #[test]
    fn svg_backend_is_deterministic() {
        let schema = generate(&RawMemoryInput::from_text("sunset at the beach"));
        let backend = SvgBackend::new(200, 200);
        let a = backend.render_image(&schema, 0).unwrap();
        assert_eq!(a, backend.render_image(&schema, 0).unwrap());
        assert!(a.contains(r#"width="200""#));
    }

    #[test]
    fn prompt_names_scenario_and_seed() {
        let schema = generate(&RawMemoryInput::from_text(
            "Birthday cake in the rain with my family",
        ));
        let prompt = PromptBackend.render_image(&schema, 0).unwrap();
        assert!(prompt.contains("birthday scene around a glowing cake motif"));
        assert!(prompt.contains("hints of rain"));
        assert!(prompt.contains(&format!("Seed {}.", schema.seed)));
        assert!(!prompt.contains("motion"));
    }

    #[test]
    fn prompt_ignores_frame() {
        let schema = VisualSchema::default();
        assert_eq!(
            PromptBackend.render_image(&schema, 0).unwrap(),
            PromptBackend.render_image(&schema, 9).unwrap()
        );
    }

    #[test]
    fn save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = VisualSchema::default();
        let path = PromptBackend.save(&schema, 3, dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("reverie_{}_0003.txt", schema.seed)
        );
        assert!(fs::read_to_string(path).unwrap().starts_with("Abstract"));
    }
}
