//! Text to schema: the whole scoring pipeline behind one call.

use crate::features::{BoundaryMode, Scorer};
use crate::fragments;
use crate::input::RawMemoryInput;
use crate::scenario;
use crate::schema::VisualSchema;

/// Runs scoring, classification, seeding and fragment extraction, then
/// assembles the schema. Pure: equal inputs give equal schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryPipeline {
    scorer: Scorer,
}

impl MemoryPipeline {
    pub fn new(boundary: BoundaryMode) -> Self {
        Self {
            scorer: Scorer::new(boundary),
        }
    }

    pub fn generate(&self, input: &RawMemoryInput) -> VisualSchema {
        let story = input.story();
        let raw = self.scorer.raw_features(story);
        let scores = raw.normalized();
        let classification = scenario::classify(story);
        let seed = input.to_seed();

        tracing::debug!(
            seed,
            ?raw,
            scenario = ?classification.primary,
            symbol = %classification.symbol,
            "scored memory"
        );

        VisualSchema::assemble(
            scores,
            classification,
            seed,
            fragments::extract(story),
            input.knobs(),
            story,
        )
    }
}

/// Generate a schema with the default pipeline.
pub fn generate(input: &RawMemoryInput) -> VisualSchema {
    MemoryPipeline::default().generate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Knobs;
    use crate::scenario::{ScenarioTag, SymbolId};

    #[test]
    fn knobs_flow_into_schema_but_not_scores() {
        let still = generate(&RawMemoryInput::from_text("a happy day at the beach"));
        let input = RawMemoryInput::new("a happy day at the beach", Knobs::new(0.5, 1.0, 0.6));
        let moving = generate(&input);

        assert_eq!(moving.motion, 0.5);
        assert_eq!(moving.smoke_density, 1.0);
        assert_eq!(moving.brightness, 0.6);
        assert_eq!(moving.scores, still.scores);
        assert_ne!(moving.seed, still.seed);
    }

    #[test]
    fn boundary_mode_changes_punctuated_matches() {
        let input = RawMemoryInput::from_text("It was my birthday.");
        let punctuation = MemoryPipeline::new(BoundaryMode::Punctuation).generate(&input);
        let legacy = MemoryPipeline::new(BoundaryMode::SpacePadded).generate(&input);

        assert!(punctuation.scores.valence > 0.0);
        assert_eq!(legacy.scores.valence, 0.0);
        // Classification uses substring matching either way.
        assert_eq!(legacy.scenario, Some(ScenarioTag::Birthday));
        assert_eq!(legacy.symbol, SymbolId::Cake);
    }

    #[test]
    fn surrounding_whitespace_is_not_part_of_the_story() {
        let a = generate(&RawMemoryInput::from_text("  rain at night \n"));
        let b = generate(&RawMemoryInput::from_text("rain at night"));
        assert_eq!(a, b);
        assert_eq!(a.story, "rain at night");
    }
}
