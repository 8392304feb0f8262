use reverie::render::{frame_delay, DrawCommand};
use reverie::{
    generate, Knobs, PromptBackend, RawMemoryInput, Renderer, RenderingBackend,
    SilhouetteRenderer, SvgBackend, VisualSchema,
};
use std::time::Duration;

fn renderer() -> SilhouetteRenderer {
    SilhouetteRenderer::new(245, 245)
}

#[test]
fn rendering_is_idempotent_and_leaves_schema_untouched() {
    let schema = generate(&RawMemoryInput::from_text(
        "Night at the beach with friends, waves and stars",
    ));
    let before = schema.clone();

    let first = renderer().render(&schema, 0);
    let second = renderer().render(&schema, 0);
    assert_eq!(first, second);
    assert_eq!(first.to_svg(), second.to_svg());
    assert_eq!(schema, before);
}

#[test]
fn a_saved_record_renders_identically() {
    let schema = generate(&RawMemoryInput::from_text("Our old school album"));
    let record = schema.to_json().unwrap();
    let restored = VisualSchema::from_json(&record).unwrap();
    assert_eq!(
        renderer().render(&schema, 0).fingerprint(),
        renderer().render(&restored, 0).fingerprint()
    );
}

#[test]
fn motion_zero_is_a_single_frame() {
    let schema = generate(&RawMemoryInput::from_text("coffee at dawn"));
    assert!(schema.is_still());
    assert_eq!(frame_delay(schema.motion), None);
    assert_eq!(renderer().render(&schema, 0), renderer().render(&schema, 5));
}

#[test]
fn motion_sets_frame_cadence() {
    let input = RawMemoryInput::new("coffee at dawn", Knobs::default().with_motion(0.25));
    let schema = generate(&input);
    assert_eq!(frame_delay(schema.motion), Some(Duration::from_millis(1650)));
    assert_ne!(renderer().render(&schema, 0), renderer().render(&schema, 1));
}

#[test]
fn malformed_record_renders_with_defaults() {
    let record = r##"{
        "seed": 99,
        "palette": ["not-a-colour", "#fff"],
        "fragments": [],
        "valence": "NaN-ish",
        "brightness": -2
    }"##;
    // Wrong types are rejected outright.
    assert!(VisualSchema::from_json(record).is_err());

    let record = r##"{"seed":99,"palette":["bogus","#fff"],"fragments":[],"brightness":-2}"##;
    let schema = VisualSchema::from_json(record).unwrap();
    let commands = renderer().render(&schema, 0);
    assert!(!commands.is_empty());
    let words: Vec<&str> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert!(words.contains(&"memory"));
    assert!(commands.to_svg().contains("#0f1013"));
}

#[test]
fn svg_output_is_well_formed() {
    let schema = generate(&RawMemoryInput::from_text("Tom & Jerry's <party>"));
    let svg = SvgBackend::new(245, 245).render_image(&schema, 0).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("Tom &amp; Jerry&apos;s &lt;party&gt;"));
    assert!(!svg.contains("<party>"));
}

#[test]
fn prompt_is_deterministic() {
    let schema = generate(&RawMemoryInput::from_text("Waves on the shore at sunset"));
    let a = PromptBackend.render_image(&schema, 0).unwrap();
    let b = PromptBackend.render_image(&schema.clone(), 3).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("beach scene around a glowing shell motif"));
}

#[test]
fn canvas_size_scales_output() {
    let schema = VisualSchema::default();
    let small = SilhouetteRenderer::new(200, 200).render(&schema, 0);
    let large = SilhouetteRenderer::new(400, 400).render(&schema, 0);
    assert_eq!((small.width, small.height), (200, 200));
    assert_eq!((large.width, large.height), (400, 400));
    assert!(large.len() > small.len());
}
