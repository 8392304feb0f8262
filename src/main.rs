//! Reverie CLI - Turn a short memory into a deterministic smoke-silhouette image.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use reverie::config::ReverieConfig;
use reverie::render::animation;
use reverie::{
    MemoryPipeline, PromptBackend, RawMemoryInput, RenderingBackend, SvgBackend, VisualSchema,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reverie")]
#[command(about = "Generate smoke-silhouette art from a short memory")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "reverie.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Memory text and the three knobs.
#[derive(clap::Args)]
struct MemoryArgs {
    /// The memory, in a sentence or two
    #[arg(short, long)]
    text: String,

    /// Motion, 0.0 (still) to 1.0
    #[arg(short, long)]
    motion: Option<f64>,

    /// Smoke density, 0.2 to 1.2
    #[arg(short, long)]
    smoke: Option<f64>,

    /// Brightness, 0.2 to 1.3
    #[arg(short, long)]
    brightness: Option<f64>,
}

impl MemoryArgs {
    fn to_input(&self, config: &ReverieConfig) -> RawMemoryInput {
        let knobs = config
            .knobs
            .resolve(self.motion, self.smoke, self.brightness);
        RawMemoryInput::new(self.text.clone(), knobs)
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate an image from a memory
    Generate {
        #[command(flatten)]
        memory: MemoryArgs,

        /// Output backend
        #[arg(long, value_enum, default_value = "svg")]
        backend: BackendArg,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the output, at most 4096
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output, at most 4096
        #[arg(long)]
        height: Option<u32>,

        /// Also save the schema as JSON
        #[arg(long)]
        save_schema: bool,
    },

    /// Print the visual schema of a memory as JSON
    Schema {
        #[command(flatten)]
        memory: MemoryArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render a saved schema JSON record
    Render {
        /// Schema JSON file
        schema: PathBuf,

        /// Frame index
        #[arg(short, long, default_value = "0")]
        frame: u64,

        /// Output backend
        #[arg(long, value_enum, default_value = "svg")]
        backend: BackendArg,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width of the output, at most 4096
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output, at most 4096
        #[arg(long)]
        height: Option<u32>,
    },

    /// Render successive frames of a moving memory
    Animate {
        #[command(flatten)]
        memory: MemoryArgs,

        /// Number of frames to write
        #[arg(short, long)]
        frames: Option<u64>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Width of the output, at most 4096
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output, at most 4096
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print the text prompt for an external image model
    Prompt {
        #[command(flatten)]
        memory: MemoryArgs,
    },

    /// Render one sample memory per scenario for comparison
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Width of the output, at most 4096
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output, at most 4096
        #[arg(long)]
        height: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum BackendArg {
    /// SVG artwork
    Svg,
    /// Text prompt for an image model
    Prompt,
}

impl BackendArg {
    fn backend(self, width: u32, height: u32) -> Box<dyn RenderingBackend> {
        match self {
            BackendArg::Svg => Box::new(SvgBackend::new(width, height)),
            BackendArg::Prompt => Box::new(PromptBackend),
        }
    }
}

/// One sample story per scenario, plus one with no scenario at all.
const SHOWCASE: &[(&str, &str)] = &[
    (
        "birthday",
        "Yesterday was my birthday. I met childhood friends after years; we laughed, took photos, and shared cake.",
    ),
    ("beach", "A calm summer afternoon by the sea, warm sand and gentle waves."),
    ("rain", "Rain against the window while I waited alone, missing home."),
    ("travel", "The night train to the coast, a long journey with my brother."),
    ("school", "My old classroom, the smell of chalk and our teacher laughing."),
    ("loss", "The empty chair after the funeral, a quiet loss I still remember."),
    ("night", "Stars over the lake at midnight, the moon bright and still."),
    ("quiet", "A quiet afternoon with tea."),
];

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reverie=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = ReverieConfig::load(Path::new(&cli.config))?;
    let pipeline = MemoryPipeline::new(config.scoring.boundary);
    let output_dir = PathBuf::from(&config.output.directory);

    match cli.command {
        Commands::Generate {
            memory,
            backend,
            output,
            width,
            height,
            save_schema,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let save_schema = save_schema || config.output.save_schema;

            let schema = pipeline.generate(&memory.to_input(&config));
            let backend = backend.backend(width, height);
            println!(
                "Generating {} with seed {} ({} scene, {} symbol)...",
                backend.name(),
                schema.seed,
                schema.scene,
                schema.symbol
            );

            let result = backend.render_image(&schema, 0)?;
            let output_path = output.unwrap_or_else(|| {
                output_dir.join(format!("reverie_{}.{}", schema.seed, backend.extension()))
            });
            write_output(&output_path, &result)?;
            println!("Saved to {}", output_path.display());

            if save_schema {
                let schema_path = output_path.with_extension("json");
                write_output(&schema_path, &schema.to_json_pretty()?)?;
                println!("Saved schema to {}", schema_path.display());
            }
        }

        Commands::Schema { memory, pretty } => {
            let schema = pipeline.generate(&memory.to_input(&config));
            let json = if pretty {
                schema.to_json_pretty()?
            } else {
                schema.to_json()?
            };
            println!("{}", json);
        }

        Commands::Render {
            schema,
            frame,
            backend,
            output,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);

            let json = fs::read_to_string(&schema)
                .with_context(|| format!("reading {}", schema.display()))?;
            let schema = VisualSchema::from_json(&json)?;

            let backend = backend.backend(width, height);
            let output_path = match output {
                Some(path) => {
                    write_output(&path, &backend.render_image(&schema, frame)?)?;
                    path
                }
                None => backend.save(&schema, frame, &output_dir)?,
            };
            println!("Saved to {}", output_path.display());
        }

        Commands::Animate {
            memory,
            frames,
            output_dir: dir,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let frames = frames.unwrap_or(config.animation.frames);

            let schema = pipeline.generate(&memory.to_input(&config));
            let dir = dir.unwrap_or_else(|| output_dir.join(format!("anim_{}", schema.seed)));
            fs::create_dir_all(&dir)?;

            let still = schema.is_still();
            if still {
                println!("Motion is 0, rendering a single still frame");
            }
            println!("Animating seed {} into {}...", schema.seed, dir.display());

            let (tx, redraw) = animation::channel(SvgBackend::new(width, height), schema);
            // Nothing publishes new schemas here; a still loop ends once the
            // channel is closed.
            let tx = if still {
                drop(tx);
                None
            } else {
                Some(tx)
            };
            let written = redraw
                .run(
                    |frame| {
                        let path = dir.join(format!("frame_{:04}.svg", frame.index));
                        fs::write(&path, &frame.image)?;
                        println!("  Created {}", path.display());
                        Ok(())
                    },
                    Some(frames),
                )
                .await;
            drop(tx);
            println!("Done! {} frames", written?);
        }

        Commands::Prompt { memory } => {
            let schema = pipeline.generate(&memory.to_input(&config));
            println!("{}", PromptBackend.render_image(&schema, 0)?);
        }

        Commands::Showcase {
            output_dir: dir,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let dir = dir.unwrap_or_else(|| output_dir.join("showcase"));
            fs::create_dir_all(&dir)?;

            let backend = SvgBackend::new(width, height);
            for (label, story) in SHOWCASE {
                let schema = pipeline.generate(&RawMemoryInput::new(
                    *story,
                    config.knobs.resolve(None, None, None),
                ));
                let path = dir.join(format!("{}.svg", label));
                write_output(&path, &backend.render_image(&schema, 0)?)?;
                println!("  Created {} (seed {})", path.display(), schema.seed);
            }

            println!("Done! Showcase saved to {}", dir.display());
        }
    }

    Ok(())
}
