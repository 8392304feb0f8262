//! Smoke silhouette renderer.
//!
//! Draws a memory as stippled human silhouettes eroded by noise, layered
//! with data bands, a glowing kernel carrying the scenario symbol, radial
//! ticks, scenario overlays and floating keyword fragments.
//!
//! The schema drives everything:
//! - Scene decides between a row of figures and a single portrait
//! - Smoke density and nostalgia set how many points make up a figure
//! - Arousal widens the bands and the kernel
//! - Valence shifts the figure color and the fragment ring direction
//! - Motion turns the frame index into a slow "breathing" noise phase
//!
//! All randomness comes from a `StdRng` seeded with the schema seed and
//! re-created on every call, so a `(schema, frame)` pair always yields the
//! same commands.

use crate::features::AxisScores;
use crate::palette::Rgb;
use crate::render::commands::{BlendMode, Color, DrawCommand, DrawCommands, Paint, Stroke};
use crate::render::noise::ValueNoise;
use crate::render::Renderer;
use crate::scenario::{ScenarioTags, SymbolId};
use crate::schema::{Scene, VisualSchema};
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Layout reference size; lengths below are in units of this canvas.
const REFERENCE_SIZE: f64 = 980.0;

/// Height of the caption strip at the bottom, in reference units.
const FOOTER: f64 = 56.0;

/// Noise phase advanced per frame at full motion.
const BREATH_RATE: f64 = 0.08;

/// Story characters shown in the caption.
const CAPTION_CHARS: usize = 92;

/// Largest canvas side; stipple work grows with the square of the size.
pub const MAX_CANVAS: u32 = 4096;

pub struct SilhouetteRenderer {
    width: u32,
    height: u32,
}

impl Default for SilhouetteRenderer {
    fn default() -> Self {
        Self {
            width: 980,
            height: 980,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Area {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Everything one frame needs, resolved from a sanitized schema.
struct FrameContext<'a> {
    inner: Area,
    scale: f64,
    phase: f64,
    background: Rgb,
    primary: Rgb,
    secondary: Rgb,
    scores: AxisScores,
    smoke: f64,
    brightness: f64,
    scene: Scene,
    symbol: SymbolId,
    tags: ScenarioTags,
    fragments: &'a [String],
    story: &'a str,
    seed: u32,
}

impl FrameContext<'_> {
    fn blend(&self, t: f64) -> Rgb {
        self.primary.lerp(self.secondary, t)
    }

    /// Kernel center.
    fn kernel(&self) -> (f64, f64) {
        let s = &self.scores;
        (
            self.inner.x + self.inner.w * (0.42 + 0.22 * s.social),
            self.inner.y + self.inner.h * (0.50 + 0.14 * (s.nostalgia - 0.5)),
        )
    }

    fn kernel_radius(&self) -> f64 {
        self.inner.w.min(self.inner.h) * (0.10 + 0.06 * self.scores.arousal)
    }
}

/// A figure's placement.
struct Anchor {
    x: f64,
    y: f64,
    scale: f64,
}

impl SilhouetteRenderer {
    /// Renderer for a `width` x `height` canvas. Each side is clamped to
    /// `1..=MAX_CANVAS`.
    pub fn new(width: u32, height: u32) -> Self {
        let fit = |side: u32| side.clamp(1, MAX_CANVAS);
        if fit(width) != width || fit(height) != height {
            tracing::warn!(
                width,
                height,
                max = MAX_CANVAS,
                "canvas size out of range, clamping"
            );
        }
        Self {
            width: fit(width),
            height: fit(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scale factor relative to the reference canvas.
    fn scale(&self) -> f64 {
        (self.width.min(self.height) as f64 / REFERENCE_SIZE).max(0.01)
    }

    fn context<'a>(&self, schema: &'a VisualSchema, frame: u64) -> FrameContext<'a> {
        let scale = self.scale();
        let footer = FOOTER * scale;
        let inner = Area {
            x: 0.0,
            y: 0.0,
            w: self.width as f64,
            h: (self.height as f64 - footer).max(1.0),
        };
        let phase = if schema.is_still() {
            0.0
        } else {
            frame as f64 * schema.motion * BREATH_RATE
        };

        FrameContext {
            inner,
            scale,
            phase,
            background: schema.palette.background,
            primary: schema.palette.primary,
            secondary: schema.palette.secondary,
            scores: schema.scores,
            smoke: schema.smoke_density,
            brightness: schema.brightness,
            scene: schema.scene,
            symbol: schema.symbol,
            tags: schema.scenario_tags,
            fragments: &schema.fragments,
            story: &schema.story,
            seed: schema.seed,
        }
    }

    /// Background plate with a vertical gradient.
    fn background(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let inner = ctx.inner;
        out.push(DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: self.width as f64,
            height: self.height as f64,
            corner: 0.0,
            paint: Paint::fill(Color::opaque(ctx.background)),
        });

        let top = Rgb::new(12, 12, 16);
        let bottom = Rgb::new(22, 22, 28);
        let steps = 32;
        let band = inner.h / steps as f64;
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            out.push(DrawCommand::Rect {
                x: inner.x,
                y: inner.y + band * i as f64,
                width: inner.w,
                height: band + 0.5,
                corner: 0.0,
                paint: Paint::fill(Color::new(top.lerp(bottom, t), 0.85)),
            });
        }
    }

    fn anchors(&self, ctx: &FrameContext, noise: &ValueNoise) -> Vec<Anchor> {
        let inner = ctx.inner;
        let s = &ctx.scores;
        let n = |x: f64| noise.get(x, ctx.phase, 0.0);

        match ctx.scene {
            Scene::Group => {
                let actors = 5 + (6.0 * s.social).round() as usize;
                let base_y = inner.y + inner.h * 0.62;
                (0..actors)
                    .map(|i| {
                        let t = (i as f64 + 0.5) / actors as f64;
                        Anchor {
                            x: inner.x + inner.w * (0.12 + 0.76 * t + 0.02 * n(i as f64 * 0.7)),
                            y: base_y - 60.0 * ctx.scale * (t * PI).sin()
                                + 28.0 * ctx.scale * n(100.0 + i as f64),
                            scale: 0.95 + 0.6 * n(200.0 + i as f64),
                        }
                    })
                    .collect()
            }
            Scene::Portrait => vec![Anchor {
                x: inner.x + inner.w * (0.44 + 0.18 * n(11.0)),
                y: inner.y + inner.h * (0.50 + 0.06 * n(22.0)),
                scale: 1.2 + 0.4 * s.arousal,
            }],
        }
    }

    /// Stippled head-and-shoulders figures, eroded by noise.
    fn silhouettes(
        &self,
        ctx: &FrameContext,
        rng: &mut impl Rng,
        noise: &ValueNoise,
        out: &mut DrawCommands,
    ) {
        let s = &ctx.scores;
        let scale = ctx.scale;
        let area = scale * scale;
        let points = ((6000.0 + 9000.0 * ctx.smoke + 6000.0 * s.nostalgia) * area).max(200.0)
            as usize;

        let mut tilt: f64 = 0.0;
        if ctx.tags.beach {
            tilt += 0.15;
        }
        if ctx.tags.loss {
            tilt -= 0.1;
        }
        if ctx.tags.rain {
            tilt += 0.08;
        }

        let color = ctx.blend(0.35 + 0.45 * (s.valence * 0.5 + 0.5));
        let alpha = ((110.0 + 60.0 * s.nostalgia) * ctx.brightness / 255.0).min(1.0);

        out.push(DrawCommand::BeginLayer {
            blend: BlendMode::Screen,
        });
        for anchor in self.anchors(ctx, noise) {
            let head_r = 44.0 * anchor.scale * scale;
            let shoulder_w = 120.0 * anchor.scale * scale;
            let shoulder_h = 60.0 * anchor.scale * scale;

            for _ in 0..points {
                let jx = rng.gen::<f64>() - 0.5;
                let jy = rng.gen::<f64>() - 0.5;

                let rx = anchor.x + jx * (shoulder_w * 2.1) * tilt.cos()
                    - jy * (shoulder_h * 1.8) * tilt.sin();
                let ry = anchor.y + jx * (shoulder_w * 0.4) * tilt.sin()
                    + jy * (head_r * 2.7) * tilt.cos();

                let d_head = ((rx - anchor.x).powi(2) + (ry - (anchor.y - head_r * 0.6)).powi(2))
                    .sqrt()
                    / head_r;
                let d_shoulder = ((rx - anchor.x) / (shoulder_w * 0.72))
                    .hypot((ry - (anchor.y + shoulder_h * 0.1)) / (shoulder_h * 0.78));

                if d_head >= 1.08 && d_shoulder >= 1.0 {
                    continue;
                }

                // Noise is sampled in reference units so the texture does
                // not change with output size.
                let (ux, uy) = (rx / scale, ry / scale);
                let n1 = noise.get(0.006 * ux, 0.006 * uy, ctx.phase);
                let n2 = noise.get(0.012 * ux + 13.0, 0.012 * uy, ctx.phase);
                let erode = n1 * 0.6 + n2 * 0.4;
                let edge = (d_head - 1.0).abs().max((d_shoulder - 1.0).abs()).min(1.0);

                if erode < 0.34 + 0.56 * edge {
                    let diameter = 0.9 + 2.6 * (1.0 - erode) + 0.6 * s.arousal;
                    out.push(DrawCommand::Circle {
                        center: (rx, ry),
                        radius: diameter / 2.0 * scale,
                        paint: Paint::fill(Color::new(color, alpha)),
                    });
                }
            }
        }
        out.push(DrawCommand::EndLayer);
    }

    /// Flowing bezier bands across the canvas.
    fn data_bands(&self, ctx: &FrameContext, noise: &ValueNoise, out: &mut DrawCommands) {
        let inner = ctx.inner;
        let a = ctx.scores.arousal;
        let scale = ctx.scale;
        let n = |x: f64| noise.get(x, ctx.phase, 0.0);
        let bands = 6 + (6.0 * a).round() as usize;

        for b in 0..bands {
            let bf = b as f64;
            let y = inner.y + inner.h * (0.14 + 0.72 * (bf + 0.5) / bands as f64);
            let color = Color::new(ctx.blend(bf / bands as f64), (24.0 + 42.0 * a) / 255.0);
            let x1 = inner.x + 36.0 * scale;
            let x4 = inner.x + inner.w - 36.0 * scale;
            let x2 = x1 + (x4 - x1) * 0.33;
            let x3 = x1 + (x4 - x1) * 0.66;
            let lift = (16.0 + 26.0 * a) * scale;

            out.push(DrawCommand::Bezier {
                from: (x1, y + 18.0 * scale * n(bf + 0.11)),
                ctrl1: (x2, y - lift * n(bf + 1.2)),
                ctrl2: (x3, y + lift * n(bf + 2.3)),
                to: (x4, y + 18.0 * scale * n(bf + 0.22)),
                stroke: Stroke {
                    color,
                    width: (4.0 + 7.0 * a) * scale,
                },
            });
        }
    }

    /// Glowing kernel with the scenario symbol.
    fn symbol_core(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let (cx, cy) = ctx.kernel();
        let base = ctx.kernel_radius();
        let scale = ctx.scale;
        let s = &ctx.scores;
        let glow = ctx.blend(0.35 + 0.4 * s.arousal);

        for i in (1..=6).rev() {
            let f = i as f64 / 6.0;
            out.push(DrawCommand::Circle {
                center: (cx, cy),
                radius: base * f,
                paint: Paint::fill(Color::new(glow, 170.0 * f * ctx.brightness / 255.0)),
            });
        }

        match ctx.symbol {
            SymbolId::Cake => {
                let (w, h) = (base * 1.1, base * 0.6);
                out.push(DrawCommand::Rect {
                    x: cx - w / 2.0,
                    y: cy - h / 2.0,
                    width: w,
                    height: h,
                    corner: 10.0 * scale,
                    paint: Paint::fill(Color::rgba(255, 240, 210, 230)),
                });
                let candles = 3 + (2.0 * s.social).round() as usize;
                let spacing = (candles - 1).max(1) as f64;
                for i in 0..candles {
                    let x = cx - w * 0.3 + (i as f64 / spacing) * w * 0.6;
                    out.push(DrawCommand::Line {
                        from: (x, cy - h * 0.2),
                        to: (x, cy - h * 0.45),
                        stroke: Stroke {
                            color: Color::rgba(150, 120, 110, 220),
                            width: 2.0 * scale,
                        },
                    });
                    out.push(DrawCommand::Ellipse {
                        center: (x, cy - h * 0.52),
                        radii: (4.0 * scale, 6.0 * scale),
                        paint: Paint::fill(Color::rgba(255, 210, 120, 230)),
                    });
                }
            }
            SymbolId::Lamp => {
                out.push(DrawCommand::Triangle {
                    points: [
                        (cx - 14.0 * scale, cy - 6.0 * scale),
                        (cx + 14.0 * scale, cy - 6.0 * scale),
                        (cx, cy - 30.0 * scale),
                    ],
                    paint: Paint::fill(Color::rgba(235, 235, 245, 220)),
                });
                out.push(DrawCommand::Rect {
                    x: cx - 3.0 * scale,
                    y: cy - 6.0 * scale,
                    width: 6.0 * scale,
                    height: 20.0 * scale,
                    corner: 0.0,
                    paint: Paint::fill(Color::rgba(235, 235, 245, 220)),
                });
            }
            SymbolId::Shell => {
                let stroke = Stroke {
                    color: Color::rgba(240, 230, 220, 200),
                    width: 2.0 * scale,
                };
                for k in 0..6 {
                    let k = k as f64;
                    out.push(DrawCommand::Arc {
                        center: (cx, cy),
                        radii: (
                            (base * 0.4 + k * 10.0 * scale) / 2.0,
                            (base * 0.3 + k * 8.0 * scale) / 2.0,
                        ),
                        start: -PI,
                        end: 0.0,
                        stroke,
                    });
                }
            }
            SymbolId::Frame => {
                out.push(DrawCommand::Rect {
                    x: cx - base * 0.5,
                    y: cy - base * 0.4,
                    width: base,
                    height: base * 0.8,
                    corner: 6.0 * scale,
                    paint: Paint::stroke(Color::rgba(240, 230, 220, 220), 3.0 * scale),
                });
            }
            SymbolId::Window => {
                let color = Color::rgba(230, 230, 240, 210);
                out.push(DrawCommand::Rect {
                    x: cx - base * 0.55,
                    y: cy - base * 0.35,
                    width: base * 1.1,
                    height: base * 0.7,
                    corner: 8.0 * scale,
                    paint: Paint::stroke(color, 2.0 * scale),
                });
                let stroke = Stroke {
                    color,
                    width: 2.0 * scale,
                };
                out.push(DrawCommand::Line {
                    from: (cx, cy - base * 0.35),
                    to: (cx, cy + base * 0.35),
                    stroke,
                });
                out.push(DrawCommand::Line {
                    from: (cx - base * 0.55, cy),
                    to: (cx + base * 0.55, cy),
                    stroke,
                });
            }
            SymbolId::Horizon => {
                out.push(DrawCommand::Arc {
                    center: (cx, cy + base * 0.2),
                    radii: (base * 0.9, base * 0.6),
                    start: 0.0,
                    end: PI,
                    stroke: Stroke {
                        color: Color::rgba(230, 230, 240, 210),
                        width: 2.0 * scale,
                    },
                });
            }
            SymbolId::Core => {}
        }
    }

    /// Ring of ticks around the kernel, denser with nostalgia.
    fn radial_ticks(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let (cx, cy) = ctx.kernel();
        let r = ctx.kernel_radius();
        let stroke = Stroke {
            color: Color::rgba(230, 230, 238, 90),
            width: 1.2 * ctx.scale,
        };
        out.push(DrawCommand::Circle {
            center: (cx, cy),
            radius: r,
            paint: Paint {
                fill: None,
                stroke: Some(stroke),
            },
        });

        let ticks = 24 + (24.0 * ctx.scores.nostalgia).round() as usize;
        for i in 0..ticks {
            let a = -FRAC_PI_2 + i as f64 / ticks as f64 * TAU;
            out.push(DrawCommand::Line {
                from: (cx + r * 0.95 * a.cos(), cy + r * 0.95 * a.sin()),
                to: (cx + r * 1.05 * a.cos(), cy + r * 1.05 * a.sin()),
                stroke,
            });
        }
    }

    /// Rain streaks, beach horizon and night stars. Any combination may
    /// appear, independent of the primary scenario.
    fn scenario_overlays(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let inner = ctx.inner;
        let scale = ctx.scale;

        if ctx.tags.rain {
            let stroke = Stroke {
                color: Color::rgba(220, 230, 240, 50),
                width: 1.2 * scale,
            };
            for i in 0..180u32 {
                let x = inner.x + (i as f64 * 53.0 * scale) % inner.w;
                let y = inner.y + (i as f64 * 97.0 * scale) % inner.h;
                out.push(DrawCommand::Line {
                    from: (x, y),
                    to: (x - 8.0 * scale, y + 22.0 * scale),
                    stroke,
                });
            }
        }

        if ctx.tags.beach {
            let stroke = Stroke {
                color: Color::rgba(235, 230, 220, 60),
                width: 1.2 * scale,
            };
            let y = inner.y + inner.h * 0.7;
            out.push(DrawCommand::Line {
                from: (inner.x + 40.0 * scale, y),
                to: (inner.x + inner.w - 40.0 * scale, y),
                stroke,
            });
            for i in 0..6 {
                let i = i as f64;
                out.push(DrawCommand::Arc {
                    center: (inner.x + inner.w / 2.0, y + (4.0 + i * 8.0) * scale),
                    radii: ((100.0 + i * 20.0) * scale, (12.0 + i * 3.0) * scale),
                    start: 0.0,
                    end: PI,
                    stroke,
                });
            }
        }

        if ctx.tags.night {
            let fill = Paint::fill(Color::rgba(255, 255, 255, 120));
            for i in 0..120u32 {
                let x = inner.x + (i as f64 * 71.0 * scale) % inner.w;
                let y = inner.y + ((i as f64 * 97.0 * scale) % inner.h) * 0.4;
                let diameter = (i % 7) as f64 / 7.0 + 0.8;
                out.push(DrawCommand::Circle {
                    center: (x, y),
                    radius: diameter / 2.0 * scale,
                    paint: fill,
                });
            }
        }
    }

    /// Keyword fragments on a ring around the kernel.
    fn text_fragments(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let (cx, cy) = ctx.kernel();
        let s = &ctx.scores;
        let limit = if s.social > 0.6 { 10 } else { 6 };
        let list: Vec<&String> = ctx.fragments.iter().take(limit).collect();
        let radius = ctx.inner.w.min(ctx.inner.h) * (0.24 + 0.10 * s.nostalgia);
        let turn = if s.valence < 0.0 { -0.18 } else { 0.18 };

        for (i, word) in list.iter().enumerate() {
            let a = -FRAC_PI_2 + i as f64 / list.len() as f64 * TAU + turn;
            out.push(DrawCommand::Text {
                anchor: (cx + radius * a.cos(), cy + radius * a.sin()),
                size: (14.0 + 2.0 * s.social) * ctx.scale,
                content: (*word).clone(),
                fill: Color::rgba(230, 228, 226, 155),
            });
        }
    }

    /// Story excerpt and the numbers behind the picture.
    fn caption(&self, ctx: &FrameContext, out: &mut DrawCommands) {
        let scale = ctx.scale;
        let top = ctx.inner.y + ctx.inner.h;
        let height = self.height as f64 - top;
        out.push(DrawCommand::Rect {
            x: 0.0,
            y: top,
            width: self.width as f64,
            height,
            corner: 0.0,
            paint: Paint::fill(Color::rgba(255, 255, 255, 10)),
        });

        let size = 11.0 * scale;
        let fill = Color::rgba(200, 198, 195, 255);
        let excerpt: String = ctx.story.chars().take(CAPTION_CHARS).collect();
        if !excerpt.is_empty() {
            out.push(DrawCommand::Text {
                anchor: (self.width as f64 * 0.3, top + height / 2.0),
                size,
                content: excerpt,
                fill,
            });
        }
        let s = &ctx.scores;
        out.push(DrawCommand::Text {
            anchor: (self.width as f64 * 0.8, top + height / 2.0),
            size,
            content: format!(
                "seed:{} • v:{} a:{} s:{}",
                ctx.seed, s.valence, s.arousal, s.social
            ),
            fill,
        });
    }
}

impl Renderer for SilhouetteRenderer {
    fn name(&self) -> &'static str {
        "silhouette"
    }

    fn render(&self, schema: &VisualSchema, frame: u64) -> DrawCommands {
        let schema = schema.sanitized();
        let ctx = self.context(&schema, frame);

        let mut rng = rand::rngs::StdRng::seed_from_u64(schema.seed as u64);
        let noise = ValueNoise::new(&mut rng);

        let mut out = DrawCommands::new(self.width, self.height);
        self.background(&ctx, &mut out);
        self.silhouettes(&ctx, &mut rng, &noise, &mut out);
        self.data_bands(&ctx, &noise, &mut out);
        self.symbol_core(&ctx, &mut out);
        self.radial_ticks(&ctx, &mut out);
        self.scenario_overlays(&ctx, &mut out);
        self.text_fragments(&ctx, &mut out);
        self.caption(&ctx, &mut out);

        tracing::debug!(
            seed = schema.seed,
            frame,
            commands = out.len(),
            "rendered frame"
        );
        out
    }
}
