//! Timed redraw loop.
//!
//! Renders the current schema frame by frame at the cadence its motion knob
//! asks for. A new schema published on the watch channel replaces the old
//! one and restarts at frame 0. A still schema is drawn once; the loop then
//! waits for the next schema. Dropping the sender stops the loop.

use crate::error::Result;
use crate::render::backend::RenderingBackend;
use crate::render::frame_delay;
use crate::schema::VisualSchema;
use std::sync::Arc;
use tokio::sync::watch;

/// One rendered frame handed to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub seed: u32,
    pub index: u64,
    pub image: String,
}

pub struct RedrawLoop<B> {
    backend: B,
    schemas: watch::Receiver<Arc<VisualSchema>>,
}

/// Create a loop with its publishing half, starting from `initial`.
pub fn channel<B: RenderingBackend>(
    backend: B,
    initial: VisualSchema,
) -> (watch::Sender<Arc<VisualSchema>>, RedrawLoop<B>) {
    let (tx, rx) = watch::channel(Arc::new(initial));
    (tx, RedrawLoop::new(backend, rx))
}

impl<B: RenderingBackend> RedrawLoop<B> {
    pub fn new(backend: B, schemas: watch::Receiver<Arc<VisualSchema>>) -> Self {
        Self { backend, schemas }
    }

    /// Run until the sender is dropped or `max_frames` frames have been
    /// delivered. Returns the number of frames delivered.
    pub async fn run<F>(mut self, mut sink: F, max_frames: Option<u64>) -> Result<u64>
    where
        F: FnMut(RenderedFrame) -> Result<()>,
    {
        let mut delivered = 0u64;
        let mut schema = self.schemas.borrow_and_update().clone();
        let mut index = 0u64;

        loop {
            if max_frames.is_some_and(|max| delivered >= max) {
                break;
            }

            let image = self.backend.render_image(&schema, index)?;
            sink(RenderedFrame {
                seed: schema.seed,
                index,
                image,
            })?;
            delivered += 1;

            let changed = match frame_delay(schema.motion) {
                Some(delay) => {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => None,
                        changed = self.schemas.changed() => Some(changed),
                    }
                }
                None => Some(self.schemas.changed().await),
            };

            match changed {
                None => index += 1,
                Some(Ok(())) => {
                    schema = self.schemas.borrow_and_update().clone();
                    index = 0;
                    tracing::debug!(seed = schema.seed, "redraw loop picked up new schema");
                }
                Some(Err(_)) => break,
            }
        }

        tracing::debug!(frames = delivered, "redraw loop finished");
        Ok(delivered)
    }
}
