use std::io::Write;

use anyhow::Context as _;

use crate::{
    eval::evaluator::FrameState,
    foundation::core::{Canvas, Fps, FrameRange},
    foundation::error::AdreelResult,
};

/// Configuration provided to a [`FrameSink`] at the start of a range evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output resolution.
    pub canvas: Canvas,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Frames that will be pushed, unless the sink stops early.
    pub range: FrameRange,
}

/// Sink contract for consuming resolved frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing frame order within the
/// requested range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AdreelResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, frame: &FrameState) -> AdreelResult<()>;
    /// Called once after the last frame is pushed, including after an early stop.
    fn end(&mut self) -> AdreelResult<()>;
    /// Polled before every frame; return `false` to stop delivery there.
    ///
    /// Frames already evaluated in the current chunk are discarded.
    fn wants_more(&self) -> bool {
        true
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameState>,
    limit: Option<usize>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that asks to stop once it holds `limit` frames.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[FrameState] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AdreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameState) -> AdreelResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> AdreelResult<()> {
        Ok(())
    }

    fn wants_more(&self) -> bool {
        self.limit.is_none_or(|n| self.frames.len() < n)
    }
}

/// Writes each frame as one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
    written: u64,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> AdreelResult<()> {
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameState) -> AdreelResult<()> {
        serde_json::to_writer(&mut self.out, frame)
            .with_context(|| format!("write frame {}", frame.frame.0))?;
        self.out
            .write_all(b"\n")
            .with_context(|| format!("write line for frame {}", frame.frame.0))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> AdreelResult<()> {
        self.out.flush().context("flush frame lines")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sink.rs"]
mod tests;
