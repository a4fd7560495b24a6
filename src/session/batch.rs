use rayon::prelude::*;

use crate::{
    eval::evaluator::{Evaluator, FrameState},
    eval::fingerprint::{FrameFingerprint, fingerprint_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{AdreelError, AdreelResult},
    scene::model::Composition,
    session::sink::{FrameSink, SinkConfig},
};

/// Runtime knobs for range evaluation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderThreading {
    /// Evaluate chunks on a rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Worker count; `None` lets rayon decide.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_chunk_size() -> usize {
    64
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: default_chunk_size(),
            threads: None,
        }
    }
}

/// Counters gathered while evaluating a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EvalStats {
    /// Frames delivered.
    pub frames_total: u64,
    /// Frames whose fingerprint equals the previous frame's.
    pub frames_static: u64,
    /// Sum of active scenes over delivered frames.
    pub scenes_total: u64,
    /// Sum of resolved elements over delivered frames.
    pub elements_total: u64,
    /// Sum of visible particles over delivered frames.
    pub particles_total: u64,
}

impl EvalStats {
    fn record(
        &mut self,
        frame: &FrameState,
        fp: FrameFingerprint,
        prev: &mut Option<FrameFingerprint>,
    ) {
        self.frames_total += 1;
        if *prev == Some(fp) {
            self.frames_static += 1;
        }
        *prev = Some(fp);
        self.scenes_total += frame.scenes.len() as u64;
        for s in &frame.scenes {
            self.elements_total += s.elements.len() as u64;
            self.particles_total += s
                .particles
                .iter()
                .map(|p| p.particles.len() as u64)
                .sum::<u64>();
        }
    }
}

/// Evaluate every frame in `range` and collect the results in order.
#[tracing::instrument(skip(comp))]
pub fn evaluate_range(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
) -> AdreelResult<(Vec<FrameState>, EvalStats)> {
    struct Collect(Vec<FrameState>);

    impl FrameSink for Collect {
        fn begin(&mut self, cfg: SinkConfig) -> AdreelResult<()> {
            self.0 = Vec::with_capacity(cfg.range.len_frames().min(4096) as usize);
            Ok(())
        }
        fn push_frame(&mut self, frame: &FrameState) -> AdreelResult<()> {
            self.0.push(frame.clone());
            Ok(())
        }
        fn end(&mut self) -> AdreelResult<()> {
            Ok(())
        }
    }

    let mut sink = Collect(Vec::new());
    let stats = evaluate_into(comp, range, threading, &mut sink)?;
    Ok((sink.0, stats))
}

/// Evaluate `range` and stream frames into `sink` in increasing order.
///
/// Parallel mode evaluates one chunk at a time on a dedicated rayon pool; the sink is polled
/// with [`FrameSink::wants_more`] between frames.
#[tracing::instrument(skip(comp, sink))]
pub fn evaluate_into(
    comp: &Composition,
    range: FrameRange,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> AdreelResult<EvalStats> {
    if range.is_empty() {
        return Err(AdreelError::configuration(
            "evaluation range must be non-empty",
        ));
    }
    comp.validate()?;

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    sink.begin(SinkConfig {
        canvas: comp.canvas,
        fps: comp.fps,
        range,
    })?;

    let mut stats = EvalStats::default();
    let mut prev = None;
    let mut chunk_start = range.start.0;
    'chunks: while chunk_start < range.end.0 {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
        let frames = match &pool {
            Some(pool) => pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| eval_with_fingerprint(comp, FrameIndex(f)))
                    .collect::<Vec<_>>()
            }),
            None => (chunk_start..chunk_end)
                .map(|f| eval_with_fingerprint(comp, FrameIndex(f)))
                .collect(),
        };
        tracing::debug!(chunk_start, chunk_end, "evaluated chunk");

        for (frame, fp) in &frames {
            if !sink.wants_more() {
                tracing::debug!(frame = frame.frame.0, "sink stopped evaluation");
                break 'chunks;
            }
            sink.push_frame(frame)?;
            stats.record(frame, *fp, &mut prev);
        }
        chunk_start = chunk_end;
    }

    sink.end()?;
    Ok(stats)
}

fn eval_with_fingerprint(comp: &Composition, frame: FrameIndex) -> (FrameState, FrameFingerprint) {
    let state = Evaluator::eval_frame_unchecked(comp, frame);
    let fp = fingerprint_frame(&state);
    (state, fp)
}

fn build_thread_pool(threads: Option<usize>) -> AdreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AdreelError::configuration(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AdreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/batch.rs"]
mod tests;
