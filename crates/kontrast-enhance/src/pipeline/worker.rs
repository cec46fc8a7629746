// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Worker execution — run one enhancement on its own scoped thread, time it,
// persist its output, and hand the outcome back at join.

use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};

use kontrast_core::error::KontrastError;
use kontrast_core::{IntensityMatrix, WorkerFailure, WorkerKind};
use tracing::{debug, error, info};

use crate::io::codec::ImageCodec;
use crate::transform::Enhancement;

/// What a worker hands back once it has finished successfully.
#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub worker: WorkerKind,
    /// Fully populated output, same shape as the input.
    pub output: IntensityMatrix,
    /// Time spent in the transformation itself.
    pub elapsed: Duration,
    /// Where the output was written.
    pub saved_to: PathBuf,
}

pub type WorkerOutcome = std::result::Result<WorkerResult, WorkerFailure>;

/// One unit of work for the pair of workers.
pub struct WorkerJob<'a> {
    pub enhancement: &'a dyn Enhancement,
    pub destination: PathBuf,
}

/// Run `enhancement` against `input` on the calling thread and save the result.
///
/// Failures are captured as a `WorkerFailure` tagged with the worker's kind.
pub fn run_worker(
    enhancement: &dyn Enhancement,
    input: &IntensityMatrix,
    codec: &dyn ImageCodec,
    destination: &Path,
) -> WorkerOutcome {
    let worker = enhancement.kind();
    let fail = |error: KontrastError| WorkerFailure::new(worker, error);

    let started = Instant::now();
    let output = enhancement.apply(input).map_err(fail)?;
    let elapsed = started.elapsed();
    debug_assert_eq!((output.rows(), output.cols()), (input.rows(), input.cols()));

    let save_started = Instant::now();
    codec.encode(&output, destination).map_err(fail)?;
    debug!(
        worker = worker.thread_name(),
        save_ms = save_started.elapsed().as_millis() as u64,
        "Result persisted"
    );

    info!(
        worker = worker.thread_name(),
        elapsed_s = elapsed.as_secs_f64(),
        "Worker finished"
    );
    Ok(WorkerResult {
        worker,
        output,
        elapsed,
        saved_to: destination.to_path_buf(),
    })
}

/// Run every job on its own named thread and block until all have finished.
///
/// Outcomes come back in job order. A thread that cannot be spawned or that
/// panics is reported as that worker's failure.
pub fn run_concurrently<const N: usize>(
    jobs: &[WorkerJob<'_>; N],
    input: &IntensityMatrix,
    codec: &dyn ImageCodec,
) -> [WorkerOutcome; N] {
    thread::scope(|scope| {
        let handles = jobs
            .each_ref()
            .map(|job| (job.enhancement.kind(), spawn_worker(scope, job, input, codec)));
        handles.map(|(worker, handle)| join_worker(worker, handle))
    })
}

fn spawn_worker<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    job: &'env WorkerJob<'env>,
    input: &'env IntensityMatrix,
    codec: &'env dyn ImageCodec,
) -> io::Result<ScopedJoinHandle<'scope, WorkerOutcome>> {
    let name = job.enhancement.kind().thread_name();
    debug!(worker = name, "Spawning worker");
    thread::Builder::new()
        .name(name.to_string())
        .spawn_scoped(scope, move || {
            run_worker(job.enhancement, input, codec, &job.destination)
        })
}

fn join_worker(
    worker: WorkerKind,
    handle: io::Result<ScopedJoinHandle<'_, WorkerOutcome>>,
) -> WorkerOutcome {
    let handle = handle.map_err(|err| WorkerFailure::new(worker, err.into()))?;
    match handle.join() {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(worker = worker.thread_name(), "Worker panicked");
            Err(WorkerFailure::new(
                worker,
                KontrastError::WorkerPanicked { worker },
            ))
        }
    }
}
