//! Concurrent pipeline execution.
//!
//! Programs are scheduled in input order onto blocking tasks, at most
//! `workers` at a time. Each finished program is sent whole through a channel
//! to the single consumer, which reorders by submission index when
//! `preserve_order` is set. Cancelling stops scheduling; programs already
//! running complete and are kept.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use hours_extract::ExtractionAdapter;
use hours_model::ProgramInput;
use tokio::sync::{Semaphore, mpsc};
use tracing::{info, warn};

use crate::options::PipelineOptions;
use crate::process::{ProgramOutcome, process_program};
use crate::report::CleansingReport;

/// Shared flag that stops a running pipeline from starting new programs.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct CleansingPipeline {
    adapter: ExtractionAdapter,
    options: PipelineOptions,
    cancel: CancelHandle,
}

impl CleansingPipeline {
    pub fn new(adapter: ExtractionAdapter, options: PipelineOptions) -> Self {
        Self {
            adapter,
            options,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Process every program and collect the report.
    pub async fn run(&self, programs: Vec<ProgramInput>) -> CleansingReport {
        let start = Instant::now();
        let total = programs.len();
        let workers = self.options.workers.max(1);
        info!(programs = total, workers, collaborator = self.adapter.collaborator_name(), "starting cleansing run");

        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, ProgramOutcome)>();
        let semaphore = Arc::new(Semaphore::new(workers));
        let scheduler = tokio::spawn(schedule(
            programs,
            self.adapter.clone(),
            semaphore,
            self.cancel.clone(),
            self.options.log_data,
            tx,
        ));

        let mut report = CleansingReport::default();
        let mut pending: BTreeMap<usize, ProgramOutcome> = BTreeMap::new();
        let mut next = 0;
        while let Some((index, outcome)) = rx.recv().await {
            if !self.options.preserve_order {
                report.record(outcome);
                continue;
            }
            pending.insert(index, outcome);
            while let Some(outcome) = pending.remove(&next) {
                report.record(outcome);
                next += 1;
            }
        }
        // Left over only when a task died before reporting.
        for outcome in pending.into_values() {
            report.record(outcome);
        }

        let scheduled = match scheduler.await {
            Ok(scheduled) => scheduled,
            Err(error) => {
                warn!(%error, "scheduler task failed");
                report.counts.total
            }
        };
        report.skipped = total.saturating_sub(scheduled);
        report.cancelled = self.cancel.is_cancelled();
        if report.counts.total < scheduled {
            warn!(
                lost = scheduled - report.counts.total,
                "some programs did not report an outcome"
            );
        }
        info!(
            succeeded = report.counts.succeeded,
            failed = report.counts.failed,
            empty = report.counts.empty,
            skipped = report.skipped,
            rows = report.rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "cleansing run finished"
        );
        report
    }
}

/// Start one blocking task per program, bounded by the semaphore. Returns how
/// many programs were started.
async fn schedule(
    programs: Vec<ProgramInput>,
    adapter: ExtractionAdapter,
    semaphore: Arc<Semaphore>,
    cancel: CancelHandle,
    log_data: bool,
    tx: mpsc::UnboundedSender<(usize, ProgramOutcome)>,
) -> usize {
    let mut scheduled = 0;
    for (index, program) in programs.into_iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        if cancel.is_cancelled() {
            break;
        }
        let adapter = adapter.clone();
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = process_program(&adapter, &program, log_data);
            drop(permit);
            // The receiver only goes away if the run itself was dropped.
            let _ = tx.send((index, outcome));
        });
        scheduled += 1;
    }
    if cancel.is_cancelled() {
        info!(scheduled, "cancelled; no further programs will start");
    }
    scheduled
}
