//! # Heavy Check Pool
//!
//! Fixed set of worker threads draining a bounded queue of event batches
//! through the [`HeavyChecker`].
//!
//! ## Lifecycle
//!
//! `Stopped → Started → Stopped`. Batches may be queued before `start`; they
//! wait for workers. `stop` sets the quit flag, wakes every waiter and joins
//! the workers. Batches still queued at that point are abandoned, and
//! producers blocked in [`HeavyCheckPool::enqueue`] return
//! [`EventCheckError::Terminated`].
//!
//! ## Backpressure
//!
//! The queue holds at most `max_queued_tasks` batches; `enqueue` blocks
//! while it is full. [`HeavyCheckPool::overloaded`] reports more than half
//! full so gossip can slow down before producers start blocking.

use crate::config::HeavyCheckConfig;
use crate::domain::errors::EventCheckError;
use crate::domain::heavy::HeavyChecker;
use crate::metrics::CheckMetrics;
use parking_lot::{Condvar, Mutex};
use shared_types::Event;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Events per queued batch.
pub const MAX_BATCH: usize = 4;

/// Default queue capacity, in batches.
pub const MAX_QUEUED_TASKS: usize = 128;

/// Outcome of one batch, delivered on the worker thread.
#[derive(Debug)]
pub struct ValidatedBatch {
    /// Position of `events[0]` in the slice passed to `enqueue`.
    pub offset: usize,
    pub events: Vec<Arc<Event>>,
    /// `results[i]` belongs to `events[i]`.
    pub results: Vec<Result<(), EventCheckError>>,
}

type OnValidated = Arc<dyn Fn(ValidatedBatch) + Send + Sync>;

struct Task {
    offset: usize,
    events: Vec<Arc<Event>>,
    on_validated: OnValidated,
}

struct QueueState {
    tasks: VecDeque<Task>,
    quit: bool,
}

struct TaskQueue {
    state: Mutex<QueueState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl TaskQueue {
    fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::with_capacity(capacity),
                quit: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Blocks while full. Returns the depth after insertion.
    fn push(&self, task: Task) -> Result<usize, EventCheckError> {
        let mut state = self.state.lock();
        loop {
            if state.quit {
                return Err(EventCheckError::Terminated);
            }
            if state.tasks.len() < self.capacity {
                state.tasks.push_back(task);
                self.not_empty.notify_one();
                return Ok(state.tasks.len());
            }
            self.not_full.wait(&mut state);
        }
    }

    /// Blocks while empty. `None` once the queue is terminated.
    fn pop(&self) -> Option<(Task, usize)> {
        let mut state = self.state.lock();
        loop {
            if state.quit {
                return None;
            }
            if let Some(task) = state.tasks.pop_front() {
                self.not_full.notify_one();
                return Some((task, state.tasks.len()));
            }
            self.not_empty.wait(&mut state);
        }
    }

    fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    fn terminate(&self) {
        self.state.lock().quit = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Clear leftovers of a previous run and accept tasks again.
    fn reopen(&self) {
        let mut state = self.state.lock();
        if state.quit {
            state.tasks.clear();
            state.quit = false;
        }
    }
}

/// Bounded worker pool for heavy checks.
pub struct HeavyCheckPool {
    checker: Arc<HeavyChecker>,
    config: HeavyCheckConfig,
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    metrics: Option<CheckMetrics>,
}

impl HeavyCheckPool {
    pub fn new(checker: Arc<HeavyChecker>, config: HeavyCheckConfig) -> Self {
        let queue = Arc::new(TaskQueue::new(config.effective_capacity()));
        Self {
            checker,
            config,
            queue,
            workers: Mutex::new(Vec::new()),
            metrics: None,
        }
    }

    /// Record check outcomes, batch latency and queue depth.
    pub fn with_metrics(mut self, metrics: CheckMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Spawn the workers. No-op if already started.
    pub fn start(&self) -> std::io::Result<()> {
        let mut workers = self.workers.lock();
        if !workers.is_empty() {
            warn!("Heavy check pool already started");
            return Ok(());
        }

        self.queue.reopen();
        let threads = self.config.effective_threads();
        for i in 0..threads {
            let queue = Arc::clone(&self.queue);
            let checker = Arc::clone(&self.checker);
            let metrics = self.metrics.clone();
            let handle = thread::Builder::new()
                .name(format!("heavy-check-{i}"))
                .spawn(move || worker_loop(&queue, &checker, metrics.as_ref()))?;
            workers.push(handle);
        }

        info!(
            threads,
            capacity = self.queue.capacity,
            "Heavy check pool started"
        );
        Ok(())
    }

    /// Terminate the queue and join the workers.
    ///
    /// Must not be called from an `on_validated` callback.
    pub fn stop(&self) {
        self.queue.terminate();
        let workers = std::mem::take(&mut *self.workers.lock());
        let count = workers.len();
        for handle in workers {
            if handle.join().is_err() {
                error!("Heavy check worker panicked");
            }
        }
        info!(workers = count, "Heavy check pool stopped");
    }

    /// Queue `events` in batches of [`MAX_BATCH`].
    ///
    /// `on_validated` runs once per batch on a worker thread. Blocks while
    /// the queue is full; returns `Terminated` if the pool is stopped before
    /// every batch is queued. Batches queued before the failure stay queued.
    pub fn enqueue<F>(&self, events: Vec<Arc<Event>>, on_validated: F) -> Result<(), EventCheckError>
    where
        F: Fn(ValidatedBatch) + Send + Sync + 'static,
    {
        let on_validated: OnValidated = Arc::new(on_validated);
        let mut remaining = events;
        let mut offset = 0;

        while !remaining.is_empty() {
            let rest = remaining.split_off(remaining.len().min(MAX_BATCH));
            let batch = std::mem::replace(&mut remaining, rest);
            let len = batch.len();

            let depth = self.queue.push(Task {
                offset,
                events: batch,
                on_validated: Arc::clone(&on_validated),
            })?;
            if let Some(metrics) = &self.metrics {
                metrics.set_queue_depth(depth);
            }
            offset += len;
        }
        Ok(())
    }

    /// More than half the queue capacity is in use.
    pub fn overloaded(&self) -> bool {
        self.queue.len() > self.queue.capacity / 2
    }

    /// Batches currently queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_running(&self) -> bool {
        !self.workers.lock().is_empty()
    }
}

impl Drop for HeavyCheckPool {
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}

fn worker_loop(queue: &TaskQueue, checker: &HeavyChecker, metrics: Option<&CheckMetrics>) {
    while let Some((task, depth)) = queue.pop() {
        let started = Instant::now();
        let results: Vec<_> = task
            .events
            .iter()
            .map(|event| {
                let result = checker.validate(event);
                if let Some(metrics) = metrics {
                    metrics.record(&result);
                }
                result
            })
            .collect();

        if let Some(metrics) = metrics {
            metrics.set_queue_depth(depth);
            metrics.observe_batch(started.elapsed().as_secs_f64());
        }

        (task.on_validated)(ValidatedBatch {
            offset: task.offset,
            events: task.events,
            results,
        });
    }
    debug!("Heavy check worker exiting");
}
