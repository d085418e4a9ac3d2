use crate::error::{ArteError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::debug;

/// Runs one training task per ensemble member and waits for all of them.
///
/// Thread contract:
/// - `jobs` 0 or 1: strictly sequential on the calling thread
/// - `jobs` -1: one worker per hardware thread
/// - `jobs` n > 1: dedicated pool of n workers
pub enum TrainingExecutor {
    Sequential,
    Pooled(ThreadPool),
}

impl TrainingExecutor {
    pub fn from_jobs(jobs: i32) -> Result<Self> {
        let threads = match jobs {
            -1 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n if n < -1 => {
                return Err(ArteError::invalid(
                    "jobs",
                    format!("must be -1, 0 or a positive thread count, got {n}"),
                ));
            }
            n => n as usize,
        };
        if threads <= 1 {
            debug!("member training runs sequentially");
            return Ok(TrainingExecutor::Sequential);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("arte-member-{i}"))
            .build()?;
        debug!(threads, "built member training pool");
        Ok(TrainingExecutor::Pooled(pool))
    }

    pub fn threads(&self) -> usize {
        match self {
            TrainingExecutor::Sequential => 1,
            TrainingExecutor::Pooled(pool) => pool.current_num_threads(),
        }
    }

    /// Applies `work` to every task and returns once all of them finished. Each task is
    /// tagged with the ordinal of the member it belongs to; a panicking task does not
    /// stop the others and is reported as [`ArteError::MemberTrainingFailed`] (lowest
    /// ordinal first when several fail).
    pub fn run_all<T, F>(&self, tasks: &mut [(usize, T)], work: F) -> Result<()>
    where
        T: Send,
        F: Fn(&mut T) + Send + Sync,
    {
        let guarded = |(member, task): &mut (usize, T)| {
            catch_unwind(AssertUnwindSafe(|| work(task))).map_err(|payload| {
                ArteError::MemberTrainingFailed {
                    member: *member,
                    message: panic_message(payload.as_ref()),
                }
            })
        };

        let outcomes: Vec<Result<()>> = match self {
            TrainingExecutor::Sequential => tasks.iter_mut().map(guarded).collect(),
            TrainingExecutor::Pooled(pool) => {
                pool.install(|| tasks.par_iter_mut().map(guarded).collect())
            }
        };
        outcomes.into_iter().collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
