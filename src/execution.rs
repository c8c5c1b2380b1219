//! Executor boundary: the only path from parameters to a running task.
//!
//! [`ExecutionService::execute`] validates before anything runs, rejects
//! executors handed the wrong variant and skips parameters whose content was
//! already executed successfully.

use std::collections::{HashSet, VecDeque};

use crate::config::Config;
use crate::error::{MisuseError, ParamsError, ParamsResult, TaskFailure};
use crate::identity::ContentKey;
use crate::parameters::{TaskKind, TaskParameters};
use crate::submit::{Submitted, submit};

/// Runs one kind of task.
pub trait TaskExecutor {
    /// The task kind this executor runs.
    fn kind(&self) -> TaskKind;

    fn execute(&self, params: &Submitted<TaskParameters>) -> Result<(), TaskFailure>;
}

/// Result of a successful call to [`ExecutionService::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The executor ran and succeeded.
    Completed { key: Option<ContentKey> },
    /// Equal parameters were already executed, the executor was not called.
    Skipped { key: ContentKey },
}

/// Bounded set of content keys, evicting the oldest first.
#[derive(Debug)]
pub struct DedupeCache {
    capacity: usize,
    seen: HashSet<ContentKey>,
    order: VecDeque<ContentKey>,
}

impl DedupeCache {
    /// Collections grow on demand, `capacity` only bounds them.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seen: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    pub fn contains(&self, key: &ContentKey) -> bool {
        self.seen.contains(key)
    }

    /// Remembers `key`. Returns false if it was already known.
    pub fn insert(&mut self, key: ContentKey) -> bool {
        if self.capacity == 0 || self.seen.contains(&key) {
            return false;
        }
        if self.order.len() == self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.seen.remove(&oldest);
        }
        self.seen.insert(key.clone());
        self.order.push_back(key);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Validates, deduplicates and dispatches parameters to executors.
#[derive(Debug)]
pub struct ExecutionService {
    config: Config,
    dedupe: DedupeCache,
}

impl ExecutionService {
    pub fn new(config: Config) -> Self {
        let dedupe = DedupeCache::new(config.dedupe.capacity);
        Self { config, dedupe }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates `params` and runs them with `executor`.
    ///
    /// The executor is never called with invalid parameters or with a
    /// variant it does not run.
    pub fn execute(
        &mut self,
        params: impl Into<TaskParameters>,
        executor: &dyn TaskExecutor,
    ) -> ParamsResult<Outcome> {
        let submitted = match submit(params.into()) {
            Ok(submitted) => submitted,
            Err(report) => {
                if self.config.validation.log_violations {
                    for violation in &report {
                        log::warn!("Violation: {}", violation);
                    }
                }
                return Err(ParamsError::Invalid(report));
            }
        };
        self.run(submitted, executor)
    }

    /// Runs already submitted parameters with `executor`.
    pub fn run(
        &mut self,
        submitted: Submitted<TaskParameters>,
        executor: &dyn TaskExecutor,
    ) -> ParamsResult<Outcome> {
        if executor.kind() != submitted.kind() {
            let err = MisuseError::KindMismatch {
                executor: executor.kind(),
                params: submitted.kind(),
            };
            log::error!("{}", err);
            return Err(err.into());
        }

        let key = submitted.content_key().cloned();
        if self.config.dedupe.enabled
            && let Some(key) = &key
            && self.dedupe.contains(key)
        {
            log::warn!(
                "Skipping {} task, equal parameters already executed ({})",
                submitted.kind(),
                key
            );
            return Ok(Outcome::Skipped { key: key.clone() });
        }

        log::info!("Executing {} task", submitted.kind());
        executor.execute(&submitted)?;

        if self.config.dedupe.enabled
            && let Some(key) = &key
        {
            self.dedupe.insert(key.clone());
        }
        log::info!("Completed {} task", submitted.kind());
        Ok(Outcome::Completed { key })
    }
}
