#![forbid(unsafe_code)]

//! One-shot task scheduling on a virtual clock.
//!
//! The preview runs on a single UI thread and is advanced explicitly with
//! [`Scheduler::advance`]. Tasks are `FnOnce` callbacks that fire once
//! their delay has elapsed, in due-time order, ties broken by scheduling
//! order.
//!
//! # Invariants
//!
//! 1. A task fires at most once.
//! 2. A task whose token is cancelled before it is due never fires and is
//!    dropped on the next [`Scheduler::advance`].
//! 3. Virtual time only moves forward.

use std::fmt;

use tracing::trace;
use web_time::Duration;

use crate::cancellation::CancellationToken;

/// Handle returned by [`Scheduler::schedule_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

struct Task {
    id: TaskId,
    due: Duration,
    token: CancellationToken,
    run: Box<dyn FnOnce(Duration)>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("due", &self.due)
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Single-threaded one-shot scheduler.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed, unless `token` is cancelled first.
    ///
    /// `task` receives its lateness: virtual time elapsed past the due time
    /// when the advance that fired it finished.
    pub fn schedule_after(
        &mut self,
        delay: Duration,
        token: CancellationToken,
        task: impl FnOnce(Duration) + 'static,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        trace!(task = id.0, due_ms = due.as_millis() as u64, "task scheduled");
        self.tasks.push(Task {
            id,
            due,
            token,
            run: Box::new(task),
        });
        id
    }

    /// Move the clock forward by `dt` and run every task that became due.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.now = self.now.saturating_add(dt);
        self.tasks.retain(|task| {
            let live = !task.token.is_cancelled();
            if !live {
                trace!(task = task.id.0, "cancelled task dropped");
            }
            live
        });

        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due, task.id));

        let mut ran = 0;
        for task in due {
            // A task that ran earlier in this batch may have cancelled this one.
            if task.token.is_cancelled() {
                trace!(task = task.id.0, "cancelled task dropped");
                continue;
            }
            let late = now.saturating_sub(task.due);
            trace!(task = task.id.0, late_ms = late.as_millis() as u64, "task fired");
            (task.run)(late);
            ran += 1;
        }
        ran
    }

    /// Tasks still waiting to fire and not yet cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| !task.token.is_cancelled())
            .count()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}
