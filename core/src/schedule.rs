use alloc::vec::Vec;
use core::time::Duration;

use crate::*;

/// Cancellation token for a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// One second of play time has passed.
    TimerTick,
    /// End of a hint preview, hides exactly the listed cells again.
    HintRevert(Vec<Coord2>),
}

#[derive(Clone, Debug)]
struct Entry {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
    task: Task,
}

/// Deterministic task queue driven by the caller's clock.
///
/// Nothing runs on its own: the owner calls [`Scheduler::advance`] with the time that passed
/// and gets back every task that came due, in due order. Dropping or clearing the scheduler
/// cancels everything still pending.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, task: Task) -> TaskId {
        self.push(delay, None, task)
    }

    /// Fires every `period`, first one `period` from now. A zero period is treated as one
    /// millisecond.
    pub fn schedule_repeating(&mut self, period: Duration, task: Task) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), task)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay),
            period,
            task,
        });
        id
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TaskId, Task)> {
        let target = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();

        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due <= target)
                .min_by_key(|(_, entry)| (entry.due, entry.id))
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };

            let entry = &mut self.entries[index];
            self.now = entry.due;
            let id = entry.id;
            let period = entry.period;
            // a repeating task whose next due time overflows fires one last time
            match period.and_then(|period| entry.due.checked_add(period)) {
                Some(due) => {
                    entry.due = due;
                    fired.push((id, entry.task.clone()));
                }
                None => {
                    let entry = self.entries.swap_remove(index);
                    fired.push((id, entry.task));
                }
            }
        }

        self.now = target;
        fired
    }
}
