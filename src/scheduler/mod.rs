//! Cooperative scheduler
//!
//! Three cancellable primitives: run on the next frame, run after a delay and
//! run when a completion signal fires. Scheduled work is a plain [`Task`]
//! value; the engine pops due tasks and runs them when the host reports a
//! frame, a clock advance or a signal. Nothing here runs on its own.

/// Deferred work the engine knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One step of the continuous scroll loop
    ScrollTick,
    /// Find input went quiet; flush on the next frame
    FindDebounceElapsed,
    /// Run the pending find request
    FindFlush,
    /// Smooth discrete scroll never reported completion
    DiscreteScrollWatchdog,
    /// Smooth discrete scroll completed
    DiscreteScrollSettled,
    /// Re-check focus after a focus-out
    FocusOutCheck,
}

/// Completion signals the host can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ScrollEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Trigger {
    Frame,
    Timer { deadline: f64 },
    Completion(Signal),
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    trigger: Trigger,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    /// Milliseconds, same clock as frame timestamps
    now: f64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    fn push(&mut self, task: Task, trigger: Trigger) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            trigger,
        });
        handle
    }

    /// `requestAnimationFrame`
    pub fn request_frame(&mut self, task: Task) -> TaskHandle {
        self.push(task, Trigger::Frame)
    }

    /// `setTimeout`
    pub fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TaskHandle {
        let deadline = self.now + delay_ms as f64;
        self.push(task, Trigger::Timer { deadline })
    }

    /// One-shot listener for a completion signal
    pub fn on_completion(&mut self, signal: Signal, task: Task) -> TaskHandle {
        self.push(task, Trigger::Completion(signal))
    }

    /// Cancel pending work. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Marks the boundary of the current batch: work scheduled after this
    /// point belongs to the next frame or signal
    pub fn cutoff(&self) -> TaskHandle {
        TaskHandle(self.next_id)
    }

    fn pop_where<F>(&mut self, pred: F) -> Option<Task>
    where
        F: Fn(&Entry) -> bool,
    {
        let index = self.entries.iter().position(pred)?;
        Some(self.entries.remove(index).task)
    }

    /// Next frame callback registered before `cutoff`
    pub fn pop_frame(&mut self, cutoff: TaskHandle) -> Option<Task> {
        self.pop_where(|e| e.trigger == Trigger::Frame && e.handle < cutoff)
    }

    /// Next listener for `signal` registered before `cutoff`
    pub fn pop_completion(&mut self, signal: Signal, cutoff: TaskHandle) -> Option<Task> {
        self.pop_where(|e| e.trigger == Trigger::Completion(signal) && e.handle < cutoff)
    }

    /// Earliest timer due at `until`; the clock moves to its deadline
    pub fn pop_due_timer(&mut self, until: f64) -> Option<Task> {
        let (index, deadline) = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e.trigger {
                Trigger::Timer { deadline } if deadline <= until => Some((i, deadline)),
                _ => None,
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        self.now = self.now.max(deadline);
        Some(self.entries.remove(index).task)
    }

    /// Move the clock forward without running anything
    pub fn set_now(&mut self, now: f64) {
        self.now = self.now.max(now);
    }
}
