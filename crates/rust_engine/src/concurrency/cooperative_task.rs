//! Fiber-like cooperative scheduling primitive, independent of [`super::thread_group`].
//!
//! Stackful coroutines that suspend mid-stack-frame need inline assembly or
//! a dedicated fiber crate; stable Rust has no portable primitive for that,
//! so this models the same contract as a re-entrant state machine: `run` is
//! called repeatedly and is expected to track its own resume point, calling
//! `yield_now`/`yield_and_delay` only changes what `is_runnable` reports for
//! the *next* call.

/// Implemented by cooperative work items. `run` must return (not block) once
/// it has done one quantum of work; call `yield_and_delay` beforehand to
/// control when the scheduler will call `run` again.
pub trait CooperativeTaskRunnable: Send {
    /// Perform one quantum of work. The runnable is complete once this
    /// driver decides to call [`CooperativeTaskHandle::complete`] from
    /// within `run`, or returns having already marked itself complete.
    fn run(&mut self, ctx: &mut CooperativeTaskHandle);
}

/// Handle threaded through `run` giving the runnable control over its own
/// scheduling state.
pub struct CooperativeTaskHandle {
    current_time: f64,
    sleep_until: f64,
    complete: bool,
}

impl CooperativeTaskHandle {
    fn new() -> Self {
        Self {
            current_time: 0.0,
            sleep_until: 0.0,
            complete: false,
        }
    }

    /// Time passed to the current `run` invocation.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Mark this quantum done; the runnable remains runnable next tick.
    pub fn yield_now(&mut self) {}

    /// Mark this quantum done and request not to be resumed before `time`.
    pub fn yield_and_delay(&mut self, time: f64) {
        self.sleep_until = time;
    }

    /// Mark the runnable permanently complete.
    pub fn complete(&mut self) {
        self.complete = true;
    }
}

/// Owns a [`CooperativeTaskRunnable`] and drives it forward in discrete
/// quanta as the caller's event loop advances time.
pub struct CooperativeTask {
    runnable: Box<dyn CooperativeTaskRunnable>,
    handle: CooperativeTaskHandle,
}

impl CooperativeTask {
    /// Wrap a runnable, initially eligible to run at `time == 0.0`.
    pub fn new(runnable: Box<dyn CooperativeTaskRunnable>) -> Self {
        Self {
            runnable,
            handle: CooperativeTaskHandle::new(),
        }
    }

    /// `is_runnable(time) == !complete && time >= sleep_until`.
    pub fn is_runnable(&self, time: f64) -> bool {
        !self.handle.complete && time >= self.handle.sleep_until
    }

    /// True once the runnable has called `complete()`.
    pub fn is_complete(&self) -> bool {
        self.handle.complete
    }

    /// Advance the runnable by one quantum if it is runnable at `time`.
    pub fn resume(&mut self, time: f64) {
        if !self.is_runnable(time) {
            return;
        }
        self.handle.current_time = time;
        self.runnable.run(&mut self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountToThree {
        count: u32,
    }

    impl CooperativeTaskRunnable for CountToThree {
        fn run(&mut self, ctx: &mut CooperativeTaskHandle) {
            self.count += 1;
            if self.count >= 3 {
                ctx.complete();
            } else {
                ctx.yield_and_delay(ctx.current_time() + 1.0);
            }
        }
    }

    #[test]
    fn resumes_respecting_delay_and_completes() {
        let mut task = CooperativeTask::new(Box::new(CountToThree { count: 0 }));

        assert!(task.is_runnable(0.0));
        task.resume(0.0);
        assert!(!task.is_complete());

        assert!(!task.is_runnable(0.5));
        task.resume(0.5);
        assert!(!task.is_complete());

        assert!(task.is_runnable(1.0));
        task.resume(1.0);
        assert!(!task.is_complete());

        task.resume(2.0);
        assert!(task.is_complete());
        assert!(!task.is_runnable(3.0));
    }
}
