//! Heterogeneous worker pool with a task DAG.
//!
//! Two independent priority classes (foreground, background) each own their
//! own ready queue. A [`TaskGroup`] batches tasks that have no ordering
//! requirement between each other; [`ThreadGroup::add_dependency`] establishes
//! strict happens-before ordering between groups.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Errors surfaced by thread group operations.
#[derive(Debug, thiserror::Error)]
pub enum ThreadGroupError {
    /// `enqueue_task` was called on a group that already called `flush`/`submit`.
    #[error("task group already flushed")]
    AlreadyFlushed,
    /// An operation requires workers but `start` was never called.
    #[error("thread group not started")]
    NotStarted,
}

/// Priority class a task belongs to. Foreground work preempts background
/// work only in the sense that it has its own dedicated worker set; there is
/// no priority inversion handling beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskClass {
    /// Default class: rendering, gameplay, anything latency sensitive.
    Foreground,
    /// Low priority class: asset baking, PSO warm-up, file IO.
    Background,
}

/// Refcounted monotonic counter incremented once per completed `TaskGroup`.
/// Useful for "wait at least N completions" style synchronization that
/// outlives the group itself.
#[derive(Default)]
pub struct TaskSignal {
    lock: Mutex<u64>,
    cond: Condvar,
}

impl TaskSignal {
    /// Create a fresh signal with counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter and wake any waiters.
    pub fn signal_increment(&self) {
        let mut guard = self.lock.lock().unwrap();
        *guard += 1;
        self.cond.notify_all();
    }

    /// Block until the counter reaches at least `count`.
    pub fn wait_until_at_least(&self, count: u64) {
        let mut guard = self.lock.lock().unwrap();
        while *guard < count {
            guard = self.cond.wait(guard).unwrap();
        }
    }

    /// Current counter value.
    pub fn get_count(&self) -> u64 {
        *self.lock.lock().unwrap()
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

struct PendingTask {
    deps: Arc<TaskDeps>,
    job: Job,
}

/// Internal refcounted dependency state shared by every task in a group.
struct TaskDeps {
    /// Remaining tasks in the group.
    count: AtomicU32,
    /// Remaining unsatisfied upstream groups, seeded at 1 for the implicit flush.
    dependency_count: AtomicU32,
    /// Downstream groups to notify once this group finishes.
    pending: Mutex<Vec<Arc<TaskDeps>>>,
    /// Tasks waiting for `dependency_count` to reach zero.
    pending_tasks: Mutex<Vec<Job>>,
    done: AtomicBool,
    cond_lock: Mutex<()>,
    cond: Condvar,
    signal: Mutex<Option<Arc<TaskSignal>>>,
    task_class: TaskClass,
    desc: Mutex<String>,
}

impl TaskDeps {
    fn new(task_class: TaskClass) -> Arc<Self> {
        Arc::new(Self {
            count: AtomicU32::new(0),
            dependency_count: AtomicU32::new(1),
            pending: Mutex::new(Vec::new()),
            pending_tasks: Mutex::new(Vec::new()),
            done: AtomicBool::new(false),
            cond_lock: Mutex::new(()),
            cond: Condvar::new(),
            signal: Mutex::new(None),
            task_class,
            desc: Mutex::new(String::new()),
        })
    }
}

/// A batch of tasks with no ordering requirement between each other.
///
/// A group must be flushed (via [`ThreadGroup::submit`] or
/// [`TaskGroup::flush`]) exactly once.
pub struct TaskGroup {
    deps: Arc<TaskDeps>,
    flushed: AtomicBool,
}

impl TaskGroup {
    /// Human readable description, truncated like the 63-byte C string this
    /// mirrors; useful for trace output.
    pub fn set_desc(&self, desc: impl Into<String>) {
        let mut s = desc.into();
        s.truncate(63);
        *self.deps.desc.lock().unwrap() = s;
    }

    /// Attach a `TaskSignal` that is incremented when this group completes.
    pub fn set_fence_counter_signal(&self, signal: Arc<TaskSignal>) {
        *self.deps.signal.lock().unwrap() = Some(signal);
    }

    /// True once every task in the group has run and all upstream
    /// dependencies were satisfied.
    pub fn poll(&self) -> bool {
        self.deps.done.load(Ordering::Acquire)
    }

    /// Block the calling thread until the group completes.
    pub fn wait(&self) {
        let mut guard = self.deps.cond_lock.lock().unwrap();
        while !self.deps.done.load(Ordering::Acquire) {
            guard = self.deps.cond.wait(guard).unwrap();
        }
    }
}

struct ClassQueue {
    sender: Mutex<Option<Sender<PendingTask>>>,
    receiver: Receiver<PendingTask>,
}

impl ClassQueue {
    fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    fn send(&self, task: PendingTask) {
        if let Some(sender) = self.sender.lock().unwrap().as_ref() {
            let _ = sender.send(task);
        }
    }

    /// Drop the sender half so parked workers observe a closed channel.
    fn close(&self) {
        self.sender.lock().unwrap().take();
    }
}

struct Shared {
    fg: ClassQueue,
    bg: ClassQueue,
    total_tasks: AtomicU64,
    completed_tasks: AtomicU64,
    wait_lock: Mutex<()>,
    wait_cond: Condvar,
}

impl Shared {
    fn class_queue(&self, class: TaskClass) -> &ClassQueue {
        match class {
            TaskClass::Foreground => &self.fg,
            TaskClass::Background => &self.bg,
        }
    }

    /// Release tasks whose dependency_count just reached zero into their
    /// class's ready queue.
    fn release_pending(&self, deps: &Arc<TaskDeps>) {
        let jobs = std::mem::take(&mut *deps.pending_tasks.lock().unwrap());
        for job in jobs {
            let queue = self.class_queue(deps.task_class);
            self.total_tasks.fetch_add(1, Ordering::Relaxed);
            queue.send(PendingTask {
                deps: deps.clone(),
                job,
            });
        }
    }

    fn dependency_satisfied(&self, deps: &Arc<TaskDeps>) {
        if deps.dependency_count.fetch_sub(1, Ordering::AcqRel) == 1 {
            // Group has no unsatisfied upstream left: if it also has no
            // tasks of its own (created empty), it is immediately done.
            self.release_pending(deps);
            if deps.count.load(Ordering::Acquire) == 0 {
                self.mark_done(deps);
            }
        }
    }

    fn mark_done(&self, deps: &Arc<TaskDeps>) {
        if deps.done.swap(true, Ordering::AcqRel) {
            return;
        }
        {
            let _guard = deps.cond_lock.lock().unwrap();
        }
        deps.cond.notify_all();
        if let Some(signal) = deps.signal.lock().unwrap().as_ref() {
            signal.signal_increment();
        }
        for downstream in deps.pending.lock().unwrap().iter() {
            self.dependency_satisfied(downstream);
        }
    }

    fn task_completed(&self, deps: &Arc<TaskDeps>) {
        self.completed_tasks.fetch_add(1, Ordering::Relaxed);
        if deps.count.fetch_sub(1, Ordering::AcqRel) == 1
            && deps.dependency_count.load(Ordering::Acquire) == 0
        {
            self.mark_done(deps);
        }
        let (total, completed) = (
            self.total_tasks.load(Ordering::Acquire),
            self.completed_tasks.load(Ordering::Acquire),
        );
        if completed >= total {
            let _guard = self.wait_lock.lock().unwrap();
            self.wait_cond.notify_all();
        }
    }
}

/// Parallel worker pool split into foreground and background priority
/// classes. Tasks are run to completion; there is no cancellation.
pub struct ThreadGroup {
    shared: Arc<Shared>,
    fg_threads: Mutex<Vec<JoinHandle<()>>>,
    bg_threads: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl Default for ThreadGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadGroup {
    /// Construct an unstarted thread group; call `start` to spawn workers.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                fg: ClassQueue::new(),
                bg: ClassQueue::new(),
                total_tasks: AtomicU64::new(0),
                completed_tasks: AtomicU64::new(0),
                wait_lock: Mutex::new(()),
                wait_cond: Condvar::new(),
            }),
            fg_threads: Mutex::new(Vec::new()),
            bg_threads: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        }
    }

    /// Spawn `num_threads_foreground` + `num_threads_background` workers.
    /// `on_thread_begin` runs once on each new worker thread before it starts
    /// looping (useful for thread-local context setup).
    pub fn start<F>(&self, num_threads_foreground: usize, num_threads_background: usize, on_thread_begin: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let on_thread_begin = Arc::new(on_thread_begin);
        let mut fg = self.fg_threads.lock().unwrap();
        for i in 0..num_threads_foreground {
            fg.push(self.spawn_worker(format!("FG-{i}"), TaskClass::Foreground, on_thread_begin.clone()));
        }
        let mut bg = self.bg_threads.lock().unwrap();
        for i in 0..num_threads_background {
            bg.push(self.spawn_worker(format!("BG-{i}"), TaskClass::Background, on_thread_begin.clone()));
        }
        self.started.store(true, Ordering::Release);
        log::info!(
            "thread group started with {num_threads_foreground} foreground, {num_threads_background} background workers"
        );
    }

    fn spawn_worker(
        &self,
        name: String,
        class: TaskClass,
        on_thread_begin: Arc<dyn Fn() + Send + Sync>,
    ) -> JoinHandle<()> {
        let shared = self.shared.clone();
        thread::Builder::new()
            .name(name)
            .spawn(move || {
                on_thread_begin();
                let receiver = shared.class_queue(class).receiver.clone();
                while let Ok(task) = receiver.recv() {
                    (task.job)();
                    shared.task_completed(&task.deps);
                }
            })
            .expect("failed to spawn thread group worker")
    }

    /// Total number of worker threads across both classes.
    pub fn num_threads(&self) -> usize {
        self.fg_threads.lock().unwrap().len() + self.bg_threads.lock().unwrap().len()
    }

    /// Create a new group containing a single task.
    pub fn create_task<Func>(&self, func: Func) -> TaskGroup
    where
        Func: FnOnce() + Send + 'static,
    {
        let deps = TaskDeps::new(TaskClass::Foreground);
        deps.count.store(1, Ordering::Relaxed);
        deps.pending_tasks.lock().unwrap().push(Box::new(func));
        TaskGroup {
            deps,
            flushed: AtomicBool::new(false),
        }
    }

    /// Create an empty group (useful to attach dependencies before any task
    /// is enqueued).
    pub fn create_empty_task(&self) -> TaskGroup {
        TaskGroup {
            deps: TaskDeps::new(TaskClass::Foreground),
            flushed: AtomicBool::new(false),
        }
    }

    /// Add one more task to an unflushed group.
    pub fn enqueue_task<Func>(&self, group: &TaskGroup, func: Func) -> Result<(), ThreadGroupError>
    where
        Func: FnOnce() + Send + 'static,
    {
        if group.flushed.load(Ordering::Acquire) {
            return Err(ThreadGroupError::AlreadyFlushed);
        }
        group.deps.count.fetch_add(1, Ordering::AcqRel);
        group.deps.pending_tasks.lock().unwrap().push(Box::new(func));
        Ok(())
    }

    /// Register that no task of `dependee` may begin before every task of
    /// `dependency` has observably completed.
    pub fn add_dependency(&self, dependee: &TaskGroup, dependency: &TaskGroup) {
        dependee.deps.dependency_count.fetch_add(1, Ordering::AcqRel);
        dependency.deps.pending.lock().unwrap().push(dependee.deps.clone());
    }

    /// Flush a group, releasing any tasks whose dependencies are already
    /// satisfied into the ready queues.
    pub fn submit(&self, group: &TaskGroup) {
        if group.flushed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shared.dependency_satisfied(&group.deps);
    }

    /// Block until every task currently tracked by this thread group (across
    /// both classes) has completed. Does not prevent new tasks from being
    /// submitted concurrently by another thread.
    pub fn wait_idle(&self) {
        let mut guard = self.shared.wait_lock.lock().unwrap();
        while self.shared.completed_tasks.load(Ordering::Acquire) < self.shared.total_tasks.load(Ordering::Acquire) {
            guard = self.shared.wait_cond.wait(guard).unwrap();
        }
    }

    /// True if every submitted task has completed.
    pub fn is_idle(&self) -> bool {
        self.shared.completed_tasks.load(Ordering::Acquire) >= self.shared.total_tasks.load(Ordering::Acquire)
    }

    /// Wait idle, then drop the worker threads. Tasks already running finish;
    /// nothing new may be scheduled afterwards.
    pub fn stop(&self) {
        self.wait_idle();
        self.shared.fg.close();
        self.shared.bg.close();
        for handle in self.fg_threads.lock().unwrap().drain(..) {
            let _ = handle.join();
        }
        for handle in self.bg_threads.lock().unwrap().drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn s1_taskgroup_fanout() {
        let tg = ThreadGroup::new();
        tg.start(4, 0, || {});

        let counter = Arc::new(AtomicUsize::new(0));
        let group = tg.create_empty_task();
        for _ in 0..1000 {
            let counter = counter.clone();
            tg.enqueue_task(&group, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        tg.submit(&group);
        group.wait();

        assert_eq!(counter.load(Ordering::SeqCst), 1000);
        assert!(group.poll());
    }

    #[test]
    fn s2_taskgroup_chain() {
        let tg = ThreadGroup::new();
        tg.start(4, 0, || {});

        let log = Arc::new(Mutex::new(Vec::new()));
        let g1 = tg.create_empty_task();
        for _ in 0..10 {
            let log = log.clone();
            tg.enqueue_task(&g1, move || log.lock().unwrap().push('A')).unwrap();
        }
        let g2 = tg.create_empty_task();
        for _ in 0..10 {
            let log = log.clone();
            tg.enqueue_task(&g2, move || log.lock().unwrap().push('B')).unwrap();
        }
        tg.add_dependency(&g2, &g1);

        // Submission order must not matter.
        tg.submit(&g2);
        tg.submit(&g1);
        tg.wait_idle();

        let log = log.lock().unwrap();
        let last_a = log.iter().rposition(|&c| c == 'A').unwrap();
        let first_b = log.iter().position(|&c| c == 'B').unwrap();
        assert!(last_a < first_b);
    }

    #[test]
    fn enqueue_after_flush_is_rejected() {
        let tg = ThreadGroup::new();
        tg.start(1, 0, || {});
        let group = tg.create_task(|| {});
        tg.submit(&group);
        group.wait();
        assert!(matches!(
            tg.enqueue_task(&group, || {}),
            Err(ThreadGroupError::AlreadyFlushed)
        ));
    }

    #[test]
    fn task_signal_wait_until_at_least() {
        let tg = ThreadGroup::new();
        tg.start(2, 0, || {});
        let signal = Arc::new(TaskSignal::new());

        for _ in 0..3 {
            let group = tg.create_task(|| {});
            group.set_fence_counter_signal(signal.clone());
            tg.submit(&group);
            group.wait();
        }
        signal.wait_until_at_least(3);
        assert_eq!(signal.get_count(), 3);
    }
}
