//! Concurrency and scheduling substrate: the worker thread pool, the
//! lock-free message queue feeding realtime/non-realtime threads, and the
//! cooperative task scheduler used by scripted/event-driven code.

pub mod cooperative_task;
pub mod message_queue;
pub mod thread_group;

pub use cooperative_task::{CooperativeTask, CooperativeTaskHandle, CooperativeTaskRunnable};
pub use message_queue::{LockFreeMessageQueue, LockFreeRingBuffer, MessageQueue, MessageQueuePayload};
pub use thread_group::{TaskClass, TaskGroup, TaskSignal, ThreadGroup, ThreadGroupError};
