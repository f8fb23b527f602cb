//! Single-producer/single-consumer ring buffer and a payload-recycling
//! message queue built on top of it, used to ferry messages between a
//! realtime thread (the audio callback) and ordinary threads.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// A fixed-capacity SPSC ring built on [`ringbuf::HeapRb`]. Exactly one
/// thread may call the `write_*` methods and exactly one (possibly
/// different) thread may call the `read_*` methods concurrently and
/// safely; the producer/consumer halves are each wrapped in their own
/// uncontended mutex purely so the ring can live behind a shared `&self`.
pub struct LockFreeRingBuffer<T> {
    producer: Mutex<HeapProducer<T>>,
    consumer: Mutex<HeapConsumer<T>>,
    capacity: usize,
}

impl<T> LockFreeRingBuffer<T> {
    /// Create a ring able to hold `capacity` unread entries.
    pub fn new(capacity: usize) -> Self {
        let (producer, consumer) = HeapRb::new(capacity).split();
        Self {
            producer: Mutex::new(producer),
            consumer: Mutex::new(consumer),
            capacity,
        }
    }

    /// Number of entries available to read.
    pub fn read_avail(&self) -> usize {
        self.consumer.lock().unwrap().len()
    }

    /// Free slots available to write.
    pub fn write_avail(&self) -> usize {
        self.producer.lock().unwrap().free_len()
    }

    /// Push a single value. Returns `false` (and drops `value`) if the
    /// ring is full.
    pub fn write(&self, value: T) -> bool {
        self.producer.lock().unwrap().push(value).is_ok()
    }

    /// Pop a single value, or `None` if nothing is available.
    pub fn read(&self) -> Option<T> {
        self.consumer.lock().unwrap().pop()
    }

    /// Total ring capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Opaque, recyclable message payload. `capacity` may exceed `len` because
/// buffers are drawn from a power-of-two size bucket.
pub struct MessageQueuePayload {
    data: Vec<u8>,
    capacity: usize,
}

impl MessageQueuePayload {
    /// Number of bytes actually written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bucket capacity this payload was drawn from.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the full backing buffer up to `capacity`.
    pub fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }
}

const BUCKET_SIZES: [usize; 8] = [256, 512, 1024, 2048, 4096, 8192, 16384, 32768];
const READ_RING_CAPACITY: usize = 32 * 1024;

/// Bucketed allocator feeding a single SPSC read ring. One thread allocates
/// and pushes payloads (producer), another reads and recycles them
/// (consumer).
pub struct LockFreeMessageQueue {
    read_ring: LockFreeRingBuffer<MessageQueuePayload>,
    free_buckets: [Mutex<Vec<MessageQueuePayload>>; 8],
}

impl Default for LockFreeMessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LockFreeMessageQueue {
    /// Construct a queue with empty free buckets, populated lazily on the
    /// first allocation miss for each bucket size.
    pub fn new() -> Self {
        Self {
            read_ring: LockFreeRingBuffer::new(READ_RING_CAPACITY),
            free_buckets: Default::default(),
        }
    }

    fn bucket_index(size: usize) -> usize {
        BUCKET_SIZES
            .iter()
            .position(|&cap| cap >= size)
            .unwrap_or(BUCKET_SIZES.len() - 1)
    }

    /// Draw a payload able to hold at least `size` bytes, reusing a
    /// recycled buffer from the matching bucket when available.
    pub fn allocate_write_payload(&self, size: usize) -> MessageQueuePayload {
        let idx = Self::bucket_index(size);
        let capacity = BUCKET_SIZES[idx];
        if let Some(mut payload) = self.free_buckets[idx].lock().unwrap().pop() {
            payload.data.clear();
            return payload;
        }
        MessageQueuePayload {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Publish a written payload into the read ring. Returns `false` if the
    /// ring is full; the payload is dropped in that case.
    pub fn push_written_payload(&self, payload: MessageQueuePayload) -> bool {
        self.read_ring.write(payload)
    }

    /// Number of messages ready to be read.
    pub fn available_read_messages(&self) -> usize {
        self.read_ring.read_avail()
    }

    /// Pop the next ready message, if any.
    pub fn read_message(&self) -> Option<MessageQueuePayload> {
        self.read_ring.read()
    }

    /// Return a payload to its bucket's free list for reuse.
    pub fn recycle_payload(&self, payload: MessageQueuePayload) {
        let idx = Self::bucket_index(payload.capacity);
        self.free_buckets[idx].lock().unwrap().push(payload);
    }
}

/// Multi-producer/multi-consumer wrapper around [`LockFreeMessageQueue`]
/// adding a cork gate: while corked, allocation fails fast without touching
/// the underlying rings.
pub struct MessageQueue {
    inner: LockFreeMessageQueue,
    lock: Mutex<()>,
    corked: AtomicBool,
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageQueue {
    /// Construct an uncorked queue.
    pub fn new() -> Self {
        Self {
            inner: LockFreeMessageQueue::new(),
            lock: Mutex::new(()),
            corked: AtomicBool::new(false),
        }
    }

    /// Stop accepting new allocations until `uncork`.
    pub fn cork(&self) {
        self.corked.store(true, Ordering::Release);
    }

    /// Resume accepting allocations.
    pub fn uncork(&self) {
        self.corked.store(false, Ordering::Release);
    }

    /// Whether the queue currently accepts allocations.
    pub fn is_uncorked(&self) -> bool {
        !self.corked.load(Ordering::Acquire)
    }

    /// Allocate a payload, or `None` if corked.
    pub fn allocate_write_payload(&self, size: usize) -> Option<MessageQueuePayload> {
        if self.corked.load(Ordering::Acquire) {
            return None;
        }
        let _guard = self.lock.lock().unwrap();
        Some(self.inner.allocate_write_payload(size))
    }

    /// Publish a payload. No-op (payload dropped) if corked.
    pub fn push_written_payload(&self, payload: MessageQueuePayload) -> bool {
        if self.corked.load(Ordering::Acquire) {
            return false;
        }
        let _guard = self.lock.lock().unwrap();
        self.inner.push_written_payload(payload)
    }

    /// Number of messages ready to be read.
    pub fn available_read_messages(&self) -> usize {
        let _guard = self.lock.lock().unwrap();
        self.inner.available_read_messages()
    }

    /// Pop the next ready message.
    pub fn read_message(&self) -> Option<MessageQueuePayload> {
        let _guard = self.lock.lock().unwrap();
        self.inner.read_message()
    }

    /// Return a payload to its free bucket.
    pub fn recycle_payload(&self, payload: MessageQueuePayload) {
        let _guard = self.lock.lock().unwrap();
        self.inner.recycle_payload(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_capacity_invariant() {
        let ring = LockFreeRingBuffer::new(4);
        for i in 0..4 {
            assert!(ring.write(i));
        }
        assert_eq!(ring.write_avail(), 0);
        assert!(!ring.write(99));

        for i in 0..4 {
            assert_eq!(ring.read(), Some(i));
        }
        assert!(ring.read().is_none());
    }

    #[test]
    fn payload_recycling_reuses_capacity() {
        let queue = LockFreeMessageQueue::new();
        let payload = queue.allocate_write_payload(300);
        assert!(payload.capacity() >= 300);
        queue.recycle_payload(payload);

        let payload2 = queue.allocate_write_payload(300);
        assert_eq!(payload2.capacity(), 512);
    }

    #[test]
    fn corked_queue_rejects_allocation() {
        let queue = MessageQueue::new();
        queue.cork();
        assert!(queue.allocate_write_payload(64).is_none());
        queue.uncork();
        assert!(queue.allocate_write_payload(64).is_some());
    }

    #[test]
    fn message_round_trips_through_read_ring() {
        let queue = LockFreeMessageQueue::new();
        let mut payload = queue.allocate_write_payload(16);
        payload.bytes_mut().extend_from_slice(b"hello");
        assert!(queue.push_written_payload(payload));

        assert_eq!(queue.available_read_messages(), 1);
        let read = queue.read_message().unwrap();
        assert_eq!(read.bytes(), b"hello");
        queue.recycle_payload(read);
    }
}
