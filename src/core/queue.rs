// queue.rs -- Bounded blocking queues and producer/consumer plumbing.
//
// Two implementations behind one `Queue` trait:
//   - QueueMPMC: VecDeque guarded by a mutex, any number of threads on
//     either end.
//   - QueueSPSC: fixed ring of slots. `split()` hands out one producer and
//     one consumer endpoint that cannot be cloned, so the single-ended
//     contract is enforced by ownership.
//
// Both block on condition variables: `push` while full, `pop` while
// empty. `stop()` wakes every waiter; afterwards pushes fail and pops
// drain what is left, then return None.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::error::{Error, Result};

/// Bounded FIFO shared between threads.
pub trait Queue<T: Send>: Send + Sync {
    /// Blocks while the queue is full. Fails once stopped.
    fn push(&self, value: T) -> Result<()>;

    /// Non-blocking push. Gives the value back when full or stopped.
    fn try_push(&self, value: T) -> std::result::Result<(), T>;

    /// Blocks while empty. None once stopped and drained.
    fn pop(&self) -> Option<T>;

    fn try_pop(&self) -> Option<T>;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Refuse further pushes and wake all blocked threads.
    fn stop(&self);

    fn is_stopped(&self) -> bool;
}

// ============================================================
// MPMC
// ============================================================

struct MpmcState<T> {
    items: VecDeque<T>,
    stopped: bool,
}

/// Multi-producer, multi-consumer bounded queue.
pub struct QueueMPMC<T> {
    state: Mutex<MpmcState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> QueueMPMC<T> {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        QueueMPMC {
            state: Mutex::new(MpmcState {
                items: VecDeque::with_capacity(capacity),
                stopped: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }
}

impl<T: Send> Queue<T> for QueueMPMC<T> {
    fn push(&self, value: T) -> Result<()> {
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity && !state.stopped {
            self.not_full.wait(&mut state);
        }
        if state.stopped {
            return Err(Error::QueueStopped);
        }
        state.items.push_back(value);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    fn try_push(&self, value: T) -> std::result::Result<(), T> {
        let mut state = self.state.lock();
        if state.stopped || state.items.len() >= self.capacity {
            return Err(value);
        }
        state.items.push_back(value);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        while state.items.is_empty() && !state.stopped {
            self.not_empty.wait(&mut state);
        }
        let value = state.items.pop_front();
        drop(state);
        if value.is_some() {
            self.not_full.notify_one();
        }
        value
    }

    fn try_pop(&self) -> Option<T> {
        let value = self.state.lock().items.pop_front();
        if value.is_some() {
            self.not_full.notify_one();
        }
        value
    }

    fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn stop(&self) {
        self.state.lock().stopped = true;
        trace!("mpmc queue stopped");
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }
}

// ============================================================
// SPSC
// ============================================================

struct Ring<T> {
    slots: Vec<Option<T>>,
    head: usize, // next slot to read
    len: usize,
    stopped: bool,
}

impl<T> Ring<T> {
    fn put(&mut self, value: T) {
        let cap = self.slots.len();
        let tail = (self.head + self.len) % cap;
        self.slots[tail] = Some(value);
        self.len += 1;
    }

    fn take(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        value
    }
}

/// Single-producer, single-consumer bounded ring.
pub struct QueueSPSC<T> {
    ring: Mutex<Ring<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> QueueSPSC<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        QueueSPSC {
            ring: Mutex::new(Ring {
                slots: (0..capacity).map(|_| None).collect(),
                head: 0,
                len: 0,
                stopped: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }
}

impl<T: Send> QueueSPSC<T> {
    /// Split into the two endpoints.
    pub fn split(self) -> (SpscProducer<T>, SpscConsumer<T>) {
        let shared = Arc::new(self);
        (
            SpscProducer { queue: Arc::clone(&shared) },
            SpscConsumer { queue: shared },
        )
    }
}

impl<T: Send> Queue<T> for QueueSPSC<T> {
    fn push(&self, value: T) -> Result<()> {
        let mut ring = self.ring.lock();
        while ring.len == ring.slots.len() && !ring.stopped {
            self.not_full.wait(&mut ring);
        }
        if ring.stopped {
            return Err(Error::QueueStopped);
        }
        ring.put(value);
        drop(ring);
        self.not_empty.notify_one();
        Ok(())
    }

    fn try_push(&self, value: T) -> std::result::Result<(), T> {
        let mut ring = self.ring.lock();
        if ring.stopped || ring.len == ring.slots.len() {
            return Err(value);
        }
        ring.put(value);
        drop(ring);
        self.not_empty.notify_one();
        Ok(())
    }

    fn pop(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        while ring.len == 0 && !ring.stopped {
            self.not_empty.wait(&mut ring);
        }
        let value = ring.take();
        drop(ring);
        if value.is_some() {
            self.not_full.notify_one();
        }
        value
    }

    fn try_pop(&self) -> Option<T> {
        let value = self.ring.lock().take();
        if value.is_some() {
            self.not_full.notify_one();
        }
        value
    }

    fn len(&self) -> usize {
        self.ring.lock().len
    }

    fn capacity(&self) -> usize {
        self.ring.lock().slots.len()
    }

    fn stop(&self) {
        self.ring.lock().stopped = true;
        trace!("spsc queue stopped");
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn is_stopped(&self) -> bool {
        self.ring.lock().stopped
    }
}

/// Write end of a split `QueueSPSC`.
pub struct SpscProducer<T> {
    queue: Arc<QueueSPSC<T>>,
}

impl<T: Send> SpscProducer<T> {
    pub fn push(&self, value: T) -> Result<()> {
        self.queue.push(value)
    }

    pub fn try_push(&self, value: T) -> std::result::Result<(), T> {
        self.queue.try_push(value)
    }

    /// Signal end of stream to the consumer.
    pub fn close(self) {
        self.queue.stop();
    }
}

/// Read end of a split `QueueSPSC`.
pub struct SpscConsumer<T> {
    queue: Arc<QueueSPSC<T>>,
}

impl<T: Send> SpscConsumer<T> {
    pub fn pop(&self) -> Option<T> {
        self.queue.pop()
    }

    pub fn try_pop(&self) -> Option<T> {
        self.queue.try_pop()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T: Send> Iterator for SpscConsumer<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop()
    }
}

// ============================================================
// Producer / Consumer
// ============================================================

/// Fills a queue. Closures `FnMut(&dyn Queue<T>) -> Result<()>` qualify.
pub trait Producer<T: Send>: Send {
    fn produce(&mut self, queue: &dyn Queue<T>) -> Result<()>;
}

/// Drains a queue.
pub trait Consumer<T: Send>: Send {
    fn consume(&mut self, queue: &dyn Queue<T>) -> Result<()>;
}

impl<T: Send, F> Producer<T> for F
where
    F: FnMut(&dyn Queue<T>) -> Result<()> + Send,
{
    fn produce(&mut self, queue: &dyn Queue<T>) -> Result<()> {
        self(queue)
    }
}

/// Adapter turning a closure into a `Consumer`. A second blanket impl
/// would overlap with the one on `Producer`, so consumers are wrapped.
pub struct FnConsumer<F>(pub F);

impl<T: Send, F> Consumer<T> for FnConsumer<F>
where
    F: FnMut(&dyn Queue<T>) -> Result<()> + Send,
{
    fn consume(&mut self, queue: &dyn Queue<T>) -> Result<()> {
        (self.0)(queue)
    }
}

pub fn spawn_producer<T, P>(mut producer: P, queue: Arc<dyn Queue<T>>) -> JoinHandle<Result<()>>
where
    T: Send + 'static,
    P: Producer<T> + 'static,
{
    thread::spawn(move || producer.produce(queue.as_ref()))
}

pub fn spawn_consumer<T, C>(mut consumer: C, queue: Arc<dyn Queue<T>>) -> JoinHandle<Result<()>>
where
    T: Send + 'static,
    C: Consumer<T> + 'static,
{
    thread::spawn(move || consumer.consume(queue.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn test_mpmc_fifo_and_bounds() {
        let q = QueueMPMC::new(3);
        assert!(q.is_empty());
        q.push(1).unwrap();
        q.push(2).unwrap();
        q.push(3).unwrap();
        assert!(q.is_full());
        assert_eq!(q.try_push(4), Err(4));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.try_pop(), Some(2));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_stop_semantics() {
        let q = QueueMPMC::new(4);
        q.push("a").unwrap();
        q.stop();
        assert!(q.is_stopped());
        assert!(matches!(q.push("b"), Err(Error::QueueStopped)));
        assert_eq!(q.try_push("c"), Err("c"));
        assert_eq!(q.pop(), Some("a"));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_stop_wakes_blocked_consumer() {
        let q: Arc<dyn Queue<u32>> = Arc::new(QueueMPMC::new(2));
        let q2 = Arc::clone(&q);
        let handle = thread::spawn(move || q2.pop());
        thread::sleep(Duration::from_millis(20));
        q.stop();
        assert_eq!(handle.join().unwrap(), None);
    }

    #[test]
    fn test_blocking_push_resumes_after_pop() {
        let q: Arc<dyn Queue<u32>> = Arc::new(QueueMPMC::new(1));
        q.push(1).unwrap();
        let q2 = Arc::clone(&q);
        let handle = thread::spawn(move || q2.push(2));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(q.pop(), Some(1));
        handle.join().unwrap().unwrap();
        assert_eq!(q.pop(), Some(2));
    }

    #[test]
    fn test_mpmc_many_producers_consumers() {
        const PRODUCERS: u32 = 4;
        const ITEMS: u32 = 500;
        let q: Arc<dyn Queue<u32>> = Arc::new(QueueMPMC::new(16));

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                spawn_producer(
                    move |queue: &dyn Queue<u32>| {
                        for i in 0..ITEMS {
                            queue.push(p * ITEMS + i)?;
                        }
                        Ok(())
                    },
                    Arc::clone(&q),
                )
            })
            .collect();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let seen = Arc::clone(&seen);
                spawn_consumer(
                    FnConsumer(move |queue: &dyn Queue<u32>| {
                        while let Some(v) = queue.pop() {
                            seen.lock().push(v);
                        }
                        Ok(())
                    }),
                    Arc::clone(&q),
                )
            })
            .collect();

        for p in producers {
            p.join().unwrap().unwrap();
        }
        q.stop();
        for c in consumers {
            c.join().unwrap().unwrap();
        }

        let seen = seen.lock();
        assert_eq!(seen.len(), (PRODUCERS * ITEMS) as usize);
        let unique: HashSet<u32> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn test_spsc_ring_wraps() {
        let q = QueueSPSC::new(2);
        for round in 0..5 {
            q.push(round * 2).unwrap();
            q.push(round * 2 + 1).unwrap();
            assert!(q.is_full());
            assert_eq!(q.pop(), Some(round * 2));
            assert_eq!(q.pop(), Some(round * 2 + 1));
        }
        assert!(q.is_empty());
        assert_eq!(q.capacity(), 2);
    }

    #[test]
    fn test_spsc_split_preserves_order() {
        let (tx, rx) = QueueSPSC::new(8).split();
        let handle = thread::spawn(move || {
            for i in 0..1000u32 {
                tx.push(i).unwrap();
            }
            tx.close();
        });
        let received: Vec<u32> = rx.collect();
        handle.join().unwrap();
        assert_eq!(received, (0..1000).collect::<Vec<_>>());
    }
}
