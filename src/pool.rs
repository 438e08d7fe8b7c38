//! Round-robin pool of reusable formatting buffers.
//!
//! Formatting a debug string wants scratch space that outlives the call
//! that produced it (the result is usually embedded in a larger log line)
//! without anyone managing lifetimes and without per-call heap churn. The
//! pool keeps a fixed ring of [`TEMP_BUFFER_POOL_SIZE`] string slots and
//! hands them out by atomically advancing a cursor; a slot's allocation is
//! reused forever and reclaimed only by being handed out again, once the
//! cursor has gone all the way around.
//!
//! Slot selection is lock-free. Slot *contents* sit behind a per-slot
//! mutex: when the ring wraps onto a buffer somebody still holds, the
//! new holder clobbers the old contents and the string garbles, but the
//! mutex rules out anything worse. With a ring this deep, a caller chain
//! would have to keep 32 buffers in flight at once to collide.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Depth of the buffer ring.
pub const TEMP_BUFFER_POOL_SIZE: usize = 32;

struct Slot {
    storage: Mutex<String>,
}

/// The fixed-depth ring of reusable string buffers.
pub struct TempBufferPool {
    slots: Vec<Arc<Slot>>,
    cursor: AtomicUsize,
}

impl TempBufferPool {
    /// Creates a pool with [`TEMP_BUFFER_POOL_SIZE`] empty slots.
    #[must_use]
    pub fn new() -> Self {
        TempBufferPool {
            slots: (0..TEMP_BUFFER_POOL_SIZE)
                .map(|_| {
                    Arc::new(Slot {
                        storage: Mutex::new(String::new()),
                    })
                })
                .collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Takes the next slot in the ring, cleared and grown to hold at least
    /// `min_size` bytes.
    ///
    /// Growing reuses the slot's previous allocation whenever it was
    /// already big enough. If the returned handle's slot is still held
    /// from `TEMP_BUFFER_POOL_SIZE` calls ago, that older handle now sees
    /// the cleared buffer.
    pub fn get(&self, min_size: usize) -> TempBuffer {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % TEMP_BUFFER_POOL_SIZE;
        let slot = self.slots[index].clone();
        {
            let mut storage = lock!(slot.storage);
            storage.clear();
            if storage.capacity() < min_size {
                storage.reserve(min_size);
            }
        }
        TempBuffer { slot }
    }

    /// Returns a buffer to the pool.
    ///
    /// A no-op: buffers are reclaimed by ring rotation, never freed
    /// early, and simply dropping the handle is equivalent. Kept so
    /// backends can account for `used` bytes if they care.
    pub fn release(&self, buf: TempBuffer, used: usize) {
        let _ = (buf, used);
    }
}

impl Default for TempBufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle to one pool slot's string.
///
/// Holds the slot alive (shared with the pool), implements
/// [`fmt::Write`] for building content and [`fmt::Display`] for embedding
/// the result in a larger message. Each operation locks the slot for its
/// own duration only, so a handle is freely `Send`. Displaying a stale
/// handle while content is being built on its (ring-reused) slot renders
/// as empty rather than blocking.
pub struct TempBuffer {
    slot: Arc<Slot>,
}

impl TempBuffer {
    /// Runs a closure with exclusive access to the underlying string.
    pub fn with<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        f(&mut lock!(self.slot.storage))
    }

    /// Current content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        lock!(self.slot.storage).len()
    }

    /// Whether the buffer holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity of the slot's current allocation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        lock!(self.slot.storage).capacity()
    }

    /// Discards the content, keeping the allocation.
    pub fn clear(&self) {
        lock!(self.slot.storage).clear();
    }

    /// Whether two handles are backed by the same pool slot.
    ///
    /// This is the observable form of ring reuse: the handle returned by
    /// the `TEMP_BUFFER_POOL_SIZE + 1`-th `get` shares storage with the
    /// first.
    #[must_use]
    pub fn shares_storage(&self, other: &TempBuffer) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Write for TempBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        lock!(self.slot.storage).push_str(s);
        Ok(())
    }
}

// Rendering can happen while content is being built on the colliding
// slot (a stale handle embedded in a format string after the ring
// wrapped). The slot mutex is not reentrant, so a blocking lock here
// would hang; try_lock renders such a collision as an empty string,
// which keeps it in garbled-output territory. The copy-then-write keeps
// the guard from being held across the formatter, whose target may be
// another slot.
impl fmt::Display for TempBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = match self.slot.storage.try_lock() {
            Ok(storage) => storage.clone(),
            Err(_) => return Ok(()),
        };
        f.write_str(&contents)
    }
}

impl fmt::Debug for TempBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = match self.slot.storage.try_lock() {
            Ok(storage) => storage.clone(),
            Err(_) => String::new(),
        };
        f.debug_tuple("TempBuffer").field(&contents).finish()
    }
}
