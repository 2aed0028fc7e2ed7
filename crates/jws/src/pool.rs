//! A small pool of reusable scratch buffers for the signing-input builder's
//! hot path.
//!
//! Pooling here is purely a performance device: nothing about a sign or
//! verify call's observable result depends on whether its scratch buffer
//! was freshly allocated or recycled. Every buffer handed out is cleared
//! before use, synchronously, on the same thread that released it — unlike
//! this pool's inspiration, which clears its scratch maps on a spawned
//! goroutine after returning the buffer to the caller. That's a race
//! against the next `Get`, tolerable there only because a losing reader
//! just sees a not-yet-cleared map. A `Vec<u8>` reused for `dst.extend_from_slice`
//! has no such tolerance, so this port clears inline instead of reproducing
//! the race.

use std::sync::Mutex;

/// A free list of scratch buffers, sized by first-use and reused after
/// that. Safe to share across threads; every checkout clears its buffer
/// before returning it, so callers never observe another checkout's data.
pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
        }
    }

    /// Checks out a buffer, allocating a new one only if the pool is empty.
    pub fn get(&self) -> Vec<u8> {
        let mut buffers = self.buffers.lock().expect("buffer pool mutex poisoned");
        buffers.pop().unwrap_or_default()
    }

    /// Clears `buf` and returns it to the pool for reuse.
    pub fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        let mut buffers = self.buffers.lock().expect("buffer pool mutex poisoned");
        buffers.push(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
