use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin cursor over the image library, shared by all request handlers.
#[derive(Debug, Default)]
pub struct Rotation {
    counter: AtomicUsize,
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position to serve next out of `len` images, advancing the cursor.
    /// Returns `None` when `len` is 0.
    pub fn next(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // Relaxed is enough: each caller just needs a distinct ticket.
        Some(self.counter.fetch_add(1, Ordering::Relaxed) % len)
    }

    /// Requests served so far.
    pub fn served(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}
