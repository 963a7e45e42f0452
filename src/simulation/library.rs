// src/simulation/library.rs
//! Library: a fixed-capacity pool of interchangeable books behind one lock
//!
//! Every read or mutation of the shelf happens under the library's own mutex.
//! `checkout` is non-blocking by design: a reader that finds no book available
//! gets `None` immediately and abandons instead of queueing.

use parking_lot::Mutex;

/// A library holding K interchangeable books
pub struct Library {
    /// Library index within the simulation
    id: usize,

    /// Fixed book count; the shelf never grows or shrinks after creation
    capacity: usize,

    /// Availability flags, one per book. `true` means on the shelf.
    shelf: Mutex<Vec<bool>>,
}

impl Library {
    /// Create a library with all books available
    pub fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            shelf: Mutex::new(vec![true; capacity]),
        }
    }

    /// Library index
    pub fn id(&self) -> usize {
        self.id
    }

    /// Total book count (available plus checked out)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the lowest-indexed available book off the shelf.
    ///
    /// The scan and the flip are one critical section; concurrent callers
    /// never observe an intermediate state or take the same book. Returns
    /// `None` immediately when the shelf is empty, with no side effects.
    pub fn checkout(&self) -> Option<usize> {
        let mut shelf = self.shelf.lock();

        let book = shelf.iter().position(|&available| available)?;
        shelf[book] = false;

        Some(book)
    }

    /// Put a previously checked-out book back on the shelf.
    ///
    /// The caller must only return a book it checked out from this same
    /// library; that is a precondition, not a runtime-checked error.
    pub fn return_book(&self, book: usize) {
        let mut shelf = self.shelf.lock();
        debug_assert!(!shelf[book], "returning a book that was never checked out");
        shelf[book] = true;
    }

    /// Count of books currently on the shelf
    pub fn available(&self) -> usize {
        self.shelf.lock().iter().filter(|&&a| a).count()
    }
}
