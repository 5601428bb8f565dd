//! Return Address Stack (RAS).
//!
//! CALL pushes its fallthrough address at dispatch and RET pops it as the
//! predicted target. The stack is bounded; a CALL nested deeper than the
//! capacity replaces the newest entry, so the outer returns it displaced will
//! mispredict.

/// Bounded LIFO of predicted return addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ras {
    entries: Vec<usize>,
    capacity: usize,
}

impl Ras {
    /// Creates an empty stack holding at most `capacity` addresses.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a return address. When full the newest entry is replaced.
    pub fn push(&mut self, addr: usize) {
        if self.entries.len() < self.capacity {
            self.entries.push(addr);
        } else if let Some(newest) = self.entries.last_mut() {
            *newest = addr;
        }
    }

    /// Removes and returns the newest address, or `None` when empty.
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop()
    }

    /// Newest address, left in place.
    pub fn top(&self) -> Option<usize> {
        self.entries.last().copied()
    }

    /// Number of live entries.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}
