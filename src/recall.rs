use std::{array, iter::Take};

/// Number of submitted lines kept for Up/Down recall
pub const DEFAULT_RECALL: usize = 50;

/// A bounded buffer of submitted lines, oldest first
#[derive(Debug, PartialEq, Eq)]
pub struct RecallBuffer<const N: usize> {
    len: usize,
    /// Last recalled line, counted from the newest; none while not browsing
    cur: Option<usize>,
    stored: [String; N],
}

impl<const N: usize> RecallBuffer<N> {
    /// The capacity of this buffer
    pub const CAPACITY: usize = N;

    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a line to the end, evicting the oldest one if the capacity is reached
    ///
    /// This stops browsing, so the next [Self::prev] returns the newest line again.
    pub fn push(&mut self, line: String) {
        self.cur = None;
        if N == 0 || line.trim().is_empty() {
            return;
        }

        if self.len == N {
            self.stored.rotate_left(1);
            self.stored[N - 1] = line;
        } else {
            self.stored[self.len] = line;
            self.len += 1;
        }
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        if idx >= self.len {
            None
        } else {
            self.stored.get(idx).map(String::as_str)
        }
    }

    /// Get a reference to the newest line
    pub fn newest(&self) -> Option<&str> {
        self.len.checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Position of the recalled line counted from the newest, none while not browsing
    pub fn cursor(&self) -> Option<usize> {
        self.cur
    }

    pub fn is_browsing(&self) -> bool {
        self.cur.is_some()
    }

    /// Stop browsing without touching the stored lines
    pub fn reset_cursor(&mut self) {
        self.cur = None;
    }

    /// Get a reference to the currently recalled line
    pub fn current(&self) -> Option<&str> {
        let cur = self.cur?;
        self.get(self.len.checked_sub(cur + 1)?)
    }

    /// Step towards older lines, clamped at the oldest, and return the recalled line
    ///
    /// Starts browsing at the newest line. Does nothing on an empty buffer.
    pub fn prev(&mut self) -> Option<&str> {
        if self.len == 0 {
            return None;
        }

        self.cur = Some(match self.cur {
            Some(cur) if cur + 1 < self.len => cur + 1,
            Some(cur) => cur,
            None => 0,
        });

        self.current()
    }

    /// Step towards newer lines and return the recalled line
    ///
    /// Stepping past the newest line stops browsing and returns none.
    pub fn next(&mut self) -> Option<&str> {
        match self.cur {
            Some(0) | None => {
                self.cur = None;
                None
            }
            Some(cur) => {
                self.cur = Some(cur - 1);
                self.current()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stored.iter().map(String::as_str).take(self.len)
    }
}

impl<const N: usize> IntoIterator for RecallBuffer<N> {
    type Item = String;
    type IntoIter = Take<array::IntoIter<String, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stored.into_iter().take(self.len)
    }
}

impl<const N: usize> Default for RecallBuffer<N> {
    fn default() -> Self {
        Self {
            cur: None,
            len: 0,
            stored: [(); N].map(|_| String::new()),
        }
    }
}
