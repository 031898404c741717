//! Duplicate suppression for notifications
//!
//! Status messages are only re-sent when their text changes. Failure
//! notices are sent again for an identical error only a bounded number of
//! times in a row.

/// Whether `new` differs from what was last sent
pub fn has_changed(new: &str, previous: &str) -> bool {
    new != previous
}

/// Memory of the most recent error notice
#[derive(Debug, Clone, Default)]
pub struct ErrorMemo {
    last_error: Option<String>,
    repeats: u32,
}

impl ErrorMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of `error` and decide whether to notify about it
    ///
    /// A new error text always notifies. The same text seen consecutively
    /// notifies until it has been seen `max_repeats` times.
    pub fn should_notify(&mut self, error: &str, max_repeats: u32) -> bool {
        if self.last_error.as_deref() == Some(error) {
            self.repeats = self.repeats.saturating_add(1);
        } else {
            self.last_error = Some(error.to_string());
            self.repeats = 1;
        }

        self.repeats <= max_repeats
    }

    /// Forget the last error after a healthy cycle
    pub fn reset(&mut self) {
        self.last_error = None;
        self.repeats = 0;
    }

    /// Consecutive occurrences of the last error
    pub const fn repeats(&self) -> u32 {
        self.repeats
    }
}
