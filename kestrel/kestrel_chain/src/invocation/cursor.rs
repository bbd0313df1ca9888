use serde::{Deserialize, Serialize};

/// Where an invocation stands in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationState {
    /// `invoke()` has not been called since creation
    NotStarted,

    /// The interceptor at this stack position was entered last
    Running(usize),

    /// The stack is exhausted and the terminal operation is running
    TerminalInvoked,

    /// The terminal operation returned an outcome
    Completed,

    /// The terminal operation failed
    Failed,

    /// `cleanup()` cleared the cursor; the next `invoke()` starts from the
    /// first interceptor
    Cleaned,
}

impl InvocationState {
    /// Whether the terminal operation has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Forward-only position into an interceptor stack.
///
/// `None` means the cursor has not been materialized yet. It is created on
/// the first `advance` and then reused until `reset`.
#[derive(Debug, Default)]
pub(crate) struct Cursor {
    next: Option<usize>,
}

impl Cursor {
    /// Move past the next interceptor and return its index, or `None` once
    /// all `len` interceptors have been handed out.
    pub(crate) fn advance(&mut self, len: usize) -> Option<usize> {
        let next = self.next.get_or_insert(0);
        if *next < len {
            let index = *next;
            *next += 1;
            Some(index)
        } else {
            None
        }
    }

    /// Number of interceptors handed out so far.
    pub(crate) fn entered(&self) -> usize {
        self.next.unwrap_or(0)
    }

    pub(crate) fn is_materialized(&self) -> bool {
        self.next.is_some()
    }

    pub(crate) fn reset(&mut self) {
        self.next = None;
    }
}
