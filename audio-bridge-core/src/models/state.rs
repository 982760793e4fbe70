/// Stream session state machine.
///
/// State transitions:
/// ```text
/// closed → opening → open → closing → closed
/// ```
/// Reopen must pass through `Closed`; the open/opening states are what
/// enforce the one-shared-buffer-per-direction invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl SessionState {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
