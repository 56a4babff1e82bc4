//! Form controller state machine

/// Lifecycle of one record-form page.
///
/// `Idle -> Searching -> {Found, NotFound, Error}`, then from `Found`:
/// `EditOpen -> Found` (save or cancel) and `Submitting -> Found`
/// (both submit outcomes rest in `Found`, leaving the record for retry).
///
/// A dropped in-flight future leaves its in-flight state behind; the next
/// search resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Nothing searched yet, or cleared.
    #[default]
    Idle,
    /// Search round-trip in flight.
    Searching,
    /// A record is displayed.
    Found,
    /// Search succeeded with zero rows; nothing displayed.
    NotFound,
    /// Search failed on transport; nothing displayed.
    Error,
    /// Edit surface open, working buffer live.
    EditOpen,
    /// Submit round-trip in flight.
    Submitting,
}

impl FormState {
    /// A new search may start in any state except while the edit surface
    /// holds an uncommitted buffer.
    pub fn can_search(self) -> bool {
        self != Self::EditOpen
    }

    /// The edit surface may only open over a displayed record.
    pub fn can_open_edit(self) -> bool {
        self == Self::Found
    }

    /// Submit only fires from a displayed record.
    pub fn can_submit(self) -> bool {
        self == Self::Found
    }

    /// In-flight states; the triggering control stays disabled.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Searching | Self::Submitting)
    }

    /// Whether a record is on display.
    pub fn has_record(self) -> bool {
        matches!(self, Self::Found | Self::EditOpen | Self::Submitting)
    }
}
