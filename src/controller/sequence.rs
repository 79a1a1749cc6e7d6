//! Load ordering
//!
//! Every load gets a ticket with a monotonically increasing number. A result
//! is only applied when its ticket is newer than the last one applied, so a
//! slow response can never overwrite data from a request issued after it.

/// Identifies one load request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct RequestSequence {
    issued: u64,
    applied: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next ticket.
    pub fn issue(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Records `ticket` as applied if it is newer than anything applied so far.
    pub fn accept(&mut self, ticket: LoadTicket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            false
        }
    }

    /// True while a ticket newer than the last applied one is outstanding.
    pub fn has_pending(&self) -> bool {
        self.issued > self.applied
    }
}
