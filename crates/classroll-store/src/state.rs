//! Request bookkeeping shared by both stores.
//!
//! Every store keeps a [`RequestLedger`] inside its state value, so the
//! ledger changes in the same atomic update as the data it guards.

/// Where a store is in its request lifecycle.
///
/// `Idle` only before the first request (or after a reset). The phase stays
/// `Loading` as long as any request the store still tracks is outstanding,
/// so it always agrees with `is_loading`. Once nothing is outstanding it
/// reflects the applied responses: `Error` if an error is recorded, else
/// `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    generation: u64,
    /// Fetch sequence number; `0` for writes, which are never superseded.
    seq: u64,
}

impl Ticket {
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

/// What to do with a response once it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settle {
    Apply,
    /// A newer fetch was issued, or the store was reset, after this request
    /// started.
    Discard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RequestLedger {
    generation: u64,
    pending: usize,
    latest_fetch: u64,
    /// Highest fetch sequence whose response has been settled.
    settled_fetch: u64,
    applied: bool,
}

impl RequestLedger {
    /// Starts a read whose response only counts if no newer read begins first.
    pub(crate) fn begin_fetch(&mut self) -> Ticket {
        self.pending += 1;
        self.latest_fetch += 1;
        Ticket {
            generation: self.generation,
            seq: self.latest_fetch,
        }
    }

    /// Starts a write; its confirmation is applied whenever it arrives.
    pub(crate) fn begin_write(&mut self) -> Ticket {
        self.pending += 1;
        Ticket {
            generation: self.generation,
            seq: 0,
        }
    }

    pub(crate) fn settle(&mut self, ticket: Ticket) -> Settle {
        if ticket.generation != self.generation {
            return Settle::Discard;
        }
        self.pending = self.pending.saturating_sub(1);

        if ticket.seq == 0 || ticket.seq == self.latest_fetch {
            self.settled_fetch = self.settled_fetch.max(ticket.seq);
            self.applied = true;
            Settle::Apply
        } else {
            Settle::Discard
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.pending > 0
    }

    /// Sequence of the most recently issued fetch, if its response has not
    /// been settled yet. A response to that fetch may predate writes
    /// confirmed now.
    pub(crate) fn fetch_in_flight(&self) -> Option<u64> {
        (self.latest_fetch > self.settled_fetch).then_some(self.latest_fetch)
    }

    pub(crate) fn phase(&self, has_error: bool) -> LoadPhase {
        if self.is_busy() {
            LoadPhase::Loading
        } else if !self.applied {
            LoadPhase::Idle
        } else if has_error {
            LoadPhase::Error
        } else {
            LoadPhase::Success
        }
    }

    /// Forgets every outstanding request.
    pub(crate) fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = 0;
        self.settled_fetch = self.latest_fetch;
        self.applied = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_fetch_applies() {
        let mut ledger = RequestLedger::default();
        let ticket = ledger.begin_fetch();
        assert!(ledger.is_busy());
        assert_eq!(ledger.settle(ticket), Settle::Apply);
        assert!(!ledger.is_busy());
    }

    #[test]
    fn test_older_fetch_is_discarded() {
        let mut ledger = RequestLedger::default();
        let first = ledger.begin_fetch();
        let second = ledger.begin_fetch();

        assert_eq!(ledger.settle(second), Settle::Apply);
        assert!(ledger.is_busy());
        assert_eq!(ledger.settle(first), Settle::Discard);
        assert!(!ledger.is_busy());
    }

    #[test]
    fn test_writes_are_never_superseded() {
        let mut ledger = RequestLedger::default();
        let write = ledger.begin_write();
        let fetch = ledger.begin_fetch();

        assert_eq!(ledger.settle(fetch), Settle::Apply);
        assert_eq!(ledger.settle(write), Settle::Apply);
        assert!(!ledger.is_busy());
    }

    #[test]
    fn test_invalidate_discards_in_flight_requests() {
        let mut ledger = RequestLedger::default();
        let before = ledger.begin_write();
        ledger.invalidate();
        assert!(!ledger.is_busy());

        let after = ledger.begin_fetch();
        assert_eq!(ledger.settle(before), Settle::Discard);
        assert!(ledger.is_busy(), "old request must not settle the new one");
        assert_eq!(ledger.settle(after), Settle::Apply);
    }

    #[test]
    fn test_fetch_in_flight_tracks_latest_fetch() {
        let mut ledger = RequestLedger::default();
        assert_eq!(ledger.fetch_in_flight(), None);

        let first = ledger.begin_fetch();
        let second = ledger.begin_fetch();
        assert_eq!(ledger.fetch_in_flight(), Some(second.seq()));

        assert_eq!(ledger.settle(first), Settle::Discard);
        assert_eq!(ledger.fetch_in_flight(), Some(second.seq()));

        assert_eq!(ledger.settle(second), Settle::Apply);
        assert_eq!(ledger.fetch_in_flight(), None);

        ledger.begin_fetch();
        ledger.invalidate();
        assert_eq!(ledger.fetch_in_flight(), None);
    }

    #[test]
    fn test_phase_stays_loading_while_busy() {
        let mut ledger = RequestLedger::default();
        assert_eq!(ledger.phase(false), LoadPhase::Idle);

        let write = ledger.begin_write();
        let fetch = ledger.begin_fetch();
        assert_eq!(ledger.settle(fetch), Settle::Apply);
        assert_eq!(ledger.phase(false), LoadPhase::Loading);
        assert_eq!(ledger.phase(true), LoadPhase::Loading);

        assert_eq!(ledger.settle(write), Settle::Apply);
        assert_eq!(ledger.phase(false), LoadPhase::Success);
        assert_eq!(ledger.phase(true), LoadPhase::Error);

        ledger.invalidate();
        assert_eq!(ledger.phase(false), LoadPhase::Idle);
    }
}
