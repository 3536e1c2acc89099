use std::collections::HashMap;

/// View state fields that are filled by a network response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Games,
    Standings,
    Players,
    Matchup,
    Profile,
    Teammate,
    TeamProfile,
}

/// Identifies one issued request. Only the most recent ticket for a slot
/// is allowed to write into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: Slot,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    next_seq: u64,
    latest: HashMap<Slot, u64>,
}

impl RequestTracker {
    pub fn issue(&mut self, slot: Slot) -> Ticket {
        self.next_seq += 1;
        self.latest.insert(slot, self.next_seq);
        Ticket { slot, seq: self.next_seq }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.slot) == Some(&ticket.seq)
    }

    /// Forget the slot so any in-flight response for it is dropped.
    pub fn invalidate(&mut self, slot: Slot) {
        self.latest.remove(&slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(Slot::Profile);
        let second = tracker.issue(Slot::Profile);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn slots_are_independent() {
        let mut tracker = RequestTracker::default();
        let games = tracker.issue(Slot::Games);
        let profile = tracker.issue(Slot::Profile);
        tracker.issue(Slot::Profile);
        assert!(tracker.is_current(games));
        assert!(!tracker.is_current(profile));
    }

    #[test]
    fn invalidated_slot_rejects_everything() {
        let mut tracker = RequestTracker::default();
        let t = tracker.issue(Slot::Teammate);
        tracker.invalidate(Slot::Teammate);
        assert!(!tracker.is_current(t));
        let fresh = tracker.issue(Slot::Teammate);
        assert!(tracker.is_current(fresh));
    }
}
