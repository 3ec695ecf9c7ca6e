use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    counter::Counter,
    error::ElectionError,
    id::{BallotId, CandidateId, IdentityId},
};

/// A single cast vote. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub id: BallotId,
    pub voter_id: IdentityId,
    pub candidate_id: CandidateId,
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of every ballot cast.
///
/// At most one ballot may reference any given voter; the ledger enforces
/// this itself rather than trusting callers to check first.
#[derive(Debug)]
pub struct BallotLedger {
    ballots: Vec<Ballot>,
    voters: HashSet<IdentityId>,
    ids: Counter,
}

impl Default for BallotLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BallotLedger {
    pub fn new() -> Self {
        Self {
            ballots: Vec::new(),
            voters: HashSet::new(),
            ids: Counter::new("vt", 1),
        }
    }

    /// Append a ballot for this voter, failing if they already have one.
    pub fn record(
        &mut self,
        voter_id: IdentityId,
        candidate_id: CandidateId,
        timestamp: DateTime<Utc>,
    ) -> Result<Ballot, ElectionError> {
        if self.voters.contains(&voter_id) {
            return Err(ElectionError::DuplicateBallot(voter_id));
        }

        let ballot = Ballot {
            id: self.ids.next(),
            voter_id,
            candidate_id,
            timestamp,
        };
        self.voters.insert(ballot.voter_id.clone());
        self.ballots.push(ballot.clone());
        Ok(ballot)
    }

    /// The ballot cast by this voter, if any.
    pub fn for_voter(&self, voter_id: &IdentityId) -> Option<&Ballot> {
        if !self.voters.contains(voter_id) {
            return None;
        }
        self.ballots
            .iter()
            .find(|ballot| &ballot.voter_id == voter_id)
    }

    /// How many ballots name this candidate.
    pub fn count_for(&self, candidate_id: &CandidateId) -> usize {
        self.ballots
            .iter()
            .filter(|ballot| &ballot.candidate_id == candidate_id)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ballot> {
        self.ballots.iter()
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_in_order() {
        let mut ledger = BallotLedger::new();
        let now = Utc::now();

        let first = ledger.record("v1".into(), "c1".into(), now).unwrap();
        let second = ledger.record("v2".into(), "c2".into(), now).unwrap();

        assert_eq!(first.id.as_str(), "vt1");
        assert_eq!(second.id.as_str(), "vt2");
        assert_eq!(ledger.len(), 2);
        let ids: Vec<_> = ledger.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn one_ballot_per_voter() {
        let mut ledger = BallotLedger::new();
        let now = Utc::now();

        let ballot = ledger.record("v1".into(), "c1".into(), now).unwrap();
        assert_eq!(
            ledger.record("v1".into(), "c2".into(), now),
            Err(ElectionError::DuplicateBallot("v1".into()))
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.for_voter(&"v1".into()), Some(&ballot));
        assert_eq!(ledger.for_voter(&"v2".into()), None);
    }

    #[test]
    fn count_for_candidate() {
        let mut ledger = BallotLedger::new();
        let now = Utc::now();
        ledger.record("v1".into(), "c1".into(), now).unwrap();
        ledger.record("v2".into(), "c1".into(), now).unwrap();
        ledger.record("v3".into(), "c2".into(), now).unwrap();

        assert_eq!(ledger.count_for(&"c1".into()), 2);
        assert_eq!(ledger.count_for(&"c2".into()), 1);
        assert_eq!(ledger.count_for(&"c3".into()), 0);
    }
}
