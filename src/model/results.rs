use serde::{Deserialize, Serialize};

use super::{
    candidate::CandidateRegistry, id::CandidateId, identity::IdentityStore, ledger::BallotLedger,
};

/// One candidate's position, as handed to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub votes: u64,
    pub party: String,
}

/// Per-candidate results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub votes: u64,
    /// Percentage of counted votes, 0 when nothing has been counted.
    pub share: f64,
}

/// Live election results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    /// Candidates in registry order.
    pub candidates: Vec<CandidateResult>,
    /// Votes held by candidates still standing.
    pub counted_votes: u64,
    /// Every ballot in the ledger.
    pub total_ballots: usize,
    /// Ballots naming a candidate who has since been removed.
    pub orphaned_ballots: usize,
    /// Candidate with the most votes, the earliest added winning ties.
    /// `None` until a vote has been counted.
    pub leader: Option<CandidateId>,
}

impl ElectionResults {
    /// Tally the current state of the registry and ledger.
    pub fn tally(candidates: &CandidateRegistry, ballots: &BallotLedger) -> Self {
        let counted_votes = candidates.total_votes();

        let mut leader: Option<(&CandidateId, u64)> = None;
        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates.iter() {
            let votes = candidate.vote_count;
            if votes > 0 && leader.map_or(true, |(_, best)| votes > best) {
                leader = Some((&candidate.id, votes));
            }
            results.push(CandidateResult {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                party: candidate.party.clone(),
                votes,
                share: percentage(votes, counted_votes),
            });
        }

        let orphaned_ballots = ballots
            .iter()
            .filter(|ballot| candidates.get(&ballot.candidate_id).is_none())
            .count();

        Self {
            candidates: results,
            counted_votes,
            total_ballots: ballots.len(),
            orphaned_ballots,
            leader: leader.map(|(id, _)| id.clone()),
        }
    }
}

/// Turnout figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    /// Registered identities with the voter role.
    pub total_voters: usize,
    /// Voters whose has-voted flag is set.
    pub voted: usize,
    /// Ballots in the ledger.
    pub total_votes: usize,
    /// `voted / total_voters` as a percentage, 0 with no voters.
    pub participation_rate: f64,
}

impl SystemStats {
    pub fn collect(identities: &IdentityStore, ballots: &BallotLedger) -> Self {
        let total_voters = identities.voters().count();
        let voted = identities.voters().filter(|voter| voter.has_voted).count();
        Self {
            total_voters,
            voted,
            total_votes: ballots.len(),
            participation_rate: percentage(voted as u64, total_voters as u64),
        }
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
