use chrono::Utc;
use rocket::tokio::sync::Mutex;

use super::{
    candidate::{Candidate, CandidateRegistry, CandidateSpec},
    error::ElectionError,
    id::CandidateId,
    identity::{Identity, IdentityStore, Registration, Role},
    ledger::{Ballot, BallotLedger},
    results::{ElectionResults, Standing, SystemStats},
    session::Session,
};

/// The election as held in managed state. Every operation takes the lock for
/// its whole duration, so multi-store updates are never observed half-done.
pub type SharedElection = Mutex<Election>;

/// The whole election: the three stores plus the signed-in session.
///
/// This is the only place that writes to more than one store, and therefore
/// the only place the cross-store invariants are enforced:
///  - a voter has a ballot in the ledger iff their has-voted flag is set;
///  - every ballot named an existing candidate when it was cast;
///  - each standing candidate's vote count equals the ballots naming them.
#[derive(Debug, Default)]
pub struct Election {
    identities: IdentityStore,
    candidates: CandidateRegistry,
    ballots: BallotLedger,
    session: Session,
}

impl Election {
    /// An election with nobody registered and nobody standing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identities(&self) -> &IdentityStore {
        &self.identities
    }

    pub fn candidates(&self) -> &CandidateRegistry {
        &self.candidates
    }

    pub fn ballots(&self) -> &BallotLedger {
        &self.ballots
    }

    pub(crate) fn identities_mut(&mut self) -> &mut IdentityStore {
        &mut self.identities
    }

    pub(crate) fn candidates_mut(&mut self) -> &mut CandidateRegistry {
        &mut self.candidates
    }

    /// Sign in with email and secret.
    pub fn login(&mut self, email: &str, secret: &str) -> Result<Identity, ElectionError> {
        let identity = self
            .identities
            .authenticate(email, secret)
            .cloned()
            .ok_or(ElectionError::InvalidCredentials)?;
        self.session.begin(identity.id.clone());
        info!("{} signed in as {:?}", identity.id, identity.role);
        Ok(identity)
    }

    /// Register a new voter and sign them in.
    pub fn register(&mut self, registration: Registration) -> Result<Identity, ElectionError> {
        let identity = self.identities.register(registration)?;
        self.session.begin(identity.id.clone());
        info!("Registered voter {}", identity.id);
        Ok(identity)
    }

    /// Sign out, returning who was signed in.
    pub fn logout(&mut self) -> Result<Identity, ElectionError> {
        let identity = self.current_identity()?.clone();
        self.session.end();
        info!("{} signed out", identity.id);
        Ok(identity)
    }

    /// The signed-in identity, read fresh from the identity store.
    pub fn current_identity(&self) -> Result<&Identity, ElectionError> {
        let id = self.session.current().ok_or(ElectionError::NoSession)?;
        self.identities
            .get(id)
            .ok_or_else(|| ElectionError::IdentityNotFound(id.clone()))
    }

    /// Cast the signed-in voter's one and only ballot.
    ///
    /// All preconditions are checked before anything is written, so a refused
    /// vote leaves every store untouched.
    pub fn cast_vote(&mut self, candidate_id: &CandidateId) -> Result<Ballot, ElectionError> {
        let voter = self.current_identity()?;
        if voter.role != Role::Voter {
            return Err(ElectionError::NotEligible(voter.id.clone()));
        }
        if voter.has_voted || self.ballots.for_voter(&voter.id).is_some() {
            return Err(ElectionError::AlreadyVoted(voter.id.clone()));
        }
        if self.candidates.get(candidate_id).is_none() {
            return Err(ElectionError::CandidateNotFound(candidate_id.clone()));
        }
        let voter_id = voter.id.clone();

        let ballot = self
            .ballots
            .record(voter_id.clone(), candidate_id.clone(), Utc::now())?;
        let count = self.candidates.increment_votes(candidate_id)?;
        self.identities.mark_voted(&voter_id)?;

        info!(
            "Voter {voter_id} cast ballot {} for {candidate_id} (now {count} vote{})",
            ballot.id,
            if count != 1 { "s" } else { "" }
        );
        Ok(ballot)
    }

    pub fn add_candidate(&mut self, spec: CandidateSpec) -> Result<Candidate, ElectionError> {
        let candidate = self.candidates.add(spec)?;
        info!("Added candidate {} ({})", candidate.id, candidate.name);
        Ok(candidate)
    }

    /// Remove a candidate. Their ballots stay in the ledger as orphans.
    pub fn remove_candidate(&mut self, id: &CandidateId) -> Result<Candidate, ElectionError> {
        let candidate = self.candidates.remove(id)?;
        let orphaned = self.ballots.count_for(id);
        if orphaned > 0 {
            warn!("Removed candidate {id} with {orphaned} ballot(s) still referencing them");
        } else {
            info!("Removed candidate {id}");
        }
        Ok(candidate)
    }

    /// Name, votes and party of each candidate, in registry order.
    pub fn standings(&self) -> Vec<Standing> {
        self.candidates
            .iter()
            .map(|candidate| Standing {
                name: candidate.name.clone(),
                votes: candidate.vote_count,
                party: candidate.party.clone(),
            })
            .collect()
    }

    pub fn results(&self) -> ElectionResults {
        ElectionResults::tally(&self.candidates, &self.ballots)
    }

    pub fn stats(&self) -> SystemStats {
        SystemStats::collect(&self.identities, &self.ballots)
    }
}
