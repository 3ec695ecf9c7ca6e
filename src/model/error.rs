use thiserror::Error;

use super::id::{CandidateId, IdentityId};

/// Every way an election operation can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("Invalid credentials. Check email and password.")]
    InvalidCredentials,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Voter ID already registered: {0}")]
    DuplicateVoterRef(String),
    #[error("Identity ID already in use: {0}")]
    DuplicateIdentity(IdentityId),
    #[error("Candidate ID already in use: {0}")]
    DuplicateCandidate(CandidateId),
    #[error("Nobody is signed in")]
    NoSession,
    #[error("{0} is not eligible to vote")]
    NotEligible(IdentityId),
    #[error("{0} has already voted")]
    AlreadyVoted(IdentityId),
    #[error("A ballot is already recorded for voter {0}")]
    DuplicateBallot(IdentityId),
    #[error("No identity found with ID {0}")]
    IdentityNotFound(IdentityId),
    #[error("No candidate found with ID {0}")]
    CandidateNotFound(CandidateId),
}
