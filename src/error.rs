use rocket::{
    http::{Status, StatusClass},
    response::{self, status, Responder},
    Request,
};
use thiserror::Error;

use crate::model::error::ElectionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Election(#[from] ElectionError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Election(err) => match err {
                ElectionError::InvalidCredentials | ElectionError::NoSession => {
                    Status::Unauthorized
                }
                ElectionError::MissingField(_) => Status::BadRequest,
                ElectionError::NotEligible(_) => Status::Forbidden,
                ElectionError::IdentityNotFound(_) | ElectionError::CandidateNotFound(_) => {
                    Status::NotFound
                }
                ElectionError::DuplicateEmail(_)
                | ElectionError::DuplicateVoterRef(_)
                | ElectionError::DuplicateIdentity(_)
                | ElectionError::DuplicateCandidate(_)
                | ElectionError::AlreadyVoted(_)
                | ElectionError::DuplicateBallot(_) => Status::Conflict,
            },
            Self::Internal(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.status();
        match status.class() {
            StatusClass::ServerError => error!("{self}"),
            _ => warn!("{self}"),
        }
        status::Custom(status, self.to_string()).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let status = |err: ElectionError| Error::from(err).status();
        assert_eq!(status(ElectionError::InvalidCredentials), Status::Unauthorized);
        assert_eq!(status(ElectionError::MissingField("name")), Status::BadRequest);
        assert_eq!(status(ElectionError::NotEligible("admin".into())), Status::Forbidden);
        assert_eq!(status(ElectionError::AlreadyVoted("v1".into())), Status::Conflict);
        assert_eq!(status(ElectionError::CandidateNotFound("c9".into())), Status::NotFound);
        assert_eq!(
            Error::Internal("boom".into()).status(),
            Status::InternalServerError
        );
    }
}
