use std::marker::PhantomData;
use std::ops::Deref;

use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};

use crate::error::Error;
use crate::model::{
    election::{Election, SharedElection},
    error::ElectionError,
    identity::{Identity, Role},
};

/// A kind of user a route can demand.
pub trait User {
    const ROLE: Role;
}

/// Marker for routes restricted to admins.
pub struct Admin;

impl User for Admin {
    const ROLE: Role = Role::Admin;
}

/// Marker for routes restricted to voters.
pub struct Voter;

impl User for Voter {
    const ROLE: Role = Role::Voter;
}

/// Proof that the signed-in identity has the role `U` requires, holding a
/// snapshot of that identity taken when the request arrived.
pub struct Authenticated<U> {
    identity: Identity,
    phantom: PhantomData<U>,
}

impl<U> Authenticated<U> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl<U: User> Authenticated<U> {
    /// Check that the session still holds this identity with the required
    /// role. The guard releases the election lock before the handler runs, so
    /// handlers call this again under the lock they mutate with.
    pub fn confirm(&self, election: &Election) -> Result<(), ElectionError> {
        let current = election.current_identity()?;
        if current.id != self.id || current.role != U::ROLE {
            warn!(
                "Session changed from {} to {} mid-request, refusing {:?}-only operation",
                self.id,
                current.id,
                U::ROLE
            );
            return Err(ElectionError::NotEligible(current.id.clone()));
        }
        Ok(())
    }
}

impl<U> Deref for Authenticated<U> {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

#[rocket::async_trait]
impl<'r, U> FromRequest<'r> for Authenticated<U>
where
    U: User + Send,
{
    type Error = Error;

    /// Check the process session: nobody signed in is 401, the wrong role is 403.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(election) = req.rocket().state::<SharedElection>() else {
            return Outcome::Failure((
                Status::InternalServerError,
                Error::Internal("election state is not managed".to_string()),
            ));
        };

        let election = election.lock().await;
        match election.current_identity() {
            Ok(identity) if identity.role == U::ROLE => Outcome::Success(Self {
                identity: identity.clone(),
                phantom: PhantomData,
            }),
            Ok(identity) => {
                warn!("{} ({:?}) refused {:?}-only route", identity.id, identity.role, U::ROLE);
                Outcome::Failure((
                    Status::Forbidden,
                    ElectionError::NotEligible(identity.id.clone()).into(),
                ))
            }
            Err(err) => Outcome::Failure((Status::Unauthorized, err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::{
        DEMO_ADMIN_EMAIL, DEMO_ADMIN_SECRET, DEMO_VOTER_EMAIL, DEMO_VOTER_SECRET,
    };

    fn signed_in<U>(election: &mut Election, email: &str, secret: &str) -> Authenticated<U> {
        Authenticated {
            identity: election.login(email, secret).unwrap(),
            phantom: PhantomData,
        }
    }

    #[test]
    fn confirm_follows_the_session() {
        let mut election = Election::with_demo_data().unwrap();
        let admin: Authenticated<Admin> =
            signed_in(&mut election, DEMO_ADMIN_EMAIL, DEMO_ADMIN_SECRET);
        assert_eq!(admin.identity().role, Role::Admin);
        assert_eq!(admin.confirm(&election), Ok(()));

        // A voter signs in between the guard and the operation.
        let voter = election.login(DEMO_VOTER_EMAIL, DEMO_VOTER_SECRET).unwrap();
        assert_eq!(
            admin.confirm(&election),
            Err(ElectionError::NotEligible(voter.id))
        );

        election.logout().unwrap();
        assert_eq!(admin.confirm(&election), Err(ElectionError::NoSession));
    }
}
