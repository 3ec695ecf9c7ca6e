//! Fixed demonstration data: three candidates, one voter, and the admin.

use super::{
    candidate::Candidate, election::Election, error::ElectionError, identity::Identity,
};

pub const DEMO_ADMIN_EMAIL: &str = "admin@securevote.com";
pub const DEMO_ADMIN_SECRET: &str = "admin";
pub const DEMO_VOTER_EMAIL: &str = "voter1@test.com";
pub const DEMO_VOTER_SECRET: &str = "password123";

fn demo_candidates() -> Vec<Candidate> {
    [
        (
            "c1",
            "Sarah Johnson",
            "Progressive Alliance",
            "Focused on sustainable urban development and education reform.",
            "sarah",
        ),
        (
            "c2",
            "Robert Chen",
            "Liberty Conservative",
            "Advocating for economic growth and digital infrastructure.",
            "robert",
        ),
        (
            "c3",
            "Elena Rodriguez",
            "Green Future",
            "Committed to environmental justice and renewable energy initiatives.",
            "elena",
        ),
    ]
    .into_iter()
    .map(|(id, name, party, description, seed)| Candidate {
        id: id.into(),
        name: name.to_string(),
        party: party.to_string(),
        description: description.to_string(),
        image_url: format!("https://picsum.photos/seed/{seed}/400/300"),
        vote_count: 0,
    })
    .collect()
}

fn demo_identities() -> Vec<Identity> {
    vec![
        Identity::voter(
            "v1".into(),
            "Voter One",
            DEMO_VOTER_EMAIL,
            DEMO_VOTER_SECRET,
            "VT-001",
        ),
        Identity::admin(
            "admin".into(),
            "Admin User",
            DEMO_ADMIN_EMAIL,
            DEMO_ADMIN_SECRET,
        ),
    ]
}

impl Election {
    /// An election pre-populated with the demonstration candidates and accounts.
    pub fn with_demo_data() -> Result<Self, ElectionError> {
        let mut election = Self::new();
        for candidate in demo_candidates() {
            election.candidates_mut().seed(candidate)?;
        }
        for identity in demo_identities() {
            election.identities_mut().seed(identity)?;
        }
        Ok(election)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{candidate::CandidateSpec, identity::Registration};

    #[test]
    fn demo_data() {
        let mut election = Election::with_demo_data().unwrap();
        assert_eq!(election.candidates().len(), 3);
        assert_eq!(election.identities().len(), 2);
        assert_eq!(election.stats().total_voters, 1);

        // Fresh IDs continue after the seeded ones.
        let candidate = election.add_candidate(CandidateSpec::example()).unwrap();
        assert_eq!(candidate.id.as_str(), "c4");
        let voter = election.register(Registration::example()).unwrap();
        assert_eq!(voter.id.as_str(), "v2");
    }

    #[test]
    fn demo_accounts_sign_in() {
        let mut election = Election::with_demo_data().unwrap();
        let admin = election.login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_SECRET).unwrap();
        assert_eq!(admin.id.as_str(), "admin");
        let voter = election.login(DEMO_VOTER_EMAIL, DEMO_VOTER_SECRET).unwrap();
        assert_eq!(voter.voter_ref.as_deref(), Some("VT-001"));
    }
}
