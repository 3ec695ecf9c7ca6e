use serde::{Deserialize, Serialize};

use super::{counter::Counter, error::ElectionError, id::IdentityId};

/// What an identity is allowed to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Manages candidates and oversees turnout; cannot vote.
    Admin,
    /// May cast exactly one ballot.
    Voter,
}

/// A registered person. The secret is held in plaintext and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    secret: String,
    /// External voter reference, e.g. `VT-001`. Admins have none.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub voter_ref: Option<String>,
    pub has_voted: bool,
    pub role: Role,
}

impl Identity {
    /// A voter who has not voted yet.
    pub fn voter(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
        voter_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            voter_ref: Some(voter_ref.into()),
            has_voted: false,
            role: Role::Voter,
        }
    }

    pub fn admin(
        id: IdentityId,
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            voter_ref: None,
            has_voted: false,
            role: Role::Admin,
        }
    }

    /// Plaintext comparison.
    pub fn secret_matches(&self, secret: &str) -> bool {
        self.secret == secret
    }
}

/// A voter registration request. All fields are required; an absent field
/// is treated the same as an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub voter_ref: String,
}

impl Registration {
    /// Reject the first field that is blank. Everything except the password is
    /// stored trimmed; the password is kept exactly as given.
    fn validated(self) -> Result<Self, ElectionError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        required("password", &self.password)?;
        let voter_ref = required("voterRef", &self.voter_ref)?;
        Ok(Self {
            name,
            email,
            password: self.password,
            voter_ref,
        })
    }
}

/// The trimmed value, or an error naming the field if nothing is left.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ElectionError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ElectionError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Every registered voter and admin, in registration order.
#[derive(Debug)]
pub struct IdentityStore {
    identities: Vec<Identity>,
    ids: Counter,
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore {
    pub fn new() -> Self {
        Self {
            identities: Vec::new(),
            ids: Counter::new("v", 1),
        }
    }

    /// Find the identity whose email and secret both match. Surrounding
    /// whitespace on the email is ignored, as at registration; the secret
    /// must match exactly.
    pub fn authenticate(&self, email: &str, secret: &str) -> Option<&Identity> {
        let email = email.trim();
        self.identities
            .iter()
            .find(|identity| identity.email == email && identity.secret_matches(secret))
    }

    /// Register a new voter who has not voted yet.
    ///
    /// Emails are unique ignoring case, and voter references are unique.
    pub fn register(&mut self, registration: Registration) -> Result<Identity, ElectionError> {
        let registration = registration.validated()?;
        self.check_unique(&registration.email, Some(&registration.voter_ref))?;

        let identity = Identity::voter(
            self.ids.next(),
            registration.name,
            registration.email,
            registration.password,
            registration.voter_ref,
        );
        self.identities.push(identity.clone());
        Ok(identity)
    }

    /// Insert a fixed record, e.g. demo data or the initial admin.
    pub fn seed(&mut self, identity: Identity) -> Result<(), ElectionError> {
        if self.get(&identity.id).is_some() {
            return Err(ElectionError::DuplicateIdentity(identity.id));
        }
        self.check_unique(&identity.email, identity.voter_ref.as_deref())?;
        self.ids.skip_past(identity.id.as_str());
        self.identities.push(identity);
        Ok(())
    }

    /// Record that this identity has cast its ballot.
    pub fn mark_voted(&mut self, id: &IdentityId) -> Result<(), ElectionError> {
        let identity = self
            .identities
            .iter_mut()
            .find(|identity| &identity.id == id)
            .ok_or_else(|| ElectionError::IdentityNotFound(id.clone()))?;
        identity.has_voted = true;
        Ok(())
    }

    pub fn get(&self, id: &IdentityId) -> Option<&Identity> {
        self.identities.iter().find(|identity| &identity.id == id)
    }

    /// All identities with the voter role.
    pub fn voters(&self) -> impl Iterator<Item = &Identity> {
        self.identities
            .iter()
            .filter(|identity| identity.role == Role::Voter)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    fn check_unique(&self, email: &str, voter_ref: Option<&str>) -> Result<(), ElectionError> {
        if self
            .identities
            .iter()
            .any(|identity| identity.email.eq_ignore_ascii_case(email))
        {
            return Err(ElectionError::DuplicateEmail(email.to_string()));
        }
        if let Some(voter_ref) = voter_ref {
            if self
                .identities
                .iter()
                .any(|identity| identity.voter_ref.as_deref() == Some(voter_ref))
            {
                return Err(ElectionError::DuplicateVoterRef(voter_ref.to_string()));
            }
        }
        Ok(())
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Registration {
        pub fn example() -> Self {
            Self {
                name: "Alice".into(),
                email: "a@x.com".into(),
                password: "pw".into(),
                voter_ref: "VT-9".into(),
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Bob".into(),
                email: "bob@x.com".into(),
                password: "hunter2".into(),
                voter_ref: "VT-10".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_authenticate() {
        let mut store = IdentityStore::new();
        let alice = store.register(Registration::example()).unwrap();
        assert_eq!(alice.role, Role::Voter);
        assert!(!alice.has_voted);
        assert_eq!(alice.voter_ref.as_deref(), Some("VT-9"));

        let found = store.authenticate("a@x.com", "pw").unwrap();
        assert_eq!(found, &alice);
        assert!(!found.has_voted);
    }

    #[test]
    fn authenticate_rejects_any_mismatch() {
        let mut store = IdentityStore::new();
        store.register(Registration::example()).unwrap();

        assert!(store.authenticate("a@x.com", "PW").is_none());
        assert!(store.authenticate("b@x.com", "pw").is_none());
        assert!(store.authenticate("", "").is_none());
        // Exact match on email, no case folding at sign-in.
        assert!(store.authenticate("A@x.com", "pw").is_none());
    }

    #[test]
    fn password_is_stored_as_given() {
        let mut store = IdentityStore::new();
        let mut registration = Registration::example();
        registration.email = "  a@x.com ".into();
        registration.password = " pass phrase ".into();
        let alice = store.register(registration).unwrap();
        assert_eq!(alice.email, "a@x.com");

        assert_eq!(store.authenticate("a@x.com", " pass phrase "), Some(&alice));
        assert_eq!(store.authenticate(" a@x.com", " pass phrase "), Some(&alice));
        assert!(store.authenticate("a@x.com", "pass phrase").is_none());
    }

    #[test]
    fn register_requires_every_field() {
        let mut store = IdentityStore::new();

        let mut registration = Registration::example();
        registration.name = "   ".into();
        assert_eq!(
            store.register(registration),
            Err(ElectionError::MissingField("name"))
        );

        let mut registration = Registration::example();
        registration.voter_ref = String::new();
        assert_eq!(
            store.register(registration),
            Err(ElectionError::MissingField("voterRef"))
        );

        let mut registration = Registration::example();
        registration.password = "  ".into();
        assert_eq!(
            store.register(registration),
            Err(ElectionError::MissingField("password"))
        );

        let absent: Registration =
            rocket::serde::json::serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(
            store.register(absent),
            Err(ElectionError::MissingField("email"))
        );

        assert!(store.is_empty());
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut store = IdentityStore::new();
        store.register(Registration::example()).unwrap();

        let mut same_email = Registration::example2();
        same_email.email = "A@X.com".into();
        assert_eq!(
            store.register(same_email),
            Err(ElectionError::DuplicateEmail("A@X.com".into()))
        );

        let mut same_ref = Registration::example2();
        same_ref.voter_ref = "VT-9".into();
        assert_eq!(
            store.register(same_ref),
            Err(ElectionError::DuplicateVoterRef("VT-9".into()))
        );

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn registered_ids_are_unique() {
        let mut store = IdentityStore::new();
        store
            .seed(Identity::voter("v1".into(), "Voter One", "v1@x.com", "pw", "VT-001"))
            .unwrap();
        let alice = store.register(Registration::example()).unwrap();
        let bob = store.register(Registration::example2()).unwrap();
        assert_eq!(alice.id.as_str(), "v2");
        assert_eq!(bob.id.as_str(), "v3");
    }

    #[test]
    fn mark_voted() {
        let mut store = IdentityStore::new();
        let alice = store.register(Registration::example()).unwrap();

        store.mark_voted(&alice.id).unwrap();
        assert!(store.get(&alice.id).unwrap().has_voted);

        let missing = IdentityId::from("v404");
        assert_eq!(
            store.mark_voted(&missing),
            Err(ElectionError::IdentityNotFound(missing))
        );
    }

    #[test]
    fn voters_excludes_admins() {
        let mut store = IdentityStore::new();
        store
            .seed(Identity::admin("admin".into(), "Admin", "admin@x.com", "admin"))
            .unwrap();
        store.register(Registration::example()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.voters().count(), 1);
    }

    #[test]
    fn secret_is_never_serialized() {
        let identity = Identity::voter("v1".into(), "Alice", "a@x.com", "pw", "VT-9");
        let json = rocket::serde::json::serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("pw"));
        assert!(json.contains("\"hasVoted\":false"));
        assert!(json.contains("\"role\":\"VOTER\""));
    }
}
