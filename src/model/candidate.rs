use serde::{Deserialize, Serialize};

use super::{counter::Counter, error::ElectionError, id::CandidateId, identity::required};

/// Placeholder portrait used when a candidate is added without one.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/400/300";

/// A candidate standing in the election, with their running vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    pub description: String,
    pub image_url: String,
    pub vote_count: u64,
}

/// A candidate as submitted by an admin: no ID and no votes yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSpec {
    pub name: String,
    pub party: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl CandidateSpec {
    /// Trim every field, reject a missing name or party, and fill in the default image.
    fn validated(self) -> Result<Self, ElectionError> {
        let image_url = match self.image_url.trim() {
            "" => DEFAULT_IMAGE_URL.to_string(),
            url => url.to_string(),
        };
        Ok(Self {
            name: required("name", &self.name)?,
            party: required("party", &self.party)?,
            description: self.description.trim().to_string(),
            image_url,
        })
    }
}

/// The candidates currently standing, in the order they were added.
#[derive(Debug)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
    ids: Counter,
}

impl Default for CandidateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            ids: Counter::new("c", 1),
        }
    }

    /// Add a new candidate with zero votes. Name and party are required.
    pub fn add(&mut self, spec: CandidateSpec) -> Result<Candidate, ElectionError> {
        // Validate before taking an ID so rejected specs do not burn one.
        let spec = spec.validated()?;
        let candidate = Candidate {
            id: self.ids.next(),
            name: spec.name,
            party: spec.party,
            description: spec.description,
            image_url: spec.image_url,
            vote_count: 0,
        };
        self.candidates.push(candidate.clone());
        Ok(candidate)
    }

    /// Insert a fixed record, keeping its ID and vote count.
    pub fn seed(&mut self, candidate: Candidate) -> Result<(), ElectionError> {
        if self.get(&candidate.id).is_some() {
            return Err(ElectionError::DuplicateCandidate(candidate.id));
        }
        self.ids.skip_past(candidate.id.as_str());
        self.candidates.push(candidate);
        Ok(())
    }

    /// Remove a candidate. Ballots already cast for them are left untouched.
    pub fn remove(&mut self, id: &CandidateId) -> Result<Candidate, ElectionError> {
        let index = self
            .candidates
            .iter()
            .position(|candidate| &candidate.id == id)
            .ok_or_else(|| ElectionError::CandidateNotFound(id.clone()))?;
        Ok(self.candidates.remove(index))
    }

    /// Add one vote, returning the new count.
    pub fn increment_votes(&mut self, id: &CandidateId) -> Result<u64, ElectionError> {
        let candidate = self
            .candidates
            .iter_mut()
            .find(|candidate| &candidate.id == id)
            .ok_or_else(|| ElectionError::CandidateNotFound(id.clone()))?;
        candidate.vote_count += 1;
        Ok(candidate.vote_count)
    }

    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Case-insensitive substring match on name or party. An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&Candidate> {
        let term = term.trim().to_lowercase();
        self.candidates
            .iter()
            .filter(|candidate| {
                candidate.name.to_lowercase().contains(&term)
                    || candidate.party.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Sum of every candidate's vote count.
    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|candidate| candidate.vote_count).sum()
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateSpec {
        pub fn example() -> Self {
            Self {
                name: "Sarah Johnson".into(),
                party: "Progressive Alliance".into(),
                description: "Focused on sustainable urban development.".into(),
                image_url: String::new(),
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Robert Chen".into(),
                party: "Liberty Conservative".into(),
                description: "Advocating for digital infrastructure.".into(),
                image_url: "https://example.com/robert.png".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn add_starts_at_zero_votes() {
        let mut registry = CandidateRegistry::new();
        let sarah = registry.add(CandidateSpec::example()).unwrap();
        let robert = registry.add(CandidateSpec::example2()).unwrap();

        assert_eq!(sarah.vote_count, 0);
        assert_eq!(sarah.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(robert.image_url, "https://example.com/robert.png");
        assert_ne!(sarah.id, robert.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn add_requires_name_and_party() {
        let mut registry = CandidateRegistry::new();

        let mut spec = CandidateSpec::example();
        spec.party = " ".into();
        assert_eq!(
            registry.add(spec),
            Err(ElectionError::MissingField("party"))
        );

        let mut spec = CandidateSpec::example();
        spec.name = String::new();
        assert_eq!(registry.add(spec), Err(ElectionError::MissingField("name")));

        assert!(registry.is_empty());
        // Rejections do not consume IDs.
        let first = registry.add(CandidateSpec::example()).unwrap();
        assert_eq!(first.id.as_str(), "c1");
    }

    #[test]
    fn remove_and_increment() {
        let mut registry = CandidateRegistry::new();
        let sarah = registry.add(CandidateSpec::example()).unwrap();
        let robert = registry.add(CandidateSpec::example2()).unwrap();

        assert_eq!(registry.increment_votes(&sarah.id), Ok(1));
        assert_eq!(registry.increment_votes(&sarah.id), Ok(2));
        assert_eq!(registry.total_votes(), 2);

        let removed = registry.remove(&sarah.id).unwrap();
        assert_eq!(removed.vote_count, 2);
        assert!(registry.get(&sarah.id).is_none());
        assert!(registry.get(&robert.id).is_some());

        assert_eq!(
            registry.increment_votes(&sarah.id),
            Err(ElectionError::CandidateNotFound(sarah.id.clone()))
        );
        assert_eq!(
            registry.remove(&sarah.id),
            Err(ElectionError::CandidateNotFound(sarah.id))
        );
    }

    #[test]
    fn ids_never_repeat_across_adds_and_removes() {
        let mut registry = CandidateRegistry::new();
        let mut seen = HashSet::new();
        for round in 0..20 {
            let candidate = registry.add(CandidateSpec::example()).unwrap();
            assert!(seen.insert(candidate.id.clone()), "ID reused: {}", candidate.id);
            if round % 3 == 0 {
                registry.remove(&candidate.id).unwrap();
            }
            let live: HashSet<_> = registry.iter().map(|c| c.id.clone()).collect();
            assert_eq!(live.len(), registry.len());
        }
    }

    #[test]
    fn seed_keeps_fixed_ids() {
        let mut registry = CandidateRegistry::new();
        let mut fixed = registry.add(CandidateSpec::example()).unwrap();
        registry.remove(&fixed.id).unwrap();
        fixed.id = "c3".into();
        registry.seed(fixed.clone()).unwrap();
        assert_eq!(
            registry.seed(fixed.clone()),
            Err(ElectionError::DuplicateCandidate(fixed.id))
        );

        let next = registry.add(CandidateSpec::example2()).unwrap();
        assert_eq!(next.id.as_str(), "c4");
    }

    #[test]
    fn search_matches_name_or_party() {
        let mut registry = CandidateRegistry::new();
        registry.add(CandidateSpec::example()).unwrap();
        registry.add(CandidateSpec::example2()).unwrap();

        let names = |term: &str| {
            registry
                .search(term)
                .into_iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names("sarah"), vec!["Sarah Johnson"]);
        assert_eq!(names("LIBERTY"), vec!["Robert Chen"]);
        assert_eq!(names(""), vec!["Sarah Johnson", "Robert Chen"]);
        assert!(names("green").is_empty());
    }
}
