use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Declare a string-backed identifier type that cannot be mixed up with the others.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Unique ID of a registered voter or admin.
    IdentityId
);

string_id!(
    /// Unique ID of a candidate.
    CandidateId
);

string_id!(
    /// Unique ID of a recorded ballot.
    BallotId
);
