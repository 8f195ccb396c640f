//! Strongly typed entity identifiers.
//!
//! Every entity is keyed by a UUID v4 generated by the domain at creation
//! time. Distinct newtypes keep a course id from being passed where a student
//! id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::domain::Course`].
    CourseId
);
entity_id!(
    /// Identifier of a [`crate::domain::University`].
    UniversityId
);
entity_id!(
    /// Identifier of a [`crate::domain::Student`].
    StudentId
);
entity_id!(
    /// Identifier of an [`crate::domain::Application`].
    ApplicationId
);
entity_id!(
    /// Identifier of an [`crate::domain::Account`].
    AccountId
);
