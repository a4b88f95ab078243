//! Type-safe identifiers for actions and multipliers.
//!
//! Identifiers are opaque strings on the wire, so documents written by the
//! browser version of the tracker (short ids such as `a1`, or random base-36
//! strings) load unchanged. Entities created here get a UUID v7 string
//! (time-ordered), which keeps ids unique for the lifetime of the state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around an identifier string with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a point-bearing action.
    ActionId
}

define_id! {
    /// Unique identifier for a multiplier (boost).
    MultiplierId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = ActionId::new();
        let b = ActionId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn legacy_ids_serialize_as_plain_strings() {
        let id = MultiplierId::from("m1");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"m1\""));

        let restored: Result<MultiplierId, _> = serde_json::from_str("\"mx7k2p9q\"");
        assert_eq!(restored.ok(), Some(MultiplierId::from("mx7k2p9q")));
    }

    #[test]
    fn display_matches_inner_string() {
        let id = ActionId::from("a2");
        assert_eq!(id.to_string(), "a2");
        assert_eq!(id.into_inner(), "a2");
    }
}
