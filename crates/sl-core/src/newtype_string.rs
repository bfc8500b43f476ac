//! Macro for defining strongly-typed identifier newtypes.
//!
//! Every identifier in an analysis draft (sheet, visual, filter, ...) shares the
//! same invariant: a non-empty string. The macro generates the wrapper, its
//! serde impls (transparent on the wire, rejecting blank strings on input) and
//! the usual string conversions.

/// Define a strongly-typed, non-empty identifier.
///
/// Generates:
/// - The struct with `Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize`
/// - Custom `Deserialize` (rejects empty and blank strings, like `parse()`)
/// - `KIND` (human label used in error messages)
/// - `new()` (panics on empty), `parse()` (returns `CoreResult`), `as_str()`, `into_inner()`
/// - `Display`, `AsRef<str>`, `Deref<Target=str>`, `Borrow<str>`
/// - `PartialEq<str>`, `PartialEq<&str>`
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident => $kind:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                if s.trim().is_empty() {
                    return Err(serde::de::Error::custom(concat!($kind, " id must not be empty")));
                }
                Ok(Self(s))
            }
        }

        impl $Name {
            /// Label used when this id shows up in an error message.
            pub const KIND: &'static str = $kind;

            /// Create a new id, panicking if it is empty.
            ///
            /// Prefer [`parse`](Self::parse) for untrusted input.
            pub fn new(id: impl Into<String>) -> Self {
                let s = id.into();
                assert!(!s.is_empty(), concat!($kind, " id must not be empty"));
                Self(s)
            }

            /// Validate and wrap an id.
            pub fn parse(id: impl Into<String>) -> $crate::error::CoreResult<Self> {
                let s = id.into();
                if s.trim().is_empty() {
                    return Err($crate::error::CoreError::InvalidConfiguration {
                        kind: $kind,
                        id: s,
                        message: "id must not be empty".to_string(),
                    });
                }
                Ok(Self(s))
            }

            /// Return the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str { &self.0 }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool { self.0 == other }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool { self.0 == *other }
        }
    };
}

pub(crate) use define_id;
