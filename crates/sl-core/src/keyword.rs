//! Macro for closed keyword enums that travel as strings.
//!
//! Semantic types, granularities, filter types and the like arrive as free
//! text (from scripts or callers) and leave as fixed wire keywords. Parsing is
//! case-insensitive; serialization always emits the canonical keyword.

/// Define a keyword enum.
///
/// Generates the enum plus `ALL`, `as_str()`, `parse()` (returning
/// [`CoreError::UnknownValue`](crate::error::CoreError::UnknownValue)), `Display`,
/// and string-based `Serialize`/`Deserialize`.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $Name:ident ($label:literal) {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident => $kw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $Name {
            $(
                $(#[$vmeta])*
                $Variant,
            )+
        }

        impl $Name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$Name] = &[$($Name::$Variant),+];

            /// Canonical wire keyword.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($Name::$Variant => $kw,)+
                }
            }

            /// Parse a keyword, ignoring ASCII case and surrounding whitespace.
            pub fn parse(value: &str) -> $crate::error::CoreResult<Self> {
                let trimmed = value.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($kw) {
                        return Ok($Name::$Variant);
                    }
                )+
                Err($crate::error::CoreError::UnknownValue {
                    kind: $label,
                    value: value.to_string(),
                    expected: Self::expected(),
                })
            }

            /// Comma-separated list of accepted keywords.
            pub fn expected() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $Name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use keyword_enum;
