//! Macros for defining typed digit identifiers.

/// Macro to define a fixed-length digit identifier.
///
/// This generates a newtype wrapper around the canonical digit string with:
/// - `KIND` and `LEN` constants
/// - `parse()` which strips the mask, checks the length, and then calls the
///   supplied checker (returning `Ok(())` or an `IdError`)
/// - `digits()` and `masked()` accessors
/// - `Display` (masked form) and `FromStr` implementations
/// - `Serialize` (bare digits) and validating `Deserialize` implementations
///
/// # Example
///
/// ```ignore
/// define_digit_id!(Cep, IdKind::Cep, 8, format_postal_code, |_digits| Ok(()));
///
/// let cep: Cep = "01310-100".parse()?;
/// assert_eq!(cep.digits(), "01310100");
/// ```
#[macro_export]
macro_rules! define_digit_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $len:expr, $mask:path, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// The identifier kind.
            pub const KIND: $crate::IdKind = $kind;

            /// Number of digits in the canonical form.
            pub const LEN: usize = $len;

            /// Parses an identifier from user input, masked or not.
            pub fn parse(raw: &str) -> Result<Self, $crate::IdError> {
                let digits = $crate::extract_digits(raw);

                if digits.is_empty() {
                    return Err($crate::IdError::Empty { kind: Self::KIND });
                }

                if digits.len() != Self::LEN {
                    return Err($crate::IdError::InvalidLength {
                        kind: Self::KIND,
                        expected: stringify!($len),
                        actual: digits.len(),
                    });
                }

                let check: fn(&str) -> Result<(), $crate::IdError> = $check;
                check(&digits)?;

                Ok(Self(digits))
            }

            /// Returns the canonical digits.
            #[must_use]
            pub fn digits(&self) -> &str {
                &self.0
            }

            /// Returns the display mask of this identifier.
            #[must_use]
            pub fn masked(&self) -> String {
                $mask(&self.0)
            }

            /// Consumes the identifier and returns its digits.
            #[must_use]
            pub fn into_digits(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.masked())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
