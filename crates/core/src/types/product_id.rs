//! Product identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty or all whitespace.
    #[error("product id cannot be blank")]
    Blank,
    /// The input string is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("product id may only contain letters, digits, '-' and '_' (found {found:?})")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
}

/// A product identifier.
///
/// Product ids are caller-chosen string keys, unique and immutable
/// after creation. The id doubles as the product's image filename
/// (`<id>.jpg`), so the character set is restricted to names that are
/// safe on a filesystem and cannot escape the images directory.
///
/// ## Constraints
///
/// - Non-blank after trimming
/// - Length: 1-64 characters
/// - Characters: ASCII letters, digits, `-`, `_`
///
/// ## Examples
///
/// ```
/// use shopkart_core::ProductId;
///
/// assert!(ProductId::parse("P1").is_ok());
/// assert!(ProductId::parse("pixel-9_pro").is_ok());
///
/// assert!(ProductId::parse("").is_err());      // blank
/// assert!(ProductId::parse("   ").is_err());   // blank
/// assert!(ProductId::parse("../etc").is_err()); // path characters
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product id.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `ProductId` from a string.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, longer than 64
    /// characters, or contains a character outside `[A-Za-z0-9_-]`.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ProductIdError::Blank);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(found) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ProductIdError::InvalidCharacter { found });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ProductId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ProductId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ProductId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = ProductId::parse("pixel-9_Pro").expect("valid id");
        assert_eq!(id.as_str(), "pixel-9_Pro");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ProductId::parse("  P1  ").expect("valid id");
        assert_eq!(id.as_str(), "P1");
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Blank));
        assert_eq!(ProductId::parse("   "), Err(ProductIdError::Blank));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(65);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { max: 64 })
        ));
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        for bad in ["../escape", "a/b", "a\\b", "a.b", "a b", "p%27"] {
            assert!(
                matches!(
                    ProductId::parse(bad),
                    Err(ProductIdError::InvalidCharacter { .. })
                ),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_display() {
        let id = ProductId::parse("P1").expect("valid id");
        assert_eq!(id.to_string(), "P1");
    }
}
