use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Missing credential")]
  MissingCredential,

  #[error("Malformed credential")]
  MalformedCredential,
}

/// Opaque bearer token supplied with a single request.
///
/// Never persisted. The raw token is kept out of `Debug` output so it cannot
/// end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
  /// Creates a credential from a raw bearer token
  pub fn new(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();
    let token = token.trim();

    if token.is_empty() {
      return Err(ValueObjectError::MissingCredential);
    }

    if token.chars().any(char::is_whitespace) {
      return Err(ValueObjectError::MalformedCredential);
    }

    Ok(Self(token.to_string()))
  }

  /// Creates a credential from an optional raw token, treating absence as missing
  pub fn from_optional(token: Option<&str>) -> Result<Self, ValueObjectError> {
    token
      .ok_or(ValueObjectError::MissingCredential)
      .and_then(Self::new)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Credential").field(&"<redacted>").finish()
  }
}
