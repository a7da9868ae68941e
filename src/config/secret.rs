//! Secure credential handling
//!
//! Wraps store credentials in `secrecy` containers so the memory is
//! zeroed on drop and Debug output is redacted; code must call
//! `expose_secret()` to read the value.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype implementing the traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// True when the protected value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the protected value starts with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A string whose memory is zeroed on drop and redacted in Debug output
pub type SecretString = Secret<SecretValue>;

/// Creates a `SecretString` from a plain string
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_expose() {
        let secret = secret_string("hunter2".to_string());
        assert_eq!(secret.expose_secret().as_ref(), "hunter2");
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_string("postgresql://user:pw@db/carelog".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("pw"));
    }

    #[test]
    fn test_starts_with() {
        let secret = secret_string("postgresql://localhost".to_string());
        assert!(secret.expose_secret().starts_with("postgresql://"));
    }
}
