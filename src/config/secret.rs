//! Cluster credentials held in memory
//!
//! `elasticsearch.password` and `elasticsearch.api_key` are wrapped in
//! [`SecretString`]: the value is zeroized on drop, `Debug` prints a redaction
//! marker, and the only way to read it is `expose_secret()`, which the client
//! calls when it builds the `Authorization` header.
//!
//! An empty credential counts as unset. `${VAR}` substitution of an empty
//! variable, or an empty `ESINDEX_ELASTICSEARCH_API_KEY`, must not switch the
//! client to a scheme with no key.
//!
//! # Example
//!
//! ```rust
//! use esindex::config::{discard_empty, secret_string};
//! use secrecy::ExposeSecret;
//!
//! let api_key = secret_string("a2V5OnNlY3JldA==".to_string());
//! assert_eq!(api_key.expose_secret(), "a2V5OnNlY3JldA==");
//! assert!(!format!("{api_key:?}").contains("a2V5"));
//!
//! assert!(discard_empty(Some(secret_string(String::new()))).is_none());
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// The credential text inside a [`SecretString`]
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

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Whether the credential has any content
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What `validate-config` prints in place of the credential
    pub fn redacted(&self) -> &'static str {
        if self.0.is_empty() {
            "<empty>"
        } else {
            "********"
        }
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

/// A cluster credential
pub type SecretString = Secret<SecretValue>;

/// Wrap a credential read from the config file or the environment
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Drop a credential that is present but empty
pub fn discard_empty(secret: Option<SecretString>) -> Option<SecretString> {
    secret.filter(|s| !s.expose_secret().is_empty())
}
