use crate::secret::{InvalidEncoding, OtpSecret};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A labelled OTP account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Free-text label, e.g. `bob@aws`. Labels need not be unique; an
    /// account's position in the store is its stable handle.
    pub identifier: CompactString,
    /// Base32 encoded secret as configured. May be empty until a
    /// [`SecretResolver`](crate::resolver::SecretResolver) supplies it.
    #[serde(default)]
    pub secret: String,
}

impl Account {
    /// Create an account from a label and a base32 secret string
    pub fn new(identifier: impl Into<CompactString>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Decode the configured secret into key bytes
    pub fn decoded_secret(&self) -> Result<OtpSecret, InvalidEncoding> {
        OtpSecret::parse_base32(&self.secret)
    }

    /// Provisioning URI for this account
    pub fn provisioning_uri(&self) -> Result<String, InvalidEncoding> {
        Ok(self.decoded_secret()?.to_uri(self.identifier.as_str()))
    }
}

/// A configured secret that failed base32 validation
#[derive(Debug, thiserror::Error)]
#[error("{identifier} has an invalid base32 secret: {secret}")]
pub struct ValidationError {
    /// Label of the offending account
    pub identifier: CompactString,
    /// The literal secret string as configured
    pub secret: String,
    /// What the decoder rejected
    #[source]
    pub source: InvalidEncoding,
}

/// An ordered sequence of accounts.
///
/// Order of appearance in the configuration is preserved and doubles as
/// the index used for numeric lookup. The store is immutable for the rest
/// of a run once missing secrets have been filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountStore(Vec<Account>);

impl AccountStore {
    /// Wrap an ordered account list
    pub fn new(accounts: Vec<Account>) -> Self {
        Self(accounts)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Account at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Account> {
        self.0.get(index)
    }

    /// Accounts in store order
    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.0.iter()
    }

    /// Mutable access for the pre-validation secret fill
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Account> {
        self.0.iter_mut()
    }

    /// Check that every configured secret decodes as base32.
    ///
    /// Fails on the first malformed secret, naming the identifier and the
    /// literal secret string; a bad entry is a configuration error to fix,
    /// not an account to skip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for account in &self.0 {
            if let Err(source) = account.decoded_secret() {
                return Err(ValidationError {
                    identifier: account.identifier.clone(),
                    secret: account.secret.clone(),
                    source,
                });
            }
        }
        debug!(accounts = self.len(), "all secrets decode");
        Ok(())
    }
}

impl FromIterator<Account> for AccountStore {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
