use crate::account::AccountStore;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// Failure of the secret retrieval collaborator
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// No secret could be produced for an account that has none configured
    #[error("no secret available for {identifier}")]
    Missing {
        /// Label of the account left without a secret
        identifier: String,
    },
    /// The underlying source failed before producing an answer
    #[error("secret source failed: {0}")]
    Source(#[from] std::io::Error),
}

/// Supplies secret material for accounts configured without it.
///
/// The calling process picks the implementation at startup — a keychain,
/// a prompt, a fixture — and the rest of the crate only sees this trait.
pub trait SecretResolver {
    /// Look up a secret for the identifier; `None` when the source does
    /// not know it either
    fn resolve(&self, identifier: &str) -> Result<Option<String>, ResolverError>;

    /// Remember a newly learned secret under the identifier.
    /// Fire-and-forget: implementations log failures instead of
    /// reporting them back.
    fn persist(&self, identifier: &str, secret: &str);
}

/// Map-backed resolver. Doubles as the test substitute: it records what
/// was persisted so tests can assert on it.
#[derive(Debug, Default)]
pub struct StaticSecrets {
    known: HashMap<String, String>,
    persisted: Mutex<Vec<(String, String)>>,
}

impl StaticSecrets {
    /// Resolver that knows the given identifier-to-secret pairs
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            known: known
                .into_iter()
                .map(|(id, secret)| (id.into(), secret.into()))
                .collect(),
            persisted: Mutex::new(Vec::new()),
        }
    }

    /// Everything persisted through this resolver, in call order
    pub fn persisted(&self) -> Vec<(String, String)> {
        self.persisted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SecretResolver for StaticSecrets {
    fn resolve(&self, identifier: &str) -> Result<Option<String>, ResolverError> {
        Ok(self.known.get(identifier).cloned())
    }

    fn persist(&self, identifier: &str, secret: &str) {
        if let Ok(mut guard) = self.persisted.lock() {
            guard.push((identifier.to_string(), secret.to_string()));
        }
    }
}

/// Fill in every account whose configured secret is empty.
///
/// Runs strictly before validation. Each filled secret is also handed to
/// [`SecretResolver::persist`]. Returns whether anything changed, so the
/// caller knows to rewrite its accounts file. An account the resolver
/// cannot answer for is an error; validation must never see a blank.
pub fn fill_missing(
    store: &mut AccountStore,
    resolver: &dyn SecretResolver,
) -> Result<bool, ResolverError> {
    let mut changed = false;
    for account in store.iter_mut() {
        if !account.secret.trim().is_empty() {
            continue;
        }
        let identifier = account.identifier.to_string();
        match resolver.resolve(&identifier)? {
            Some(secret) => {
                info!(identifier = %account.identifier, "resolved a missing secret");
                resolver.persist(&identifier, &secret);
                account.secret = secret;
                changed = true;
            }
            None => return Err(ResolverError::Missing { identifier }),
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::account::Account;

    #[test]
    fn fill_missing_leaves_complete_stores_untouched() {
        let mut store = AccountStore::new(vec![Account::new("bob@aws", "JBSWY3DPEHPK3PXP")]);
        let resolver = StaticSecrets::default();
        assert!(!fill_missing(&mut store, &resolver).unwrap());
        assert!(resolver.persisted().is_empty());
    }

    #[test]
    fn fill_missing_supplies_and_persists_blank_secrets() {
        let mut store = AccountStore::new(vec![
            Account::new("bob@aws", "JBSWY3DPEHPK3PXP"),
            Account::new("bobby@gmail", ""),
        ]);
        let resolver = StaticSecrets::new([("bobby@gmail", "GEZDGNBVGY3TQOJQ")]);
        assert!(fill_missing(&mut store, &resolver).unwrap());
        assert_eq!(store.get(1).unwrap().secret, "GEZDGNBVGY3TQOJQ");
        assert_eq!(
            resolver.persisted(),
            vec![("bobby@gmail".to_string(), "GEZDGNBVGY3TQOJQ".to_string())]
        );
    }

    #[test]
    fn unresolvable_account_is_an_error() {
        let mut store = AccountStore::new(vec![Account::new("unknown", "")]);
        let resolver = StaticSecrets::default();
        let error = fill_missing(&mut store, &resolver).unwrap_err();
        assert!(matches!(error, ResolverError::Missing { identifier } if identifier == "unknown"));
    }

    #[test]
    fn whitespace_only_secrets_count_as_missing() {
        let mut store = AccountStore::new(vec![Account::new("padded", "   ")]);
        let resolver = StaticSecrets::new([("padded", "JBSWY3DPEHPK3PXP")]);
        assert!(fill_missing(&mut store, &resolver).unwrap());
        assert_eq!(store.get(0).unwrap().secret, "JBSWY3DPEHPK3PXP");
    }
}
