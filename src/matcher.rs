use crate::account::AccountStore;
use regex::Regex;
use tracing::debug;

/// An account index paired with the score its identifier matched with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the account in the store
    pub index: usize,
    /// Identifier remainder after the matched part. Candidates are ranked
    /// by comparing these lexicographically, so an exact match (empty
    /// remainder) always comes first.
    pub score: String,
}

/// Outcome of resolving a query against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No query: every account, in store order, nothing ranked
    ListAll,
    /// Numeric query inside the store bounds: exactly one account
    Index(usize),
    /// Text query: candidates in rank order, the first is the primary match
    Matched(Vec<Candidate>),
    /// Text query that matched nothing in either phase. Not an error;
    /// the caller prints nothing for it.
    NoMatch,
}

/// A query that does not compile as a match pattern
#[derive(Debug, thiserror::Error)]
#[error("cannot compile query {query:?}: {source}")]
pub struct InvalidQuery {
    /// The offending query text
    pub query: String,
    /// The compiler's complaint
    #[source]
    pub source: regex::Error,
}

/// Resolve a query to the accounts it designates.
///
/// Modes, in priority order: no query (or an empty one) lists everything;
/// a non-negative integer below the store length picks by position,
/// bypassing text matching; anything else is matched against identifiers,
/// first anchored at the start, then — only if that found nothing —
/// anywhere in the identifier. Out-of-range integers are treated as text.
pub fn resolve(query: Option<&str>, store: &AccountStore) -> Result<Resolution, InvalidQuery> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok(Resolution::ListAll);
    };

    if let Ok(index) = query.parse::<usize>() {
        if index < store.len() {
            return Ok(Resolution::Index(index));
        }
        debug!(index, accounts = store.len(), "index out of range, matching as text");
    }

    let mut candidates = prefix_matches(query, store)?;
    if candidates.is_empty() {
        debug!(query, "prefix phase found nothing, retrying as substring");
        candidates = substring_matches(query, store)?;
    }
    if candidates.is_empty() {
        return Ok(Resolution::NoMatch);
    }

    // stable sort: equal scores keep store order
    candidates.sort_by(|a, b| a.score.cmp(&b.score));
    Ok(Resolution::Matched(candidates))
}

/// Accounts whose identifier starts with a match of `query`
pub fn prefix_matches(query: &str, store: &AccountStore) -> Result<Vec<Candidate>, InvalidQuery> {
    let re = compile(query, &format!("^(?:{query})"))?;
    Ok(collect(&re, store))
}

/// Accounts whose identifier contains a match of `query` anywhere
pub fn substring_matches(query: &str, store: &AccountStore) -> Result<Vec<Candidate>, InvalidQuery> {
    let re = compile(query, query)?;
    Ok(collect(&re, store))
}

fn compile(query: &str, pattern: &str) -> Result<Regex, InvalidQuery> {
    Regex::new(pattern).map_err(|source| InvalidQuery {
        query: query.to_string(),
        source,
    })
}

/// Score every matching identifier by what follows the matched part.
/// Both phases share this definition, so switching phase never changes
/// what a score means.
fn collect(re: &Regex, store: &AccountStore) -> Vec<Candidate> {
    store
        .iter()
        .enumerate()
        .filter_map(|(index, account)| {
            re.find(account.identifier.as_str()).map(|found| Candidate {
                index,
                score: account.identifier.as_str()[found.end()..].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::account::Account;

    fn store() -> AccountStore {
        ["bob@aws", "bobby@gmail", "b@gmail"]
            .into_iter()
            .map(|id| Account::new(id, "JBSWY3DPEHPK3PXP"))
            .collect()
    }

    #[test]
    fn no_query_lists_everything() {
        assert_eq!(resolve(None, &store()).unwrap(), Resolution::ListAll);
        assert_eq!(resolve(Some(""), &store()).unwrap(), Resolution::ListAll);
    }

    #[test]
    fn prefix_match_ranks_by_remainder() {
        // "bob@aws" leaves "@aws", "bobby@gmail" leaves "by@gmail";
        // '@' sorts before 'b', so bob@aws is the primary match
        let resolution = resolve(Some("bob"), &store()).unwrap();
        let Resolution::Matched(candidates) = resolution else {
            panic!("expected candidates, got {resolution:?}");
        };
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].index, 0);
        assert_eq!(candidates[0].score, "@aws");
        assert_eq!(candidates[1].index, 1);
        assert_eq!(candidates[1].score, "by@gmail");
    }

    #[test]
    fn exact_match_outranks_every_suffix() {
        let store: AccountStore = ["bob@aws", "bob"]
            .into_iter()
            .map(|id| Account::new(id, "JBSWY3DPEHPK3PXP"))
            .collect();
        let Resolution::Matched(candidates) = resolve(Some("bob"), &store).unwrap() else {
            panic!("expected candidates");
        };
        assert_eq!(candidates[0].index, 1);
        assert_eq!(candidates[0].score, "");
    }

    #[test]
    fn substring_phase_only_runs_when_prefix_finds_nothing() {
        // "gmail" starts no identifier but appears inside two
        let Resolution::Matched(candidates) = resolve(Some("gmail"), &store()).unwrap() else {
            panic!("expected candidates");
        };
        assert_eq!(candidates.len(), 2);
        // both remainders are empty; the tie keeps store order
        assert_eq!(candidates[0].index, 1);
        assert_eq!(candidates[1].index, 2);
        assert!(candidates.iter().all(|c| c.score.is_empty()));
    }

    #[test]
    fn unmatched_query_is_a_silent_miss() {
        assert_eq!(resolve(Some("zzz"), &store()).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn in_range_integer_bypasses_text_matching() {
        // "1" would also match nothing as text; as an index it picks
        // the second account directly
        assert_eq!(resolve(Some("1"), &store()).unwrap(), Resolution::Index(1));
    }

    #[test]
    fn out_of_range_integer_falls_through_to_text() {
        assert_eq!(resolve(Some("7"), &store()).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn unbalanced_pattern_is_an_invalid_query() {
        let error = resolve(Some("bob("), &store()).unwrap_err();
        assert_eq!(error.query, "bob(");
    }

    #[test]
    fn pattern_queries_stay_anchored_in_the_prefix_phase() {
        // alternation is wrapped before anchoring, so neither arm may
        // float to the middle of an identifier
        let candidates = prefix_matches("bob|gmail", &store()).unwrap();
        let indices: Vec<usize> = candidates.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn phases_agree_on_score_semantics() {
        let prefix = prefix_matches("bob", &store()).unwrap();
        let substring = substring_matches("bob", &store()).unwrap();
        for candidate in prefix {
            assert!(substring.contains(&candidate));
        }
    }
}
