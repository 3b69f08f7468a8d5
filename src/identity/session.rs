//! Opaque-token session store. Tokens are issued at login, map back to an
//! account id, and expire after a fixed TTL; expired entries are pruned on
//! access. Invalid or expired tokens resolve to nothing, never to an error.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::model::AccountId;
use crate::tprintln;

use super::password::generate_token;

pub type SessionToken = String;

#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub account: AccountId,
    pub issued_at: Instant,
    pub expires_at: Instant,
}

static SESSIONS: Lazy<RwLock<HashMap<String, Session>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));
static ACCOUNT_INDEX: Lazy<RwLock<HashMap<AccountId, HashSet<String>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

#[derive(Debug, Clone)]
pub struct SessionManager {
    pub ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(60 * 60) }
    }
}

impl SessionManager {
    pub fn issue(&self, account: AccountId) -> Session {
        let now = Instant::now();
        let token = generate_token();
        let sess = Session {
            token: token.clone(),
            account,
            issued_at: now,
            expires_at: now + self.ttl,
        };
        SESSIONS.write().insert(token.clone(), sess.clone());
        ACCOUNT_INDEX
            .write()
            .entry(account)
            .or_insert_with(HashSet::new)
            .insert(token);
        tprintln!("session.issue account={:?} ttl_secs={}", account, self.ttl.as_secs());
        sess
    }

    /// Resolve a token to its account. Expired entries are dropped here.
    pub fn validate(&self, token: &str) -> Option<AccountId> {
        let now = Instant::now();
        let mut drop_key: Option<String> = None;
        let out = {
            let map = SESSIONS.read();
            match map.get(token) {
                Some(sess) if sess.expires_at > now => Some(sess.account),
                Some(_) => {
                    drop_key = Some(token.to_string());
                    None
                }
                None => None,
            }
        };
        if let Some(k) = drop_key {
            SESSIONS.write().remove(&k);
        }
        out
    }

    pub fn logout(&self, token: &str) -> bool {
        if let Some(sess) = SESSIONS.write().remove(token) {
            let mut idx = ACCOUNT_INDEX.write();
            if let Some(set) = idx.get_mut(&sess.account) {
                set.remove(token);
            }
            true
        } else {
            false
        }
    }

    /// Drop every live session of an account. Used when an account is
    /// deactivated so no issued token outlives it.
    pub fn revoke_account(&self, account: AccountId) -> usize {
        let mut count = 0usize;
        if let Some(tokens) = ACCOUNT_INDEX.write().remove(&account) {
            let mut s = SESSIONS.write();
            for t in tokens {
                if s.remove(&t).is_some() {
                    count += 1;
                }
            }
        }
        tprintln!("session.revoke account={:?} count={}", account, count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_validate_logout() {
        let sm = SessionManager::default();
        let acc = AccountId::generate();
        let sess = sm.issue(acc);
        assert_eq!(sm.validate(&sess.token), Some(acc));
        assert!(sm.logout(&sess.token));
        assert_eq!(sm.validate(&sess.token), None);
        assert!(!sm.logout(&sess.token));
    }

    #[test]
    fn expired_token_resolves_to_nothing() {
        let sm = SessionManager { ttl: Duration::from_secs(0) };
        let sess = sm.issue(AccountId::generate());
        assert_eq!(sm.validate(&sess.token), None);
        // Pruned on access, not just hidden.
        assert!(!SESSIONS.read().contains_key(&sess.token));
    }

    #[test]
    fn revoke_account_drops_every_session() {
        let sm = SessionManager::default();
        let acc = AccountId::generate();
        let s1 = sm.issue(acc);
        let s2 = sm.issue(acc);
        assert_eq!(sm.revoke_account(acc), 2);
        assert_eq!(sm.validate(&s1.token), None);
        assert_eq!(sm.validate(&s2.token), None);
    }
}
