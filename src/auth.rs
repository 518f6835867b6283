//! Registration, login and the failed-attempt lockout
//!
//! Credentials are compared in clear text against the users table. Failed
//! attempts are tracked per email in memory only (one tracker per page load).

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::consts::{LOCKOUT_SECS, MAX_LOGIN_ATTEMPTS};
use crate::errors::AuthError;
use crate::storage::KvStore;
use crate::users::{User, UserStore};

/// Failure history for one email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailedAttempt {
    pub count: u32,
    /// Set once `count` reaches the limit
    pub unblock_time: Option<DateTime<Utc>>,
}

pub struct AuthFlow<S> {
    users: UserStore<S>,
    attempts: HashMap<String, FailedAttempt>,
}

impl<S: KvStore> AuthFlow<S> {
    pub fn new(users: UserStore<S>) -> Self {
        Self {
            users,
            attempts: HashMap::new(),
        }
    }

    pub fn users(&self) -> &UserStore<S> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserStore<S> {
        &mut self.users
    }

    /// Add a user with zero high scores; does not log them in
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let mut table = self.users.load()?;
        let user = User::new(name, email, password);
        if !table.insert(user.clone()) {
            log::info!("Registration refused, {} already exists", email);
            return Err(AuthError::DuplicateEmail);
        }
        self.users.save(&table)?;
        log::info!("Registered {}", email);
        Ok(user)
    }

    /// Check credentials, record the login instant and set the current user
    pub fn login(&mut self, email: &str, password: &str, now: DateTime<Utc>) -> Result<User, AuthError> {
        if let Some(until) = self.locked_until(email, now) {
            log::info!("Login for {} refused, locked until {}", email, until);
            return Err(AuthError::AccountLocked { until });
        }

        let mut table = self.users.load()?;
        let Some(row) = table
            .find_mut(email)
            .filter(|u| u.password == password)
        else {
            self.record_failure(email, now);
            return Err(AuthError::InvalidCredentials);
        };
        row.timestamps.push(now);
        let user = row.clone();

        self.users.save(&table)?;
        self.users.set_current(&user)?;
        self.attempts.remove(email);
        log::info!("{} logged in", email);
        Ok(user)
    }

    /// Forget the current user
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.users.clear_current()?;
        log::info!("Logged out");
        Ok(())
    }

    pub fn is_locked(&self, email: &str, now: DateTime<Utc>) -> bool {
        self.locked_until(email, now).is_some()
    }

    pub fn failed_attempts(&self, email: &str) -> Option<&FailedAttempt> {
        self.attempts.get(email)
    }

    fn locked_until(&self, email: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.attempts
            .get(email)
            .and_then(|a| a.unblock_time)
            .filter(|until| now < *until)
    }

    fn record_failure(&mut self, email: &str, now: DateTime<Utc>) {
        let entry = self.attempts.entry(email.to_string()).or_default();
        // A lock that has run out starts a fresh count
        if entry.unblock_time.is_some_and(|until| now >= until) {
            *entry = FailedAttempt::default();
        }
        entry.count += 1;
        if entry.count >= MAX_LOGIN_ATTEMPTS {
            let until = now + TimeDelta::seconds(LOCKOUT_SECS);
            entry.unblock_time = Some(until);
            log::warn!("{} locked until {} after {} failures", email, until, entry.count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn flow() -> AuthFlow<MemoryStore> {
        AuthFlow::new(UserStore::new(MemoryStore::new()))
    }

    fn flow_with_dana() -> AuthFlow<MemoryStore> {
        let mut auth = flow();
        auth.register("Dana", "dana@x.com", "secret").unwrap();
        auth
    }

    #[test]
    fn test_register_adds_zeroed_user_without_login() {
        let mut auth = flow();
        let user = auth.register("Dana", "dana@x.com", "secret").unwrap();
        assert_eq!(user.high_score_ball, 0);
        assert_eq!(user.high_score_dodge, 0);
        assert!(user.timestamps.is_empty());
        assert_eq!(auth.users().load().unwrap().len(), 1);
        assert_eq!(auth.users().current().unwrap(), None);
    }

    #[test]
    fn test_register_duplicate_email() {
        let mut auth = flow_with_dana();
        let err = auth.register("Impostor", "dana@x.com", "x").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        let table = auth.users().load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find("dana@x.com").unwrap().name, "Dana");
    }

    #[test]
    fn test_login_sets_current_and_appends_one_timestamp() {
        let mut auth = flow_with_dana();
        let user = auth.login("dana@x.com", "secret", t0()).unwrap();
        assert_eq!(user.timestamps, vec![t0()]);
        assert_eq!(auth.users().current().unwrap(), Some(user.clone()));

        let later = t0() + TimeDelta::hours(1);
        auth.login("dana@x.com", "secret", later).unwrap();
        let row = auth.users().load().unwrap().find("dana@x.com").unwrap().clone();
        assert_eq!(row.timestamps, vec![t0(), later]);
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let mut auth = flow_with_dana();
        assert!(matches!(
            auth.login("Dana@x.com", "secret", t0()),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("dana@x.com", "Secret", t0()),
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(auth.users().current().unwrap(), None);
    }

    #[test]
    fn test_three_failures_lock_for_five_minutes() {
        let mut auth = flow_with_dana();
        for _ in 0..3 {
            assert!(matches!(
                auth.login("dana@x.com", "wrong", t0()),
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(auth.is_locked("dana@x.com", t0()));

        // Correct password is refused while locked
        let err = auth.login("dana@x.com", "secret", t0() + TimeDelta::minutes(4)).unwrap_err();
        match err {
            AuthError::AccountLocked { until } => assert_eq!(until, t0() + TimeDelta::minutes(5)),
            other => panic!("expected AccountLocked, got {:?}", other),
        }
        // Locked attempts do not count
        assert_eq!(auth.failed_attempts("dana@x.com").unwrap().count, 3);

        // Once the lock runs out the right password works and clears the tracker
        auth.login("dana@x.com", "secret", t0() + TimeDelta::minutes(5)).unwrap();
        assert_eq!(auth.failed_attempts("dana@x.com"), None);
    }

    #[test]
    fn test_failure_after_expiry_restarts_count() {
        let mut auth = flow_with_dana();
        for _ in 0..3 {
            let _ = auth.login("dana@x.com", "wrong", t0());
        }
        let after = t0() + TimeDelta::minutes(6);
        assert!(matches!(
            auth.login("dana@x.com", "wrong", after),
            Err(AuthError::InvalidCredentials)
        ));
        let attempt = auth.failed_attempts("dana@x.com").unwrap();
        assert_eq!(attempt.count, 1);
        assert_eq!(attempt.unblock_time, None);
        assert!(!auth.is_locked("dana@x.com", after));
    }

    #[test]
    fn test_success_resets_partial_failures() {
        let mut auth = flow_with_dana();
        let _ = auth.login("dana@x.com", "wrong", t0());
        let _ = auth.login("dana@x.com", "wrong", t0());
        auth.login("dana@x.com", "secret", t0()).unwrap();
        let _ = auth.login("dana@x.com", "wrong", t0());
        assert_eq!(auth.failed_attempts("dana@x.com").unwrap().count, 1);
        assert!(!auth.is_locked("dana@x.com", t0()));
    }

    #[test]
    fn test_unknown_email_is_tracked_too() {
        let mut auth = flow();
        for _ in 0..3 {
            let _ = auth.login("ghost@x.com", "pw", t0());
        }
        assert!(auth.is_locked("ghost@x.com", t0()));
        assert!(!auth.is_locked("other@x.com", t0()));
    }

    #[test]
    fn test_logout_clears_current() {
        let mut auth = flow_with_dana();
        auth.login("dana@x.com", "secret", t0()).unwrap();
        auth.logout().unwrap();
        assert_eq!(auth.users().current().unwrap(), None);
    }

    #[test]
    fn test_ball_session_raises_logged_in_best() {
        use crate::sim::{BallConfig, BallGame, GameEvent, GameKind};

        let mut auth = flow_with_dana();
        auth.login("dana@x.com", "secret", t0()).unwrap();
        auth.users_mut().record_score(GameKind::Ball, 5).unwrap();

        let mut game = BallGame::new(BallConfig::default(), 7);
        game.start();
        for _ in 0..12 {
            assert!(game.hit().is_some());
        }
        let events = game.advance(30_000);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Ended(_))));
        assert_eq!(game.score(), 12);

        let outcome = auth.users_mut().record_score(GameKind::Ball, game.score()).unwrap();
        assert!(outcome.new_high_score);
        assert_eq!(outcome.previous_best, 5);
        let table = auth.users().load().unwrap();
        assert_eq!(table.find("dana@x.com").unwrap().high_score_ball, 12);
        assert_eq!(auth.users().current().unwrap().unwrap().high_score_ball, 12);
    }

    proptest! {
        #[test]
        fn prop_emails_stay_unique(emails in prop::collection::vec(0u8..5, 1..30)) {
            let mut auth = flow();
            let mut seen = std::collections::HashSet::new();
            for n in emails {
                let email = format!("user{}@x.com", n);
                let result = auth.register("U", &email, "pw");
                if seen.insert(email.clone()) {
                    prop_assert!(result.is_ok());
                } else {
                    prop_assert!(matches!(result, Err(AuthError::DuplicateEmail)));
                }
            }
            let table = auth.users().load().unwrap();
            prop_assert_eq!(table.len(), seen.len());
            let distinct: std::collections::HashSet<_> = table.iter().map(|u| u.email.clone()).collect();
            prop_assert_eq!(distinct.len(), table.len());
        }
    }
}
