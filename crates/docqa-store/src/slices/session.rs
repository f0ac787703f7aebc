//! Session slice: profile, token pair, and auth operation status.
//!
//! ## Invariants
//!
//! - `is_authenticated == access_token.is_some()`
//! - `access_token` and `refresh_token` are both present or both absent
//!
//! Token fields are only written through [`Session::set_tokens`], which keeps
//! both invariants. `pending`/`last_error` are shared by login, register, and
//! token refresh: two different operations in flight see one flag, and the
//! last one to resolve wins.

use chrono::{DateTime, Utc};
use docqa_core::ActionError;
use docqa_core::entities::Profile;
use docqa_core::responses::{RegisteredAccount, TokenPair};

use crate::claims;
use crate::lifecycle::{Transition, apply};

/// Payload of a successful login: the exchanged pair and the fetched profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub tokens: TokenPair,
    pub user: Profile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(Transition<LoginSuccess>),
    Register(Transition<RegisteredAccount>),
    FetchProfile(Transition<Profile>),
    RefreshTokens(Transition<TokenPair>),
    Logout,
    ClearError,
}

impl AuthAction {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Login(t) => format!("auth/login/{}", t.phase()),
            Self::Register(t) => format!("auth/register/{}", t.phase()),
            Self::FetchProfile(t) => format!("auth/fetchProfile/{}", t.phase()),
            Self::RefreshTokens(t) => format!("auth/refresh/{}", t.phase()),
            Self::Logout => "auth/logout".to_string(),
            Self::ClearError => "auth/clearError".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Profile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub pending: bool,
    pub last_error: Option<ActionError>,
}

impl Session {
    /// A session seeded from a stored token pair. The profile is not known yet.
    #[must_use]
    pub fn restored(tokens: Option<TokenPair>) -> Self {
        let mut session = Self::default();
        session.set_tokens(tokens);
        session
    }

    /// Both token invariants hold.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.is_authenticated == self.access_token.is_some()
            && self.access_token.is_some() == self.refresh_token.is_some()
    }

    /// The current pair, if any.
    #[must_use]
    pub fn tokens(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access, refresh)),
            _ => None,
        }
    }

    /// Decoded `exp` of the access token, when it is a JWT.
    #[must_use]
    pub fn access_token_expiry(&self) -> Option<DateTime<Utc>> {
        self.access_token
            .as_deref()
            .and_then(|token| claims::decode_expiry(token).ok())
    }

    fn set_tokens(&mut self, tokens: Option<TokenPair>) {
        match tokens {
            Some(TokenPair { access, refresh }) => {
                self.access_token = Some(access);
                self.refresh_token = Some(refresh);
                self.is_authenticated = true;
            }
            None => {
                self.access_token = None;
                self.refresh_token = None;
                self.is_authenticated = false;
            }
        }
    }

    pub(crate) fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Login(transition) => {
                if let Some(success) = apply(&mut self.pending, &mut self.last_error, transition) {
                    self.set_tokens(Some(success.tokens));
                    self.user = Some(success.user);
                }
            }
            AuthAction::Register(transition) => {
                // Registration never authenticates; only the status pair moves.
                apply(&mut self.pending, &mut self.last_error, transition);
            }
            AuthAction::FetchProfile(transition) => {
                // Profile refreshes are silent: no pending flag, failures leave
                // the previous profile in place.
                if let Transition::Fulfilled(profile) = transition {
                    self.user = Some(profile);
                }
            }
            AuthAction::RefreshTokens(transition) => {
                if let Some(tokens) = apply(&mut self.pending, &mut self.last_error, transition) {
                    self.set_tokens(Some(tokens));
                }
            }
            AuthAction::Logout => {
                self.user = None;
                self.set_tokens(None);
            }
            AuthAction::ClearError => self.last_error = None,
        }
        debug_assert!(self.is_consistent(), "session invariants violated");
    }
}
