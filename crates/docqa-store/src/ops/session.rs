use docqa_core::ActionError;
use docqa_core::entities::Profile;
use docqa_core::requests::{LoginCredentials, RegisterData};
use docqa_core::responses::{RegisteredAccount, TokenPair};
use docqa_transport::Transport;

use super::{fallback, rejected};
use crate::lifecycle::Transition;
use crate::persistence::{PersistencePort, tokens};
use crate::slices::{AuthAction, LoginSuccess};
use crate::store::Store;

impl<T: Transport, P: PersistencePort> Store<T, P> {
    /// Exchange credentials for a token pair, then fetch the profile with the
    /// new access token.
    ///
    /// Tokens are committed to the port and the session only once both calls
    /// succeed; a failed profile fetch discards the fresh pair.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `auth.last_error`.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Profile, ActionError> {
        self.dispatch(AuthAction::Login(Transition::Pending));
        match self.authenticate(&credentials).await {
            Ok(success) => {
                let tokens = success.tokens.clone();
                let user = success.user.clone();
                self.commit_tokens(
                    &tokens,
                    AuthAction::Login(Transition::Fulfilled(success)),
                    |error| AuthAction::Login(Transition::Rejected(error)),
                )?;
                tracing::info!(user = %user.id, "logged in");
                Ok(user)
            }
            Err(error) => {
                tracing::debug!(%error, "login rejected");
                self.dispatch(AuthAction::Login(Transition::Rejected(error.clone())));
                Err(error)
            }
        }
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginSuccess, ActionError> {
        credentials.validate()?;
        let tokens = self
            .transport
            .obtain_token(credentials)
            .await
            .map_err(rejected(fallback::LOGIN))?;
        let user = self
            .transport
            .fetch_profile(Some(&tokens.access))
            .await
            .map_err(rejected(fallback::LOGIN))?;
        Ok(LoginSuccess { tokens, user })
    }

    /// Create an account. The session is not authenticated by this call.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `auth.last_error`; server
    /// field errors are kept verbatim.
    pub async fn register(&self, data: RegisterData) -> Result<RegisteredAccount, ActionError> {
        self.dispatch(AuthAction::Register(Transition::Pending));
        let result = match data.validate() {
            Ok(()) => self
                .transport
                .register(&data)
                .await
                .map_err(rejected(fallback::REGISTER)),
            Err(error) => Err(error),
        };
        self.dispatch(AuthAction::Register(Transition::settle(result.clone())));
        result
    }

    /// Refresh the profile with the current access token.
    ///
    /// Failures are logged and leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns the failure to the caller; it is not recorded in the session.
    pub async fn fetch_profile(&self) -> Result<Profile, ActionError> {
        self.dispatch(AuthAction::FetchProfile(Transition::Pending));
        let access = self.access_token();
        let result = self
            .transport
            .fetch_profile(access.as_deref())
            .await
            .map_err(rejected(fallback::PROFILE));
        if let Err(error) = &result {
            tracing::warn!(%error, "profile refresh failed");
        }
        self.dispatch(AuthAction::FetchProfile(Transition::settle(result.clone())));
        result
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Never called implicitly: a 401 elsewhere stays an ordinary failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionError`] also recorded in `auth.last_error`.
    pub async fn refresh_tokens(&self) -> Result<(), ActionError> {
        self.dispatch(AuthAction::RefreshTokens(Transition::Pending));
        let refresh = self.select(|state| state.auth.refresh_token.clone());
        let result = match refresh {
            Some(refresh) => self
                .transport
                .refresh_token(&refresh)
                .await
                .map(|token| token.into_pair(&refresh))
                .map_err(rejected(fallback::REFRESH)),
            None => Err(ActionError::validation("no refresh token stored")),
        };
        match result {
            Ok(pair) => self.commit_tokens(
                &pair,
                AuthAction::RefreshTokens(Transition::Fulfilled(pair.clone())),
                |error| AuthAction::RefreshTokens(Transition::Rejected(error)),
            ),
            Err(error) => {
                self.dispatch(AuthAction::RefreshTokens(Transition::Rejected(error.clone())));
                Err(error)
            }
        }
    }

    /// Forget the session: profile, both tokens, and both stored keys.
    pub fn logout(&self) {
        let _guard = self.lock_session();
        if let Err(error) = tokens::erase(&self.port) {
            tracing::warn!(%error, "failed to erase stored tokens");
        }
        self.dispatch(AuthAction::Logout);
    }

    pub fn clear_auth_error(&self) {
        self.dispatch(AuthAction::ClearError);
    }

    /// Bearer token attached to resource requests.
    pub(crate) fn access_token(&self) -> Option<String> {
        self.select(|state| state.auth.access_token.clone())
    }

    /// Write `pair` to the port and dispatch `fulfilled` as one step, or
    /// dispatch the rejection built from the storage failure.
    fn commit_tokens(
        &self,
        pair: &TokenPair,
        fulfilled: AuthAction,
        on_error: impl FnOnce(ActionError) -> AuthAction,
    ) -> Result<(), ActionError> {
        let _guard = self.lock_session();
        match tokens::save(&self.port, pair) {
            Ok(()) => {
                self.dispatch(fulfilled);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to persist tokens");
                let error = ActionError::storage(error.to_string());
                self.dispatch(on_error(error.clone()));
                Err(error)
            }
        }
    }
}
