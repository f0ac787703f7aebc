use docqa_core::entities::Profile;
use docqa_core::requests::{LoginCredentials, RegisterData};
use serde::Serialize;

use crate::bootstrap::CliStore;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::cli::subcommands::auth::{AuthLoginArgs, AuthRegisterArgs};
use crate::output::{fail, output};

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    display_name: Option<String>,
    user: Option<Profile>,
    expires_at: Option<String>,
    note: Option<String>,
}

/// Handle `dqa auth <subcommand>`.
pub async fn handle(action: &AuthCommands, store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, store, flags).await,
        AuthCommands::Register(args) => register(args, store, flags).await,
        AuthCommands::Logout => {
            store.logout();
            output(&serde_json::json!({"authenticated": false}), flags.format)
        }
        AuthCommands::Status => status(store, flags).await,
        AuthCommands::Refresh => {
            if store.refresh_tokens().await.is_err() {
                return report_auth_error(store, flags);
            }
            status(store, flags).await
        }
    }
}

async fn login(args: &AuthLoginArgs, store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let credentials = LoginCredentials::new(&args.email, &args.password);
    if store.login(credentials).await.is_err() {
        return report_auth_error(store, flags);
    }
    output(&status_response(store, None), flags.format)
}

async fn register(
    args: &AuthRegisterArgs,
    store: &CliStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let data = RegisterData {
        email: args.email.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        password_confirm: args
            .password_confirm
            .clone()
            .unwrap_or_else(|| args.password.clone()),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
    };
    match store.register(data).await {
        Ok(account) => output(&account, flags.format),
        Err(_) => report_auth_error(store, flags),
    }
}

async fn status(store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let note = if store.snapshot().auth.is_authenticated {
        // Profile refresh failures are silent in the session; surface them here.
        store.fetch_profile().await.err().map(|e| e.to_string())
    } else {
        Some("not logged in".to_string())
    };
    output(&status_response(store, note), flags.format)
}

fn status_response(store: &CliStore, note: Option<String>) -> AuthStatusResponse {
    let auth = store.snapshot().auth;
    AuthStatusResponse {
        authenticated: auth.is_authenticated,
        expires_at: auth.access_token_expiry().map(|at| at.to_rfc3339()),
        display_name: auth.user.as_ref().map(Profile::display_name),
        user: auth.user,
        note,
    }
}

fn report_auth_error(store: &CliStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    match store.snapshot().auth.last_error {
        Some(error) => fail(&error, flags.format),
        None => anyhow::bail!("auth operation failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use docqa_core::responses::TokenPair;
    use docqa_store::slices::{AuthAction, LoginSuccess};
    use docqa_store::{MemoryPort, PersistencePort, Store, Transition};
    use docqa_transport::HttpTransport;
    use pretty_assertions::assert_eq;

    use super::*;

    fn offline_store() -> CliStore {
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(1), "dqa-test")
            .expect("client should build");
        let port: Box<dyn PersistencePort> = Box::new(MemoryPort::new());
        Store::new(transport, port)
    }

    #[test]
    fn status_reports_display_name_of_signed_in_user() {
        let store = offline_store();
        store.dispatch(AuthAction::Login(Transition::Fulfilled(LoginSuccess {
            tokens: TokenPair::new("T1", "R1"),
            user: Profile {
                id: "u1".into(),
                email: "ada@example.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                ..Profile::default()
            },
        })));

        let status = status_response(&store, None);
        assert!(status.authenticated);
        assert_eq!(status.display_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn status_has_no_display_name_when_signed_out() {
        let status = status_response(&offline_store(), Some("not logged in".into()));
        assert!(!status.authenticated);
        assert_eq!(status.display_name, None);
    }
}
