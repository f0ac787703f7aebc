use clap::{Args, Subcommand};

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange email and password for a token pair.
    Login(AuthLoginArgs),
    /// Create an account (does not log in).
    Register(AuthRegisterArgs),
    /// Forget the stored token pair.
    Logout,
    /// Show the current session and refresh the profile if logged in.
    Status,
    /// Exchange the stored refresh token for a new access token.
    Refresh,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    pub password_confirm: Option<String>,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
}
