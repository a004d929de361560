use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::{load_cli_config, save_cli_config};
use crate::cli::utils::{output_record, output_success, resolve_password};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account and sign in")]
    Signup {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign in and store the access token")]
    Signin {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Show current user information")]
    Whoami,

    #[command(about = "Forget the stored access token")]
    Logout,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_cli_config()?;

    match cmd {
        AuthCommands::Signup { email, password } => {
            let password = resolve_password(password)?;
            let body = ApiClient::anonymous(&config)
                .post("/auth/signup", &json!({ "email": email, "password": password }))
                .await?;
            config.set_session(&email, access_token(&body)?);
            save_cli_config(&config)?;
            output_success(&output_format, &format!("Signed up as {}", email), None)
        }
        AuthCommands::Signin { email, password } => {
            let password = resolve_password(password)?;
            let body = ApiClient::anonymous(&config)
                .post("/auth/signin", &json!({ "email": email, "password": password }))
                .await?;
            config.set_session(&email, access_token(&body)?);
            save_cli_config(&config)?;
            output_success(&output_format, &format!("Signed in as {}", email), None)
        }
        AuthCommands::Whoami => {
            let user = ApiClient::authenticated(&config)?.get("/users/me").await?;
            output_record(&output_format, &user)
        }
        AuthCommands::Logout => {
            config.clear_session();
            save_cli_config(&config)?;
            output_success(&output_format, "Logged out", None)
        }
    }
}

fn access_token(body: &Value) -> anyhow::Result<String> {
    body.get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Server response did not include an access token"))
}
