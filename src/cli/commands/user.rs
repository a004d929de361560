use clap::Subcommand;
use serde_json::{Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::load_cli_config;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Update your first and/or last name")]
    Edit {
        #[arg(long, help = "First name")]
        first_name: Option<String>,
        #[arg(long, help = "Last name")]
        last_name: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_cli_config()?;

    match cmd {
        UserCommands::Edit { first_name, last_name } => {
            let mut body = Map::new();
            if let Some(first_name) = first_name {
                body.insert("firstName".to_string(), Value::String(first_name));
            }
            if let Some(last_name) = last_name {
                body.insert("lastName".to_string(), Value::String(last_name));
            }
            if body.is_empty() {
                return Err(anyhow::anyhow!("Nothing to change: pass --first-name and/or --last-name"));
            }

            let user = ApiClient::authenticated(&config)?
                .patch("/users", &Value::Object(body))
                .await?;
            output_record(&output_format, &user)
        }
    }
}
