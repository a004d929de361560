use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{load_cli_config, ping_server, save_cli_config, ServerStatus};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Point the CLI at a server (clears any stored session)")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3333")]
        url: String,
    },

    #[command(about = "Show the configured server and session")]
    Show,

    #[command(about = "Check server health status from API /health endpoint")]
    Health,

    #[command(about = "Show server information from API root endpoint")]
    Info,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_cli_config()?;

    match cmd {
        ServerCommands::Set { url } => {
            reqwest::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;
            config.set_server(&url);
            save_cli_config(&config)?;
            output_success(
                &output_format,
                &format!("Using server {}", config.server_url),
                Some(json!({ "server_url": config.server_url })),
            )
        }
        ServerCommands::Show => output_record(
            &output_format,
            &json!({
                "server": config.server_url,
                "status": config.status,
                "lastPing": config.last_ping,
                "signedIn": config.email,
            }),
        ),
        ServerCommands::Health => {
            let status = ping_server(&config.server_url).await;
            config.update_ping(status);
            save_cli_config(&config)?;

            if status != ServerStatus::Up {
                return Err(anyhow::anyhow!("Server {} is down", config.server_url));
            }
            output_success(
                &output_format,
                &format!("Server {} is up", config.server_url),
                Some(json!({ "status": status })),
            )
        }
        ServerCommands::Info => {
            let info = ApiClient::anonymous(&config).get("/").await?;
            output_record(&output_format, &info)
        }
    }
}
