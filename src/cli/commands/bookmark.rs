use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::load_cli_config;
use crate::cli::utils::{output_bookmarks, output_record, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum BookmarkCommands {
    #[command(about = "List your bookmarks")]
    List,

    #[command(about = "Create a bookmark")]
    Add {
        #[arg(help = "Title")]
        title: String,
        #[arg(help = "Link")]
        link: String,
        #[arg(long, help = "Description")]
        description: Option<String>,
    },

    #[command(about = "Show a single bookmark")]
    Show {
        #[arg(help = "Bookmark ID")]
        id: i64,
    },

    #[command(about = "Change fields of a bookmark")]
    Edit {
        #[arg(help = "Bookmark ID")]
        id: i64,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New link")]
        link: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
    },

    #[command(about = "Delete a bookmark")]
    Delete {
        #[arg(help = "Bookmark ID")]
        id: i64,
    },
}

pub async fn handle(cmd: BookmarkCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_cli_config()?;
    let client = ApiClient::authenticated(&config)?;

    match cmd {
        BookmarkCommands::List => {
            let bookmarks = client.get("/bookmarks").await?;
            output_bookmarks(&output_format, &bookmarks)
        }
        BookmarkCommands::Add { title, link, description } => {
            let mut body = json!({ "title": title, "link": link });
            if let Some(description) = description {
                body["description"] = Value::String(description);
            }
            let bookmark = client.post("/bookmarks", &body).await?;
            output_record(&output_format, &bookmark)
        }
        BookmarkCommands::Show { id } => {
            let bookmark = client.get(&format!("/bookmarks/{}", id)).await?;
            output_record(&output_format, &bookmark)
        }
        BookmarkCommands::Edit { id, title, link, description } => {
            let body = edit_body(title, link, description);
            if body.is_empty() {
                return Err(anyhow::anyhow!("Nothing to change: pass --title, --link or --description"));
            }
            let bookmark = client
                .patch(&format!("/bookmarks/{}", id), &Value::Object(body))
                .await?;
            output_record(&output_format, &bookmark)
        }
        BookmarkCommands::Delete { id } => {
            client.delete(&format!("/bookmarks/{}", id)).await?;
            output_success(
                &output_format,
                &format!("Bookmark {} deleted", id),
                Some(json!({ "id": id })),
            )
        }
    }
}

fn edit_body(title: Option<String>, link: Option<String>, description: Option<String>) -> Map<String, Value> {
    [("title", title), ("link", link), ("description", description)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), Value::String(v))))
        .collect()
}
