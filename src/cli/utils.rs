use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a single record: pretty JSON, or `key: value` lines
pub fn output_record(output_format: &OutputFormat, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => {
            if let Value::Object(fields) = record {
                for (key, value) in fields {
                    println!("{:<12} {}", format!("{}:", key), display_value(value));
                }
            }
        }
    }
    Ok(())
}

/// Output a list of bookmarks, one per line in text mode
pub fn output_bookmarks(output_format: &OutputFormat, bookmarks: &Value) -> anyhow::Result<()> {
    let items = bookmarks.as_array().map(Vec::as_slice).unwrap_or_default();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(bookmarks)?),
        OutputFormat::Text if items.is_empty() => println!("No bookmarks"),
        OutputFormat::Text => {
            for item in items {
                println!(
                    "{:>6}  {}  {}",
                    display_value(&item["id"]),
                    display_value(&item["title"]),
                    display_value(&item["link"]),
                );
            }
        }
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prompt on stderr and read one line from stdin
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    use std::io::{BufRead, Write};

    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Use the given password, or prompt for one
pub fn resolve_password(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt_line("Password: "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_value_renders_scalars_plainly() {
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(7)), "7");
        assert_eq!(display_value(&Value::Null), "-");
    }
}
