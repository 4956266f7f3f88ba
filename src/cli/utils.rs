use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::path::Path;

use crate::cli::OutputFormat;

/// Print any serializable value in the selected format
pub fn output_value<T: Serialize>(output_format: &OutputFormat, value: &T) -> anyhow::Result<()> {
    let rendered = match output_format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    println!("{}", rendered);
    Ok(())
}

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

            println!("{}", serde_json::to_string(&response)?);
        }
        OutputFormat::Pretty => {
            println!("✓ {}", message);
            if let Some(Value::Object(extra)) = data {
                for (key, value) in extra {
                    match value {
                        Value::String(s) => println!("  {}: {}", key, s),
                        other => println!("  {}: {}", key, other),
                    }
                }
            }
        }
    }
    Ok(())
}

/// Read a JSON event from a file, or from stdin when the path is `-`
pub fn read_event<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read event {}: {}", path.display(), e))?
    };
    serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("invalid event {}: {}", path.display(), e))
}
