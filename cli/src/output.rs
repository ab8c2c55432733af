use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a value as indented JSON to a file, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(value).context("Failed to serialize output")?;
    json.push(b'\n');

    match path {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = json.len(), "wrote output");
        }
        None => {
            std::io::stdout()
                .write_all(&json)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to_file() {
        let path = std::env::temp_dir().join(format!("kairo-output-{}.json", std::process::id()));
        write_json(&json!({"ingredients": []}), Some(&path)).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"ingredients\": []\n}\n");
        let _ = fs::remove_file(&path);
    }
}
