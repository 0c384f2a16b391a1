use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use satchel_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let file = config_file_path.as_deref();

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        field_source("server.bind_address", &["SATCHEL_SERVER_BIND_ADDRESS"], doc, file),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        field_source("server.port", &["SATCHEL_SERVER_PORT"], doc, file),
    ));
    lines.push(render_line(
        "server.graceful_shutdown_secs",
        &config.server.graceful_shutdown_secs.to_string(),
        field_source(
            "server.graceful_shutdown_secs",
            &["SATCHEL_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            doc,
            file,
        ),
    ));
    lines.push(render_line(
        "storage.data_dir",
        &config.storage.data_dir.display().to_string(),
        field_source("storage.data_dir", &["SATCHEL_STORAGE_DATA_DIR"], doc, file),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", &["SATCHEL_LOGGING_LEVEL", "SATCHEL_LOG_LEVEL"], doc, file),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source(
            "logging.format",
            &["SATCHEL_LOGGING_FORMAT", "SATCHEL_LOG_FORMAT"],
            doc,
            file,
        ),
    ));

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value}  ({source})")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("satchel.toml"), PathBuf::from("config/satchel.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

/// Attribute a field to the highest-precedence source that sets it.
fn field_source(
    dotted_key: &str,
    env_vars: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for var in env_vars {
        if env::var(var).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return format!("env {var}");
        }
    }

    if let (Some(doc), Some(path)) = (config_file_doc, config_file_path) {
        let mut node = doc;
        let mut found = true;
        for part in dotted_key.split('.') {
            match node.get(part) {
                Some(next) => node = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            return format!("file {}", path.display());
        }
    }

    "default".to_string()
}
