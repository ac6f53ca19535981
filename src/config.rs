//! Configuration loader — merges env vars, .env file, and config.toml.

use common::{Error, ServiceConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn validate_config(config: &ServiceConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.bind_addr.parse::<SocketAddr>().is_err() {
        issues.push(format!(
            "bind_addr must be a socket address like 0.0.0.0:8000 (got {:?})",
            config.bind_addr
        ));
    }
    if let Some(path) = &config.data_path {
        if path.as_os_str().is_empty() {
            issues.push("data_path must not be empty when set".into());
        }
    }
    if config.well_known_dir.as_os_str().is_empty() {
        issues.push("well_known_dir must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load service configuration from environment and optional config file.
///
/// An explicitly passed `config_path` must exist; the default `config.toml`
/// is only read when present.
pub fn load_config(config_path: Option<&Path>) -> Result<ServiceConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    load_config_with_env(config_path, |name| std::env::var(name).ok())
}

fn load_config_with_env(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServiceConfig, Error> {
    // 2. Start with defaults.
    let mut config = ServiceConfig::default();

    // 3. Read the TOML file if one applies.
    let file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };
    if let Some(path) = file {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        config = toml::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
    }

    // 4. Override with environment variables (highest priority).
    if let Some(port) = env("PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| Error::Config("PORT must be an integer in 0..=65535".into()))?;
        config.bind_addr = format!("0.0.0.0:{port}");
    }
    if let Some(addr) = env("ATLAS_BIND_ADDR") {
        config.bind_addr = addr.trim().to_string();
    }
    if let Some(path) = env("ATLAS_DATA_PATH") {
        let trimmed = path.trim();
        config.data_path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
    }
    if let Some(dir) = env("ATLAS_WELL_KNOWN_DIR") {
        config.well_known_dir = PathBuf::from(dir.trim());
    }
    if let Some(raw) = env("ATLAS_WRITE_OPENAPI") {
        config.write_openapi = parse_bool(&raw);
    }

    // 5. Validate.
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_file_values_are_read() {
        let file = config_file(
            r#"
bind_addr = "127.0.0.1:9000"
data_path = "data/weather.json"
write_openapi = false
"#,
        );
        let cfg = load_config_with_env(Some(file.path()), env_of(&[])).expect("valid config");
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.data_path, Some(PathBuf::from("data/weather.json")));
        assert!(!cfg.write_openapi);
        assert_eq!(cfg.well_known_dir, PathBuf::from(".well-known"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = config_file(r#"bind_addr = "127.0.0.1:9000""#);
        let cfg = load_config_with_env(
            Some(file.path()),
            env_of(&[
                ("ATLAS_BIND_ADDR", "127.0.0.1:7000"),
                ("ATLAS_WRITE_OPENAPI", "off"),
                ("ATLAS_WELL_KNOWN_DIR", "/srv/well-known"),
            ]),
        )
        .expect("valid config");
        assert_eq!(cfg.bind_addr, "127.0.0.1:7000");
        assert!(!cfg.write_openapi);
        assert_eq!(cfg.well_known_dir, PathBuf::from("/srv/well-known"));
    }

    #[test]
    fn test_port_sets_bind_addr() {
        let file = config_file("");
        let cfg = load_config_with_env(Some(file.path()), env_of(&[("PORT", "8080")]))
            .expect("valid config");
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_explicit_bind_addr_beats_port() {
        let file = config_file("");
        let cfg = load_config_with_env(
            Some(file.path()),
            env_of(&[("PORT", "8080"), ("ATLAS_BIND_ADDR", "127.0.0.1:9999")]),
        )
        .expect("valid config");
        assert_eq!(cfg.bind_addr, "127.0.0.1:9999");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let file = config_file("");
        let result = load_config_with_env(Some(file.path()), env_of(&[("PORT", "http")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_data_path_env_means_bundled() {
        let file = config_file(r#"data_path = "elsewhere.json""#);
        let cfg = load_config_with_env(Some(file.path()), env_of(&[("ATLAS_DATA_PATH", "  ")]))
            .expect("valid config");
        assert!(cfg.data_path.is_none());
    }

    #[test]
    fn test_bad_bind_addr_reported() {
        let file = config_file(r#"bind_addr = "localhost""#);
        let err = load_config_with_env(Some(file.path()), env_of(&[]))
            .expect_err("bind_addr without port is invalid");
        assert!(err.to_string().contains("bind_addr"), "{err}");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = load_config_with_env(
            Some(Path::new("/nonexistent/atlas.toml")),
            env_of(&[]),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let file = config_file("bind_addr = [");
        let result = load_config_with_env(Some(file.path()), env_of(&[]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(" Off "));
    }
}
