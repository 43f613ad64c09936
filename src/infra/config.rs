use serde::Deserialize;

/// Resolved process configuration. Defaults are overlaid by an optional TOML
/// file (path in `GATEWAY_CONFIG`), then by environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub backend: BackendConfig,
    pub shutdown_grace_ms: u64,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub retries: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: None, connect_timeout_ms: 2_000, request_timeout_ms: 6_000, retries: 2 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: "server".into(),
            port: 8080,
            backend: BackendConfig::default(),
            shutdown_grace_ms: 200,
        }
    }
}

// Raw TOML shape; every field optional so partial files are fine.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    backend: FileBackend,
    #[serde(default)]
    shutdown: FileShutdown,
}

#[derive(Debug, Default, Deserialize)]
struct FileBackend {
    base_url: Option<String>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct FileShutdown {
    grace_ms: Option<u64>,
}

impl Config {
    /// Environment-only resolution, for callers that never read a file.
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        cfg.apply_env();
        cfg
    }

    pub fn from_env_and_toml() -> Self {
        let mut cfg = Config::default();
        if let Ok(path) = std::env::var("GATEWAY_CONFIG") {
            match std::fs::read_to_string(&path) {
                Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                    Ok(file) => cfg.apply_file(file),
                    Err(e) => tracing::warn!(path = %path, error = %e, "ignoring malformed config file"),
                },
                Err(e) => tracing::warn!(path = %path, error = %e, "config file not readable"),
            }
        }
        cfg.apply_env();
        cfg
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(mode) = file.mode {
            self.mode = mode;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(url) = file.backend.base_url {
            self.backend.base_url = Some(url);
        }
        if let Some(v) = file.backend.connect_timeout_ms {
            self.backend.connect_timeout_ms = v;
        }
        if let Some(v) = file.backend.request_timeout_ms {
            self.backend.request_timeout_ms = v;
        }
        if let Some(v) = file.backend.retries {
            self.backend.retries = v;
        }
        if let Some(v) = file.shutdown.grace_ms {
            self.shutdown_grace_ms = v;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(mode) = std::env::var("MODE") {
            self.mode = mode;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Ok(url) = std::env::var("AUTOMATON_BASE_URL") {
            if !url.trim().is_empty() {
                self.backend.base_url = Some(url);
            }
        }
        if let Some(v) = std::env::var("AUTOMATON_RETRIES").ok().and_then(|s| s.parse().ok()) {
            self.backend.retries = v;
        }
        if let Some(v) = std::env::var("SHUTDOWN_GRACE_MS").ok().and_then(|s| s.parse().ok()) {
            self.shutdown_grace_ms = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use serial_test::serial;

    fn clear_env() {
        for k in [
            "MODE",
            "PORT",
            "AUTOMATON_BASE_URL",
            "AUTOMATON_RETRIES",
            "SHUTDOWN_GRACE_MS",
            "GATEWAY_CONFIG",
        ] {
            std::env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn defaults_to_server_8080() {
        clear_env();
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "server");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.backend.base_url.is_none());
        assert_eq!(cfg.shutdown_grace_ms, 200);
    }

    #[test]
    #[serial]
    fn parses_env_overrides() {
        clear_env();
        std::env::set_var("MODE", "stdio");
        std::env::set_var("PORT", "9090");
        std::env::set_var("AUTOMATON_BASE_URL", "http://localhost:7777");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "stdio");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.backend.base_url.as_deref(), Some("http://localhost:7777"));
        clear_env();
    }

    #[test]
    #[serial]
    fn toml_layer_applies_under_env() {
        clear_env();
        let dir = std::env::temp_dir().join("automaton-gateway-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gateway.toml");
        std::fs::write(
            &path,
            r#"
mode = "stdio"
port = 9000

[backend]
base_url = "http://filehost:1234"
retries = 5

[shutdown]
grace_ms = 50
"#,
        )
        .unwrap();
        std::env::set_var("GATEWAY_CONFIG", &path);
        std::env::set_var("PORT", "9191"); // env wins over file

        let cfg = Config::from_env_and_toml();
        assert_eq!(cfg.mode, "stdio");
        assert_eq!(cfg.port, 9191);
        assert_eq!(cfg.backend.base_url.as_deref(), Some("http://filehost:1234"));
        assert_eq!(cfg.backend.retries, 5);
        assert_eq!(cfg.shutdown_grace_ms, 50);
        clear_env();
    }

    #[test]
    #[serial]
    fn malformed_file_is_ignored() {
        clear_env();
        let dir = std::env::temp_dir().join("automaton-gateway-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        std::env::set_var("GATEWAY_CONFIG", &path);
        let cfg = Config::from_env_and_toml();
        assert_eq!(cfg.port, 8080);
        clear_env();
    }
}
