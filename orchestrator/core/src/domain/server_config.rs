// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Server Configuration Types
//
// Defines the configuration schema for a codementor server, including:
// - Kubernetes-style manifest format (apiVersion/kind/spec)
// - HTTP listener and static frontend settings
// - Code analysis endpoint, model and timeout
// - Question routing fallback
// - Seed accounts and rosters loaded at startup

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::identity::RoleKind;

pub const API_VERSION: &str = "codementor/v1";
pub const KIND: &str = "ServerConfig";
pub const CONFIG_PATH_ENV: &str = "CODEMENTOR_CONFIG_PATH";

/// Top-level server configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API version (must be "codementor/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ServerConfig")
    pub kind: String,

    #[serde(default)]
    pub spec: ServerConfigSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfigSpec {
    #[serde(default)]
    pub server: HttpConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for paths no API route matches; `null` disables it
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Full URL the analysis request is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name placed in the request payload
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound for a single analysis call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Instructor receiving questions from students that belong to no roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_instructor: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,

    #[serde(default)]
    pub rosters: Vec<SeedRoster>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    pub id: u64,
    pub role: RoleKind,
    pub name: String,
    pub email: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRoster {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub owner: u64,
    #[serde(default)]
    pub members: Vec<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("frontend"))
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "codellama".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SeedConfig {
    /// Demo classroom: one student, one instructor, one roster.
    pub fn demo() -> Self {
        Self {
            accounts: vec![
                SeedAccount {
                    id: 1,
                    role: RoleKind::Student,
                    name: "João".to_string(),
                    email: "j".to_string(),
                    secret: "123".to_string(),
                },
                SeedAccount {
                    id: 2,
                    role: RoleKind::Instructor,
                    name: "Maria".to_string(),
                    email: "m".to_string(),
                    secret: "456".to_string(),
                },
            ],
            rosters: vec![SeedRoster {
                id: 1,
                name: "Turma 1".to_string(),
                owner: 2,
                members: vec![],
            }],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            spec: ServerConfigSpec {
                server: HttpConfig::default(),
                analysis: AnalysisConfig::default(),
                routing: RoutingConfig {
                    fallback_instructor: Some(2),
                },
                seed: SeedConfig::demo(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. CODEMENTOR_CONFIG_PATH environment variable
    /// 2. ./codementor.yaml (working directory)
    /// 3. ~/.codementor/config.yaml (user home)
    /// 4. /etc/codementor/config.yaml (Unix only)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./codementor.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".codementor").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/codementor/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // 1. Explicit CLI path (Fail if missing/invalid)
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        // 2. Discovery (Env -> Cwd -> Home -> System)
        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using demo defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("CODEMENTOR_ANALYSIS_ENDPOINT") {
            tracing::info!("Environment override: CODEMENTOR_ANALYSIS_ENDPOINT={}", endpoint);
            self.spec.analysis.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("CODEMENTOR_ANALYSIS_MODEL") {
            tracing::info!("Environment override: CODEMENTOR_ANALYSIS_MODEL={}", model);
            self.spec.analysis.model = model;
        }

        if let Ok(val) = std::env::var("CODEMENTOR_ANALYSIS_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => {
                    tracing::info!("Environment override: CODEMENTOR_ANALYSIS_TIMEOUT_SECS={}", secs);
                    self.spec.analysis.timeout_secs = secs;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for CODEMENTOR_ANALYSIS_TIMEOUT_SECS: '{}'. Expected seconds. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.spec.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }

        let analysis = &self.spec.analysis;
        if !(analysis.endpoint.starts_with("http://") || analysis.endpoint.starts_with("https://")) {
            anyhow::bail!(
                "analysis.endpoint must be an http(s) URL, got '{}'",
                analysis.endpoint
            );
        }

        if analysis.timeout_secs == 0 {
            anyhow::bail!("analysis.timeout_secs must be greater than zero");
        }

        self.validate_seed()
    }

    fn validate_seed(&self) -> anyhow::Result<()> {
        let seed = &self.spec.seed;
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();

        for account in &seed.accounts {
            if !ids.insert(account.id) {
                anyhow::bail!("Duplicate seed account id: {}", account.id);
            }
            if !emails.insert(account.email.as_str()) {
                anyhow::bail!("Duplicate seed account email: '{}'", account.email);
            }
        }

        let role_of = |id: u64| {
            seed.accounts
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.role)
        };

        let mut roster_ids = HashSet::new();
        for roster in &seed.rosters {
            if !roster_ids.insert(roster.id) {
                anyhow::bail!("Duplicate seed roster id: {}", roster.id);
            }
            if role_of(roster.owner) != Some(RoleKind::Instructor) {
                anyhow::bail!(
                    "Roster {} owner {} is not a seeded instructor",
                    roster.id,
                    roster.owner
                );
            }
            for member in &roster.members {
                if role_of(*member) != Some(RoleKind::Student) {
                    anyhow::bail!(
                        "Roster {} member {} is not a seeded student",
                        roster.id,
                        member
                    );
                }
            }
        }

        if let Some(fallback) = self.spec.routing.fallback_instructor {
            if role_of(fallback) != Some(RoleKind::Instructor) {
                anyhow::bail!("Fallback instructor {} is not a seeded instructor", fallback);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.api_version, API_VERSION);
        assert_eq!(config.spec.server.port, 3000);
        assert_eq!(config.spec.analysis.timeout(), Duration::from_secs(120));
        assert_eq!(config.spec.seed.accounts.len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
apiVersion: codementor/v1
kind: ServerConfig
spec:
  analysis:
    endpoint: http://analysis.local:11434/api/generate
"#;
        let config = ServerConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.spec.analysis.endpoint, "http://analysis.local:11434/api/generate");
        assert_eq!(config.spec.analysis.model, "codellama");
        assert_eq!(config.spec.server.host, "0.0.0.0");
        assert!(config.spec.seed.accounts.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_seed() {
        let yaml = r#"
apiVersion: codementor/v1
kind: ServerConfig
spec:
  seed:
    accounts:
      - { id: 1, role: student, name: A, email: a, secret: x }
      - { id: 2, role: student, name: B, email: b, secret: y }
    rosters:
      - { id: 1, owner: 2 }
"#;
        let config = ServerConfig::from_yaml_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not a seeded instructor"));
    }

    #[test]
    fn test_validate_rejects_duplicate_email() {
        let mut config = ServerConfig::default();
        config.spec.seed.accounts[1].email = "j".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let mut config = ServerConfig::default();
        config.kind = "NodeConfig".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_section_keeps_static_dir_default() {
        let yaml = r#"
apiVersion: codementor/v1
kind: ServerConfig
spec:
  server:
    port: 8080
"#;
        let config = ServerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.spec.server.port, 8080);
        assert_eq!(config.spec.server.static_dir, Some(PathBuf::from("frontend")));

        let disabled = r#"
apiVersion: codementor/v1
kind: ServerConfig
spec:
  server:
    static_dir: null
"#;
        let config = ServerConfig::from_yaml_str(disabled).unwrap();
        assert_eq!(config.spec.server.static_dir, None);
    }
}
