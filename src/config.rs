use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Directory with tera templates overriding the built-in views
    #[serde(default)]
    pub template_dir: Option<String>,
}

/// Flight-delay reference table
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReferenceConfig {
    pub path: String,
    #[serde(default)]
    pub columns: ReferenceColumns,
    /// 0 disables hot reload
    pub reload_interval_secs: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: "fixtures/flight_delays.csv".to_string(),
            columns: ReferenceColumns::default(),
            reload_interval_secs: 60,
        }
    }
}

/// Header names of the reference export
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReferenceColumns {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub delay: String,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            flight_number: "Flt Desg".to_string(),
            origin: "Dept Arp".to_string(),
            destination: "Arvl Arp".to_string(),
            delay: "demora".to_string(),
        }
    }
}

/// Append-only order record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrdersConfig {
    pub path: String,
    pub sync_on_write: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            path: "data/spml_orders.csv".to_string(),
            sync_on_write: true,
        }
    }
}

/// Spreadsheet webhook egress
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            timeout_ms: 10_000,
        }
    }
}

/// Business rules for accepting an order
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RulesConfig {
    pub min_lead_hours: i64,
    /// Delay must be strictly greater than this
    pub min_delay_minutes: u64,
    /// Routes accepted regardless of delay, in either direction
    pub exception_routes: Vec<(String, String)>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_lead_hours: 24,
            min_delay_minutes: 210,
            exception_routes: vec![("SCL".to_string(), "IPC".to_string())],
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", config_path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "spml.log"
use_json: false
rotation: "daily"
gateway:
  host: "0.0.0.0"
  port: 3000
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.gateway.port, 3000);
        assert!(config.gateway.template_dir.is_none());
        assert_eq!(config.reference.columns.flight_number, "Flt Desg");
        assert_eq!(config.rules.min_lead_hours, 24);
        assert_eq!(config.rules.min_delay_minutes, 210);
        assert_eq!(
            config.rules.exception_routes,
            vec![("SCL".to_string(), "IPC".to_string())]
        );
        assert!(!config.webhook.enabled);
    }

    #[test]
    fn test_full_config_deserialize() {
        let yaml = r#"
log_level: "debug"
log_dir: "./logs"
log_file: "spml.log"
use_json: true
rotation: "never"
gateway:
  host: "127.0.0.1"
  port: 8080
  template_dir: "./views"
reference:
  path: "./ref.csv"
  reload_interval_secs: 0
  columns:
    flight_number: "flight"
    origin: "from"
    destination: "to"
    delay: "delay"
orders:
  path: "./orders.csv"
  sync_on_write: false
webhook:
  enabled: true
  url: "https://sheets.example.com/exec"
  timeout_ms: 2500
rules:
  min_lead_hours: 48
  min_delay_minutes: 180
  exception_routes:
    - ["SCL", "IPC"]
    - ["SCL", "PMC"]
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert!(config.use_json);
        assert_eq!(config.gateway.template_dir.as_deref(), Some("./views"));
        assert_eq!(config.reference.columns.delay, "delay");
        assert_eq!(config.reference.reload_interval_secs, 0);
        assert!(!config.orders.sync_on_write);
        assert_eq!(config.webhook.timeout_ms, 2500);
        assert_eq!(config.rules.exception_routes.len(), 2);
    }

    #[test]
    fn test_missing_gateway_is_error() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "spml.log"
use_json: false
rotation: "daily"
"#;
        assert!(AppConfig::from_yaml(yaml).is_err());
    }
}
