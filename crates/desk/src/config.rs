//! Environment-driven configuration for the desk binary.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `STAYSYNC_CATALOG_PATH` | path to a JSON catalog file | built-in seed catalog |
//! | `STAYSYNC_MEAL_RULE` | `nights`, `weekdays` | `nights` |
//! | `STAYSYNC_LOG_FORMAT` | `json`, `pretty` | `json` |
//! | `STAYSYNC_AUDIT` | `tracing`, `memory` | `tracing` |

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};

use staysync_catalog::{CatalogFile, InMemoryCatalog, ServiceType, seed_catalog};
use staysync_observability::LogFormat;
use staysync_pricing::{DayRule, DayRuleTable};

pub const CATALOG_PATH_VAR: &str = "STAYSYNC_CATALOG_PATH";
pub const MEAL_RULE_VAR: &str = "STAYSYNC_MEAL_RULE";
pub const LOG_FORMAT_VAR: &str = "STAYSYNC_LOG_FORMAT";
pub const AUDIT_VAR: &str = "STAYSYNC_AUDIT";

/// Where committed changes are mirrored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuditMode {
    /// Structured `tracing` events.
    #[default]
    Tracing,
    /// Kept in process; the binary prints the statements on exit.
    Memory,
}

impl FromStr for AuditMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tracing" | "log" => Ok(AuditMode::Tracing),
            "memory" => Ok(AuditMode::Memory),
            other => bail!("unknown audit mode `{other}` (expected `tracing` or `memory`)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub catalog_path: Option<PathBuf>,
    /// Day rule for `meal` services.
    pub meal_rule: DayRule,
    pub log_format: LogFormat,
    pub audit: AuditMode,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            meal_rule: DayRule::Nights,
            log_format: LogFormat::Json,
            audit: AuditMode::Tracing,
        }
    }
}

impl DeskConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            catalog_path: get(CATALOG_PATH_VAR).map(PathBuf::from),
            ..Self::default()
        };

        if let Some(raw) = get(MEAL_RULE_VAR) {
            let rule: DayRule = raw
                .parse()
                .with_context(|| format!("parsing {MEAL_RULE_VAR}"))?;
            if !matches!(rule, DayRule::Nights | DayRule::Weekdays) {
                bail!("{MEAL_RULE_VAR} must be `nights` or `weekdays`, got `{raw}`");
            }
            config.meal_rule = rule;
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .with_context(|| format!("parsing {LOG_FORMAT_VAR}"))?;
        }
        if let Some(raw) = get(AUDIT_VAR) {
            config.audit = raw.parse().with_context(|| format!("parsing {AUDIT_VAR}"))?;
        }
        Ok(config)
    }

    /// Default rule table with the configured meal rule.
    pub fn day_rules(&self) -> DayRuleTable {
        DayRuleTable::default().with_rule(ServiceType::Meal, self.meal_rule)
    }

    /// The configured catalog file, or the built-in one.
    pub fn load_catalog(&self) -> anyhow::Result<InMemoryCatalog> {
        let Some(path) = &self.catalog_path else {
            tracing::info!("{CATALOG_PATH_VAR} not set; using built-in catalog");
            return seed_catalog().context("building built-in catalog");
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog file {}", path.display()))?;
        let file = CatalogFile::from_json(&raw)
            .with_context(|| format!("parsing catalog file {}", path.display()))?;
        let catalog = InMemoryCatalog::from_file(file)
            .with_context(|| format!("validating catalog file {}", path.display()))?;
        tracing::info!(path = %path.display(), "catalog loaded");
        Ok(catalog)
    }
}
