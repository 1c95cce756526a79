use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const CONFIG_FILE_NAME: &str = "lumen.toml";
pub const CONFIG_ENV: &str = "LUMEN_CONFIG";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default catalog file, resolved against the config file's directory.
    pub catalog: Option<PathBuf>,
    /// Default bundled catalog when no file is configured.
    pub bundled: Option<String>,
    pub lookup: LookupPolicy,
}

/// Which lookup annotations make the `lookup` command fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookupPolicy {
    pub fail_on_extrapolation: bool,
    pub fail_on_approximation: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    schema_version: Option<u32>,
    catalog: Option<PathBuf>,
    bundled: Option<String>,
    #[serde(default)]
    lookup: Option<RawLookupPolicy>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
struct RawLookupPolicy {
    fail_on_extrapolation: Option<bool>,
    fail_on_approximation: Option<bool>,
}

impl CliConfig {
    /// Explicit path first, then `$LUMEN_CONFIG`, then `lumen.toml` in the working directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        if let Some(catalog) = config.catalog.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.catalog = Some(base.join(catalog));
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != CONFIG_SCHEMA_VERSION {
                return Err(anyhow!(
                    "schema_version {schema_version} is not supported (expected {CONFIG_SCHEMA_VERSION})"
                ));
            }
        }
        if let Some(name) = raw.bundled.as_deref() {
            if !lumen_catalog::BUNDLED_CATALOGS.contains(&name) {
                return Err(anyhow!(
                    "bundled catalog '{name}' is not one of: {}",
                    lumen_catalog::BUNDLED_CATALOGS.join(", ")
                ));
            }
        }

        let lookup = raw.lookup.unwrap_or_default();
        Ok(Self {
            catalog: raw.catalog,
            bundled: raw.bundled,
            lookup: LookupPolicy {
                fail_on_extrapolation: lookup.fail_on_extrapolation.unwrap_or(false),
                fail_on_approximation: lookup.fail_on_approximation.unwrap_or(false),
            },
        })
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };

    validate_config_value(&value)?;
    serde_json::from_value(value).map_err(|err| anyhow!("Config parse error: {err}"))
}

fn validate_config_value(value: &serde_json::Value) -> Result<()> {
    fn validate_object_keys(
        unknown: &mut Vec<String>,
        obj: &serde_json::Map<String, serde_json::Value>,
        base: &str,
        allowed: &[&str],
    ) {
        for key in obj.keys() {
            if !allowed.iter().any(|a| a == &key.as_str()) {
                if base.is_empty() {
                    unknown.push(key.clone());
                } else {
                    unknown.push(format!("{base}.{key}"));
                }
            }
        }
    }

    let serde_json::Value::Object(root) = value else {
        return Err(anyhow!("Config must be an object"));
    };

    let mut unknown = Vec::new();
    validate_object_keys(
        &mut unknown,
        root,
        "",
        &["schema_version", "catalog", "bundled", "lookup"],
    );
    if let Some(serde_json::Value::Object(lookup)) = root.get("lookup") {
        validate_object_keys(
            &mut unknown,
            lookup,
            "lookup",
            &["fail_on_extrapolation", "fail_on_approximation"],
        );
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Config has unknown fields: {}", unknown.join(", ")))
    }
}
