//! Conversion of the raw governance section into [`GovernanceConfig`].
//!
//! Two shapes are accepted:
//!
//! ```toml
//! [server.governance]
//! name = "governance_ds"
//! overwrite = false
//! [server.governance.registry_center]
//! type = "ZooKeeper"
//! server_lists = "localhost:2181"
//! ```
//!
//! and the flat shorthand `namespace` / `servers` / `type` / `props`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::governance::{GovernanceConfig, RegistryCenterConfig, DEFAULT_REGISTRY_TYPE};

/// The governance section does not have the expected structure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigShapeError {
    #[error("governance.{0} is required")]
    MissingField(&'static str),

    #[error("governance.{field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("governance.{0} must not be empty")]
    Empty(&'static str),
}

/// Convert a raw governance section.
pub fn resolve_governance_config(raw: &toml::Table) -> Result<GovernanceConfig, ConfigShapeError> {
    let registry = match raw.get("registry_center") {
        Some(toml::Value::Table(table)) => Some(table),
        Some(_) => {
            return Err(ConfigShapeError::WrongType {
                field: "registry_center".into(),
                expected: "a table",
            })
        }
        None => None,
    };

    let name = match string_field(raw, "name", "name")? {
        Some(name) => Some(name),
        None => string_field(raw, "namespace", "namespace")?,
    }
    .ok_or(ConfigShapeError::MissingField("name"))?;
    if name.trim().is_empty() {
        return Err(ConfigShapeError::Empty("name"));
    }

    let server_lists = match registry {
        Some(table) => string_field(table, "server_lists", "registry_center.server_lists")?,
        None => string_field(raw, "servers", "servers")?,
    }
    .ok_or(ConfigShapeError::MissingField("registry_center.server_lists"))?;
    if server_lists.trim().is_empty() {
        return Err(ConfigShapeError::Empty("registry_center.server_lists"));
    }

    let registry_type = match registry {
        Some(table) => string_field(table, "type", "registry_center.type")?,
        None => string_field(raw, "type", "type")?,
    }
    .unwrap_or_else(|| DEFAULT_REGISTRY_TYPE.to_string());

    let props = match registry {
        Some(table) => props_field(table, "registry_center.props")?,
        None => props_field(raw, "props")?,
    };

    let overwrite = match raw.get("overwrite") {
        Some(toml::Value::Boolean(flag)) => *flag,
        Some(_) => {
            return Err(ConfigShapeError::WrongType {
                field: "overwrite".into(),
                expected: "a boolean",
            })
        }
        None => false,
    };

    Ok(GovernanceConfig {
        name,
        registry_center: RegistryCenterConfig {
            registry_type,
            server_lists,
            props,
        },
        overwrite,
    })
}

fn string_field(
    table: &toml::Table,
    key: &str,
    path: &str,
) -> Result<Option<String>, ConfigShapeError> {
    match table.get(key) {
        Some(toml::Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ConfigShapeError::WrongType {
            field: path.to_string(),
            expected: "a string",
        }),
        None => Ok(None),
    }
}

fn props_field(
    table: &toml::Table,
    path: &str,
) -> Result<BTreeMap<String, String>, ConfigShapeError> {
    let props = match table.get("props") {
        Some(toml::Value::Table(props)) => props,
        Some(_) => {
            return Err(ConfigShapeError::WrongType {
                field: path.to_string(),
                expected: "a table",
            })
        }
        None => return Ok(BTreeMap::new()),
    };

    props
        .iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                _ => {
                    return Err(ConfigShapeError::WrongType {
                        field: format!("{path}.{key}"),
                        expected: "a scalar",
                    })
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}
