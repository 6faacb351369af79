//! Conversion of generic rule nodes into typed rule configurations.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::RuleNode;
use crate::persist::MetadataPersistConfig;
use crate::rule::{RuleConfiguration, RuleKind, RuleSet};

/// Error converting a rule node.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("server.rules[{index}]: unsupported rule type '{kind}'")]
    UnsupportedKind { index: usize, kind: String },

    #[error("server.rules[{index}] ({kind}): {source}")]
    Malformed {
        index: usize,
        kind: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Convert rule nodes, preserving declaration order.
pub fn swap_to_rule_configurations(nodes: &[RuleNode]) -> Result<RuleSet, SwapError> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| swap_node(index, node))
        .collect::<Result<Vec<_>, _>>()
        .map(RuleSet::new)
}

fn swap_node(index: usize, node: &RuleNode) -> Result<RuleConfiguration, SwapError> {
    let kind = RuleKind::from_tag(&node.kind).ok_or_else(|| SwapError::UnsupportedKind {
        index,
        kind: node.kind.clone(),
    })?;

    let rule = match kind {
        RuleKind::Sharding => RuleConfiguration::Sharding(decode(index, node)?),
        RuleKind::Encrypt => RuleConfiguration::Encrypt(decode(index, node)?),
        RuleKind::ReadwriteSplitting => {
            RuleConfiguration::ReadwriteSplitting(decode(index, node)?)
        }
        RuleKind::MetadataPersist => {
            RuleConfiguration::MetadataPersist(decode::<MetadataPersistConfig>(index, node)?)
        }
    };

    Ok(rule)
}

fn decode<T: DeserializeOwned>(index: usize, node: &RuleNode) -> Result<T, SwapError> {
    toml::Value::Table(node.body.clone())
        .try_into()
        .map_err(|source| SwapError::Malformed {
            index,
            kind: node.kind.clone(),
            source,
        })
}
