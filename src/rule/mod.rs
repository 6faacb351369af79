//! Typed rule configurations.
//!
//! # Data Flow
//! ```text
//! server.rules (generic RuleNode list)
//!     → swapper.rs (tag dispatch, typed deserialization)
//!     → RuleSet (ordered rules + first-occurrence index per kind)
//!     → resolvers look rules up by kind
//! ```
//!
//! # Design Decisions
//! - Rule order is preserved; lookups are first-match
//! - The kind→index map is built once, so lookups never rescan the list

pub mod swapper;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::persist::MetadataPersistConfig;

pub use swapper::{swap_to_rule_configurations, SwapError};

/// Tag identifying the kind of a [`RuleConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Sharding,
    Encrypt,
    ReadwriteSplitting,
    MetadataPersist,
}

impl RuleKind {
    /// Parse a rule node tag. Matching ignores ASCII case and `-`/`_`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sharding" => Some(Self::Sharding),
            "encrypt" => Some(Self::Encrypt),
            "readwritesplitting" => Some(Self::ReadwriteSplitting),
            "metadatapersist" => Some(Self::MetadataPersist),
            _ => None,
        }
    }

    /// Canonical tag, as written in the sample configuration.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Sharding => "sharding",
            Self::Encrypt => "encrypt",
            Self::ReadwriteSplitting => "readwrite_splitting",
            Self::MetadataPersist => "metadata_persist",
        }
    }
}

/// Sharding rule: which logical tables are sharded and over which sources.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShardingRuleConfiguration {
    pub tables: Vec<String>,
    pub data_sources: Vec<String>,
    pub default_sharding_column: Option<String>,
}

/// Encryption rule: columns to encrypt and the encryptor used.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EncryptRuleConfiguration {
    pub columns: Vec<String>,
    pub encryptor: Option<String>,
    pub props: BTreeMap<String, String>,
}

/// Read/write splitting rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReadwriteSplittingRuleConfiguration {
    pub write_data_source: String,
    #[serde(default)]
    pub read_data_sources: Vec<String>,
}

/// Typed rule configuration, one variant per supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfiguration {
    Sharding(ShardingRuleConfiguration),
    Encrypt(EncryptRuleConfiguration),
    ReadwriteSplitting(ReadwriteSplittingRuleConfiguration),
    MetadataPersist(MetadataPersistConfig),
}

impl RuleConfiguration {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Sharding(_) => RuleKind::Sharding,
            Self::Encrypt(_) => RuleKind::Encrypt,
            Self::ReadwriteSplitting(_) => RuleKind::ReadwriteSplitting,
            Self::MetadataPersist(_) => RuleKind::MetadataPersist,
        }
    }
}

/// Ordered rule configurations with a first-occurrence index per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<RuleConfiguration>,
    first_by_kind: HashMap<RuleKind, usize>,
}

impl RuleSet {
    pub fn new(rules: Vec<RuleConfiguration>) -> Self {
        let mut first_by_kind = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            first_by_kind.entry(rule.kind()).or_insert(index);
        }
        Self {
            rules,
            first_by_kind,
        }
    }

    /// First rule of the given kind in declaration order.
    pub fn first(&self, kind: RuleKind) -> Option<&RuleConfiguration> {
        self.first_by_kind.get(&kind).map(|&index| &self.rules[index])
    }

    /// First metadata persistence rule, if any.
    pub fn metadata_persist(&self) -> Option<&MetadataPersistConfig> {
        match self.first(RuleKind::MetadataPersist) {
            Some(RuleConfiguration::MetadataPersist(config)) => Some(config),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleConfiguration> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<RuleConfiguration> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RuleConfiguration>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persist(kind: &str) -> RuleConfiguration {
        RuleConfiguration::MetadataPersist(MetadataPersistConfig {
            persist_type: kind.into(),
            overwrite: false,
            props: BTreeMap::new(),
        })
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(RuleKind::from_tag("sharding"), Some(RuleKind::Sharding));
        assert_eq!(
            RuleKind::from_tag("READWRITE-SPLITTING"),
            Some(RuleKind::ReadwriteSplitting)
        );
        assert_eq!(
            RuleKind::from_tag("metadata_persist"),
            Some(RuleKind::MetadataPersist)
        );
        assert_eq!(RuleKind::from_tag("shadow"), None);
    }

    #[test]
    fn test_tag_round_trips_through_from_tag() {
        for kind in [
            RuleKind::Sharding,
            RuleKind::Encrypt,
            RuleKind::ReadwriteSplitting,
            RuleKind::MetadataPersist,
        ] {
            assert_eq!(RuleKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_first_returns_earliest_of_kind() {
        let set: RuleSet = vec![
            RuleConfiguration::Sharding(ShardingRuleConfiguration::default()),
            persist("ZooKeeper"),
            persist("Etcd"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.metadata_persist().unwrap().persist_type, "ZooKeeper");
        assert!(set.first(RuleKind::Encrypt).is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = RuleSet::default();
        assert!(set.is_empty());
        assert!(set.metadata_persist().is_none());
    }
}
