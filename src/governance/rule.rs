//! Governance rule handed to the cluster-mode initializer.

use uuid::Uuid;

use crate::governance::{GovernanceConfig, GovernanceError};

/// A coordination service endpoint parsed from `server_lists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    pub host: String,
    pub port: u16,
}

impl std::fmt::Display for RegistryEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Governance rule for one proxy instance.
#[derive(Debug, Clone)]
pub struct GovernanceRule {
    config: GovernanceConfig,
    endpoints: Vec<RegistryEndpoint>,
    instance_id: Uuid,
}

impl GovernanceRule {
    /// Build the rule, parsing the registry center server list.
    pub fn new(config: GovernanceConfig) -> Result<Self, GovernanceError> {
        let endpoints = parse_server_lists(&config.registry_center.server_lists)?;
        Ok(Self {
            config,
            endpoints,
            instance_id: Uuid::new_v4(),
        })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &[RegistryEndpoint] {
        &self.endpoints
    }

    /// Identifier this instance registers under in the cluster.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

fn parse_server_lists(server_lists: &str) -> Result<Vec<RegistryEndpoint>, GovernanceError> {
    server_lists
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || GovernanceError::InvalidServerList(entry.to_string());
            let (host, port) = entry.rsplit_once(':').ok_or_else(invalid)?;
            if host.is_empty() {
                return Err(invalid());
            }
            let port = port.parse::<u16>().map_err(|_| invalid())?;
            Ok(RegistryEndpoint {
                host: host.to_string(),
                port,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::RegistryCenterConfig;
    use std::collections::BTreeMap;

    fn config(servers: &str) -> GovernanceConfig {
        GovernanceConfig {
            name: "/gov".into(),
            registry_center: RegistryCenterConfig {
                registry_type: "ZooKeeper".into(),
                server_lists: servers.into(),
                props: BTreeMap::new(),
            },
            overwrite: false,
        }
    }

    #[test]
    fn test_parses_endpoints() {
        let rule = GovernanceRule::new(config("zk-0:2181, zk-1:2182,")).unwrap();
        let endpoints: Vec<_> = rule.endpoints().iter().map(ToString::to_string).collect();
        assert_eq!(endpoints, ["zk-0:2181", "zk-1:2182"]);
        assert_eq!(rule.config().name, "/gov");
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        for servers in ["zk-0", "zk-0:port", ":2181"] {
            let err = GovernanceRule::new(config(servers)).unwrap_err();
            assert!(matches!(err, GovernanceError::InvalidServerList(_)), "{servers}");
        }
    }

    #[test]
    fn test_instance_ids_differ() {
        let a = GovernanceRule::new(config("zk:2181")).unwrap();
        let b = GovernanceRule::new(config("zk:2181")).unwrap();
        assert_ne!(a.instance_id(), b.instance_id());
    }
}
