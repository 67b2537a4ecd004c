use {
    alloy::primitives::Address,
    anyhow::{Result, anyhow},
    contracts::alloy::{Deployment, HubPool, SpokePool},
    serde::Deserialize,
    std::collections::HashMap,
    strum::{Display, EnumIter, IntoEnumIterator},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractRole {
    HubPool,
    SpokePool,
}

/// Where the bridge contracts are deployed.
#[cfg_attr(test, mockall::automock)]
pub trait Deployments: Send + Sync {
    fn address(&self, role: ContractRole, chain_id: u64) -> Result<Address>;

    /// First block that can contain events of the contract.
    fn start_block(&self, role: ContractRole, chain_id: u64) -> Result<u64>;
}

/// A deployment entry of the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeploymentOverride {
    pub role: ContractRole,
    pub chain_id: u64,
    pub address: Address,
    pub start_block: u64,
}

/// In-memory deployment registry, seeded with the known production
/// deployments.
#[derive(Clone, Debug)]
pub struct Registry(HashMap<(ContractRole, u64), Deployment>);

impl Registry {
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = DeploymentOverride>,
    ) -> Self {
        for entry in overrides {
            tracing::debug!(?entry, "configured deployment");
            self.0.insert(
                (entry.role, entry.chain_id),
                Deployment {
                    address: entry.address,
                    block: entry.start_block,
                },
            );
        }
        self
    }

    fn deployment(&self, role: ContractRole, chain_id: u64) -> Result<Deployment> {
        self.0
            .get(&(role, chain_id))
            .copied()
            .ok_or_else(|| anyhow!("no {role} deployment known on chain {chain_id}"))
    }
}

impl Default for Registry {
    fn default() -> Self {
        let known = ContractRole::iter().flat_map(|role| {
            let info = match role {
                ContractRole::HubPool => &*HubPool::DEPLOYMENT_INFO,
                ContractRole::SpokePool => &*SpokePool::DEPLOYMENT_INFO,
            };
            info.iter()
                .map(move |(chain_id, deployment)| ((role, *chain_id), *deployment))
        });
        Self(known.collect())
    }
}

impl Deployments for Registry {
    fn address(&self, role: ContractRole, chain_id: u64) -> Result<Address> {
        Ok(self.deployment(role, chain_id)?.address)
    }

    fn start_block(&self, role: ContractRole, chain_id: u64) -> Result<u64> {
        Ok(self.deployment(role, chain_id)?.block)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, contracts::alloy::networks};

    #[test]
    fn knows_production_deployments() {
        let registry = Registry::default();
        assert_eq!(
            registry.address(ContractRole::HubPool, networks::MAINNET).unwrap(),
            HubPool::deployment(networks::MAINNET).unwrap().address
        );
        assert!(registry.start_block(ContractRole::SpokePool, networks::BASE).is_ok());
        assert!(registry.address(ContractRole::HubPool, networks::BASE).is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let registry = Registry::default().with_overrides([DeploymentOverride {
            role: ContractRole::SpokePool,
            chain_id: networks::BASE,
            address: Address::with_last_byte(1),
            start_block: 42,
        }]);
        assert_eq!(
            registry.address(ContractRole::SpokePool, networks::BASE).unwrap(),
            Address::with_last_byte(1)
        );
        assert_eq!(
            registry.start_block(ContractRole::SpokePool, networks::BASE).unwrap(),
            42
        );
    }

    #[test]
    fn unknown_deployment_names_role_and_chain() {
        let err = Registry::default()
            .start_block(ContractRole::SpokePool, 5)
            .unwrap_err();
        assert_eq!(err.to_string(), "no SpokePool deployment known on chain 5");
    }
}
