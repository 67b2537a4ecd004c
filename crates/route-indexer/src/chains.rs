use {
    contracts::alloy::networks,
    serde::Deserialize,
    std::collections::BTreeMap,
};

/// Static facts about a chain the indexer can talk to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    /// Widest block range a single `eth_getLogs` request may span on this
    /// chain's nodes. Unlimited if unset.
    #[serde(default)]
    pub max_range_width: Option<u64>,
    pub native_currency_symbol: String,
}

impl ChainInfo {
    fn new(chain_id: u64, name: &str, max_range_width: u64, native_currency_symbol: &str) -> Self {
        Self {
            chain_id,
            name: name.to_string(),
            max_range_width: Some(max_range_width),
            native_currency_symbol: native_currency_symbol.to_string(),
        }
    }
}

/// The set of supported chains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chains(BTreeMap<u64, ChainInfo>);

impl Chains {
    pub fn new(chains: impl IntoIterator<Item = ChainInfo>) -> Self {
        Self(
            chains
                .into_iter()
                .map(|chain| (chain.chain_id, chain))
                .collect(),
        )
    }

    /// Adds the given chains, replacing existing entries with the same id.
    pub fn with_overrides(mut self, chains: impl IntoIterator<Item = ChainInfo>) -> Self {
        for chain in chains {
            tracing::debug!(chain_id = chain.chain_id, name = %chain.name, "configured chain");
            self.0.insert(chain.chain_id, chain);
        }
        self
    }

    pub fn get(&self, chain_id: u64) -> Option<&ChainInfo> {
        self.0.get(&chain_id)
    }

    pub fn is_supported(&self, chain_id: u64) -> bool {
        self.0.contains_key(&chain_id)
    }
}

impl Default for Chains {
    fn default() -> Self {
        Self::new([
            ChainInfo::new(networks::MAINNET, "Ethereum", 10_000, "ETH"),
            ChainInfo::new(networks::OPTIMISM, "Optimism", 10_000, "ETH"),
            ChainInfo::new(networks::POLYGON, "Polygon", 10_000, "MATIC"),
            ChainInfo::new(networks::ZKSYNC, "zkSync", 10_000, "ETH"),
            ChainInfo::new(networks::BASE, "Base", 10_000, "ETH"),
            ChainInfo::new(networks::ARBITRUM_ONE, "Arbitrum", 100_000, "ETH"),
            ChainInfo::new(networks::LINEA, "Linea", 5_000, "ETH"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let chains = Chains::default();
        assert!(chains.is_supported(networks::POLYGON));
        assert!(!chains.is_supported(5));
        assert_eq!(chains.get(networks::POLYGON).unwrap().native_currency_symbol, "MATIC");
    }

    #[test]
    fn overrides_replace_and_extend() {
        let chains = Chains::default().with_overrides([
            ChainInfo {
                chain_id: networks::POLYGON,
                name: "Polygon".to_string(),
                max_range_width: None,
                native_currency_symbol: "POL".to_string(),
            },
            ChainInfo::new(534352, "Scroll", 1_000, "ETH"),
        ]);
        let polygon = chains.get(networks::POLYGON).unwrap();
        assert_eq!(polygon.native_currency_symbol, "POL");
        assert_eq!(polygon.max_range_width, None);
        assert_eq!(chains.get(534352).unwrap().max_range_width, Some(1_000));
        assert!(chains.is_supported(534352));
    }
}
