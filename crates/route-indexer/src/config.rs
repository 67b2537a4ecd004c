use {
    crate::{chains::ChainInfo, deployments::DeploymentOverride},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::path::Path,
};

/// Optional TOML file extending the built-in chains and deployments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    #[serde(default)]
    pub chains: Vec<ChainInfo>,
    #[serde(default)]
    pub deployments: Vec<DeploymentOverride>,
}

impl Configuration {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("I/O error while reading {path:?}"))?;
        data.parse()
    }
}

impl std::str::FromStr for Configuration {
    type Err = anyhow::Error;

    fn from_str(data: &str) -> Result<Self> {
        toml::de::from_str(data).context("TOML syntax error in configuration")
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::deployments::ContractRole,
        alloy::primitives::address,
    };

    #[test]
    fn parses_chains_and_deployments() {
        let config: Configuration = r#"
            [[chains]]
            chain-id = 534352
            name = "Scroll"
            max-range-width = 2000
            native-currency-symbol = "ETH"

            [[chains]]
            chain-id = 137
            name = "Polygon"
            native-currency-symbol = "POL"

            [[deployments]]
            role = "spoke-pool"
            chain-id = 534352
            address = "0x3baD7AD0728f9917d1Bf08af5782dCbD516cDd96"
            start-block = 7489705
        "#
        .parse()
        .unwrap();

        assert_eq!(config.chains.len(), 2);
        assert_eq!(config.chains[0].max_range_width, Some(2000));
        assert_eq!(config.chains[1].max_range_width, None);
        assert_eq!(
            config.deployments,
            vec![DeploymentOverride {
                role: ContractRole::SpokePool,
                chain_id: 534352,
                address: address!("0x3baD7AD0728f9917d1Bf08af5782dCbD516cDd96"),
                start_block: 7489705,
            }]
        );
    }

    #[test]
    fn empty_file_is_valid() {
        assert_eq!("".parse::<Configuration>().unwrap(), Configuration::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = r#"
            [[deployments]]
            role = "hub-pool"
            chain-id = 1
            address = "0x0000000000000000000000000000000000000001"
            start-block = 1
            note = "typo"
        "#
        .parse::<Configuration>();
        assert!(result.is_err());
    }
}
