use {
    crate::routes::MissingL1Token,
    alloy::primitives::Address,
    anyhow::{Context, anyhow},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        str::FromStr,
    },
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    /// Chain the hub pool is deployed on.
    #[clap(long, env, default_value = "1")]
    pub hub_chain_id: u64,

    /// Address of the hub pool. Defaults to the known deployment on the hub
    /// chain.
    #[clap(long, env)]
    pub hub_pool_address: Option<Address>,

    /// Node to use for a chain, formatted as `CHAIN_ID=URL`. Every chain that
    /// has a spoke pool needs one.
    #[clap(long, env, use_value_delimiter = true, required = true)]
    pub node_url: Vec<NodeUrl>,

    /// TOML file with additional chains and deployments.
    #[clap(long, env)]
    pub config: Option<PathBuf>,

    /// How to handle spoke tokens the hub pool maps to no l1 token.
    #[clap(long, env, value_enum, default_value = "pass-through")]
    pub missing_l1_token: MissingL1Token,

    #[clap(long, env, default_value = "warn,route_indexer=info")]
    pub log_filter: String,

    #[clap(long, env)]
    pub use_json_logs: bool,

    /// Where to write the route configuration. Prints to stdout if unset.
    #[clap(long, env)]
    pub output: Option<PathBuf>,
}

/// A chain id together with the JSON RPC endpoint serving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeUrl {
    pub chain_id: u64,
    pub url: Url,
}

impl FromStr for NodeUrl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chain_id, url) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected CHAIN_ID=URL but got {s:?}"))?;
        Ok(Self {
            chain_id: chain_id
                .trim()
                .parse()
                .with_context(|| format!("invalid chain id {chain_id:?}"))?,
            url: url.trim().parse().context("invalid node url")?,
        })
    }
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            hub_chain_id,
            hub_pool_address,
            node_url,
            config,
            missing_l1_token,
            log_filter,
            use_json_logs,
            output,
        } = self;

        writeln!(f, "hub_chain_id: {hub_chain_id}")?;
        display_option(f, "hub_pool_address", hub_pool_address)?;
        // Node urls often embed api keys.
        writeln!(
            f,
            "node_url: {:?}",
            node_url
                .iter()
                .map(|node| format!("{}=SECRET", node.chain_id))
                .collect::<Vec<_>>()
        )?;
        display_option(f, "config", &config.as_ref().map(|path| path.display()))?;
        writeln!(f, "missing_l1_token: {missing_l1_token:?}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        display_option(f, "output", &output.as_ref().map(|path| path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn parses_node_urls() {
        let node: NodeUrl = "137=https://polygon.example.org/v1/key".parse().unwrap();
        assert_eq!(node.chain_id, 137);
        assert_eq!(node.url.as_str(), "https://polygon.example.org/v1/key");

        assert!("https://polygon.example.org".parse::<NodeUrl>().is_err());
        assert!("polygon=https://polygon.example.org".parse::<NodeUrl>().is_err());
    }

    #[test]
    fn parses_command_line() {
        let args = Arguments::try_parse_from([
            "route-indexer",
            "--node-url",
            "1=http://localhost:8545",
            "--node-url",
            "10=http://localhost:9545",
            "--missing-l1-token",
            "drop",
        ])
        .unwrap();
        assert_eq!(args.hub_chain_id, 1);
        assert_eq!(args.node_url.len(), 2);
        assert_eq!(args.missing_l1_token, MissingL1Token::Drop);
        assert!(args.hub_pool_address.is_none());

        let display = args.to_string();
        assert!(display.contains("10=SECRET"));
        assert!(!display.contains("localhost"));
    }
}
