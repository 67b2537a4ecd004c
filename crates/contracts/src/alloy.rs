pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const OPTIMISM: u64 = 10;
    pub const POLYGON: u64 = 137;
    pub const ZKSYNC: u64 = 324;
    pub const BASE: u64 = 8453;
    pub const ARBITRUM_ONE: u64 = 42161;
    pub const LINEA: u64 = 59144;
}

/// Where and when a contract was deployed on a given chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub address: alloy::primitives::Address,
    /// Block of the deployment transaction. Indexing the contract's events
    /// can start here.
    pub block: u64,
}

crate::bindings!(
    HubPool {
        event L1TokenEnabledForLiquidityProvision(address l1Token, address lpToken);
        event L2TokenDisabledForLiquidityProvision(address l1Token, address lpToken);
        event SetEnableDepositRoute(
            uint256 indexed originChainId,
            uint256 indexed destinationChainId,
            address indexed originToken,
            bool depositsEnabled
        );
        event CrossChainContractsSet(uint256 l2ChainId, address adapter, address spokePool);
        event SetPoolRebalanceRoute(
            uint256 indexed destinationChainId,
            address indexed l1Token,
            address indexed destinationToken
        );

        function weth() external view returns (address);
    },
    maplit::hashmap! {
        MAINNET => Deployment {
            address: address!("0xc186fA914353c44b2E33eBE05f21846F1048bEda"),
            block: 14819537,
        },
    }
);

crate::bindings!(
    SpokePool {
        event EnabledDepositRoute(
            address indexed originToken,
            uint256 indexed destinationChainId,
            bool enabled
        );

        function wrappedNativeToken() external view returns (address);
    },
    maplit::hashmap! {
        MAINNET => Deployment {
            address: address!("0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5"),
            block: 17117454,
        },
        OPTIMISM => Deployment {
            address: address!("0x6f26Bf09B1C792e3228e5467807a900A503c0281"),
            block: 93903076,
        },
        POLYGON => Deployment {
            address: address!("0x9295ee1d8C5b022Be115A2AD3c30C72E34e7F096"),
            block: 41908657,
        },
        ZKSYNC => Deployment {
            address: address!("0xE0B015E54d54fc84a6cB9B666099c46adE9335FF"),
            block: 10352565,
        },
        BASE => Deployment {
            address: address!("0x09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
            block: 2164878,
        },
        ARBITRUM_ONE => Deployment {
            address: address!("0xe35e9842fceaCA96570B734083f4a58e8F7C5f2A"),
            block: 83868041,
        },
        LINEA => Deployment {
            address: address!("0x7E63A5f1a8F0B4d0934B2f2327DAED3F6bb2ee75"),
            block: 2721169,
        },
    }
);

crate::bindings!(ERC20 {
    function symbol() external view returns (string);
});

#[macro_export]
macro_rules! bindings {
    ($contract:ident { $($interface:tt)* } $(, $deployment_info:expr)? $(,)?) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol!(
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($interface)*
                    }
                );
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::*;
                pub type Instance = $contract::[<$contract Instance>]<DynProvider>;

                $(
                use {
                    std::{sync::LazyLock, collections::HashMap},
                    alloy::primitives::address,
                    $crate::alloy::{Deployment, networks::*},
                };

                /// Known deployments keyed by chain id.
                pub static DEPLOYMENT_INFO: LazyLock<HashMap<u64, Deployment>> = LazyLock::new(|| {
                    $deployment_info
                });

                /// Looks up the known deployment on the given chain.
                pub fn deployment(chain_id: u64) -> anyhow::Result<Deployment> {
                    DEPLOYMENT_INFO.get(&chain_id).copied().ok_or_else(|| {
                        anyhow::anyhow!(
                            "no {} deployment info for chain {chain_id}",
                            stringify!($contract)
                        )
                    })
                }
                )?
            }
        }
    };
}
