pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const GNOSIS: u64 = 100;
    pub const SEPOLIA: u64 = 11155111;
    pub const ARBITRUM_ONE: u64 = 42161;
    pub const BASE: u64 = 8453;
    pub const POLYGON: u64 = 137;
    pub const BNB: u64 = 56;
    pub const OPTIMISM: u64 = 10;
}

#[macro_export]
macro_rules! bindings {
    ($contract:ident, { $($interface:tt)* } $(, $deployment_info:expr)?) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol! {
                    #[allow(missing_docs)]
                    #[sol(rpc, all_derives)]
                    interface $contract {
                        $($interface)*
                    }
                }
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::*;
                pub type Instance = $contract::[<$contract Instance>]<DynProvider>;

                $($crate::deployments!(@items $deployment_info);)?
            }
        }
    };
}

/// Per-chain deployment table for a contract. Used on its own for contracts
/// that are only ever addressed, never called.
#[macro_export]
macro_rules! deployments {
    (@items $deployment_info:expr) => {
        use {
            std::{sync::LazyLock, collections::HashMap},
            alloy::primitives::{address, Address},
            $crate::alloy::networks::*,
        };

        pub static DEPLOYMENT_INFO: LazyLock<HashMap<u64, Address>> = LazyLock::new(|| {
            $deployment_info
        });

        /// The canonical deployment on the given chain, if any.
        pub fn deployment_address(chain_id: &u64) -> Option<Address> {
            DEPLOYMENT_INFO.get(chain_id).copied()
        }
    };
    ($contract:ident, $deployment_info:expr) => {
        #[allow(non_snake_case)]
        pub mod $contract {
            $crate::deployments!(@items $deployment_info);
        }
    };
}

// The managed-position container. Every interaction with an external
// exchange is forwarded through `operateOnExchange`, which delegates each
// encoded call to the adapter registered for `exchange`.
crate::bindings!(Drago, {
    function operateOnExchange(address exchange, bytes[] transactions) external payable;
});

// Adapter mirroring the Uniswap V2 router's liquidity removal entry points.
crate::bindings!(AUniswap, {
    function removeLiquidity(
        address tokenA,
        address tokenB,
        uint256 liquidity,
        uint256 amountAMin,
        uint256 amountBMin,
        address to,
        uint256 deadline
    ) external returns (uint256 amountA, uint256 amountB);

    function removeLiquidityETH(
        address token,
        uint256 liquidity,
        uint256 amountTokenMin,
        uint256 amountETHMin,
        address to,
        uint256 deadline
    ) external returns (uint256 amountToken, uint256 amountETH);

    function removeLiquidityWithPermit(
        address tokenA,
        address tokenB,
        uint256 liquidity,
        uint256 amountAMin,
        uint256 amountBMin,
        address to,
        uint256 deadline,
        bool approveMax,
        uint8 v,
        bytes32 r,
        bytes32 s
    ) external returns (uint256 amountA, uint256 amountB);

    function removeLiquidityETHWithPermit(
        address token,
        uint256 liquidity,
        uint256 amountTokenMin,
        uint256 amountETHMin,
        address to,
        uint256 deadline,
        bool approveMax,
        uint8 v,
        bytes32 r,
        bytes32 s
    ) external returns (uint256 amountToken, uint256 amountETH);

    function removeLiquidityETHSupportingFeeOnTransferTokens(
        address token,
        uint256 liquidity,
        uint256 amountTokenMin,
        uint256 amountETHMin,
        address to,
        uint256 deadline
    ) external returns (uint256 amountETH);

    function removeLiquidityETHWithPermitSupportingFeeOnTransferTokens(
        address token,
        uint256 liquidity,
        uint256 amountTokenMin,
        uint256 amountETHMin,
        address to,
        uint256 deadline,
        bool approveMax,
        uint8 v,
        bytes32 r,
        bytes32 s
    ) external returns (uint256 amountETH);
});

// Adapter for the Uniswap V3 swap router. Only the wrapping helper is used.
crate::bindings!(AUniswapV3, {
    function wrapETH(uint256 value) external;
});

// Adapter unwrapping WETH held by the vault back into the native asset.
crate::bindings!(AWeth, {
    function unwrapEth(address wrappedEtherAddress, uint256 amount) external;
});

crate::bindings!(ERC20, {
    function balanceOf(address owner) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
});

crate::bindings!(IUniswapV2Pair, {
    function token0() external view returns (address);
    function token1() external view returns (address);
    function totalSupply() external view returns (uint256);
    function getReserves()
        external
        view
        returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
});

crate::bindings!(
    IUniswapV2Factory,
    {
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    },
    maplit::hashmap! {
        MAINNET => address!("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
        ARBITRUM_ONE => address!("0xf1D7CC64Fb4452F05c498126312eBE29f30Fbcf9"),
        BASE => address!("0x8909Dc15e40173Ff4699343b6eB8132c65e18eC6"),
        OPTIMISM => address!("0x0c3c1c532F1e39EdF36BE9Fe0bE1410313E074Bf"),
        POLYGON => address!("0x9e5A52f57b3038F1B8EeE45F28b3C1967e22799C"),
    }
);

crate::deployments!(
    UniswapV2Router02,
    maplit::hashmap! {
        MAINNET => address!("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D"),
        ARBITRUM_ONE => address!("0x4752ba5DBc23f44D87826276BF6Fd6b1C372aD24"),
        BASE => address!("0x4752ba5DBc23f44D87826276BF6Fd6b1C372aD24"),
        BNB => address!("0x4752ba5DBc23f44D87826276BF6Fd6b1C372aD24"),
        OPTIMISM => address!("0x4A7b5Da61326A6379179b40d00F57E5bbDC962c2"),
        POLYGON => address!("0xedf6066a2b290C185783862C7F4776A2C8077AD1"),
    }
);

crate::deployments!(
    SwapRouter,
    maplit::hashmap! {
        MAINNET => address!("0xE592427A0AEce92De3Edee1F18E0157C05861564"),
        ARBITRUM_ONE => address!("0xE592427A0AEce92De3Edee1F18E0157C05861564"),
        OPTIMISM => address!("0xE592427A0AEce92De3Edee1F18E0157C05861564"),
        POLYGON => address!("0xE592427A0AEce92De3Edee1F18E0157C05861564"),
    }
);

crate::deployments!(
    WETH9,
    maplit::hashmap! {
        MAINNET => address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
        GNOSIS => address!("0xe91D153E0b41518A2Ce8Dd3D7944Fa863463a97d"),
        SEPOLIA => address!("0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
        ARBITRUM_ONE => address!("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
        BASE => address!("0x4200000000000000000000000000000000000006"),
        OPTIMISM => address!("0x4200000000000000000000000000000000000006"),
        POLYGON => address!("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
        BNB => address!("0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
    }
);
