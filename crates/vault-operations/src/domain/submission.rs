use {
    crate::{
        domain::{
            chain::{Chain, SendError},
            eth,
        },
        infra::observe,
    },
    std::fmt,
};

/// What a submitted transaction is expected to do, for display in the
/// transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionInfo {
    RemoveLiquidity {
        base_currency_id: String,
        quote_currency_id: String,
        expected_amount_base: eth::U256,
        expected_amount_quote: eth::U256,
    },
    Wrap {
        /// `true` when native currency is received, i.e. for unwrapping.
        unwrapped: bool,
        amount: eth::U256,
    },
}

impl fmt::Display for TransactionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveLiquidity {
                base_currency_id,
                quote_currency_id,
                expected_amount_base,
                expected_amount_quote,
            } => write!(
                f,
                "remove {expected_amount_base} {base_currency_id} and {expected_amount_quote} \
                 {quote_currency_id}"
            ),
            Self::Wrap {
                unwrapped: false,
                amount,
            } => write!(f, "wrap {amount}"),
            Self::Wrap {
                unwrapped: true,
                amount,
            } => write!(f, "unwrap {amount}"),
        }
    }
}

/// A transaction accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: eth::TxId,
    pub info: TransactionInfo,
}

/// Keeps track of the submitted transactions.
#[cfg_attr(test, mockall::automock)]
pub trait Tracker: Send + Sync {
    fn add(&self, record: Record);

    fn all(&self) -> Vec<Record>;
}

/// Sends the transaction and records it once the node accepted it. The gas
/// limit is used as is, the transaction is not simulated again.
pub async fn submit(
    chain: &dyn Chain,
    tracker: &dyn Tracker,
    tx: eth::Tx,
    gas_limit: Option<eth::Gas>,
    info: TransactionInfo,
) -> Result<eth::TxId, Error> {
    observe::submitting(&tx, gas_limit);
    match chain.send(tx, gas_limit).await {
        Ok(id) => {
            let record = Record { id, info };
            observe::submitted(&record);
            tracker.add(record);
            Ok(id)
        }
        Err(SendError::Rejected) => {
            observe::rejected_by_user();
            Err(Error::RejectedByUser)
        }
        Err(err) => {
            observe::submission_failed(&err);
            Err(Error::Failed(err.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("transaction rejected by the user")]
    RejectedByUser,
    #[error("{0}")]
    Failed(String),
}
