//! Picking the first executable transaction out of several alternatives.
//!
//! All alternatives are simulated at the same time. Their results are only
//! compared once every simulation finished, so the completion order never
//! influences which alternative wins.

use {
    crate::{
        domain::{
            chain::Chain,
            eth::{self, GasMargin},
        },
        infra::observe,
    },
    futures::future::join_all,
};

/// A transaction to simulate, labeled for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub method: &'static str,
    pub tx: eth::Tx,
}

/// The outcome of simulating the probe at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub index: usize,
    /// Gas limit including the safety margin. `None` if the simulation
    /// failed.
    pub gas: Option<eth::Gas>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected {
    pub index: usize,
    pub gas_limit: eth::Gas,
}

/// Simulates every probe concurrently. A failing probe only marks its own
/// estimate as absent.
pub async fn estimate_all(chain: &dyn Chain, probes: &[Probe], margin: GasMargin) -> Vec<Estimate> {
    join_all(probes.iter().enumerate().map(|(index, probe)| async move {
        let gas = match chain.estimate_gas(&probe.tx).await {
            Ok(gas) => {
                let gas_limit = margin.apply(gas);
                observe::estimated(probe.method, gas, gas_limit);
                Some(gas_limit)
            }
            Err(err) => {
                observe::estimate_failed(probe.method, &err);
                None
            }
        };
        Estimate { index, gas }
    }))
    .await
}

/// The successful estimate with the highest priority, i.e. the lowest index.
pub fn select(estimates: &[Estimate]) -> Result<Selected, Error> {
    estimates
        .iter()
        .filter_map(|estimate| {
            Some(Selected {
                index: estimate.index,
                gas_limit: estimate.gas?,
            })
        })
        .min_by_key(|selected| selected.index)
        .ok_or(Error::AllCandidatesReverted)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("every candidate transaction reverts in simulation")]
    AllCandidatesReverted,
}
