//! Events that are meaningful to the vault operations. Each function logs the
//! event it is named after, so the domain code never formats log lines itself.

use crate::domain::{
    chain,
    eth,
    liquidity::{Candidate, Stage, Withdrawal},
    submission::Record,
    wrap::WrapType,
};

/// Observe a stage transition of a liquidity removal.
pub fn stage(from: Stage, to: Stage) {
    tracing::debug!(?from, ?to, "liquidity removal stage");
}

/// Observe the amounts a withdrawal is expected to pay out.
pub fn withdrawal(withdrawal: &Withdrawal) {
    tracing::info!(
        liquidity = %withdrawal.liquidity,
        expected_a = %withdrawal.expected.a,
        expected_b = %withdrawal.expected.b,
        minimum_a = %withdrawal.minimum.a,
        minimum_b = %withdrawal.minimum.b,
        maximum_a = %withdrawal.maximum.a,
        maximum_b = %withdrawal.maximum.b,
        "computed withdrawal"
    );
}

/// Observe the candidate methods about to be simulated.
pub fn candidates(candidates: &[Candidate]) {
    let methods = candidates
        .iter()
        .map(Candidate::method)
        .collect::<Vec<_>>();
    tracing::debug!(?methods, "built removal candidates");
}

/// Observe that a probe succeeded.
pub fn estimated(method: &str, gas: eth::Gas, gas_limit: eth::Gas) {
    tracing::debug!(method, %gas, %gas_limit, "estimated gas");
}

/// Observe that a probe reverted or could not be simulated.
pub fn estimate_failed(method: &str, err: &chain::Error) {
    tracing::warn!(method, ?err, "gas estimation failed");
}

/// Observe that no candidate can be executed.
pub fn all_candidates_reverted(count: usize) {
    tracing::warn!(count, "all removal candidates revert");
}

/// Observe the method chosen for submission.
pub fn selected(method: &str, gas_limit: eth::Gas) {
    tracing::info!(method, %gas_limit, "selected removal method");
}

/// Observe that a transaction is about to be sent.
pub fn submitting(tx: &eth::Tx, gas_limit: Option<eth::Gas>) {
    tracing::debug!(to = %tx.to, value = %tx.value, ?gas_limit, "submitting transaction");
}

/// Observe a transaction accepted by the node.
pub fn submitted(record: &Record) {
    tracing::info!(id = %record.id, info = ?record.info, "transaction submitted");
}

/// Observe that the signer refused to sign.
pub fn rejected_by_user() {
    tracing::info!("transaction rejected by the user");
}

/// Observe a failed submission.
pub fn submission_failed(err: &chain::SendError) {
    tracing::error!(?err, "transaction submission failed");
}

/// Observe a wrap or unwrap request.
pub fn wrapping(kind: WrapType, amount: eth::U256) {
    tracing::info!(?kind, %amount, "wrapping native asset");
}
