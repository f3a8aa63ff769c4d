//! Removing liquidity end to end: computing the withdrawal, building the
//! router calls that could execute it, simulating them and sending the best
//! one through the vault.

use {
    super::{
        Authorization,
        PermitSignature,
        Withdrawal,
        WithdrawalRequest,
        amounts,
        candidates::{self, Pair, Params},
    },
    crate::{
        domain::{
            Vault,
            chain::{self, Pool},
            estimation::{self, Probe},
            eth::{self, U256},
            submission::{self, TransactionInfo},
        },
        infra::observe,
    },
    derive_more::Display,
    number::Ratio,
};

/// Progress of a single removal attempt.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    CandidatesBuilt,
    Estimating,
    Selected,
    Submitting,
    /// The node accepted the transaction.
    Confirmed,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// Stages only move forward. Any stage that is not terminal may fail.
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        match (self, next) {
            (Idle, CandidatesBuilt)
            | (CandidatesBuilt, Estimating)
            | (Estimating, Selected)
            | (Selected, Submitting)
            | (Submitting, Confirmed) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
struct Progress(Stage);

impl Progress {
    fn advance(&mut self, next: Stage) -> Result<(), Error> {
        if !self.0.can_advance_to(next) {
            return Err(Error::InvalidTransition {
                from: self.0,
                to: next,
            });
        }
        observe::stage(self.0, next);
        self.0 = next;
        Ok(())
    }

    fn fail(&mut self) {
        if !self.0.is_terminal() {
            observe::stage(self.0, Stage::Failed);
            self.0 = Stage::Failed;
        }
    }
}

/// Why a withdrawal can't be submitted yet, worded for the operator.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    #[display("Select a pair")]
    SelectPair,
    #[display("Enter an amount")]
    EnterAmount,
    #[display("Insufficient liquidity")]
    InsufficientLiquidity,
    #[display("Approve or sign a permit first")]
    Authorize,
}

/// Whether a withdrawal may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness(Option<Blocker>);

impl Readiness {
    /// Checks are ordered like the form is filled in: pair, amount, pool
    /// state and finally the authorization.
    pub fn new(
        pair: Result<Pair, candidates::Error>,
        percentage: Ratio,
        withdrawal: Result<Withdrawal, amounts::Error>,
        authorization: &Authorization,
    ) -> Self {
        let blocker = match (pair, withdrawal) {
            (Err(_), _) => Some(Blocker::SelectPair),
            _ if percentage.is_zero() => Some(Blocker::EnterAmount),
            (Ok(_), Err(_)) => Some(Blocker::InsufficientLiquidity),
            (Ok(_), Ok(withdrawal)) if withdrawal.liquidity.is_zero() => {
                Some(Blocker::InsufficientLiquidity)
            }
            (Ok(_), Ok(_)) if !authorization.is_usable() => Some(Blocker::Authorize),
            (Ok(_), Ok(_)) => None,
        };
        Self(blocker)
    }

    pub fn can_submit(&self) -> bool {
        self.0.is_none()
    }

    pub fn blocking_reason(&self) -> Option<Blocker> {
        self.0
    }
}

/// Fresh on-chain state a withdrawal is computed from.
struct State {
    pool: Option<Pool>,
    balance: U256,
    timestamp: u64,
}

impl Vault {
    /// Removes the requested share of the vault's liquidity.
    ///
    /// Nothing is read from the chain before the authorization and the pair
    /// are known to be usable. Pool state is read again on every call.
    pub async fn remove_liquidity(
        &self,
        request: &WithdrawalRequest,
        authorization: &Authorization,
    ) -> Result<eth::TxId, Error> {
        let mut progress = Progress::default();
        let result = self
            .try_remove_liquidity(&mut progress, request, authorization)
            .await;
        if result.is_err() {
            progress.fail();
        }
        result
    }

    async fn try_remove_liquidity(
        &self,
        progress: &mut Progress,
        request: &WithdrawalRequest,
        authorization: &Authorization,
    ) -> Result<eth::TxId, Error> {
        if !authorization.is_usable() {
            return Err(candidates::Error::NoAuthorization.into());
        }
        let weth = self.config.addresses.weth;
        let pair = Pair::new(request.currency_a, request.currency_b, weth)?;
        if request.percentage.is_zero() {
            return Err(Error::NothingToWithdraw);
        }

        let state = self.state(request, true).await?;
        let withdrawal = self.withdrawal(request, &state)?;
        if withdrawal.liquidity.is_zero() {
            return Err(Error::NothingToWithdraw);
        }
        observe::withdrawal(&withdrawal);

        let deadline = U256::from(state.timestamp) + U256::from(request.deadline.as_secs());
        let candidates = candidates::build(
            authorization,
            &Params {
                pair,
                liquidity: withdrawal.liquidity,
                minimum: withdrawal.minimum,
                recipient: request.recipient,
                deadline,
            },
        )?;
        observe::candidates(&candidates);
        progress.advance(Stage::CandidatesBuilt)?;

        let router = self.config.addresses.router;
        let probes = candidates
            .iter()
            .map(|candidate| Probe {
                method: candidate.method(),
                tx: self.operate_on_exchange(router, candidate.calldata()),
            })
            .collect::<Vec<_>>();
        progress.advance(Stage::Estimating)?;
        let estimates =
            estimation::estimate_all(self.chain.as_ref(), &probes, self.config.gas_margin).await;
        let selected = estimation::select(&estimates).inspect_err(|_| {
            observe::all_candidates_reverted(probes.len());
        })?;
        let Probe { method, tx } = probes
            .into_iter()
            .nth(selected.index)
            .ok_or(estimation::Error::AllCandidatesReverted)?;
        observe::selected(method, selected.gas_limit);
        progress.advance(Stage::Selected)?;

        let info = TransactionInfo::RemoveLiquidity {
            base_currency_id: request.currency_a.id(weth),
            quote_currency_id: request.currency_b.id(weth),
            expected_amount_base: withdrawal.expected.a,
            expected_amount_quote: withdrawal.expected.b,
        };
        progress.advance(Stage::Submitting)?;
        let id = submission::submit(
            self.chain.as_ref(),
            self.tracker.as_ref(),
            tx,
            Some(selected.gas_limit),
            info,
        )
        .await?;
        progress.advance(Stage::Confirmed)?;
        Ok(id)
    }

    /// How the router may currently pull the vault's liquidity tokens for
    /// this request.
    ///
    /// The allowance is read from the chain unless the vault is configured to
    /// assume an approval. A pending approval is never reported since no
    /// submitted approvals are tracked.
    pub async fn authorization(
        &self,
        request: &WithdrawalRequest,
        permit: Option<PermitSignature>,
    ) -> Result<Authorization, Error> {
        if self.config.assume_approved {
            return Ok(Authorization::Approved);
        }
        let state = self.state(request, false).await?;
        let withdrawal = self.withdrawal(request, &state)?;
        let pool = state.pool.ok_or(amounts::Error::InsufficientLiquidity)?;
        let allowance = self
            .chain
            .allowance(
                pool.address,
                self.config.addresses.vault,
                self.config.addresses.router,
            )
            .await?;

        Ok(match permit {
            _ if allowance >= withdrawal.liquidity => Authorization::Approved,
            Some(signature) => Authorization::Permit(signature),
            None => Authorization::NotApproved,
        })
    }

    /// Derives whether the request can be submitted as is.
    pub async fn readiness(
        &self,
        request: &WithdrawalRequest,
        authorization: &Authorization,
    ) -> Result<Readiness, Error> {
        let weth = self.config.addresses.weth;
        let pair = Pair::new(request.currency_a, request.currency_b, weth);
        let withdrawal = match pair {
            Ok(_) => {
                let state = self.state(request, false).await?;
                self.withdrawal(request, &state)
            }
            Err(_) => Err(amounts::Error::InsufficientLiquidity),
        };
        Ok(Readiness::new(
            pair,
            request.percentage,
            withdrawal,
            authorization,
        ))
    }

    /// Authorization and readiness of a request without submitting anything.
    ///
    /// A request whose amounts can't be computed has no usable authorization,
    /// so readiness reports why instead of failing.
    pub async fn preview(
        &self,
        request: &WithdrawalRequest,
        permit: Option<PermitSignature>,
    ) -> Result<(Authorization, Readiness), Error> {
        let authorization = match self.authorization(request, permit).await {
            Ok(authorization) => authorization,
            Err(Error::Amounts(_)) => Authorization::NotApproved,
            Err(err) => return Err(err),
        };
        let readiness = self.readiness(request, &authorization).await?;
        Ok((authorization, readiness))
    }

    async fn state(
        &self,
        request: &WithdrawalRequest,
        with_timestamp: bool,
    ) -> Result<State, Error> {
        let weth = self.config.addresses.weth;
        let (token_a, token_b) = (
            request.currency_a.wrapped(weth),
            request.currency_b.wrapped(weth),
        );
        let timestamp = async {
            if with_timestamp {
                self.chain.latest_timestamp().await
            } else {
                Ok(0)
            }
        };
        let (pool, timestamp) = futures::try_join!(self.chain.pool(token_a, token_b), timestamp)?;
        let balance = match &pool {
            Some(pool) => {
                self.chain
                    .token_balance(pool.address, self.config.addresses.vault)
                    .await?
            }
            None => U256::ZERO,
        };
        Ok(State {
            pool,
            balance,
            timestamp,
        })
    }

    fn withdrawal(
        &self,
        request: &WithdrawalRequest,
        state: &State,
    ) -> Result<Withdrawal, amounts::Error> {
        let weth = self.config.addresses.weth;
        amounts::withdrawal(
            state.pool.as_ref(),
            request.currency_a.wrapped(weth),
            request.currency_b.wrapped(weth),
            state.balance,
            request.percentage,
            request.slippage,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Candidates(#[from] candidates::Error),
    #[error(transparent)]
    Amounts(#[from] amounts::Error),
    #[error(transparent)]
    Estimation(#[from] estimation::Error),
    #[error(transparent)]
    Submission(#[from] submission::Error),
    #[error(transparent)]
    Chain(#[from] chain::Error),
    #[error("the vault holds no liquidity to withdraw")]
    NothingToWithdraw,
    #[error("invalid stage transition from {from} to {to}")]
    InvalidTransition { from: Stage, to: Stage },
}
