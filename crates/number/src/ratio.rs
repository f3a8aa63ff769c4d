use {
    crate::U256Ext,
    alloy::primitives::U256,
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// A rational value guaranteed to be in the range [0,1].
///
/// Used for slippage tolerances and withdrawal percentages. The value is kept
/// as an exact fraction so that applying it to token amounts matches the
/// integer math performed by the contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: U256,
    denom: U256,
}

impl Ratio {
    pub const ZERO: Self = Self {
        numer: U256::ZERO,
        denom: U256::from_limbs([1, 0, 0, 0]),
    };
    pub const ONE: Self = Self {
        numer: U256::from_limbs([1, 0, 0, 0]),
        denom: U256::from_limbs([1, 0, 0, 0]),
    };

    pub fn new(numer: U256, denom: U256) -> Result<Self, OutOfRangeError> {
        if denom.is_zero() || numer > denom {
            return Err(OutOfRangeError);
        }
        Ok(Self { numer, denom })
    }

    /// A ratio expressed in basis points (1/10000).
    pub fn from_bps(bps: u32) -> Result<Self, OutOfRangeError> {
        Self::new(U256::from(bps), U256::from(10_000))
    }

    /// A ratio expressed in whole percent.
    pub fn from_percent(percent: u32) -> Result<Self, OutOfRangeError> {
        Self::new(U256::from(percent), U256::from(100))
    }

    pub fn numer(&self) -> U256 {
        self.numer
    }

    pub fn denom(&self) -> U256 {
        self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// `1 - self`.
    pub fn complement(&self) -> Self {
        Self {
            numer: self.denom - self.numer,
            denom: self.denom,
        }
    }

    /// `floor(amount * self)`.
    pub fn mul_floor(&self, amount: U256) -> U256 {
        // numer <= denom, so the result never exceeds `amount`
        amount
            .checked_mul_ratio(&self.numer, &self.denom)
            .unwrap_or(amount)
    }

    /// `floor(amount * (1 + self))`, `None` on overflow.
    pub fn mul_floor_one_plus(&self, amount: U256) -> Option<U256> {
        let numer = self.denom.checked_add(self.numer)?;
        amount.checked_mul_ratio(&numer, &self.denom)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // two decimals of a percent
        let hundredths = self
            .numer
            .checked_mul_ratio(&U256::from(10_000), &self.denom)
            .unwrap_or_default();
        let whole = (hundredths / U256::from(100)).saturating_to::<u64>();
        let fraction = (hundredths % U256::from(100)).saturating_to::<u64>();
        write!(f, "{whole}.{fraction:0>2}%")
    }
}

impl FromStr for Ratio {
    type Err = ParseRatioError;

    /// Parses either a percentage (`"12.5%"`) or a fraction (`"1/3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(percent) = s.strip_suffix('%') {
            let percent = percent.trim();
            let (whole, fraction) = percent.split_once('.').unwrap_or((percent, ""));
            if whole.is_empty() && fraction.is_empty() {
                return Err(ParseRatioError::Syntax(s.to_string()));
            }
            let digits = format!("{whole}{fraction}");
            let numer = U256::from_str_radix(&digits, 10)
                .map_err(|_| ParseRatioError::Syntax(s.to_string()))?;
            let scale = u32::try_from(fraction.len())
                .map_err(|_| ParseRatioError::Syntax(s.to_string()))?;
            let denom = U256::from(10)
                .checked_pow(U256::from(scale))
                .and_then(|scale| scale.checked_mul(U256::from(100)))
                .ok_or_else(|| ParseRatioError::Syntax(s.to_string()))?;
            return Ok(Self::new(numer, denom)?);
        }
        let (numer, denom) = s
            .split_once('/')
            .ok_or_else(|| ParseRatioError::Syntax(s.to_string()))?;
        let parse = |value: &str| {
            U256::from_str_radix(value.trim(), 10)
                .map_err(|_| ParseRatioError::Syntax(s.to_string()))
        };
        Ok(Self::new(parse(numer)?, parse(denom)?)?)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("the ratio is out of expected range [0, 1]")]
pub struct OutOfRangeError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRatioError {
    #[error("invalid ratio {0:?}, expected a percentage like \"12.5%\" or a fraction like \"1/3\"")]
    Syntax(String),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
}
