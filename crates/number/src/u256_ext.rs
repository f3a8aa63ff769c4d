//! Extension trait for U256 arithmetic operations.

use alloy::primitives::{U256, U512};

/// Extension trait for U256 to add utility methods.
pub trait U256Ext: Sized {
    /// Computes `self * q / d` rounding down.
    ///
    /// Returns `None` if `d` is `0` or if the result overflows a 256-bit
    /// integer. The intermediate product is computed in 512 bits, so only the
    /// final quotient has to fit.
    fn checked_mul_ratio(&self, q: &Self, d: &Self) -> Option<Self>;
}

impl U256Ext for U256 {
    fn checked_mul_ratio(&self, q: &Self, d: &Self) -> Option<Self> {
        if d.is_zero() {
            return None;
        }

        // fast path when math in U256 doesn't overflow
        if let Some(product) = self.checked_mul(*q) {
            return Some(product / d);
        }

        let div = (U512::from(*self) * U512::from(*q)) / U512::from(*d);
        narrow(div)
    }
}

fn narrow(value: U512) -> Option<U256> {
    let limbs = value.into_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs_slice(&limbs[..4]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_ratio_truncates() {
        let x = U256::from(1_000);
        assert_eq!(
            x.checked_mul_ratio(&U256::from(95), &U256::from(100)),
            Some(U256::from(950))
        );
        assert_eq!(
            U256::from(999).checked_mul_ratio(&U256::from(1), &U256::from(2)),
            Some(U256::from(499))
        );
        assert_eq!(x.checked_mul_ratio(&U256::from(1), &U256::ZERO), None);
    }

    #[test]
    fn mul_ratio_uses_wide_intermediate() {
        // MAX * MAX overflows 256 bits but MAX * MAX / MAX does not.
        assert_eq!(
            U256::MAX.checked_mul_ratio(&U256::MAX, &U256::MAX),
            Some(U256::MAX)
        );
        assert_eq!(
            U256::MAX.checked_mul_ratio(&U256::from(3), &U256::from(4)),
            Some(U256::MAX / U256::from(4) * U256::from(3) + U256::from(2))
        );
        assert_eq!(
            U256::MAX.checked_mul_ratio(&U256::from(2), &U256::from(1)),
            None
        );
    }
}
