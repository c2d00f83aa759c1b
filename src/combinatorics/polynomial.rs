use std::ops::{AddAssign, SubAssign};

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::binomial_signed;

/// A polynomial in one formal variable with arbitrary precision integer
/// coefficients. Index `k` holds the coefficient of `x^k`.
///
/// As a generating function the coefficient of `x^k` counts the ways to
/// take `k` cards, and multiplying two polynomials combines two independent
/// choices. Coefficients are signed so the same type can carry
/// inclusion-exclusion weights.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    /// Never ends in a zero coefficient.
    coeffs: Vec<BigInt>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn one() -> Self {
        Self::monomial(BigInt::one(), 0)
    }

    /// `coeff * x^degree`
    pub fn monomial(coeff: impl Into<BigInt>, degree: usize) -> Self {
        let mut coeffs = vec![BigInt::zero(); degree + 1];
        coeffs[degree] = coeff.into();
        Self::from_coeffs(coeffs)
    }

    pub fn from_coeffs(mut coeffs: Vec<BigInt>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The generating function for taking between `min_k` and `max_k` cards
    /// out of a pool of `pool` distinct cards:
    /// `sum C(pool, k) x^k` for `min_k <= k <= min(max_k, pool)`.
    ///
    /// ```
    /// use deck_census::combinatorics::Polynomial;
    /// use num_bigint::BigInt;
    ///
    /// // 1 + 4x + 6x^2 + 4x^3 + x^4
    /// let rank = Polynomial::choose_from(4, 0, 10);
    /// assert_eq!(Some(4), rank.degree());
    /// assert_eq!(BigInt::from(6), rank.coefficient(2));
    /// ```
    pub fn choose_from(pool: u64, min_k: u64, max_k: u64) -> Self {
        let top = max_k.min(pool);
        if min_k > top {
            return Self::zero();
        }
        let mut coeffs = vec![BigInt::zero(); top as usize + 1];
        for k in min_k..=top {
            coeffs[k as usize] = binomial_signed(pool, k);
        }
        Self::from_coeffs(coeffs)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Highest power with a non-zero coefficient. `None` for the zero
    /// polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Coefficient of `x^k`.
    pub fn coefficient(&self, k: usize) -> BigInt {
        self.coeffs.get(k).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// `(k, coefficient)` for every non-zero coefficient.
    pub fn terms(&self) -> impl Iterator<Item = (usize, &BigInt)> {
        self.coeffs.iter().enumerate().filter(|(_, c)| !c.is_zero())
    }

    /// Drop every power above `max_degree`.
    pub fn truncated(&self, max_degree: usize) -> Self {
        let keep = self.coeffs.len().min(max_degree + 1);
        Self::from_coeffs(self.coeffs[..keep].to_vec())
    }

    /// Multiply, keeping only powers up to `max_degree`.
    pub fn mul_truncated(&self, other: &Polynomial, max_degree: usize) -> Self {
        let (Some(da), Some(db)) = (self.degree(), other.degree()) else {
            return Self::zero();
        };
        let len = (da + db).min(max_degree) + 1;
        let mut out = vec![BigInt::zero(); len];
        for (i, a) in self.coeffs.iter().enumerate().take(len) {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate().take(len - i) {
                if !b.is_zero() {
                    out[i + j] += a * b;
                }
            }
        }
        Self::from_coeffs(out)
    }

    /// Raise to `exp`, keeping only powers up to `max_degree`.
    ///
    /// ```
    /// use deck_census::combinatorics::Polynomial;
    /// use num_bigint::BigInt;
    ///
    /// // (1 + x)^52, x^5
    /// let card = Polynomial::choose_from(1, 0, 1);
    /// let deck = card.pow_truncated(52, 5);
    /// assert_eq!(BigInt::from(2_598_960), deck.coefficient(5));
    /// ```
    pub fn pow_truncated(&self, exp: u64, max_degree: usize) -> Self {
        let mut result = Self::one();
        let mut base = self.truncated(max_degree);
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul_truncated(&base, max_degree);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul_truncated(&base, max_degree);
            }
        }
        result
    }

    /// `[p^0, p^1, ..., p^max_exp]`, each truncated to `max_degree`.
    pub fn powers_truncated(&self, max_exp: usize, max_degree: usize) -> Vec<Polynomial> {
        let mut powers = Vec::with_capacity(max_exp + 1);
        powers.push(Self::one());
        for i in 0..max_exp {
            let next = powers[i].mul_truncated(self, max_degree);
            powers.push(next);
        }
        powers
    }

    /// Multiply every power by `x^by`.
    pub fn shifted_up(&self, by: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigInt::zero(); by];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Divide every power by `x^by`.
    ///
    /// # Panics
    ///
    /// If a power below `x^by` has a non-zero coefficient.
    pub fn shifted_down(&self, by: usize) -> Self {
        assert!(
            self.coeffs.iter().take(by).all(|c| c.is_zero()),
            "can't shift {:?} down by {}",
            self,
            by
        );
        Self::from_coeffs(self.coeffs.iter().skip(by).cloned().collect())
    }
}

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        if self.coeffs.len() < rhs.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), BigInt::zero());
        }
        for (lhs, r) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *lhs += r;
        }
        let trimmed = std::mem::take(&mut self.coeffs);
        *self = Self::from_coeffs(trimmed);
    }
}

impl SubAssign<&Polynomial> for Polynomial {
    fn sub_assign(&mut self, rhs: &Polynomial) {
        if self.coeffs.len() < rhs.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), BigInt::zero());
        }
        for (lhs, r) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *lhs -= r;
        }
        let trimmed = std::mem::take(&mut self.coeffs);
        *self = Self::from_coeffs(trimmed);
    }
}
