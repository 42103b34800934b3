//! Dense polynomials over the scalar field

use curve25519_dalek::scalar::Scalar;
use std::ops::Mul;

/// Polynomial stored as coefficients, lowest degree first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Scalar>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<Scalar>) -> Self {
        Self { coefficients }
    }

    /// The constant polynomial 1
    pub fn one() -> Self {
        Self::new(vec![Scalar::ONE])
    }

    /// `slope * X + intercept`
    pub fn linear(slope: Scalar, intercept: Scalar) -> Self {
        Self::new(vec![intercept, slope])
    }

    /// Coefficient of `X^k`, zero past the stored degree
    pub fn coefficient(&self, k: usize) -> Scalar {
        self.coefficients.get(k).copied().unwrap_or(Scalar::ZERO)
    }

    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        self.coefficients
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, c| acc * x + c)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        if self.coefficients.is_empty() || other.coefficients.is_empty() {
            return Polynomial::new(Vec::new());
        }
        let mut coefficients = vec![Scalar::ZERO; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Polynomial::new(coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: u64) -> Scalar {
        Scalar::from(v)
    }

    #[test]
    fn test_multiply_linear_factors() {
        // (X + 2)(3X + 1) = 3X^2 + 7X + 2
        let p = &Polynomial::linear(s(1), s(2)) * &Polynomial::linear(s(3), s(1));
        assert_eq!(p, Polynomial::new(vec![s(2), s(7), s(3)]));
        assert_eq!(p.coefficient(3), Scalar::ZERO);
    }

    #[test]
    fn test_evaluate() {
        let p = Polynomial::new(vec![s(2), s(7), s(3)]);
        assert_eq!(p.evaluate(&s(2)), s(2 + 14 + 12));
        assert_eq!(Polynomial::one().evaluate(&s(99)), Scalar::ONE);
    }

    #[test]
    fn test_coefficients_reduce_mod_order() {
        // (X - 1)(X + 1) = X^2 - 1
        let p = &Polynomial::linear(s(1), -s(1)) * &Polynomial::linear(s(1), s(1));
        assert_eq!(p.coefficient(0), -Scalar::ONE);
        assert_eq!(p.coefficient(1), Scalar::ZERO);
        assert_eq!(p.coefficient(2), Scalar::ONE);
    }
}
