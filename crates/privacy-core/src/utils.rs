//! Vector algebra over scalars
//!
//! Every binary operation checks that its operands have equal length; a
//! mismatch is the only error these functions report.

use crate::{PrivacyError, PrivacyResult};
use curve25519_dalek::scalar::Scalar;

fn check_lengths(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<()> {
    if a.len() != b.len() {
        return Err(PrivacyError::VectorLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Compute powers of a scalar: [1, x, x^2, ..., x^(n-1)]
pub fn power_vector(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;

    for _ in 0..n {
        powers.push(current);
        current *= x;
    }

    powers
}

/// Compute the inner product of two scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Scalar> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum())
}

/// Hadamard (element-wise) product of two scalar vectors
pub fn hadamard_product(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).collect())
}

/// Add two scalar vectors element-wise
pub fn vector_add(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai + bi).collect())
}

/// Subtract two scalar vectors element-wise: a - b
pub fn vector_sub(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai - bi).collect())
}

/// Add `scalar` to every element
pub fn vector_add_scalar(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v + scalar).collect()
}

/// Scale a vector by a scalar
pub fn vector_mul_scalar(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v * scalar).collect()
}

/// Little-endian bit decomposition of a value as scalars
pub fn bit_decomposition(value: u64, bits: usize) -> Vec<Scalar> {
    (0..bits)
        .map(|i| {
            if i < 64 && (value >> i) & 1 == 1 {
                Scalar::ONE
            } else {
                Scalar::ZERO
            }
        })
        .collect()
}

/// Check if a number is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Find the next power of 2 greater than or equal to n
pub fn next_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 1;
    }

    let mut power = 1;
    while power < n {
        power <<= 1;
    }
    power
}

/// Base-2 logarithm of a power of two
pub fn log2(n: usize) -> usize {
    n.trailing_zeros() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_vector() {
        let x = Scalar::from(3u64);
        let powers = power_vector(&x, 4);

        assert_eq!(powers.len(), 4);
        assert_eq!(powers[0], Scalar::ONE);
        assert_eq!(powers[1], Scalar::from(3u64));
        assert_eq!(powers[2], Scalar::from(9u64));
        assert_eq!(powers[3], Scalar::from(27u64));
    }

    #[test]
    fn test_inner_product() {
        let a = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64)];
        let b = vec![Scalar::from(4u64), Scalar::from(5u64), Scalar::from(6u64)];

        let result = inner_product(&a, &b).unwrap();
        assert_eq!(result, Scalar::from(32u64)); // 1*4 + 2*5 + 3*6 = 32
    }

    #[test]
    fn test_hadamard_product() {
        let a = vec![Scalar::from(2u64), Scalar::from(3u64)];
        let b = vec![Scalar::from(4u64), Scalar::from(5u64)];

        let result = hadamard_product(&a, &b).unwrap();
        assert_eq!(result, vec![Scalar::from(8u64), Scalar::from(15u64)]);
    }

    #[test]
    fn test_add_sub_inverse() {
        let a = vec![Scalar::from(7u64), Scalar::from(11u64)];
        let b = vec![Scalar::from(2u64), Scalar::from(20u64)];

        let sum = vector_add(&a, &b).unwrap();
        assert_eq!(vector_sub(&sum, &b).unwrap(), a);
    }

    #[test]
    fn test_broadcast_operations() {
        let a = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let two = Scalar::from(2u64);

        assert_eq!(vector_add_scalar(&a, &two), vec![Scalar::from(3u64), Scalar::from(4u64)]);
        assert_eq!(vector_mul_scalar(&a, &two), vec![Scalar::from(2u64), Scalar::from(4u64)]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = vec![Scalar::ONE; 3];
        let b = vec![Scalar::ONE; 4];

        assert_eq!(
            inner_product(&a, &b),
            Err(PrivacyError::VectorLengthMismatch { expected: 3, actual: 4 })
        );
        assert!(hadamard_product(&a, &b).is_err());
        assert!(vector_add(&a, &b).is_err());
        assert!(vector_sub(&a, &b).is_err());
    }

    #[test]
    fn test_bit_decomposition() {
        let bits = bit_decomposition(13, 8); // 13 = 1101 in binary

        assert_eq!(bits[0], Scalar::ONE);
        assert_eq!(bits[1], Scalar::ZERO);
        assert_eq!(bits[2], Scalar::ONE);
        assert_eq!(bits[3], Scalar::ONE);
        assert!(bits[4..].iter().all(|b| *b == Scalar::ZERO));

        let max = bit_decomposition(u64::MAX, 64);
        assert!(max.iter().all(|b| *b == Scalar::ONE));
    }

    #[test]
    fn test_powers_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(8));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(6));

        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(4), 4);
        assert_eq!(next_power_of_two(17), 32);

        assert_eq!(log2(1), 0);
        assert_eq!(log2(128), 7);
    }
}
