//! Number classification shared by the color rules and the component locker.
//!
//! Parity uses Rust's truncating `%`, so for negative inputs `is_even` and
//! `is_odd` are not complements (`-3 % 2 == -1` is neither). The noise
//! generators can produce negative cell values in early columns; negative
//! odd values classify as neither and render through the background branch.

/// Class assigned to a value or to a rendered red channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Prime,
    Even,
    Odd,
}

impl Classification {
    /// Classify with prime taking precedence over even (2 is `Prime`).
    /// Returns `None` for values that are neither even nor odd (negative odd).
    pub fn of(n: i64) -> Option<Self> {
        if is_prime(n) {
            Some(Classification::Prime)
        } else if is_even(n) {
            Some(Classification::Even)
        } else if is_odd(n) {
            Some(Classification::Odd)
        } else {
            None
        }
    }

    /// Whether `n` satisfies this class's predicate on its own.
    ///
    /// Membership is predicate-based, so 2 matches both `Prime` and `Even`.
    #[inline]
    pub fn matches(self, n: i64) -> bool {
        match self {
            Classification::Prime => is_prime(n),
            Classification::Even => is_even(n),
            Classification::Odd => is_odd(n),
        }
    }
}

/// Trial division up to the integer square root.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    // i <= n / i is i*i <= n without overflow
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[inline]
pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

#[inline]
pub fn is_odd(n: i64) -> bool {
    n % 2 == 1
}

/// Divide by `base` while divisible and above 1; true iff the result is exactly 1.
pub fn is_power_of_base(n: i64, base: i64) -> bool {
    if base < 2 {
        return n == 1;
    }
    let mut n = n;
    while n > 1 && n % base == 0 {
        n /= base;
    }
    n == 1
}

/// Counts of each class among a set of neighbor values.
///
/// A neighbor can count toward more than one class (2 is prime and even).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    pub primes: usize,
    pub evens: usize,
    pub odds: usize,
}

impl NeighborCounts {
    pub fn tally(neighbors: &[i64]) -> Self {
        let mut counts = NeighborCounts::default();
        for &n in neighbors {
            if is_prime(n) {
                counts.primes += 1;
            }
            if is_even(n) {
                counts.evens += 1;
            }
            if is_odd(n) {
                counts.odds += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        for n in -5..2 {
            assert!(!is_prime(n), "{} should not be prime", n);
        }
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(is_prime(97));
        assert!(!is_prime(65_537 * 3));
        assert!(is_prime(65_537));
    }

    #[test]
    fn test_negative_parity_is_neither() {
        assert!(is_even(-4));
        assert!(!is_odd(-4));
        // Truncating remainder: -3 % 2 == -1
        assert!(!is_even(-3));
        assert!(!is_odd(-3));
        assert_eq!(Classification::of(-3), None);
    }

    #[test]
    fn test_is_power_of_base() {
        assert!(is_power_of_base(1, 3));
        assert!(is_power_of_base(3, 3));
        assert!(is_power_of_base(81, 3));
        assert!(!is_power_of_base(0, 3));
        assert!(!is_power_of_base(6, 3));
        assert!(!is_power_of_base(-27, 3));
        assert!(is_power_of_base(64, 2));
        assert!(!is_power_of_base(9, 1));
    }

    #[test]
    fn test_classification_prefers_prime() {
        assert_eq!(Classification::of(2), Some(Classification::Prime));
        assert_eq!(Classification::of(4), Some(Classification::Even));
        assert_eq!(Classification::of(9), Some(Classification::Odd));
        assert_eq!(Classification::of(0), Some(Classification::Even));
        assert_eq!(Classification::of(1), Some(Classification::Odd));

        assert!(Classification::Even.matches(2));
        assert!(Classification::Prime.matches(2));
        assert!(!Classification::Odd.matches(2));
    }

    #[test]
    fn test_neighbor_counts() {
        let counts = NeighborCounts::tally(&[2, 3, 4, 9]);
        assert_eq!(counts.primes, 2);
        assert_eq!(counts.evens, 2);
        assert_eq!(counts.odds, 2);
        assert_eq!(NeighborCounts::tally(&[]), NeighborCounts::default());
    }
}
