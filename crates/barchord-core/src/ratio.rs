//! Exact rational note lengths

use std::cmp::Ordering;
use std::fmt;

/// A fraction kept in lowest terms with a positive denominator.
///
/// Note lengths like `3/10` have no exact `f64` form, so sums are done here
/// and converted with [`Ratio::to_f64`] only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    /// Panics if `den` is zero
    pub fn new(num: i64, den: i64) -> Self {
        Self::checked_new(num, den).expect("zero denominator")
    }

    fn checked_new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let g = gcd(num, den) * den.signum();
        Some(Self { num: num / g, den: den / g })
    }

    pub const fn zero() -> Self {
        Self { num: 0, den: 1 }
    }

    /// `None` when the result leaves `i64`
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let g = gcd(self.den, other.den);
        let (a, b) = (self.den / g, other.den / g);
        let num = self.num.checked_mul(b)?.checked_add(other.num.checked_mul(a)?)?;
        let den = a.checked_mul(other.den)?;
        Self::checked_new(num, den)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl From<i64> for Ratio {
    fn from(n: i64) -> Self {
        Self { num: n, den: 1 }
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as i128 * other.den as i128;
        let rhs = other.num as i128 * self.den as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}
