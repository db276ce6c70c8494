//! Numerically safe arithmetic primitives, and the algebraic contract shared
//! by plain numbers and solver quantity handles.
//!
//! Every primitive here is total: no input a user formula can produce may
//! panic or surface an error during model construction. Division and the
//! exponential are the singularity-prone operations and are clamped to
//! [`MAX_MAGNITUDE`]; addition, subtraction, multiplication, sine and cosine
//! are passed through untouched.

/// Ceiling on the magnitude any guarded operation may produce
pub const MAX_MAGNITUDE: f64 = 1e12;

/// Divide `numerator` by `denominator`, clamping near-zero denominators
///
/// If the denominator is within `1 / MAX_MAGNITUDE` of zero the result is
/// `MAX_MAGNITUDE` as an approximation of infinity. The sign of a near-zero
/// denominator is not propagated.
///
/// # Examples
/// ```rust
/// use cellsolve_core::numeric::{safe_divide, MAX_MAGNITUDE};
/// assert_eq!(safe_divide(10.0, 2.0), 5.0);
/// assert_eq!(safe_divide(10.0, 0.0), MAX_MAGNITUDE);
/// ```
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= 1.0 / MAX_MAGNITUDE {
        return MAX_MAGNITUDE;
    }
    numerator / denominator
}

/// Take `e^power`, clamped to [`MAX_MAGNITUDE`]
///
/// A result that overflows the float representation, or otherwise fails to
/// be finite, also clamps to `MAX_MAGNITUDE` instead of propagating.
pub fn safe_exp(power: f64) -> f64 {
    let result = power.exp();
    if !result.is_finite() || result > MAX_MAGNITUDE {
        return MAX_MAGNITUDE;
    }
    result
}

/// Algebraic contract for values a formula tree can be evaluated over
///
/// Implemented by `f64` for plain numeric evaluation, and by the opaque
/// decision-quantity handles a solver backend substitutes for variable
/// names. Handles compose structurally; the numeric implementation routes
/// division and the exponential through the safe primitives above.
pub trait Quantity: Clone {
    /// Lift a literal into the quantity domain
    fn from_literal(value: f64) -> Self;
    fn add(self, rhs: Self) -> Self;
    fn subtract(self, rhs: Self) -> Self;
    fn multiply(self, rhs: Self) -> Self;
    fn divide(self, rhs: Self) -> Self;
    fn exp(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;

    /// Flip the sign, used to express maximization against a minimize-only
    /// backend
    fn negate(self) -> Self {
        Self::from_literal(0.0).subtract(self)
    }
}

impl Quantity for f64 {
    fn from_literal(value: f64) -> Self {
        value
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn subtract(self, rhs: Self) -> Self {
        self - rhs
    }

    fn multiply(self, rhs: Self) -> Self {
        self * rhs
    }

    fn divide(self, rhs: Self) -> Self {
        safe_divide(self, rhs)
    }

    fn exp(self) -> Self {
        safe_exp(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn negate(self) -> Self {
        -self
    }
}
