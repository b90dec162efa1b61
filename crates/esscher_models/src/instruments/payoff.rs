//! European payoff definitions.
//!
//! Calls and puts are related by parity: `call - put = f - k` at expiry and
//! therefore in value. [`PayoffType::sign`] carries that relation, so every
//! formula is written once for both shapes.

use std::fmt;
use std::str::FromStr;

use esscher_core::types::Real;

/// Payoff shape.
///
/// # Variants
/// - `Call`: max(F - K, 0)
/// - `Put`: max(K - F, 0)
///
/// # Examples
/// ```
/// use esscher_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0_f64, 100.0), 0.0);
/// assert_eq!("put".parse::<PayoffType>().unwrap(), PayoffType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// Call option: max(F - K, 0)
    Call,
    /// Put option: max(K - F, 0)
    Put,
}

impl PayoffType {
    /// `+1` for calls, `-1` for puts.
    #[inline]
    pub fn sign<X: Real>(&self) -> X {
        match self {
            PayoffType::Call => X::one(),
            PayoffType::Put => -X::one(),
        }
    }

    /// Terminal payoff `max(sign · (forward - strike), 0)`.
    #[inline]
    pub fn evaluate<X: Real>(&self, forward: X, strike: X) -> X {
        (self.sign::<X>() * (forward - strike)).max(X::zero())
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }

    /// The other side of parity.
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            PayoffType::Call => PayoffType::Put,
            PayoffType::Put => PayoffType::Call,
        }
    }
}

impl FromStr for PayoffType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            _ => Err(format!("Invalid payoff type: {}. Must be one of: call, put", s)),
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => write!(f, "call"),
            PayoffType::Put => write!(f, "put"),
        }
    }
}

/// A European payoff with a fixed strike.
///
/// Construction never validates the strike; the option engine rejects
/// non-positive or non-finite strikes when pricing.
pub trait Payoff<X: Real> {
    /// Strike `k`.
    fn strike(&self) -> X;

    /// Payoff shape.
    fn payoff_type(&self) -> PayoffType;

    /// Intrinsic value against a forward: `max(sign · (f - k), 0)`.
    #[inline]
    fn intrinsic(&self, forward: X) -> X {
        self.payoff_type().evaluate(forward, self.strike())
    }
}

/// European call with strike `k`.
///
/// # Examples
/// ```
/// use esscher_models::instruments::{Call, Payoff};
///
/// let call = Call::new(100.0_f64);
/// assert_eq!(call.strike, 100.0);
/// assert_eq!(call.intrinsic(104.0), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call<X> {
    /// Strike price
    pub strike: X,
}

impl<X> Call<X> {
    /// Creates a call struck at `strike`.
    #[inline]
    pub fn new(strike: X) -> Self {
        Self { strike }
    }
}

impl<X: Real> Payoff<X> for Call<X> {
    #[inline]
    fn strike(&self) -> X {
        self.strike
    }

    #[inline]
    fn payoff_type(&self) -> PayoffType {
        PayoffType::Call
    }
}

/// European put with strike `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Put<X> {
    /// Strike price
    pub strike: X,
}

impl<X> Put<X> {
    /// Creates a put struck at `strike`.
    #[inline]
    pub fn new(strike: X) -> Self {
        Self { strike }
    }
}

impl<X: Real> Payoff<X> for Put<X> {
    #[inline]
    fn strike(&self) -> X {
        self.strike
    }

    #[inline]
    fn payoff_type(&self) -> PayoffType {
        PayoffType::Put
    }
}

/// Call or put chosen at runtime.
///
/// # Examples
/// ```
/// use esscher_models::instruments::{Payoff, PayoffType, Vanilla};
///
/// let put = Vanilla::new(PayoffType::Put, 100.0_f64);
/// assert_eq!(put.intrinsic(90.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vanilla<X> {
    /// Call or put
    pub payoff_type: PayoffType,
    /// Strike price
    pub strike: X,
}

impl<X> Vanilla<X> {
    /// Creates a payoff of the given shape.
    #[inline]
    pub fn new(payoff_type: PayoffType, strike: X) -> Self {
        Self {
            payoff_type,
            strike,
        }
    }
}

impl<X: Real> Payoff<X> for Vanilla<X> {
    #[inline]
    fn strike(&self) -> X {
        self.strike
    }

    #[inline]
    fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }
}

impl<X: Real> From<Call<X>> for Vanilla<X> {
    fn from(call: Call<X>) -> Self {
        Vanilla::new(PayoffType::Call, call.strike)
    }
}

impl<X: Real> From<Put<X>> for Vanilla<X> {
    fn from(put: Put<X>) -> Self {
        Vanilla::new(PayoffType::Put, put.strike)
    }
}
