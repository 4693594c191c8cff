//! Scalar traits for planar coordinates.
//!
//! Every geometric type in this crate is generic over a scalar `T` that
//! implements [`CoordinateScalar`]. The trait consolidates the bounds the
//! triangulation needs:
//!
//! - **`Float`**: floating-point arithmetic from `num_traits`
//! - **`FiniteCheck`**: validation of coordinate values (no NaN or infinity)
//! - **`OrderedEq`/`OrderedCmp`**: total equality and ordering of coordinates
//! - **`HashCoordinate`**: consistent hashing of floating-point values
//! - **`Display`/`Debug`**: text output of coordinates
//! - **`Serialize`/`DeserializeOwned`**: serde support
//!
//! # Usage Examples
//!
//! ```rust
//! use delaunay_dual::geometry::traits::coordinate::{CoordinateScalar, FiniteCheck};
//!
//! assert!(1.5_f64.is_finite_generic());
//! assert!(!f64::NAN.is_finite_generic());
//! assert_eq!(f64::default_tolerance(), 1e-12);
//! ```

use num_traits::Float;
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Errors that can occur during coordinate validation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// A coordinate value is invalid (NaN or infinite).
    #[error("Invalid coordinate at index {coordinate_index}: {coordinate_value}")]
    InvalidCoordinate {
        /// Index of the invalid coordinate (0 = x, 1 = y).
        coordinate_index: usize,
        /// Value of the invalid coordinate, as a string.
        coordinate_value: String,
    },
}

/// Default relative degeneracy tolerance for `f32` circumcircle determinants.
pub const DEFAULT_TOLERANCE_F32: f32 = 1e-5;

/// Default relative degeneracy tolerance for `f64` circumcircle determinants.
///
/// The determinant of three points is a sum of three products; its rounding
/// error is a few ulps of the summed magnitudes, so `1e-12` leaves several
/// orders of magnitude of headroom above `f64::EPSILON`.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-12;

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Helper trait for checking finiteness of coordinates.
///
/// # Examples
///
/// ```
/// use delaunay_dual::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(3.25f64.is_finite_generic());
/// assert!(!f64::INFINITY.is_finite_generic());
/// assert!(!f32::NAN.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns true if the value is finite (not NaN or infinite).
    fn is_finite_generic(&self) -> bool;
}

macro_rules! impl_finite_check {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(float: f32, f64);

/// Equality of coordinates through [`OrderedFloat`].
///
/// `0.0` and `-0.0` are equal, and NaN equals itself.
///
/// ```
/// use delaunay_dual::geometry::traits::coordinate::OrderedEq;
///
/// assert!(1.0f64.ordered_eq(&1.0));
/// assert!(0.0f64.ordered_eq(&-0.0));
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// ```
pub trait OrderedEq {
    /// Compares two values for equality using ordered comparison semantics.
    fn ordered_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_ordered_eq {
    (float: $($t:ty),*) => {
        $(
            impl OrderedEq for $t {
                #[inline(always)]
                fn ordered_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }
        )*
    };
}

impl_ordered_eq!(float: f32, f64);

/// Total ordering of coordinates through [`OrderedFloat`], consistent with
/// [`OrderedEq`].
///
/// ```
/// use delaunay_dual::geometry::traits::coordinate::OrderedCmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(1.0f64.ordered_cmp(&2.0), Ordering::Less);
/// assert_eq!((-0.0f32).ordered_cmp(&0.0), Ordering::Equal);
/// ```
pub trait OrderedCmp {
    /// Returns the total order of `self` relative to `other`.
    fn ordered_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_ordered_cmp {
    (float: $($t:ty),*) => {
        $(
            impl OrderedCmp for $t {
                #[inline(always)]
                fn ordered_cmp(&self, other: &Self) -> Ordering {
                    OrderedFloat(*self).cmp(&OrderedFloat(*other))
                }
            }
        )*
    };
}

impl_ordered_cmp!(float: f32, f64);

/// Helper trait for hashing floating-point coordinates consistently with
/// [`OrderedEq`].
///
/// ```
/// use delaunay_dual::geometry::traits::coordinate::HashCoordinate;
/// use std::collections::hash_map::DefaultHasher;
/// use std::hash::Hasher;
///
/// let mut h1 = DefaultHasher::new();
/// let mut h2 = DefaultHasher::new();
/// 0.0f64.hash_scalar(&mut h1);
/// (-0.0f64).hash_scalar(&mut h2);
/// assert_eq!(h1.finish(), h2.finish());
/// ```
pub trait HashCoordinate {
    /// Hashes a single coordinate value into `state`.
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_hash_coordinate {
    (float: $($t:ty),*) => {
        $(
            impl HashCoordinate for $t {
                #[inline(always)]
                fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                    OrderedFloat(*self).hash(state);
                }
            }
        )*
    };
}

impl_hash_coordinate!(float: f32, f64);

/// Scalar type requirements for planar coordinates.
///
/// ```rust
/// use delaunay_dual::geometry::traits::coordinate::CoordinateScalar;
///
/// fn nearly_zero<T: CoordinateScalar>(value: T) -> bool {
///     value.abs() <= T::default_tolerance()
/// }
///
/// assert!(nearly_zero(1e-13_f64));
/// assert!(!nearly_zero(1e-3_f32));
/// ```
pub trait CoordinateScalar:
    Float
    + FiniteCheck
    + OrderedEq
    + OrderedCmp
    + HashCoordinate
    + Default
    + Debug
    + Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Returns the relative tolerance used to classify a circumcircle
    /// determinant as degenerate.
    ///
    /// - `f32`: `1e-5`
    /// - `f64`: `1e-12`
    fn default_tolerance() -> Self;
}

impl CoordinateScalar for f32 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F32
    }
}

impl CoordinateScalar for f64 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_check_rejects_special_values() {
        assert!(0.0f64.is_finite_generic());
        assert!(f64::MAX.is_finite_generic());
        assert!(!f64::NAN.is_finite_generic());
        assert!(!f64::NEG_INFINITY.is_finite_generic());
        assert!(!f32::INFINITY.is_finite_generic());
    }

    #[test]
    fn default_tolerances_are_type_specific() {
        assert!(f64::default_tolerance() < f64::from(f32::default_tolerance()));
        assert!(f64::default_tolerance() > f64::EPSILON);
        assert!(f32::default_tolerance() > f32::EPSILON);
    }

    #[test]
    fn ordered_traits_agree_on_signed_zero() {
        use std::collections::hash_map::DefaultHasher;

        assert!(0.0f64.ordered_eq(&-0.0));
        assert!(!1.0f32.ordered_eq(&1.5));
        assert_eq!(0.0f64.ordered_cmp(&-0.0), Ordering::Equal);
        assert_eq!(2.0f64.ordered_cmp(&-3.0), Ordering::Greater);

        let hash = |value: f64| {
            let mut hasher = DefaultHasher::new();
            value.hash_scalar(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(0.0), hash(-0.0));
        assert_ne!(hash(1.0), hash(2.0));
    }

    #[test]
    fn validation_error_display() {
        let err = CoordinateValidationError::InvalidCoordinate {
            coordinate_index: 1,
            coordinate_value: "NaN".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid coordinate at index 1: NaN");
    }
}
