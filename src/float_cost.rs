use std::cmp::Eq;
use std::fmt::Debug;

use derive_more::Display;
use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::coords::Coords;
use crate::cost::Cost;

/// A floating point cost with a total order.
///
/// Used for euclidean distances between graph nodes, where integer steps
/// don't fit.
#[derive(Copy, Clone, Default, Debug, Display)]
#[repr(transparent)]
#[display("{_0:.3}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> Cost for FloatCost<F>
where
    FloatCost<F>: Debug + std::ops::AddAssign + Ord + Eq + UpperBounded,
    F: FloatCore + std::fmt::Display,
{
}

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat::infinity())
    }

    #[inline(always)]
    pub fn get(&self) -> F {
        self.0.0
    }
}

impl FloatCost<f64> {
    /// The straight-line distance between two blocks.
    #[inline(always)]
    pub fn between(a: &Coords, b: &Coords) -> Self {
        Self::new(a.distance(b))
    }
}

impl<F> std::ops::Add for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl<F> std::ops::Sub for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl<F> std::ops::Mul for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl<F> std::ops::AddAssign for FloatCost<F>
where
    F: FloatCore,
{
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}
// Float addition already saturates at infinity.
impl<F> SaturatingAdd for FloatCost<F>
where
    F: FloatCore,
{
    fn saturating_add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F> Zero for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat::zero()
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat::zero())
    }
}
impl<F> One for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn one() -> Self {
        Self(OrderedFloat::one())
    }
}
impl<F> UpperBounded for FloatCost<F>
where
    F: FloatCore,
{
    fn max_value() -> Self {
        Self(OrderedFloat::<F>::infinity())
    }
}

impl<F> PartialOrd for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(&other.0))
    }
}
impl<F> Ord for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
impl<F> PartialEq for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}
impl<F> Eq for FloatCost<F> where F: FloatCore {}
