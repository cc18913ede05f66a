use derive_more::Display;

use crate::cost::Cost;

/// How promising an open node is.
///
/// `g` is the cost from the start and `f` is `g` plus the heuristic estimate
/// to the destination. Scores compare by `f` first, and tie break for lower
/// `g`.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord)]
#[display("(f:{f}, g:{g})")]
pub struct Score<C: Cost> {
    f: C,
    g: C,
}

impl<C> Score<C>
where
    C: Cost,
{
    #[inline(always)]
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            g,
        }
    }

    /// The score of a start node.
    #[inline(always)]
    pub fn origin() -> Self {
        Self {
            f: C::zero(),
            g: C::zero(),
        }
    }

    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
    #[inline(always)]
    pub fn h(&self) -> C {
        self.f - self.g
    }

    /// Whether reaching a node with this score beats having reached it with
    /// `other`.
    #[inline(always)]
    pub fn improves_on(&self, other: &Self) -> bool {
        self.g < other.g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking() {
        let low = Score::<u32>::new(2, 0);
        let high = Score::<u32>::new(2, 1);
        assert!(low < high);
        assert!(high == Score::new(2, 1));

        // Same f-value, breaks ties on g
        let near = Score::<u32>::new(1, 3);
        let far = Score::<u32>::new(3, 1);
        assert_eq!(near.f(), far.f());
        assert!(near < far);
        assert_eq!(far.h(), 1);
    }

    #[test]
    fn improvement_only_looks_at_g() {
        let a = Score::<u32>::new(5, 100);
        let b = Score::<u32>::new(10, 0);
        assert!(a.improves_on(&b));
        assert!(!b.improves_on(&a));
        assert!(!a.improves_on(&a));
    }

    #[test]
    fn saturates() {
        let s = Score::<u32>::new(u32::MAX - 1, 10);
        assert_eq!(s.f(), u32::MAX);
        assert!(Score::<u32>::origin() < s);
    }
}
