// Index arithmetic for array-backed heaps.
//
// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree. With arity `A`, the children of `i`
// are stored contiguously.
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// ```
//
// The last level will often be incomplete.

/// The parent node
///
/// ```
/// use voxel_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(6), 2);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i > 0, "The root has no parent");
    (i - 1) / A
}

/// The first children
///
/// ```
/// use voxel_search::heap_primitives::index_first_children;
/// assert_eq!(index_first_children::<2>(0), 1);
/// assert_eq!(index_first_children::<2>(3), 7);
/// assert_eq!(index_first_children::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last children
///
/// ```
/// use voxel_search::heap_primitives::index_last_children;
/// assert_eq!(index_last_children::<2>(0), 2);
/// assert_eq!(index_last_children::<2>(6), 14);
/// assert_eq!(index_last_children::<4>(0), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

/// Index of the smallest element, the first one wins ties.
///
/// ```
/// use voxel_search::heap_primitives::index_min;
/// assert_eq!(index_min(&[3, 1, 2, 1]), 1);
/// assert_eq!(index_min(&[0]), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn index_min<T: PartialOrd>(xs: &[T]) -> usize {
    debug_assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}
