//! Sorting-network primitives used to pick pivots for [`crate::introsort`] and
//! the depth-aware suffix sort.
//!
//! These are small, branch-light comparator networks: conditional swap/min/max
//! on scalar keys, and fixed networks that return the median of 3, 5, 7 or 15
//! values without a general sort.

/// Conditionally swaps `a` and `b` so that `a <= b` afterwards.
#[inline(always)]
pub(crate) fn cswap(a: &mut i64, b: &mut i64) {
    if *b < *a {
        std::mem::swap(a, b);
    }
}

#[inline(always)]
pub(crate) fn cmovl(a: &mut i64, b: i64) {
    if b < *a {
        *a = b;
    }
}

#[inline(always)]
pub(crate) fn cmovg(a: i64, b: &mut i64) {
    if *b < a {
        *b = a;
    }
}

/// Returns the median of three values using a 3-comparator sorting network.
pub(crate) fn median3(mut a: i64, mut b: i64, c: i64) -> i64 {
    let mut c = c;
    cswap(&mut a, &mut c);
    cmovg(a, &mut b);
    cmovl(&mut b, c);
    b
}

/// Returns the median of five values using a 5-comparator sorting network.
pub(crate) fn median5(mut a: i64, mut b: i64, mut c: i64, mut d: i64, mut e: i64) -> i64 {
    cswap(&mut a, &mut b);
    cswap(&mut d, &mut e);
    cswap(&mut c, &mut e);
    cswap(&mut c, &mut d);
    cswap(&mut a, &mut d);
    cmovg(a, &mut c);
    cmovl(&mut b, e);
    cmovl(&mut b, d);
    cmovg(b, &mut c);
    c
}

/// Sorts seven keys with a fixed network and returns the 1st, 3rd and 5th
/// ranks (three candidate pivots, low < mid < high).
pub(crate) fn median7(keys: [i64; 7]) -> (i64, i64, i64) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g] = keys;

    cswap(&mut c, &mut g);
    cswap(&mut a, &mut e);
    cswap(&mut b, &mut f);
    cswap(&mut e, &mut g);
    cswap(&mut a, &mut c);
    cswap(&mut b, &mut d);
    cswap(&mut c, &mut e);
    cswap(&mut d, &mut f);
    cmovg(a, &mut b);
    cswap(&mut e, &mut f);
    cswap(&mut c, &mut d);
    cswap(&mut b, &mut e);
    cswap(&mut d, &mut g);
    cmovl(&mut b, c);
    cmovl(&mut d, e);
    cmovl(&mut f, g);

    (b, d, f)
}

/// Sorts fifteen keys with a fixed network and returns the 4th, 8th and 12th
/// ranks (three candidate pivots spanning the middle of the range).
pub(crate) fn median15(keys: [i64; 15]) -> (i64, i64, i64) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h, mut i, mut j, mut k, mut l, mut m, mut n, mut o] =
        keys;

    cswap(&mut a, &mut b);
    cswap(&mut c, &mut d);
    cswap(&mut e, &mut f);
    cswap(&mut g, &mut h);
    cswap(&mut i, &mut j);
    cswap(&mut k, &mut l);
    cswap(&mut m, &mut n);
    cswap(&mut a, &mut c);
    cswap(&mut e, &mut g);
    cswap(&mut i, &mut k);
    cswap(&mut m, &mut o);
    cswap(&mut b, &mut d);
    cswap(&mut f, &mut h);
    cswap(&mut j, &mut l);
    cswap(&mut a, &mut e);
    cswap(&mut i, &mut m);
    cswap(&mut b, &mut f);
    cswap(&mut j, &mut n);
    cswap(&mut c, &mut g);
    cswap(&mut k, &mut o);
    cswap(&mut d, &mut h);
    cmovg(a, &mut i);
    cswap(&mut b, &mut j);
    cswap(&mut c, &mut k);
    cswap(&mut d, &mut l);
    cswap(&mut e, &mut m);
    cswap(&mut f, &mut n);
    cswap(&mut g, &mut o);
    cswap(&mut f, &mut k);
    cswap(&mut g, &mut j);
    cswap(&mut d, &mut m);
    cswap(&mut n, &mut o);
    cswap(&mut h, &mut l);
    cswap(&mut b, &mut c);
    cswap(&mut e, &mut i);
    cmovg(b, &mut e);
    cswap(&mut h, &mut n);
    cswap(&mut c, &mut i);
    cmovl(&mut l, o);
    cmovg(c, &mut e);
    cswap(&mut f, &mut g);
    cswap(&mut j, &mut k);
    cmovl(&mut l, n);
    cswap(&mut d, &mut i);
    cswap(&mut h, &mut m);
    cswap(&mut g, &mut i);
    cmovg(k, &mut m);
    cswap(&mut d, &mut f);
    cmovl(&mut h, j);
    cmovl(&mut d, e);
    cmovg(f, &mut g);
    cmovl(&mut h, i);
    cmovl(&mut l, m);
    cmovg(g, &mut h);

    (d, h, l)
}

/// `floor(3 * floor(log2(v)) / 2)`, the introsort recursion budget for a
/// partition of length `v`.
pub(crate) fn ilog(v: i64) -> i32 {
    debug_assert!(v > 0);
    let bits = 63 - v.leading_zeros() as i32;
    (3 * bits) >> 1
}

/// Length thresholds at which the pivot-selection strategy changes.
pub(crate) const MEDIAN21: i64 = 256;
pub(crate) const MEDIAN65: i64 = 8192;

/// Picks three candidate pivots for `items`, choosing median-of-7,
/// pseudo-median-of-21 or pseudo-median-of-65 depending on length, exactly as
/// the reference three-pivot introsort does.
pub(crate) fn pivots<T: Copy>(items: &[T], key: impl Fn(T) -> i64) -> (i64, i64, i64) {
    let len = items.len() as i64;
    let at = |i: i64| key(items[i as usize]);

    if len < MEDIAN21 {
        median7([at(0), at(1), at(2), at(3), at(4), at(5), at(6)])
    } else if len < MEDIAN65 {
        let mid = len / 2;
        let (a1, b1, c1) = median7([at(0), at(1), at(2), at(3), at(4), at(5), at(6)]);
        let (a2, b2, c2) = median7([
            at(mid - 4),
            at(mid - 3),
            at(mid - 2),
            at(mid - 1),
            at(mid),
            at(mid + 1),
            at(mid + 2),
        ]);
        let (a3, b3, c3) = median7([
            at(len - 8),
            at(len - 7),
            at(len - 6),
            at(len - 5),
            at(len - 4),
            at(len - 3),
            at(len - 2),
        ]);
        (
            median3(a1, a2, a3),
            median3(b1, b2, b3),
            median3(c1, c2, c3),
        )
    } else {
        let lower = len / 4;
        let middle = len / 2;
        let upper = len * 3 / 4;
        let group15 = |base: i64| {
            median15([
                at(base),
                at(base + 1),
                at(base + 2),
                at(base + 3),
                at(base + 4),
                at(base + 5),
                at(base + 6),
                at(base + 7),
                at(base + 8),
                at(base + 9),
                at(base + 10),
                at(base + 11),
                at(base + 12),
                at(base + 13),
                at(base + 14),
            ])
        };
        let (a1, b1, c1) = group15(0);
        let (a2, b2, c2) = group15(lower - 8);
        let (a3, b3, c3) = group15(middle - 8);
        let (a4, b4, c4) = group15(upper - 8);
        let (a5, b5, c5) = group15(len - 16);
        (
            median5(a1, a2, a3, a4, a5),
            median5(b1, b2, b3, b4, b5),
            median5(c1, c2, c3, c4, c5),
        )
    }
}
