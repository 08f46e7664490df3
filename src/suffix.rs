//! The depth-aware suffix-sort driver: `daware`'s two phases (right-to-left
//! group descent, left-to-right induction) and the mutually recursive group
//! sorter (`group_partition` + `induce` + `name`) that does the actual work.
//!
//! Unlike [`crate::introsort`], this module never stores a `key` closure and
//! a mutating callback side by side: `sa`/`isa` are threaded through every
//! call as ordinary `&mut` parameters, and the depth-aware sort loop below
//! reads and writes them directly rather than through captured closures. Read
//! and write access are sequenced by normal borrow reborrowing, so nothing
//! here needs `unsafe`, see the module-level note in `introsort.rs` for why
//! that engine can't be reused directly for this part.

use crate::copysort::{self, ScratchSlot};
use crate::encoding::{embed_depth, flag_unique, is_final, neg_part, raw};
use crate::network;
use crate::partition;

const INSERTION_MAX: usize = 32;

/// Sorts `sa` (already bucketed by first character, see [`crate::bucket`])
/// into full lexicographic suffix order and reconstructs `isa` as its
/// inverse. Preconditions and postconditions are documented on the module.
pub fn daware(sa: &mut [i64], isa: &mut [i64]) {
    debug_assert_eq!(sa.len(), isa.len());
    log::debug!("daware: starting, n={}", sa.len());
    phase_a(sa, isa, None);
    phase_b(sa, isa);
    log::debug!("daware: finished");
}

/// As [`daware`], but uses `scratch` to cache keys for the top-level group
/// sorts when it is at least as long as the group being sorted, improving
/// cache locality (see [`crate::copysort`]). Output is identical to
/// [`daware`] regardless of whether `scratch` is used internally.
pub fn daware_with_scratch(sa: &mut [i64], isa: &mut [i64], scratch: &mut [ScratchSlot]) {
    debug_assert_eq!(sa.len(), isa.len());
    log::debug!(
        "daware_with_scratch: starting, n={}, scratch={}",
        sa.len(),
        scratch.len()
    );
    phase_a(sa, isa, Some(scratch));
    phase_b(sa, isa);
    log::debug!("daware_with_scratch: finished");
}

/// Phase A: walk SA right-to-left, sorting each non-trivial group by the key
/// of its *following* suffix (the group's next-smaller-suffix boundary finds
/// the group span via `isa[sa[gl-1]]`).
fn phase_a(sa: &mut [i64], isa: &mut [i64], mut scratch: Option<&mut [ScratchSlot]>) {
    let mut gl = sa.len();
    while gl > 1 {
        let gf = isa[sa[gl - 1] as usize] as usize;
        if gl - gf > 1 {
            log::trace!("phase A: group [{gf}, {gl})");
            group_partition(sa, isa, gf, gl, 1, scratch.as_deref_mut());
        } else {
            sa[gf] = flag_unique(sa[gf]);
        }
        gl = gf;
    }
}

/// Phase B: walk SA left-to-right over the finalised runs phase A produced,
/// sorting each (now unique-key) run with a plain `NOCB` sort and assigning
/// final names, then skipping over already-unique neighbours.
fn phase_b(sa: &mut [i64], isa: &mut [i64]) {
    let n = sa.len();
    let mut gf = 1usize;
    while gf < n {
        let mut gl = gf;
        while !is_final(sa[gl]) {
            gl += 1;
        }
        gl += 1;
        sa[gl - 1] = flag_unique(sa[gl - 1]);

        let n1 = isa[(sa[gf] + 1) as usize];
        let embedded = neg_part(n1);
        let depth = if embedded > 0 { embedded } else { 1 };
        log::trace!("phase B: induce [{gf}, {gl}) at depth {depth}");
        depth_quick(sa, isa, gf, gl, depth, false);
        for a in gf..gl {
            isa[sa[a] as usize] = a as i64;
        }

        gf = gl;
        while gf < n && is_final(sa[gf]) {
            sa[gf] = flag_unique(sa[gf]);
            isa[sa[gf] as usize] = gf as i64;
            gf += 1;
        }
    }
}

/// Partitions `[first,last)` into the finalised zone and the still-sortable
/// "S" zone by the group's own name, sorts the S zone, then induces the
/// tandem-repeat ("E") zone against both. Mirrors the reference
/// implementation's `group` + `induce` pair (see DESIGN.md).
fn group_partition(
    sa: &mut [i64],
    isa: &mut [i64],
    first: usize,
    last: usize,
    depth: i64,
    scratch: Option<&mut [ScratchSlot]>,
) {
    let group_name = first as i64;
    let (a, b) = {
        let isa_ref: &[i64] = isa;
        partition::partition3(&mut sa[first..last], |pos| isa_ref[(pos + depth) as usize], group_name)
    };
    let (af, bf) = (first + a, first + b);

    if let Some(scratch) = scratch {
        if !copysort::depth_quick_scratch(sa, isa, bf, last, depth, true, scratch) {
            depth_quick(sa, isa, bf, last, depth, true);
        }
    } else {
        depth_quick(sa, isa, bf, last, depth, true);
    }

    induce(sa, isa, first, af, bf, last, depth, group_name);
}

/// Bidirectional-partition / upper-induction / lower-induction tandem-repeat
/// inductor. `[a,b)` < group, `[b,e)` == group (the band being induced),
/// `[e,f)` > group.
#[allow(clippy::too_many_arguments)]
fn induce(
    sa: &mut [i64],
    isa: &mut [i64],
    mut a: usize,
    mut b: usize,
    mut e: usize,
    mut f: usize,
    depth: i64,
    mut group: i64,
) {
    if b == e {
        if a != b {
            sa[b - 1] = flag_unique(sa[b - 1]);
        }
        return;
    }

    let mut c = b;
    let mut d;

    while b != e && ((e - b) as i64) * 2 < ((b - a) + (f - e)) as i64 {
        let cgroup = b as i64;
        for &pos in &sa[b..e] {
            isa[pos as usize] = cgroup;
        }
        let (cc, dd) = {
            let isa_ref: &[i64] = isa;
            partition::partition3(&mut sa[b..e], |pos| isa_ref[(pos + depth) as usize], cgroup)
        };
        c = b + cc;
        d = b + dd;
        group = cgroup;

        depth_quick(sa, isa, d, e, depth, true);

        if a != b {
            sa[b - 1] = flag_unique(sa[b - 1]);
        }

        a = b;
        b = c;
        f = e;
        e = d;
    }

    // Induce the upper part ([e,f) scanned right-to-left, chasing
    // predecessors into a bucket growing down from e, repeating until a pass
    // finds nothing new).
    let mut allunique = false;
    if e != f {
        while !allunique {
            allunique = true;
            d = e;
            while e != f {
                let cell = sa[f - 1];
                allunique = allunique && is_final(cell);
                let v = raw(cell);
                if depth <= v && isa[(v - depth) as usize] == group {
                    d -= 1;
                    sa[d] = v - depth;
                }
                f -= 1;
            }
            depth_call_range(sa, isa, d, e, depth, true);
            f = e;
            e = d;
        }
    }

    // Finish inducing the upper part: everything left in [e,f) is already
    // final, so its predecessors (if in this group) are final too.
    d = e;
    while f != d {
        let v = !sa[f - 1];
        if depth <= v && isa[(v - depth) as usize] == group {
            d -= 1;
            sa[d] = flag_unique(v - depth);
            isa[(v - depth) as usize] = d as i64;
        }
        f -= 1;
    }

    // Induce the lower part ([a,b) scanned left-to-right, chasing
    // predecessors into a bucket growing up from c).
    while b != d {
        for it in a..b {
            let v = sa[it];
            if depth <= v && isa[(v - depth) as usize] == group {
                sa[c] = v - depth;
                c += 1;
            }
        }
        sa[b - 1] = flag_unique(sa[b - 1]);
        a = b;
        b = c;
    }
    if a != b {
        sa[b - 1] = flag_unique(sa[b - 1]);
    }
}

/// Equal-range callback fired by [`depth_quick`] on a maximal run `[a,b)`
/// sharing the same key at `depth`: assigns the run its new group name,
/// embeds the next sorting depth into the following ISA cell, and either
/// flags a singleton unique or recurses into [`group_partition`].
pub(crate) fn name(sa: &mut [i64], isa: &mut [i64], a: usize, b: usize, depth: i64) {
    let n = isa[(sa[a] + depth + 1) as usize];
    let embedded = neg_part(n);
    let ndepth = if embedded > 0 { depth + embedded } else { depth + 1 };
    for &pos in &sa[a..b] {
        isa[pos as usize] = a as i64;
        isa[(pos + 1) as usize] = embed_depth(ndepth);
    }
    if b - a < 2 {
        sa[a] = flag_unique(sa[a]);
    } else {
        group_partition(sa, isa, a, b, ndepth, None);
    }
}

/// The depth-aware specialization of [`crate::introsort::quick`]: sorts
/// `sa[first..last]` by `isa[sa[i] + depth]`, firing [`name`] on each maximal
/// equal-key run when `use_cb` is set (right-to-left order, matching phase
/// A's `quick<RL>`), or sorting plainly when it is not (phase B's
/// `quick<NOCB>`).
pub(crate) fn depth_quick(sa: &mut [i64], isa: &mut [i64], first: usize, last: usize, depth: i64, use_cb: bool) {
    let budget = network::ilog((last - first) as i64 + 1);
    depth_quick_budgeted(sa, isa, first, last, depth, use_cb, budget);
}

fn depth_quick_budgeted(
    sa: &mut [i64],
    isa: &mut [i64],
    mut first: usize,
    mut last: usize,
    depth: i64,
    use_cb: bool,
    mut budget: i32,
) {
    loop {
        let len = last - first;
        if len <= INSERTION_MAX {
            depth_insertion(sa, isa, first, last, depth);
            depth_call_range(sa, isa, first, last, depth, use_cb);
            return;
        }
        if budget == 0 {
            depth_heap_sort(sa, isa, first, last, depth);
            depth_call_range(sa, isa, first, last, depth, use_cb);
            return;
        }
        budget -= 1;

        let (p1, p2, p3) = {
            let isa_ref: &[i64] = isa;
            network::pivots(&sa[first..last], |pos| isa_ref[(pos + depth) as usize])
        };

        if p1 == p2 || p2 == p3 {
            let (lt, gt) = {
                let isa_ref: &[i64] = isa;
                partition::partition3(&mut sa[first..last], |pos| isa_ref[(pos + depth) as usize], p2)
            };
            let (af, bf) = (first + lt, first + gt);
            if use_cb {
                depth_quick_budgeted(sa, isa, bf, last, depth, use_cb, budget);
                name(sa, isa, af, bf, depth);
                last = af;
            } else {
                depth_quick_budgeted(sa, isa, first, af, depth, use_cb, budget);
                first = bf;
            }
        } else {
            let (a, b, d) = {
                let isa_ref: &[i64] = isa;
                partition::exchange3(&mut sa[first..last], |pos| isa_ref[(pos + depth) as usize], p1, p2, p3)
            };
            let (af, bf, df) = (first + a, first + b, first + d);
            if use_cb {
                depth_quick_budgeted(sa, isa, df, last, depth, use_cb, budget);
                depth_quick_budgeted(sa, isa, bf, df, depth, use_cb, budget);
                depth_quick_budgeted(sa, isa, af, bf, depth, use_cb, budget);
                last = af;
            } else {
                depth_quick_budgeted(sa, isa, first, af, depth, use_cb, budget);
                depth_quick_budgeted(sa, isa, af, bf, depth, use_cb, budget);
                depth_quick_budgeted(sa, isa, bf, df, depth, use_cb, budget);
                first = df;
            }
        }
    }
}

fn depth_insertion(sa: &mut [i64], isa: &mut [i64], first: usize, last: usize, depth: i64) {
    for i in (first + 1)..last {
        let tmp = sa[i];
        let val = isa[(tmp + depth) as usize];
        let mut j = i;
        while j > first && isa[(sa[j - 1] + depth) as usize] > val {
            sa[j] = sa[j - 1];
            j -= 1;
        }
        sa[j] = tmp;
    }
}

fn depth_heap_sort(sa: &mut [i64], isa: &mut [i64], first: usize, last: usize, depth: i64) {
    let len = last - first;
    for start in (0..len / 2).rev() {
        depth_sift_down(sa, isa, first, start, len, depth);
    }
    for end in (1..len).rev() {
        sa.swap(first, first + end);
        depth_sift_down(sa, isa, first, 0, end, depth);
    }
}

fn depth_sift_down(sa: &mut [i64], isa: &mut [i64], base: usize, mut root: usize, len: usize, depth: i64) {
    loop {
        let mut child = 2 * root + 1;
        if child >= len {
            return;
        }
        let key_at = |sa: &[i64], i: usize| isa[(sa[base + i] + depth) as usize];
        if child + 1 < len && key_at(sa, child + 1) > key_at(sa, child) {
            child += 1;
        }
        if key_at(sa, child) <= key_at(sa, root) {
            return;
        }
        sa.swap(base + root, base + child);
        root = child;
    }
}

pub(crate) fn depth_call_range(sa: &mut [i64], isa: &mut [i64], first: usize, last: usize, depth: i64, use_cb: bool) {
    if !use_cb {
        return;
    }
    let mut j = last;
    while j > first {
        let kj = isa[(sa[j - 1] + depth) as usize];
        let mut i = j - 1;
        while i > first && isa[(sa[i - 1] + depth) as usize] == kj {
            i -= 1;
        }
        name(sa, isa, i, j, depth);
        j = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::bucket_sort;

    fn run(s: &[u8]) -> (Vec<i64>, Vec<i64>) {
        let (mut sa, mut isa) = bucket_sort(s);
        daware(&mut sa, &mut isa);
        (sa, isa)
    }

    fn assert_inverse(sa: &[i64], isa: &[i64]) {
        for i in 0..sa.len() {
            assert_eq!(isa[sa[i] as usize], i as i64);
        }
    }

    fn assert_lex_order(s: &[u8], sa: &[i64]) {
        for w in sa.windows(2) {
            assert!(s[w[0] as usize..] < s[w[1] as usize..]);
        }
    }

    #[test]
    fn e1_banana() {
        let s = b"banana$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![6, 5, 3, 1, 0, 4, 2]);
        assert_inverse(&sa, &isa);
        assert_lex_order(s, &sa);
    }

    #[test]
    fn e2_mississippi() {
        let s = b"mississippi$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
        assert_inverse(&sa, &isa);
        assert_lex_order(s, &sa);
    }

    #[test]
    fn e3_all_same_char() {
        let s = b"aaaaaaa$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![7, 6, 5, 4, 3, 2, 1, 0]);
        assert_inverse(&sa, &isa);
        assert_lex_order(s, &sa);
    }

    #[test]
    fn e4_abcabcabc() {
        let s = b"abcabcabc$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![9, 6, 3, 0, 7, 4, 1, 8, 5, 2]);
        assert_inverse(&sa, &isa);
        assert_lex_order(s, &sa);
    }

    #[test]
    fn e5_abracadabra() {
        let s = b"abracadabra$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
        assert_inverse(&sa, &isa);
        assert_lex_order(s, &sa);
    }

    #[test]
    fn e6_single_sentinel() {
        let s = b"$";
        let (sa, isa) = run(s);
        assert_eq!(sa, vec![0]);
        assert_inverse(&sa, &isa);
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let s = b"abracadabra$";
        let (mut sa, mut isa) = run(s);
        let (sa0, isa0) = (sa.clone(), isa.clone());
        daware(&mut sa, &mut isa);
        assert_eq!(sa, sa0);
        assert_eq!(isa, isa0);
    }

    #[test]
    fn scratch_equivalence() {
        let s = b"mississippi$";
        let (sa_plain, isa_plain) = run(s);

        let (mut sa, mut isa) = bucket_sort(s);
        let mut scratch = vec![ScratchSlot { value: 0, key: 0 }; sa.len()];
        daware_with_scratch(&mut sa, &mut isa, &mut scratch);

        assert_eq!(sa, sa_plain);
        assert_eq!(isa, isa_plain);
    }

    #[test]
    fn no_residual_flags() {
        let s = b"abracadabra$";
        let (sa, isa) = run(s);
        assert!(sa.iter().all(|&x| x >= 0));
        assert!(isa.iter().all(|&x| x >= 0));
        let mut sorted = sa.clone();
        sorted.sort();
        assert_eq!(sorted, (0..sa.len() as i64).collect::<Vec<_>>());
    }
}
