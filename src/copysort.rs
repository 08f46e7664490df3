//! Copy-assisted sort: when the caller supplies scratch at least as long as
//! the range being sorted, cache each element's key alongside its value in
//! scratch, sort the cached pairs there, then write the values back.
//!
//! Caching the key sidesteps the aliasing problem that forces
//! [`crate::suffix`] to thread `sa`/`isa` through its own specialized loop:
//! once the key is copied into `scratch`, sorting it no longer needs to read
//! `isa` at all, so the generic, independently-tested [`crate::introsort::quick`]
//! can be reused directly, with the naming callback only touching `isa` when
//! materialising a finished run back to `sa`.

use crate::introsort::{self, Direction};
use crate::suffix;
use cuneiform::cuneiform;

/// Below this many elements the extra copy and write-back cost more than the
/// locality they buy; matches the reference implementation's tuning.
pub(crate) const COPY_MIN: usize = 1024;

/// A cached `(value, key)` pair for the copy-assisted sort, laid out on a
/// cache line so a scan through `scratch` touches as few lines as possible.
#[cuneiform]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScratchSlot {
    /// The SA cell's value: a suffix start position.
    pub value: i64,
    /// `isa[value + depth]` at the time this slot was filled.
    pub key: i64,
}

/// Attempts a scratch-assisted sort of `sa[first..last]` by
/// `isa[sa[i] + depth]`. Returns `false` (doing nothing) if `scratch` is too
/// small or the range is below [`COPY_MIN`], in which case the caller should
/// fall back to [`crate::suffix::depth_quick`].
pub(crate) fn depth_quick_scratch(
    sa: &mut [i64],
    isa: &mut [i64],
    first: usize,
    last: usize,
    depth: i64,
    use_cb: bool,
    scratch: &mut [ScratchSlot],
) -> bool {
    let len = last - first;
    if len < COPY_MIN || scratch.len() < len {
        return false;
    }

    let buf = &mut scratch[..len];
    for (slot, i) in buf.iter_mut().zip(first..last) {
        let v = sa[i];
        *slot = ScratchSlot {
            value: v,
            key: isa[(v + depth) as usize],
        };
    }

    let dir = if use_cb { Direction::Rl } else { Direction::NoCb };
    let base = buf.as_ptr() as usize;
    introsort::quick(
        buf,
        |slot: ScratchSlot| slot.key,
        dir,
        |run: &mut [ScratchSlot], a, b| {
            // `a`/`b` are relative to `run`, which may itself be a sub-slice
            // of `buf` partway through the recursion; recover `run`'s own
            // offset into `buf` from its base pointer before indexing `sa`.
            let run_offset = (run.as_ptr() as usize - base) / std::mem::size_of::<ScratchSlot>();
            let (abs_a, abs_b) = (run_offset + a, run_offset + b);
            for (k, slot) in run[a..b].iter().enumerate() {
                sa[first + abs_a + k] = slot.value;
            }
            suffix::name(sa, isa, first + abs_a, first + abs_b, depth);
        },
    );

    if !use_cb {
        for (k, slot) in buf.iter().enumerate() {
            sa[first + k] = slot.value;
        }
    }
    true
}
