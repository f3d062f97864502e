/*!
Compilation of a key set into Teddy nibble tables.

A compiled table answers one question cheaply: given the last `sigma` bytes ending at
some position, which groups of keys could possibly end there?

Keys are packed into at most 8 groups so a group fits in one bit of a byte. For each of
the `sigma` trailing positions there's a table indexed by a byte's low nibble and another
indexed by its high nibble. A set bit in either means "a byte with this nibble here rules
the group out". Tables start with every bit set and bits are cleared for each nibble that
occurs among a group's keys at that position.

So a byte's class at position `i` is `lo[i][b & 0xf] | hi[i][b >> 4]`, and a group is hit
when none of the `sigma` classes exclude it. The nibbles are checked independently, so hits
are a superset of real matches and have to be verified.
*/

mod partition;

use std::fmt;

use crate::keys::{KeyId, KeySet};

/**
The longest suffix examined by the prefilter.
*/
pub const DEFAULT_SIGMA: usize = 3;

/**
The number of suffix positions the tables have room for.
*/
pub const MAX_SIGMA: usize = 4;

/**
The most groups a table can have, one per bit of a byte.
*/
pub const MAX_GROUPS: usize = 8;

/**
The greedy merge is quadratic in the number of distinct suffixes per step,
so past this many the compiler falls back to hash buckets.
*/
pub const MERGE_SEED_LIMIT: usize = 256;

/**
How keys are partitioned into groups.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partition {
    /**
    Use `Merge` for small key sets and `Bucket` for large ones.
    */
    #[default]
    Auto,
    /**
    Greedily merge groups to keep the number of false-positive hits low.
    */
    Merge,
    /**
    Hash each key's suffix into one of 8 buckets.
    */
    Bucket,
}

/**
A compiled set of nibble tables and the groups of keys they describe.

A table is built for a single matching call and never changes after that.
*/
#[derive(Clone)]
pub struct CompiledTable {
    sigma: usize,
    groups: Vec<Vec<KeyId>>,
    lo: [[u8; 16]; MAX_SIGMA],
    hi: [[u8; 16]; MAX_SIGMA],
}

impl fmt::Debug for CompiledTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        struct Tables<'a>(&'a [[u8; 16]]);

        impl<'a> fmt::Debug for Tables<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let mut list = f.debug_list();

                for row in self.0 {
                    list.entry(&format_args!("{:02x?}", row));
                }

                list.finish()
            }
        }

        f.debug_struct("CompiledTable")
            .field("sigma", &self.sigma)
            .field("groups", &self.groups)
            .field("lo", &Tables(&self.lo[..self.sigma]))
            .field("hi", &Tables(&self.hi[..self.sigma]))
            .finish()
    }
}

/**
Compile a key set into nibble tables.

Duplicate keys have already been collapsed by the [`KeySet`], and keys that could never be
the content of a JSON string are left out. If nothing is left the table has no groups and
can never produce a hit.
*/
pub fn compile(keys: &KeySet, partition: Partition) -> CompiledTable {
    let ids: Vec<KeyId> = keys
        .unique()
        .iter()
        .copied()
        .filter(|&key_id| KeySet::is_matchable(keys.key(key_id)))
        .collect();

    let sigma = match ids.iter().map(|&key_id| keys.key(key_id).len()).min() {
        Some(min_len) => min_len.min(DEFAULT_SIGMA),
        None => return CompiledTable::empty(),
    };

    // keys are never empty, but an empty table is the right answer if that changes
    if sigma == 0 {
        return CompiledTable::empty();
    }

    let mut groups = match partition {
        Partition::Merge => partition::merge(keys, &ids, sigma),
        Partition::Bucket => partition::bucket(keys, &ids, sigma),
        Partition::Auto => {
            if partition::count_suffixes(keys, &ids, sigma) <= MERGE_SEED_LIMIT {
                partition::merge(keys, &ids, sigma)
            } else {
                partition::bucket(keys, &ids, sigma)
            }
        }
    };

    groups.retain(|group| !group.is_empty());
    for group in &mut groups {
        group.sort_unstable();
    }
    groups.sort_unstable_by_key(|group| group[0]);

    test_assert!(groups.len() <= MAX_GROUPS);
    test_assert_eq!(ids.len(), groups.iter().map(Vec::len).sum::<usize>());

    let mut table = CompiledTable {
        sigma,
        groups,
        lo: [[0xff; 16]; MAX_SIGMA],
        hi: [[0xff; 16]; MAX_SIGMA],
    };

    for (group, group_keys) in table.groups.iter().enumerate() {
        let keep = !(1u8 << group);

        for &key_id in group_keys {
            let key = keys.key(key_id);
            let suffix = &key[key.len() - sigma..];

            for (i, &b) in suffix.iter().enumerate() {
                table.lo[i][(b & 0x0f) as usize] &= keep;
                table.hi[i][(b >> 4) as usize] &= keep;
            }
        }
    }

    table
}

impl CompiledTable {
    /**
    A table that can never produce a hit.
    */
    pub fn empty() -> Self {
        CompiledTable {
            sigma: 0,
            groups: Vec::new(),
            lo: [[0xff; 16]; MAX_SIGMA],
            hi: [[0xff; 16]; MAX_SIGMA],
        }
    }

    /**
    Whether this table has no groups to hit.
    */
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sigma == 0 || self.groups.is_empty()
    }

    /**
    The number of trailing bytes examined per position.
    */
    #[inline]
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /**
    The key identifiers in each group, in group order.
    */
    #[inline]
    pub fn groups(&self) -> &[Vec<KeyId>] {
        &self.groups
    }

    /**
    The number of non-empty groups, at most [`MAX_GROUPS`].
    */
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /**
    A mask with one bit set for each group that exists.
    */
    #[inline]
    pub fn group_mask(&self) -> u8 {
        ((1u16 << self.groups.len()) - 1) as u8
    }

    /**
    The low nibble table for suffix position `i`.
    */
    #[inline]
    pub fn lo(&self, i: usize) -> &[u8; 16] {
        &self.lo[i]
    }

    /**
    The high nibble table for suffix position `i`.
    */
    #[inline]
    pub fn hi(&self, i: usize) -> &[u8; 16] {
        &self.hi[i]
    }

    /**
    The groups ruled out by byte `b` at suffix position `i`.
    */
    #[inline(always)]
    pub fn class(&self, i: usize, b: u8) -> u8 {
        self.lo[i][(b & 0x0f) as usize] | self.hi[i][(b >> 4) as usize]
    }

    /**
    The groups that could have a key ending at `end` (inclusive).

    Positions before `sigma - 1` don't have enough lookback and never hit.
    */
    #[inline(always)]
    pub fn hits(&self, input: &[u8], end: usize) -> u8 {
        if self.is_empty() || end + 1 < self.sigma || end >= input.len() {
            return 0;
        }

        let window = &input[end + 1 - self.sigma..=end];

        let excluded = window
            .iter()
            .enumerate()
            .fold(0u8, |excluded, (i, &b)| excluded | self.class(i, b));

        !excluded & self.group_mask()
    }
}
