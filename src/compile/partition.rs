/*!
Strategies for packing keys into at most [`MAX_GROUPS`] groups.
*/

use std::{
    collections::{hash_map::DefaultHasher, HashMap, HashSet},
    hash::{Hash, Hasher},
};

use super::{MAX_GROUPS, MAX_SIGMA};
use crate::keys::{KeyId, KeySet};

/**
A candidate group: its keys and the nibbles they use at each suffix position.
*/
#[derive(Debug, Clone)]
struct Seed {
    ids: Vec<KeyId>,
    nibbles: Nibbles,
    score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Nibbles {
    lo: [u16; MAX_SIGMA],
    hi: [u16; MAX_SIGMA],
}

impl Nibbles {
    fn of(suffix: &[u8]) -> Self {
        let mut nibbles = Nibbles::default();

        for (i, &b) in suffix.iter().enumerate() {
            nibbles.lo[i] |= 1 << (b & 0x0f);
            nibbles.hi[i] |= 1 << (b >> 4);
        }

        nibbles
    }

    #[inline]
    fn union(&self, other: &Nibbles) -> Nibbles {
        let mut union = *self;

        for i in 0..MAX_SIGMA {
            union.lo[i] |= other.lo[i];
            union.hi[i] |= other.hi[i];
        }

        union
    }

    /**
    The ambiguity of a group: the number of `sigma`-byte windows its tables would accept.
    */
    #[inline]
    fn score(&self, sigma: usize) -> u64 {
        (0..sigma)
            .map(|i| (self.lo[i].count_ones() * self.hi[i].count_ones()) as u64)
            .product()
    }
}

fn suffix<'k>(keys: &KeySet<'k>, key_id: KeyId, sigma: usize) -> &'k [u8] {
    let key = keys.key(key_id);
    &key[key.len() - sigma..]
}

/**
Seed one group per distinct suffix, in order of first appearance.
*/
fn seeds(keys: &KeySet, ids: &[KeyId], sigma: usize) -> Vec<Seed> {
    let mut seeds: Vec<Seed> = Vec::new();
    let mut by_suffix: HashMap<&[u8], usize> = HashMap::new();

    for &key_id in ids {
        let suffix = suffix(keys, key_id, sigma);

        match by_suffix.get(suffix) {
            Some(&index) => seeds[index].ids.push(key_id),
            None => {
                let nibbles = Nibbles::of(suffix);

                by_suffix.insert(suffix, seeds.len());
                seeds.push(Seed {
                    ids: vec![key_id],
                    nibbles,
                    score: nibbles.score(sigma),
                });
            }
        }
    }

    seeds
}

/**
The number of distinct `sigma`-byte suffixes among the keys.
*/
pub(super) fn count_suffixes(keys: &KeySet, ids: &[KeyId], sigma: usize) -> usize {
    ids.iter()
        .map(|&key_id| suffix(keys, key_id, sigma))
        .collect::<HashSet<_>>()
        .len()
}

/**
Greedily merge groups until at most [`MAX_GROUPS`] remain.

Each step merges the pair whose union adds the least ambiguity on top of what the two
groups already had. Merging groups with overlapping nibbles can reduce the total, so those
merges are taken first. Ties go to the lowest pair of indexes.
*/
pub(super) fn merge(keys: &KeySet, ids: &[KeyId], sigma: usize) -> Vec<Vec<KeyId>> {
    let mut seeds = seeds(keys, ids, sigma);

    while seeds.len() > MAX_GROUPS {
        let mut best: Option<(i64, usize, usize, Nibbles, u64)> = None;

        for a in 0..seeds.len() {
            for b in (a + 1)..seeds.len() {
                let union = seeds[a].nibbles.union(&seeds[b].nibbles);
                let score = union.score(sigma);

                let delta = score as i64 - seeds[a].score as i64 - seeds[b].score as i64;

                if best.map_or(true, |(best_delta, ..)| delta < best_delta) {
                    best = Some((delta, a, b, union, score));
                }
            }
        }

        let (_, a, b, nibbles, score) = match best {
            Some(best) => best,
            None => break,
        };

        // `b > a` so removing it doesn't move `a`
        let merged = seeds.remove(b);

        let seed = &mut seeds[a];
        seed.ids.extend(merged.ids);
        seed.nibbles = nibbles;
        seed.score = score;
    }

    seeds.into_iter().map(|seed| seed.ids).collect()
}

/**
Hash each key's suffix into one of [`MAX_GROUPS`] buckets.

`DefaultHasher::new` always uses the same keys, so the partition is deterministic.
*/
pub(super) fn bucket(keys: &KeySet, ids: &[KeyId], sigma: usize) -> Vec<Vec<KeyId>> {
    let mut buckets: [Vec<KeyId>; MAX_GROUPS] = Default::default();

    for &key_id in ids {
        let mut hasher = DefaultHasher::new();
        suffix(keys, key_id, sigma).hash(&mut hasher);

        let bucket = (hasher.finish() as usize) & (MAX_GROUPS - 1);
        buckets[bucket].push(key_id);
    }

    buckets
        .into_iter()
        .filter(|bucket| !bucket.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_counts_accepted_windows() {
        assert_eq!(1, Nibbles::of(b"abc").score(3));

        // `a` and `b` differ in their low nibble only
        let union = Nibbles::of(b"a").union(&Nibbles::of(b"b"));
        assert_eq!(2, union.score(1));

        // `a` (0x61) and `R` (0x52) differ in both nibbles, so `Q` and `b` sneak in
        let union = Nibbles::of(b"a").union(&Nibbles::of(b"R"));
        assert_eq!(4, union.score(1));
    }

    #[test]
    fn identical_suffixes_share_a_seed() {
        let keys = KeySet::new(&["user_id", "order_id", "name"]).unwrap();
        let seeds = seeds(&keys, keys.unique(), 3);

        assert_eq!(2, seeds.len());
        assert_eq!(vec![0, 1], seeds[0].ids);
        assert_eq!(vec![2], seeds[1].ids);
    }

    #[test]
    fn merge_stops_at_max_groups() {
        let keys: Vec<String> = (0..30).map(|i| format!("k{:02}", i)).collect();
        let set = KeySet::new(&keys).unwrap();

        let groups = merge(&set, set.unique(), 3);

        assert_eq!(MAX_GROUPS, groups.len());
        assert_eq!(30, groups.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn merge_leaves_small_sets_alone() {
        let set = KeySet::new(&["abc", "def", "ghi"]).unwrap();

        let groups = merge(&set, set.unique(), 3);

        assert_eq!(vec![vec![0], vec![1], vec![2]], groups);
    }

    #[test]
    fn bucket_is_deterministic() {
        let keys: Vec<String> = (0..100).map(|i| format!("field{}", i)).collect();
        let set = KeySet::new(&keys).unwrap();

        let first = bucket(&set, set.unique(), 3);
        let second = bucket(&set, set.unique(), 3);

        assert_eq!(first, second);
        assert!(first.len() <= MAX_GROUPS);
        assert_eq!(100, first.iter().map(Vec::len).sum::<usize>());
    }
}
