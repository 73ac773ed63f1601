/*
  This file is part of an Ataxx game engine.

  This program is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  This program is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The transposition table: a fixed-size array of four-entry clusters,
//! shared without locks by every search (and perft) thread.
//!
//! Each entry is two `AtomicU64` words: `word_a` holds the payload and
//! `word_b` holds `key ^ payload`. A reader reconstructs the key as `word_a
//! ^ word_b` and compares it against the key it was looking for. Two
//! threads writing the same entry at once can tear the pair, but a torn
//! pair reconstructs to a key that (overwhelmingly likely) matches nothing,
//! so it is simply treated as a miss. No entry is ever read as valid data
//! under a key it wasn't written with.
//!
//! The payload itself is opaque to this module: callers pack whatever they
//! like into the low 64 bits, with one convention imposed here so that
//! replacement can stay generic: the low byte of the payload is always the
//! entry's depth, used to drive depth-preferred replacement.

use std::mem::size_of;
use std::sync::atomic::{AtomicU64, Ordering};

/// The number of entries sharing a single index. A whole cluster is probed
/// on every lookup and considered as a unit for replacement.
pub const CLUSTER_SIZE: usize = 4;

struct Entry {
    word_a: AtomicU64,
    word_b: AtomicU64,
}

impl Entry {
    const fn empty() -> Entry {
        Entry {
            word_a: AtomicU64::new(0),
            word_b: AtomicU64::new(0),
        }
    }
}

struct Bucket {
    entries: [Entry; CLUSTER_SIZE],
}

impl Bucket {
    fn empty() -> Bucket {
        Bucket {
            entries: [
                Entry::empty(),
                Entry::empty(),
                Entry::empty(),
                Entry::empty(),
            ],
        }
    }
}

/// A depth of 0 is indistinguishable from an unwritten slot, which is
/// exactly the property depth-preferred replacement wants: an empty slot
/// always looks shallower than any real entry and is filled first.
#[inline(always)]
const fn depth_of(payload: u64) -> u8 {
    (payload & 0xFF) as u8
}

/// A lock-free, shared transposition table. Used both by search (to store
/// `(move, bound, depth, score)` tuples, see [`crate::search`]) and by
/// perft (to store `(depth, node count)` pairs, see [`crate::perft`]):
/// both packings reserve the low byte of the payload for depth, the one
/// convention this module relies on.
pub struct TTable {
    buckets: Box<[Bucket]>,
    capacity: usize,
}

impl TTable {
    #[must_use]
    /// Build a table sized to use approximately `size_mb` mebibytes. Sizes
    /// below one bucket are rounded up to a single bucket.
    pub fn with_size_mb(size_mb: usize) -> TTable {
        let bucket_bytes = size_of::<Bucket>();
        let capacity = (size_mb.max(1) * 1024 * 1024 / bucket_bytes).max(1);
        let buckets = (0..capacity).map(|_| Bucket::empty()).collect();
        TTable { buckets, capacity }
    }

    /// Replace the table's contents with a freshly allocated, empty table
    /// of the requested size.
    pub fn resize(&mut self, size_mb: usize) {
        *self = TTable::with_size_mb(size_mb);
    }

    /// Zero every entry in place without reallocating.
    pub fn clear(&self) {
        for bucket in self.buckets.iter() {
            for entry in &bucket.entries {
                entry.word_a.store(0, Ordering::Relaxed);
                entry.word_b.store(0, Ordering::Relaxed);
            }
        }
    }

    #[must_use]
    /// The table's size, in mebibytes.
    pub fn size_mb(&self) -> usize {
        self.capacity * size_of::<Bucket>() / (1024 * 1024)
    }

    #[inline(always)]
    fn index_for(&self, key: u64) -> usize {
        (key % self.capacity as u64) as usize
    }

    #[must_use]
    /// Look up `key`'s cluster and return the payload of the entry whose
    /// reconstructed key matches, or `0` (indistinguishable from an empty
    /// entry, which is the point) if none does.
    pub fn probe(&self, key: u64) -> u64 {
        let bucket = &self.buckets[self.index_for(key)];
        for entry in &bucket.entries {
            let word_a = entry.word_a.load(Ordering::Acquire);
            let word_b = entry.word_b.load(Ordering::Acquire);
            if word_a == 0 && word_b == 0 {
                continue;
            }
            if word_a ^ word_b == key {
                return word_a;
            }
        }
        0
    }

    /// Store `payload` under `key`, replacing whichever entry in the
    /// cluster has the shallowest depth (ties broken toward the first
    /// entry found, which includes any still-empty slot).
    pub fn write(&self, key: u64, payload: u64) {
        let bucket = &self.buckets[self.index_for(key)];
        let mut victim = &bucket.entries[0];
        let mut shallowest = u8::MAX;
        for entry in &bucket.entries {
            let depth = depth_of(entry.word_a.load(Ordering::Relaxed));
            if depth < shallowest {
                shallowest = depth;
                victim = entry;
            }
        }
        victim.word_a.store(payload, Ordering::Release);
        victim.word_b.store(key ^ payload, Ordering::Release);
    }

    #[must_use]
    /// The fraction of entries in use, in permille, as reported by the
    /// `hashfull` field of a protocol `info` line. Scans the whole table,
    /// which is fine: it is only called a handful of times per search.
    pub fn fill_rate_permille(&self) -> u16 {
        let total = self.capacity * CLUSTER_SIZE;
        if total == 0 {
            return 0;
        }
        let used: usize = self
            .buckets
            .iter()
            .flat_map(|bucket| bucket.entries.iter())
            .filter(|entry| entry.word_a.load(Ordering::Relaxed) != 0)
            .count();
        ((used * 1000) / total) as u16
    }
}

impl Default for TTable {
    fn default() -> TTable {
        TTable::with_size_mb(crate::config::DEFAULT_HASH_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_written_entry() {
        let tt = TTable::with_size_mb(1);
        tt.write(0xdead_beef, 0x42);
        assert_eq!(tt.probe(0xdead_beef), 0x42);
    }

    #[test]
    fn probe_misses_an_unwritten_key() {
        let tt = TTable::with_size_mb(1);
        assert_eq!(tt.probe(123), 0);
    }

    #[test]
    fn distinct_keys_in_the_same_cluster_do_not_clobber_each_other() {
        let tt = TTable::with_size_mb(1);
        // These two keys land in the same bucket when capacity == 1.
        tt.write(1, 0x10);
        tt.write(2, 0x20);
        assert_eq!(tt.probe(1), 0x10);
        assert_eq!(tt.probe(2), 0x20);
    }

    #[test]
    fn a_fifth_write_to_a_single_cluster_evicts_the_shallowest_entry() {
        let tt = TTable::with_size_mb(1);
        // `index_for` reduces a key mod capacity, so keys spaced exactly
        // `capacity` apart all land in the same bucket regardless of how
        // large the table is.
        let capacity = tt.capacity as u64;
        let k0 = 10;
        let k1 = k0 + capacity;
        let k2 = k0 + 2 * capacity;
        let k3 = k0 + 3 * capacity;
        let k4 = k0 + 4 * capacity;
        // Depths are packed into the low byte, deepest entry wins survival.
        tt.write(k0, 5); // depth 5
        tt.write(k1, 4); // depth 4
        tt.write(k2, 3); // depth 3
        tt.write(k3, 2); // depth 2
        // All four slots are full; a fifth write should evict k3 (the
        // shallowest, depth 2).
        tt.write(k4, 9); // depth 9
        assert_eq!(tt.probe(k3), 0);
        assert_eq!(tt.probe(k4), 9);
        assert_eq!(tt.probe(k0), 5);
    }

    #[test]
    fn clear_empties_every_entry() {
        let tt = TTable::with_size_mb(1);
        tt.write(7, 77);
        tt.clear();
        assert_eq!(tt.probe(7), 0);
    }

    #[test]
    fn resize_discards_old_entries() {
        let mut tt = TTable::with_size_mb(1);
        tt.write(7, 77);
        tt.resize(2);
        assert_eq!(tt.probe(7), 0);
        assert_eq!(tt.size_mb(), 2);
    }

    #[test]
    fn fill_rate_reflects_written_entries() {
        let tt = TTable::with_size_mb(1);
        assert_eq!(tt.fill_rate_permille(), 0);
        tt.write(1, 9);
        assert!(tt.fill_rate_permille() > 0);
    }
}
