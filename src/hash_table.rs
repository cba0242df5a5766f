use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Index;
use core::ops::IndexMut;

use log::trace;

cfg_if::cfg_if! {
    if #[cfg(feature = "sixteen-way")] {
        /// Number of slots in a neighborhood.
        pub const HOP_RANGE: usize = 16;
        type HopBits = u16;
    } else if #[cfg(feature = "sixty-four-way")] {
        /// Number of slots in a neighborhood.
        pub const HOP_RANGE: usize = 64;
        type HopBits = u64;
    } else {
        /// Number of slots in a neighborhood.
        pub const HOP_RANGE: usize = 32;
        type HopBits = u32;
    }
}

/// Which slots of a home's neighborhood hold entries belonging to that home.
///
/// Bit `n` is set iff slot `home + n` (circularly) holds an entry whose home
/// is this slot.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
struct HopInfo {
    neighbors: HopBits,
}

impl HopInfo {
    #[inline(always)]
    fn candidates(self) -> HopBits {
        self.neighbors
    }

    /// Candidates at neighbor indices strictly below `n_index`.
    #[inline(always)]
    fn candidates_before(self, n_index: usize) -> HopBits {
        debug_assert!(n_index < HOP_RANGE);
        self.neighbors & ((1 << n_index) - 1)
    }

    #[inline(always)]
    fn set(&mut self, n_index: usize) {
        debug_assert!(n_index < HOP_RANGE);
        debug_assert_eq!(self.neighbors & (1 << n_index), 0);
        self.neighbors |= 1 << n_index;
    }

    #[inline(always)]
    fn clear(&mut self, n_index: usize) {
        debug_assert!(n_index < HOP_RANGE);
        debug_assert_ne!(self.neighbors & (1 << n_index), 0);
        self.neighbors &= !(1 << n_index);
    }
}

/// No empty slot could be brought into the requested neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NoVacancy;

/// Circular hopscotch slot array.
///
/// The table knows nothing about keys or hashing: callers pass the home slot
/// of every entry they look up, place or take, and supply a home function
/// when rehashing. The table maintains the neighborhood invariant, i.e. every
/// entry lives less than [`HOP_RANGE`] slots after its home, and the hop map
/// that records where each home's entries are.
#[derive(Clone)]
pub(crate) struct HashTable<T> {
    slots: Box<[Option<T>]>,
    hopmap: Box<[HopInfo]>,
    populated: usize,
}

impl<T> Debug for HashTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;

        f.debug_struct("HashTable")
            .field(
                "hopmap",
                &self
                    .hopmap
                    .iter()
                    .enumerate()
                    .filter(|(_, hop)| hop.candidates() != 0)
                    .map(|(home, hop)| {
                        let mut offsets = Vec::new();
                        let mut mask = hop.candidates();
                        while mask != 0 {
                            offsets.push(mask.trailing_zeros());
                            mask &= mask - 1;
                        }
                        format!("{home:>4}: {offsets:?}")
                    })
                    .collect::<Vec<_>>(),
            )
            .field(
                "popmap",
                &self
                    .slots
                    .chunks(HOP_RANGE)
                    .map(|chunk| {
                        chunk
                            .iter()
                            .map(|slot| if slot.is_some() { '#' } else { '.' })
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T> HashTable<T> {
    /// Creates an empty table of exactly `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity >= HOP_RANGE);

        Self {
            slots: (0..capacity).map(|_| None).collect(),
            hopmap: vec![HopInfo::default(); capacity].into_boxed_slice(),
            populated: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.populated == 0
    }

    #[inline(always)]
    fn absolute_index(&self, root: usize, n_index: usize) -> usize {
        (root + n_index) % self.capacity()
    }

    #[inline(always)]
    fn distance(&self, from: usize, to: usize) -> usize {
        (to + self.capacity() - from) % self.capacity()
    }

    /// Searches the neighborhood of `home` for an entry matching `eq` and
    /// returns its slot index.
    #[inline]
    pub(crate) fn find(&self, home: usize, eq: impl Fn(&T) -> bool) -> Option<usize> {
        let mut neighborhood_mask = self.hopmap[home].candidates();
        while neighborhood_mask != 0 {
            let n_index = neighborhood_mask.trailing_zeros() as usize;
            neighborhood_mask &= neighborhood_mask - 1;

            let index = self.absolute_index(home, n_index);
            if self.slots[index].as_ref().is_some_and(&eq) {
                return Some(index);
            }
        }

        None
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Finds an empty slot inside the neighborhood of `home`, hopping entries
    /// toward their own homes to make one if needed.
    ///
    /// The nearest empty slot after `home` is located first. While it lies
    /// outside the neighborhood, an entry sitting before it whose own
    /// neighborhood still covers it is moved into it, and the search continues
    /// from the vacated slot. If no such entry exists, [`NoVacancy`] is
    /// returned; hops already made are valid moves, so the table stays
    /// consistent.
    pub(crate) fn find_vacancy(&mut self, home: usize) -> Result<usize, NoVacancy> {
        let mut empty_distance = (0..self.capacity())
            .find(|&n_index| self.slots[self.absolute_index(home, n_index)].is_none())
            .ok_or(NoVacancy)?;

        while empty_distance >= HOP_RANGE {
            let empty_idx = self.absolute_index(home, empty_distance);
            let Some((root, from, to)) = self.find_movable(empty_idx) else {
                return Err(NoVacancy);
            };

            let moved_idx = self.absolute_index(root, from);
            debug_assert!(self.slots[empty_idx].is_none());
            self.slots[empty_idx] = self.slots[moved_idx].take();
            self.hopmap[root].clear(from);
            self.hopmap[root].set(to);

            trace!("hopped slot {moved_idx} to {empty_idx} (home {root})");
            empty_distance -= to - from;
        }

        Ok(self.absolute_index(home, empty_distance))
    }

    /// Looks for an entry that may move into `empty_idx`, preferring the
    /// longest hop. Returns its home, its current neighbor index and the
    /// neighbor index `empty_idx` has relative to that home.
    fn find_movable(&self, empty_idx: usize) -> Option<(usize, usize, usize)> {
        for to in (1..HOP_RANGE).rev() {
            let root = self.absolute_index(empty_idx, self.capacity() - to);
            let candidates = self.hopmap[root].candidates_before(to);
            if candidates != 0 {
                return Some((root, candidates.trailing_zeros() as usize, to));
            }
        }

        None
    }

    /// Stores `value` at `index`, which must be empty and inside the
    /// neighborhood of `home` (as returned by [`find_vacancy`]).
    ///
    /// [`find_vacancy`]: HashTable::find_vacancy
    pub(crate) fn place(&mut self, home: usize, index: usize, value: T) -> &mut T {
        let n_index = self.distance(home, index);
        debug_assert!(n_index < HOP_RANGE);
        debug_assert!(self.slots[index].is_none());

        self.hopmap[home].set(n_index);
        self.populated += 1;
        self.slots[index].insert(value)
    }

    /// Removes and returns the entry at `index`, whose home is `home`.
    pub(crate) fn take(&mut self, home: usize, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        let n_index = self.distance(home, index);
        self.hopmap[home].clear(n_index);
        self.populated -= 1;
        Some(value)
    }

    /// Re-seats every entry into a table of `capacity` slots.
    ///
    /// Placement is planned on a table of slot indices before any entry
    /// moves, so on [`NoVacancy`] the table is left exactly as it was.
    pub(crate) fn rehash(
        &mut self,
        capacity: usize,
        home_of: impl Fn(&T, usize) -> usize,
    ) -> Result<(), NoVacancy> {
        let mut plan: HashTable<usize> = HashTable::with_capacity(capacity);
        for (old_index, slot) in self.slots.iter().enumerate() {
            let Some(value) = slot else { continue };
            let home = home_of(value, capacity);
            let index = plan.find_vacancy(home)?;
            plan.place(home, index, old_index);
        }
        debug_assert_eq!(plan.populated, self.populated);

        let mut old_slots = core::mem::take(&mut self.slots);
        self.slots = plan
            .slots
            .into_vec()
            .into_iter()
            .map(|slot| slot.and_then(|old_index| old_slots[old_index].take()))
            .collect();
        self.hopmap = plan.hopmap;

        Ok(())
    }

    /// Iterates over the entries in slot order.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Computes how far each entry sits from its home.
    ///
    /// Index `n` of the result counts the entries stored `n` slots after
    /// their home.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn probe_histogram(&self) -> ProbeHistogram {
        let mut counts = vec![0usize; HOP_RANGE];
        for hop in self.hopmap.iter() {
            let mut mask = hop.candidates();
            while mask != 0 {
                counts[mask.trailing_zeros() as usize] += 1;
                mask &= mask - 1;
            }
        }

        ProbeHistogram { counts }
    }

    /// Returns utilization statistics, counting occupied slots independently
    /// of the population counter.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn debug_stats(&self) -> DebugStats {
        let occupied_slots = self.slots.iter().filter(|slot| slot.is_some()).count();
        let longest_probe = self
            .hopmap
            .iter()
            .filter(|hop| hop.candidates() != 0)
            .map(|hop| (HopBits::BITS - 1 - hop.candidates().leading_zeros()) as usize)
            .max()
            .unwrap_or(0);

        DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            occupied_slots,
            load_factor: self.populated as f64 / self.capacity() as f64,
            longest_probe,
        }
    }

    /// Checks the neighborhood invariant and hop map against slot contents.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self, home_of: impl Fn(&T) -> usize) {
        let mut registered = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(value) = slot else { continue };
            let home = home_of(value);
            let n_index = self.distance(home, index);
            assert!(
                n_index < HOP_RANGE,
                "slot {index} is {n_index} slots from its home {home}"
            );
            assert_ne!(
                self.hopmap[home].candidates() & (1 << n_index),
                0,
                "slot {index} is not registered in the hop map of {home}"
            );
            registered += 1;
        }

        let hop_bits: u32 = self.hopmap.iter().map(|hop| hop.candidates().count_ones()).sum();
        assert_eq!(hop_bits as usize, registered);
        assert_eq!(self.populated, registered);
    }
}

impl<T> Index<usize> for HashTable<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match &self.slots[index] {
            Some(value) => value,
            None => panic!("slot {index} is empty"),
        }
    }
}

impl<T> IndexMut<usize> for HashTable<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match &mut self.slots[index] {
            Some(value) => value,
            None => panic!("slot {index} is empty"),
        }
    }
}

impl<T> IntoIterator for HashTable<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// Borrowing iterator over a table's entries in slot order.
pub(crate) struct Iter<'a, T> {
    slots: core::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Option::as_ref)
    }
}

/// Owning iterator over a table's entries in slot order.
pub(crate) struct IntoIter<T> {
    slots: alloc::vec::IntoIter<Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(core::convert::identity)
    }
}

/// Number of entries stored at each distance from their home slot.
///
/// Compiled with the `stats` feature, and always for tests.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Entry counts indexed by distance from home, `0..HOP_RANGE`.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = (count as u128 * total_units as u128).div_ceil(max as u128) as usize;
            let mut bar = "█".repeat(units / 8);
            match units % 8 {
                0 => {}
                1 => bar.push('▏'),
                2 => bar.push('▎'),
                3 => bar.push('▍'),
                4 => bar.push('▌'),
                5 => bar.push('▋'),
                6 => bar.push('▊'),
                _ => bar.push('▉'),
            }
            bar
        };

        for (distance, &count) in self.counts.iter().enumerate() {
            println!("{distance:>2} | {} ({count})", make_bar(count));
        }
    }
}

/// Table utilization statistics.
///
/// Compiled with the `stats` feature, and always for tests.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of entries according to the population counter
    pub populated: usize,
    /// Total number of slots
    pub capacity: usize,
    /// Number of slots found occupied by scanning the slot array
    pub occupied_slots: usize,
    /// `populated / capacity`
    pub load_factor: f64,
    /// Largest distance between an entry and its home
    pub longest_probe: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Slot Usage: {}/{} occupied",
            self.occupied_slots, self.capacity
        );
        println!(
            "Longest probe: {} of {} neighborhood slots",
            self.longest_probe, HOP_RANGE
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        home: usize,
        key: u64,
    }

    fn insert(table: &mut HashTable<Item>, home: usize, key: u64) -> usize {
        let index = table.find_vacancy(home).unwrap();
        table.place(home, index, Item { home, key });
        index
    }

    fn find(table: &HashTable<Item>, home: usize, key: u64) -> Option<&Item> {
        table.find(home, |item| item.key == key).map(|index| &table[index])
    }

    #[test]
    fn place_and_find() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 4);
        for key in 0..32u64 {
            let home = (key as usize * 7) % table.capacity();
            let index = insert(&mut table, home, key);
            assert_eq!(table[index].key, key, "{table:#?}");
        }

        assert_eq!(table.len(), 32);
        for key in 0..32u64 {
            let home = (key as usize * 7) % table.capacity();
            assert_eq!(find(&table, home, key), Some(&Item { home, key }));
        }
        assert!(find(&table, 0, 999).is_none());
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn lookup_skips_holes_in_the_neighborhood() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 2);
        for key in 0..4u64 {
            insert(&mut table, 5, key);
        }

        let hole = table.find(5, |item| item.key == 1).unwrap();
        assert_eq!(table.take(5, hole).map(|item| item.key), Some(1));

        assert!(find(&table, 5, 3).is_some());
        assert!(find(&table, 5, 1).is_none());
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn neighborhoods_wrap_around_the_end() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 2);
        let home = table.capacity() - 2;
        let mut indexes = Vec::new();
        for key in 0..5u64 {
            indexes.push(insert(&mut table, home, key));
        }

        assert_eq!(
            indexes,
            vec![home, home + 1, 0, 1, 2],
            "neighborhood should continue at slot 0"
        );
        for key in 0..5u64 {
            assert!(find(&table, home, key).is_some());
        }
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn full_neighborhood_hops_entries_out_of_the_way() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 4);

        // Slot 0 belongs to home 0; slots 1.. are filled by entries whose
        // homes are their own slots, so each of them may hop forward.
        insert(&mut table, 0, 0);
        for slot in 1..HOP_RANGE {
            insert(&mut table, slot, slot as u64);
        }
        for slot in HOP_RANGE..HOP_RANGE + 3 {
            insert(&mut table, slot, slot as u64);
        }

        let index = insert(&mut table, 0, 1000);
        assert!(index < HOP_RANGE, "new entry landed at {index}");
        assert_eq!(table.len(), HOP_RANGE + 4);

        for slot in 1..HOP_RANGE + 3 {
            assert!(find(&table, slot, slot as u64).is_some());
        }
        assert!(find(&table, 0, 0).is_some());
        assert!(find(&table, 0, 1000).is_some());
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn hop_chain_moves_several_entries() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 4);

        // Fill 0..3H with entries at their own homes, except one entry homed
        // at 0 occupying slot 0. The nearest empty slot for home 0 is 3H,
        // which needs at least two hops to reach the neighborhood.
        insert(&mut table, 0, 0);
        for slot in 1..HOP_RANGE * 3 {
            insert(&mut table, slot, slot as u64);
        }

        let index = insert(&mut table, 0, 5000);
        assert!(index < HOP_RANGE);
        for slot in 1..HOP_RANGE * 3 {
            assert!(find(&table, slot, slot as u64).is_some());
        }
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn no_vacancy_when_every_candidate_is_stuck() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 2);
        for key in 0..HOP_RANGE as u64 {
            insert(&mut table, 0, key);
        }

        assert_eq!(table.find_vacancy(0), Err(NoVacancy));
        assert_eq!(table.len(), HOP_RANGE);
        // Another home still has room.
        assert!(table.find_vacancy(HOP_RANGE).is_ok());
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn no_vacancy_when_the_table_is_full() {
        let mut table = HashTable::with_capacity(HOP_RANGE);
        for key in 0..HOP_RANGE as u64 {
            insert(&mut table, key as usize, key);
        }

        assert_eq!(table.find_vacancy(3), Err(NoVacancy));
    }

    #[test]
    fn take_clears_the_slot() {
        let mut table = HashTable::with_capacity(HOP_RANGE);
        let index = insert(&mut table, 4, 44);

        assert_eq!(table.take(4, index), Some(Item { home: 4, key: 44 }));
        assert!(table.is_empty());
        assert_eq!(table.take(4, index), None);
        assert!(table.get(index).is_none());
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn rehash_re_seats_every_entry() {
        let count = (HOP_RANGE * 3 / 4) as u64;
        let mut table: HashTable<(u64, String)> = HashTable::with_capacity(HOP_RANGE);
        for key in 0..count {
            let home = key as usize % HOP_RANGE;
            let index = table.find_vacancy(home).unwrap();
            table.place(home, index, (key, key.to_string()));
        }

        let capacity = HOP_RANGE * 2 + 3;
        table
            .rehash(capacity, |(key, _), range| *key as usize % range)
            .unwrap();

        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.len(), count as usize);
        for key in 0..count {
            let home = key as usize % capacity;
            let index = table.find(home, |(k, _)| *k == key).unwrap();
            assert_eq!(table[index].1, key.to_string());
        }
        table.assert_invariants(|(key, _)| *key as usize % capacity);
    }

    #[test]
    fn failed_rehash_leaves_the_table_untouched() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 4);
        for key in 0..(HOP_RANGE + 1) as u64 {
            // Spread over two homes now, but all collide on slot 0 once the
            // capacity is HOP_RANGE * 2.
            let home = if key % 2 == 0 { 0 } else { HOP_RANGE * 2 };
            insert(&mut table, home, key);
        }
        let before: Vec<Option<Item>> = table.slots.to_vec();

        let result = table.rehash(HOP_RANGE * 2, |_, _| 0);

        assert_eq!(result, Err(NoVacancy));
        assert_eq!(table.capacity(), HOP_RANGE * 4);
        assert_eq!(table.slots.to_vec(), before);
        table.assert_invariants(|item| item.home);
    }

    #[test]
    fn iter_and_into_iter_visit_every_entry() {
        let mut table = HashTable::with_capacity(HOP_RANGE);
        for key in [9u64, 3, 17] {
            insert(&mut table, key as usize % HOP_RANGE, key);
        }

        let mut keys: Vec<u64> = table.iter().map(|item| item.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![3, 9, 17]);

        let mut owned: Vec<u64> = table.into_iter().map(|item| item.key).collect();
        owned.sort_unstable();
        assert_eq!(owned, vec![3, 9, 17]);
    }

    #[test]
    fn test_clone() {
        let mut table = HashTable::with_capacity(HOP_RANGE);
        insert(&mut table, 1, 10);
        let mut cloned = table.clone();

        let index = cloned.find(1, |item| item.key == 10).unwrap();
        cloned[index].key = 11;

        assert!(find(&table, 1, 10).is_some());
        assert!(find(&cloned, 1, 11).is_some());
        assert!(find(&cloned, 1, 10).is_none());
    }

    #[test]
    fn histogram_output() {
        let mut table = HashTable::with_capacity(HOP_RANGE * 2);
        for key in 0..4u64 {
            insert(&mut table, 7, key);
        }
        insert(&mut table, 20, 100);

        let hist = table.probe_histogram();
        assert_eq!(hist.counts().len(), HOP_RANGE);
        assert_eq!(hist.total(), 5);
        assert_eq!(&hist.counts()[..4], &[2, 1, 1, 1]);

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 5);
        assert_eq!(stats.occupied_slots, 5);
        assert_eq!(stats.longest_probe, 3);

        #[cfg(feature = "std")]
        {
            hist.print();
            stats.print();
        }
    }

    #[test]
    fn debug_output_lists_hop_map() {
        let mut table = HashTable::with_capacity(HOP_RANGE);
        insert(&mut table, 2, 1);
        insert(&mut table, 2, 2);

        let rendered = alloc::format!("{table:?}");
        assert!(rendered.contains("2: [0, 1]"), "{rendered}");
        assert!(rendered.contains("populated: 2"), "{rendered}");
    }
}
