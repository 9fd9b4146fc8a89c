use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// The partial-sort container backing each BMSSP frame.
///
/// Stores `(key, value)` pairs with values bounded above by `B` and supports:
/// - `insert`: place a pair in amortized O(max{1, log(N/M)}) time
/// - `batch_prepend`: add a batch of pairs smaller than anything stored
/// - `pull`: return up to `M` keys of approximately-smallest value together
///   with a boundary below everything left behind
///
/// The container never sorts its full contents. Items live in unordered
/// blocks: `D0` holds batch-prepended blocks at the front, `D1` holds
/// inserted blocks kept in ascending order of their `upper` field so that a
/// range scan places each insertion.
///
/// Values only need a total order; no arithmetic is ever performed on them.
#[derive(Debug)]
pub struct BlockList<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Copy + Ord + Debug,
{
    /// Pull block size `M`; also the size cap for `D1` blocks
    capacity: usize,

    /// Upper bound `B` on stored values
    bound: V,

    /// Block slab; blocks are emptied in place rather than removed
    blocks: Vec<Block<K, V>>,

    /// Batch-prepended blocks, front first
    d0: VecDeque<usize>,

    /// Inserted blocks as `(upper, block id)`, in ascending `upper` order
    d1: BTreeSet<(V, usize)>,

    /// Position of each stored key: `(block id, slot)`
    loc: HashMap<K, (usize, usize)>,
}

#[derive(Debug)]
struct Block<K, V> {
    kind: BlockKind,
    upper: V,
    items: Vec<(K, V)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    D0,
    D1,
}

impl<K, V> BlockList<K, V>
where
    K: Eq + Hash + Copy + Debug,
    V: Copy + Ord + Debug,
{
    /// Creates an empty container with pull size `capacity` and value bound
    /// `bound`
    pub fn new(capacity: usize, bound: V) -> Self {
        let mut list = BlockList {
            capacity: capacity.max(1),
            bound,
            blocks: Vec::new(),
            d0: VecDeque::new(),
            d1: BTreeSet::new(),
            loc: HashMap::new(),
        };
        list.reset();
        list
    }

    /// Returns true if the container holds no entries
    pub fn is_empty(&self) -> bool {
        self.loc.is_empty()
    }

    /// Returns the number of keys in the container
    pub fn len(&self) -> usize {
        self.loc.len()
    }

    /// Returns the stored value for `key`, if present
    pub fn get(&self, key: &K) -> Option<V> {
        self.loc
            .get(key)
            .map(|&(block_id, slot)| self.blocks[block_id].items[slot].1)
    }

    /// Inserts a key-value pair. A pair whose key is already present with a
    /// value less than or equal to the new one is discarded; otherwise the
    /// old entry is replaced.
    pub fn insert(&mut self, key: K, value: V) {
        debug_assert!(value <= self.bound, "inserted value above container bound");
        if let Some(current) = self.get(&key) {
            if current <= value {
                return;
            }
            self.remove_entry(key);
        }

        // First D1 block whose upper covers the value; the sentinel block
        // with upper = bound guarantees a hit.
        let Some(&(_, block_id)) = self.d1.range((value, 0)..).next() else {
            debug_assert!(false, "D1 lost its sentinel block");
            return;
        };

        let slot = self.blocks[block_id].items.len();
        self.blocks[block_id].items.push((key, value));
        self.loc.insert(key, (block_id, slot));

        if self.blocks[block_id].items.len() > self.capacity {
            self.split_block(block_id);
        }
    }

    /// Adds a batch of pairs that are collectively smaller than anything in
    /// the container. Duplicate keys inside the batch keep their smallest
    /// value; pairs already stored with a value at most the new one are
    /// dropped.
    pub fn batch_prepend(&mut self, pairs: Vec<(K, V)>) {
        if pairs.is_empty() {
            return;
        }

        let mut best: HashMap<K, V> = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            best.entry(key)
                .and_modify(|current| {
                    if value < *current {
                        *current = value;
                    }
                })
                .or_insert(value);
        }

        let mut survivors: Vec<(K, V)> = Vec::with_capacity(best.len());
        for (key, value) in best {
            debug_assert!(value <= self.bound, "prepended value above container bound");
            if let Some(current) = self.get(&key) {
                if current <= value {
                    continue;
                }
                self.remove_entry(key);
            }
            survivors.push((key, value));
        }
        if survivors.is_empty() {
            return;
        }

        survivors.sort_unstable_by(|a, b| a.1.cmp(&b.1));

        // Chunk into half-size blocks and prepend in reverse so the smallest
        // chunk ends up at the very front.
        let chunk_size = (self.capacity + 1) / 2;
        for chunk in survivors.chunks(chunk_size).rev() {
            let upper = chunk.last().expect("chunks are non-empty").1;
            let block_id = self.blocks.len();
            self.blocks.push(Block {
                kind: BlockKind::D0,
                upper,
                items: chunk.to_vec(),
            });
            self.reindex_block(block_id);
            self.d0.push_front(block_id);
        }
    }

    /// Removes and returns the `M` keys of smallest value, together with a
    /// boundary `x` such that every entry left behind has value at least
    /// `x`. When the whole container fits in one pull, the boundary is the
    /// container bound `B` and the container drains.
    ///
    /// Gathering walks a front prefix of each sequence separately: `D0`
    /// blocks are front-ordered by the prepend contract and `D1` blocks
    /// cover disjoint ascending value ranges, so the two prefixes together
    /// contain the `M+1` globally smallest items and the boundary is exact.
    pub fn pull(&mut self) -> (V, Vec<K>) {
        if self.len() <= self.capacity {
            let mut keys = Vec::with_capacity(self.len());
            for &block_id in &self.d0 {
                keys.extend(self.blocks[block_id].items.iter().map(|&(key, _)| key));
            }
            for &(_, block_id) in &self.d1 {
                keys.extend(self.blocks[block_id].items.iter().map(|&(key, _)| key));
            }
            self.reset();
            return (self.bound, keys);
        }

        let mut gathered: Vec<(K, V)> = Vec::new();
        let mut d0_count = 0;
        for &block_id in &self.d0 {
            if d0_count > self.capacity {
                break;
            }
            let items = &self.blocks[block_id].items;
            gathered.extend_from_slice(items);
            d0_count += items.len();
        }
        let mut d1_count = 0;
        for &(_, block_id) in &self.d1 {
            if d1_count > self.capacity {
                break;
            }
            let items = &self.blocks[block_id].items;
            gathered.extend_from_slice(items);
            d1_count += items.len();
        }

        gathered.sort_unstable_by(|a, b| a.1.cmp(&b.1));
        let boundary = gathered[self.capacity].1;
        let keys: Vec<K> = gathered
            .iter()
            .take(self.capacity)
            .map(|&(key, _)| key)
            .collect();
        for &key in &keys {
            self.remove_entry(key);
        }
        (boundary, keys)
    }

    /// Splits an over-full D1 block at its median value. The left half's
    /// upper becomes its own maximum; the right half keeps the old upper so
    /// the covering invariant (and the sentinel) survives the split.
    fn split_block(&mut self, block_id: usize) {
        let old_upper = self.blocks[block_id].upper;
        self.d1.remove(&(old_upper, block_id));

        let mut items = std::mem::take(&mut self.blocks[block_id].items);
        items.sort_unstable_by(|a, b| a.1.cmp(&b.1));
        let mid = items.len() / 2;
        let right_items = items.split_off(mid);
        let left_upper = items.last().expect("left half is non-empty").1;

        let right_id = self.blocks.len();
        self.blocks.push(Block {
            kind: BlockKind::D1,
            upper: old_upper,
            items: right_items,
        });
        self.blocks[block_id].items = items;
        self.blocks[block_id].upper = left_upper;

        self.reindex_block(block_id);
        self.reindex_block(right_id);
        self.d1.insert((left_upper, block_id));
        self.d1.insert((old_upper, right_id));
    }

    /// Deletes one entry, patching the position of the item swapped into its
    /// slot. Emptied D1 blocks other than the sentinel drop out of the
    /// ordered index.
    fn remove_entry(&mut self, key: K) {
        let Some((block_id, slot)) = self.loc.remove(&key) else {
            return;
        };
        let block = &mut self.blocks[block_id];
        block.items.swap_remove(slot);
        let moved = block.items.get(slot).map(|&(moved_key, _)| moved_key);
        let drop_from_d1 =
            block.kind == BlockKind::D1 && block.items.is_empty() && block.upper != self.bound;
        let upper = block.upper;

        if let Some(moved_key) = moved {
            self.loc.insert(moved_key, (block_id, slot));
        }
        if drop_from_d1 {
            self.d1.remove(&(upper, block_id));
        }
    }

    fn reindex_block(&mut self, block_id: usize) {
        for slot in 0..self.blocks[block_id].items.len() {
            let key = self.blocks[block_id].items[slot].0;
            self.loc.insert(key, (block_id, slot));
        }
    }

    fn reset(&mut self) {
        self.blocks.clear();
        self.d0.clear();
        self.d1.clear();
        self.loc.clear();
        self.blocks.push(Block {
            kind: BlockKind::D1,
            upper: self.bound,
            items: Vec::new(),
        });
        self.d1.insert((self.bound, 0));
    }
}
