//! # Common Types
use compact_str::CompactString;

/// A unit of text produced by a [`WordTokenizer`](crate::tokenizer::WordTokenizer).
pub type Token = CompactString;

/// A position in a [`Vocabulary`](crate::vocab::Vocabulary).
pub type TokenId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WBHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WBHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WBHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WBHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Create a new hash map with the given capacity.
pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WBHashMap<K, V> {
    WBHashMap::with_capacity(capacity)
}
