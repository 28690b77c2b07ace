//! # Frequency Table

use crate::types::{Token, WBHashMap, hash_map_with_capacity};

/// The count of a token, and when it was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCount {
    /// Number of occurrences.
    pub count: u64,

    /// Ordinal of the first occurrence among distinct tokens.
    pub first_seen: u64,
}

/// `{ Token -> TokenCount }` table.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    counts: WBHashMap<Token, TokenCount>,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl FrequencyTable {
    /// Create an empty table with room for `capacity` distinct tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: hash_map_with_capacity(capacity),
        }
    }

    /// Add one occurrence of a token.
    pub fn add(
        &mut self,
        token: Token,
    ) {
        let next = self.counts.len() as u64;
        self.counts
            .entry(token)
            .or_insert(TokenCount {
                count: 0,
                first_seen: next,
            })
            .count += 1;
    }

    /// The count of a token; `0` if absent.
    pub fn count(
        &self,
        token: &str,
    ) -> u64 {
        self.counts.get(token).map_or(0, |c| c.count)
    }

    /// The entry for a token.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<&TokenCount> {
        self.counts.get(token)
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The total number of occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| c.count).sum()
    }

    /// Iterate over the entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &TokenCount)> {
        self.counts.iter()
    }

    /// The tokens ranked by descending count.
    ///
    /// Ties are broken by first occurrence; earlier tokens rank higher.
    pub fn ranked(&self) -> Vec<(&Token, u64)> {
        let mut entries: Vec<(&Token, &TokenCount)> = self.counts.iter().collect();
        entries.sort_unstable_by_key(|(_, c)| (std::cmp::Reverse(c.count), c.first_seen));
        entries.into_iter().map(|(t, c)| (t, c.count)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut table = FrequencyTable::default();
        for word in ["b", "a", "b", "c", "b", "a"] {
            table.add(word.into());
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(table.count("b"), 3);
        assert_eq!(table.count("z"), 0);
        assert_eq!(
            table.get("a"),
            Some(&TokenCount {
                count: 2,
                first_seen: 1
            })
        );
    }

    #[test]
    fn test_ranked_ties_by_first_seen() {
        let mut table = FrequencyTable::default();
        for word in ["z", "y", "x", "y", "w", "x"] {
            table.add(word.into());
        }

        let ranked: Vec<(&str, u64)> = table
            .ranked()
            .into_iter()
            .map(|(t, c)| (t.as_str(), c))
            .collect();
        assert_eq!(ranked, vec![("y", 2), ("x", 2), ("z", 1), ("w", 1)]);
    }
}
