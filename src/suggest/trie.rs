//! Character trie with per-word frequencies.
//!
//! # Examples
//!
//! ```
//! use sift::suggest::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("python", 1000);
//! trie.insert("programming", 800);
//! trie.insert("program", 700);
//! trie.insert("programmer", 600);
//!
//! assert_eq!(
//!     trie.autocomplete("prog", 3),
//!     vec!["programming", "program", "programmer"]
//! );
//! assert!(trie.has_prefix("pyt"));
//! assert!(!trie.contains("pyt"));
//! ```

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A suggested word with the frequency it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// The complete word.
    pub term: String,
    /// Stored frequency of the word.
    pub frequency: u64,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child node indices into `Trie::nodes`.
    children: AHashMap<char, usize>,
    terminal: bool,
    frequency: u64,
}

const ROOT: usize = 0;

/// Prefix tree over words, each terminal node carrying a frequency.
///
/// Nodes live in a flat arena and link to their children by index, so
/// dropping or cloning a trie never recurses, however long a word is.
/// Empty words are ignored, so the root is never terminal.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Trie {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` with `frequency`, overwriting any previous frequency.
    pub fn insert(&mut self, word: &str, frequency: u64) {
        if let Some(node) = self.terminal_mut(word) {
            node.frequency = frequency;
        }
    }

    /// Insert `word` with frequency 1, or add 1 to its frequency if present.
    ///
    /// Returns the frequency after the update (0 for an empty word).
    pub fn increment(&mut self, word: &str) -> u64 {
        match self.terminal_mut(word) {
            Some(node) => {
                node.frequency += 1;
                node.frequency
            }
            None => 0,
        }
    }

    /// Stored frequency of `word`, if it was inserted.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.find(word)
            .map(|index| &self.nodes[index])
            .filter(|node| node.terminal)
            .map(|node| node.frequency)
    }

    /// Whether `word` was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|index| self.nodes[index].terminal)
    }

    /// Whether any inserted word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.is_empty();
        }
        self.find(prefix).is_some()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words
    }

    /// Whether no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Up to `max_results` words starting with `prefix`, most frequent first.
    pub fn autocomplete(&self, prefix: &str, max_results: usize) -> Vec<String> {
        self.autocomplete_with_frequency(prefix, max_results)
            .into_iter()
            .map(|completion| completion.term)
            .collect()
    }

    /// Like [`Trie::autocomplete`] but keeps the frequencies.
    ///
    /// Ordering is descending frequency, then ascending lexical order.
    pub fn autocomplete_with_frequency(&self, prefix: &str, max_results: usize) -> Vec<Completion> {
        if max_results == 0 {
            return Vec::new();
        }
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let mut completions = Vec::new();
        let mut path = prefix.to_string();
        // (node, byte length of the path at its parent, edge char)
        let mut stack: Vec<(usize, usize, Option<char>)> = vec![(start, path.len(), None)];
        while let Some((index, depth, edge)) = stack.pop() {
            path.truncate(depth);
            if let Some(ch) = edge {
                path.push(ch);
            }

            let node = &self.nodes[index];
            if node.terminal {
                completions.push(Completion {
                    term: path.clone(),
                    frequency: node.frequency,
                });
            }
            for (&ch, &child) in &node.children {
                stack.push((child, path.len(), Some(ch)));
            }
        }

        completions.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.term.cmp(&b.term))
        });
        completions.truncate(max_results);
        completions
    }

    fn find(&self, prefix: &str) -> Option<usize> {
        let mut index = ROOT;
        for ch in prefix.chars() {
            index = *self.nodes[index].children.get(&ch)?;
        }
        Some(index)
    }

    /// Walk to the node for `word`, creating the path and marking it terminal.
    fn terminal_mut(&mut self, word: &str) -> Option<&mut TrieNode> {
        if word.is_empty() {
            return None;
        }

        let mut index = ROOT;
        for ch in word.chars() {
            index = match self.nodes[index].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[index].children.insert(ch, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[index];
        if !node.terminal {
            node.terminal = true;
            self.words += 1;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trie() -> Trie {
        let mut trie = Trie::new();
        trie.insert("python", 1000);
        trie.insert("programming", 800);
        trie.insert("program", 700);
        trie.insert("programmer", 600);
        trie
    }

    #[test]
    fn test_autocomplete_orders_by_frequency() {
        let trie = sample_trie();
        assert_eq!(
            trie.autocomplete("prog", 3),
            vec!["programming", "program", "programmer"]
        );
        assert_eq!(trie.autocomplete("p", 1), vec!["python"]);
    }

    #[test]
    fn test_autocomplete_missing_prefix() {
        let trie = sample_trie();
        assert!(trie.autocomplete("java", 10).is_empty());
        assert!(trie.autocomplete("prog", 0).is_empty());
    }

    #[test]
    fn test_autocomplete_includes_prefix_itself() {
        let trie = sample_trie();
        let results = trie.autocomplete("program", 10);
        assert_eq!(results, vec!["programming", "program", "programmer"]);
    }

    #[test]
    fn test_autocomplete_ties_are_lexical() {
        let mut trie = Trie::new();
        trie.insert("cart", 5);
        trie.insert("car", 5);
        trie.insert("cat", 5);
        trie.insert("cab", 9);
        assert_eq!(trie.autocomplete("ca", 10), vec!["cab", "car", "cart", "cat"]);
    }

    #[test]
    fn test_autocomplete_results_start_with_prefix() {
        let trie = sample_trie();
        for prefix in ["", "p", "pr", "py", "programm"] {
            let completions = trie.autocomplete_with_frequency(prefix, 3);
            assert!(completions.len() <= 3);
            assert!(completions.iter().all(|c| c.term.starts_with(prefix)));
            assert!(completions.windows(2).all(|w| w[0].frequency >= w[1].frequency));
        }
    }

    #[test]
    fn test_insert_overwrites_frequency() {
        let mut trie = sample_trie();
        trie.insert("programmer", 5000);
        assert_eq!(trie.frequency("programmer"), Some(5000));
        assert_eq!(trie.autocomplete("prog", 1), vec!["programmer"]);
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_increment() {
        let mut trie = Trie::new();
        assert_eq!(trie.increment("rust"), 1);
        assert_eq!(trie.increment("rust"), 2);
        assert_eq!(trie.increment("rusty"), 1);
        assert_eq!(trie.frequency("rust"), Some(2));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_contains_and_has_prefix() {
        let trie = sample_trie();
        assert!(trie.contains("program"));
        assert!(!trie.contains("progr"));
        assert!(trie.has_prefix("progr"));
        assert!(trie.has_prefix(""));
        assert!(!trie.has_prefix("x"));
        assert_eq!(trie.frequency("progr"), None);
    }

    #[test]
    fn test_empty_word_ignored() {
        let mut trie = Trie::new();
        trie.insert("", 10);
        assert_eq!(trie.increment(""), 0);
        assert!(trie.is_empty());
        assert!(!trie.contains(""));
        assert!(!trie.has_prefix(""));
        assert!(trie.autocomplete("", 10).is_empty());
    }

    #[test]
    fn test_deep_word() {
        let mut trie = Trie::new();
        let word = "a".repeat(200_000);
        trie.insert(&word, 1);
        trie.insert("ab", 2);

        let results = trie.autocomplete("aaa", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 200_000);
        assert_eq!(trie.autocomplete("a", 2)[0], "ab");

        let copy = trie.clone();
        drop(trie);
        assert!(copy.contains(&word));
        drop(copy);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut trie = Trie::new();
        trie.insert("café", 2);
        trie.insert("cafétéria", 1);
        assert_eq!(trie.autocomplete("caf", 10), vec!["café", "cafétéria"]);
    }
}
