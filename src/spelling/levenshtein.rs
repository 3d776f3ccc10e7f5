//! Levenshtein edit distance.
//!
//! The distance between two strings is the minimum number of single-character
//! insertions, deletions or substitutions turning one into the other. All
//! functions work on Unicode scalar values, not bytes.

/// Calculate the Levenshtein distance between two strings.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    LevenshteinMatcher::new(s1).distance(s2)
}

/// Calculate the Levenshtein distance, giving up once it must exceed `threshold`.
///
/// Returns `None` when the distance is greater than `threshold`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    LevenshteinMatcher::new(s1).distance_within(s2, threshold)
}

/// Distance calculator for one fixed query against many candidates.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new(query: &str) -> Self {
        LevenshteinMatcher {
            query: query.chars().collect(),
        }
    }

    /// Number of characters in the query.
    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Calculate the full distance to a candidate string.
    pub fn distance(&self, candidate: &str) -> usize {
        // Every pair of strings is within usize::MAX edits, so this never bails out.
        self.distance_within(candidate, usize::MAX)
            .unwrap_or(usize::MAX)
    }

    /// Calculate the distance to `candidate` if it is at most `max_distance`.
    ///
    /// Uses two rolling rows and stops as soon as every cell of a row exceeds
    /// the bound, since later rows can only grow from there.
    pub fn distance_within(&self, candidate: &str, max_distance: usize) -> Option<usize> {
        let candidate: Vec<char> = candidate.chars().collect();
        let (n, m) = (self.query.len(), candidate.len());

        if n.abs_diff(m) > max_distance {
            return None;
        }

        let mut prev: Vec<usize> = (0..=m).collect();
        let mut curr = vec![0; m + 1];

        for (i, &qc) in self.query.iter().enumerate() {
            curr[0] = i + 1;
            let mut row_min = curr[0];

            for (j, &cc) in candidate.iter().enumerate() {
                let cost = usize::from(qc != cc);
                curr[j + 1] = (prev[j + 1] + 1) // deletion
                    .min(curr[j] + 1) // insertion
                    .min(prev[j] + cost); // substitution
                row_min = row_min.min(curr[j + 1]);
            }

            if row_min > max_distance {
                return None;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        let distance = prev[m];
        (distance <= max_distance).then_some(distance)
    }

    /// Check if a candidate is within the given edit distance.
    pub fn is_match(&self, candidate: &str, max_distance: usize) -> bool {
        self.distance_within(candidate, max_distance).is_some()
    }
}
