//! Frequency tables ordered most frequent first.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;


/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}


impl CountRow {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}


/// Count occurrences of each value, most frequent first; ties keep first-seen order.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}


/// Top `n` string values as [`CountRow`]s.
pub fn top_counts<'a, I>(values: I, n: usize) -> Vec<CountRow>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values)
        .into_iter()
        .take(n)
        .map(|(label, count)| CountRow::new(label, count))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(["b", "a", "c", "a", "c", "d"]);
        assert_eq!(counts, vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn test_value_counts_empty() {
        let counts: Vec<(&str, usize)> = value_counts(Vec::new());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_top_counts_truncates() {
        let rows = top_counts(["x", "y", "x", "z", "x", "y"], 2);
        assert_eq!(rows, vec![CountRow::new("x", 3), CountRow::new("y", 2)]);
    }
}
