use crate::sequence::ngram::NGram;
use crate::sequence::normalize::CleanedStream;
use std::collections::HashMap;

/// Start offsets of each member of a gram list, ascending
///
/// Scans every raw window of the stream; split characters play no part here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex {
    width: usize,
    positions: Vec<Vec<usize>>,
}

impl PositionIndex {
    /// Index `grams` (all expected to be `width` characters long) over `stream`
    ///
    /// `positions(i)` belongs to `grams[i]`. A gram of a different length never
    /// matches a window and keeps an empty position list.
    pub fn build(stream: &CleanedStream, grams: &[NGram], width: usize) -> Self {
        let keys: Vec<Vec<char>> = grams.iter().map(|g| g.chars().collect()).collect();
        let mut lookup: HashMap<&[char], usize> = HashMap::with_capacity(keys.len());
        for (slot, key) in keys.iter().enumerate() {
            lookup.entry(key.as_slice()).or_insert(slot);
        }

        let mut positions = vec![Vec::new(); grams.len()];
        let chars = stream.as_chars();

        if width > 0 && chars.len() >= width {
            for (offset, window) in chars.windows(width).enumerate() {
                if let Some(&slot) = lookup.get(window) {
                    positions[slot].push(offset);
                }
            }
        }

        Self { width, positions }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn positions(&self, slot: usize) -> &[usize] {
        self.positions.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of recorded occurrences
    pub fn occurrences(&self) -> usize {
        self.positions.iter().map(Vec::len).sum()
    }
}

/// Dense (n-gram, m-gram) adjacency counts
///
/// Rows follow the n-gram order, columns the m-gram order; every pair has a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyTable {
    n_grams: Vec<NGram>,
    m_grams: Vec<NGram>,
    counts: Vec<u64>,
    row_lookup: HashMap<NGram, usize>,
    col_lookup: HashMap<NGram, usize>,
}

impl AdjacencyTable {
    fn zeroed(n_grams: Vec<NGram>, m_grams: Vec<NGram>) -> Self {
        let row_lookup = n_grams
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();
        let col_lookup = m_grams
            .iter()
            .enumerate()
            .map(|(j, g)| (g.clone(), j))
            .collect();
        let counts = vec![0; n_grams.len() * m_grams.len()];

        Self {
            n_grams,
            m_grams,
            counts,
            row_lookup,
            col_lookup,
        }
    }

    pub fn n_grams(&self) -> &[NGram] {
        &self.n_grams
    }

    pub fn m_grams(&self) -> &[NGram] {
        &self.m_grams
    }

    /// Count for the pair, `None` if either gram is not part of the table
    pub fn get(&self, n_gram: &str, m_gram: &str) -> Option<u64> {
        let row = *self.row_lookup.get(n_gram)?;
        let col = *self.col_lookup.get(m_gram)?;
        Some(self.counts[row * self.m_grams.len() + col])
    }

    pub fn get_at(&self, row: usize, col: usize) -> Option<u64> {
        if row < self.n_grams.len() && col < self.m_grams.len() {
            Some(self.counts[row * self.m_grams.len() + col])
        } else {
            None
        }
    }

    /// Counts of one n-gram against every m-gram
    pub fn row(&self, row: usize) -> &[u64] {
        let cols = self.m_grams.len();
        if row >= self.n_grams.len() {
            return &[];
        }
        &self.counts[row * cols..(row + 1) * cols]
    }

    /// Every cell as `(n_gram, m_gram, count)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.n_grams.iter().enumerate().flat_map(move |(i, a)| {
            self.m_grams
                .iter()
                .zip(self.row(i))
                .map(move |(b, &count)| (a.as_str(), b.as_str(), count))
        })
    }

    /// Number of cells (`rows * cols`)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn min(&self) -> Option<u64> {
        self.counts.iter().copied().min()
    }

    pub fn max(&self) -> Option<u64> {
        self.counts.iter().copied().max()
    }

    /// Sum of all cells
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

fn dedup_preserving_order(grams: &[NGram]) -> Vec<NGram> {
    let mut seen = std::collections::HashSet::new();
    grams
        .iter()
        .filter(|g| seen.insert(g.as_str()))
        .cloned()
        .collect()
}

/// Counts, for every (n-gram, m-gram) pair, how often the m-gram starts exactly
/// where an occurrence of the n-gram ends
///
/// Both gram lists are position-indexed once; the m-gram index is then inverted into
/// an offset table so each n-gram occurrence costs a single lookup. An occurrence
/// ending at the last character has no follower and contributes nothing, and a
/// follower shorter than `m` never matches. Repeated entries in either list collapse
/// onto their first appearance.
///
/// # Example
/// ```
/// use charmatrix::sequence::{count_adjacency, CleanedStream};
///
/// let stream = CleanedStream::from("abcabcabc");
/// let table = count_adjacency(&stream, &["a".to_string()], &["b".to_string()], 1, 1);
///
/// assert_eq!(table.get("a", "b"), Some(3));
/// ```
pub fn count_adjacency(
    stream: &CleanedStream,
    n_grams: &[NGram],
    m_grams: &[NGram],
    n: usize,
    m: usize,
) -> AdjacencyTable {
    let mut table = AdjacencyTable::zeroed(
        dedup_preserving_order(n_grams),
        dedup_preserving_order(m_grams),
    );

    let len = stream.len();
    let cols = table.m_grams.len();

    let n_index = PositionIndex::build(stream, &table.n_grams, n);
    let m_index = PositionIndex::build(stream, &table.m_grams, m);

    // offset -> column of the m-gram starting there
    let mut column_at: HashMap<usize, usize> = HashMap::with_capacity(m_index.occurrences());
    for col in 0..cols {
        for &offset in m_index.positions(col) {
            column_at.insert(offset, col);
        }
    }

    for row in 0..table.n_grams.len() {
        for &start in n_index.positions(row) {
            let end = start + n;
            if end == len {
                continue;
            }
            if let Some(&col) = column_at.get(&end) {
                table.counts[row * cols + col] += 1;
            }
        }
    }

    tracing::debug!(
        rows = table.n_grams.len(),
        cols,
        n_occurrences = n_index.occurrences(),
        m_occurrences = m_index.occurrences(),
        "adjacency table built"
    );

    table
}
