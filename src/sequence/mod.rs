// Character N-gram Sequence Engine
//
// Turns raw text into a cleaned character stream, extracts fixed-width windows,
// ranks them by frequency and measures immediate adjacency between two ranked sets.
//
// Stages (leaf-first):
// - normalize: allow/replace/skip rules plus optional case folding
// - ngram: stride-1 window extraction with split-character exclusion, ranking
// - adjacency: position indexing and dense (n-gram, m-gram) counting
//
// Every stage is a pure function of its inputs and the configuration it is handed.

mod adjacency;
mod ngram;
mod normalize;

pub use adjacency::{count_adjacency, AdjacencyTable, PositionIndex};
pub use ngram::{count_ngrams, extract_ngrams, ngram_coverage, rank_ngrams, NGram, RankedNgram};
pub use normalize::{normalize, CleanedStream, Normalizer};
