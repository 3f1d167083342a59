use std::collections::HashMap;

use crate::types::*;

///Maps vocabulary terms (and below-threshold staged terms) to their counts
pub type WordCounts = HashMap<String, Count>;

///The delete index: maps a deletion-string to the vocabulary terms that
///produce it, in insertion order
pub type DeleteIndex = HashMap<String, Vec<String>>;

///Observed frequencies for ordered word pairs, keyed as "word1 word2"
pub type BigramCounts = HashMap<String, Count>;
