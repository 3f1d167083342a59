use serde::Serialize;

///Frequency counts are signed 64-bit; additions saturate rather than wrap
pub type Count = i64;

///Normalization constant that maps raw counts into the [0,1] probability
///scale used by compound scoring (conventional English corpus size)
pub const N: f64 = 1_024_908_267_229.0;

///Result-shaping policy for lookups
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Verbosity {
    ///Return only the single best suggestion (lowest distance, ties broken by count)
    Top,
    ///Return all suggestions at the smallest observed distance
    Closest,
    ///Return every suggestion within the maximum distance
    All,
}

///A vocabulary term offered as a possible correction
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct SuggestItem {
    ///The suggested term as it occurs in the vocabulary
    pub term: String,

    ///Damerau-Levenshtein distance from the query to the term
    pub distance: usize,

    ///The absolute frequency count of the term
    pub count: Count,
}

impl SuggestItem {
    pub fn new(term: &str, distance: usize, count: Count) -> Self {
        Self {
            term: term.to_string(),
            distance,
            count,
        }
    }
}

#[derive(Clone,Debug)]
pub struct SymspellOptions {
    /// Maximum edit distance (Damerau-Levenshtein) used when generating the
    /// delete index. Lookups may not request a larger distance than this.
    pub max_edit_distance: usize,

    /// Length (in codepoints) of the term prefix over which deletes are
    /// generated. Must be greater than the maximum edit distance. Longer
    /// prefixes increase accuracy at the cost of a larger index.
    pub prefix_length: usize,

    /// Minimum accumulated count before a term is accepted into the
    /// vocabulary. Terms below it are staged and promoted once they
    /// accumulate enough occurrences.
    pub count_threshold: Count,

    /// Count above which a single-token lookup result suppresses
    /// split-correction in the compound path
    pub split_threshold: Count,

    /// Tokens of codepoint length less than or equal to this are passed
    /// through by the compound corrector without correction
    pub min_char_to_change: usize,

    /// Keep the casing of the input when tokenizing; when false the input is
    /// lowercased (Unicode-aware) first
    pub preserve_case: bool,

    /// Tokenize by splitting on single spaces instead of scanning for
    /// letter-or-digit runs
    pub split_by_space: bool,

    /// Split runs of digits from adjacent runs of non-digits during
    /// tokenization
    pub split_word_and_number: bool,

    /// Print verbose diagnostics to stderr while indexing and querying
    pub debug: bool,
}

impl Default for SymspellOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
            split_threshold: Count::MAX,
            min_char_to_change: 0,
            preserve_case: false,
            split_by_space: false,
            split_word_and_number: false,
            debug: false,
        }
    }
}

impl SymspellOptions {
    pub fn with_max_edit_distance(mut self, distance: usize) -> Self {
        self.max_edit_distance = distance;
        self
    }
    pub fn with_prefix_length(mut self, length: usize) -> Self {
        self.prefix_length = length;
        self
    }
    pub fn with_count_threshold(mut self, threshold: Count) -> Self {
        self.count_threshold = threshold;
        self
    }
    pub fn with_split_threshold(mut self, threshold: Count) -> Self {
        self.split_threshold = threshold;
        self
    }
    pub fn with_min_char_to_change(mut self, length: usize) -> Self {
        self.min_char_to_change = length;
        self
    }
    pub fn with_preserve_case(mut self) -> Self {
        self.preserve_case = true;
        self
    }
    pub fn with_split_by_space(mut self) -> Self {
        self.split_by_space = true;
        self
    }
    pub fn with_split_word_and_number(mut self) -> Self {
        self.split_word_and_number = true;
        self
    }
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}
