extern crate serde;
extern crate simple_error;

use std::cmp::max;
use std::fs::File;
use std::io::{BufRead, BufReader};

use simple_error::SimpleError;

pub mod compound;
pub mod deletes;
pub mod distance;
pub mod index;
pub mod lookup;
pub mod test;
pub mod types;

pub use crate::compound::*;
pub use crate::deletes::*;
pub use crate::distance::*;
pub use crate::index::*;
pub use crate::lookup::*;
pub use crate::types::*;

///The symmetric-delete spelling correction engine. All tables are populated
///during construction and read-only during queries: ingestion takes `&mut
///self`, lookups take `&self`, so a built engine can be shared across
///threads for parallel querying.
pub struct SymSpell {
    ///Maximum edit distance the delete index was generated for; lookups may
    ///not request more
    pub max_dictionary_edit_distance: usize,

    ///Codepoint length of the indexed term prefix
    pub prefix_length: usize,

    ///Minimum accumulated count before a term enters the vocabulary
    pub count_threshold: Count,

    ///Count above which a single-token suggestion suppresses
    ///split-correction in the compound path
    pub split_threshold: Count,

    ///Tokens at most this many codepoints long are never corrected
    pub min_char_to_change: usize,

    pub preserve_case: bool,
    pub split_by_space: bool,
    pub split_word_and_number: bool,

    ///The vocabulary: every term in here has count >= count_threshold
    pub words: WordCounts,

    ///Staging table for terms still accumulating towards count_threshold
    pub below_threshold_words: WordCounts,

    ///The main index, mapping deletion-strings to the terms that produce them
    pub deletes: DeleteIndex,

    ///Bigram frequency table, keyed as "word1 word2"
    pub bigrams: BigramCounts,

    ///Minimum count over all loaded bigrams, used as a floor for unseen pairs
    pub bigram_count_min: Count,

    ///Longest codepoint length of any vocabulary term
    max_length: usize,

    ///The distance measure used to verify candidates
    pub distance_algorithm: DistanceAlgorithm,

    pub debug: bool,
}

impl SymSpell {
    pub fn new(options: &SymspellOptions) -> Result<SymSpell, SimpleError> {
        if options.prefix_length < 1 {
            return Err(SimpleError::new("prefix_length cannot be less than 1"));
        }
        if options.prefix_length <= options.max_edit_distance {
            return Err(SimpleError::new(
                "prefix_length must be greater than max_edit_distance",
            ));
        }
        if options.count_threshold < 0 {
            return Err(SimpleError::new("count_threshold cannot be negative"));
        }
        Ok(SymSpell {
            max_dictionary_edit_distance: options.max_edit_distance,
            prefix_length: options.prefix_length,
            count_threshold: options.count_threshold,
            split_threshold: options.split_threshold,
            min_char_to_change: options.min_char_to_change,
            preserve_case: options.preserve_case,
            split_by_space: options.split_by_space,
            split_word_and_number: options.split_word_and_number,
            words: WordCounts::new(),
            below_threshold_words: WordCounts::new(),
            deletes: DeleteIndex::new(),
            bigrams: BigramCounts::new(),
            bigram_count_min: Count::MAX,
            max_length: 0,
            distance_algorithm: DistanceAlgorithm::DamerauLevenshtein,
            debug: options.debug,
        })
    }

    ///Construct an engine and load a unigram corpus in one go
    pub fn with_dictionary(
        corpus_path: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
        options: &SymspellOptions,
    ) -> Result<SymSpell, SimpleError> {
        let mut model = SymSpell::new(options)?;
        model
            .load_dictionary(corpus_path, term_index, count_index, separator)
            .map_err(|e| SimpleError::new(format!("error loading dictionary: {}", e)))?;
        Ok(model)
    }

    ///Construct an engine and load both a unigram and a bigram corpus
    pub fn with_bigram_dictionary(
        corpus_path: &str,
        bigram_path: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
        options: &SymspellOptions,
    ) -> Result<SymSpell, SimpleError> {
        let mut model = SymSpell::with_dictionary(
            corpus_path,
            term_index,
            count_index,
            separator,
            options,
        )?;
        model
            .load_bigram_dictionary(bigram_path, term_index, count_index, separator)
            .map_err(|e| SimpleError::new(format!("error loading bigram dictionary: {}", e)))?;
        Ok(model)
    }

    ///Create or update a vocabulary entry. Counts accumulate with saturating
    ///addition; terms below the count threshold are staged in a separate
    ///table and promoted once they reach it. Returns true only when the term
    ///newly entered the vocabulary (and thus the delete index).
    pub fn create_dictionary_entry(&mut self, key: &str, count: Count) -> bool {
        let mut count = count;
        if count <= 0 {
            if self.count_threshold > 0 {
                return false;
            }
            count = 0;
        }

        if self.count_threshold > 1 {
            if let Some(&count_previous) = self.below_threshold_words.get(key) {
                count = count.saturating_add(count_previous);
                if count >= self.count_threshold {
                    self.below_threshold_words.remove(key);
                } else {
                    self.below_threshold_words.insert(key.to_string(), count);
                    return false;
                }
            }
        }

        if let Some(count_previous) = self.words.get_mut(key) {
            *count_previous = count_previous.saturating_add(count);
            return false;
        } else if count < self.count_threshold {
            self.below_threshold_words.insert(key.to_string(), count);
            return false;
        }

        self.words.insert(key.to_string(), count);

        let key_length = key.chars().count();
        if key_length > self.max_length {
            self.max_length = key_length;
        }

        if self.debug {
            eprintln!(" -- adding to vocabulary: {} ({})", key, count);
        }

        for variant in key.delete_variants(self.prefix_length, self.max_dictionary_edit_distance) {
            self.deletes
                .entry(variant)
                .or_insert_with(Vec::new)
                .push(key.to_string());
        }

        true
    }

    ///Record a bigram count verbatim (no thresholding) and maintain the
    ///minimum observed count
    pub fn create_bigram_entry(&mut self, key: &str, count: Count) {
        self.bigrams.insert(key.to_string(), count);
        if count < self.bigram_count_min {
            self.bigram_count_min = count;
        }
    }

    ///Read a unigram corpus from a file. Each line carries a term field and
    ///an integer count field; lines that do not are skipped.
    pub fn load_dictionary(
        &mut self,
        corpus_path: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, std::io::Error> {
        if self.debug {
            eprintln!("Reading dictionary from {}...", corpus_path);
        }
        let f = File::open(corpus_path)?;
        self.load_dictionary_stream(BufReader::new(f), term_index, count_index, separator)
    }

    ///Read a unigram corpus from any buffered reader. When the separator is
    ///empty, whitespace runs split each line; otherwise the separator string
    ///does. Lines with too few fields or a non-integer count are skipped.
    pub fn load_dictionary_stream(
        &mut self,
        reader: impl BufRead,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, std::io::Error> {
        for line in reader.lines() {
            let line = line?;
            let fields: Vec<&str> = if separator.is_empty() {
                line.split_whitespace().collect()
            } else {
                line.split(separator).collect()
            };
            if fields.len() <= max(term_index, count_index) {
                continue;
            }
            let count = match fields[count_index].parse::<Count>() {
                Ok(count) => count,
                Err(_) => continue,
            };
            self.create_dictionary_entry(fields[term_index], count);
        }
        if self.debug {
            eprintln!(" -- read vocabulary of size {}", self.words.len());
        }
        Ok(true)
    }

    ///Read a bigram corpus from a file
    pub fn load_bigram_dictionary(
        &mut self,
        corpus_path: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, std::io::Error> {
        if self.debug {
            eprintln!("Reading bigrams from {}...", corpus_path);
        }
        let f = File::open(corpus_path)?;
        self.load_bigram_dictionary_stream(BufReader::new(f), term_index, count_index, separator)
    }

    ///Read a bigram corpus from any buffered reader. With an empty separator
    ///the line splits on whitespace and the key is the concatenation of two
    ///adjacent term fields; with an explicit separator the key is a single
    ///field that already contains the space-joined pair.
    pub fn load_bigram_dictionary_stream(
        &mut self,
        reader: impl BufRead,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, std::io::Error> {
        let min_fields = if separator.is_empty() { 3 } else { 2 };
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = if separator.is_empty() {
                line.split_whitespace().collect()
            } else {
                line.split(separator).collect()
            };
            if fields.len() < min_fields || fields.len() <= count_index {
                continue;
            }
            let count = match fields[count_index].parse::<Count>() {
                Ok(count) => count,
                Err(_) => continue,
            };
            let key = if separator.is_empty() {
                if fields.len() <= term_index + 1 {
                    continue;
                }
                format!("{} {}", fields[term_index], fields[term_index + 1])
            } else {
                if fields.len() <= term_index {
                    continue;
                }
                fields[term_index].to_string()
            };
            self.create_bigram_entry(&key, count);
        }
        if self.debug {
            eprintln!(" -- read {} bigrams", self.bigrams.len());
        }
        Ok(true)
    }

    ///Get the count for an exact vocabulary term (if it exists)
    pub fn get(&self, term: &str) -> Option<Count> {
        self.words.get(term).copied()
    }

    ///Tests if the vocabulary has a specific term
    pub fn has(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    ///Number of terms in the vocabulary
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    ///Longest codepoint length of any vocabulary term
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}
