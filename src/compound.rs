use std::cmp::max;

use once_cell::sync::Lazy;
use regex::Regex;
use simple_error::SimpleError;

use crate::types::*;
use crate::SymSpell;

///A word is a letter-or-digit run, optionally continued by an apostrophe and
///another letter-or-digit run
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)?").expect("word pattern is valid")
});

///Tokenize a phrase. With `split_by_space` the phrase splits on single
///spaces (empty tokens preserved); otherwise the word pattern scans it. The
///input is lowercased first unless `preserve_case` is set, and
///`split_word_and_number` additionally splits every token at digit/non-digit
///boundaries.
pub fn parse_words(
    phrase: &str,
    preserve_case: bool,
    split_by_space: bool,
    split_word_and_number: bool,
) -> Vec<String> {
    let normalized = if preserve_case {
        phrase.to_string()
    } else {
        phrase.to_lowercase()
    };
    let words: Vec<String> = if split_by_space {
        normalized.split(' ').map(|word| word.to_string()).collect()
    } else {
        WORD_PATTERN
            .find_iter(&normalized)
            .map(|word| word.as_str().to_string())
            .collect()
    };
    if split_word_and_number {
        words
            .iter()
            .flat_map(|word| split_digit_runs(word))
            .collect()
    } else {
        words
    }
}

///Split a token at every boundary between a digit run and a non-digit run
fn split_digit_runs(word: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut previous_is_digit: Option<bool> = None;
    for c in word.chars() {
        let is_digit = c.is_numeric();
        if let Some(previous) = previous_is_digit {
            if previous != is_digit {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        previous_is_digit = Some(is_digit);
    }
    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }
    parts
}

///A stand-in for a token nothing in the vocabulary can explain; its count is
///the Naive Bayes probability of an unknown word of that length
fn create_with_probability(term: &str, distance: usize) -> SuggestItem {
    let count = (10.0 / 10f64.powi(term.chars().count() as i32)) as Count;
    SuggestItem::new(term, distance, count)
}

impl SymSpell {
    ///Correct a multi-word phrase. Every token is corrected on its own, but
    ///two adjacent tokens may be merged into a single vocabulary term and a
    ///single token may be split into a known word pair, whichever the
    ///unigram and bigram frequencies favour. Returns one suggestion holding
    ///the reassembled phrase, its distance from the input and a combined
    ///Naive-Bayes-style count.
    pub fn lookup_compound(
        &self,
        phrase: &str,
        max_edit_distance: usize,
    ) -> Result<SuggestItem, SimpleError> {
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SimpleError::new("distance too large"));
        }

        let terms = parse_words(
            phrase,
            self.preserve_case,
            self.split_by_space,
            self.split_word_and_number,
        );
        let term_count = terms.len();
        let mut suggestion_parts: Vec<SuggestItem> = Vec::new();
        let mut is_last_combi = false;

        for (i, term) in terms.iter().enumerate() {
            let term_len = term.chars().count();

            let suggestions = if term_len > self.min_char_to_change {
                self.lookup(term, Verbosity::Top, max_edit_distance)?
            } else {
                //too short to touch; pass through with a count that no
                //merge or split can outweigh
                vec![SuggestItem::new(term, 0, Count::MAX)]
            };

            //try merging this token with its predecessor
            if i > 0 && !is_last_combi {
                let combined = format!("{}{}", terms[i - 1], term);
                let suggestions_combi = self.lookup(&combined, Verbosity::Top, max_edit_distance)?;
                if !suggestions_combi.is_empty() {
                    if let Some(best1) = suggestion_parts.last() {
                        let best2 = match suggestions.first() {
                            Some(best2) => best2.clone(),
                            None => create_with_probability(term, max_edit_distance + 1),
                        };
                        let distance_sum = best1.distance + best2.distance;
                        let combi = &suggestions_combi[0];
                        if combi.distance + 1 < distance_sum
                            || (combi.distance + 1 == distance_sum
                                && (combi.count as f64)
                                    > best1.count as f64 / N * best2.count as f64)
                        {
                            let mut merged = combi.clone();
                            merged.distance += 1;
                            let last = suggestion_parts.len() - 1;
                            suggestion_parts[last] = merged;
                            is_last_combi = true;
                            continue;
                        }
                    }
                }
            }
            is_last_combi = false;

            if !suggestions.is_empty() && (suggestions[0].distance == 0 || term_len == 1) {
                suggestion_parts.push(suggestions[0].clone());
                continue;
            }

            //no perfect suggestion; try splitting the token into a word pair
            let mut suggestion_split_best: Option<SuggestItem> = suggestions.first().cloned();
            let suppress_split = match suggestions.first() {
                Some(best) => best.count > self.split_threshold && term_count == 1,
                None => false,
            };
            if term_len > 1 && !suppress_split {
                let term_chars: Vec<char> = term.chars().collect();
                for j in 1..term_len {
                    let part1: String = term_chars[..j].iter().collect();
                    let part2: String = term_chars[j..].iter().collect();
                    let suggestions1 = self.lookup(&part1, Verbosity::Top, max_edit_distance)?;
                    let suggestions2 = self.lookup(&part2, Verbosity::Top, max_edit_distance)?;
                    if suggestions1.is_empty() || suggestions2.is_empty() {
                        continue;
                    }
                    let split_term = format!("{} {}", suggestions1[0].term, suggestions2[0].term);
                    let split_chars: Vec<char> = split_term.chars().collect();
                    let split_distance = match self.distance_algorithm.distance(
                        &term_chars,
                        &split_chars,
                        max_edit_distance,
                    ) {
                        Some(distance) => distance,
                        None => max_edit_distance + 1,
                    };
                    if let Some(best) = &suggestion_split_best {
                        if split_distance > best.distance {
                            continue;
                        }
                        if split_distance < best.distance {
                            suggestion_split_best = None;
                        }
                    }

                    let concatenation =
                        format!("{}{}", suggestions1[0].term, suggestions2[0].term);
                    let split_count = match self.bigrams.get(&split_term) {
                        Some(&bigram_count) => {
                            let mut count = bigram_count;
                            if let Some(best_si) = suggestions.first() {
                                if concatenation == *term {
                                    count = max(count, best_si.count.saturating_add(2));
                                } else if best_si.term == suggestions1[0].term
                                    || best_si.term == suggestions2[0].term
                                {
                                    count = max(count, best_si.count.saturating_add(1));
                                }
                            } else if concatenation == *term {
                                count = max(
                                    count,
                                    max(suggestions1[0].count, suggestions2[0].count)
                                        .saturating_add(2),
                                );
                            }
                            count
                        }
                        None => {
                            //Naive Bayes floor for a word pair never seen in
                            //the bigram corpus
                            let product =
                                suggestions1[0].count as f64 / N * suggestions2[0].count as f64;
                            f64::min(self.bigram_count_min as f64, product) as Count
                        }
                    };

                    let split_suggestion =
                        SuggestItem::new(&split_term, split_distance, split_count);
                    if suggestion_split_best
                        .as_ref()
                        .map_or(true, |best| split_suggestion.count > best.count)
                    {
                        suggestion_split_best = Some(split_suggestion);
                    }
                }
            }

            match suggestion_split_best {
                Some(best) => suggestion_parts.push(best),
                None => {
                    suggestion_parts.push(create_with_probability(term, max_edit_distance + 1))
                }
            }
        }

        let mut joined_term = String::new();
        let mut joined_count = N;
        for item in &suggestion_parts {
            joined_term.push_str(&item.term);
            joined_term.push(' ');
            joined_count *= item.count as f64 / N;
        }
        let joined_term = joined_term.trim().to_string();

        let phrase_chars: Vec<char> = phrase.chars().collect();
        let joined_chars: Vec<char> = joined_term.chars().collect();
        let distance = self
            .distance_algorithm
            .distance(&phrase_chars, &joined_chars, usize::MAX)
            .unwrap_or(usize::MAX);

        if self.debug {
            eprintln!("(compound correction: {} -> {})", phrase, joined_term);
        }

        Ok(SuggestItem::new(&joined_term, distance, joined_count as Count))
    }
}
