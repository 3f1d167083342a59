use std::cmp::{max, min};
use std::collections::HashSet;

use simple_error::SimpleError;

use crate::types::*;
use crate::SymSpell;

///Per-query scratch state for the candidate expansion: the FIFO candidate
///queue, the two deduplication sets and the tightening distance bound. Owned
///by a single lookup call and released on return.
struct CandidateProcessor {
    candidates: Vec<String>,
    candidate_pointer: usize,
    considered_deletes: HashSet<String>,
    considered_suggestions: HashSet<String>,
    ///The effective maximum distance; tightens as better suggestions are
    ///found in the Top and Closest modes
    max_edit_distance2: usize,
}

impl CandidateProcessor {
    fn new(max_edit_distance: usize) -> Self {
        Self {
            candidates: Vec::new(),
            candidate_pointer: 0,
            considered_deletes: HashSet::new(),
            considered_suggestions: HashSet::new(),
            max_edit_distance2: max_edit_distance,
        }
    }
}

impl SymSpell {
    ///Find vocabulary terms within `max_edit_distance` of `phrase`, shaped
    ///by the verbosity policy and sorted by ascending distance then
    ///descending count.
    ///
    ///Candidates are found by expanding the query's prefix-deletions
    ///breadth-first against the delete index; every hit is verified with the
    ///true distance measure. Cheap length- and suffix-based lower bounds
    ///reject most hits before the quadratic distance computation runs.
    pub fn lookup(
        &self,
        phrase: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Result<Vec<SuggestItem>, SimpleError> {
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SimpleError::new("distance too large"));
        }

        let phrase_chars: Vec<char> = phrase.chars().collect();
        let phrase_len = phrase_chars.len();
        let mut suggestions: Vec<SuggestItem> = Vec::new();

        //the query is too long to match anything in the vocabulary
        if phrase_len > self.max_length() + max_edit_distance {
            return Ok(suggestions);
        }

        if let Some(&count) = self.words.get(phrase) {
            suggestions.push(SuggestItem::new(phrase, 0, count));
            if verbosity != Verbosity::All {
                return Ok(suggestions);
            }
        }

        if max_edit_distance == 0 {
            return Ok(suggestions);
        }

        let mut cp = CandidateProcessor::new(max_edit_distance);
        cp.considered_suggestions.insert(phrase.to_string());

        let phrase_prefix: String = if phrase_len > self.prefix_length {
            phrase_chars[..self.prefix_length].iter().collect()
        } else {
            phrase.to_string()
        };
        cp.candidates.push(phrase_prefix);

        if self.debug {
            eprintln!("(looking up variants for: {})", phrase);
        }

        while cp.candidate_pointer < cp.candidates.len() {
            let candidate = cp.candidates[cp.candidate_pointer].clone();
            cp.candidate_pointer += 1;
            let candidate_chars: Vec<char> = candidate.chars().collect();
            let candidate_len = candidate_chars.len();
            let len_diff = phrase_len - candidate_len;

            //candidates only get shorter, so in the non-exhaustive modes no
            //later candidate can beat the current bound either
            if len_diff > cp.max_edit_distance2 {
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(dict_suggestions) = self.deletes.get(&candidate) {
                for suggestion in dict_suggestions {
                    if suggestion == phrase {
                        continue;
                    }
                    let suggestion_chars: Vec<char> = suggestion.chars().collect();
                    let suggestion_len = suggestion_chars.len();

                    if suggestion_len.abs_diff(phrase_len) > cp.max_edit_distance2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion != &candidate)
                    {
                        continue;
                    }
                    let suggestion_prefix_len = min(suggestion_len, self.prefix_length);
                    if suggestion_prefix_len > phrase_len
                        && suggestion_prefix_len - candidate_len > cp.max_edit_distance2
                    {
                        continue;
                    }

                    let distance;
                    if candidate_len == 0 {
                        //the empty candidate matches any suggestion; the
                        //distance is simply the longer length
                        distance = max(phrase_len, suggestion_len);
                        if distance > cp.max_edit_distance2
                            || cp.considered_suggestions.contains(suggestion.as_str())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        //a single-codepoint suggestion either occurs in the
                        //phrase (one deletion less) or it does not
                        distance = if phrase_chars.contains(&suggestion_chars[0]) {
                            phrase_len - 1
                        } else {
                            phrase_len
                        };
                        if distance > cp.max_edit_distance2
                            || cp.considered_suggestions.contains(suggestion.as_str())
                        {
                            continue;
                        }
                    } else {
                        //when the candidate is a full-length prefix delete,
                        //phrase and suggestion share the whole indexed prefix
                        //and must agree on the tail beyond it, up to a single
                        //adjacent transposition at the boundary
                        if self.prefix_length - max_edit_distance == candidate_len {
                            let min_common =
                                min(phrase_len, suggestion_len) as isize - self.prefix_length as isize;
                            if min_common > 1 {
                                let min_common = min_common as usize;
                                if phrase_chars[phrase_len + 1 - min_common..]
                                    != suggestion_chars[suggestion_len + 1 - min_common..]
                                {
                                    continue;
                                }
                            }
                            if min_common > 0 {
                                let min_common = min_common as usize;
                                if phrase_chars[phrase_len - min_common]
                                    != suggestion_chars[suggestion_len - min_common]
                                    && (phrase_chars[phrase_len - min_common - 1]
                                        != suggestion_chars[suggestion_len - min_common]
                                        || phrase_chars[phrase_len - min_common]
                                            != suggestion_chars[suggestion_len - min_common - 1])
                                {
                                    continue;
                                }
                            }
                        }
                        if cp.considered_suggestions.contains(suggestion.as_str()) {
                            continue;
                        }
                        cp.considered_suggestions.insert(suggestion.clone());
                        distance = match self.distance_algorithm.distance(
                            &phrase_chars,
                            &suggestion_chars,
                            cp.max_edit_distance2,
                        ) {
                            Some(distance) => distance,
                            None => continue,
                        };
                    }

                    if distance <= cp.max_edit_distance2 {
                        let suggestion_count = self.words.get(suggestion).copied().unwrap_or(0);
                        let item = SuggestItem::new(suggestion, distance, suggestion_count);
                        if self.debug {
                            eprintln!("   (variant={}, distance={}, count={})", suggestion, distance, suggestion_count);
                        }
                        if !suggestions.is_empty() {
                            match verbosity {
                                Verbosity::Closest => {
                                    //keep only suggestions at the smallest distance seen so far
                                    if distance < cp.max_edit_distance2 {
                                        suggestions.clear();
                                    }
                                }
                                Verbosity::Top => {
                                    if distance < cp.max_edit_distance2
                                        || suggestion_count > suggestions[0].count
                                    {
                                        cp.max_edit_distance2 = distance;
                                        suggestions[0] = item;
                                    }
                                    continue;
                                }
                                Verbosity::All => {}
                            }
                        }
                        if verbosity != Verbosity::All {
                            cp.max_edit_distance2 = distance;
                        }
                        suggestions.push(item);
                    }
                }
            }

            //expand the candidate by one more deletion round
            if len_diff <= max_edit_distance && candidate_len <= self.prefix_length {
                if verbosity != Verbosity::All && len_diff >= cp.max_edit_distance2 {
                    continue;
                }
                for i in 0..candidate_len {
                    let mut delete_item = String::with_capacity(candidate.len());
                    delete_item.extend(candidate_chars[..i].iter());
                    delete_item.extend(candidate_chars[i + 1..].iter());
                    if !cp.considered_deletes.contains(delete_item.as_str()) {
                        cp.considered_deletes.insert(delete_item.clone());
                        cp.candidates.push(delete_item);
                    }
                }
            }
        }

        if suggestions.len() > 1 {
            suggestions.sort_unstable_by(|a, b| {
                a.distance.cmp(&b.distance).then(b.count.cmp(&a.count))
            });
        }

        if self.debug {
            eprintln!("(found {} suggestions for: {})", suggestions.len(), phrase);
        }

        Ok(suggestions)
    }
}
