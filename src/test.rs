use crate::*;

pub const SIMPLE_LEXICON: &[(&str, Count)] = &[("steama", 4), ("steamb", 6), ("steamc", 2)];

///A miniature English vocabulary, large enough to exercise merge and split
///correction without shipping a full frequency corpus
pub const ENGLISH_LEXICON: &[(&str, Count)] = &[
    ("where", 123456),
    ("is", 8790),
    ("the", 30000),
    ("love", 1000),
    ("he", 4000),
    ("had", 2000),
    ("dated", 500),
    ("for", 10000),
    ("much", 900),
    ("of", 20000),
    ("past", 700),
    ("who", 3000),
    ("can", 7000),
    ("you", 6000),
    ("read", 1500),
    ("this", 5000),
    ("secret", 600),
    ("plan", 650),
    ("without", 800),
];

pub const ENGLISH_BIGRAMS: &[(&str, Count)] = &[
    ("where is", 10000),
    ("is the", 8000),
    ("the love", 1200),
    ("he had", 5000),
    ("for much", 300),
    ("of the", 15000),
    ("the past", 2000),
    ("read this", 400),
    ("secret plan", 350),
];

///Persian entries mirroring the kind of street/landmark vocabulary the
///engine is typically loaded with; exercises codepoint-correct slicing
pub const FARSI_LEXICON: &[(&str, Count)] = &[
    ("خیابان", 500),
    ("میدان", 450),
    ("ملاصدرا", 400),
    ("کارگر", 350),
    ("تجریش", 300),
    ("بیمارستان", 250),
    ("ایستگاه", 200),
    ("ازمایشگاه", 180),
    ("شهریور", 160),
    ("خرداد", 150),
    ("ازادی", 140),
    ("تهران", 130),
];

pub const FARSI_BIGRAMS: &[(&str, Count)] = &[
    ("خیابان کارگر", 100),
    ("میدان ملاصدرا", 90),
    ("خیابان ملاصدرا", 80),
];

///Build an engine from a seeded entry slice
pub fn seeded_model(entries: &[(&str, Count)], options: &SymspellOptions) -> SymSpell {
    let mut model = SymSpell::new(options).expect("valid test options");
    for (term, count) in entries {
        model.create_dictionary_entry(term, *count);
    }
    model
}

///Build an engine with both unigram and bigram entries seeded
pub fn seeded_bigram_model(
    entries: &[(&str, Count)],
    bigrams: &[(&str, Count)],
    options: &SymspellOptions,
) -> SymSpell {
    let mut model = seeded_model(entries, options);
    for (key, count) in bigrams {
        model.create_bigram_entry(key, *count);
    }
    model
}

pub fn english_compound_model() -> SymSpell {
    let options = SymspellOptions::default()
        .with_max_edit_distance(2)
        .with_prefix_length(7)
        .with_count_threshold(1)
        .with_split_by_space();
    seeded_bigram_model(ENGLISH_LEXICON, ENGLISH_BIGRAMS, &options)
}

pub fn farsi_compound_model() -> SymSpell {
    let options = SymspellOptions::default()
        .with_max_edit_distance(3)
        .with_prefix_length(5)
        .with_count_threshold(1)
        .with_split_threshold(100)
        .with_min_char_to_change(2)
        .with_split_by_space()
        .with_split_word_and_number();
    seeded_bigram_model(FARSI_LEXICON, FARSI_BIGRAMS, &options)
}
