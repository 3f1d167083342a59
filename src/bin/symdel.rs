extern crate clap;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::time::SystemTime;

use clap::{App, Arg, SubCommand};
use rayon::prelude::*;

use symdel::*;

fn output_lookup_as_tsv(input: &str, suggestions: &[SuggestItem]) {
    print!("{}", input);
    for suggestion in suggestions {
        print!("\t{}\t{}\t{}", suggestion.term, suggestion.distance, suggestion.count);
    }
    println!();
}

fn output_lookup_as_json(input: &str, suggestions: &[SuggestItem]) {
    println!(
        "{}",
        serde_json::json!({ "input": input, "suggestions": suggestions })
    );
}

fn output_compound_as_tsv(input: &str, suggestion: &SuggestItem) {
    println!(
        "{}\t{}\t{}\t{}",
        input, suggestion.term, suggestion.distance, suggestion.count
    );
}

fn output_compound_as_json(input: &str, suggestion: &SuggestItem) {
    println!(
        "{}",
        serde_json::json!({ "input": input, "suggestion": suggestion })
    );
}

fn show_progress(seqnr: usize, lasttime: SystemTime) -> SystemTime {
    let now = SystemTime::now();
    if lasttime >= now || seqnr <= 1 {
        eprintln!("@ {}", seqnr);
    } else {
        let elapsed = now
            .duration_since(lasttime)
            .expect("clock can't go backwards")
            .as_millis();
        let rate = 1000.0 / (elapsed as f64 / 1000.0);
        eprintln!("@ {} - processing speed was {:.0} items per second", seqnr, rate);
    }
    now
}

const BATCH_SIZE: usize = 1000;

fn process_lookup(
    model: &SymSpell,
    inputstream: impl Read,
    verbosity: Verbosity,
    max_edit_distance: usize,
    json: bool,
    progress: bool,
) {
    let f_buffer = BufReader::new(inputstream);
    let lines: Vec<String> = f_buffer.lines().filter_map(Result::ok).collect();
    let mut seqnr = 0;
    let mut progresstime = SystemTime::now();
    for batch in lines.chunks(BATCH_SIZE) {
        //the model is sealed by now, batches can fan out over all cores
        let results: Vec<Vec<SuggestItem>> = batch
            .par_iter()
            .map(|input| {
                model
                    .lookup(input, verbosity, max_edit_distance)
                    .expect("edit distance was validated on startup")
            })
            .collect();
        for (input, suggestions) in batch.iter().zip(results.iter()) {
            seqnr += 1;
            if progress && seqnr % BATCH_SIZE == 1 {
                progresstime = show_progress(seqnr, progresstime);
            }
            if json {
                output_lookup_as_json(input, suggestions);
            } else {
                output_lookup_as_tsv(input, suggestions);
            }
        }
    }
}

fn process_compound(
    model: &SymSpell,
    inputstream: impl Read,
    max_edit_distance: usize,
    json: bool,
    progress: bool,
) {
    let f_buffer = BufReader::new(inputstream);
    let lines: Vec<String> = f_buffer.lines().filter_map(Result::ok).collect();
    let mut seqnr = 0;
    let mut progresstime = SystemTime::now();
    for batch in lines.chunks(BATCH_SIZE) {
        let results: Vec<SuggestItem> = batch
            .par_iter()
            .map(|input| {
                model
                    .lookup_compound(input, max_edit_distance)
                    .expect("edit distance was validated on startup")
            })
            .collect();
        for (input, suggestion) in batch.iter().zip(results.iter()) {
            seqnr += 1;
            if progress && seqnr % BATCH_SIZE == 1 {
                progresstime = show_progress(seqnr, progresstime);
            }
            if json {
                output_compound_as_json(input, suggestion);
            } else {
                output_compound_as_tsv(input, suggestion);
            }
        }
    }
}

pub fn common_arguments<'a, 'b>() -> Vec<clap::Arg<'a, 'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(
        Arg::with_name("dictionary")
            .long("dictionary")
            .short("l")
            .help("Unigram frequency dictionary to correct against. A plain-text file with one term and its count per line, fields separated as indicated by --separator.")
            .takes_value(true)
            .required(true),
    );
    args.push(
        Arg::with_name("bigrams")
            .long("bigrams")
            .short("b")
            .help("Bigram frequency dictionary, used to score merge and split corrections in compound mode. Same format as --dictionary with a two-word key.")
            .takes_value(true),
    );
    args.push(
        Arg::with_name("term_index")
            .long("term-index")
            .help("Zero-based field index of the term column in the dictionary files")
            .takes_value(true)
            .default_value("0"),
    );
    args.push(
        Arg::with_name("count_index")
            .long("count-index")
            .help("Zero-based field index of the count column in the dictionary files")
            .takes_value(true)
            .default_value("1"),
    );
    args.push(
        Arg::with_name("separator")
            .long("separator")
            .help("Field separator in the dictionary files; when empty, fields split on whitespace runs")
            .takes_value(true)
            .default_value(""),
    );
    args.push(
        Arg::with_name("max_edit_distance")
            .long("max-edit-distance")
            .short("d")
            .help("Maximum edit distance (Damerau-Levenshtein); also determines the size of the delete index")
            .takes_value(true)
            .default_value("2"),
    );
    args.push(
        Arg::with_name("prefix_length")
            .long("prefix-length")
            .short("p")
            .help("Codepoint length of the indexed term prefix; must be greater than the maximum edit distance")
            .takes_value(true)
            .default_value("7"),
    );
    args.push(
        Arg::with_name("count_threshold")
            .long("count-threshold")
            .short("t")
            .help("Minimum accumulated count before a term is accepted into the vocabulary")
            .takes_value(true)
            .default_value("1"),
    );
    args.push(
        Arg::with_name("verbosity")
            .long("verbosity")
            .short("v")
            .help("Which suggestions to return per input: top, closest or all")
            .takes_value(true)
            .default_value("top"),
    );
    args.push(
        Arg::with_name("split_threshold")
            .long("split-threshold")
            .help("Count above which a single-token suggestion suppresses split-correction in compound mode")
            .takes_value(true),
    );
    args.push(
        Arg::with_name("min_char_to_change")
            .long("min-char-to-change")
            .help("Tokens at most this many codepoints long pass through compound correction unchanged")
            .takes_value(true)
            .default_value("0"),
    );
    args.push(
        Arg::with_name("preserve-case")
            .long("preserve-case")
            .help("Do not lowercase the input before tokenization in compound mode")
            .required(false),
    );
    args.push(
        Arg::with_name("split-by-space")
            .long("split-by-space")
            .help("Tokenize compound input by splitting on single spaces instead of scanning for word runs")
            .required(false),
    );
    args.push(
        Arg::with_name("split-word-and-number")
            .long("split-word-and-number")
            .help("Split runs of digits from adjacent runs of non-digits during compound tokenization")
            .required(false),
    );
    args.push(
        Arg::with_name("json")
            .long("json")
            .short("j")
            .help("Output json instead of tsv")
            .required(false),
    );
    args.push(
        Arg::with_name("progress")
            .long("progress")
            .help("Show progress")
            .required(false),
    );
    args.push(
        Arg::with_name("files")
            .help("Input files")
            .takes_value(true)
            .multiple(true)
            .required(false),
    );
    args
}

fn parse_verbosity(value: &str) -> Verbosity {
    match value {
        "top" => Verbosity::Top,
        "closest" => Verbosity::Closest,
        "all" => Verbosity::All,
        _ => panic!("Verbosity must be one of: top, closest, all"),
    }
}

fn main() {
    let rootargs = App::new("Symdel")
        .version("0.1")
        .about("Symmetric-delete spelling correction: single-term lookup and compound phrase correction against a frequency dictionary")
        .subcommand(
            SubCommand::with_name("query")
                .about("Look up suggestions for each input line (one term per line)")
                .args(&common_arguments()),
        )
        .subcommand(
            SubCommand::with_name("compound")
                .about("Correct each input line as a multi-word phrase, merging and splitting tokens where the frequencies favour it")
                .args(&common_arguments()),
        )
        .subcommand(
            SubCommand::with_name("index")
                .about("Compute and output the delete index")
                .args(&common_arguments()),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .short("D")
                .help("Debug")
                .required(false),
        )
        .get_matches();

    let args = if let Some(args) = rootargs.subcommand_matches("query") {
        args
    } else if let Some(args) = rootargs.subcommand_matches("compound") {
        args
    } else if let Some(args) = rootargs.subcommand_matches("index") {
        args
    } else {
        panic!("No command specified");
    };

    let max_edit_distance: usize = args
        .value_of("max_edit_distance")
        .unwrap()
        .parse::<usize>()
        .expect("Maximum edit distance should be an integer");
    let prefix_length: usize = args
        .value_of("prefix_length")
        .unwrap()
        .parse::<usize>()
        .expect("Prefix length should be an integer");
    let count_threshold: Count = args
        .value_of("count_threshold")
        .unwrap()
        .parse::<Count>()
        .expect("Count threshold should be an integer");
    let min_char_to_change: usize = args
        .value_of("min_char_to_change")
        .unwrap()
        .parse::<usize>()
        .expect("Minimum character count should be an integer");

    let mut options = SymspellOptions::default()
        .with_max_edit_distance(max_edit_distance)
        .with_prefix_length(prefix_length)
        .with_count_threshold(count_threshold)
        .with_min_char_to_change(min_char_to_change);
    if let Some(split_threshold) = args.value_of("split_threshold") {
        options = options.with_split_threshold(
            split_threshold
                .parse::<Count>()
                .expect("Split threshold should be an integer"),
        );
    }
    if args.is_present("preserve-case") {
        options = options.with_preserve_case();
    }
    if args.is_present("split-by-space") {
        options = options.with_split_by_space();
    }
    if args.is_present("split-word-and-number") {
        options = options.with_split_word_and_number();
    }
    if rootargs.is_present("debug") {
        options = options.with_debug();
    }

    eprintln!("Initializing model...");
    let mut model = SymSpell::new(&options).expect("Invalid model options");

    let term_index: usize = args
        .value_of("term_index")
        .unwrap()
        .parse::<usize>()
        .expect("Term index should be an integer");
    let count_index: usize = args
        .value_of("count_index")
        .unwrap()
        .parse::<usize>()
        .expect("Count index should be an integer");
    let separator = args.value_of("separator").unwrap();

    eprintln!("Loading dictionary...");
    let dictionary = args.value_of("dictionary").unwrap();
    model
        .load_dictionary(dictionary, term_index, count_index, separator)
        .unwrap_or_else(|e| panic!("Error reading dictionary {}: {}", dictionary, e));
    eprintln!(
        " - Loaded {} terms (max length {})",
        model.word_count(),
        model.max_length()
    );

    if let Some(bigrams) = args.value_of("bigrams") {
        eprintln!("Loading bigrams...");
        model
            .load_bigram_dictionary(bigrams, term_index, count_index, separator)
            .unwrap_or_else(|e| panic!("Error reading bigram dictionary {}: {}", bigrams, e));
        eprintln!(" - Loaded {} bigrams", model.bigrams.len());
    }

    let verbosity = parse_verbosity(args.value_of("verbosity").unwrap());
    let json = args.is_present("json");
    let progress = args.is_present("progress");

    if rootargs.subcommand_matches("index").is_some() {
        eprintln!("Computing and outputting the delete index...");
        for (variant, originals) in model.deletes.iter() {
            print!("{}", variant);
            for original in originals.iter() {
                print!("\t{}", original);
            }
            println!();
        }
        return;
    }

    if rootargs.subcommand_matches("query").is_some() {
        eprintln!("Querying the model...");
    } else {
        eprintln!("Correcting phrases...");
    }

    let files: Vec<_> = if args.is_present("files") {
        args.values_of("files").unwrap().collect()
    } else {
        vec!["-"]
    };
    for filename in files {
        match filename {
            "-" | "STDIN" | "stdin" => {
                eprintln!("(accepting standard input; enter input to correct, one per line)");
                let stdin = io::stdin();
                if rootargs.subcommand_matches("query").is_some() {
                    process_lookup(&model, stdin, verbosity, max_edit_distance, json, progress);
                } else {
                    process_compound(&model, stdin, max_edit_distance, json, progress);
                }
            }
            _ => {
                let f = File::open(filename)
                    .unwrap_or_else(|e| panic!("Unable to open file {}: {}", filename, e));
                if rootargs.subcommand_matches("query").is_some() {
                    process_lookup(&model, f, verbosity, max_edit_distance, json, progress);
                } else {
                    process_compound(&model, f, max_edit_distance, json, progress);
                }
            }
        }
    }
}
