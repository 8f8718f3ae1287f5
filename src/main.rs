use std::env;
use std::process;

use termbank_reader::termbank::ProgressSink;
use termbank_reader::{CodeTable, Dictionary};

/// Prints load progress to stdout, one line per archive member.
struct PrintProgress;

impl ProgressSink for PrintProgress {
    fn member_loaded(&mut self, processed: usize, total: usize) {
        let percent = processed as f64 / total as f64 * 100.0;
        println!("Progress: {:.2}% ({}/{})", percent, processed, total);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <path-to-term-bank-zip> <word> [<word>...]", args[0]);
        process::exit(1);
    }

    let archive_path = &args[1];

    println!("Loading term bank archive: {}", archive_path);
    println!("{}", "=".repeat(60));

    let dictionary =
        match Dictionary::load_with(archive_path, CodeTable::default(), &mut PrintProgress) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                eprintln!("\nERROR: Failed to load term bank archive");
                eprintln!("  {}", e);
                process::exit(1);
            }
        };

    println!("{}", "=".repeat(60));
    println!(
        "Dictionary loaded: {} entries under {} headwords",
        dictionary.index().num_entries(),
        dictionary.index().num_headwords()
    );

    for word in &args[2..] {
        println!("\n{}", "=".repeat(60));
        println!("{}", word);

        let results = dictionary.lookup(word);
        if results.is_empty() {
            println!("  No entry found");
            continue;
        }

        for (i, result) in results.iter().enumerate() {
            let entry = result.entry;
            println!(
                "  {}. {} [{}] (sequence {})",
                i + 1,
                entry.headword,
                entry.reading,
                entry.sequence_id
            );
            if !entry.tags.is_empty() {
                println!("     tags: {}", entry.tags.join(", "));
            }
            for group in &result.glossary.codes {
                if !group.is_empty() {
                    println!("     codes: {}", group.join(", "));
                }
            }
            for definition in &result.glossary.definitions {
                println!("     definition: {}", definition);
            }
            for example in &result.glossary.examples {
                println!("     example: {}", example);
            }
        }
    }
}
