//! The `toodle` command-line tool.

mod commands;

use commands::{check_file, format_file, json_file, lex_file, CommandOptions};

fn main() {
    toodlec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let Some(options) = CommandOptions::parse(&args[2..]) else {
                eprintln!("Usage: toodle check <file.2dl> [--schema <schema.2dl>]");
                std::process::exit(1);
            };
            check_file(&options);
        }
        "fmt" => {
            if args.len() < 3 {
                eprintln!("Usage: toodle fmt <file.2dl> [--expand]");
                std::process::exit(1);
            }
            let expand = args.iter().skip(3).any(|a| a == "--expand");
            format_file(&args[2], expand);
        }
        "json" => {
            let Some(options) = CommandOptions::parse(&args[2..]) else {
                eprintln!("Usage: toodle json <file.2dl> [--schema <schema.2dl>] [--compact]");
                std::process::exit(1);
            };
            json_file(&options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: toodle lex <file.2dl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("toodle {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("toodle: read, validate and export 2DL documents");
    println!();
    println!("Usage: toodle <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.2dl>     Parse, expand and validate a document");
    println!("  fmt <file.2dl>       Print a document in canonical form");
    println!("  json <file.2dl>      Print a document as JSON");
    println!("  lex <file.2dl>       Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check and json options:");
    println!("  --schema <path>      Validate against a schema document");
    println!("  --meta-schema <path> Validate the schema against this meta-schema");
    println!("  --no-meta            Do not validate the schema itself");
    println!("  --compact            Print JSON on one line");
    println!();
    println!("Fmt options:");
    println!("  --expand             Resolve aliases and constants first");
    println!();
    println!("Logging:");
    println!("  TOODLE_LOG=<filter>  Enable logs, e.g. TOODLE_LOG=toodle_expand=trace");
    println!("  TOODLE_LOG_TREE=1    Print spans as a tree");
    println!();
    println!("Examples:");
    println!("  toodle check database.2dl --schema schema.2dl");
    println!("  toodle json database.2dl --compact");
    println!("  toodle fmt schema.2dl");
}
