//! Command handlers. Each one prints its result and exits with status 1 on
//! failure.

use toodle_lexer::lex;
use toodlec::{Reader, ReaderOptions};

/// Arguments shared by `check` and `json`.
pub struct CommandOptions {
    pub path: String,
    pub schema: Option<String>,
    pub meta_schema: Option<String>,
    pub validate_schema: bool,
    pub compact: bool,
}

impl CommandOptions {
    /// `None` when the document path is missing or an option lacks its value.
    pub fn parse(args: &[String]) -> Option<Self> {
        let mut path = None;
        let mut schema = None;
        let mut meta_schema = None;
        let mut validate_schema = true;
        let mut compact = false;

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if let Some(value) = arg.strip_prefix("--schema=") {
                schema = Some(value.to_owned());
            } else if let Some(value) = arg.strip_prefix("--meta-schema=") {
                meta_schema = Some(value.to_owned());
            } else if arg == "--schema" || arg == "--meta-schema" {
                let value = args.get(i + 1)?.clone();
                if arg == "--schema" {
                    schema = Some(value);
                } else {
                    meta_schema = Some(value);
                }
                i += 1;
            } else if arg == "--no-meta" {
                validate_schema = false;
            } else if arg == "--compact" {
                compact = true;
            } else if !arg.starts_with('-') && path.is_none() {
                path = Some(arg.to_owned());
            } else {
                eprintln!("warning: ignoring argument '{arg}'");
            }
            i += 1;
        }

        Some(CommandOptions {
            path: path?,
            schema,
            meta_schema,
            validate_schema,
            compact,
        })
    }

    fn reader(&self) -> Reader {
        Reader::new(ReaderOptions {
            expand: true,
            validate_schema: self.validate_schema,
            meta_schema: self.meta_schema.as_deref().map(read_file),
        })
    }
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        std::process::exit(1);
    })
}

fn read_tree(options: &CommandOptions) -> toodle_ir::Tree {
    let document = read_file(&options.path);
    let reader = options.reader();
    let result = match &options.schema {
        Some(schema) => reader.read_with_schema(&document, &read_file(schema)),
        None => reader.read(&document),
    };
    result.unwrap_or_else(|err| {
        eprintln!("error: {}: {err}", options.path);
        std::process::exit(1);
    })
}

pub fn check_file(options: &CommandOptions) {
    let tree = read_tree(options);
    let count = tree.definitions().len();
    match &options.schema {
        Some(schema) => println!("{}: ok, {count} definitions valid against {schema}", options.path),
        None => println!("{}: ok, {count} definitions", options.path),
    }
}

pub fn json_file(options: &CommandOptions) {
    let tree = read_tree(options);
    match toodle_fmt::to_json_string(&tree, !options.compact) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: {}: {err}", options.path);
            std::process::exit(1);
        }
    }
}

pub fn format_file(path: &str, expand: bool) {
    let source = read_file(path);
    let reader = Reader::new(ReaderOptions {
        expand,
        ..ReaderOptions::default()
    });
    match reader.read(&source) {
        Ok(tree) => print!("{}", toodle_fmt::write_tree(&tree)),
        Err(err) => {
            eprintln!("error: {path}: {err}");
            std::process::exit(1);
        }
    }
}

pub fn lex_file(path: &str) {
    let source = read_file(path);
    let tokens = lex(&source);

    println!("Tokens for '{path}' ({} tokens):", tokens.len());
    for token in &tokens.tokens {
        let kind = format!("{:?}", token.kind);
        println!("  {:>4}  {kind:<14} {:?}", token.line, token.text(&source));
    }

    let errors = tokens.errors().count();
    if errors > 0 {
        eprintln!("{errors} invalid token(s)");
        std::process::exit(1);
    }
}
