use std::{env, fs::read_to_string, path::PathBuf, process, str::FromStr, time::Instant};

use clap::Parser as _;
use log::info;
use parser_engine::{
    format_error,
    lexer::lexer::tokenize,
    parser::{
        engine::{ParseOptions, DEFAULT_MAX_DEPTH},
        grammar::create_grammar,
        parser::Parser,
    },
};

#[derive(clap::Parser, Debug)]
#[command(name = "parser-engine", bin_name = "parser-engine")]
#[command(about = "Parses a source file and prints its syntax tree")]
struct Cli {
    /// Source file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the token stream before the tree
    #[arg(long)]
    tokens: bool,

    /// Print the tree as a single s-expression
    #[arg(long)]
    compact: bool,

    /// Maximum nesting of rule evaluations before giving up
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    init_logger();

    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", format_error(&error, &source));
            process::exit(1);
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();

    let grammar = create_grammar();
    let mut parser = Parser::new(tokens, &grammar).with_options(ParseOptions {
        max_depth: cli.max_depth,
    });

    if let Err(error) = parser.parse() {
        eprint!("{}", format_error(&error, &source));
        process::exit(1);
    }

    info!("Parsed in {:?}", parse_start.elapsed());

    let tree = parser.into_tree();
    if cli.compact {
        println!("{}", tree.sexp());
    } else {
        print!("{}", tree);
    }

    info!("Total time: {:?}", start.elapsed());
}

/// Log level comes from `RUST_LOG`, warnings only by default.
fn init_logger() {
    let level = env::var("RUST_LOG")
        .ok()
        .and_then(|level| log::LevelFilter::from_str(&level).ok())
        .unwrap_or(log::LevelFilter::Warn);

    // Tree output goes to stdout, so logging stays on stderr.
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    );
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser as _};

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["parser-engine", "program.lang"]).unwrap();

        assert_eq!(cli.file, PathBuf::from("program.lang"));
        assert!(!cli.tokens);
        assert!(!cli.compact);
        assert_eq!(cli.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "parser-engine",
            "--tokens",
            "--compact",
            "--max-depth",
            "64",
            "program.lang",
        ])
        .unwrap();

        assert!(cli.tokens);
        assert!(cli.compact);
        assert_eq!(cli.max_depth, 64);
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        assert!(Cli::try_parse_from(["parser-engine"]).is_err());
        assert!(Cli::try_parse_from(["parser-engine", "a.lang", "--max-depth", "deep"]).is_err());
        assert!(Cli::try_parse_from(["parser-engine", "a.lang", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["parser-engine", "a.lang", "b.lang"]).is_err());
    }
}
