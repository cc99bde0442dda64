//! interpreter: parse a source file and print its canonical form.
//!
//! Usage:
//!   interpreter [FILE] [--tokens] [--quiet]
//!
//! Reads standard input when FILE is omitted or `-`. Set `RUST_LOG` (for
//! example `RUST_LOG=interpreter=trace`) to see parser tracing.

use std::{
    io::{self, Read},
    path::Path,
    process,
    sync::Once,
};

use clap::Parser as ClapParser;
use interpreter::{
    display_error,
    lexer::{
        lexer::Lexer,
        tokens::{TokenKind, TokenSource},
    },
    parser::parser::parse,
};

#[derive(ClapParser, Debug)]
#[command(name = "interpreter", about = "Parse a source file and print its canonical form")]
struct Cli {
    /// Source file to read, `-` for standard input.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Print the token stream instead of parsing.
    #[arg(long)]
    tokens: bool,

    /// Print diagnostics only.
    #[arg(short, long)]
    quiet: bool,
}

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn read_source(file: Option<&str>) -> io::Result<(String, String)> {
    match file {
        None | Some("-") => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, String::from("<stdin>")))
        }
        Some(path) => {
            let source = std::fs::read_to_string(path)?;
            let name = Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            Ok((source, name))
        }
    }
}

fn dump_tokens(source: String, file_name: String) {
    let mut lexer = Lexer::new(source, Some(file_name));

    loop {
        let token = lexer.next_token();
        println!("{:>5}  {:<10} {:?}", token.span.start.0, token.kind.name(), token.value);

        if token.is(TokenKind::EOF) {
            break;
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let (source, file_name) = match read_source(cli.file.as_deref()) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", cli.file.as_deref().unwrap_or("<stdin>"));
            process::exit(2);
        }
    };

    if cli.tokens {
        dump_tokens(source, file_name);
        return;
    }

    let (program, errors) = parse(source.clone(), Some(file_name.clone()));

    if !errors.is_empty() {
        for error in &errors {
            display_error(error, &source, &file_name);
        }
        eprintln!("{} error(s) in {file_name}", errors.len());
        process::exit(1);
    }

    if !cli.quiet {
        for stmt in &program.statements {
            println!("{stmt}");
        }
    }
}
