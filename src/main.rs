use std::{fs, io, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// playscript runs small scripts: `let` variables, parameterless functions,
/// arithmetic and `println`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells playscript to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the syntax tree before and after name resolution.
    #[arg(short, long)]
    dump: bool,

    /// Only reports unresolved names, not warnings.
    #[arg(short, long)]
    quiet: bool,

    contents: String,
}

/// Sends diagnostics to stderr. `RUST_LOG` overrides the default level.
fn install_tracing(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .without_time()
                                     .with_target(false)
                                     .try_init();
}

fn main() {
    let args = Args::parse();
    install_tracing(args.quiet);

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };

    let (program, diagnostics) = playscript::parse(&script);
    if args.dump {
        print!("{program}");
    }

    let mut compilation = playscript::analyze(program, diagnostics);
    if args.dump {
        print!("{}", compilation.program);
    }

    if let Err(e) = compilation.execute(&mut io::stdout().lock()) {
        eprintln!("{e}");
        process::exit(1);
    }
}
