//! QSS Compiler CLI

use qssc::commands::{build_file, lex_file, parse_file};
use qssc::{init_tracing, CompileOptions};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "build" => {
            if args.len() < 3 {
                eprintln!("Usage: qssc build <file.qss> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -o <path>                   Output file (default: stdout)");
                eprintln!("  -I <dir>                    Add an import search directory");
                eprintln!("  --keyword=<alias>=<keyword> Accept <alias> as another spelling of <keyword>");
                std::process::exit(1);
            }
            let options = match CompileOptions::from_args(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            build_file(&args[2], &options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: qssc lex <file.qss>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: qssc parse <file.qss>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("qssc {}", env!("CARGO_PKG_VERSION"));
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
    println!("QSS Compiler");
    println!();
    println!("Usage: qssc <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file>   Compile a QSS file to a Qt style sheet");
    println!("  lex <file>     Print the token stream");
    println!("  parse <file>   Print a statement outline");
    println!("  help           Show this message");
    println!("  version        Show the compiler version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG       Enable logging (e.g. RUST_LOG=qss_eval=debug)");
    println!("  QSSC_LOG_TREE  Render log spans as a tree");
}
