//! Command handlers for the `qssc` binary.
//!
//! Each handler reports failures on stderr and exits the process with a
//! non-zero status.

mod build;
mod debug;

pub use build::build_file;
pub use debug::{lex_file, parse_file};

use qss_diagnostic::{Diagnostic, TextEmitter};

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn report(path: &str, source: &str, diagnostic: &Diagnostic) -> ! {
    eprint!("{}", TextEmitter::new(path, source).render(diagnostic));
    std::process::exit(1);
}
