use std::path::Path;

use crate::{compile, CompileOptions, FsLoader};

use super::{read_file, report};

/// Compile `path` and write the result to `options.output` or stdout.
pub fn build_file(path: &str, options: &CompileOptions) {
    let source = read_file(path);
    let loader = FsLoader::for_entry(Path::new(path))
        .with_include_paths(options.include_paths.iter().cloned());

    let output = match compile(&source, options, &loader) {
        Ok(output) => output,
        Err(err) => match err.to_diagnostic() {
            Some(diagnostic) => report(path, &source, &diagnostic),
            None => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
    };

    match &options.output {
        Some(out) => {
            if let Err(e) = std::fs::write(out, format!("{output}\n")) {
                eprintln!("error: cannot write '{}': {e}", out.display());
                std::process::exit(1);
            }
            tracing::debug!(output = %out.display(), "wrote style sheet");
        }
        None => println!("{output}"),
    }
}
