//! Compilation options and their command-line form.

use std::path::PathBuf;

use qss_ir::TokenKind;
use qss_lexer::Keywords;

/// Options for one compilation.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Extra keyword spellings, e.g. `@use` for `@import`.
    pub keyword_aliases: Vec<(String, TokenKind)>,
    /// Directories searched for imports after the entry file's directory.
    pub include_paths: Vec<PathBuf>,
    /// Output file; standard output when `None`.
    pub output: Option<PathBuf>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keyword_alias(mut self, lexeme: impl Into<String>, kind: TokenKind) -> Self {
        self.keyword_aliases.push((lexeme.into(), kind));
        self
    }

    #[must_use]
    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// The keyword table with all aliases applied.
    pub fn keywords(&self) -> Keywords {
        self.keyword_aliases
            .iter()
            .fold(Keywords::new(), |keywords, (lexeme, kind)| {
                keywords.with_alias(lexeme.clone(), *kind)
            })
    }

    /// Parse `build` flags following the input path.
    ///
    /// Recognised: `-o <path>`, `-o=<path>`, `-I <dir>`, `-I<dir>` and
    /// `--keyword=<alias>=<keyword>` (for example `--keyword=@use=@import`).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut options = CompileOptions::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            if arg == "-o" {
                let path = args.next().ok_or("`-o` needs a path")?;
                options.output = Some(PathBuf::from(path));
            } else if let Some(path) = arg.strip_prefix("-o=") {
                options.output = Some(PathBuf::from(path));
            } else if arg == "-I" {
                let dir = args.next().ok_or("`-I` needs a directory")?;
                options.include_paths.push(PathBuf::from(dir));
            } else if let Some(dir) = arg.strip_prefix("-I") {
                options.include_paths.push(PathBuf::from(dir));
            } else if let Some(pair) = arg.strip_prefix("--keyword=") {
                let (alias, keyword) = parse_alias(pair)?;
                options.keyword_aliases.push((alias, keyword));
            } else {
                return Err(format!("unknown option `{arg}`"));
            }
        }
        Ok(options)
    }
}

fn parse_alias(pair: &str) -> Result<(String, TokenKind), String> {
    let Some((alias, keyword)) = pair.split_once('=') else {
        return Err(format!("expected `<alias>=<keyword>`, found `{pair}`"));
    };
    let kind = Keywords::new()
        .lookup(keyword)
        .ok_or_else(|| format!("`{keyword}` is not a keyword"))?;
    Ok((alias.to_owned(), kind))
}
