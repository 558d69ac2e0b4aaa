//! Directive keyword table and colour-name lookup.
//!
//! Keyword lexemes are the `@`/`!` sigil plus the name that follows it.
//! The table is fixed once a lexer is built; hosts add aliases beforehand
//! with [`Keywords::with_alias`].

use qss_ir::TokenKind;
use rustc_hash::FxHashMap;

const DEFAULT_KEYWORDS: &[(&str, TokenKind)] = &[
    ("@import", TokenKind::Import),
    ("@extend", TokenKind::Extend),
    ("@mixin", TokenKind::Mixin),
    ("@include", TokenKind::Include),
    ("@if", TokenKind::If),
    ("@else", TokenKind::Else),
    ("!default", TokenKind::Default),
    ("!global", TokenKind::Global),
    ("!important", TokenKind::Important),
];

/// Mapping from keyword lexeme to token kind.
#[derive(Clone, Debug)]
pub struct Keywords {
    table: FxHashMap<String, TokenKind>,
}

impl Keywords {
    /// The built-in directive set.
    pub fn new() -> Self {
        let table = DEFAULT_KEYWORDS
            .iter()
            .map(|&(lexeme, kind)| (lexeme.to_owned(), kind))
            .collect();
        Keywords { table }
    }

    /// Register `lexeme` (sigil included, e.g. `@use`) as another spelling
    /// of a keyword kind. Non-keyword kinds are ignored.
    #[must_use]
    pub fn with_alias(mut self, lexeme: impl Into<String>, kind: TokenKind) -> Self {
        let lexeme = lexeme.into();
        if kind.is_keyword() && lexeme.starts_with(['@', '!']) {
            self.table.insert(lexeme, kind);
        } else {
            tracing::warn!(%lexeme, ?kind, "ignoring keyword alias");
        }
        self
    }

    #[inline]
    pub fn lookup(&self, lexeme: &str) -> Option<TokenKind> {
        self.table.get(lexeme).copied()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new()
    }
}

/// The 147 SVG colour keywords plus `transparent`, lowercase and sorted.
const COLOR_NAMES: &[&str] = &[
    "aliceblue",
    "antiquewhite",
    "aqua",
    "aquamarine",
    "azure",
    "beige",
    "bisque",
    "black",
    "blanchedalmond",
    "blue",
    "blueviolet",
    "brown",
    "burlywood",
    "cadetblue",
    "chartreuse",
    "chocolate",
    "coral",
    "cornflowerblue",
    "cornsilk",
    "crimson",
    "cyan",
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkslategrey",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "deepskyblue",
    "dimgray",
    "dimgrey",
    "dodgerblue",
    "firebrick",
    "floralwhite",
    "forestgreen",
    "fuchsia",
    "gainsboro",
    "ghostwhite",
    "gold",
    "goldenrod",
    "gray",
    "green",
    "greenyellow",
    "grey",
    "honeydew",
    "hotpink",
    "indianred",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "lavenderblush",
    "lawngreen",
    "lemonchiffon",
    "lightblue",
    "lightcoral",
    "lightcyan",
    "lightgoldenrodyellow",
    "lightgray",
    "lightgreen",
    "lightgrey",
    "lightpink",
    "lightsalmon",
    "lightseagreen",
    "lightskyblue",
    "lightslategray",
    "lightslategrey",
    "lightsteelblue",
    "lightyellow",
    "lime",
    "limegreen",
    "linen",
    "magenta",
    "maroon",
    "mediumaquamarine",
    "mediumblue",
    "mediumorchid",
    "mediumpurple",
    "mediumseagreen",
    "mediumslateblue",
    "mediumspringgreen",
    "mediumturquoise",
    "mediumvioletred",
    "midnightblue",
    "mintcream",
    "mistyrose",
    "moccasin",
    "navajowhite",
    "navy",
    "oldlace",
    "olive",
    "olivedrab",
    "orange",
    "orangered",
    "orchid",
    "palegoldenrod",
    "palegreen",
    "paleturquoise",
    "palevioletred",
    "papayawhip",
    "peachpuff",
    "peru",
    "pink",
    "plum",
    "powderblue",
    "purple",
    "red",
    "rosybrown",
    "royalblue",
    "saddlebrown",
    "salmon",
    "sandybrown",
    "seagreen",
    "seashell",
    "sienna",
    "silver",
    "skyblue",
    "slateblue",
    "slategray",
    "slategrey",
    "snow",
    "springgreen",
    "steelblue",
    "tan",
    "teal",
    "thistle",
    "tomato",
    "transparent",
    "turquoise",
    "violet",
    "wheat",
    "white",
    "whitesmoke",
    "yellow",
    "yellowgreen",
];

/// Length of `lightgoldenrodyellow`.
const MAX_COLOR_NAME_LEN: usize = 20;

/// Whether `word` names a colour (ASCII case-insensitive).
pub fn is_color_name(word: &str) -> bool {
    if word.len() > MAX_COLOR_NAME_LEN {
        return false;
    }
    let lower = word.to_ascii_lowercase();
    COLOR_NAMES.binary_search(&lower.as_str()).is_ok()
}
