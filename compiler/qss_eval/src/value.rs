//! Runtime values.
//!
//! Every number renders with exactly one decimal place (`5` is `5.0`,
//! `20px` is `20.0px`). Text and colours render verbatim, quotes included.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    /// Number with a unit suffix such as `px` or `%`.
    Dimension {
        value: f64,
        unit: String,
    },
    Text(String),
    Color(String),
    Bool(bool),
    /// Result of a statement that produces no value.
    Unit,
}

impl Value {
    /// Name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Dimension { .. } => "dimension",
            Value::Text(_) => "string",
            Value::Color(_) => "colour",
            Value::Bool(_) => "boolean",
            Value::Unit => "unit",
        }
    }

    /// Magnitude and unit of a numeric value (`None` unit for plain numbers).
    pub fn as_numeric(&self) -> Option<(f64, Option<&str>)> {
        match self {
            Value::Number(n) => Some((*n, None)),
            Value::Dimension { value, unit } => Some((*value, Some(unit.as_str()))),
            _ => None,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Value::Text(_) | Value::Color(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n:.1}"),
            Value::Dimension { value, unit } => write!(f, "{value:.1}{unit}"),
            Value::Text(text) | Value::Color(text) => f.write_str(text),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Unit => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_one_decimal() {
        assert_eq!(Value::Number(5.0).to_string(), "5.0");
        assert_eq!(Value::Number(30.0).to_string(), "30.0");
        assert_eq!(Value::Number(1.26).to_string(), "1.3");
        assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn dimension_keeps_unit() {
        let value = Value::Dimension {
            value: 20.0,
            unit: "px".to_owned(),
        };
        assert_eq!(value.to_string(), "20.0px");
        assert_eq!(value.as_numeric(), Some((20.0, Some("px"))));
    }

    #[test]
    fn text_and_colour_verbatim() {
        assert_eq!(Value::Text("\"Arial\"".to_owned()).to_string(), "\"Arial\"");
        assert_eq!(Value::Color("#ff0000".to_owned()).to_string(), "#ff0000");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Unit.to_string(), "");
    }
}
