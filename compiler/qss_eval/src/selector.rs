//! Selector composition for nested rulesets.
//!
//! A ruleset header is a token sequence that may hold several comma
//! separated groups. Each group is rendered to text (descendant
//! combinators as one space, child combinators as ` > `) and combined with
//! every enclosing group:
//!
//! - a group containing `&` has each `&` replaced by the parent text, so
//!   `QCheckBox` + `&::indicator` is `QCheckBox::indicator`;
//! - any other group is appended to the parent after one space.

use qss_ir::{Selector, Span, TokenKind};

use crate::EvalError;

/// Compose `selectors` under `parents`, or as a root ruleset when
/// `parents` is `None`.
pub(crate) fn compose(
    parents: Option<&[String]>,
    selectors: &[Selector],
    span: Span,
) -> Result<Vec<String>, EvalError> {
    let groups: Vec<&[Selector]> = selectors
        .split(|sel| sel.token.is(TokenKind::Comma))
        .filter(|group| !group.is_empty())
        .collect();

    let Some(parents) = parents else {
        return groups
            .iter()
            .map(|group| {
                if let Some(amp) = group.iter().find(|sel| is_parent_reference(sel)) {
                    return Err(EvalError::ParentReferenceOutsideRuleset {
                        span: if amp.token.span.is_empty() {
                            span
                        } else {
                            amp.token.span
                        },
                    });
                }
                Ok(render(group, ""))
            })
            .collect();
    };

    let mut composed = Vec::with_capacity(parents.len() * groups.len());
    for parent in parents {
        for group in &groups {
            let text = render(group, parent);
            if group.iter().any(is_parent_reference) {
                composed.push(text);
            } else {
                composed.push(format!("{parent} {text}"));
            }
        }
    }
    Ok(composed)
}

fn is_parent_reference(sel: &Selector) -> bool {
    sel.token.is(TokenKind::ParentReference)
}

fn render(group: &[Selector], parent: &str) -> String {
    let mut text = String::new();
    for sel in group {
        match sel.token.kind {
            TokenKind::GeneralSelector => text.push(' '),
            TokenKind::ChildSelector => text.push_str(" > "),
            TokenKind::ParentReference => text.push_str(parent),
            _ => text.push_str(&sel.token.text),
        }
    }
    text
}
