//! Problem file reader.
//!
//! ```text
//! 3          ← module count
//! 2 3        ← width height of module 0
//! 4 1
//! 5 5
//! 0 1 * 2 +  ← postfix expression, may continue on further lines
//! ```
//!
//! Blank lines are ignored. Line numbers in errors are 1-based.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::error::ExpressionFault;
use crate::expression::{Expression, Token, check_balance};
use crate::orientation::Module;

/// A parsed problem: modules plus a balanced expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub modules: Vec<Module>,
    pub expression: Expression,
}

/// Problem file error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The file has no module count.
    MissingCount,
    /// The count line is not a single non-negative integer.
    InvalidCount { line: usize, value: String },
    /// The file ended after `found` of `expected` module lines.
    MissingModule { found: usize, expected: usize },
    /// A module line is not exactly two non-negative integers.
    InvalidModule { line: usize, value: String },
    /// A module has zero width or height.
    ZeroDimension { line: usize, module: usize },
    /// No expression follows the module lines.
    MissingExpression,
    /// An expression token is neither an index nor a known operator.
    UnknownToken { line: usize, token: String },
    /// The expression violates the balance property.
    Unbalanced { line: usize, fault: ExpressionFault },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCount => f.write_str("missing module count"),
            Self::InvalidCount { line, value } => {
                write!(f, "line {line}: invalid module count {value:?}")
            }
            Self::MissingModule { found, expected } => {
                write!(f, "expected {expected} modules, found {found}")
            }
            Self::InvalidModule { line, value } => {
                write!(f, "line {line}: expected `<width> <height>`, got {value:?}")
            }
            Self::ZeroDimension { line, module } => {
                write!(f, "line {line}: module {module} has a zero dimension")
            }
            Self::MissingExpression => f.write_str("missing expression after module list"),
            Self::UnknownToken { line, token } => {
                write!(f, "line {line}: unknown expression token {token:?}")
            }
            Self::Unbalanced { line, fault } => write!(f, "line {line}: {fault}"),
        }
    }
}

impl core::error::Error for InputError {}

/// Parse a problem file.
pub fn parse(text: &str) -> Result<Problem, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (count_line, count_text) = lines.next().ok_or(InputError::MissingCount)?;
    let count: usize = count_text.parse().map_err(|_| InputError::InvalidCount {
        line: count_line,
        value: count_text.to_string(),
    })?;

    // The count is untrusted; don't let it size the allocation.
    let mut modules = Vec::with_capacity(count.min(1024));
    while modules.len() < count {
        let (line, text) = lines.next().ok_or(InputError::MissingModule {
            found: modules.len(),
            expected: count,
        })?;
        let module = parse_module(text).ok_or_else(|| InputError::InvalidModule {
            line,
            value: text.to_string(),
        })?;
        if module.base().width == 0 || module.base().height == 0 {
            return Err(InputError::ZeroDimension {
                line,
                module: modules.len(),
            });
        }
        modules.push(module);
    }

    // Remember each token's line so a balance fault can point at it.
    let mut tokens = Vec::new();
    let mut token_lines = Vec::new();
    for (line, text) in lines {
        for raw in text.split_whitespace() {
            let token = Token::parse(raw).ok_or_else(|| InputError::UnknownToken {
                line,
                token: raw.to_string(),
            })?;
            tokens.push(token);
            token_lines.push(line);
        }
    }
    if tokens.is_empty() {
        return Err(InputError::MissingExpression);
    }

    if let Err(fault) = check_balance(&tokens) {
        let line = match fault {
            ExpressionFault::Unbalanced { position }
            | ExpressionFault::MissingOperands { position } => token_lines[position],
            _ => token_lines[0],
        };
        return Err(InputError::Unbalanced { line, fault });
    }
    let expression = Expression::from_balanced(tokens);

    tracing::debug!(
        modules = modules.len(),
        tokens = expression.tokens().len(),
        "problem parsed"
    );
    Ok(Problem {
        modules,
        expression,
    })
}

fn parse_module(text: &str) -> Option<Module> {
    let mut fields = text.split_whitespace();
    let width = fields.next()?.parse().ok()?;
    let height = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Module::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Cut;
    use alloc::vec;

    #[test]
    fn parses_modules_and_expression() {
        let p = parse("2\n2 3\n4 1\n0 1 *\n").unwrap();
        assert_eq!(p.modules, vec![Module::new(2, 3), Module::new(4, 1)]);
        assert_eq!(
            p.expression.tokens(),
            &[Token::Operand(0), Token::Operand(1), Token::Cut(Cut::Abut)]
        );
    }

    #[test]
    fn expression_may_span_lines_and_blank_lines_are_skipped() {
        let p = parse("\n3\n1 1\n\n2 2\n3 3\n0 1\n+ 2 *\n").unwrap();
        assert_eq!(p.modules.len(), 3);
        assert_eq!(p.expression.tokens().len(), 5);
    }

    #[test]
    fn windows_line_endings() {
        let p = parse("1\r\n5 10\r\n0\r\n").unwrap();
        assert_eq!(p.modules, vec![Module::new(5, 10)]);
    }

    #[test]
    fn missing_count() {
        assert_eq!(parse("  \n\n"), Err(InputError::MissingCount));
    }

    #[test]
    fn invalid_count() {
        assert_eq!(
            parse("two\n"),
            Err(InputError::InvalidCount {
                line: 1,
                value: "two".into()
            })
        );
    }

    #[test]
    fn too_few_modules() {
        assert_eq!(
            parse("3\n1 1\n2 2\n"),
            Err(InputError::MissingModule {
                found: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn malformed_module_lines() {
        for bad in ["1\n5\n0\n", "1\n5 6 7\n0\n", "1\n5 -6\n0\n", "1\n5 x\n0\n"] {
            assert!(
                matches!(parse(bad), Err(InputError::InvalidModule { line: 2, .. })),
                "{bad:?} → {:?}",
                parse(bad)
            );
        }
    }

    #[test]
    fn zero_dimension() {
        assert_eq!(
            parse("2\n1 1\n0 4\n0 1 +\n"),
            Err(InputError::ZeroDimension { line: 3, module: 1 })
        );
    }

    #[test]
    fn missing_expression() {
        assert_eq!(parse("1\n5 10\n"), Err(InputError::MissingExpression));
    }

    #[test]
    fn unknown_token() {
        assert_eq!(
            parse("2\n1 1\n1 1\n0 1 /\n"),
            Err(InputError::UnknownToken {
                line: 4,
                token: "/".into()
            })
        );
    }

    #[test]
    fn unbalanced_expression_points_at_line() {
        assert_eq!(
            parse("2\n2 3\n4 1\n0 1 *\n*\n"),
            Err(InputError::Unbalanced {
                line: 5,
                fault: ExpressionFault::Unbalanced { position: 3 }
            })
        );
    }
}
