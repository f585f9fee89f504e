//! Normalized Polish Expression tokens and the balance check.
//!
//! An expression is a postfix listing of module indices and cut operators.
//! `0 1 *` puts module 1 to the right of module 0; `0 1 +` stacks module 1
//! on top of module 0.

use alloc::vec::Vec;
use core::fmt;

use whereat::{At, at};

use crate::error::{ExpressionFault, FloorplanError};

/// How a cut node combines its two children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cut {
    /// Right child on top of the left child: width = max, height = sum.
    Stack,
    /// Right child beside the left child: width = sum, height = max.
    Abut,
}

impl Cut {
    /// Canonical operator symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Stack => '+',
            Self::Abut => '*',
        }
    }

    /// Accepts `+`/`H` for [`Stack`](Self::Stack) and `*`/`V` for
    /// [`Abut`](Self::Abut), the latter pair naming the cut line direction.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" | "H" | "h" => Some(Self::Stack),
            "*" | "V" | "v" => Some(Self::Abut),
            _ => None,
        }
    }
}

/// One token of a postfix expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Index of a module in the input list.
    Operand(usize),
    /// Cut combining the two most recent subtrees.
    Cut(Cut),
}

impl Token {
    /// Parse a single whitespace-free token.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(cut) = Cut::from_symbol(s) {
            return Some(Self::Cut(cut));
        }
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s.parse::<usize>().ok().map(Self::Operand);
        }
        None
    }

    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Cut(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(i) => write!(f, "{i}"),
            Self::Cut(c) => write!(f, "{}", c.symbol()),
        }
    }
}

/// A token sequence that satisfies the balance property.
///
/// At every prefix the number of operators is strictly less than the number
/// of operands. Together with a final count of `operands - 1` operators this
/// guarantees a single binary tree; the tree builder checks the rest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Validate `tokens` and wrap them.
    pub fn new(tokens: Vec<Token>) -> Result<Self, At<FloorplanError>> {
        check_balance(&tokens).map_err(|fault| at!(FloorplanError::from(fault)))?;
        Ok(Self { tokens })
    }

    /// Wrap tokens that already passed [`check_balance`].
    pub(crate) fn from_balanced(tokens: Vec<Token>) -> Self {
        debug_assert!(check_balance(&tokens).is_ok());
        Self { tokens }
    }

    /// Single-module expression.
    pub fn leaf(index: usize) -> Self {
        Self {
            tokens: alloc::vec![Token::Operand(index)],
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn operand_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_operator()).count()
    }

    /// Whether no two adjacent operators are the same cut.
    ///
    /// Normalization makes the expression-to-tree mapping one-to-one. It is
    /// not required for planning; callers that search over expressions use
    /// it to skip duplicates.
    pub fn is_normalized(&self) -> bool {
        self.tokens.windows(2).all(|pair| match pair {
            [Token::Cut(a), Token::Cut(b)] => a != b,
            _ => true,
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Balance check over a raw token stream.
///
/// Only prefixes ending in an operator can violate the property, so the
/// check runs as each operator is seen.
pub(crate) fn check_balance(tokens: &[Token]) -> Result<(), ExpressionFault> {
    if tokens.is_empty() {
        return Err(ExpressionFault::Empty);
    }
    let (mut operands, mut operators) = (0usize, 0usize);
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Operand(_) => operands += 1,
            Token::Cut(_) => {
                operators += 1;
                if operators >= operands {
                    return Err(ExpressionFault::Unbalanced { position });
                }
            }
        }
    }
    Ok(())
}
