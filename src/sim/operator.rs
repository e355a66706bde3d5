//! Arithmetic operators the player chooses between

use serde::{Deserialize, Serialize};

/// One of the four hidden operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// Keyboard label bound to this operator (W/A/S/D)
    pub fn key_label(&self) -> char {
        match self {
            Operator::Add => 'W',
            Operator::Sub => 'A',
            Operator::Mul => 'S',
            Operator::Div => 'D',
        }
    }

    /// Categorical code used as the first predictor feature
    pub fn model_code(&self) -> f64 {
        match self {
            Operator::Mul => 0.0,
            Operator::Add => 1.0,
            Operator::Sub => 2.0,
            Operator::Div => 3.0,
        }
    }

    /// Model code for a raw token; anything unrecognised encodes as `+`
    pub fn code_for_token(token: &str) -> f64 {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::from_symbol(c).unwrap_or(Operator::Add).model_code(),
            _ => Operator::Add.model_code(),
        }
    }

    /// Apply to a pair of operands. Division must be exact, anything else is `None`.
    pub fn apply(&self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Sub => a.checked_sub(b),
            Operator::Mul => a.checked_mul(b),
            Operator::Div => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_codes() {
        assert_eq!(Operator::Mul.model_code(), 0.0);
        assert_eq!(Operator::Add.model_code(), 1.0);
        assert_eq!(Operator::Sub.model_code(), 2.0);
        assert_eq!(Operator::Div.model_code(), 3.0);
    }

    #[test]
    fn test_unknown_token_encodes_as_add() {
        assert_eq!(Operator::code_for_token("%"), 1.0);
        assert_eq!(Operator::code_for_token(""), 1.0);
        assert_eq!(Operator::code_for_token("++"), 1.0);
        assert_eq!(Operator::code_for_token("/"), 3.0);
    }

    #[test]
    fn test_apply_division_exact_only() {
        assert_eq!(Operator::Div.apply(12, 4), Some(3));
        assert_eq!(Operator::Div.apply(13, 4), None);
        assert_eq!(Operator::Div.apply(1, 0), None);
    }
}
