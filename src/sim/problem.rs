//! Hidden-operator arithmetic problems
//!
//! The player sees `a ? b = answer` and must pick the operator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::operator::Operator;
use super::wave::NumberRange;

/// Attempts at finding a problem with a single valid operator
pub const MAX_ATTEMPTS: u32 = 10;
/// Operand cap for multiplication and divisors
const MUL_DIV_CAP: i64 = 12;
/// Quotient cap for division
const QUOTIENT_CAP: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub operator: Operator,
    pub lhs: i64,
    pub rhs: i64,
    pub answer: i64,
}

impl MathProblem {
    /// Generate a problem whose operands come from `range`.
    ///
    /// Retries until exactly one operator fits; after [`MAX_ATTEMPTS`] the last
    /// candidate is kept (its generating operator is still correct).
    pub fn generate<R: Rng + ?Sized>(range: NumberRange, rng: &mut R) -> Self {
        let mut problem = Self::candidate(range, rng);
        for _ in 1..MAX_ATTEMPTS {
            if problem.valid_operators().len() == 1 {
                break;
            }
            problem = Self::candidate(range, rng);
        }
        problem
    }

    fn candidate<R: Rng + ?Sized>(range: NumberRange, rng: &mut R) -> Self {
        let lo = range.min;
        let hi = range.max.max(lo);
        let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];

        let (lhs, rhs, answer) = match operator {
            Operator::Add => {
                let a = rng.random_range(lo..=hi);
                let b = rng.random_range(lo..=hi);
                (a, b, a + b)
            }
            Operator::Sub => {
                // Keep the result non-negative
                let b = rng.random_range(lo..=hi);
                let a = rng.random_range(b..=hi);
                (a, b, a - b)
            }
            Operator::Mul => {
                let cap = hi.min(MUL_DIV_CAP).max(lo);
                let a = rng.random_range(lo..=cap);
                let b = rng.random_range(lo..=cap);
                (a, b, a * b)
            }
            Operator::Div => {
                let divisor = rng.random_range(2..=hi.min(MUL_DIV_CAP).max(2));
                let quotient = rng.random_range(lo..=hi.min(QUOTIENT_CAP).max(lo));
                (divisor * quotient, divisor, quotient)
            }
        };

        Self {
            operator,
            lhs,
            rhs,
            answer,
        }
    }

    /// Every operator for which `lhs op rhs == answer`
    pub fn valid_operators(&self) -> Vec<Operator> {
        Operator::ALL
            .into_iter()
            .filter(|op| op.apply(self.lhs, self.rhs) == Some(self.answer))
            .collect()
    }

    /// Only the generating operator counts, even if another one also fits
    pub fn check_answer(&self, operator: Operator) -> bool {
        operator == self.operator
    }

    pub fn text(&self) -> String {
        format!("{} ? {} = {}", self.lhs, self.rhs, self.answer)
    }
}
