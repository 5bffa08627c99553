// ABOUTME: Pluggable expression evaluation for calculations
// ABOUTME: Default implementation is a recursive-descent arithmetic evaluator over a logos lexer

use logos::Logos;
use thiserror::Error;

/// Maximum nesting of parentheses and unary operators
const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character at position {0}")]
    UnexpectedCharacter(usize),
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NotFinite,
    #[error("expression nesting exceeds 64 levels")]
    NestingTooDeep,
}

/// Turns an expression string into a number
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// Arithmetic over decimal literals with `+ - * / % ^`, unary signs and parentheses.
///
/// Precedence from loosest to tightest: `+ -`, `* / %`, unary sign, `^`.
/// Exponentiation is right-associative, so `2^3^2` is `2^9` and `-2^2` is `-4`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticEvaluator;

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let tokens = tokenize(expression)?;
        if tokens.is_empty() {
            return Err(EvalError::Empty);
        }

        let mut parser = Parser {
            tokens,
            cursor: 0,
            depth: 0,
        };
        let value = parser.parse_sum()?;

        if let Some(&(token, position)) = parser.peek() {
            return Err(match token {
                Token::RParen => EvalError::UnbalancedParenthesis,
                _ => EvalError::UnexpectedToken(position),
            });
        }

        finite(value)
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Token {
    #[regex(r"[0-9]+(\.[0-9]+)?|\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

fn tokenize(expression: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut lexer = Token::lexer(expression);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span().start)),
            Err(()) => return Err(EvalError::UnexpectedCharacter(lexer.span().start)),
        }
    }

    Ok(tokens)
}

/// Overflow anywhere in the expression is an error, not only in the final value
fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NotFinite)
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.cursor).copied();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::NestingTooDeep);
        }
        Ok(())
    }

    // sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_product()?;

        while let Some(&(token, _)) = self.peek() {
            match token {
                Token::Plus => {
                    self.cursor += 1;
                    value = finite(value + self.parse_product()?)?;
                }
                Token::Minus => {
                    self.cursor += 1;
                    value = finite(value - self.parse_product()?)?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    // product := unary (('*' | '/' | '%') unary)*
    fn parse_product(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_unary()?;

        while let Some(&(token, _)) = self.peek() {
            match token {
                Token::Star => {
                    self.cursor += 1;
                    value = finite(value * self.parse_unary()?)?;
                }
                Token::Slash | Token::Percent => {
                    self.cursor += 1;
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value = finite(if token == Token::Slash {
                        value / divisor
                    } else {
                        value % divisor
                    })?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    // unary := ('+' | '-') unary | power
    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(&(Token::Minus, _)) => {
                self.cursor += 1;
                self.descend()?;
                let value = -self.parse_unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(&(Token::Plus, _)) => {
                self.cursor += 1;
                self.descend()?;
                let value = self.parse_unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.parse_power(),
        }
    }

    // power := primary ('^' unary)?
    fn parse_power(&mut self) -> Result<f64, EvalError> {
        let base = self.parse_primary()?;

        if let Some(&(Token::Caret, _)) = self.peek() {
            self.cursor += 1;
            self.descend()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return finite(base.powf(exponent));
        }

        Ok(base)
    }

    // primary := number | '(' sum ')'
    fn parse_primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some((Token::Number(value), _)) => finite(value),
            Some((Token::LParen, _)) => {
                self.descend()?;
                let value = self.parse_sum()?;
                self.depth -= 1;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((_, position)) => Err(EvalError::UnexpectedToken(position)),
                    None => Err(EvalError::UnbalancedParenthesis),
                }
            }
            Some((Token::RParen, _)) => Err(EvalError::UnbalancedParenthesis),
            Some((_, position)) => Err(EvalError::UnexpectedToken(position)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eval(expression: &str) -> Result<f64, EvalError> {
        ArithmeticEvaluator.evaluate(expression)
    }

    #[rstest]
    #[case("42", 42.0)]
    #[case("1 + 2 * 3", 7.0)]
    #[case("(1 + 2) * 3", 9.0)]
    #[case("10 - 4 - 3", 3.0)]
    #[case("8 / 4 / 2", 1.0)]
    #[case("7 % 4", 3.0)]
    #[case("-2^2", -4.0)]
    #[case("2^3^2", 512.0)]
    #[case("2^-1", 0.5)]
    #[case("--3", 3.0)]
    #[case("+.5 * 4", 2.0)]
    #[case("  ( ( 1.5 ) )\n+ 1 ", 2.5)]
    fn test_evaluates(#[case] expression: &str, #[case] expected: f64) {
        assert_eq!(eval(expression).unwrap(), expected);
    }

    #[rstest]
    #[case("", EvalError::Empty)]
    #[case("   ", EvalError::Empty)]
    #[case("2 +", EvalError::UnexpectedEnd)]
    #[case("1 / 0", EvalError::DivisionByZero)]
    #[case("5 % (2 - 2)", EvalError::DivisionByZero)]
    #[case("(1 + 2", EvalError::UnbalancedParenthesis)]
    #[case("1 + 2)", EvalError::UnbalancedParenthesis)]
    #[case(")", EvalError::UnbalancedParenthesis)]
    #[case("1 2", EvalError::UnexpectedToken(2))]
    #[case("* 3", EvalError::UnexpectedToken(0))]
    #[case("2 + x", EvalError::UnexpectedCharacter(4))]
    #[case("10^400", EvalError::NotFinite)]
    #[case("1 / 10^400", EvalError::NotFinite)]
    #[case("0 * 10^400", EvalError::NotFinite)]
    #[case("(10^300 * 10^300) / 10^300", EvalError::NotFinite)]
    fn test_rejects(#[case] expression: &str, #[case] expected: EvalError) {
        assert_eq!(eval(expression), Err(expected));
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let expression = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(eval(&expression), Err(EvalError::NestingTooDeep));

        let expression = format!("{}1", "-".repeat(200));
        assert_eq!(eval(&expression), Err(EvalError::NestingTooDeep));
    }

    #[test]
    fn test_evaluator_is_object_safe() {
        let evaluator: Box<dyn Evaluator> = Box::new(ArithmeticEvaluator);
        assert_eq!(evaluator.evaluate("6 * 7").unwrap(), 42.0);
    }
}
