//! Recursive-descent parser for the expression grammar in §4.4.
//!
//! ```text
//! expr      := or_expr
//! or_expr   := and_expr ( 'or' and_expr )*
//! and_expr  := not_expr ( 'and' not_expr )*
//! not_expr  := 'not' not_expr | rel_expr
//! rel_expr  := primary ( rel_op primary )?
//! primary   := '(' expr ')' | literal | identifier_path
//! ```

use crate::expr::ast::{Expr, Literal, RelOp};
use crate::expr::lexer::{self, Token};
use crate::path::PropertyPath;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub String);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// Parse condition/inline-boolean expression text into an `Expr`.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::lex(text).map_err(|e| ParseError(e.0))?;
    if tokens.is_empty() {
        return Err(ParseError("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ParseError(format!(
            "trailing tokens after expression: {:?}",
            &parser.tokens[parser.pos..]
        )));
    }
    Ok(expr)
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_not()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.peek() == Some(&Token::Not) {
            self.advance();
            let inner = self.parse_not()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_rel()
    }

    fn parse_rel(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_primary()?;
        let op = match self.peek() {
            Some(Token::Eq) => Some(RelOp::Eq),
            Some(Token::Ne) => Some(RelOp::Ne),
            Some(Token::Ge) => Some(RelOp::Ge),
            Some(Token::Le) => Some(RelOp::Le),
            Some(Token::Gt) => Some(RelOp::Gt),
            Some(Token::Lt) => Some(RelOp::Lt),
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                let rhs = self.parse_primary()?;
                Ok(Expr::Rel(Box::new(lhs), op, Box::new(rhs)))
            }
            None => Ok(lhs),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(Expr::Group(Box::new(inner))),
                    other => Err(ParseError(format!("expected ')', found {other:?}"))),
                }
            }
            Some(Token::Number(n)) => Ok(Expr::Literal(Literal::Number(n))),
            Some(Token::QuotedString(s)) => Ok(Expr::Literal(Literal::QuotedString(s))),
            Some(Token::True) => Ok(Expr::Literal(Literal::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Literal::Bool(false))),
            Some(Token::Ident(name)) => Ok(Expr::Path(PropertyPath::parse(&name))),
            other => Err(ParseError(format!("unexpected token {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_comparison() {
        let expr = parse("Amount > 1000").unwrap();
        assert_eq!(
            expr,
            Expr::Rel(
                Box::new(Expr::Path(PropertyPath::parse("Amount"))),
                RelOp::Gt,
                Box::new(Expr::Literal(Literal::Number("1000".into())))
            )
        );
    }

    #[test]
    fn precedence_not_gt_rel_gt_and_gt_or() {
        // `not A and B or C` == `((not A) and B) or C`
        let expr = parse("not A and B or C").unwrap();
        assert_eq!(
            expr,
            Expr::Or(
                Box::new(Expr::And(
                    Box::new(Expr::Not(Box::new(Expr::Path(PropertyPath::parse("A"))))),
                    Box::new(Expr::Path(PropertyPath::parse("B"))),
                )),
                Box::new(Expr::Path(PropertyPath::parse("C"))),
            )
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = parse("A and (B or C)").unwrap();
        assert_eq!(
            expr,
            Expr::And(
                Box::new(Expr::Path(PropertyPath::parse("A"))),
                Box::new(Expr::Group(Box::new(Expr::Or(
                    Box::new(Expr::Path(PropertyPath::parse("B"))),
                    Box::new(Expr::Path(PropertyPath::parse("C"))),
                )))),
            )
        );
    }

    #[test]
    fn trailing_tokens_error() {
        assert!(parse("A B").is_err());
    }

    #[test]
    fn unbalanced_paren_errors() {
        assert!(parse("(A").is_err());
    }
}
