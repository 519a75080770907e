//! Expression evaluator (§4.4 semantics).

use crate::context::EvaluationContext;
use crate::error::EngineError;
use crate::expr::ast::{Expr, Literal, RelOp};
use crate::value::Value;

/// Evaluate `expr` against `ctx`, short-circuiting `and`/`or`.
///
/// Unknown identifiers resolve to `Null` rather than erroring — per spec,
/// this function never fails on a missing variable; only malformed syntax
/// (already rejected by the parser) and bad relational comparisons would
/// produce an error, and the grammar as specified has no arithmetic ops that
/// could divide by zero.
pub fn eval(expr: &Expr, ctx: &EvaluationContext) -> Result<Value, EngineError> {
    match expr {
        Expr::Or(lhs, rhs) => {
            if truthy(eval(lhs, ctx)?) {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(truthy(eval(rhs, ctx)?)))
        }
        Expr::And(lhs, rhs) => {
            if !truthy(eval(lhs, ctx)?) {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(truthy(eval(rhs, ctx)?)))
        }
        Expr::Not(inner) => Ok(Value::Bool(!truthy(eval(inner, ctx)?))),
        Expr::Rel(lhs, op, rhs) => {
            let lv = eval(lhs, ctx)?;
            let rv = eval(rhs, ctx)?;
            Ok(Value::Bool(compare(&lv, op, &rv)))
        }
        Expr::Literal(Literal::Number(n)) => Ok(parse_number_literal(n)),
        Expr::Literal(Literal::QuotedString(s)) => Ok(Value::String(s.clone())),
        Expr::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
        Expr::Path(path) => Ok(ctx.resolve(path).unwrap_or(Value::Null)),
        Expr::Group(inner) => eval(inner, ctx),
    }
}

/// Evaluate `expr` and coerce its result to a bare boolean, the form the
/// conditional visitor needs for branch selection.
pub fn eval_bool(expr: &Expr, ctx: &EvaluationContext) -> Result<bool, EngineError> {
    Ok(truthy(eval(expr, ctx)?))
}

fn truthy(v: Value) -> bool {
    v.is_truthy()
}

fn parse_number_literal(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        Value::Integer(i)
    } else {
        Value::Float(text.parse::<f64>().unwrap_or(0.0))
    }
}

fn compare(lhs: &Value, op: &RelOp, rhs: &Value) -> bool {
    if lhs.is_numeric() && rhs.is_numeric() {
        let (l, r) = (lhs.as_f64().unwrap(), rhs.as_f64().unwrap());
        return apply_op(op, l.partial_cmp(&r));
    }
    if let (Value::DateTime(l), Value::DateTime(r)) = (lhs, rhs) {
        return apply_op(op, Some(l.cmp(r)));
    }
    // Per the open question in §9: no numeric/string auto-coercion. A string
    // literal compared to a number (or anything else) falls through to
    // ordinal string comparison of their display text.
    let l = display_text(lhs);
    let r = display_text(rhs);
    apply_op(op, l.partial_cmp(&r))
}

fn apply_op(op: &RelOp, ord: Option<std::cmp::Ordering>) -> bool {
    use std::cmp::Ordering::*;
    match (op, ord) {
        (RelOp::Eq, Some(Equal)) => true,
        (RelOp::Ne, Some(o)) => o != Equal,
        (RelOp::Ne, None) => true,
        (RelOp::Ge, Some(Greater | Equal)) => true,
        (RelOp::Le, Some(Less | Equal)) => true,
        (RelOp::Gt, Some(Greater)) => true,
        (RelOp::Lt, Some(Less)) => true,
        _ => false,
    }
}

fn display_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::DateTime(dt) => dt.to_rfc3339(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Record(_) => String::new(),
    }
}
