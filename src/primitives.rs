use crate::{
    diagnostics::{Diagnostic, DiagnosticKind},
    value::{Value, ValueKind},
};

/// A built-in operation.
///
/// Primitives live in a fixed table separate from the environment: a
/// `define`d closure of the same name shadows one, a plain `set!` binding
/// does not.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub min_arity: usize,
    callback: fn(&[Value]) -> Result<Value, Diagnostic>,
}

impl Primitive {
    pub fn call(&self, args: &[Value]) -> Result<Value, Diagnostic> {
        if args.len() < self.min_arity {
            return Err(Diagnostic::new(
                DiagnosticKind::Arity,
                format!(
                    "`{}` expected at least {} argument(s) but received {}",
                    self.name,
                    self.min_arity,
                    args.len()
                ),
            ));
        }
        (self.callback)(args)
    }
}

const TABLE: &[Primitive] = &[
    Primitive {
        name: "+",
        min_arity: 0,
        callback: add,
    },
    Primitive {
        name: "-",
        min_arity: 1,
        callback: sub,
    },
    Primitive {
        name: "*",
        min_arity: 0,
        callback: mul,
    },
    Primitive {
        name: "/",
        min_arity: 1,
        callback: div,
    },
    Primitive {
        name: "=",
        min_arity: 1,
        callback: equal_chain,
    },
    Primitive {
        name: "not",
        min_arity: 1,
        callback: negate,
    },
];

pub fn lookup(name: &str) -> Option<&'static Primitive> {
    TABLE.iter().find(|primitive| primitive.name == name)
}

fn expect_number(value: &Value, name: &str) -> Result<f64, Diagnostic> {
    match &*value.0 {
        ValueKind::Int(n) => Ok(*n as f64),
        ValueKind::Float(f) => Ok(*f),
        _ => Err(Diagnostic::new(
            DiagnosticKind::Type,
            format!(
                "`{name}` expected numeric operand but found {}",
                value.type_name()
            ),
        )),
    }
}

fn all_ints(args: &[Value]) -> bool {
    args.iter()
        .all(|value| matches!(&*value.0, ValueKind::Int(_)))
}

/// Arithmetic runs in `f64`; an all-int application with a whole result
/// stays an int.
fn numeric_value(result: f64, ints: bool) -> Value {
    if ints && result.fract() == 0.0 {
        Value::int(result as i64)
    } else {
        Value::float(result)
    }
}

fn fold(
    args: &[Value],
    name: &str,
    identity: f64,
    func: fn(f64, f64) -> f64,
) -> Result<Value, Diagnostic> {
    let mut acc = identity;
    for value in args {
        acc = func(acc, expect_number(value, name)?);
    }
    Ok(numeric_value(acc, all_ints(args)))
}

fn fold_from_first(
    args: &[Value],
    name: &str,
    func: fn(f64, f64) -> f64,
) -> Result<Value, Diagnostic> {
    let mut acc = expect_number(&args[0], name)?;
    for value in &args[1..] {
        acc = func(acc, expect_number(value, name)?);
    }
    Ok(numeric_value(acc, all_ints(args)))
}

fn add(args: &[Value]) -> Result<Value, Diagnostic> {
    fold(args, "+", 0.0, |a, b| a + b)
}

fn mul(args: &[Value]) -> Result<Value, Diagnostic> {
    fold(args, "*", 1.0, |a, b| a * b)
}

fn sub(args: &[Value]) -> Result<Value, Diagnostic> {
    fold_from_first(args, "-", |a, b| a - b)
}

fn div(args: &[Value]) -> Result<Value, Diagnostic> {
    fold_from_first(args, "/", |a, b| a / b)
}

/// Adjacent-pair equality chain: the last compared value on success,
/// `false` on the first mismatch.
fn equal_chain(args: &[Value]) -> Result<Value, Diagnostic> {
    for pair in args.windows(2) {
        if !values_equal(&pair[0], &pair[1]) {
            return Ok(Value::bool(false));
        }
    }
    Ok(args[args.len() - 1].clone())
}

fn negate(args: &[Value]) -> Result<Value, Diagnostic> {
    if args.len() != 1 {
        return Err(Diagnostic::new(
            DiagnosticKind::Arity,
            format!("`not` expected 1 argument but received {}", args.len()),
        ));
    }
    Ok(Value::bool(!args[0].is_truthy()))
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (&*left.0, &*right.0) {
        (ValueKind::Unit, ValueKind::Unit) => true,
        (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
        (ValueKind::Int(a), ValueKind::Int(b)) => a == b,
        (ValueKind::String(a), ValueKind::String(b)) => a == b,
        // ints and floats compare numerically
        (ValueKind::Int(a), ValueKind::Float(b)) => (*a as f64 - *b).abs() < f64::EPSILON,
        (ValueKind::Float(a), ValueKind::Int(b)) => (*a - *b as f64).abs() < f64::EPSILON,
        (ValueKind::Float(a), ValueKind::Float(b)) => (*a - *b).abs() < f64::EPSILON,
        _ => false,
    }
}
