use std::mem;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Result, SorrelError, SourceSpan},
    environment::Environment,
    form::{Form, FormKind},
    primitives, reader,
    value::{Closure, Value, ValueKind},
};

/// Tree-walking evaluator over a root environment.
///
/// The root environment lives for the interpreter's lifetime and is mutated
/// in place by every top-level `set!`/`define`. Closure calls run against
/// their own snapshot-derived environments; see [`Environment`].
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Parses and evaluates one top-level form.
    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        let form = reader::parse(source).map_err(SorrelError::from)?;
        self.eval_form(&form)
    }

    /// Evaluates an already-parsed form against the root environment.
    pub fn eval_form(&mut self, form: &Form) -> Result<Value> {
        self.evaluate(form)
    }

    /// Read access to the root environment for introspection tooling.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    fn evaluate(&mut self, form: &Form) -> Result<Value> {
        match &form.kind {
            FormKind::Int(n) => Ok(Value::int(*n)),
            FormKind::Float(n) => Ok(Value::float(*n)),
            FormKind::Str(s) => Ok(Value::string(s.clone())),
            FormKind::Symbol(name) => self.lookup(name, form.span),
            FormKind::Quote(inner) => Ok(Value::quoted((**inner).clone())),
            FormKind::List(items) => self.eval_list(items, form.span),
        }
    }

    fn lookup(&self, name: &str, span: SourceSpan) -> Result<Value> {
        if let Some(value) = self.env.get(name) {
            return Ok(value);
        }
        if primitives::lookup(name).is_some() {
            // a primitive is not a first-class value; its bare name passes
            // through unevaluated
            return Ok(Value::quoted(Form {
                kind: FormKind::Symbol(name.to_string()),
                span,
            }));
        }
        Err(SorrelError::from(
            Diagnostic::new(
                DiagnosticKind::UnboundSymbol,
                format!("undefined symbol `{name}`"),
            )
            .with_span(span),
        ))
    }

    fn eval_list(&mut self, items: &[Form], span: SourceSpan) -> Result<Value> {
        let (head, args) = match items.split_first() {
            Some(pair) => pair,
            None => {
                return Ok(Value::quoted(Form {
                    kind: FormKind::List(Vec::new()),
                    span,
                }));
            }
        };
        let name = match &head.kind {
            FormKind::Symbol(name) => name.clone(),
            // a list without a symbol head has no evaluation rule and
            // passes through unchanged
            _ => {
                return Ok(Value::quoted(Form {
                    kind: FormKind::List(items.to_vec()),
                    span,
                }));
            }
        };
        // special forms dispatch on the literal head symbol before any
        // environment or primitive lookup, so they cannot be shadowed
        match name.as_str() {
            "quote" => self.special_quote(args, span),
            "set!" => self.special_set(args, span),
            "if" => self.special_if(args, span),
            "define" => self.special_define(args, span),
            _ => self.apply(&name, head.span, args, span),
        }
    }

    fn special_quote(&mut self, args: &[Form], span: SourceSpan) -> Result<Value> {
        match args {
            [form] => Ok(Value::quoted(form.clone())),
            _ => Err(SorrelError::from(
                Diagnostic::new(DiagnosticKind::Arity, "`quote` expects exactly one form")
                    .with_span(span),
            )),
        }
    }

    fn special_set(&mut self, args: &[Form], span: SourceSpan) -> Result<Value> {
        let (target, value_form) = match args {
            [target, value] => (target, value),
            _ => {
                return Err(SorrelError::from(
                    Diagnostic::new(DiagnosticKind::Arity, "`set!` expects a name and a value")
                        .with_span(span),
                ));
            }
        };
        let name = match &target.kind {
            FormKind::Symbol(name) => name.clone(),
            _ => {
                return Err(SorrelError::from(
                    Diagnostic::new(
                        DiagnosticKind::Type,
                        format!("`set!` expects a symbol to bind, found `{target}`"),
                    )
                    .with_span(target.span),
                ));
            }
        };
        let value = self.evaluate(value_form)?;
        self.env.define(name, value.clone());
        Ok(value)
    }

    fn special_if(&mut self, args: &[Form], span: SourceSpan) -> Result<Value> {
        let (test, then_branch, else_branch) = match args {
            [test, then_branch] => (test, then_branch, None),
            [test, then_branch, else_branch] => (test, then_branch, Some(else_branch)),
            _ => {
                return Err(SorrelError::from(
                    Diagnostic::new(
                        DiagnosticKind::Arity,
                        "`if` expects a test, a consequent, and an optional alternative",
                    )
                    .with_span(span),
                ));
            }
        };
        if self.evaluate(test)?.is_truthy() {
            self.evaluate(then_branch)
        } else if let Some(form) = else_branch {
            self.evaluate(form)
        } else {
            Ok(Value::unit())
        }
    }

    fn special_define(&mut self, args: &[Form], span: SourceSpan) -> Result<Value> {
        let (signature, body) = match args.split_first() {
            Some((signature, body)) if !body.is_empty() => (signature, body),
            _ => {
                return Err(SorrelError::from(
                    Diagnostic::new(
                        DiagnosticKind::Arity,
                        "`define` expects a signature list and at least one body form",
                    )
                    .with_span(span),
                ));
            }
        };
        let parts = match &signature.kind {
            FormKind::List(parts) => parts,
            _ => {
                return Err(SorrelError::from(
                    Diagnostic::new(
                        DiagnosticKind::Type,
                        format!("`define` expects a signature list, found `{signature}`"),
                    )
                    .with_span(signature.span),
                ));
            }
        };
        let mut symbols = Vec::with_capacity(parts.len());
        for part in parts {
            match &part.kind {
                FormKind::Symbol(name) => symbols.push(name.clone()),
                _ => {
                    return Err(SorrelError::from(
                        Diagnostic::new(
                            DiagnosticKind::Type,
                            format!("`define` signature entries must be symbols, found `{part}`"),
                        )
                        .with_span(part.span),
                    ));
                }
            }
        }
        let (name, params) = match symbols.split_first() {
            Some((name, params)) => (name.clone(), params.to_vec()),
            None => {
                return Err(SorrelError::from(
                    Diagnostic::new(
                        DiagnosticKind::Type,
                        "`define` signature must name the function",
                    )
                    .with_span(signature.span),
                ));
            }
        };
        // the snapshot is taken before the name is bound, so the closure
        // cannot see itself
        let closure = Closure {
            name: name.clone(),
            params,
            body: body.to_vec(),
            env: self.env.snapshot(),
        };
        let value = Value::new(ValueKind::Closure(closure));
        self.env.define(name, value.clone());
        Ok(value)
    }

    fn apply(
        &mut self,
        name: &str,
        head_span: SourceSpan,
        args: &[Form],
        span: SourceSpan,
    ) -> Result<Value> {
        // left-to-right argument evaluation, observable through `set!`
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?);
        }
        if let Some(value) = self.env.get(name) {
            if let ValueKind::Closure(closure) = &*value.0 {
                return self.invoke(closure, values, span);
            }
        }
        if let Some(primitive) = primitives::lookup(name) {
            return primitive
                .call(&values)
                .map_err(|diag| SorrelError::from(diag.with_span(span)));
        }
        Err(SorrelError::from(
            Diagnostic::new(
                DiagnosticKind::UnknownOperator,
                format!("`{name}` is neither a function nor a primitive"),
            )
            .with_span(head_span),
        ))
    }

    fn invoke(&mut self, closure: &Closure, args: Vec<Value>, span: SourceSpan) -> Result<Value> {
        if args.len() != closure.params.len() {
            return Err(SorrelError::from(
                Diagnostic::new(
                    DiagnosticKind::Arity,
                    format!(
                        "`{}` expected {} argument(s) but received {}",
                        closure.name,
                        closure.params.len(),
                        args.len()
                    ),
                )
                .with_span(span),
            ));
        }
        let mut call_env = closure.env.snapshot();
        for (name, value) in closure.params.iter().zip(args) {
            call_env.define(name.clone(), value);
        }
        let prev = mem::replace(&mut self.env, call_env);
        let result = self.eval_body(&closure.body);
        // the call environment is discarded, never merged back
        self.env = prev;
        result
    }

    fn eval_body(&mut self, body: &[Form]) -> Result<Value> {
        let mut result = Value::unit();
        for form in body {
            result = self.evaluate(form)?;
        }
        Ok(result)
    }
}
