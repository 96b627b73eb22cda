use std::fmt;

use crate::diagnostics::SourceSpan;

/// A parsed syntax node.
///
/// Lists produced by the reader always hold at least one element; `()` does
/// not match the grammar.
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub enum FormKind {
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Quote(Box<Form>),
    List(Vec<Form>),
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Int(n) => write!(f, "{n}"),
            // a whole float keeps its decimal point so the text reads back
            // as a float
            FormKind::Float(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{n:.1}")
                } else {
                    write!(f, "{n}")
                }
            }
            FormKind::Str(s) => write!(f, "\"{s}\""),
            FormKind::Symbol(s) => write!(f, "{s}"),
            FormKind::Quote(inner) => write!(f, "'{inner}"),
            FormKind::List(items) => {
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
