use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, SourceSpan},
    form::{Form, FormKind},
};

/// Parses exactly one top-level form out of `source`.
///
/// Surrounding whitespace is discarded; any other unconsumed text is a
/// syntax error, as is text that matches no production of the grammar.
pub fn parse(source: &str) -> Result<Form, Diagnostic> {
    let mut reader = Reader::new(source);
    reader.skip_whitespace();
    let form = reader.read_form()?;
    reader.skip_whitespace();
    if let Some((idx, ch)) = reader.peek() {
        return Err(Diagnostic::new(
            DiagnosticKind::Syntax,
            format!("unexpected trailing input starting at `{ch}`"),
        )
        .with_span(SourceSpan::new(idx, source.len())));
    }
    Ok(form)
}

struct Reader<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current: usize,
    peeked: Option<(usize, char)>,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            current: 0,
            peeked: None,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = if let Some((idx, ch)) = self.peeked.take() {
            Some((idx, ch))
        } else {
            self.chars.next()
        };
        if let Some((idx, ch)) = next {
            self.current = idx + ch.len_utf8();
            Some((idx, ch))
        } else {
            None
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn read_form(&mut self) -> Result<Form, Diagnostic> {
        let (start, ch) = match self.bump() {
            Some(pair) => pair,
            None => {
                return Err(Diagnostic::new(
                    DiagnosticKind::Syntax,
                    "unexpected end of input",
                )
                .with_span(SourceSpan::new(self.current, self.current)));
            }
        };
        match ch {
            '\'' => {
                let inner = self.read_form()?;
                let end = inner.span.end;
                Ok(Form {
                    kind: FormKind::Quote(Box::new(inner)),
                    span: SourceSpan::new(start, end),
                })
            }
            '(' => self.read_list(start),
            '"' => self.read_string(start),
            '0'..='9' => self.read_number(start),
            ')' => Err(Diagnostic::new(DiagnosticKind::Syntax, "unexpected `)`")
                .with_span(SourceSpan::new(start, start + 1))),
            ch if is_symbol_char(ch) => Ok(self.read_symbol(start)),
            other => Err(Diagnostic::new(
                DiagnosticKind::Syntax,
                format!("unexpected character `{other}`"),
            )
            .with_span(SourceSpan::new(start, start + other.len_utf8()))),
        }
    }

    fn read_list(&mut self, start: usize) -> Result<Form, Diagnostic> {
        self.skip_whitespace();
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some((idx, ')')) => {
                    if items.is_empty() {
                        return Err(Diagnostic::new(
                            DiagnosticKind::Syntax,
                            "empty list `()` is not a form",
                        )
                        .with_span(SourceSpan::new(start, idx + 1)));
                    }
                    self.bump();
                    return Ok(Form {
                        kind: FormKind::List(items),
                        span: SourceSpan::new(start, idx + 1),
                    });
                }
                Some(_) => {
                    items.push(self.read_form()?);
                    match self.peek() {
                        Some((_, ch)) if ch.is_whitespace() => self.skip_whitespace(),
                        Some((_, ')')) | None => {}
                        Some((idx, ch)) => {
                            return Err(Diagnostic::new(
                                DiagnosticKind::Syntax,
                                format!("expected whitespace or `)` after list element, found `{ch}`"),
                            )
                            .with_span(SourceSpan::new(idx, idx + ch.len_utf8())));
                        }
                    }
                }
                None => {
                    return Err(Diagnostic::new(DiagnosticKind::Syntax, "unterminated list")
                        .with_span(SourceSpan::new(start, self.current)));
                }
            }
        }
    }

    fn read_string(&mut self, start: usize) -> Result<Form, Diagnostic> {
        let content_start = self.current;
        while let Some((idx, ch)) = self.bump() {
            // no escape decoding: the literal holds the raw characters
            // between the delimiters
            if ch == '"' {
                return Ok(Form {
                    kind: FormKind::Str(self.source[content_start..idx].to_string()),
                    span: SourceSpan::new(start, idx + 1),
                });
            }
        }
        Err(
            Diagnostic::new(DiagnosticKind::Syntax, "unterminated string literal")
                .with_span(SourceSpan::new(start, self.current)),
        )
    }

    fn read_number(&mut self, start: usize) -> Result<Form, Diagnostic> {
        let mut end = self.current;
        while let Some((idx, ch)) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump();
                end = idx + ch.len_utf8();
            } else {
                break;
            }
        }
        // a decimal point makes a float only when digits follow it; the
        // float production is tried before the int production
        let mut is_float = false;
        if let Some((dot_idx, '.')) = self.peek() {
            if matches!(self.chars.clone().next(), Some((_, next)) if next.is_ascii_digit()) {
                self.bump();
                is_float = true;
                end = dot_idx + 1;
                while let Some((idx, ch)) = self.peek() {
                    if ch.is_ascii_digit() {
                        self.bump();
                        end = idx + 1;
                    } else {
                        break;
                    }
                }
            }
        }
        let text = &self.source[start..end];
        let span = SourceSpan::new(start, end);
        let kind = if is_float {
            let value = text.parse::<f64>().map_err(|_| {
                Diagnostic::new(
                    DiagnosticKind::Syntax,
                    format!("invalid float literal `{text}`"),
                )
                .with_span(span)
            })?;
            FormKind::Float(value)
        } else {
            let value = text.parse::<i64>().map_err(|_| {
                Diagnostic::new(
                    DiagnosticKind::Syntax,
                    format!("integer literal `{text}` out of range"),
                )
                .with_span(span)
            })?;
            FormKind::Int(value)
        };
        Ok(Form { kind, span })
    }

    fn read_symbol(&mut self, start: usize) -> Form {
        let mut end = self.current;
        while let Some((idx, ch)) = self.peek() {
            if is_symbol_char(ch) {
                self.bump();
                end = idx + ch.len_utf8();
            } else {
                break;
            }
        }
        Form {
            kind: FormKind::Symbol(self.source[start..end].to_string()),
            span: SourceSpan::new(start, end),
        }
    }
}

/// Symbols are maximal runs of anything that is not whitespace or a list
/// delimiter.
fn is_symbol_char(ch: char) -> bool {
    !ch.is_whitespace() && ch != '(' && ch != ')'
}
