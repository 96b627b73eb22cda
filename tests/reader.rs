use sorrel::{
    diagnostics::SourceSpan,
    form::{Form, FormKind},
    reader,
};

fn parse(source: &str) -> Form {
    reader::parse(source).expect("source should parse")
}

fn parse_error(source: &str) -> String {
    match reader::parse(source) {
        Ok(form) => panic!("expected syntax error, parsed `{form}`"),
        Err(diag) => format!("{diag}"),
    }
}

#[test]
fn parses_integer_literal() {
    match &parse("42").kind {
        FormKind::Int(n) => assert_eq!(*n, 42),
        other => panic!("expected Int, found {other:?}"),
    }
}

#[test]
fn parses_float_literal() {
    match &parse("3.25").kind {
        FormKind::Float(n) => assert!((n - 3.25).abs() < f64::EPSILON),
        other => panic!("expected Float, found {other:?}"),
    }
}

#[test]
fn dot_without_following_digits_is_not_a_float() {
    let message = parse_error("3.");
    assert!(message.contains("trailing input"), "{message}");
}

#[test]
fn string_contents_are_raw() {
    match &parse(r#""a\nb""#).kind {
        FormKind::Str(s) => assert_eq!(s, r"a\nb"),
        other => panic!("expected Str, found {other:?}"),
    }
}

#[test]
fn symbols_swallow_punctuation() {
    match &parse("foo-bar!?").kind {
        FormKind::Symbol(s) => assert_eq!(s, "foo-bar!?"),
        other => panic!("expected Symbol, found {other:?}"),
    }
}

#[test]
fn parses_quote_sugar() {
    match &parse("'x").kind {
        FormKind::Quote(inner) => match &inner.kind {
            FormKind::Symbol(s) => assert_eq!(s, "x"),
            other => panic!("expected Symbol inside quote, found {other:?}"),
        },
        other => panic!("expected Quote, found {other:?}"),
    }

    match &parse("'(+ 1 2)").kind {
        FormKind::Quote(inner) => match &inner.kind {
            FormKind::List(items) => assert_eq!(items.len(), 3),
            other => panic!("expected List inside quote, found {other:?}"),
        },
        other => panic!("expected Quote, found {other:?}"),
    }
}

#[test]
fn parses_nested_list() {
    match &parse("(+ 1 (* 2 3))").kind {
        FormKind::List(items) => {
            assert_eq!(items.len(), 3);
            match &items[0].kind {
                FormKind::Symbol(s) => assert_eq!(s, "+"),
                other => panic!("expected Symbol head, found {other:?}"),
            }
            match &items[2].kind {
                FormKind::List(inner) => assert_eq!(inner.len(), 3),
                other => panic!("expected nested List, found {other:?}"),
            }
        }
        other => panic!("expected List, found {other:?}"),
    }
}

#[test]
fn accepts_whitespace_padding_inside_list() {
    match &parse("( a b )").kind {
        FormKind::List(items) => assert_eq!(items.len(), 2),
        other => panic!("expected List, found {other:?}"),
    }
}

#[test]
fn rejects_empty_list() {
    let message = parse_error("()");
    assert!(message.contains("empty list"), "{message}");
}

#[test]
fn rejects_missing_separator_between_elements() {
    let message = parse_error(r#"("a""b")"#);
    assert!(message.contains("expected whitespace"), "{message}");
}

#[test]
fn rejects_unterminated_string() {
    let message = parse_error(r#""abc"#);
    assert!(message.contains("unterminated string"), "{message}");
}

#[test]
fn rejects_unterminated_list() {
    let message = parse_error("(+ 1 2");
    assert!(message.contains("unterminated list"), "{message}");
}

#[test]
fn rejects_stray_close_paren() {
    let message = parse_error(")");
    assert!(message.contains("unexpected `)`"), "{message}");
}

#[test]
fn rejects_trailing_input() {
    let message = parse_error("(+ 1 2) extra");
    assert!(message.contains("trailing input"), "{message}");
}

#[test]
fn display_round_trips_literal_text() {
    for source in ["42", "3.5", "\"hi\"", "foo", "'(+ 1 2)", "(+ 1 (* 2 3))"] {
        assert_eq!(parse(source).to_string(), source);
    }
}

#[test]
fn whole_float_display_keeps_decimal_point() {
    assert_eq!(parse("2.0").to_string(), "2.0");
}

#[test]
fn spans_cover_the_source_text() {
    assert_eq!(parse("(+ 1)").span, SourceSpan::new(0, 5));
    assert_eq!(parse("  42").span, SourceSpan::new(2, 4));
}
