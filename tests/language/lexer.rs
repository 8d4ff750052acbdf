//! Integration tests for the scanner
//!
//! Tests character-level scanning of identifiers, numbers, and strings.

use brickfilter_foundation::ParseErrorKind;
use brickfilter_language::Scanner;

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn scan_identifier_with_suffixes() {
    let mut scanner = Scanner::new("done? rest");
    assert_eq!(scanner.scan_identifier().unwrap(), "done?");
    assert_eq!(scanner.position(), 5);
    assert!(scanner.skip_whitespace());
    assert_eq!(scanner.peek_identifier().as_deref(), Some("rest"));
    assert_eq!(scanner.position(), 6);
}

#[test]
fn identifier_must_start_with_letter() {
    let mut scanner = Scanner::new("_x");
    assert!(!scanner.at_identifier());
    let err = scanner.scan_identifier().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidIdentifier);
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn numbers_take_optional_units() {
    assert_eq!(Scanner::new("12").scan_number().unwrap(), (12.0, None));
    assert_eq!(
        Scanner::new("-0.5br").scan_number().unwrap(),
        (-0.5, Some("br".into()))
    );
    assert_eq!(
        Scanner::new("3 plates").scan_number().unwrap(),
        (3.0, Some("plates".into()))
    );
}

#[test]
fn lone_minus_is_not_a_number() {
    let err = Scanner::new("-x").scan_number().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
    assert_eq!(err.column, 0);
}

#[test]
fn trailing_dot_is_left_behind() {
    let mut scanner = Scanner::new("4.)");
    assert_eq!(scanner.scan_number().unwrap(), (4.0, None));
    assert_eq!(scanner.peek(), Some('.'));
}

// =============================================================================
// Strings and Checkpoints
// =============================================================================

#[test]
fn quoted_strings_escape() {
    assert_eq!(
        Scanner::new(r#""say \"hi\"""#).scan_quoted().unwrap(),
        r#"say "hi""#
    );
    assert_eq!(Scanner::new("'it''").scan_quoted().unwrap(), "it");
}

#[test]
fn unterminated_string_points_at_end() {
    let err = Scanner::new("'open").scan_quoted().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!(err.column, 5);
    assert_eq!(err.input, "'open");
}

#[test]
fn checkpoint_restores_cursor() {
    let mut scanner = Scanner::new("abc");
    let start = scanner.checkpoint();
    scanner.advance();
    scanner.advance();
    scanner.restore(start);
    assert_eq!(scanner.position(), 0);
    assert!(scanner.eat('a'));
    assert!(!scanner.eat('c'));
}
