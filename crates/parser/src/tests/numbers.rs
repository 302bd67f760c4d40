use pretty_assertions::assert_eq;
use rstest::rstest;
use syntax::TokenKind;

use crate::PushParser;

#[rstest]
#[case(b" 12345 ", TokenKind::Integer, b"12345")]
#[case(b" -1234 ", TokenKind::Integer, b"-1234")]
#[case(b" 0 ", TokenKind::Integer, b"0")]
#[case(b" 12.34 ", TokenKind::Decimal, b"12.34")]
#[case(b" -1.23 ", TokenKind::Decimal, b"-1.23")]
#[case(b" 12e34 ", TokenKind::FloatingPoint, b"12e34")]
#[case(b" 12E34 ", TokenKind::FloatingPoint, b"12E34")]
#[case(b" 1.2e3 ", TokenKind::FloatingPoint, b"1.2e3")]
#[case(b" -1.23e-45 ", TokenKind::FloatingPoint, b"-1.23e-45")]
#[case(b" -1.23e+45 ", TokenKind::FloatingPoint, b"-1.23e+45")]
fn test_parse_number_expect_subclass_and_text(
    #[case] document: &[u8],
    #[case] expected_kind: TokenKind,
    #[case] expected_text: &[u8],
) {
    let mut parser: PushParser = PushParser::new();

    assert_eq!(parser.start(document), expected_kind);
    assert_eq!(parser.text(document), expected_text);
    assert_eq!(parser.next(document), TokenKind::End);
}

#[test]
fn test_parse_number_when_fragment_ends_inside_it_expect_number_part() {
    // no terminator byte seen yet, so the subclass is still unknown
    let document = b" 123456";
    let mut parser: PushParser = PushParser::new();

    assert_eq!(parser.start(document), TokenKind::NumberPart);
    assert_eq!(parser.text(document), b"123456");
}

#[test]
fn test_parse_number_when_terminator_opens_next_fragment_expect_empty_tail() {
    let mut parser: PushParser = PushParser::new();

    assert_eq!(parser.start(b"42"), TokenKind::NumberPart);
    // the whole number was already seen; the next fragment only terminates it
    assert_eq!(parser.resume(b" "), TokenKind::Integer);
    assert_eq!(parser.text(b" "), b"");
    assert_eq!(parser.next(b" "), TokenKind::End);
}

#[test]
fn test_parse_bare_minus_expect_integer_with_minus_text() {
    // a lone `-` is reported as an integer with text `-`; the consumer that
    // converts number text is the one to reject it
    let document = b"[-]";
    let mut parser: PushParser = PushParser::new();

    assert_eq!(parser.start(document), TokenKind::ArrayBegin);
    assert_eq!(parser.next(document), TokenKind::Integer);
    assert_eq!(parser.text(document), b"-");
    assert_eq!(parser.next(document), TokenKind::ArrayEnd);
    assert_eq!(parser.next(document), TokenKind::End);
}
