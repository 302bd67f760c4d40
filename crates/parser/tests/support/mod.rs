use parser::PushParser;
use syntax::TokenKind;

/// Drives a parser over `fragments` and collects the resulting token stream
/// with stitched token text, the way a fragment-fed consumer would.
///
/// `*Part` prefixes are accumulated and glued to the completing token, so a
/// split string or number compares equal to its unfragmented parse. Literal
/// tokens keep no text: their kind is their value, and a literal resumed in a
/// later fragment only has its tail bytes in view.
pub fn collect_tokens(fragments: &[&[u8]]) -> Vec<(TokenKind, Vec<u8>)> {
    let mut parser: PushParser = PushParser::new();
    let mut remaining = fragments.iter();
    let mut fragment: &[u8] = remaining.next().copied().unwrap_or(b"");
    let mut stream = Vec::new();
    let mut pending = Vec::new();

    let mut token = parser.start(fragment);
    loop {
        if token.is_terminal() {
            stream.push((token, Vec::new()));
            return stream;
        }
        if token.is_pending() {
            if token.is_part() {
                let part = parser.text(fragment);
                assert!(parser.token_span().end <= fragment.len());
                pending.extend_from_slice(part);
            }
            match remaining.next() {
                Some(next) => {
                    fragment = next;
                    token = parser.resume(fragment);
                }
                None => {
                    stream.push((token, Vec::new()));
                    return stream;
                }
            }
            continue;
        }
        let text = match token {
            TokenKind::Null | TokenKind::True | TokenKind::False => {
                pending.clear();
                Vec::new()
            }
            _ => {
                let mut text = core::mem::take(&mut pending);
                text.extend_from_slice(parser.text(fragment));
                text
            }
        };
        stream.push((token, text));
        token = parser.next(fragment);
    }
}

/// Same stream, with the document delivered in `chunk`-sized fragments.
pub fn collect_fragmented(document: &[u8], chunk: usize) -> Vec<(TokenKind, Vec<u8>)> {
    let fragments: Vec<&[u8]> = document.chunks(chunk).collect();
    collect_tokens(&fragments)
}

/// Shorthand for an expected `(kind, text)` stream entry.
pub fn tok(kind: TokenKind, text: &str) -> (TokenKind, Vec<u8>) {
    (kind, text.as_bytes().to_vec())
}
