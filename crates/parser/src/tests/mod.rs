use syntax::TokenKind;

use crate::PushParser;

mod numbers;

/// Collects the full token stream of a document parsed as one fragment,
/// stopping after the first terminal or flow-control outcome.
fn token_stream(document: &[u8]) -> Vec<TokenKind> {
    let mut parser: PushParser = PushParser::new();
    let mut tokens = vec![parser.start(document)];
    loop {
        let last = *tokens.last().unwrap();
        if last.is_terminal() || last.is_pending() {
            return tokens;
        }
        tokens.push(parser.next(document));
    }
}
