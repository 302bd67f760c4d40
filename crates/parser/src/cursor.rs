use syntax::TokenKind;

use crate::parser::PushParser;
use crate::state::State;

impl<const MAX_DEPTH: usize> PushParser<MAX_DEPTH> {
    /// Returns the current token's text within `fragment`.
    ///
    /// Strings and member names exclude their quotes; escape sequences pass
    /// through undecoded. After a `*Part` outcome this is the part of the
    /// token found in the just-exhausted fragment. The borrow is tied to
    /// `fragment`, not to the parser, so the caller may drop or refill the
    /// fragment buffer once it is done reading.
    ///
    /// # Panics
    ///
    /// Panics if `fragment` is shorter than the recorded token extent, which
    /// can only happen when a different slice is passed than the one the
    /// token was scanned from.
    pub fn text<'a>(&self, fragment: &'a [u8]) -> &'a [u8] {
        &fragment[self.token_start..self.token_start + self.token_length]
    }

    /// Byte range of the current token's text within the current fragment.
    pub fn token_span(&self) -> core::ops::Range<usize> {
        self.token_start..self.token_start + self.token_length
    }

    /// Offset at which scanning continues, one past the current token (and
    /// past its closing quote for strings). `None` when the fragment is
    /// already exhausted.
    pub(crate) fn resume_offset(&self, fragment: &[u8]) -> Option<usize> {
        let mut pos = self.token_start + self.token_length;
        if matches!(self.token, TokenKind::String | TokenKind::MemberName) {
            pos += 1;
        }
        (pos < fragment.len()).then_some(pos)
    }

    /// Marks where the token that begins in `state` starts.
    pub(crate) fn set_token_start(&mut self, state: State, pos: usize) {
        self.token_start = pos;
        if state == State::StringBegin {
            // the opening quote is not part of the token text
            self.token_start += 1;
        }
    }

    /// Records the completed token and where its text ends.
    pub(crate) fn set_token_end(&mut self, token: TokenKind, pos: usize) {
        self.token = token;
        let end = match token {
            // literals and structural bytes end on `pos` itself; numbers end
            // before their unconsumed terminator, strings before the quote
            TokenKind::Null
            | TokenKind::True
            | TokenKind::False
            | TokenKind::ObjectBegin
            | TokenKind::ObjectEnd
            | TokenKind::ArrayBegin
            | TokenKind::ArrayEnd => pos + 1,
            _ => pos,
        };
        self.token_length = end - self.token_start;
    }

    /// The fragment ran out mid-token: park the scanner state on the stack
    /// and report what kind of partial result the caller is holding.
    pub(crate) fn suspend(&mut self, state: State, fragment_len: usize) -> TokenKind {
        self.stack[self.level] = state;
        self.token_length = fragment_len - self.token_start;
        let token = if state.in_string() {
            if self.stack[self.level - 1].expects_member_name() {
                TokenKind::MemberNamePart
            } else {
                TokenKind::StringPart
            }
        } else if state.in_number() {
            TokenKind::NumberPart
        } else {
            // mid-literal or mid-whitespace; there is no useful prefix text
            TokenKind::Continue
        };
        self.token = token;
        token
    }
}
