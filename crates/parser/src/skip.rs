use syntax::TokenKind;

use crate::parser::PushParser;

/// Where a suspended skip left off, consulted by [`PushParser::resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skip {
    /// No skip in progress.
    None,
    /// `skip_next` ran out of fragment before its element finished; re-enter
    /// it when the next fragment arrives.
    Element,
    /// `skip_current` is discarding the remainder of a split token.
    Remainder,
    /// Draining a composite element; done when `closer` surfaces back at
    /// `level`.
    Composite { closer: TokenKind, level: usize },
}

impl<const MAX_DEPTH: usize> PushParser<MAX_DEPTH> {
    /// Skips the next element and returns the token that follows it.
    ///
    /// An element is a literal, a number, a string, an array, an object, or
    /// an object member (name and value both). Closers are returned
    /// unchanged; they are not an element by themselves. When the fragment
    /// ends inside the element being skipped the call returns
    /// [`TokenKind::Continue`] and the skip resumes automatically on the next
    /// [`resume`](PushParser::resume), however many fragments that takes.
    pub fn skip_next(&mut self, fragment: &[u8]) -> TokenKind {
        let token = self.next(fragment);
        if token.is_terminal() {
            self.skip = Skip::None;
            return token;
        }
        if token.is_pending() {
            // mid-element; pick the skip back up in the next fragment
            self.skip = Skip::Element;
            return TokenKind::Continue;
        }
        if let Some(closer) = token.closer_for() {
            // a composite element; drain it to its matching closer
            self.skip = Skip::Composite { closer, level: self.level - 1 };
            return self.finish_skip_composite(fragment);
        }
        match token {
            // a member is name and value; skip both
            TokenKind::MemberName => self.skip_next(fragment),
            TokenKind::ObjectEnd | TokenKind::ArrayEnd => {
                self.skip = Skip::None;
                token
            }
            _ => {
                // a scalar value; it is consumed, return what follows
                self.skip = Skip::None;
                self.next(fragment)
            }
        }
    }

    /// Skips whatever the parser is in the middle of and returns the token
    /// that follows it.
    ///
    /// Meaningful after a `*Part` outcome: the remainder of the split token
    /// is discarded, across as many fragments as it spans, without the caller
    /// having to buffer it. When nothing is in progress this is simply
    /// [`next`](PushParser::next).
    pub fn skip_current(&mut self, fragment: &[u8]) -> TokenKind {
        if self.level < MAX_DEPTH && self.stack[self.level].is_scanning() {
            // a token is split over the fragment boundary; its tail has not
            // arrived yet
            self.skip = Skip::Remainder;
            return TokenKind::Continue;
        }
        self.next(fragment)
    }

    /// Drains tokens until the awaited closer surfaces at the recorded level,
    /// then returns the first token after it.
    pub(crate) fn finish_skip_composite(&mut self, fragment: &[u8]) -> TokenKind {
        let Skip::Composite { closer, level } = self.skip else {
            return self.next(fragment);
        };
        loop {
            let token = self.next(fragment);
            if token.is_terminal() {
                self.skip = Skip::None;
                return token;
            }
            if token == TokenKind::Continue {
                // the composite continues in the next fragment; the hint
                // stays armed
                return TokenKind::Continue;
            }
            if token == closer && self.level <= level {
                break;
            }
        }
        self.skip = Skip::None;
        self.next(fragment)
    }

    /// Completes a `skip_current` whose token crossed a fragment boundary.
    pub(crate) fn finish_skip_current(&mut self, fragment: &[u8]) -> TokenKind {
        let token = self.next(fragment);
        if token.is_terminal() {
            self.skip = Skip::None;
            return token;
        }
        if token.is_pending() {
            // split across yet another boundary
            return TokenKind::Continue;
        }
        // the remainder completed as `token`; what follows is the answer
        self.skip = Skip::None;
        self.next(fragment)
    }
}
