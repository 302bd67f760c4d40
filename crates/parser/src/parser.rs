use syntax::TokenKind;

use crate::scan;
use crate::skip::Skip;
use crate::state::State;

/// Default nesting capacity of the expectation stack.
pub const DEFAULT_MAX_DEPTH: usize = 14;

/// Incremental push-style JSON tokenizer.
///
/// The parser consumes a JSON document as a sequence of arbitrarily split
/// byte fragments and emits one grammar-level token per call. It never owns,
/// copies, or concatenates document bytes: every operation takes the current
/// fragment as a parameter, and [`text`](PushParser::text) borrows token text
/// straight out of that slice. The caller is free to refill the same backing
/// buffer between fragments, which is the intended mode of use in receive
/// callbacks.
///
/// A fragment may end in the middle of a token. The parser then reports
/// [`TokenKind::Continue`] or one of the `*Part` kinds, parks its scanner
/// state, and picks the token back up when [`resume`](PushParser::resume)
/// supplies the next fragment. Stitching the part texts together is the
/// caller's job; the parser only guarantees that the concatenation of the
/// parts equals the token text of an unfragmented parse.
///
/// `MAX_DEPTH` bounds nesting. Each open object or array occupies one stack
/// level until its closer arrives, and a scalar occupies one more while it is
/// being scanned; exceeding the bound yields the sticky
/// [`TokenKind::TooDeep`].
///
/// ```
/// use parser::PushParser;
/// use syntax::TokenKind;
///
/// let mut parser: PushParser = PushParser::new();
/// let fragment = b"{\"answer\":42}";
/// assert_eq!(parser.start(fragment), TokenKind::ObjectBegin);
/// assert_eq!(parser.next(fragment), TokenKind::MemberName);
/// assert_eq!(parser.text(fragment), b"answer");
/// assert_eq!(parser.next(fragment), TokenKind::Integer);
/// assert_eq!(parser.text(fragment), b"42");
/// assert_eq!(parser.next(fragment), TokenKind::ObjectEnd);
/// assert_eq!(parser.next(fragment), TokenKind::End);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PushParser<const MAX_DEPTH: usize = DEFAULT_MAX_DEPTH> {
    /// Offset of the current token's text within the current fragment. The
    /// opening quote of a string or member name is excluded.
    pub(crate) token_start: usize,
    /// Length of the current token's text within the current fragment.
    pub(crate) token_length: usize,
    /// Kind of the most recently produced token; used to step over the
    /// closing quote of a string before the next scan.
    pub(crate) token: TokenKind,
    /// Where a suspended skip left off, consulted by `resume`.
    pub(crate) skip: Skip,
    /// Current depth in the expectation stack.
    pub(crate) level: usize,
    pub(crate) stack: [State; MAX_DEPTH],
}

impl<const MAX_DEPTH: usize> PushParser<MAX_DEPTH> {
    pub fn new() -> Self {
        const { assert!(MAX_DEPTH > 0, "the expectation stack needs at least the root level") }
        Self {
            token_start: 0,
            token_length: 0,
            token: TokenKind::Invalid,
            skip: Skip::None,
            level: 0,
            stack: [State::Json; MAX_DEPTH],
        }
    }

    /// Initializes the parser and scans the first token of `fragment`.
    ///
    /// This also recovers a parser that reached a terminal outcome; all other
    /// operations keep returning the terminal kind once one was emitted.
    pub fn start(&mut self, fragment: &[u8]) -> TokenKind {
        *self = Self::new();
        self.next(fragment)
    }

    /// Feeds the next fragment, resuming a split token or a suspended skip.
    ///
    /// A token that was answered with a `*Part` kind completes here as a
    /// normal token whose [`text`](PushParser::text) covers only the tail
    /// found in the new fragment.
    pub fn resume(&mut self, fragment: &[u8]) -> TokenKind {
        self.token_start = 0;
        self.token_length = 0;
        self.token = TokenKind::Invalid;

        match self.skip {
            Skip::Element => self.skip_next(fragment),
            Skip::Remainder => self.finish_skip_current(fragment),
            Skip::Composite { .. } => self.finish_skip_composite(fragment),
            Skip::None => self.next(fragment),
        }
    }

    /// Scans the next token in the current fragment.
    ///
    /// `fragment` must be the same bytes the preceding `start`/`resume` call
    /// received; only the borrow is fresh, not the content.
    pub fn next(&mut self, fragment: &[u8]) -> TokenKind {
        if self.level >= MAX_DEPTH {
            return TokenKind::TooDeep;
        }
        let mut state = self.stack[self.level];
        if let Some(terminal) = state.terminal() {
            return terminal;
        }

        let Some(mut pos) = self.resume_offset(fragment) else {
            return TokenKind::Continue;
        };

        loop {
            state = scan::next_scan_state(state, fragment[pos]);
            if state.starts_token() || state.starts_nesting() {
                self.set_token_start(state, pos);
                self.level += 1;
                if self.level == MAX_DEPTH {
                    return TokenKind::TooDeep;
                }
            } else if state.reduces() {
                self.stack[self.level] = state;
            }
            if let State::Token(token) = state {
                return self.reduce(token, pos);
            }
            pos += 1;
            if pos >= fragment.len() {
                return self.suspend(state, fragment.len());
            }
        }
    }

    /// Records the finished token's extent, pops the level it occupied,
    /// relabels member names, and advances the expectation underneath.
    fn reduce(&mut self, token: TokenKind, pos: usize) -> TokenKind {
        if token == TokenKind::Invalid {
            // pin the failure so every later call reports it
            self.stack[self.level] = State::Token(TokenKind::Invalid);
            self.token = TokenKind::Invalid;
            return TokenKind::Invalid;
        }
        if token.closes_nesting() {
            // closers never went through set_token_start
            self.token_start = pos;
        }
        self.set_token_end(token, pos);

        let mut token = token;
        let reduced = if token.opens_nesting() {
            // the opener keeps its level; its closer pops it later
            State::Token(token)
        } else {
            self.level -= 1;
            let below = self.stack[self.level];
            if token == TokenKind::String && below.expects_member_name() {
                token = TokenKind::MemberName;
                self.token = token;
            }
            below
        };
        self.stack[self.level] = scan::next_parsing_state(reduced);
        token
    }
}

impl<const MAX_DEPTH: usize> Default for PushParser<MAX_DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
