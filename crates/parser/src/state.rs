use syntax::TokenKind;

/// One position of the combined scanner/parser automaton.
///
/// The automaton merges three bands: scanner states (a multi-byte token in
/// progress), expectation states (the parser awaiting the next syntactic
/// position), and completed tokens. `Token` doubles as the sticky terminal
/// marker: once `Token(Invalid)` or `Token(End)` is pinned at the top of the
/// stack, every later call reports the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// A token the scan just completed, or a pinned terminal outcome.
    Token(TokenKind),

    // literal recognition, one state per matched byte
    NullN,
    NullU,
    NullL,
    TrueT,
    TrueR,
    TrueU,
    FalseF,
    FalseA,
    FalseL,
    FalseS,

    // string recognition
    StringBegin,
    StringChars,
    StringEscape,

    // number recognition
    NumberBegin,
    IntDigits,
    DecDigits,
    Exponent,
    ExponentDigits,

    // expectations that shift without emitting a token
    ArrayTail,
    ObjectTail,
    MemberValueSeparator,

    // expectations that reduce the stack when their token arrives
    Json,
    ArrayElementOrEnd,
    ArrayElement,
    MemberNameOrEnd,
    MemberName,
    MemberValue,
}

impl State {
    /// The scan completed a token; the stack must reduce.
    #[inline]
    pub(crate) fn is_final(self) -> bool {
        matches!(self, State::Token(_))
    }

    /// First state of a multi-byte token; entering it shifts a stack level.
    #[inline]
    pub(crate) fn starts_token(self) -> bool {
        matches!(
            self,
            State::NullN | State::TrueT | State::FalseF | State::NumberBegin | State::StringBegin
        )
    }

    /// Opener of a composite value; its level stays occupied until the
    /// matching closer pops it.
    #[inline]
    pub(crate) fn starts_nesting(self) -> bool {
        matches!(self, State::Token(TokenKind::ObjectBegin) | State::Token(TokenKind::ArrayBegin))
    }

    /// Any expectation state. Only these skip insignificant whitespace.
    #[inline]
    pub(crate) fn is_expectation(self) -> bool {
        self.reduces() || matches!(self, State::ArrayTail | State::ObjectTail | State::MemberValueSeparator)
    }

    /// Expectations that emit a token and pop the stack when satisfied. The
    /// scan can move straight into one of these (`,` and `:` do), and the
    /// move must be recorded on the stack.
    #[inline]
    pub(crate) fn reduces(self) -> bool {
        matches!(
            self,
            State::Json
                | State::ArrayElementOrEnd
                | State::ArrayElement
                | State::MemberNameOrEnd
                | State::MemberName
                | State::MemberValue
        )
    }

    /// A string completed under this expectation is an object member name.
    #[inline]
    pub(crate) fn expects_member_name(self) -> bool {
        matches!(self, State::MemberName | State::MemberNameOrEnd)
    }

    #[inline]
    pub(crate) fn in_string(self) -> bool {
        matches!(self, State::StringBegin | State::StringChars | State::StringEscape)
    }

    #[inline]
    pub(crate) fn in_number(self) -> bool {
        matches!(
            self,
            State::NumberBegin | State::IntDigits | State::DecDigits | State::Exponent | State::ExponentDigits
        )
    }

    #[inline]
    pub(crate) fn in_literal(self) -> bool {
        matches!(
            self,
            State::NullN
                | State::NullU
                | State::NullL
                | State::TrueT
                | State::TrueR
                | State::TrueU
                | State::FalseF
                | State::FalseA
                | State::FalseL
                | State::FalseS
        )
    }

    /// Mid-token scanner state, left at the top of the stack when a fragment
    /// ran out inside a token.
    #[inline]
    pub(crate) fn is_scanning(self) -> bool {
        self.in_string() || self.in_number() || self.in_literal()
    }

    /// Terminal pinned on the stack, if any.
    #[inline]
    pub(crate) fn terminal(self) -> Option<TokenKind> {
        match self {
            State::Token(kind) if kind.is_terminal() => Some(kind),
            _ => None,
        }
    }
}
