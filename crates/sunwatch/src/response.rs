use parser::PushParser;
use syntax::TokenKind;

use crate::time::{TimeOfDay, scan_time};

/// Capacity of the stitch buffer that reassembles split tokens. The longest
/// token the extraction reads is the 27-byte "astronomical_twilight_begin"
/// member name.
const STITCH_CAPACITY: usize = 30;

/// The times extracted from the service response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SunTimes {
    pub twilight_begin: TimeOfDay,
    pub sunrise: TimeOfDay,
    pub sunset: TimeOfDay,
    pub twilight_end: TimeOfDay,
}

/// Outcome of feeding one response fragment to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// More fragments are needed.
    InProgress,
    /// Everything of interest has been extracted; remaining fragments may be
    /// discarded unread.
    Complete(SunTimes),
    /// The response did not have the expected shape.
    Failed,
}

/// Which member of `"results"` the upcoming string value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Sunrise,
    Sunset,
    TwilightBegin,
    TwilightEnd,
    Ignored,
}

/// Resumption point of the extraction. A fragment can end anywhere, so the
/// handler re-enters the state it parked in when the next fragment arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Expecting the top-level response object.
    Root,
    /// Expecting the `"results"` member name.
    Results,
    /// Expecting the object that holds the time members.
    ResultsObject,
    /// Expecting the next member name inside `"results"`, or its end.
    DataName,
    /// Expecting the string value of the member just named.
    DataValue(Field),
    Done,
    Failed,
}

/// Position of the HTTP/1.0 header scan relative to the `\r\n\r\n` that
/// separates headers from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderScan {
    Line,
    Cr,
    CrLf,
    CrLfCr,
    Done,
}

/// Incremental extractor for the sunrise-sunset service response.
///
/// Fed straight from receive callbacks, one fragment at a time; fragments
/// may be split anywhere, headers included. Member names and values that
/// land on a fragment boundary are reassembled in a fixed stitch buffer, so
/// the extraction logic only ever sees whole tokens. Values nobody asked for
/// are dropped through the parser's skip machinery instead.
#[derive(Debug)]
pub struct ResponseHandler {
    parser: PushParser,
    stage: Stage,
    headers: HeaderScan,
    started: bool,
    stitch: [u8; STITCH_CAPACITY],
    stitch_len: usize,
    times: SunTimes,
}

/// How a token fared against the stage's expectation.
enum Expect {
    /// The expected token, in full; stitched if it arrived in parts.
    Matched,
    /// The fragment ran out; wait for the next one.
    Starved,
    Mismatched,
}

impl ResponseHandler {
    pub fn new() -> Self {
        Self {
            parser: PushParser::new(),
            stage: Stage::Root,
            headers: HeaderScan::Line,
            started: false,
            stitch: [0; STITCH_CAPACITY],
            stitch_len: 0,
            times: SunTimes::default(),
        }
    }

    /// Handles one received fragment.
    pub fn feed(&mut self, fragment: &[u8]) -> ResponseStatus {
        match self.stage {
            Stage::Done => return ResponseStatus::Complete(self.times),
            Stage::Failed => return ResponseStatus::Failed,
            _ => {}
        }

        let payload = self.skip_headers(fragment);
        if payload.is_empty() && !self.started {
            return ResponseStatus::InProgress;
        }

        let token = if self.started {
            self.parser.resume(payload)
        } else {
            self.started = true;
            self.parser.start(payload)
        };
        self.run(token, payload)
    }

    /// Drains the tokens of the current fragment through the extraction
    /// stages until the fragment starves or the extraction settles.
    fn run(&mut self, mut token: TokenKind, payload: &[u8]) -> ResponseStatus {
        loop {
            match self.stage {
                Stage::Root => match self.expect(token, TokenKind::ObjectBegin, payload) {
                    Expect::Matched => self.stage = Stage::Results,
                    Expect::Starved => return ResponseStatus::InProgress,
                    Expect::Mismatched => return self.fail(token),
                },
                Stage::Results => match self.expect(token, TokenKind::MemberName, payload) {
                    Expect::Matched => {
                        let is_results = self.token_text(payload) == b"results";
                        self.stitch_len = 0;
                        if !is_results {
                            return self.fail(token);
                        }
                        self.stage = Stage::ResultsObject;
                    }
                    Expect::Starved => return ResponseStatus::InProgress,
                    Expect::Mismatched => return self.fail(token),
                },
                Stage::ResultsObject => match self.expect(token, TokenKind::ObjectBegin, payload) {
                    Expect::Matched => self.stage = Stage::DataName,
                    Expect::Starved => return ResponseStatus::InProgress,
                    Expect::Mismatched => return self.fail(token),
                },
                Stage::DataName => {
                    if token == TokenKind::ObjectEnd {
                        // the end of "results"; nothing else in the response
                        // is of interest
                        tracing::debug!("extraction complete");
                        self.stage = Stage::Done;
                        return ResponseStatus::Complete(self.times);
                    }
                    match self.expect(token, TokenKind::MemberName, payload) {
                        Expect::Matched => {
                            let field = match self.token_text(payload) {
                                b"sunrise" => Field::Sunrise,
                                b"sunset" => Field::Sunset,
                                b"civil_twilight_begin" => Field::TwilightBegin,
                                b"civil_twilight_end" => Field::TwilightEnd,
                                _ => Field::Ignored,
                            };
                            self.stitch_len = 0;
                            self.stage = Stage::DataValue(field);
                        }
                        Expect::Starved => return ResponseStatus::InProgress,
                        Expect::Mismatched => return self.fail(token),
                    }
                }
                Stage::DataValue(field) => {
                    if field == Field::Ignored && token == TokenKind::StringPart {
                        // no point collecting a value nobody asked for
                        self.parser.skip_current(payload);
                        self.stage = Stage::DataName;
                        return ResponseStatus::InProgress;
                    }
                    match self.expect(token, TokenKind::String, payload) {
                        Expect::Matched => {
                            let time = scan_time(self.token_text(payload));
                            self.stitch_len = 0;
                            match field {
                                Field::Sunrise => self.times.sunrise = time,
                                Field::Sunset => self.times.sunset = time,
                                Field::TwilightBegin => self.times.twilight_begin = time,
                                Field::TwilightEnd => self.times.twilight_end = time,
                                Field::Ignored => {}
                            }
                            self.stage = Stage::DataName;
                        }
                        Expect::Starved => return ResponseStatus::InProgress,
                        Expect::Mismatched => return self.fail(token),
                    }
                }
                Stage::Done => return ResponseStatus::Complete(self.times),
                Stage::Failed => return ResponseStatus::Failed,
            }
            token = self.parser.next(payload);
        }
    }

    /// Checks `token` against the stage's expectation, stitching split
    /// tokens along the way.
    fn expect(&mut self, token: TokenKind, want: TokenKind, payload: &[u8]) -> Expect {
        if token == want {
            if self.stitch_len > 0 && !self.stash(payload) {
                return Expect::Mismatched;
            }
            return Expect::Matched;
        }
        if part_of(token, want) {
            if !self.stash(payload) {
                return Expect::Mismatched;
            }
            return Expect::Starved;
        }
        if token == TokenKind::Continue { Expect::Starved } else { Expect::Mismatched }
    }

    /// Appends the current token (part) text to the stitch buffer. False when
    /// the token outgrows the buffer, which fails the response.
    fn stash(&mut self, payload: &[u8]) -> bool {
        let part = self.parser.text(payload);
        let Some(buffer) = self.stitch.get_mut(self.stitch_len..self.stitch_len + part.len()) else {
            return false;
        };
        buffer.copy_from_slice(part);
        self.stitch_len += part.len();
        true
    }

    /// Full text of the token `expect` just accepted.
    fn token_text<'a>(&'a self, payload: &'a [u8]) -> &'a [u8] {
        if self.stitch_len > 0 { &self.stitch[..self.stitch_len] } else { self.parser.text(payload) }
    }

    fn fail(&mut self, token: TokenKind) -> ResponseStatus {
        tracing::debug!(?token, stage = ?self.stage, "unexpected response shape");
        self.stage = Stage::Failed;
        ResponseStatus::Failed
    }

    /// Consumes response headers up to the blank line; returns the payload
    /// part of `fragment`, which is empty while headers are still going.
    fn skip_headers<'a>(&mut self, fragment: &'a [u8]) -> &'a [u8] {
        if self.headers == HeaderScan::Done {
            return fragment;
        }
        for (index, &byte) in fragment.iter().enumerate() {
            self.headers = match (self.headers, byte) {
                (HeaderScan::Line, b'\r') => HeaderScan::Cr,
                (HeaderScan::Cr, b'\n') => HeaderScan::CrLf,
                (HeaderScan::CrLf, b'\r') => HeaderScan::CrLfCr,
                (HeaderScan::CrLf, _) => HeaderScan::Line,
                (HeaderScan::CrLfCr, b'\n') => HeaderScan::Done,
                // `Cr` and `CrLfCr` stay parked on a stray byte; only the
                // byte after a line feed restarts the line scan
                (state, _) => state,
            };
            if self.headers == HeaderScan::Done {
                return &fragment[index + 1..];
            }
        }
        &fragment[fragment.len()..]
    }
}

impl Default for ResponseHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Does a partial token kind complete into what the stage expects?
fn part_of(token: TokenKind, want: TokenKind) -> bool {
    match token {
        TokenKind::MemberNamePart => want == TokenKind::MemberName,
        TokenKind::StringPart => want == TokenKind::String,
        TokenKind::NumberPart => (TokenKind::Integer..=TokenKind::FloatingPoint).contains(&want),
        _ => false,
    }
}
