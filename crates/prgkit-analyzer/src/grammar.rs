//! The .prg motion grammar
//!
//! One authoritative codec for Aerotech-style motion lines, shared by
//! the parser and the annotator so that re-serialization stays
//! byte-faithful outside the rewritten feed field.
//!
//! A motion line is a leading command word followed by parameter words:
//!
//! ```text
//! LINEAR X10.0 Y5.0 F2.0        ' straight move
//! CW X20.0 Y5.0 R5.0            ' clockwise arc, explicit radius
//! CCW X10.0 Y5.0 I-5.0 J0.0     ' counter-clockwise arc, center offset
//! ```
//!
//! Command words are case-insensitive. `X`/`Y` are absolute targets,
//! `I`/`J` are center offsets relative to the segment start, `R` is an
//! explicit radius, and `F` is the modal feed in units/sec. Comments
//! start at `'` or `;`. Any other leading word is a non-motion line.

use prgkit_core::error::ParseError;
use regex::Regex;

/// Motion command word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionWord {
    /// Straight move (`LINEAR`)
    Linear,
    /// Clockwise arc (`CW`)
    Cw,
    /// Counter-clockwise arc (`CCW`)
    Ccw,
}

impl MotionWord {
    /// True for the two arc words
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Cw | Self::Ccw)
    }
}

/// Parameter words recognized on a motion line
///
/// Unrecognized parameter letters (e.g. a `Z` word) are validated as
/// letter+number tokens but carry no meaning for planar analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionLine {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub i: Option<f64>,
    pub j: Option<f64>,
    pub r: Option<f64>,
    pub f: Option<f64>,
}

/// A classified motion command: the word plus its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub word: MotionWord,
    pub params: MotionLine,
}

/// Split a raw line into its code and comment parts.
///
/// The comment part includes the delimiter so that code + comment
/// reproduces the original line.
pub fn split_comment(line: &str) -> (&str, &str) {
    match line.find(|c| c == '\'' || c == ';') {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    }
}

/// Classify a raw line.
///
/// Returns `Ok(None)` for non-motion lines (blank, comment, setup
/// commands), `Ok(Some(_))` for a well-formed motion line, and `Err`
/// when the line names a motion word but its parameters are malformed.
pub fn classify(line: &str) -> Result<Option<MotionCommand>, ParseError> {
    let (code, _) = split_comment(line);
    let mut tokens = code.split_whitespace();

    let word = match tokens.next() {
        Some(head) => match head.to_ascii_uppercase().as_str() {
            "LINEAR" => MotionWord::Linear,
            "CW" => MotionWord::Cw,
            "CCW" => MotionWord::Ccw,
            _ => return Ok(None),
        },
        None => return Ok(None),
    };

    let mut params = MotionLine::default();
    for token in tokens {
        let letter = token
            .chars()
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| ParseError::MalformedToken {
                token: token.to_string(),
            })?
            .to_ascii_uppercase();

        let value: f64 = token[1..]
            .parse()
            .map_err(|_| ParseError::MalformedToken {
                token: token.to_string(),
            })?;

        let slot = match letter {
            'X' => &mut params.x,
            'Y' => &mut params.y,
            'I' => &mut params.i,
            'J' => &mut params.j,
            'R' => &mut params.r,
            'F' => &mut params.f,
            // Valid token, irrelevant axis (e.g. Z on a 2.5D machine).
            _ => continue,
        };
        if slot.is_some() {
            return Err(ParseError::DuplicateWord { word: letter });
        }
        *slot = Some(value);
    }

    Ok(Some(MotionCommand { word, params }))
}

/// Format a feed value for re-serialization.
///
/// Rounds toward zero at four decimals so a written feed never exceeds
/// the computed safe bound it was derived from.
pub fn format_feed(feed: f64) -> String {
    let floored = (feed * 10_000.0).floor() / 10_000.0;
    format!("{:.4}", floored)
}

fn feed_word_regex() -> &'static Regex {
    static FEED_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    FEED_REGEX.get_or_init(|| {
        // The numeric alternation must consume every f64 shape classify
        // accepts, trailing-dot forms like "9." included, or a rewrite
        // would leave stray digits behind the new feed text.
        Regex::new(r"(?i)(^|\s)(F)(-?(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("invalid regex pattern")
    })
}

/// Rewrite the feed word of a motion line, preserving every other byte.
///
/// Replaces the numeric text of the first `F` word in the code part;
/// when the line carries no `F` word, one is appended ahead of any
/// trailing whitespace and comment.
pub fn rewrite_feed(line: &str, feed_text: &str) -> String {
    let (code, comment) = split_comment(line);

    if let Some(caps) = feed_word_regex().captures(code) {
        let m = caps.get(3).expect("feed value group");
        let mut out = String::with_capacity(line.len() + feed_text.len());
        out.push_str(&code[..m.start()]);
        out.push_str(feed_text);
        out.push_str(&code[m.end()..]);
        out.push_str(comment);
        out
    } else {
        let body = code.trim_end();
        let trailing = &code[body.len()..];
        format!("{} F{}{}{}", body, feed_text, trailing, comment)
    }
}
