use crate::SnippetParseErrorKind;
use crate::StringDecodeError;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The kind of a snippet token.
///
/// Numeric and string literals store only the raw source text; use
/// [`parse_int_value()`](SnippetTokenKind::parse_int_value),
/// [`parse_float_value()`](SnippetTokenKind::parse_float_value), and
/// [`decode_string_value()`](SnippetTokenKind::decode_string_value) to
/// interpret them.
///
/// Negative numbers like `-123` are lexed as single tokens, not as separate
/// minus and number tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum SnippetTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `@`
    At,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text only)
    // =========================================================================
    /// A name/identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    Name(&'src str),

    /// Raw source text of an integer literal, including any sign (`"-123"`).
    IntValue(&'src str),

    /// Raw source text of a float literal, including any sign (`"-1.5e-2"`).
    FloatValue(&'src str),

    /// Raw source text of a string literal, including its quotes
    /// (`"\"hi\""`, `"\"\"\"block\"\"\""`).
    StringValue(&'src str),

    // =========================================================================
    // Boolean and null (distinct from Name for type safety)
    // =========================================================================
    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,

    // =========================================================================
    // End of input
    // =========================================================================
    Eof,

    // =========================================================================
    // Lexer error
    // =========================================================================
    /// A lexer error. The parser converts the first of these it sees into a
    /// [`SnippetParseError`](crate::SnippetParseError) and aborts.
    Error {
        /// A human-readable error message.
        message: String,
        /// Categorized error kind, forwarded into the parse error.
        kind: SnippetParseErrorKind,
    },
}

impl<'src> SnippetTokenKind<'src> {
    /// Returns the name text if this token can serve as a name.
    ///
    /// `true`, `false`, and `null` are lexed as keyword tokens but remain
    /// legal names (field names, argument names, fragment names).
    pub fn as_name(&self) -> Option<&'src str> {
        match self {
            SnippetTokenKind::Name(name) => Some(name),
            SnippetTokenKind::True => Some("true"),
            SnippetTokenKind::False => Some("false"),
            SnippetTokenKind::Null => Some("null"),
            _ => None,
        }
    }

    /// Returns `true` if this token represents a lexer error.
    pub fn is_error(&self) -> bool {
        matches!(self, SnippetTokenKind::Error { .. })
    }

    /// Parse an `IntValue`'s raw text to `i64`.
    ///
    /// Returns `None` if this is not an `IntValue`, or `Some(Err(...))` if
    /// the literal does not fit.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            SnippetTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parse a `FloatValue`'s raw text to `f64`.
    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            SnippetTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Decode a `StringValue`'s raw text to its unescaped content.
    ///
    /// Single-line strings (`"..."`) process the `\n`, `\r`, `\t`, `\\`,
    /// `\"`, `\/`, `\b`, `\f`, and `\uXXXX` escapes. Block strings
    /// (`"""..."""`) strip common indentation and process the `\"""` escape
    /// only.
    ///
    /// Returns `None` if this is not a `StringValue`.
    pub fn decode_string_value(&self) -> Option<Result<String, StringDecodeError>> {
        match self {
            SnippetTokenKind::StringValue(raw) => Some(decode_string(raw)),
            _ => None,
        }
    }

    /// A short human-readable description of this token for error messages.
    pub fn description(&self) -> String {
        match self {
            SnippetTokenKind::At => "`@`".to_string(),
            SnippetTokenKind::Colon => "`:`".to_string(),
            SnippetTokenKind::CurlyBraceClose => "`}`".to_string(),
            SnippetTokenKind::CurlyBraceOpen => "`{`".to_string(),
            SnippetTokenKind::Dollar => "`$`".to_string(),
            SnippetTokenKind::Ellipsis => "`...`".to_string(),
            SnippetTokenKind::ParenClose => "`)`".to_string(),
            SnippetTokenKind::ParenOpen => "`(`".to_string(),
            SnippetTokenKind::SquareBracketClose => "`]`".to_string(),
            SnippetTokenKind::SquareBracketOpen => "`[`".to_string(),
            SnippetTokenKind::Name(name) => format!("name `{name}`"),
            SnippetTokenKind::IntValue(raw) | SnippetTokenKind::FloatValue(raw) => {
                format!("number `{raw}`")
            }
            SnippetTokenKind::StringValue(_) => "string literal".to_string(),
            SnippetTokenKind::True => "`true`".to_string(),
            SnippetTokenKind::False => "`false`".to_string(),
            SnippetTokenKind::Null => "`null`".to_string(),
            SnippetTokenKind::Eof => "end of input".to_string(),
            SnippetTokenKind::Error { message, .. } => format!("invalid token ({message})"),
        }
    }
}

/// Decode a raw string literal into its unescaped content.
fn decode_string(raw: &str) -> Result<String, StringDecodeError> {
    if raw.starts_with("\"\"\"") {
        decode_block_string(raw)
    } else {
        decode_single_line_string(raw)
    }
}

fn decode_single_line_string(raw: &str) -> Result<String, StringDecodeError> {
    if !raw.starts_with('"') || !raw.ends_with('"') || raw.len() < 2 {
        return Err(StringDecodeError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('u') => result.push(decode_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(StringDecodeError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            }
            None => {
                return Err(StringDecodeError::InvalidEscapeSequence("\\".to_string()));
            }
        }
    }

    Ok(result)
}

/// Decode a fixed 4-digit `\uXXXX` escape after the `\u` has been consumed.
fn decode_unicode_escape(chars: &mut std::str::Chars) -> Result<char, StringDecodeError> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            Some(c) => {
                return Err(StringDecodeError::InvalidUnicodeEscape(format!(
                    "\\u{hex}{c}"
                )));
            }
            None => {
                return Err(StringDecodeError::InvalidUnicodeEscape(format!("\\u{hex}")));
            }
        }
    }
    let code_point = u32::from_str_radix(&hex, 16)
        .map_err(|_| StringDecodeError::InvalidUnicodeEscape(format!("\\u{hex}")))?;
    char::from_u32(code_point)
        .ok_or_else(|| StringDecodeError::InvalidUnicodeEscape(format!("\\u{hex}")))
}

/// Decode a block string literal, stripping common indentation.
fn decode_block_string(raw: &str) -> Result<String, StringDecodeError> {
    if !raw.starts_with("\"\"\"") || !raw.ends_with("\"\"\"") || raw.len() < 6 {
        return Err(StringDecodeError::UnterminatedString);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");

    let lines: Vec<&str> = content.lines().collect();

    // Common indentation, ignoring the first line and blank lines.
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut result_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                *line
            } else {
                strip_indent(line, common_indent)
            }
        })
        .collect();

    while result_lines.first().is_some_and(|l| l.trim().is_empty()) {
        result_lines.remove(0);
    }
    while result_lines.last().is_some_and(|l| l.trim().is_empty()) {
        result_lines.pop();
    }

    Ok(result_lines.join("\n"))
}

/// Strips leading whitespace characters that fit entirely within the first
/// `indent` bytes of `line`.
///
/// The common indent is measured in bytes over non-blank lines, but blank
/// lines are excluded from that minimum and may hold multi-byte whitespace,
/// so a plain byte slice could split a character. Stripping whole characters
/// keeps the cut on a boundary; a line with less indent than measured keeps
/// its remainder.
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut strip = 0;
    for (offset, c) in line.char_indices() {
        if !c.is_whitespace() || offset + c.len_utf8() > indent {
            break;
        }
        strip = offset + c.len_utf8();
    }
    &line[strip..]
}
