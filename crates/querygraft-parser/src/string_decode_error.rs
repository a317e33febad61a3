/// An error decoding the content of a raw string literal.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StringDecodeError {
    #[error("invalid escape sequence: `{0}`")]
    InvalidEscapeSequence(String),

    #[error("invalid unicode escape sequence: `{0}`")]
    InvalidUnicodeEscape(String),

    #[error("unterminated string literal")]
    UnterminatedString,
}
