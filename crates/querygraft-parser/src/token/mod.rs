mod snippet_token;
mod snippet_token_kind;

pub use snippet_token::SnippetToken;
pub use snippet_token_kind::SnippetTokenKind;
