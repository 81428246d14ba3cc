//! Template tokenization

/// A whitespace-delimited template token
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A word copied verbatim into every utterance
    Literal(String),

    /// `{name}`: substituted with each value of the named entity group
    Placeholder(String),
}

impl Token {
    /// Classify a single raw token
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            Some(name) => Token::Placeholder(name.to_string()),
            None => Token::Literal(raw.to_string()),
        }
    }

    /// Whether this is a placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Token::Placeholder(_))
    }
}

/// Split a template on whitespace and classify each token
pub fn tokenize(template: &str) -> Vec<Token> {
    template.split_whitespace().map(Token::parse).collect()
}
