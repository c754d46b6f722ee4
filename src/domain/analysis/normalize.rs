/// Characters that terminate a token, on top of whitespace. Ingredient
/// labels separate entries with commas and bracket punctuation.
const SEPARATORS: &[char] = &[',', '[', ']', '(', ')'];

/// Normalized, comparable view of a block of ingredient text.
///
/// Tokens are lowercased, trimmed, deduplicated, and kept in first-seen
/// order so results are deterministic. `joined` is the space-joined form of
/// the full normalized sequence, duplicates included: dropping a repeated
/// word would destroy adjacency and multi-word terms ("wheat starch") would
/// stop matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSet {
    tokens: Vec<String>,
    joined: String,
}

impl TokenSet {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn joined(&self) -> &str {
        &self.joined
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Lowercase and tokenize free text. Pure; no failure modes.
pub fn normalize(text: &str) -> TokenSet {
    let lowered = text.to_lowercase();
    let mut sequence: Vec<&str> = Vec::new();
    let mut tokens: Vec<String> = Vec::new();

    for raw in lowered.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c)) {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }
        sequence.push(token);
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }

    let joined = sequence.join(" ");
    TokenSet { tokens, joined }
}
