use anyhow::Result;
use std::collections::HashMap;
use std::fs;

use crate::lexer::token::{default_keywords, TokenKind};

/// Load the keyword table, optionally remapping spellings from a JSON file.
///
/// The file maps concept names to replacement spellings, e.g.
/// `{"function": "fungsi", "let": "misal"}`. Only the spellings change;
/// the token kinds and everything downstream stay the same.
pub fn load_keywords(path: Option<&str>) -> Result<HashMap<String, TokenKind>> {
    let Some(path) = path else {
        return Ok(default_keywords());
    };

    let contents = fs::read_to_string(path)?;
    let map: HashMap<String, String> = serde_json::from_str(&contents)?;

    let mut keywords = HashMap::new();
    for (concept, spelling) in map {
        if let Some(kind) = concept_kind(&concept) {
            keywords.insert(spelling, kind);
        }
    }
    Ok(keywords)
}

fn concept_kind(concept: &str) -> Option<TokenKind> {
    match concept {
        "function" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}
