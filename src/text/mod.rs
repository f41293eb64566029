//! Text normalization and tokenization for lexical tracing.
//!
//! Pure functions, no I/O. Normalization folds case and accents so surface
//! variants of the same word land on the same token; tokenization then strips
//! short tokens and common function words that carry no tracing signal.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Function words dropped during tokenization.
const STOP_WORDS: [&str; 28] = [
    "the", "a", "an", "is", "in", "on", "at", "to", "for", "of", "and", "or", "with", "that",
    "this", "it", "be", "are", "was", "were", "by", "as", "from", "have", "has", "not", "but",
    "so",
];

/// Lowercases `text`, folds accents, and reduces punctuation to single spaces.
///
/// Combining marks left over from NFD decomposition are dropped, so `"Café"`
/// and `"cafe"` normalize identically. Underscores count as word characters;
/// every other non-alphanumeric becomes a separator. Runs of separators
/// collapse to one space and the result carries no leading or trailing space.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Splits normalized text into signal-bearing tokens.
///
/// Tokens of one or two characters and stop words are discarded. The result
/// may be empty, which downstream scoring treats as "no lexical evidence"
/// rather than an error.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.chars().count() > 2 && !is_stop_word(t))
        .map(str::to_owned)
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("User Login, with 2FA!"),
            "user login with 2fa"
        );
    }

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize("Café au Lait"), "cafe au lait");
        assert_eq!(normalize("naïve résumé"), "naive resume");
    }

    #[test]
    fn test_normalize_composed_and_decomposed_agree() {
        // U+00E9 vs 'e' + U+0301
        assert_eq!(normalize("caf\u{e9}"), normalize("cafe\u{301}"));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  alpha \t\t beta\n\ngamma  "), "alpha beta gamma");
    }

    #[test]
    fn test_normalize_keeps_underscores() {
        assert_eq!(normalize("rate_limit config"), "rate_limit config");
    }

    #[test]
    fn test_normalize_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!@#$%^&*()"), "");
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("The user is able to export reports as PDF");
        assert_eq!(tokens, vec!["user", "able", "export", "reports", "pdf"]);
    }

    #[test]
    fn test_tokenize_fully_filtered_input_is_empty() {
        assert!(tokenize("to be or not").is_empty());
        assert!(tokenize("a an it").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_numbers_survive() {
        let tokens = tokenize("retry after 5000 milliseconds");
        assert_eq!(tokens, vec!["retry", "after", "5000", "milliseconds"]);
    }
}
