//! Word normalization
//!
//! Folds a word to the canonical form used for every comparison in the engine:
//! lowercase, no surrounding whitespace, none of the characters in
//! [`STRIPPED_PUNCTUATION`], and Latin diacritics folded to their base letter.
//!
//! Characters outside the folding table are kept as they are, so words in
//! unsupported scripts still compare literally.

/// Punctuation removed from words before comparison
pub const STRIPPED_PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '\'', '"'];

/// Normalize a single word
///
/// The result is stable under re-application:
/// `normalize(&normalize(x)) == normalize(x)`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(normalize("Árbol,"), "arbol");
/// assert_eq!(normalize("Straße"), "strasse");
/// ```
pub fn normalize(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    for c in word.to_lowercase().chars() {
        if STRIPPED_PUNCTUATION.contains(&c) {
            continue;
        }
        match fold_diacritic(c) {
            Some(base) => result.push_str(base),
            None => result.push(c),
        }
    }
    result.trim().to_string()
}

/// Base form of a lowercase Latin letter carrying a diacritic
///
/// Returns `None` for characters the table does not cover.
pub fn fold_diacritic(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ẽ' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ĩ' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ũ' | 'ů' => "u",
        'ñ' => "n",
        'ç' => "c",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(base)
}
