//! Recursive key-case conversion for JSON values.
//!
//! The server speaks snake_case, callers speak camelCase. [`convert_keys`]
//! rewrites every mapping key in a nested value with a caller-supplied
//! transform; [`camel_case`] and [`snake_case`] are the two transforms the
//! client uses.
//!
//! ## Word splitting
//!
//! Both transforms first split a key into words:
//!
//! - any character that is neither a letter nor an ASCII digit separates words
//!   and is dropped;
//! - a lowercase letter or digit followed by an uppercase letter starts a new
//!   word (`userId` → `user`, `Id`);
//! - inside an uppercase run, the last capital starts a new word when a
//!   lowercase letter follows it (`XMLHttp` → `XML`, `Http`).
//!
//! [`camel_case`] joins a word that starts with a digit using `_` rather than
//! capitalizing it, so `line_2` survives a snake → camel → snake round trip.

use serde_json::Value;

/// Rewrites every mapping key in `value` with `transform`, recursing into
/// nested arrays and objects.
///
/// Arrays map element-wise (arrays of primitives come back unchanged).
/// Primitives are returned as-is. When two keys of one object transform to the
/// same key, the one visited last wins.
pub fn convert_keys<F>(value: Value, transform: &F) -> Value
where
    F: Fn(&str) -> String + ?Sized,
{
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, transform))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (transform(&key), convert_keys(value, transform)))
                .collect(),
        ),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Case transforms
// ---------------------------------------------------------------------------

/// The two key conventions used on either side of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// `userId` — what callers read and write.
    Camel,
    /// `user_id` — what the server reads and writes.
    Snake,
}

impl KeyCase {
    /// Transforms a single key into this case.
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::Camel => camel_case(key),
            KeyCase::Snake => snake_case(key),
        }
    }

    /// Converts every key of `value` into this case.
    pub fn convert(self, value: Value) -> Value {
        convert_keys(value, &|key: &str| self.apply(key))
    }
}

impl std::fmt::Display for KeyCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyCase::Camel => write!(f, "camelCase"),
            KeyCase::Snake => write!(f, "snake_case"),
        }
    }
}

/// Converts `input` to camelCase (`user_id` → `userId`).
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, word) in split_words(input).iter().enumerate() {
        if index == 0 {
            out.push_str(&word.to_lowercase());
        } else if word.starts_with(|c: char| c.is_ascii_digit()) {
            out.push('_');
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Converts `input` to snake_case (`userId` → `user_id`).
pub fn snake_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Splits `input` into words; see the module docs for the rules.
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !is_word_char(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper =
                (prev.is_lowercase() || prev.is_ascii_digit()) && c.is_uppercase();
            let acronym_end =
                prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase);
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
