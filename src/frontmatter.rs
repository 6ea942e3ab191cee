//! Parses the `key: value` frontmatter blocks that precede post
//! articles. The dialect is deliberately small: one key per line, an
//! optional `---` fence around the block, bracketed arrays
//! (`tags: [a, b]`), and optional single or double quotes around
//! values. It is not YAML and is never treated as such.

use std::collections::HashMap;

/// A single frontmatter value: either a plain string or an ordered
/// list of strings parsed from the `[a, b, c]` array syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// Returns the scalar contents, or `None` for lists.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Normalizes a value into a list: lists pass through, a scalar
    /// wraps into a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Value::List(items) => items.clone(),
            Value::Scalar(s) => vec![s.clone()],
        }
    }
}

/// A parsed frontmatter block. Parsing never fails; malformed lines
/// are ignored and absent keys are handled by callers with defaults.
#[derive(Debug, Default)]
pub struct Frontmatter {
    fields: HashMap<String, Value>,
}

impl Frontmatter {
    /// Parses a multi-line frontmatter block.
    ///
    /// * Lines starting with the `---` fence are skipped.
    /// * A line splits on its first `:` into a trimmed key and value;
    ///   later colons stay in the value verbatim.
    /// * Lines without `:` are ignored.
    pub fn parse(input: &str) -> Frontmatter {
        let mut fields = HashMap::new();
        for line in input.trim().lines() {
            if line.starts_with("---") {
                continue;
            }
            let (key, value) = match line.split_once(':') {
                Some(pair) => pair,
                None => continue,
            };
            fields.insert(key.trim().to_owned(), normalize(value.trim()));
        }
        Frontmatter { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the scalar value for `key`, or `None` when the key is
    /// absent or holds a list.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_scalar)
    }

    /// Like [`Frontmatter::scalar`] but substituting `default` when
    /// the key is absent or not a scalar.
    pub fn scalar_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.scalar(key).unwrap_or(default)
    }
}

/// Applies the value normalization rules, in priority order: bracketed
/// array, double-quoted string, single-quoted string, verbatim.
fn normalize(value: &str) -> Value {
    if let Some(interior) = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return Value::List(
            interior
                .split(',')
                .map(|item| {
                    item.trim()
                        .trim_matches(|c| c == '"' || c == '\'')
                        .to_owned()
                })
                .collect(),
        );
    }
    Value::Scalar(strip_quotes(value).to_owned())
}

/// Strips one layer of wrapping quotes, double quotes taking priority
/// over single quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let fm = Frontmatter::parse("title: Mon Voyage\ndate: 2026-01-08");
        assert_eq!(fm.scalar("title"), Some("Mon Voyage"));
        assert_eq!(fm.scalar("date"), Some("2026-01-08"));
    }

    #[test]
    fn test_fences_and_junk_lines_are_skipped() {
        let fm = Frontmatter::parse("---\ntitle: Test\njust a line\n---");
        assert_eq!(fm.scalar("title"), Some("Test"));
        assert_eq!(fm.get("just a line"), None);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let fm = Frontmatter::parse("  title :   Spaced Out  ");
        assert_eq!(fm.scalar("title"), Some("Spaced Out"));
    }

    #[test]
    fn test_quoted_values() {
        let fm = Frontmatter::parse("a: \"double\"\nb: 'single'\nc: \"unbalanced");
        assert_eq!(fm.scalar("a"), Some("double"));
        assert_eq!(fm.scalar("b"), Some("single"));
        assert_eq!(fm.scalar("c"), Some("\"unbalanced"));
    }

    #[test]
    fn test_array_values() {
        let fm = Frontmatter::parse("tags: [voyage, \"new york\", 'souvenirs']");
        assert_eq!(
            fm.get("tags"),
            Some(&Value::List(vec![
                "voyage".to_owned(),
                "new york".to_owned(),
                "souvenirs".to_owned(),
            ]))
        );
    }

    #[test]
    fn test_later_colons_stay_in_the_value() {
        let fm = Frontmatter::parse("url: https://example.com/page");
        assert_eq!(fm.scalar("url"), Some("https://example.com/page"));
    }

    #[test]
    fn test_scalar_wraps_into_list() {
        let fm = Frontmatter::parse("tags: seul");
        assert_eq!(fm.get("tags").unwrap().to_list(), vec!["seul".to_owned()]);
    }

    #[test]
    fn test_scalar_or_falls_back_for_lists() {
        let fm = Frontmatter::parse("title: [not, a, title]");
        assert_eq!(fm.scalar_or("title", "Sans titre"), "Sans titre");
    }
}
