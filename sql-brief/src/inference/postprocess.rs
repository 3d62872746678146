//! Cleanup of raw model completions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

const SQL_FENCE: &str = "```sql";

/// Postgres constructs rewritten for SQLite, applied in order.
static DIALECT_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    // Hard-coded patterns are known to be valid
    #[allow(clippy::expect_used)]
    let compile = |pattern: &str| Regex::new(pattern).expect("Hard-coded regex pattern should be valid");
    vec![
        (compile(r"(?i)ilike"), "LIKE"),
        (compile(r"(?i)serial\s*$"), "INTEGER PRIMARY KEY AUTOINCREMENT"),
        (compile(r"(?i)start\s+with\s+(\d+)"), "CHECK (id >= ${1})"),
    ]
});

static NUMBERED_QUESTION: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\d+\.\s(.*?)\n\n").expect("Hard-coded regex pattern should be valid")
});

/// Extracts the query from a completion: the text after the last ```` ```sql ````
/// fence, without trailing backticks.
///
/// ```rust
/// use sql_brief::inference::extract_sql;
///
/// assert_eq!(extract_sql("```sql\nSELECT 1;\n```"), "\nSELECT 1;\n");
/// assert_eq!(extract_sql("SELECT 2"), "SELECT 2");
/// ```
pub fn extract_sql(completion: &str) -> &str {
    let tail = match completion.rfind(SQL_FENCE) {
        Some(start) => &completion[start + SQL_FENCE.len()..],
        None => completion,
    };
    tail.trim_end_matches('`')
}

/// Rewrites Postgres-only syntax into its SQLite equivalent.
///
/// ```rust
/// use sql_brief::inference::postgres_to_sqlite;
///
/// assert_eq!(
///     postgres_to_sqlite("SELECT * FROM t WHERE name ILIKE '%a%'"),
///     "SELECT * FROM t WHERE name LIKE '%a%'"
/// );
/// ```
pub fn postgres_to_sqlite(query: &str) -> String {
    DIALECT_REWRITES
        .iter()
        .fold(query.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// Parses the outermost `{...}` span of `text` as JSON.
///
/// Returns `None` when there is no such span or it is not valid JSON.
pub fn extract_json_object(text: &str) -> Option<JsonValue> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Collects numbered items (`1. ...`) that are followed by a blank line.
pub fn extract_questions(text: &str) -> Vec<String> {
    NUMBERED_QUESTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sql_takes_last_fence() {
        let completion = "### SQL\n```sql\nSELECT a\n```\nmore\n```sql\nSELECT b FROM t\n```";
        assert_eq!(extract_sql(completion), "\nSELECT b FROM t\n");
    }

    #[test]
    fn test_dialect_rewrites() {
        assert_eq!(
            postgres_to_sqlite("CREATE TABLE t (id serial  "),
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(
            postgres_to_sqlite("id INT START WITH 100"),
            "id INT CHECK (id >= 100)"
        );
        assert_eq!(postgres_to_sqlite("a iLiKe b"), "a LIKE b");
        // serial only rewritten at the very end
        assert_eq!(postgres_to_sqlite("serial_no = 1"), "serial_no = 1");
    }

    #[test]
    fn test_extract_json_object() {
        let text = "Here you go:\n{\"mark\": \"bar\", \"encoding\": {\"x\": {\"field\": \"a\"}}}\nEnjoy";
        let json = extract_json_object(text).unwrap();
        assert_eq!(json["mark"], "bar");
        assert_eq!(json["encoding"]["x"]["field"], "a");

        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{not: json}").is_none());
    }

    #[test]
    fn test_extract_questions() {
        let text = "Sure!\n1. What is the total revenue?\n\n2. Which region grew?\n\n3. Trailing one";
        assert_eq!(
            extract_questions(text),
            vec!["What is the total revenue?", "Which region grew?"]
        );
    }
}
