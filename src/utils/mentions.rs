use regex::Regex;
use std::sync::OnceLock;

fn mention_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[^\w@])@").expect("mention pattern compiles"))
}

fn mention_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w[\w'-]*").expect("word pattern compiles"))
}

/// Pulls `@Name` mentions out of note content.
///
/// A known team member's full name directly after `@` wins (longest name
/// first, ASCII case-insensitive) and is reported in its canonical
/// spelling. Otherwise the single word after `@` is taken. Email addresses
/// are skipped and duplicates are dropped, keeping the first spelling.
pub fn extract_mentions(content: &str, known_names: &[String]) -> Vec<String> {
    let mut names: Vec<&str> = known_names
        .iter()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));

    let mut found: Vec<String> = Vec::new();
    for start in mention_start().find_iter(content) {
        let rest = &content[start.end()..];
        let Some(mention) = match_known(rest, &names).or_else(|| {
            mention_word()
                .find(rest)
                .map(|word| word.as_str().to_string())
        }) else {
            continue;
        };
        if !found.iter().any(|seen| seen.eq_ignore_ascii_case(&mention)) {
            found.push(mention);
        }
    }
    found
}

fn match_known(rest: &str, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        let head = rest.get(..name.len())?;
        if !head.eq_ignore_ascii_case(name) {
            return None;
        }
        let boundary = rest[name.len()..]
            .chars()
            .next()
            .map_or(true, |next| !next.is_alphanumeric() && next != '_');
        boundary.then(|| name.to_string())
    })
}
