/// Lowercases `title` and joins its alphanumeric runs with single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slugs are non-empty runs of `[a-z0-9]` separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

pub fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("slug");
        err.message = Some("slug must be lowercase letters and digits separated by hyphens".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Senior  Rust / Backend Engineer!"), "senior-rust-backend-engineer");
        assert_eq!(slugify("  --QA--  "), "qa");
    }

    #[test]
    fn slug_format_is_checked() {
        assert!(is_valid_slug("frontend-dev-2"));
        assert!(!is_valid_slug("Frontend"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
        assert!(is_valid_slug(&slugify("Data Scientist")));
    }
}
