//! Case-insensitive substring primitives.
//!
//! Matching lowercases both sides with full Unicode case mapping and then
//! runs a plain byte substring search, so mixed Japanese / English text
//! behaves the same as ASCII.

use memchr::memmem;

use crate::types::Article;

/// Lowercased `title + " " + body` used as the haystack for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableText(String);

impl SearchableText {
    pub fn new(title: &str, body: &str) -> Self {
        let title = title.to_lowercase();
        let body = body.to_lowercase();

        let mut text = String::with_capacity(title.len() + body.len() + 1);
        text.push_str(&title);
        text.push(' ');
        text.push_str(&body);
        Self(text)
    }

    pub fn from_article(article: &Article) -> Self {
        Self::new(&article.title, article.body_text())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A lowercased term with a prebuilt substring finder.
#[derive(Debug, Clone)]
pub struct TermFinder {
    finder: memmem::Finder<'static>,
}

impl TermFinder {
    pub fn new(raw: &str) -> Self {
        let term = raw.to_lowercase();
        Self {
            finder: memmem::Finder::new(term.as_bytes()).into_owned(),
        }
    }

    pub fn is_found_in(&self, text: &SearchableText) -> bool {
        self.finder.find(text.as_str().as_bytes()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_joins_title_and_body() {
        let text = SearchableText::new("React Guide", "Hooks AND State");
        assert_eq!(text.as_str(), "react guide hooks and state");
    }

    #[test]
    fn article_without_body_is_title_only() {
        let article = Article::new("1", "Notes");
        assert_eq!(SearchableText::from_article(&article).as_str(), "notes ");
    }

    #[test]
    fn missing_body_leaves_trailing_space() {
        let text = SearchableText::new("Notes", "");
        assert_eq!(text.as_str(), "notes ");
    }

    #[test]
    fn finder_is_case_insensitive() {
        let text = SearchableText::new("TypeScript Basics", "");
        assert!(TermFinder::new("typescript").is_found_in(&text));
        assert!(TermFinder::new("SCRIPT BAS").is_found_in(&text));
        assert!(!TermFinder::new("javascript").is_found_in(&text));
    }

    #[test]
    fn finder_matches_across_title_and_body_boundary() {
        let text = SearchableText::new("guide", "hooks");
        assert!(TermFinder::new("guide hooks").is_found_in(&text));
    }

    #[test]
    fn finder_handles_non_ascii() {
        let text = SearchableText::new("Rustの設計", "ÜBER Straße");
        assert!(TermFinder::new("設計").is_found_in(&text));
        assert!(TermFinder::new("über").is_found_in(&text));
        assert!(TermFinder::new("RUSTの").is_found_in(&text));
        assert!(!TermFinder::new("STRASSE").is_found_in(&text));
        assert!(TermFinder::new("straße").is_found_in(&text));
    }
}
