//! Query parser for the search box syntax.
//!
//! Supported syntax:
//! - `React TypeScript`: every word must appear (AND)
//! - `"React Hooks"`: phrase, matched verbatim
//! - `React OR Vue`: at least one must appear
//! - `-class`: exclusion
//! - `(React OR Vue) (frontend OR backend)`: grouped OR, groups AND-ed together
//!
//! Parsing is staged. Phrases are pulled out first, then parenthesized
//! groups, and only the leftover text is tokenized. Every stage returns a
//! new, reduced remainder. Parsing never fails: malformed input (unterminated
//! quotes, unbalanced or nested parentheses, dangling `OR`) degrades into
//! whatever these stages produce.

use super::expression::StructuredQuery;

const PHRASE_DELIMITER: char = '"';
const GROUP_OPEN: char = '(';
const GROUP_CLOSE: char = ')';
const EXCLUDE_PREFIX: char = '-';

/// Content of one parenthesized span.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupContent {
    /// `(A OR B ...)` with at least two surviving terms.
    Or(Vec<String>),
    /// Anything else: `(A B)`, `(A)`, `(A OR)`.
    And(Vec<String>),
}

pub struct QueryParser;

impl QueryParser {
    /// Compiles a raw search string into a `StructuredQuery`.
    pub fn parse(input: &str) -> StructuredQuery {
        if input.trim_matches(is_query_whitespace).is_empty() {
            return StructuredQuery::default();
        }

        let (phrases, remaining) = extract_phrases(input);
        let (groups, remaining) = extract_groups(&remaining);

        let mut and_terms = Vec::new();
        let mut or_groups = Vec::new();
        for group in groups {
            match group {
                GroupContent::Or(terms) => or_groups.push(terms),
                GroupContent::And(terms) => and_terms.extend(terms),
            }
        }

        let (exclude_terms, tokens) = split_exclusions(&remaining);
        resolve_or_chains(&tokens, &mut and_terms, &mut or_groups);

        let query = StructuredQuery::new(and_terms, or_groups, phrases, exclude_terms);
        log::debug!(
            "parsed search query and={} or_groups={} phrases={} exclude={}",
            query.and_terms().len(),
            query.or_groups().len(),
            query.phrases().len(),
            query.exclude_terms().len(),
        );
        query
    }
}

/// Convenience wrapper around [`QueryParser::parse`].
pub fn parse_search_query(input: &str) -> StructuredQuery {
    QueryParser::parse(input)
}

/// Whitespace separating query tokens.
///
/// Unicode `White_Space` plus the byte order mark U+FEFF, minus NEL U+0085,
/// so a BOM pasted into the search box separates words.
fn is_query_whitespace(ch: char) -> bool {
    ch == '\u{FEFF}' || (ch.is_whitespace() && ch != '\u{0085}')
}

fn query_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_query_whitespace)
        .filter(|token| !token.is_empty())
}

fn is_or_keyword(token: &str) -> bool {
    token.eq_ignore_ascii_case("or")
}

// ---------------------------------------------------------------------------
// Span extraction
// ---------------------------------------------------------------------------

/// Extracts every non-empty span `open ... close` (no `close` inside),
/// replacing each with a single space in the returned remainder.
///
/// An empty span (`""`, `()`) keeps its opening delimiter as literal text and
/// scanning resumes at the closing one. An opener with no closer ends the
/// scan and the rest is kept verbatim.
fn extract_spans(input: &str, open: char, close: char) -> (Vec<&str>, String) {
    let mut spans = Vec::new();
    let mut remaining = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open_at) = rest.find(open) {
        let after_open = &rest[open_at + open.len_utf8()..];
        let Some(close_at) = after_open.find(close) else {
            break;
        };

        if close_at == 0 {
            remaining.push_str(&rest[..open_at + open.len_utf8()]);
            rest = after_open;
            continue;
        }

        remaining.push_str(&rest[..open_at]);
        remaining.push(' ');
        spans.push(&after_open[..close_at]);
        rest = &after_open[close_at + close.len_utf8()..];
    }

    remaining.push_str(rest);
    (spans, remaining)
}

fn extract_phrases(input: &str) -> (Vec<String>, String) {
    let (spans, remaining) = extract_spans(input, PHRASE_DELIMITER, PHRASE_DELIMITER);
    let phrases = spans.into_iter().map(str::to_string).collect();
    (phrases, remaining)
}

fn extract_groups(input: &str) -> (Vec<GroupContent>, String) {
    let (spans, remaining) = extract_spans(input, GROUP_OPEN, GROUP_CLOSE);
    let groups = spans.into_iter().map(classify_group).collect();
    (groups, remaining)
}

fn classify_group(content: &str) -> GroupContent {
    let mut has_or = false;
    let mut terms = Vec::new();

    for token in query_tokens(content) {
        if is_or_keyword(token) {
            has_or = true;
            continue;
        }
        terms.push(token.to_string());
    }

    if has_or && terms.len() > 1 {
        GroupContent::Or(terms)
    } else {
        GroupContent::And(terms)
    }
}

// ---------------------------------------------------------------------------
// Token stages
// ---------------------------------------------------------------------------

/// Splits `-word` tokens off as exclusions. A lone `-` stays a normal token.
fn split_exclusions(remaining: &str) -> (Vec<String>, Vec<&str>) {
    let mut exclude_terms = Vec::new();
    let mut tokens = Vec::new();

    for token in query_tokens(remaining) {
        match token.strip_prefix(EXCLUDE_PREFIX) {
            Some(term) if !term.is_empty() => exclude_terms.push(term.to_string()),
            _ => tokens.push(token),
        }
    }

    (exclude_terms, tokens)
}

/// Resolves `A OR B OR C` chains among unparenthesized tokens.
///
/// `OR` itself never becomes a term. A token followed by `OR` joins the open
/// group; the first token not followed by `OR` closes it. A group left open
/// at the end of input keeps a single term as an AND term.
fn resolve_or_chains(
    tokens: &[&str],
    and_terms: &mut Vec<String>,
    or_groups: &mut Vec<Vec<String>>,
) {
    let mut current = Vec::new();
    let mut in_group = false;

    for (index, token) in tokens.iter().enumerate() {
        if is_or_keyword(token) {
            continue;
        }

        let next_is_or = tokens.get(index + 1).is_some_and(|next| is_or_keyword(next));
        if next_is_or {
            current.push(token.to_string());
            in_group = true;
        } else if in_group {
            current.push(token.to_string());
            or_groups.push(std::mem::take(&mut current));
            in_group = false;
        } else {
            and_terms.push(token.to_string());
        }
    }

    match current.len() {
        0 => {}
        1 => and_terms.append(&mut current),
        _ => or_groups.push(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn groups(values: &[&[&str]]) -> Vec<Vec<String>> {
        values.iter().map(|group| strings(group)).collect()
    }

    // Empty input

    #[test]
    fn empty_and_blank_queries_are_empty() {
        assert_eq!(QueryParser::parse(""), StructuredQuery::default());
        assert_eq!(QueryParser::parse("   "), StructuredQuery::default());
        assert_eq!(QueryParser::parse("\t\n "), StructuredQuery::default());
    }

    // AND terms

    #[test]
    fn single_word_is_and_term() {
        for word in ["react", "TypeScript", "設計", "v2"] {
            let query = QueryParser::parse(word);
            assert_eq!(query.and_terms(), strings(&[word]));
            assert!(query.or_groups().is_empty());
            assert!(query.phrases().is_empty());
            assert!(query.exclude_terms().is_empty());
            assert_eq!(query.highlight_terms(), strings(&[word]));
        }
    }

    #[test]
    fn whitespace_separated_words_are_and_terms() {
        let query = QueryParser::parse("  React   TypeScript ");
        assert_eq!(query.and_terms(), strings(&["React", "TypeScript"]));
    }

    #[test]
    fn ideographic_space_separates_terms() {
        let query = QueryParser::parse("検索\u{3000}設計");
        assert_eq!(query.and_terms(), strings(&["検索", "設計"]));
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(QueryParser::parse("\u{FEFF}"), StructuredQuery::default());

        let query = QueryParser::parse("a\u{FEFF}b");
        assert_eq!(query.and_terms(), strings(&["a", "b"]));

        let query = QueryParser::parse("(x\u{FEFF}OR\u{FEFF}y)");
        assert_eq!(query.or_groups(), groups(&[&["x", "y"]]));
    }

    #[test]
    fn next_line_control_is_part_of_a_term() {
        let query = QueryParser::parse("a\u{0085}b");
        assert_eq!(query.and_terms(), strings(&["a\u{0085}b"]));
    }

    #[test]
    fn repeated_terms_are_preserved() {
        let query = QueryParser::parse("rust rust");
        assert_eq!(query.and_terms(), strings(&["rust", "rust"]));
        assert_eq!(query.highlight_terms(), strings(&["rust", "rust"]));
    }

    // Phrases

    #[test]
    fn quoted_text_is_phrase() {
        let query = QueryParser::parse("\"React Hooks\"");
        assert_eq!(query.phrases(), strings(&["React Hooks"]));
        assert!(query.and_terms().is_empty());
        assert!(query.or_groups().is_empty());
        assert!(query.exclude_terms().is_empty());
    }

    #[test]
    fn phrase_inner_text_is_verbatim() {
        let query = QueryParser::parse("\"  spaced  out \" tail");
        assert_eq!(query.phrases(), strings(&["  spaced  out "]));
        assert_eq!(query.and_terms(), strings(&["tail"]));
    }

    #[test]
    fn phrase_is_not_retokenized() {
        let query = QueryParser::parse("\"a OR b\" \"-c (d)\"");
        assert_eq!(query.phrases(), strings(&["a OR b", "-c (d)"]));
        assert!(query.and_terms().is_empty());
        assert!(query.exclude_terms().is_empty());
        assert!(query.or_groups().is_empty());
    }

    #[test]
    fn phrase_splits_adjacent_words() {
        let query = QueryParser::parse("before\"middle part\"after");
        assert_eq!(query.phrases(), strings(&["middle part"]));
        assert_eq!(query.and_terms(), strings(&["before", "after"]));
    }

    #[test]
    fn unterminated_quote_is_literal() {
        let query = QueryParser::parse("\"React Hooks");
        assert!(query.phrases().is_empty());
        assert_eq!(query.and_terms(), strings(&["\"React", "Hooks"]));
    }

    #[test]
    fn odd_quote_count_extracts_closed_spans_only() {
        let query = QueryParser::parse("\"one two\" \"three");
        assert_eq!(query.phrases(), strings(&["one two"]));
        assert_eq!(query.and_terms(), strings(&["\"three"]));
    }

    #[test]
    fn empty_quotes_do_not_form_phrase() {
        let query = QueryParser::parse("\"\"abc\"");
        assert_eq!(query.phrases(), strings(&["abc"]));
        assert_eq!(query.and_terms(), strings(&["\""]));
    }

    // OR groups

    #[test]
    fn or_between_words_forms_group() {
        let query = QueryParser::parse("React OR Vue");
        assert_eq!(query.or_groups(), groups(&[&["React", "Vue"]]));
        assert!(query.and_terms().is_empty());
    }

    #[test]
    fn or_keyword_is_case_insensitive() {
        let query = QueryParser::parse("React or Vue Or Svelte");
        assert_eq!(query.or_groups(), groups(&[&["React", "Vue", "Svelte"]]));
    }

    #[test]
    fn or_chain_closes_at_first_plain_word() {
        let query = QueryParser::parse("A OR B C");
        assert_eq!(query.or_groups(), groups(&[&["A", "B"]]));
        assert_eq!(query.and_terms(), strings(&["C"]));
    }

    #[test]
    fn separate_or_chains_form_separate_groups() {
        let query = QueryParser::parse("A OR B C OR D");
        assert_eq!(query.or_groups(), groups(&[&["A", "B"], &["C", "D"]]));
        assert!(query.and_terms().is_empty());
    }

    #[test]
    fn repeated_or_keywords_are_skipped() {
        let query = QueryParser::parse("A OR OR B");
        assert_eq!(query.or_groups(), groups(&[&["A", "B"]]));
    }

    #[test]
    fn bare_or_produces_nothing() {
        assert!(QueryParser::parse("OR").is_empty());
        assert!(QueryParser::parse("OR or OR").is_empty());
    }

    #[test]
    fn leading_or_is_dropped() {
        let query = QueryParser::parse("OR A");
        assert_eq!(query.and_terms(), strings(&["A"]));
        assert!(query.or_groups().is_empty());
    }

    #[test]
    fn trailing_or_with_single_term_collapses_to_and() {
        let query = QueryParser::parse("A OR");
        assert_eq!(query.and_terms(), strings(&["A"]));
        assert!(query.or_groups().is_empty());
    }

    #[test]
    fn trailing_or_with_open_group_is_flushed() {
        let query = QueryParser::parse("A OR B OR");
        assert_eq!(query.or_groups(), groups(&[&["A", "B"]]));
        assert!(query.and_terms().is_empty());
    }

    #[test]
    fn exclusions_are_removed_before_or_resolution() {
        let query = QueryParser::parse("A OR -x B");
        assert_eq!(query.or_groups(), groups(&[&["A", "B"]]));
        assert_eq!(query.exclude_terms(), strings(&["x"]));
    }

    // Exclusions

    #[test]
    fn dash_prefix_is_exclusion() {
        let query = QueryParser::parse("React -class");
        assert_eq!(query.and_terms(), strings(&["React"]));
        assert_eq!(query.exclude_terms(), strings(&["class"]));
        assert_eq!(query.highlight_terms(), strings(&["React"]));
    }

    #[test]
    fn lone_dash_is_term() {
        let query = QueryParser::parse("a - b");
        assert_eq!(query.and_terms(), strings(&["a", "-", "b"]));
        assert!(query.exclude_terms().is_empty());
    }

    #[test]
    fn double_dash_strips_one() {
        let query = QueryParser::parse("--verbose");
        assert_eq!(query.exclude_terms(), strings(&["-verbose"]));
    }

    #[test]
    fn exclusion_only_query_has_no_positive_terms() {
        let query = QueryParser::parse("-draft -wip");
        assert_eq!(query.exclude_terms(), strings(&["draft", "wip"]));
        assert!(!query.has_positive_terms());
        assert!(query.highlight_terms().is_empty());
    }

    // Parenthesized groups

    #[test]
    fn grouped_or_with_and_term() {
        let query = QueryParser::parse("(React OR Vue) TypeScript");
        assert_eq!(query.or_groups(), groups(&[&["React", "Vue"]]));
        assert_eq!(query.and_terms(), strings(&["TypeScript"]));
    }

    #[test]
    fn multiple_grouped_ors() {
        let query = QueryParser::parse("(React OR Vue) (frontend OR backend)");
        assert_eq!(
            query.or_groups(),
            groups(&[&["React", "Vue"], &["frontend", "backend"]])
        );
        assert!(query.and_terms().is_empty());
    }

    #[test]
    fn group_without_or_is_and_terms() {
        let query = QueryParser::parse("(A)");
        assert_eq!(query.and_terms(), strings(&["A"]));
        assert!(query.or_groups().is_empty());

        let query = QueryParser::parse("(A B)");
        assert_eq!(query.and_terms(), strings(&["A", "B"]));
    }

    #[test]
    fn group_with_single_surviving_term_is_and_term() {
        for input in ["(A OR)", "(OR A)"] {
            let query = QueryParser::parse(input);
            assert_eq!(query.and_terms(), strings(&["A"]), "input: {input}");
            assert!(query.or_groups().is_empty(), "input: {input}");
        }
    }

    #[test]
    fn grouped_terms_precede_loose_terms() {
        let query = QueryParser::parse("loose (inner) A OR B (C OR D)");
        assert_eq!(query.and_terms(), strings(&["inner", "loose"]));
        assert_eq!(query.or_groups(), groups(&[&["C", "D"], &["A", "B"]]));
        assert_eq!(
            query.highlight_terms(),
            strings(&["inner", "loose", "C", "D", "A", "B"])
        );
    }

    #[test]
    fn empty_parentheses_stay_literal() {
        let query = QueryParser::parse("() word");
        assert_eq!(query.and_terms(), strings(&["()", "word"]));
    }

    #[test]
    fn unclosed_parenthesis_stays_literal() {
        let query = QueryParser::parse("(React OR Vue");
        assert_eq!(query.or_groups(), groups(&[&["(React", "Vue"]]));
        assert!(query.and_terms().is_empty());
    }

    #[test]
    fn nested_parentheses_close_at_first_paren() {
        let query = QueryParser::parse("(a (b OR c))");
        assert_eq!(query.or_groups(), groups(&[&["a", "(b", "c"]]));
        assert_eq!(query.and_terms(), strings(&[")"]));
    }

    #[test]
    fn group_inside_phrase_is_not_a_group() {
        let query = QueryParser::parse("\"(A OR B)\" C");
        assert_eq!(query.phrases(), strings(&["(A OR B)"]));
        assert!(query.or_groups().is_empty());
        assert_eq!(query.and_terms(), strings(&["C"]));
    }

    #[test]
    fn exclusion_inside_group_is_plain_term() {
        let query = QueryParser::parse("(-a OR b)");
        assert_eq!(query.or_groups(), groups(&[&["-a", "b"]]));
        assert!(query.exclude_terms().is_empty());
    }

    // Combined

    #[test]
    fn combined_query_highlight_order() {
        let query = QueryParser::parse("\"state management\" (React OR Vue) hooks -class");
        assert_eq!(query.and_terms(), strings(&["hooks"]));
        assert_eq!(query.phrases(), strings(&["state management"]));
        assert_eq!(query.or_groups(), groups(&[&["React", "Vue"]]));
        assert_eq!(query.exclude_terms(), strings(&["class"]));
        assert_eq!(
            query.highlight_terms(),
            strings(&["hooks", "state management", "React", "Vue"])
        );
    }

    #[test]
    fn parse_is_deterministic() {
        let input = "(a OR b) \"c d\" e -f g OR h";
        assert_eq!(QueryParser::parse(input), parse_search_query(input));
    }
}
