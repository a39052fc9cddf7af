//! Highlight segmentation for search results.
//!
//! Splits display text (a title, a paragraph) into plain and highlighted
//! segments for a list of highlight terms:
//! - Every case-insensitive occurrence of every non-blank term is marked
//! - The longest term wins when several start at the same position
//! - Overlapping and adjacent occurrences merge into one segment
//! - Segment texts concatenate back to the input exactly

use std::ops::Range;

use serde::Serialize;

/// A contiguous slice of display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSegment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Returns merged byte ranges of `text` covered by any of `terms`.
///
/// Ranges are sorted, non-overlapping, and always fall on char boundaries.
pub fn highlight_ranges<S: AsRef<str>>(text: &str, terms: &[S]) -> Vec<Range<usize>> {
    let needles = terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .map(|term| term.chars().flat_map(char::to_lowercase).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    if needles.is_empty() {
        return Vec::new();
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (start, _) in text.char_indices() {
        let longest = needles
            .iter()
            .filter_map(|needle| match_end_at(text, start, needle))
            .max();
        let Some(end) = longest else {
            continue;
        };

        match ranges.last_mut() {
            Some(last) if start <= last.end => last.end = last.end.max(end),
            _ => ranges.push(start..end),
        }
    }

    ranges
}

/// Splits `text` into plain and highlighted segments.
pub fn highlight_segments<'a, S: AsRef<str>>(
    text: &'a str,
    terms: &[S],
) -> Vec<HighlightSegment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for range in highlight_ranges(text, terms) {
        if range.start > cursor {
            segments.push(HighlightSegment {
                text: &text[cursor..range.start],
                highlighted: false,
            });
        }
        segments.push(HighlightSegment {
            text: &text[range.clone()],
            highlighted: true,
        });
        cursor = range.end;
    }

    if cursor < text.len() {
        segments.push(HighlightSegment {
            text: &text[cursor..],
            highlighted: false,
        });
    }

    segments
}

/// Returns the byte offset where `needle` ends if it occurs at `start`.
///
/// Comparison is per lowercased char. A needle that ends inside a char's
/// lowercase expansion (`i` against `İ`) covers that whole char.
fn match_end_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0usize;

    for (offset, ch) in text[start..].char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
            if matched == needle.len() {
                return Some(start + offset + ch.len_utf8());
            }
        }
    }

    None
}
