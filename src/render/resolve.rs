//! Greedy span resolution.
//!
//! Annotations are matched longest text first. Each one is searched for as a
//! literal substring at or after the end of the previous match, so matches
//! never overlap and text already passed over is never revisited. An
//! annotation whose text is not found in the remaining body contributes
//! nothing.

use std::cmp::Reverse;

use crate::model::Annotation;
use crate::registry::LabelRegistry;

use super::segment::{Highlight, Segment, push_plain};

/// Order annotations for matching: longest text first, equal lengths keep
/// their input order.
pub fn match_order<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> Vec<&'a Annotation> {
    let mut order: Vec<&Annotation> = annotations
        .into_iter()
        .filter(|a| !a.text.is_empty())
        .collect();
    order.sort_by_key(|a| Reverse(a.text_len()));
    order
}

/// Split `body` into plain and highlighted segments.
///
/// The segments cover the body exactly: concatenating their texts gives
/// back `body`.
pub fn resolve_segments(
    body: &str,
    annotations: &[&Annotation],
    registry: &LabelRegistry,
) -> Vec<Segment> {
    let order = match_order(annotations.iter().copied());
    let mut segments = Vec::new();
    resolve_into(&mut segments, body, 0, &order, registry);
    segments
}

/// Resolve `body` against annotations already in match order, appending to
/// `segments`. Offsets are shifted by `base`.
pub(crate) fn resolve_into(
    segments: &mut Vec<Segment>,
    body: &str,
    base: usize,
    order: &[&Annotation],
    registry: &LabelRegistry,
) {
    let mut last = 0;

    for annotation in order {
        let Some(found) = body[last..].find(annotation.text.as_str()) else {
            continue;
        };
        let Some(label) = registry.lookup(annotation.label.as_str()) else {
            log::warn!(
                "Skipping annotation {}: label '{}' is not registered",
                annotation.id,
                annotation.label
            );
            continue;
        };

        let start = last + found;
        let end = start + annotation.text.len();
        push_plain(segments, base + last, &body[last..start]);
        segments.push(Segment::highlighted(
            base + start,
            &body[start..end],
            Highlight {
                annotation: annotation.id,
                label: label.key.clone(),
                colors: label.colors,
            },
        ));
        last = end;
    }

    push_plain(segments, base + last, &body[last..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelKey, Scope};
    use crate::render::concat;

    fn ann(id: u64, text: &str, label: &str) -> Annotation {
        Annotation::new(id, text, LabelKey::new(label), Scope::Document)
    }

    fn highlights(segments: &[Segment]) -> Vec<(usize, &str, &str)> {
        segments
            .iter()
            .filter_map(|s| s.label().map(|l| (s.offset, s.text.as_str(), l.as_str())))
            .collect()
    }

    #[test]
    fn test_longer_overlapping_annotation_wins() {
        let registry = LabelRegistry::default();
        let body = "Alice works at Acme. Acme is in Paris.";
        let org = ann(1, "Acme", "organization");
        let loc = ann(2, "Acme.", "location");

        let segments = resolve_segments(body, &[&org, &loc], &registry);

        assert_eq!(
            highlights(&segments),
            vec![(15, "Acme.", "location"), (21, "Acme", "organization")]
        );
        assert_eq!(concat(&segments), body);
        assert_eq!(segments[0], Segment::plain(0, "Alice works at "));
        assert_eq!(segments.last().map(|s| s.text.as_str()), Some(" is in Paris."));
    }

    #[test]
    fn test_equal_lengths_keep_input_order() {
        let a = ann(1, "cat", "person");
        let b = ann(2, "dog", "location");
        let order = match_order([&a, &b]);
        assert_eq!(order.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        let order = match_order([&b, &a]);
        assert_eq!(order.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_forward_scan_skips_passed_text() {
        let registry = LabelRegistry::default();
        // "dog" is matched first (input order); "cat" only appears before it.
        let body = "cat and dog";
        let cat = ann(1, "cat", "person");
        let dog = ann(2, "dog", "location");

        let segments = resolve_segments(body, &[&dog, &cat], &registry);

        assert_eq!(highlights(&segments), vec![(8, "dog", "location")]);
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_only_first_occurrence_highlighted() {
        let registry = LabelRegistry::default();
        let body = "Paris, Paris, Paris";
        let paris = ann(1, "Paris", "location");

        let segments = resolve_segments(body, &[&paris], &registry);

        assert_eq!(highlights(&segments), vec![(0, "Paris", "location")]);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let registry = LabelRegistry::default();
        let body = "price: $5.00 (approx.) vs 5x00";
        let price = ann(1, "$5.00 (approx.)", "organization");
        let dotted = ann(2, "5.00", "person");

        let segments = resolve_segments(body, &[&dotted, &price], &registry);

        assert_eq!(
            highlights(&segments),
            vec![(7, "$5.00 (approx.)", "organization")]
        );
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_matching_is_case_and_whitespace_exact() {
        let registry = LabelRegistry::default();
        let body = "ACME  Corp and Acme Corp";
        let acme = ann(1, "Acme Corp", "organization");

        let segments = resolve_segments(body, &[&acme], &registry);

        assert_eq!(highlights(&segments), vec![(15, "Acme Corp", "organization")]);
    }

    #[test]
    fn test_stale_annotation_is_skipped() {
        let registry = LabelRegistry::default();
        let body = "nothing to see";
        let gone = ann(1, "Berlin", "location");

        let segments = resolve_segments(body, &[&gone], &registry);

        assert_eq!(segments, vec![Segment::plain(0, body)]);
    }

    #[test]
    fn test_unregistered_label_is_skipped() {
        let registry = LabelRegistry::default();
        let body = "Monday in Paris";
        let day = ann(1, "Monday", "date");
        let city = ann(2, "Paris", "location");

        let segments = resolve_segments(body, &[&day, &city], &registry);

        assert_eq!(highlights(&segments), vec![(10, "Paris", "location")]);
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_highlight_carries_label_colors() {
        let registry = LabelRegistry::default();
        let alice = ann(7, "Alice", "person");

        let segments = resolve_segments("Alice", &[&alice], &registry);

        let highlight = segments[0].highlight.as_ref().unwrap();
        assert_eq!(highlight.annotation, 7);
        assert_eq!(highlight.colors.background, [0xfe, 0xf2, 0xf2]);
        assert_eq!(highlight.colors.foreground, [0x99, 0x1b, 0x1b]);
    }

    #[test]
    fn test_multibyte_text() {
        let registry = LabelRegistry::default();
        let body = "Café in Zürich, near Zürichsee";
        let lake = ann(1, "Zürichsee", "location");
        let city = ann(2, "Zürich", "location");
        let cafe = ann(3, "Café", "organization");

        let segments = resolve_segments(body, &[&city, &cafe, &lake], &registry);

        assert_eq!(concat(&segments), body);
        assert_eq!(
            highlights(&segments),
            vec![(23, "Zürichsee", "location")]
        );
    }

    #[test]
    fn test_segments_cover_body() {
        let registry = LabelRegistry::default();
        let bodies = [
            "",
            "a",
            "aaaa",
            "abcabcabc",
            "the quick brown fox jumps over the lazy dog",
            "überall ß ü ü",
        ];
        let texts = ["a", "ab", "abc", "the", "o", "fox jumps", "ü", "ß ü", "zzz"];
        let anns: Vec<Annotation> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| ann(i as u64, t, "person"))
            .collect();

        for body in bodies {
            for n in 0..=anns.len() {
                let subset: Vec<&Annotation> = anns.iter().take(n).collect();
                let segments = resolve_segments(body, &subset, &registry);
                assert_eq!(concat(&segments), body);

                let mut expected_offset = 0;
                for segment in &segments {
                    assert_eq!(segment.offset, expected_offset);
                    assert!(!segment.text.is_empty());
                    expected_offset = segment.end();
                }
                assert_eq!(expected_offset, body.len());
            }
        }
    }
}
