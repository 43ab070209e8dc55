use std::collections::HashSet;

use tracing::warn;

use termbank_types::{Definition, DeinflectedForm, DictionaryEntry};

use crate::extract::{extract, has_marker, tokenize};

/// Terminal state of one entry after classification.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Lemma (or otherwise untouchable) entry, emitted exactly as read.
    Passthrough(DictionaryEntry),
    /// Inflected-form entry rewritten to structured `{base, rules}` records.
    Normalized(DictionaryEntry),
    /// Inflected-form entry whose term already has a lemma; dropped.
    Duplicate,
    /// Inflected-form entry with no locatable marker; emitted unchanged
    /// after a diagnostic.
    Unparsed(DictionaryEntry),
}

/// Classifies entries and rewrites inflected-form definitions.
///
/// Owns the set of terms already seen as lemmas, which is why entries must
/// arrive in bank order: a lemma recorded here causes every later
/// inflected-form entry for the same term to be dropped as redundant.
#[derive(Debug, Default)]
pub struct Deinflector {
    seen_lemmas: HashSet<String>,
}

impl Deinflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct lemma terms recorded so far.
    pub fn lemma_count(&self) -> usize {
        self.seen_lemmas.len()
    }

    /// Classify one entry and, for inflected forms, rewrite its definitions.
    ///
    /// Lemma entries are recorded and passed through untouched. Inflected
    /// forms are dropped when their term already has a lemma, reported when
    /// no definition carries a `(->base)` marker, and otherwise rewritten:
    /// each definition runs through extraction and tokenization (failures
    /// are skipped), and consecutive duplicate records collapse to one.
    pub fn process(&mut self, mut entry: DictionaryEntry) -> Outcome {
        if !entry.is_non_lemma() {
            self.seen_lemmas.insert(entry.term.clone());
            return Outcome::Passthrough(entry);
        }

        if self.seen_lemmas.contains(&entry.term) {
            return Outcome::Duplicate;
        }

        // Already-structured entries (or empty ones) have nothing left to
        // extract from.
        if !matches!(entry.definitions.first(), Some(Definition::Text(_))) {
            return Outcome::Passthrough(entry);
        }

        // Working texts for this entry. The first definition sheds every
        // literal "the" up front, a quirk of the source convention that
        // otherwise pollutes the diagnostic below.
        let texts: Vec<String> = entry
            .definitions
            .iter()
            .enumerate()
            .filter_map(|(i, definition)| {
                let text = definition.as_text()?;
                if i == 0 {
                    Some(text.replace("the", ""))
                } else {
                    Some(text.to_owned())
                }
            })
            .collect();

        if !texts.iter().any(|text| has_marker(text)) {
            warn!(
                "couldn't find a base-form marker for {}: {}",
                entry.term, texts[0]
            );
            return Outcome::Unparsed(entry);
        }

        let forms = texts.iter().filter_map(|text| {
            let extraction = extract(text).ok()?;
            Some(DeinflectedForm {
                base: extraction.base.to_owned(),
                rules: tokenize(extraction.form_span),
            })
        });

        entry.definitions = dedupe_consecutive(forms.collect())
            .into_iter()
            .map(Definition::Deinflection)
            .collect();
        Outcome::Normalized(entry)
    }
}

/// Drop items equal to their immediate predecessor, keeping first
/// occurrences and original order.
///
/// Run-length collapse, not set dedup: non-adjacent repeats survive.
pub fn dedupe_consecutive<T: PartialEq>(mut items: Vec<T>) -> Vec<T> {
    items.dedup();
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbank_types::NON_LEMMA_TAG;

    fn lemma(term: &str) -> DictionaryEntry {
        entry(term, None, vec!["a plain definition"])
    }

    fn non_lemma(term: &str, definitions: Vec<&str>) -> DictionaryEntry {
        entry(term, Some(NON_LEMMA_TAG), definitions)
    }

    fn entry(term: &str, tag: Option<&str>, definitions: Vec<&str>) -> DictionaryEntry {
        DictionaryEntry {
            term: term.into(),
            reading: String::new(),
            class_tag: tag.map(str::to_owned),
            deinflection_rule: "v".into(),
            score: 0.0,
            definitions: definitions
                .into_iter()
                .map(|d| Definition::Text(d.into()))
                .collect(),
            sequence: 1,
            term_tags: String::new(),
        }
    }

    fn forms(outcome: Outcome) -> Vec<DeinflectedForm> {
        let entry = match outcome {
            Outcome::Normalized(entry) => entry,
            other => panic!("expected a normalized entry, got {other:?}"),
        };
        entry
            .definitions
            .into_iter()
            .map(|d| match d {
                Definition::Deinflection(form) => form,
                Definition::Text(text) => panic!("plain text slipped through: {text}"),
            })
            .collect()
    }

    #[test]
    fn lemmas_pass_through_untouched() {
        let mut deinflector = Deinflector::new();
        let input = lemma("lire");
        assert_eq!(
            deinflector.process(input.clone()),
            Outcome::Passthrough(input)
        );
        assert_eq!(deinflector.lemma_count(), 1);
    }

    #[test]
    fn rewrites_inflected_forms() {
        let mut deinflector = Deinflector::new();
        let outcome = deinflector.process(non_lemma(
            "lisons",
            vec!["{v} first-person plural present of lire (->lire)"],
        ));
        assert_eq!(
            forms(outcome),
            vec![DeinflectedForm {
                base: "lire".into(),
                rules: vec![
                    "first-person".into(),
                    "plural".into(),
                    "present".into(),
                    "lire".into(),
                ],
            }]
        );
    }

    #[test]
    fn drops_inflection_when_lemma_already_seen() {
        let mut deinflector = Deinflector::new();
        deinflector.process(lemma("lire"));
        let outcome = deinflector.process(non_lemma("lire", vec!["{v} misparse (->lire)"]));
        assert_eq!(outcome, Outcome::Duplicate);
    }

    #[test]
    fn lemma_recorded_after_inflection_does_not_reject_retroactively() {
        let mut deinflector = Deinflector::new();
        let outcome = deinflector.process(non_lemma("lire", vec!["{v} misparse (->lire)"]));
        assert!(matches!(outcome, Outcome::Normalized(_)));
        deinflector.process(lemma("lire"));
        assert_eq!(deinflector.lemma_count(), 1);
    }

    #[test]
    fn markerless_entry_is_reported_and_kept_unchanged() {
        let mut deinflector = Deinflector::new();
        let input = non_lemma("abluent", vec!["some irregular text with no markers"]);
        assert_eq!(
            deinflector.process(input.clone()),
            Outcome::Unparsed(input)
        );
    }

    #[test]
    fn failing_definitions_are_skipped_silently() {
        let mut deinflector = Deinflector::new();
        let outcome = deinflector.process(non_lemma(
            "lu",
            vec![
                "{v} past participle of lire (->lire)",
                "no marker in this one",
            ],
        ));
        assert_eq!(forms(outcome).len(), 1);
    }

    #[test]
    fn consecutive_duplicate_records_collapse() {
        let mut deinflector = Deinflector::new();
        let outcome = deinflector.process(non_lemma(
            "lue",
            vec![
                "{v} past participle of lire (->lire)",
                "{v} past participle of lire (->lire)",
            ],
        ));
        assert_eq!(forms(outcome).len(), 1);
    }

    #[test]
    fn non_adjacent_duplicates_survive() {
        let deduped = dedupe_consecutive(vec![1, 1, 2, 1]);
        assert_eq!(deduped, vec![1, 2, 1]);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let once = dedupe_consecutive(vec![3, 3, 1, 1, 3]);
        let twice = dedupe_consecutive(once.clone());
        assert_eq!(once, twice);
    }
}
