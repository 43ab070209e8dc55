//! Normalization pipeline for term-bank deinflection entries.
//!
//! Source banks describe inflected forms in free text, with the resolved
//! base form embedded through the `{form}(->base)` convention. This crate
//! turns those entries into structured `{base, rules}` records:
//!
//! 1. [`extract`] locates the authoritative `(->base)` marker and the form
//!    span preceding it.
//! 2. [`tokenize`] strips bracketed annotations from the form span and
//!    splits it into rule tokens.
//! 3. [`Deinflector::process`] classifies each entry (lemma vs inflected
//!    form), orchestrates extraction across its definitions, and collapses
//!    consecutive duplicate records via [`dedupe_consecutive`].
//!
//! Entries must be fed in bank order: the deinflector records every lemma
//! term it passes through and drops later inflected-form entries for the
//! same term, so reordering changes which entries survive.
//!
//! ```rust
//! use termbank_deinflect::{extract, tokenize};
//!
//! let ext = extract("{v} gerund of lire (->lire)").unwrap();
//! assert_eq!(ext.base, "lire");
//! assert_eq!(tokenize(ext.form_span), vec!["gerund", "lire"]);
//! ```

mod extract;
mod normalize;

pub use extract::{ExtractError, Extraction, extract, tokenize};
pub use normalize::{Deinflector, Outcome, dedupe_consecutive};
