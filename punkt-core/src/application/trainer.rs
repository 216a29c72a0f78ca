//! Unsupervised Punkt trainer
//!
//! The trainer learns a [`ParameterSet`] from raw text. Every call to
//! [`Trainer::train`] runs the per-batch stages (type counting, abbreviation
//! reclassification, first annotation pass, orthographic context and the
//! candidate scan) and accumulates frequency tables; [`Trainer::finalize`]
//! turns the accumulated candidate tables into sentence starters and
//! collocations.

use std::collections::BTreeSet;

use crate::application::config::TrainerConfig;
use crate::domain::annotate::first_pass;
use crate::domain::frequency::FrequencyTable;
use crate::domain::ortho::{ortho_flag, OrthoContext, SentencePosition};
use crate::domain::parameters::ParameterSet;
use crate::domain::scanner::tokenize;
use crate::domain::stats::{col_log_likelihood, dunning_log_likelihood};
use crate::domain::token::{Token, NUMBER_TYPE};

/// Outcome of scoring one abbreviation candidate
#[derive(Debug, Clone, PartialEq)]
struct AbbrevCandidate {
    /// Type without its final period
    typ: String,
    score: f64,
    /// Proposed for addition (seen with a period) rather than re-evaluated
    is_add: bool,
}

/// Incremental Punkt trainer
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
    params: ParameterSet,
    type_fdist: FrequencyTable,
    collocation_fdist: FrequencyTable<(String, String)>,
    sentence_starter_fdist: FrequencyTable,
    /// Tokens ending with a period, over all batches
    period_token_count: usize,
    /// Tokens flagged as sentence breaks by the first pass, over all batches
    sentence_break_count: usize,
    finalized: bool,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Trainer {
    /// Creates a trainer with the default configuration
    pub fn new() -> Self {
        Self::with_config(TrainerConfig::default())
    }

    /// Creates a trainer with a custom configuration
    pub fn with_config(config: TrainerConfig) -> Self {
        Self::with_parameters(config, ParameterSet::new())
    }

    /// Creates a trainer that refines existing parameters
    ///
    /// Known abbreviations in `params` are re-evaluated against the new
    /// corpus and dropped when the evidence no longer supports them.
    pub fn with_parameters(config: TrainerConfig, params: ParameterSet) -> Self {
        Self {
            config,
            params,
            type_fdist: FrequencyTable::new(),
            collocation_fdist: FrequencyTable::new(),
            sentence_starter_fdist: FrequencyTable::new(),
            period_token_count: 0,
            sentence_break_count: 0,
            finalized: false,
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train on raw text
    pub fn train(&mut self, text: &str) {
        let tokens = tokenize(text);
        self.train_batch(tokens);
    }

    /// Train on pre-split words
    ///
    /// The words carry no line or paragraph information.
    pub fn train_tokens<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = words.into_iter().map(Token::new).collect();
        self.train_batch(tokens);
    }

    /// Rebuild sentence starters and collocations from the accumulated
    /// candidate counts
    pub fn finalize(&mut self) {
        self.params.clear_sentence_starters();
        for (typ, ll) in self.find_sentence_starters() {
            log::trace!("Sentence starter '{typ}' (ll = {ll:.2})");
            self.params.insert_sentence_starter(typ);
        }

        self.params.clear_collocations();
        for ((first, second), ll) in self.find_collocations() {
            log::trace!("Collocation '{first}' '{second}' (ll = {ll:.2})");
            self.params.insert_collocation(first, second);
        }

        log::debug!(
            "Finalized training: {} abbreviations, {} sentence starters, {} collocations",
            self.params.abbrev_types().count(),
            self.params.sentence_starters().count(),
            self.params.collocations().count()
        );
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Learned parameters, finalizing first if new data was added
    pub fn parameters(&mut self) -> &ParameterSet {
        if !self.finalized {
            self.finalize();
        }
        &self.params
    }

    /// Consume the trainer and return the finalized parameters
    pub fn into_parameters(mut self) -> ParameterSet {
        if !self.finalized {
            self.finalize();
        }
        self.params
    }

    fn train_batch(&mut self, mut tokens: Vec<Token>) {
        self.finalized = false;

        let unique_types = self.count_types(&tokens);
        log::debug!(
            "Counted {} tokens ({} distinct types, {} ending with a period so far)",
            tokens.len(),
            unique_types.len(),
            self.period_token_count
        );

        self.reclassify_abbreviations(&unique_types);

        first_pass(&self.params, &mut tokens);

        self.build_ortho_context(&tokens);

        let breaks = tokens.iter().filter(|t| t.is_sentence_break()).count();
        self.sentence_break_count += breaks;
        log::debug!("First pass found {breaks} sentence breaks");

        self.scan_pairs(&tokens);
    }

    fn count_types(&mut self, tokens: &[Token]) -> BTreeSet<String> {
        let mut unique_types = BTreeSet::new();

        for token in tokens {
            self.type_fdist.increment(token.typ().to_string());
            unique_types.insert(token.typ().to_string());

            if token.ends_with_period() {
                self.period_token_count += 1;
            }
        }

        unique_types
    }

    fn reclassify_abbreviations(&mut self, unique_types: &BTreeSet<String>) {
        let candidates = self.score_abbreviation_candidates(unique_types);
        let (mut added, mut removed) = (0, 0);

        for candidate in candidates {
            if candidate.score >= self.config.abbrev_cutoff {
                if candidate.is_add && self.params.insert_abbrev_type(candidate.typ.as_str()) {
                    log::trace!(
                        "Abbreviation '{}' (score = {:.3})",
                        candidate.typ,
                        candidate.score
                    );
                    added += 1;
                }
            } else if !candidate.is_add && self.params.remove_abbrev_type(&candidate.typ) {
                log::trace!(
                    "Removed abbreviation '{}' (score = {:.3})",
                    candidate.typ,
                    candidate.score
                );
                removed += 1;
            }
        }

        log::debug!("Abbreviation reclassification: {added} added, {removed} removed");
    }

    fn score_abbreviation_candidates(
        &self,
        unique_types: &BTreeSet<String>,
    ) -> Vec<AbbrevCandidate> {
        let mut candidates = Vec::new();

        for typ in unique_types {
            if typ == NUMBER_TYPE || !typ.chars().any(char::is_alphabetic) {
                continue;
            }

            let (key, is_add) = match typ.strip_suffix('.') {
                Some(stem) if !self.params.has_abbrev_type(stem) => (stem, true),
                Some(_) => continue,
                None if self.params.has_abbrev_type(typ) => (typ.as_str(), false),
                None => continue,
            };

            let periods = key.matches('.').count() + 1;
            let non_periods = key.chars().count() + 1 - periods;

            let with_period = self.type_fdist.get(format!("{key}.").as_str());
            let without_period = self.type_fdist.get(key);

            let Some(ll) = dunning_log_likelihood(
                with_period + without_period,
                self.period_token_count,
                with_period,
                self.type_fdist.total(),
            ) else {
                continue;
            };

            let length_factor = (-(non_periods as f64)).exp();
            let penalty = if self.config.ignore_abbrev_penalty {
                0.0
            } else {
                (non_periods as f64).powf(-(without_period as f64))
            };

            candidates.push(AbbrevCandidate {
                typ: key.to_string(),
                score: ll * length_factor * periods as f64 * penalty,
                is_add,
            });
        }

        candidates
    }

    fn build_ortho_context(&mut self, tokens: &[Token]) {
        let mut position = SentencePosition::Internal;

        for token in tokens {
            if token.is_paragraph_start() && position != SentencePosition::Unknown {
                position = SentencePosition::Initial;
            }
            if token.is_line_start() && position == SentencePosition::Internal {
                position = SentencePosition::Unknown;
            }

            let flag = ortho_flag(position, token.first_case());
            if !flag.is_empty() {
                self.params
                    .add_ortho_context(token.type_without_sentence_period(), flag);
            }

            position = if token.is_sentence_break() {
                if token.is_number() || token.is_initial() {
                    SentencePosition::Unknown
                } else {
                    SentencePosition::Initial
                }
            } else if token.is_ellipsis() || token.is_abbr() {
                SentencePosition::Unknown
            } else {
                SentencePosition::Internal
            };
        }
    }

    fn scan_pairs(&mut self, tokens: &[Token]) {
        for pair in tokens.windows(2) {
            let (tok1, tok2) = (&pair[0], &pair[1]);

            if !tok1.ends_with_period() {
                continue;
            }

            if self.is_rare_abbreviation(tok1, tok2) {
                log::trace!("Rare abbreviation '{}'", tok1.type_without_period());
                self.params.insert_abbrev_type(tok1.type_without_period());
            }

            if is_potential_sentence_starter(tok1, tok2) {
                self.sentence_starter_fdist.increment(tok2.typ().to_string());
            }

            if self.is_potential_collocation(tok1, tok2) {
                self.collocation_fdist.increment((
                    tok1.type_without_period().to_string(),
                    tok2.type_without_period().to_string(),
                ));
            }
        }
    }

    /// A rare type ending a "sentence" that is followed by internal
    /// punctuation or by a lower-case word that is usually capitalized
    fn is_rare_abbreviation(&self, tok1: &Token, tok2: &Token) -> bool {
        if tok1.is_abbr() || !tok1.is_sentence_break() {
            return false;
        }

        let typ = tok1.type_without_sentence_period();
        let mut chopped = typ.chars();
        chopped.next_back();
        let count = self.type_fdist.get(typ) + self.type_fdist.get(chopped.as_str());

        if self.params.has_abbrev_type(typ) || count >= self.config.abbrev_backoff {
            return false;
        }

        if tok2.value().starts_with([',', ':', ';']) {
            true
        } else if tok2.first_lower() {
            self.params
                .ortho_context(tok2.type_without_sentence_period())
                .contains(OrthoContext::BEG_UC | OrthoContext::MID_UC)
        } else {
            false
        }
    }

    fn is_potential_collocation(&self, tok1: &Token, tok2: &Token) -> bool {
        let candidate = self.config.include_all_collocations
            || (self.config.include_abbrev_collocations && tok1.is_abbr())
            || (tok1.is_sentence_break() && (tok1.is_number() || tok2.is_initial()));

        candidate && tok1.is_non_punctuation() && tok2.is_non_punctuation()
    }

    /// Count of a type with and without a final period
    fn combined_count(&self, typ: &str) -> usize {
        self.type_fdist.get(typ) + self.type_fdist.get(format!("{typ}.").as_str())
    }

    fn find_sentence_starters(&self) -> Vec<(String, f64)> {
        let n = self.type_fdist.total();
        let mut starters = Vec::new();

        for (typ, at_break_count) in self.sentence_starter_fdist.ordered_samples() {
            let type_count = self.combined_count(typ);
            if type_count < *at_break_count {
                continue;
            }

            let Some(ll) =
                col_log_likelihood(self.sentence_break_count, type_count, *at_break_count, n)
            else {
                continue;
            };

            if ll >= self.config.sentence_starter_cutoff
                && n as f64 / self.sentence_break_count as f64
                    > type_count as f64 / *at_break_count as f64
            {
                starters.push((typ.clone(), ll));
            }
        }

        starters
    }

    fn find_collocations(&self) -> Vec<((String, String), f64)> {
        let n = self.type_fdist.total();
        let mut collocations = Vec::new();

        for ((first, second), count) in self.collocation_fdist.ordered_samples() {
            if self.params.has_sentence_starter(second) {
                continue;
            }

            let first_count = self.combined_count(first);
            let second_count = self.combined_count(second);

            if first_count <= 1
                || second_count <= 1
                || *count <= self.config.min_collocation_frequency
                || *count > first_count.min(second_count)
            {
                continue;
            }

            let Some(ll) = col_log_likelihood(first_count, second_count, *count, n) else {
                continue;
            };

            if ll >= self.config.collocation_cutoff
                && n as f64 / first_count as f64 > second_count as f64 / *count as f64
            {
                collocations.push(((first.clone(), second.clone()), ll));
            }
        }

        collocations
    }
}

fn is_potential_sentence_starter(tok1: &Token, tok2: &Token) -> bool {
    tok1.is_sentence_break() && !(tok1.is_number() || tok1.is_initial()) && tok2.is_alpha()
}

/// Train a parameter set on raw text with the default configuration
pub fn train(text: &str) -> ParameterSet {
    let mut trainer = Trainer::new();
    trainer.train(text);
    trainer.into_parameters()
}

/// Train a parameter set on pre-split words with the default configuration
pub fn train_tokens<I, S>(words: I) -> ParameterSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut trainer = Trainer::new();
    trainer.train_tokens(words);
    trainer.into_parameters()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let params = train("");
        assert!(params.is_empty());

        let params = train_tokens(Vec::<String>::new());
        assert!(params.is_empty());
    }

    #[test]
    fn test_counts_accumulate_across_batches() {
        let mut trainer = Trainer::new();
        trainer.train("One cat sat. Two dogs ran.");
        assert_eq!(trainer.type_fdist.total(), 6);
        assert_eq!(trainer.period_token_count, 2);
        assert_eq!(trainer.sentence_break_count, 2);

        trainer.train_tokens(["A", "cat", "sat."]);
        assert_eq!(trainer.type_fdist.total(), 9);
        assert_eq!(trainer.type_fdist.get("sat."), 2);
        assert_eq!(trainer.period_token_count, 3);
        assert_eq!(trainer.sentence_break_count, 3);
    }

    #[test]
    fn test_ortho_context_positions() {
        let mut trainer = Trainer::new();
        trainer.train_tokens(["The", "cat", "sat.", "The", "Cat", "sat", "..."]);
        let params = trainer.parameters();

        // The first token is seen in the seeded internal position
        assert_eq!(
            params.ortho_context("the"),
            OrthoContext::MID_UC | OrthoContext::BEG_UC
        );
        assert_eq!(
            params.ortho_context("cat"),
            OrthoContext::MID_LC | OrthoContext::MID_UC
        );
        assert_eq!(params.ortho_context("sat"), OrthoContext::MID_LC);
        assert!(params.ortho_context("...").is_empty());
    }

    #[test]
    fn test_ortho_context_line_and_paragraph_starts() {
        let mut trainer = Trainer::new();
        trainer.train("Alpha beta\nGamma delta\n\nEpsilon zeta");
        let params = trainer.parameters();

        assert_eq!(params.ortho_context("alpha"), OrthoContext::UNK_UC);
        assert_eq!(params.ortho_context("gamma"), OrthoContext::UNK_UC);
        assert_eq!(params.ortho_context("epsilon"), OrthoContext::BEG_UC);
        assert_eq!(params.ortho_context("zeta"), OrthoContext::MID_LC);
    }

    #[test]
    fn test_ortho_context_after_initial_is_unknown() {
        let mut trainer = Trainer::new();
        trainer.train_tokens(["by", "J.", "Smith", "and", "K.", "jones"]);
        let params = trainer.parameters();

        assert_eq!(params.ortho_context("smith"), OrthoContext::UNK_UC);
        assert_eq!(params.ortho_context("jones"), OrthoContext::UNK_LC);
        // Both initials are learned as abbreviations and keep their period
        assert!(params.has_abbrev_type("j"));
        assert_eq!(params.ortho_context("j."), OrthoContext::MID_UC);
    }

    #[test]
    fn test_abbreviation_learned_from_frequent_period() {
        let mut words = Vec::new();
        for _ in 0..20 {
            words.extend(["see", "etc.", "and", "more", "words", "here."]);
            words.extend(["We", "stay", "here", "."]);
        }

        let params = train_tokens(words);
        assert!(params.has_abbrev_type("etc"));
        assert!(!params.has_abbrev_type("here"));
    }

    #[test]
    fn test_known_abbreviation_removed_without_evidence() {
        let mut params = ParameterSet::new();
        params.insert_abbrev_type("sat");

        let mut trainer = Trainer::with_parameters(TrainerConfig::default(), params);
        trainer.train_tokens(["the", "cat", "sat", "on", "the", "mat", "."]);

        assert!(!trainer.parameters().has_abbrev_type("sat"));
    }

    #[test]
    fn test_score_candidates() {
        let mut trainer = Trainer::new();
        for word in ["x", "y.", "y.", "z.", "etc", "1."] {
            trainer.type_fdist.increment(word.to_string());
        }
        trainer.period_token_count = 4;
        trainer.params.insert_abbrev_type("etc");
        trainer.params.insert_abbrev_type("z");

        let types: BTreeSet<String> = trainer.type_fdist.iter().map(|(k, _)| k.clone()).collect();
        let candidates = trainer.score_abbreviation_candidates(&types);
        let keys: Vec<(&str, bool)> = candidates
            .iter()
            .map(|c| (c.typ.as_str(), c.is_add))
            .collect();

        // "##number##" is skipped, "z." is already known, "x" is not known
        assert_eq!(keys, vec![("etc", false), ("y", true)]);
    }

    #[test]
    fn test_rare_abbreviation_before_comma() {
        let mut trainer = Trainer::new();
        trainer.train_tokens(["He", "left", "Ont.", ",", "then", "came", "back", "."]);
        assert!(trainer.parameters().has_abbrev_type("ont"));
    }

    #[test]
    fn test_rare_abbreviation_needs_low_frequency() {
        let config = TrainerConfig::builder().abbrev_backoff(0).build().unwrap();
        let mut trainer = Trainer::with_config(config);
        trainer.train_tokens(["He", "left", "Ont.", ",", "then", "came", "back", "."]);
        assert!(!trainer.parameters().has_abbrev_type("ont"));
    }

    #[test]
    fn test_rare_abbreviation_before_usually_capitalized_word() {
        let words = [
            "It", "rained", ".", "Smith", "came", ".", "They", "met", "Smith", "there", ".", "He",
            "saw", "Xyz.", "smith", "there", ".",
        ];
        let mut trainer = Trainer::new();
        trainer.train_tokens(words);
        let params = trainer.parameters();

        assert!(params
            .ortho_context("smith")
            .contains(OrthoContext::BEG_UC | OrthoContext::MID_UC));
        assert!(params.has_abbrev_type("xyz"));

        // Never seen capitalized mid-sentence
        let mut words = words;
        words[8] = "Jones";
        let mut trainer = Trainer::new();
        trainer.train_tokens(words);
        assert!(!trainer.parameters().has_abbrev_type("xyz"));
    }

    fn etc_corpus() -> Vec<&'static str> {
        let mut words = Vec::new();
        for _ in 0..20 {
            words.extend(["see", "etc.", "and", "more", "words", "here.", "We", "stay", "here", "."]);
        }
        words.extend(["no", "etc", "here", "."]);
        words
    }

    #[test]
    fn test_ignore_abbrev_penalty_drops_all_candidates() {
        let mut params = ParameterSet::new();
        params.insert_abbrev_type("etc");
        let mut trainer = Trainer::with_parameters(TrainerConfig::default(), params.clone());
        trainer.train_tokens(etc_corpus());
        assert!(trainer.parameters().has_abbrev_type("etc"));

        let config = TrainerConfig::builder()
            .ignore_abbrev_penalty(true)
            .build()
            .unwrap();
        let mut trainer = Trainer::with_parameters(config.clone(), params);
        trainer.train_tokens(etc_corpus());
        assert!(!trainer.parameters().has_abbrev_type("etc"));

        let mut trainer = Trainer::with_config(config);
        trainer.train_tokens(etc_corpus());
        assert_eq!(trainer.parameters().abbrev_types().count(), 0);
    }

    #[test]
    fn test_abbreviation_retracted_by_later_batch() {
        let mut words = Vec::new();
        for _ in 0..10 {
            words.extend(["a", "gol.", "and", "more", "words", "here", "."]);
        }
        let mut trainer = Trainer::new();
        trainer.train_tokens(words);
        assert!(trainer.parameters().has_abbrev_type("gol"));

        let mut words = Vec::new();
        for _ in 0..10 {
            words.extend(["the", "gol", "was", "good", "."]);
        }
        trainer.train_tokens(words);
        assert!(!trainer.parameters().has_abbrev_type("gol"));
    }

    #[test]
    fn test_potential_sentence_starter() {
        let mut tok1 = Token::new("end.");
        tok1.set_sentence_break(true);
        assert!(is_potential_sentence_starter(&tok1, &Token::new("The")));
        assert!(!is_potential_sentence_starter(&tok1, &Token::new("3rd")));

        let mut initial = Token::new("J.");
        initial.set_sentence_break(true);
        assert!(!is_potential_sentence_starter(&initial, &Token::new("Smith")));

        let mut number = Token::new("12.");
        number.set_sentence_break(true);
        assert!(!is_potential_sentence_starter(&number, &Token::new("The")));
    }

    #[test]
    fn test_potential_collocation_switches() {
        let mut abbr = Token::new("Dr.");
        abbr.set_abbr(true);
        let next = Token::new("Smith");

        let trainer = Trainer::new();
        assert!(trainer.is_potential_collocation(&abbr, &next));
        assert!(!trainer.is_potential_collocation(&abbr, &Token::new(",")));

        let config = TrainerConfig::builder()
            .include_all_collocations(false)
            .build()
            .unwrap();
        let trainer = Trainer::with_config(config);
        assert!(!trainer.is_potential_collocation(&abbr, &next));

        let mut number = Token::new("5.");
        number.set_sentence_break(true);
        assert!(trainer.is_potential_collocation(&number, &Token::new("June")));

        let config = TrainerConfig::builder()
            .include_all_collocations(false)
            .include_abbrev_collocations(true)
            .build()
            .unwrap();
        let trainer = Trainer::with_config(config);
        assert!(trainer.is_potential_collocation(&abbr, &next));
    }

    #[test]
    fn test_parameters_finalize_lazily() {
        let mut trainer = Trainer::new();
        trainer.train("A short text.");
        assert!(!trainer.is_finalized());

        trainer.parameters();
        assert!(trainer.is_finalized());

        trainer.train("Another one.");
        assert!(!trainer.is_finalized());
    }

    #[test]
    fn test_training_is_deterministic() {
        let text = "Mr. Smith went to Washington. He met Dr. Jones there. \
                    They talked about the U.S. economy. It was 5 p.m. when they left.";

        let first = train(text);
        for _ in 0..5 {
            assert_eq!(train(text), first);
        }
    }
}
