//! Two-pass boundary annotation
//!
//! The first pass looks at every token in isolation and marks obvious
//! sentence breaks, ellipses and known abbreviations. The second pass
//! revisits every period-final token together with its successor and
//! corrects the first decision using collocations, sentence starters and
//! the orthographic heuristic.

use std::fmt;

use crate::domain::ortho::OrthoContext;
use crate::domain::parameters::ParameterSet;
use crate::domain::token::{Token, NUMBER_TYPE};

/// Outcome of the orthographic heuristic for a token following a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrthoGuess {
    /// The token looks like the start of a new sentence
    Boundary,
    /// The token looks like a continuation
    NoBoundary,
    Unknown,
}

/// Which rule of the second pass decided a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryReason {
    DefaultDecision,
    KnownCollocation,
    AbbrevWithOrthographicHeuristic,
    AbbrevWithSentenceStarter,
    InitialWithOrthographicHeuristic,
    NumberWithOrthographicHeuristic,
    InitialWithSpecialOrthographicHeuristic,
}

impl fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            BoundaryReason::DefaultDecision => "default decision",
            BoundaryReason::KnownCollocation => "known collocation (both words)",
            BoundaryReason::AbbrevWithOrthographicHeuristic => {
                "abbreviation + orthographic heuristic"
            }
            BoundaryReason::AbbrevWithSentenceStarter => {
                "abbreviation + frequent sentence starter"
            }
            BoundaryReason::InitialWithOrthographicHeuristic => "initial + orthographic heuristic",
            BoundaryReason::NumberWithOrthographicHeuristic => "number + orthographic heuristic",
            BoundaryReason::InitialWithSpecialOrthographicHeuristic => {
                "initial + special orthographic heuristic"
            }
        };
        f.write_str(reason)
    }
}

/// Decide from orthographic statistics whether `token` starts a sentence
pub fn guess_orthographic_boundary(params: &ParameterSet, token: &Token) -> OrthoGuess {
    if token
        .value()
        .contains([';', ',', ':', '.', '!', '?'])
    {
        return OrthoGuess::NoBoundary;
    }

    let context = params.ortho_context(token.type_without_sentence_period());

    if token.first_upper()
        && context.intersects(OrthoContext::LC)
        && !context.contains(OrthoContext::MID_UC)
    {
        OrthoGuess::Boundary
    } else if token.first_lower()
        && (context.intersects(OrthoContext::UC) || !context.contains(OrthoContext::BEG_LC))
    {
        OrthoGuess::NoBoundary
    } else {
        OrthoGuess::Unknown
    }
}

/// Annotate a single token in isolation
pub fn annotate_token(params: &ParameterSet, token: &mut Token) {
    let value = token.value();

    if matches!(value, "." | "?" | "!") {
        token.set_sentence_break(true);
    } else if token.matches_ellipsis() {
        token.set_ellipsis(true);
    } else if let Some(stem) = value.strip_suffix('.') {
        let key = stem.to_lowercase();
        let last_component = key.rsplit('-').next().unwrap_or(&key);

        if params.has_abbrev_type(&key) || params.has_abbrev_type(last_component) {
            token.set_abbr(true);
        } else {
            token.set_sentence_break(true);
        }
    }
}

/// First pass: sentence breaks, ellipses and known abbreviations
pub fn first_pass(params: &ParameterSet, tokens: &mut [Token]) {
    for token in tokens.iter_mut() {
        annotate_token(params, token);
    }
}

/// Revisit the decision for `tok1` given the following token
///
/// Only period-final tokens are considered; everything else is left as is
/// and reported as the default decision.
pub fn annotate_pair(params: &ParameterSet, tok1: &mut Token, tok2: &Token) -> BoundaryReason {
    if !tok1.ends_with_period() {
        return BoundaryReason::DefaultDecision;
    }

    let next_type = tok2.type_without_sentence_period();
    let is_initial = tok1.is_initial();

    if params.has_collocation(tok1.type_without_period(), next_type) {
        tok1.set_sentence_break(false);
        tok1.set_abbr(true);
        return BoundaryReason::KnownCollocation;
    }

    if (tok1.is_abbr() || tok1.is_ellipsis()) && !is_initial {
        if guess_orthographic_boundary(params, tok2) == OrthoGuess::Boundary {
            tok1.set_sentence_break(true);
            return BoundaryReason::AbbrevWithOrthographicHeuristic;
        }

        if tok1.first_upper() && params.has_sentence_starter(next_type) {
            tok1.set_sentence_break(true);
            return BoundaryReason::AbbrevWithSentenceStarter;
        }
    }

    if is_initial || tok1.typ() == NUMBER_TYPE {
        let guess = guess_orthographic_boundary(params, tok2);

        if guess == OrthoGuess::NoBoundary {
            tok1.set_sentence_break(false);
            tok1.set_abbr(true);
            return if is_initial {
                BoundaryReason::InitialWithOrthographicHeuristic
            } else {
                BoundaryReason::NumberWithOrthographicHeuristic
            };
        }

        if guess == OrthoGuess::Unknown
            && is_initial
            && tok2.first_upper()
            && !params.ortho_context(next_type).intersects(OrthoContext::LC)
        {
            tok1.set_sentence_break(false);
            tok1.set_abbr(true);
            return BoundaryReason::InitialWithSpecialOrthographicHeuristic;
        }
    }

    BoundaryReason::DefaultDecision
}

/// Second pass over adjacent pairs; requires the first pass flags
pub fn second_pass(params: &ParameterSet, tokens: &mut [Token]) {
    for i in 1..tokens.len() {
        let (head, tail) = tokens.split_at_mut(i);
        let tok1 = &mut head[i - 1];
        let tok2 = &tail[0];

        if !tok1.ends_with_period() {
            continue;
        }

        let reason = annotate_pair(params, tok1, tok2);
        log::trace!("{tok1} {tok2}: {reason}");
    }
}

/// Run both passes over `tokens` in place
pub fn annotate(params: &ParameterSet, tokens: &mut [Token]) {
    first_pass(params, tokens);
    second_pass(params, tokens);
}
