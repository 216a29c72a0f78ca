//! Domain layer for Punkt sentence boundary detection
//!
//! Pure data structures and algorithms: scanning, the token model, the
//! learned parameters, likelihood statistics and the annotation passes.

pub mod annotate;
pub mod frequency;
pub mod ortho;
pub mod parameters;
pub mod scanner;
pub mod stats;
pub mod token;

pub use annotate::{
    annotate, annotate_pair, annotate_token, first_pass, guess_orthographic_boundary,
    second_pass, BoundaryReason, OrthoGuess,
};
pub use frequency::FrequencyTable;
pub use ortho::{ortho_flag, OrthoContext, SentencePosition};
pub use parameters::ParameterSet;
pub use scanner::{scan, tokenize};
pub use token::{normalize_type, LetterCase, Token, TokenFlags, NUMBER_TYPE};
