//! Unsupervised sentence boundary detection with the Punkt algorithm
//!
//! This crate implements the Kiss–Strunk "Punkt" approach: instead of a fixed
//! list of abbreviations it learns from raw text which periods end
//! abbreviations, which words tend to start sentences and which word pairs
//! belong together across a period.
//!
//! # Architecture
//!
//! - **Domain layer**: scanner, token model, frequency tables, parameters,
//!   likelihood statistics and the two annotation passes
//! - **Application layer**: the trainer, its configuration and the sentence
//!   splitter
//! - **API layer**: JSON persistence of trained parameters
//!
//! # Example
//!
//! ```rust
//! use punkt_core::{train, ParameterSet, SentenceTokenizer};
//!
//! let corpus = "Mr. Smith lives here. Mr. Jones lives there. \
//!               Mr. Brown moved away. They are all friends.";
//! let params = train(corpus);
//!
//! // Trained parameters can be stored and loaded again
//! let json = params.to_json_string().unwrap();
//! let params = ParameterSet::from_json_str(&json).unwrap();
//!
//! let tokenizer = SentenceTokenizer::new(params);
//! let sentences = tokenizer.sentences("It was late. Everyone left.");
//! assert_eq!(sentences, vec!["It was late.", "Everyone left."]);
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod error;

pub use application::{
    train, train_tokens, SentenceTokenizer, Trainer, TrainerConfig, TrainerConfigBuilder,
};
pub use domain::{
    annotate, scan, tokenize, BoundaryReason, FrequencyTable, OrthoContext, OrthoGuess,
    ParameterSet, Token, TokenFlags, NUMBER_TYPE,
};
pub use error::{Error, Result};
