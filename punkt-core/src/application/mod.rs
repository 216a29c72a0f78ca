//! Application layer: training and sentence splitting
//!
//! This module builds on the pure domain layer. The trainer turns corpora
//! into a [`ParameterSet`](crate::domain::ParameterSet) and the splitter uses
//! one to cut text into sentences.
//!
//! # Example
//!
//! ```rust
//! use punkt_core::application::{SentenceTokenizer, Trainer};
//!
//! let mut trainer = Trainer::new();
//! trainer.train("The cat sat on the mat. The dog did not.");
//!
//! let tokenizer = SentenceTokenizer::new(trainer.into_parameters());
//! let sentences = tokenizer.sentences("It rained. Then it stopped.");
//! assert_eq!(sentences, vec!["It rained.", "Then it stopped."]);
//! ```

pub mod config;
pub mod splitter;
pub mod trainer;

pub use config::{TrainerConfig, TrainerConfigBuilder};
pub use splitter::SentenceTokenizer;
pub use trainer::{train, train_tokens, Trainer};
