//! Bounded, append-only store of learning examples.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use warlord_evaluator::FeatureVector;
use warlord_record::CharacterRecord;

/// Maximum number of retained examples. Once reached, each append evicts
/// exactly the oldest example.
pub const CORPUS_CAPACITY: usize = 1000;

/// One (feature vector, observed score) pair together with the record it was
/// extracted from.
///
/// Created only when an observed score accompanies a request; owned
/// exclusively by the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningExample {
    pub features: FeatureVector,
    pub observed_score: f32,
    pub source_record: CharacterRecord,
}

/// Insertion-ordered sequence of learning examples, capacity-bounded at
/// [`CORPUS_CAPACITY`].
///
/// Mutated only by [`append`](Self::append); persisted as a whole by the
/// engine after every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningCorpus {
    examples: VecDeque<LearningExample>,
}

impl LearningCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an example, evicting the oldest one when the corpus is full.
    pub fn append(&mut self, example: LearningExample) {
        if self.examples.len() == CORPUS_CAPACITY {
            self.examples.pop_front();
        }
        self.examples.push_back(example);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Read-only view in insertion order among currently retained examples.
    pub fn examples(&self) -> impl Iterator<Item = &LearningExample> {
        self.examples.iter()
    }
}
