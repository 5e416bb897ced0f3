//! Game rounds: sixteen stimuli of which exactly two share parameters.

pub mod difficulty;
pub mod generator;

use serde::{Deserialize, Serialize};

use crate::core::gabor::{LumaImage, render};
use crate::core::stimulus::StimulusParams;

pub use difficulty::{Difficulty, JitterProfile};
pub use generator::{ROUND_LEN, ROUND_SIZE_RANGE, generate_round};

/// One generated round. Serializes as `{"params": [...], "answer": [i, j]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(rename = "params")]
    pub items: Vec<StimulusParams>,
    /// Positions of the matching pair, ascending.
    pub answer: [usize; 2],
}

impl Round {
    /// The stimulus shared by both answer positions.
    pub fn base(&self) -> &StimulusParams {
        &self.items[self.answer[0]]
    }

    pub fn is_answer(&self, index: usize) -> bool {
        self.answer.contains(&index)
    }

    /// Items other than the matching pair, with their positions.
    pub fn distractors(&self) -> impl Iterator<Item = (usize, &StimulusParams)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_answer(*i))
    }

    /// Render every item in order.
    pub fn render(&self) -> Vec<LumaImage> {
        self.items.iter().map(render).collect()
    }
}
