//! Answer composition: grounding prompts and the generative/extractive paths

pub mod composer;
pub mod prompt;

pub use composer::AnswerComposer;
pub use prompt::PromptBuilder;
