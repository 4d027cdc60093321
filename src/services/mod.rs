//! Clients for the external collaborators: emotion classifier, text
//! generation, speech recognition and synthesis.

pub mod classifier;
pub mod llm;
pub mod speech;
