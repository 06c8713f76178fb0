//! Interactive console: questionnaire and the `ask` tool adapter

pub mod interaction;
pub mod questionnaire;
