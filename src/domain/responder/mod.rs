//! Breed knowledge responder - rule-based answers to free-text questions

mod intent;
mod responder;

pub use intent::{Intent, Question, LONG_KEYWORD_LEN};
pub use responder::{greeting_for, respond, Responder, ResponseRule};
