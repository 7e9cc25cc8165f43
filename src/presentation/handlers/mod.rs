mod asr;
mod health;

pub use asr::{AsrResponse, asr_handler, method_not_allowed_handler};
pub use health::health_handler;
