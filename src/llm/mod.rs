pub mod client;
pub mod extract;
pub mod prompts;

pub use client::{MistralClient, DEFAULT_MODEL};
