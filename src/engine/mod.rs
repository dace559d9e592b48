pub mod engine;
pub mod error;
pub mod protocol;

pub mod image_requester;
pub mod llm_client;
pub mod prompt_builder;
pub mod turn_parser;
pub mod turn_requester;
