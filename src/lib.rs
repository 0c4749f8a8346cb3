pub mod config;
pub mod context;
pub mod discord;
pub mod dispatcher;
pub mod error;
pub mod generation;
pub mod integrations;
pub mod openai;
pub mod replicate;
pub mod responder;
