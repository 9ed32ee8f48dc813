mod openai_client;

pub use openai_client::{OpenAiClient, parse_classification};
