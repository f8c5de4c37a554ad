// Cover letters: keyword selection from the résumé, letter drafting for the
// matched jobs, and writing the finished document to disk.
// All LLM calls go through llm_client.

pub mod drafter;
pub mod generator;
pub mod handlers;
pub mod keyword;
pub mod prompts;
pub mod writer;
