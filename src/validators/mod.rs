pub mod gpt_load;

pub use gpt_load::GptLoadTester;
