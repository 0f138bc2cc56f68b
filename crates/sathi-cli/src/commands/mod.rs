mod detect;
mod prompt;
mod run;

pub use detect::run_detect;
pub use prompt::run_prompt;
pub use run::run_bot;
