use sathi_core::{PromptAssembler, language};

use crate::config::BotConfig;

/// Print the system prompt for a first message from `name` (memory is empty).
pub fn run_prompt(config: &BotConfig, name: &str, text: &str) {
    let assembler = PromptAssembler::new(config.persona.clone());
    let instruction = language::detect(text).instruction();
    println!("{}", assembler.build(name, &instruction, ""));
}
