use colored::Colorize;
use sathi_core::language;

pub fn run_detect(text: &str) {
    let tag = language::detect(text);
    let label = if tag.language().is_some() {
        tag.as_string().green().bold()
    } else {
        tag.as_string().yellow().bold()
    };

    println!("{}", label);
    println!("{}", tag.instruction());
}
