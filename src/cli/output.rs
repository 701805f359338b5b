use colored::Colorize;
use std::fmt;

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

pub fn section(title: impl fmt::Display) {
    println!("=== {} ===", title);
}
