pub mod app;
pub mod cli;
pub mod config;
pub mod output;
pub mod person;
pub mod roster;
pub mod source;
pub mod transform;

#[cfg(test)]
mod tests;
