pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod logging;
pub mod output;
pub mod workflow;

#[cfg(all(test, unix))]
pub(crate) mod test_support;
