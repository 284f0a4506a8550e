pub mod completions;
pub mod configure;
pub mod functions;
pub mod login;

pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
pub use functions::FunctionsCommand;
pub use login::LoginCommand;
