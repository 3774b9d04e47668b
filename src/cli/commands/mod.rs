//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod due;
pub mod duplicate;
pub mod edit;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod passwd;
