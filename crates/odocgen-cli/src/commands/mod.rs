//! One module per subcommand.

pub mod query;
pub mod render;
pub mod status;
