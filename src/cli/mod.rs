mod args;

pub use args::{BatchArgs, CliArgs, Command, CommonArgs, CompressionLevel, RowsArgs};
