// crates/spark-cli/src/commands/mod.rs - Command Handler Modules
//
// One module per entry point:
// - add: the default command (setup, prompt, append, publish)
// - config: explicit reconfiguration
// - view: read-only paging of the idea file

pub mod add;
pub mod config;
pub mod view;
