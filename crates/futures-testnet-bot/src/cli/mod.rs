/*
[INPUT]:  Parsed subcommands from main
[OUTPUT]: Command handlers for order, account, and interactive modes
[POS]:    CLI layer - module wiring
[UPDATE]: When adding subcommands
*/

pub mod interactive;
pub mod order;

pub use interactive::prompt_order;
pub use order::{OrderArgs, run_account, run_order};
