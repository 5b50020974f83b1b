//! CLI command handlers. Each command is in its own file.

mod checksum;
mod create;
mod list;
mod verify;

pub use checksum::run_checksum;
pub use create::run_create;
pub use list::run_list;
pub use verify::{drive_pass, run_verify, VerifyArgs};
