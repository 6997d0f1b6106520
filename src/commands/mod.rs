// Commands module - handles CLI command execution

pub mod decode;
pub mod junit;

pub use decode::handle_decode;
pub use junit::handle_junit;
