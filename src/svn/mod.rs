pub mod command;
pub mod log;
pub mod repo;

pub use command::{CommandRunner, SystemRunner};
pub use log::{parse_log, LogEntry};
pub use repo::SvnRepository;
