pub mod chart;
pub mod cli;
pub mod error;
pub mod loc;
pub mod model;
pub mod report;
pub mod svn;
pub mod timeline;
