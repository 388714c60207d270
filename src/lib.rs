pub mod config;
pub mod discovery;
pub mod git;
pub mod output;
pub mod scan;
pub mod shell_exec;
pub mod styling;
pub mod sync;
