//! Command implementation modules
//!
//! Each subcommand lives in its own module.

pub mod backup;
pub mod quality;
pub mod run;
pub mod status;

pub use backup::run_backup_command;
pub use quality::run_quality_command;
pub use run::run_pipeline_command;
pub use status::run_status_command;
