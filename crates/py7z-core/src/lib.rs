//! Argument translation and listing parser for the 7-Zip executable.
//!
//! `py7z-core` does no archiving of its own. It turns a friendly option
//! vocabulary into the argument list 7-Zip expects, runs the executable, and
//! parses the table printed by `7z l` into structured records.
//!
//! # Examples
//!
//! ```no_run
//! use py7z_core::ProcessRunner;
//! use py7z_core::Settings;
//! use py7z_core::run_command;
//! use py7z_core::translate::CommandSpec;
//! use py7z_core::translate::Operation;
//! use py7z_core::translate::Switch;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = ProcessRunner::new(Settings::from_env());
//! let spec = CommandSpec::new(Operation::Extract)
//!     .with_switch(Switch::OutputDir("/tmp/out".into()))
//!     .with_operand("archive.7z");
//! let code = run_command(&runner, &spec)?;
//! println!("7-Zip exited with {code}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod listing;
pub mod locate;
pub mod runner;
pub mod translate;

pub use config::Settings;
pub use error::NotFoundReason;
pub use error::Py7zError;
pub use error::Result;
pub use listing::ArchiveListing;
pub use listing::ListRequest;
pub use listing::list_archive;
pub use locate::SevenZip;
pub use locate::locate;
pub use runner::CapturedOutput;
pub use runner::ProcessRunner;
pub use runner::Runner;
pub use runner::run_command;
