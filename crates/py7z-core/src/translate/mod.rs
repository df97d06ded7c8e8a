//! Translation of friendly options into 7-Zip command-line arguments.
//!
//! A [`CommandSpec`] holds the operation, the flags in the order the caller
//! gave them, and the operands. [`CommandSpec::translate`] turns it into an
//! [`ArgumentSequence`] laid out the way 7-Zip requires: operation keyword
//! first, then switches, then `--` and the operands.
//!
//! Recognised options are [`Switch`] values and each becomes exactly one
//! token. Anything else travels as [`Flag::Unknown`] and is forwarded
//! untouched, leaving validation to 7-Zip.
//!
//! # Examples
//!
//! ```
//! use py7z_core::translate::CommandSpec;
//! use py7z_core::translate::Flag;
//! use py7z_core::translate::Operation;
//! use py7z_core::translate::Switch;
//!
//! let spec = CommandSpec::new(Operation::Add)
//!     .with_switch(Switch::CompressionLevel("9".parse().unwrap()))
//!     .with_flag(Flag::Unknown("-mqs=on".into()))
//!     .with_operand("backup.7z")
//!     .with_operand("docs");
//!
//! assert_eq!(spec.translate().to_string(), "a -mx=9 -mqs=on -- backup.7z docs");
//! ```

mod command;
mod options;
mod switch;

pub use command::ArgumentSequence;
pub use command::CommandSpec;
pub use command::END_OF_SWITCHES;
pub use command::HashRequest;
pub use command::Operation;
pub use command::Redacted;
pub use options::ArchiveFormat;
pub use options::CompressionLevel;
pub use options::CompressionMethod;
pub use options::ConsoleCharset;
pub use options::DictionarySize;
pub use options::HashAlgorithm;
pub use options::ListfileCharset;
pub use options::OverwriteMode;
pub use options::SizeSpec;
pub use options::SolidBlockSize;
pub use options::ThreadCount;
pub use options::Timestamp;
pub use switch::Filter;
pub use switch::FilterKind;
pub use switch::Flag;
pub use switch::MAX_VERBOSITY;
pub use switch::Switch;
