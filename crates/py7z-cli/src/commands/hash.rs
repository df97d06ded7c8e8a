//! Hash command implementation

use super::forward_exit_code;
use crate::cli::HashArgs;
use anyhow::Context;
use anyhow::Result;
use py7z_core::Runner;
use py7z_core::run_command;
use py7z_core::translate::HashRequest;
use std::process::ExitCode;

fn request(args: &HashArgs) -> HashRequest {
    HashRequest {
        algorithm: args.algorithm,
        verbose: args.verbose,
        show_progress: args.progress,
        archive_contents: args.archive_contents,
        files: args.files.clone(),
    }
}

/// Runs `7z h`, or `7z t -slt` for archive contents, with live output.
pub fn execute<R: Runner + ?Sized>(args: &HashArgs, runner: &R) -> Result<ExitCode> {
    let spec = request(args).to_command()?;
    let code = run_command(runner, &spec).context("failed to hash with 7-Zip")?;
    Ok(forward_exit_code(code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use clap::Parser;

    fn hash_args(argv: &[&str]) -> HashArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Hash(args) => args,
            _ => panic!("expected hash"),
        }
    }

    fn translated(argv: &[&str]) -> String {
        request(&hash_args(argv))
            .to_command()
            .unwrap()
            .translate()
            .to_string()
    }

    #[test]
    fn test_hash_files() {
        assert_eq!(
            translated(&["py7z", "hash", "-a", "md5", "a.bin", "b.bin"]),
            "h -ba -bd -bsp0 -scrcmd5 -- a.bin b.bin"
        );
    }

    #[test]
    fn test_hash_stdin_when_no_files() {
        assert_eq!(
            translated(&["py7z", "hash", "-v", "-p"]),
            "h -scrcsha256 -si"
        );
    }

    #[test]
    fn test_hash_archive_contents() {
        assert_eq!(
            translated(&["py7z", "hash", "-c", "-a", "crc32", "bundle.7z"]),
            "t -slt -ba -bd -bsp0 -scrccrc32 -- bundle.7z"
        );
    }

    #[test]
    fn test_archive_contents_needs_one_file() {
        let args = hash_args(&["py7z", "hash", "-c", "a.7z", "b.7z"]);
        assert!(request(&args).to_command().is_err());
    }
}
