//! List command implementation

use super::forward_exit_code;
use crate::cli::ListArgs;
use crate::output::ListStyle;
use crate::output::create_formatter;
use anyhow::Context;
use anyhow::Result;
use py7z_core::ListRequest;
use py7z_core::Runner;
use py7z_core::list_archive;
use py7z_core::run_command;
use std::process::ExitCode;

const fn style(args: &ListArgs) -> ListStyle {
    if args.long {
        ListStyle::Long
    } else if args.null {
        ListStyle::NullTerminated
    } else {
        ListStyle::Names
    }
}

fn request(args: &ListArgs) -> ListRequest {
    ListRequest {
        archive: args.archive.clone(),
        include: args.include.clone(),
        exclude: args.exclude.clone(),
        password: args.password.clone(),
        kind: args.kind,
    }
}

pub fn execute<R: Runner + ?Sized>(args: &ListArgs, runner: &R) -> Result<ExitCode> {
    if args.raw {
        let code = run_command(runner, &request(args).to_command())
            .with_context(|| format!("failed to list '{}'", args.archive.display()))?;
        return Ok(forward_exit_code(code));
    }

    let formatter = create_formatter(args.json, style(args), args.human_readable);

    let listing = match list_archive(runner, &request(args))
        .with_context(|| format!("failed to list '{}'", args.archive.display()))
    {
        Ok(listing) => listing,
        Err(err) => {
            formatter.format_failure("list", &err)?;
            return Err(err);
        }
    };

    formatter.format_listing(&listing)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use clap::Parser;
    use py7z_core::listing::EntryKind;

    fn list_args(argv: &[&str]) -> ListArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Ls(args) => args,
            _ => panic!("expected ls"),
        }
    }

    #[test]
    fn test_style_selection() {
        assert_eq!(style(&list_args(&["py7z", "ls", "a.7z"])), ListStyle::Names);
        assert_eq!(style(&list_args(&["py7z", "ls", "-l", "a.7z"])), ListStyle::Long);
        assert_eq!(
            style(&list_args(&["py7z", "ls", "-0", "a.7z"])),
            ListStyle::NullTerminated
        );
    }

    #[test]
    fn test_request_carries_filters() {
        let args = list_args(&[
            "py7z", "ls", "-i", "*.txt", "-x", "tmp/*", "--type", "file", "-p", "pw", "a.7z",
        ]);
        let request = request(&args);
        assert_eq!(request.include, ["*.txt"]);
        assert_eq!(request.exclude, ["tmp/*"]);
        assert_eq!(request.password.as_deref(), Some("pw"));
        assert_eq!(request.kind, Some(EntryKind::File));
        assert_eq!(
            request.to_command().translate().to_string(),
            "l -bd -sccUTF-8 -ir!*.txt -xr!tmp/* -ppw -- a.7z"
        );
    }
}
