//! Add and extract command implementation.
//!
//! Both commands forward every option as a 7-Zip switch. clap groups values
//! by option, so the original command-line order is recovered from the
//! argument indices before translation.

use super::forward_exit_code;
use crate::cli::ArchiveArgs;
use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use py7z_core::Runner;
use py7z_core::run_command;
use py7z_core::translate::CommandSpec;
use py7z_core::translate::Filter;
use py7z_core::translate::FilterKind;
use py7z_core::translate::Flag;
use py7z_core::translate::Operation;
use py7z_core::translate::Switch;
use std::process::ExitCode;
use tracing::debug;

/// Flags tagged with the command-line index they came from.
struct OrderedFlags<'a> {
    matches: &'a ArgMatches,
    flags: Vec<(usize, Flag)>,
}

impl<'a> OrderedFlags<'a> {
    const fn new(matches: &'a ArgMatches) -> Self {
        Self {
            matches,
            flags: Vec::new(),
        }
    }

    fn single(&mut self, id: &str, switch: Option<Switch>) {
        if let Some(switch) = switch {
            let index = self.matches.index_of(id).unwrap_or(usize::MAX);
            self.flags.push((index, Flag::Known(switch)));
        }
    }

    fn set(&mut self, id: &str, on: bool, switch: Switch) {
        self.single(id, on.then_some(switch));
    }

    fn toggle(&mut self, on_id: &str, off_id: &str, on: bool, off: bool, make: fn(bool) -> Switch) {
        if on {
            self.single(on_id, Some(make(true)));
        } else if off {
            self.single(off_id, Some(make(false)));
        }
    }

    fn each<I>(&mut self, id: &str, flags: I)
    where
        I: IntoIterator<Item = Flag>,
    {
        let mut indices = self.matches.indices_of(id).into_iter().flatten();
        for flag in flags {
            let index = indices.next().unwrap_or(usize::MAX);
            self.flags.push((index, flag));
        }
    }

    /// Like [`Self::each`], but a switch already collected is not repeated.
    fn each_unique<I>(&mut self, id: &str, switches: I)
    where
        I: IntoIterator<Item = Switch>,
    {
        let mut indices = self.matches.indices_of(id).into_iter().flatten();
        let mut seen = Vec::new();
        for switch in switches {
            let index = indices.next().unwrap_or(usize::MAX);
            if !seen.contains(&switch) {
                seen.push(switch.clone());
                self.flags.push((index, Flag::Known(switch)));
            }
        }
    }

    fn filters(&mut self, id: &str, patterns: &[String], kind: FilterKind, recursive: bool) {
        self.each(
            id,
            patterns
                .iter()
                .map(|p| Flag::Known(Switch::Filter(Filter::new(kind, recursive, p.as_str())))),
        );
    }

    fn into_sorted(mut self) -> Vec<Flag> {
        self.flags.sort_by_key(|(index, _)| *index);
        self.flags.into_iter().map(|(_, flag)| flag).collect()
    }
}

/// Collects friendly options and `--pass` switches in command-line order.
///
/// `matches` must be the subcommand's matches that produced `args`.
pub fn collect_flags(args: &ArchiveArgs, matches: &ArgMatches) -> Vec<Flag> {
    let mut flags = OrderedFlags::new(matches);

    flags.single("archive_format", args.archive_format.map(Switch::ArchiveFormat));
    flags.single(
        "compression_method",
        args.compression_method.map(Switch::CompressionMethod),
    );
    flags.single(
        "compression_level",
        args.compression_level.map(Switch::CompressionLevel),
    );
    flags.single("num_threads", args.num_threads.map(Switch::Threads));
    flags.each_unique(
        "store_timestamps",
        args.store_timestamps.iter().copied().map(Switch::StoreTimestamp),
    );
    flags.toggle(
        "compress_header",
        "no_compress_header",
        args.compress_header,
        args.no_compress_header,
        Switch::CompressHeader,
    );
    flags.toggle(
        "encrypt_header",
        "no_encrypt_header",
        args.encrypt_header,
        args.no_encrypt_header,
        Switch::EncryptHeader,
    );
    flags.single(
        "solid_block_size",
        args.solid_block_size.clone().map(Switch::SolidBlockSize),
    );
    flags.single(
        "dictionary_size",
        args.dictionary_size.clone().map(Switch::DictionarySize),
    );
    flags.set(
        "delete_after_compression",
        args.delete_after_compression,
        Switch::DeleteAfterCompression,
    );
    flags.set("stdin", args.stdin, Switch::ReadFromStdin);
    flags.set("stdout", args.stdout, Switch::WriteToStdout);
    flags.set("verbose", args.verbose > 0, Switch::Verbosity(args.verbose));
    flags.toggle(
        "progress",
        "no_progress",
        args.progress,
        args.no_progress,
        Switch::Progress,
    );
    flags.set("store_symlinks", args.store_symlinks, Switch::StoreSymlinks);
    flags.single("out_dir", args.out_dir.clone().map(Switch::OutputDir));
    flags.toggle(
        "recurse",
        "no_recurse",
        args.recurse,
        args.no_recurse,
        Switch::Recurse,
    );
    flags.filters("include", &args.include, FilterKind::Include, false);
    flags.filters(
        "include_recursive",
        &args.include_recursive,
        FilterKind::Include,
        true,
    );
    flags.filters("exclude", &args.exclude, FilterKind::Exclude, false);
    flags.filters(
        "exclude_recursive",
        &args.exclude_recursive,
        FilterKind::Exclude,
        true,
    );
    flags.set(
        "ignore_archive_name",
        args.ignore_archive_name,
        Switch::IgnoreArchiveName,
    );
    flags.single("console_charset", args.console_charset.map(Switch::ConsoleCharset));
    flags.single(
        "listfile_charset",
        args.listfile_charset.map(Switch::ListfileCharset),
    );
    flags.set("no_wildcards", args.no_wildcards, Switch::DisableWildcards);
    flags.set("fail_on_bad_file", args.fail_on_bad_file, Switch::FailOnBadFile);
    flags.single("overwrite", args.overwrite.map(Switch::Overwrite));
    flags.single("password", args.password.clone().map(Switch::Password));
    flags.each("pass", args.pass.iter().cloned().map(Flag::Unknown));

    flags.into_sorted()
}

/// Builds the full command for `operation` from parsed arguments.
pub fn build_command(operation: Operation, args: &ArchiveArgs, matches: &ArgMatches) -> CommandSpec {
    collect_flags(args, matches)
        .into_iter()
        .fold(CommandSpec::new(operation), CommandSpec::with_flag)
        .with_operand(args.archive.clone())
        .with_operands(args.files.iter().cloned())
}

/// Runs 7-Zip with live standard streams and forwards its exit code.
pub fn execute<R: Runner + ?Sized>(
    operation: Operation,
    args: &ArchiveArgs,
    matches: &ArgMatches,
    runner: &R,
) -> Result<ExitCode> {
    let spec = build_command(operation, args, matches);
    debug!(operation = %operation, flags = spec.flags.len(), "translated command");

    let code = run_command(runner, &spec)
        .with_context(|| format!("failed to run 7-Zip on '{}'", args.archive.display()))?;
    Ok(forward_exit_code(code))
}
