//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use py7z_core::listing::EntryKind;
use py7z_core::translate::ArchiveFormat;
use py7z_core::translate::CompressionLevel;
use py7z_core::translate::CompressionMethod;
use py7z_core::translate::ConsoleCharset;
use py7z_core::translate::DictionarySize;
use py7z_core::translate::HashAlgorithm;
use py7z_core::translate::ListfileCharset;
use py7z_core::translate::OverwriteMode;
use py7z_core::translate::SolidBlockSize;
use py7z_core::translate::ThreadCount;
use py7z_core::translate::Timestamp;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "py7z")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_override_self = true)]
#[command(after_help = "Set PY7Z_7Z_PATH to use a specific 7-Zip executable.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add files to an archive
    #[command(visible_alias = "a")]
    Add(ArchiveArgs),
    /// Extract files from an archive with full paths
    #[command(visible_alias = "x")]
    Extract(ArchiveArgs),
    /// List archive contents in a script-friendly form
    #[command(visible_alias = "list")]
    Ls(ListArgs),
    /// Hash files, or the files inside an archive
    Hash(HashArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `add` and `extract`.
///
/// Every option is forwarded as one 7-Zip switch, in the order given on the
/// command line.
#[derive(Debug, clap::Args)]
pub struct ArchiveArgs {
    /// Archive type (7z, xz, bzip2, gzip, tar, zip, wim)
    #[arg(short = 't', long, value_name = "FORMAT")]
    pub archive_format: Option<ArchiveFormat>,

    /// Compression method (copy, deflate, deflate64, bzip2, lzma, lzma2, ppmd)
    #[arg(short = 'm', long, value_name = "METHOD")]
    pub compression_method: Option<CompressionMethod>,

    /// Compression level (0, 1, 3, 5, 7, 9)
    #[arg(short = 'c', long, value_name = "LEVEL")]
    pub compression_level: Option<CompressionLevel>,

    /// Number of CPU threads (off, on or a count)
    #[arg(long, value_name = "N")]
    pub num_threads: Option<ThreadCount>,

    /// Timestamps to store (access, creation, modified), comma separated
    #[arg(long, value_name = "TIMESTAMP", value_delimiter = ',')]
    pub store_timestamps: Vec<Timestamp>,

    /// Compress the archive header
    #[arg(long, overrides_with = "no_compress_header")]
    pub compress_header: bool,

    /// Do not compress the archive header
    #[arg(long, overrides_with = "compress_header")]
    pub no_compress_header: bool,

    /// Encrypt the archive header (needs a password)
    #[arg(long, overrides_with = "no_encrypt_header")]
    pub encrypt_header: bool,

    /// Do not encrypt the archive header
    #[arg(long, overrides_with = "encrypt_header")]
    pub no_encrypt_header: bool,

    /// Solid block size (none, solid or N[bkmgt])
    #[arg(long, value_name = "SIZE")]
    pub solid_block_size: Option<SolidBlockSize>,

    /// Dictionary size (N[bkmgt])
    #[arg(long, value_name = "SIZE")]
    pub dictionary_size: Option<DictionarySize>,

    /// Delete source files once they are in the archive
    #[arg(long)]
    pub delete_after_compression: bool,

    /// Read data from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Write data to standard output
    #[arg(long)]
    pub stdout: bool,

    /// Increase 7-Zip's log level (repeat up to 3 times)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Show the progress indicator
    #[arg(long, overrides_with = "no_progress")]
    pub progress: bool,

    /// Hide the progress indicator
    #[arg(long, overrides_with = "progress")]
    pub no_progress: bool,

    /// Store symbolic links as links
    #[arg(long)]
    pub store_symlinks: bool,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long, overrides_with = "no_recurse")]
    pub recurse: bool,

    /// Do not recurse into subdirectories
    #[arg(long, overrides_with = "recurse")]
    pub no_recurse: bool,

    /// Include files matching a wildcard, or listed in @FILE (repeatable)
    #[arg(short = 'i', long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Include matching files in all subdirectories (repeatable)
    #[arg(short = 'I', long, value_name = "PATTERN")]
    pub include_recursive: Vec<String>,

    /// Exclude files matching a wildcard, or listed in @FILE (repeatable)
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Exclude matching files in all subdirectories (repeatable)
    #[arg(short = 'X', long, value_name = "PATTERN")]
    pub exclude_recursive: Vec<String>,

    /// Do not treat the first file operand as the archive name
    #[arg(long)]
    pub ignore_archive_name: bool,

    /// Console charset (utf-8, win, dos)
    #[arg(long, value_name = "CHARSET")]
    pub console_charset: Option<ConsoleCharset>,

    /// Charset of list files (utf-8, utf-16le, utf-16be, win, dos)
    #[arg(long, value_name = "CHARSET")]
    pub listfile_charset: Option<ListfileCharset>,

    /// Treat file operands literally, without wildcards
    #[arg(long)]
    pub no_wildcards: bool,

    /// Stop if an input file cannot be opened
    #[arg(long)]
    pub fail_on_bad_file: bool,

    /// Overwrite mode (yes, skip-existing, rename-extracted, rename-existing)
    #[arg(long, value_name = "MODE")]
    pub overwrite: Option<OverwriteMode>,

    /// Archive password
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Pass a native 7-Zip switch through unchanged (repeatable)
    #[arg(long = "pass", value_name = "SWITCH", allow_hyphen_values = true)]
    pub pass: Vec<OsString>,

    /// Archive to create, update or read
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Files, directories or wildcards inside the archive
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show type, attributes, date and sizes, tab separated
    #[arg(short, long, conflicts_with = "null")]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    /// Output results in JSON format
    #[arg(short, long, conflicts_with_all = ["long", "null"])]
    pub json: bool,

    /// Terminate paths with NUL instead of newline
    #[arg(short = '0', long)]
    pub null: bool,

    /// Only list entries matching a wildcard, in any directory (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Skip entries matching a wildcard, in any directory (repeatable)
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Password for archives with encrypted headers
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Only list entries of this type (file, dir)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<EntryKind>,

    /// Show 7-Zip's own listing unchanged and forward its exit code
    #[arg(long, conflicts_with_all = ["long", "json", "null", "kind", "human_readable"])]
    pub raw: bool,
}

#[derive(Debug, clap::Args)]
pub struct HashArgs {
    /// Hash algorithm (blake2sp, crc32, crc64, md5, sha1, sha256, sha384,
    /// sha512, sha3-256, xxh64)
    #[arg(short, long, value_name = "ALGORITHM", default_value = "sha256")]
    pub algorithm: HashAlgorithm,

    /// Keep 7-Zip's table output instead of bare hashes
    #[arg(short, long)]
    pub verbose: bool,

    /// Show the progress indicator
    #[arg(short, long)]
    pub progress: bool,

    /// Hash the files inside the single archive given
    #[arg(short = 'c', long)]
    pub archive_contents: bool,

    /// Files to hash (standard input when omitted)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_alias() {
        let cli = parse(&["py7z", "a", "out.7z", "docs"]);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.archive, PathBuf::from("out.7z"));
                assert_eq!(args.files, [PathBuf::from("docs")]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_invalid_format_is_usage_error() {
        let err = Cli::try_parse_from(["py7z", "add", "-t", "rar", "out.7z"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("rar"));
    }

    #[test]
    fn test_invalid_thread_count_is_usage_error() {
        let result = Cli::try_parse_from(["py7z", "add", "--num-threads", "-1", "out.7z"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_store_timestamps_comma_list() {
        let cli = parse(&["py7z", "add", "--store-timestamps", "access,modified", "o.7z"]);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.store_timestamps, [Timestamp::Access, Timestamp::Modified]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_last_toggle_wins() {
        let cli = parse(&["py7z", "add", "--compress-header", "--no-compress-header", "o.7z"]);
        match cli.command {
            Commands::Add(args) => {
                assert!(!args.compress_header);
                assert!(args.no_compress_header);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_repeated_options_are_accepted() {
        let cli = parse(&["py7z", "x", "-r", "-r", "-t", "zip", "-t", "7z", "a.7z"]);
        match cli.command {
            Commands::Extract(args) => {
                assert!(args.recurse);
                assert_eq!(args.archive_format, Some(ArchiveFormat::SevenZ));
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_pass_accepts_hyphen_values() {
        let cli = parse(&["py7z", "x", "--pass", "-mmt=2", "--pass", "-y", "a.7z"]);
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.pass, [OsString::from("-mmt=2"), OsString::from("-y")]);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_ls_type_filter() {
        let cli = parse(&["py7z", "ls", "--type", "dir", "a.7z"]);
        match cli.command {
            Commands::Ls(args) => assert_eq!(args.kind, Some(EntryKind::Directory)),
            _ => panic!("expected ls"),
        }
    }

    #[test]
    fn test_ls_json_conflicts_with_long() {
        assert!(Cli::try_parse_from(["py7z", "ls", "--json", "--long", "a.7z"]).is_err());
    }

    #[test]
    fn test_ls_raw_conflicts_with_formatting() {
        assert!(Cli::try_parse_from(["py7z", "ls", "--raw", "--json", "a.7z"]).is_err());
        assert!(Cli::try_parse_from(["py7z", "ls", "--raw", "--type", "dir", "a.7z"]).is_err());
        let cli = parse(&["py7z", "ls", "--raw", "-i", "*.txt", "a.7z"]);
        assert!(matches!(cli.command, Commands::Ls(ListArgs { raw: true, .. })));
    }

    #[test]
    fn test_hash_defaults_to_sha256() {
        let cli = parse(&["py7z", "hash", "file.bin"]);
        match cli.command {
            Commands::Hash(args) => {
                assert_eq!(args.algorithm, HashAlgorithm::Sha256);
                assert!(!args.archive_contents);
            }
            _ => panic!("expected hash"),
        }
    }
}
