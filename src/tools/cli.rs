use std::ffi::OsString;
use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// File extension added by encode and removed by decode.
pub const EXTENSION: &str = "huf";

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Encode, Decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Encode/Decode
    pub op_mode: Mode,
    /// File to read
    pub input: PathBuf,
    /// File to write, derived from the input name when absent
    pub output: Option<PathBuf>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new(op_mode: Mode, input: impl Into<PathBuf>) -> Self {
        Self {
            op_mode,
            input: input.into(),
            output: None,
            force_overwrite: false,
            verbose: Verbosity::Warnings,
        }
    }

    /// Where the result goes. Encode appends `.huf` to the input name. Decode strips
    /// `.huf`, or appends `.out` when the input has some other name.
    pub fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        match self.op_mode {
            Mode::Encode => append_extension(&self.input, EXTENSION),
            Mode::Decode => match self.input.extension() {
                Some(ext) if ext == EXTENSION => self.input.with_extension(""),
                _ => append_extension(&self.input, "out"),
            },
        }
    }
}

fn append_extension(path: &std::path::Path, ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "huffzip",
    version,
    about = "A byte oriented Huffman file compressor",
    long_about = "
    Compresses any file with a single static Huffman code. The encoded file starts with the
    count of every byte value, so the decoder can rebuild the exact code tree without a copy
    of the original data."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,

    /// Suppress noncritical messages
    #[clap(short, long)]
    quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compress INPUT (writes INPUT.huf unless OUTPUT is given)
    Encode(FileArgs),
    /// Decompress INPUT (strips .huf unless OUTPUT is given)
    Decode(FileArgs),
}

#[derive(clap::Args, Debug)]
struct FileArgs {
    /// File to read
    #[clap(parse(from_os_str))]
    input: PathBuf,

    /// File to write
    #[clap(parse(from_os_str))]
    output: Option<PathBuf>,

    /// Force overwriting output file
    #[clap(short, long)]
    force: bool,
}

impl From<Cli> for HuffOpts {
    fn from(cli: Cli) -> Self {
        let (op_mode, files) = match cli.command {
            Command::Encode(files) => (Mode::Encode, files),
            Command::Decode(files) => (Mode::Decode, files),
        };
        let verbose = match (cli.quiet, cli.verbose) {
            (true, _) => Verbosity::Errors,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        Self {
            op_mode,
            input: files.input,
            output: files.output,
            force_overwrite: files.force,
            verbose,
        }
    }
}

/// Read the command line into HuffOpts and set the log level. Malformed command lines
/// print usage and exit with an error status.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Cli::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Reading from {}", opts.input.display());
    info!("Writing to {}", opts.output_path().display());
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> HuffOpts {
        HuffOpts::from(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn encode_args_test() {
        let opts = parse(&["huffzip", "encode", "notes.txt"]);
        assert_eq!(opts.op_mode, Mode::Encode);
        assert_eq!(opts.input, PathBuf::from("notes.txt"));
        assert_eq!(opts.output, None);
        assert!(!opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Warnings);
        assert_eq!(opts.output_path(), PathBuf::from("notes.txt.huf"));
    }

    #[test]
    fn decode_args_test() {
        let opts = parse(&["huffzip", "-vv", "decode", "notes.txt.huf", "plain.txt", "-f"]);
        assert_eq!(opts.op_mode, Mode::Decode);
        assert!(opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.output_path(), PathBuf::from("plain.txt"));
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(parse(&["huffzip", "-q", "encode", "a"]).verbose, Verbosity::Errors);
        assert_eq!(parse(&["huffzip", "-v", "encode", "a"]).verbose, Verbosity::Info);
        assert_eq!(parse(&["huffzip", "-vvvv", "encode", "a"]).verbose, Verbosity::Trace);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn default_output_test() {
        let opts = HuffOpts::new(Mode::Decode, "archive.huf");
        assert_eq!(opts.output_path(), PathBuf::from("archive"));
        let opts = HuffOpts::new(Mode::Decode, "archive.bin");
        assert_eq!(opts.output_path(), PathBuf::from("archive.bin.out"));
        let opts = HuffOpts::new(Mode::Encode, "archive.bin");
        assert_eq!(opts.output_path(), PathBuf::from("archive.bin.huf"));
    }

    #[test]
    fn bad_args_test() {
        assert!(Cli::try_parse_from(["huffzip"]).is_err());
        assert!(Cli::try_parse_from(["huffzip", "squash", "a"]).is_err());
        assert!(Cli::try_parse_from(["huffzip", "encode"]).is_err());
    }
}
