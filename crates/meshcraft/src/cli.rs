//! Command-line parsing for the `meshcraft` binary.

use std::path::PathBuf;

use meshcraft_io::Compression;
use tracing::warn;

use crate::config::ConvertConfig;
use crate::error::{ConvertError, ConvertResult};

/// Usage text, with the program name substituted for `{program}`.
pub const USAGE: &str = "\
usage: {program} -i <input> -o <output> [-m <max-extent>] [options]
  where
    input      : The .OBJ or image file to import.
    output     : The voxelized .schematic file to export.
    max-extent : The maximum number of blocks on any axis (1-256).

options:
  --config <file>        TOML settings; flags override it
  --palette <file>       TOML palette table (default: wool)
  --threads <n>          rasterizer threads (default: all cores)
  --compression <kind>   gzip | none (default: gzip)
  -h, --help             print this text";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit successfully.
    Help,
    /// Convert with flags merged over an optional config file.
    Convert {
        /// `--config` file, if any.
        config_file: Option<PathBuf>,
        /// Settings given as flags.
        overrides: ConvertConfig,
    },
}

impl Command {
    /// Loads the config file (if any) and merges the flags over it.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be read or parsed.
    pub fn into_config(self) -> ConvertResult<Option<ConvertConfig>> {
        match self {
            Self::Help => Ok(None),
            Self::Convert {
                config_file,
                overrides,
            } => {
                let base = match config_file {
                    Some(path) => ConvertConfig::load(&path)?,
                    None => ConvertConfig::default(),
                };
                Ok(Some(base.merge(overrides)))
            }
        }
    }
}

/// Renders [`USAGE`] for `program`.
#[must_use]
pub fn usage(program: &str) -> String {
    USAGE.replace("{program}", program)
}

/// Parses arguments, excluding the program name.
///
/// Unknown arguments are logged and skipped.
///
/// # Errors
///
/// [`ConvertError::Usage`] if a flag lacks its value or the value does not
/// parse.
pub fn parse_args<I>(args: I) -> ConvertResult<Command>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into);
    let mut config_file = None;
    let mut overrides = ConvertConfig::default();

    while let Some(arg) = args.next() {
        let flag = arg.as_str();
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| ConvertError::Usage(format!("missing value for {flag}")))
        };

        match flag {
            "-i" | "--input" => overrides.input = Some(value(flag)?.into()),
            "-o" | "--output" | "--outputSchematic" => overrides.output = Some(value(flag)?.into()),
            "-m" | "--maxEdge" | "--maxExtent" => {
                overrides.max_extent = Some(number(flag, &value(flag)?)?);
            }
            "--threads" => overrides.threads = Some(number(flag, &value(flag)?)?),
            "--palette" => overrides.palette = Some(value(flag)?.into()),
            "--config" => config_file = Some(PathBuf::from(value(flag)?)),
            "--compression" => {
                overrides.compression = Some(match value(flag)?.as_str() {
                    "gzip" => Compression::Gzip,
                    "none" => Compression::None,
                    other => {
                        return Err(ConvertError::Usage(format!(
                            "unknown compression '{other}' (expected gzip or none)"
                        )))
                    }
                });
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => warn!("argument ignored: {arg}"),
        }
    }

    Ok(Command::Convert {
        config_file,
        overrides,
    })
}

fn number<T: std::str::FromStr>(flag: &str, text: &str) -> ConvertResult<T> {
    text.parse()
        .map_err(|_| ConvertError::Usage(format!("{flag} expects a number, got '{text}'")))
}
