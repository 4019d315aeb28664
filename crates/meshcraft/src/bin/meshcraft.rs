//! # MESHCRAFT Converter
//!
//! ```bash
//! meshcraft -i statue.obj -o statue.schematic -m 128
//! meshcraft --config job.toml --threads 8
//! RUST_LOG=debug meshcraft -i logo.png -o logo.schematic -m 64
//! ```

use std::process::ExitCode;

use meshcraft::{cli, convert, ConvertError};

fn main() -> ExitCode {
    meshcraft::init_logging();
    let program = std::env::args().next().unwrap_or_else(|| "meshcraft".into());

    let config = match cli::parse_args(std::env::args().skip(1)).and_then(cli::Command::into_config) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{}", cli::usage(&program));
            return ExitCode::SUCCESS;
        }
        Err(err) => return fail(&program, &err),
    };

    match convert(&config) {
        Ok(report) => {
            println!("Done. {report}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&program, &err),
    }
}

fn fail(program: &str, err: &ConvertError) -> ExitCode {
    eprintln!("error: {err}");
    if err.is_usage() {
        eprintln!();
        eprintln!("{}", cli::usage(program));
    }
    ExitCode::FAILURE
}
