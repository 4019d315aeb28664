//! # Schematic Dump
//!
//! Prints the tag tree of a schematic file (gzip or raw) in debug notation.
//!
//! ```bash
//! schematic_dump statue.schematic
//! ```

use std::path::Path;
use std::process::ExitCode;

use meshcraft_io::load_tree;

fn main() -> ExitCode {
    meshcraft::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let [_, path] = args.as_slice() else {
        eprintln!("Usage: schematic_dump <file.schematic>");
        return ExitCode::FAILURE;
    };

    match load_tree(Path::new(path)) {
        Ok(tag) => {
            println!("{tag}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {path}: {err}");
            ExitCode::FAILURE
        }
    }
}
