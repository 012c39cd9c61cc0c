//! Turn a binary image into a heightmap.
//! Usage: `make-heightmap [input] [output] [params]`
//! - `input`  (optional): image to threshold. Defaults to `depth.jpg`.
//! - `output` (optional): PNG to write. Defaults to `heightmap.png`.
//! - `params` (optional): JSON file with any of the `HeightmapParams` fields.
//!
//! Set `RUST_LOG=debug` to follow the pipeline stages.

use heightmap_skeleton::prelude::*;
use std::error::Error;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        eprintln!("error: {}", error);

        let mut source = error.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }

        std::process::exit(1);
    }
}

fn run() -> HeightmapResult<()> {
    let mut args = std::env::args_os().skip(1);
    let input = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("depth.jpg"));
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("heightmap.png"));

    let params = match args.next() {
        Some(path) => HeightmapParams::from_json_file(PathBuf::from(path))?,
        None => HeightmapParams::default(),
    };

    log::info!("input {}, output {}", input.display(), output.display());
    log::debug!("{:?}", params);

    convert_file(&input, &output, &params)?;

    log::info!("wrote {}", output.display());
    Ok(())
}
