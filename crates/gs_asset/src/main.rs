pub(crate) mod pack;
pub(crate) mod utils;

use anyhow::Result;
use gs_format::{load_frame, load_sequence, AnimationSequence, Frame, FormatError};
use log::info;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "gs_asset")]
struct CliArgs {
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Packs numbered frame files (`walk_1.obj`, `walk_2.obj`, ...) into an animation archive
    Pack {
        /// Folder containing the frame files
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Archive to write
        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: PathBuf,
        /// Pack without parsing the frames first
        #[structopt(long = "skip-checks")]
        skip_checks: bool,
    },
    /// Prints the frames and materials of an animation archive or a single frame file
    Inspect {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
}

/// Happens during setup or packing
#[derive(thiserror::Error, Debug)]
pub(crate) enum CliError {
    #[error("Input folder does not exist: {0}")]
    InputFolderNonExistant(String),
    #[error("No numbered frame files found in {0}")]
    NoFrames(String),
    #[error("Frame number {0} is used by more than one file")]
    DuplicateFrame(u32),
    #[error("Invalid frame {path}: {source}")]
    InvalidFrame {
        path: String,
        #[source]
        source: FormatError,
    },
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    match args.command {
        Command::Pack {
            input,
            output,
            skip_checks,
        } => {
            let count = pack::pack(&input, &output, skip_checks)?;
            println!("{} frames written to {}", count, output.display());
        }
        Command::Inspect { input } => inspect(&input)?,
    }

    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let is_frame = input
        .extension()
        .and_then(|x| x.to_str())
        .map_or(false, |x| x.eq_ignore_ascii_case("obj"));

    if is_frame {
        info!("Reading frame file {}", input.display());
        print_frame(0, &load_frame(input)?);
        return Ok(());
    }

    let sequence = load_sequence(input)?;
    print_sequence(&sequence);
    Ok(())
}

fn print_sequence(sequence: &AnimationSequence) {
    println!("{} frames", sequence.frame_count());
    for (index, frame) in sequence.frames().iter().enumerate() {
        print_frame(index, frame);
    }

    match sequence.validate() {
        Ok(()) => println!("consistent: yes"),
        Err(err) => println!("consistent: no ({})", err),
    }
}

fn print_frame(index: usize, frame: &Frame) {
    println!(
        "frame {}: `{}`, {} vertices, smooth shading {}",
        index,
        frame.name,
        frame.vertex_count(),
        if frame.smooth_shading { "on" } else { "off" }
    );
    for mesh in &frame.meshes {
        println!(
            "  {:<24} {:>6} triangles",
            if mesh.material.is_empty() {
                "(no material)"
            } else {
                &mesh.material
            },
            mesh.triangle_count()
        );
    }
}
