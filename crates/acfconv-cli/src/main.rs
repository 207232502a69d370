use acfconv::{encode, AcfFont, FontFace, PixelSize, Rasterizer};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, warn};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::console::render_preview;
mod console;

#[derive(Parser)]
#[command(
    name = "acfconv",
    about = "generate .acf font files from .ttf or .otf files",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,
    #[command(flatten)]
    convert: ConvertArgs,
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input filename
    #[arg(required = true)]
    filename: Option<PathBuf>,
    /// Output filename (default: input file stem + .acf)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Font size in pixels
    #[arg(short, long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    size: u16,
}

#[derive(Subcommand)]
enum Cmd {
    /// Inspect .acf font metadata
    Inspect { font: PathBuf },
    /// Render text with an .acf font as ASCII art
    Preview { font: PathBuf, text: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        None => convert(cli.convert),
        Some(Cmd::Inspect { font }) => {
            let f = load_acf(&font)?;
            println!("ACF font: {} {}", f.family_name(), f.style_name());
            println!("  Version: {}", f.metadata.version);
            println!("  Pixel format: {:?}", f.metadata.pixel_format);
            println!("  Height: {}px", f.height());
            println!("  Glyphs with bitmaps: {}/256", f.inked_count());
            Ok(())
        }
        Some(Cmd::Preview { font, text }) => {
            let f = load_acf(&font)?;
            println!("{}", render_preview(&f, &text));
            Ok(())
        }
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let filename = args.filename.context("missing input filename")?;
    let size = PixelSize::new(args.size.into())?;

    // Capability and font are checked before the output file exists.
    let rasterizer = Rasterizer::load()?;
    let mut face = rasterizer
        .open_face(&filename)
        .with_context(|| format!("failed to open font {}", filename.display()))?;

    let output = args.output.unwrap_or_else(|| default_output(&filename));
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    info!("converting {} -> {}", filename.display(), output.display());

    if let Err(e) = encode(&mut face, size, BufWriter::new(file)) {
        if let Err(rm) = fs::remove_file(&output) {
            warn!("could not remove incomplete {}: {rm}", output.display());
        }
        return Err(e).with_context(|| format!("failed to write {}", output.display()));
    }
    eprintln!(
        "Converted {} {} ({size}) -> {}",
        face.family_name(),
        face.style_name(),
        output.display()
    );
    Ok(())
}

/// Input file stem + `.acf`, relative to the working directory.
fn default_output(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("font"));
    name.push(".acf");
    PathBuf::from(name)
}

fn load_acf(path: &Path) -> Result<AcfFont> {
    AcfFont::load(path).with_context(|| format!("failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_output_uses_stem_in_cwd() {
        assert_eq!(
            default_output(Path::new("/fonts/Cantarell-Bold.ttf")),
            PathBuf::from("Cantarell-Bold.acf")
        );
        assert_eq!(
            default_output(Path::new("my.font.otf")),
            PathBuf::from("my.font.acf")
        );
    }

    #[test]
    fn size_defaults_to_16() {
        let cli = Cli::try_parse_from(["acfconv", "x.ttf"]).unwrap();
        assert_eq!(cli.convert.size, 16);
        assert!(cli.command.is_none());
    }

    #[test]
    fn size_must_be_positive() {
        assert!(Cli::try_parse_from(["acfconv", "x.ttf", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["acfconv", "x.ttf", "--size", "-3"]).is_err());
        let cli = Cli::try_parse_from(["acfconv", "x.ttf", "--size", "24", "-o", "y.acf"]).unwrap();
        assert_eq!(cli.convert.size, 24);
        assert_eq!(cli.convert.output, Some(PathBuf::from("y.acf")));
    }

    #[test]
    fn subcommands_parse_without_filename() {
        let cli = Cli::try_parse_from(["acfconv", "inspect", "a.acf"]).unwrap();
        assert!(matches!(cli.command, Some(Cmd::Inspect { .. })));
        assert!(Cli::try_parse_from(["acfconv"]).is_err());
    }
}
