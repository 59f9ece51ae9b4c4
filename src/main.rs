use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use voxel_map_rs::logger;
use voxel_map_rs::voxel_pipeline::{
    parse_map, preview_path_for, probe_dimensions, save_preview, ConversionConfig,
    ImageToVoxelPipeline, OutputFormat, WriteMode,
};

use tracing::{error, info};

#[derive(Parser)]
#[command(version, about = "Convert images into land/water voxel map tables")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image to mapData next to it
    Convert(ConvertArgs),
    /// Parse an existing map file and print its size
    Inspect {
        /// Path to a mapData.txt / mapData.lua file
        map: PathBuf,
    },
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Source image (png, jpeg, bmp, gif, tiff, ...)
    image: PathBuf,

    /// Largest allowed grid width or height
    #[arg(short = 'm', long, default_value_t = 100)]
    max_dim: u32,

    /// Output file flavour
    #[arg(short, long, value_enum, default_value_t = FormatArg::Txt)]
    format: FormatArg,

    /// Write through a temp file and rename
    #[arg(long)]
    atomic: bool,

    /// Also save mapPreview.png next to the image
    #[arg(long)]
    preview: bool,

    /// Pixels per cell in the preview
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=64))]
    preview_scale: u32,

    /// Print per-stage timings
    #[arg(long)]
    timings: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Lua,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => OutputFormat::Text,
            FormatArg::Lua => OutputFormat::Lua,
        }
    }
}

fn run_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let (width, height) = probe_dimensions(&args.image)?;
    info!("Loaded {} ({}x{} pixels)", args.image.display(), width, height);

    let config = ConversionConfig::builder()
        .max_dimension(args.max_dim)
        .format(args.format.into())
        .write_mode(if args.atomic { WriteMode::Atomic } else { WriteMode::Direct })
        .build();
    let pipeline = ImageToVoxelPipeline::new(config);

    let (report, map, timings) = pipeline
        .convert_file_with_map(&args.image)
        .with_context(|| format!("converting {}", args.image.display()))?;

    info!("Created: {}", report.output_path.display());
    info!("Final map size: {}x{}", report.width, report.height);
    info!("Total voxels: {}", report.voxel_count);

    if args.preview {
        let preview_path = preview_path_for(&args.image);
        save_preview(&map.grid, &preview_path, args.preview_scale)?;
        info!("Preview: {}", preview_path.display());
    }

    if args.timings {
        timings.print_summary();
    }

    Ok(())
}

fn run_inspect(map: PathBuf) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&map)
        .with_context(|| format!("reading {}", map.display()))?;
    let grid = parse_map(&text).with_context(|| format!("parsing {}", map.display()))?;

    println!(
        "{}: {}x{}, {} land / {} cells",
        map.display(),
        grid.width(),
        grid.height(),
        grid.land_count(),
        grid.cell_count()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    let result = match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Inspect { map } => run_inspect(map),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
