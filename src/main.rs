use clap::{Parser, Subcommand, ValueEnum};
use rasterbox::imaging::{Components, Image, ResizeFilter};
use rasterbox::output::{self, ConvertOutcome, ImageInfo};
use rasterbox::{config, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rasterbox")]
#[command(about = "Inspect and transform raster images")]
#[command(long_about = "\
Inspect and transform raster images

Every transform reads an input file, applies one operation and writes the
result. The output format follows the output file extension; inputs are
identified by content.

Pixel layouts (bits per pixel):
  8   gray
  16  gray + alpha
  24  RGB
  32  RGBA

Run 'rasterbox gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    /// Top row becomes the bottom row
    Vertical,
    /// Left column becomes the right column
    Horizontal,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print dimensions and pixel layout of an image
    Info {
        path: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the RGBA value of one pixel
    Pixel { path: PathBuf, x: u32, y: u32 },
    /// Change the number of color components
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Target component count: 1, 2, 3 or 4
        #[arg(long)]
        components: Components,
    },
    /// Mirror an image along an axis
    Flip {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum)]
        axis: Axis,
    },
    /// Resample to exact dimensions
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// nearest, bilinear or bicubic (default from config)
        #[arg(long)]
        filter: Option<ResizeFilter>,
    },
    /// Copy a source image onto a destination at an offset, clipping overflow
    Blit {
        dest: PathBuf,
        source: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        x: u32,
        #[arg(long, default_value_t = 0)]
        y: u32,
    },
    /// Write a zero-filled canvas
    Blank {
        output: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// 8, 16, 24 or 32 (default from config)
        #[arg(long)]
        bits_per_pixel: Option<u32>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config_dir)?;
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        Command::Info { path, json } => {
            let info = ImageInfo::of(&Image::open(&path)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                output::print_info(&info);
            }
        }
        Command::Pixel { path, x, y } => {
            let image = Image::open(&path)?;
            println!("{}", output::format_pixel(x, y, image.get(x, y)?));
        }
        Command::Convert {
            input,
            output,
            components,
        } => {
            let image = Image::open(&input)?;
            let converted = image.convert(components)?;
            converted.save(&output)?;
            let outcome = ConvertOutcome {
                from: image.components(),
                requested: components,
                result: converted.components(),
            };
            output::print_lines(&output::format_convert(&input, &output, &outcome));
        }
        Command::Flip {
            input,
            output,
            axis,
        } => {
            let image = Image::open(&input)?;
            let flipped = match axis {
                Axis::Vertical => image.flip_vertical(),
                Axis::Horizontal => image.flip_horizontal(),
            };
            flipped.save(&output)?;
            output::print_lines(&output::format_flip(&input, &output, axis.name()));
        }
        Command::Resize {
            input,
            output,
            width,
            height,
            filter,
        } => {
            let filter = filter.unwrap_or(config.defaults.filter);
            let mut image = Image::open(&input)?;
            let from = image.size();
            image.resize(width, height, filter)?;
            image.save(&output)?;
            output::print_lines(&output::format_resize(
                &input,
                &output,
                from,
                (width, height),
                filter,
            ));
        }
        Command::Blit {
            dest,
            source,
            output,
            x,
            y,
        } => {
            let mut canvas = Image::open(&dest)?;
            let stamp = Image::open(&source)?;
            canvas.blit(&stamp, x, y)?;
            canvas.save(&output)?;
            output::print_lines(&output::format_blit(
                &dest,
                &source,
                &output,
                (x, y),
                stamp.size(),
            ));
        }
        Command::Blank {
            output,
            width,
            height,
            bits_per_pixel,
        } => {
            let bits = bits_per_pixel.unwrap_or(config.defaults.bits_per_pixel);
            let image = Image::blank(width, height, bits)?;
            image.save(&output)?;
            output::print_lines(&output::format_blank(&output, &image));
        }
        Command::GenConfig => unreachable!("handled before config is loaded"),
    }

    Ok(())
}
