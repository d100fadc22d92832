use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use hickory::utils::columns::{read_columns, Columns};
use hickory::{plot, plot_hist, AxisOptions, BackendResolver, HistArgs, PlotArgs, Scale};

#[derive(Parser)]
#[command(name = "hickory")]
#[command(
    about = "Plot numeric column files",
    long_about = "Plot columns of a whitespace- or comma-separated numeric file as points, error bars or a histogram, to an image file or an interactive viewer."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plot one column against another
    Plot {
        /// Input file with numeric columns. Lines starting with '#' are skipped.
        file: PathBuf,
        /// 1-based column for x. Defaults to 1, or the row number for single-column input.
        #[arg(short = 'x', long = "xcol")]
        x: Option<usize>,
        /// 1-based column for y. Defaults to 2, or 1 for single-column input.
        #[arg(short = 'y', long = "ycol")]
        y: Option<usize>,
        /// 1-based column of symmetric x errors
        #[arg(long)]
        xerr: Option<usize>,
        /// 1-based column of symmetric y errors
        #[arg(long)]
        yerr: Option<usize>,
        #[arg(long)]
        xlabel: Option<String>,
        #[arg(long)]
        ylabel: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Logarithmic x axis
        #[arg(long)]
        xlog: bool,
        /// Logarithmic y axis
        #[arg(long)]
        ylog: bool,
        /// Legend label for the series
        #[arg(long)]
        label: Option<String>,
        /// Output image; the format follows the extension (svg, png, jpg, bmp, tif)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show in an interactive viewer, also when writing a file
        #[arg(long)]
        show: bool,
        /// Raster resolution
        #[arg(long)]
        dpi: Option<f64>,
    },
    /// Histogram one column
    Hist {
        /// Input file with numeric columns. Lines starting with '#' are skipped.
        file: PathBuf,
        /// 1-based column to histogram
        #[arg(short, long, default_value_t = 1)]
        column: usize,
        /// Number of bins
        #[arg(long, conflicts_with = "binsize")]
        bins: Option<usize>,
        /// Bin width
        #[arg(long)]
        binsize: Option<f64>,
        #[arg(long)]
        xlabel: Option<String>,
        /// Output image; the format follows the extension (svg, png, jpg, bmp, tif)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show in an interactive viewer, also when writing a file
        #[arg(long)]
        show: bool,
        /// Raster resolution
        #[arg(long)]
        dpi: Option<f64>,
    },
    /// Probe and print the display backend
    Backend,
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(2);
            }
        }
    }
    log_builder.init();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Plot {
            file,
            x,
            y,
            xerr,
            yerr,
            xlabel,
            ylabel,
            title,
            xlog,
            ylog,
            label,
            output,
            show,
            dpi,
        } => {
            let data = read_columns(&file)?;
            if data.is_empty() {
                bail!("No data rows in {}", file.display());
            }
            let (xs, ys) = select_xy(&data, x, y)?;

            let mut axis = AxisOptions::new();
            if let Some(xlabel) = xlabel {
                axis = axis.xlabel(xlabel);
            }
            if let Some(ylabel) = ylabel {
                axis = axis.ylabel(ylabel);
            }
            if let Some(title) = title {
                axis = axis.title(title);
            }
            if xlog {
                axis = axis.xscale(Scale::Log);
            }
            if ylog {
                axis = axis.yscale(Scale::Log);
            }

            let mut args = PlotArgs::new().axis(axis);
            if let Some(col) = xerr {
                args = args.xerr(column(&data, col)?);
            }
            if let Some(col) = yerr {
                args = args.yerr(column(&data, col)?);
            }
            if let Some(label) = label {
                args = args.label(label);
            }
            if let Some(ref output) = output {
                args = args.file(output);
            }
            if show {
                args = args.show(true);
            }
            if let Some(dpi) = dpi {
                args = args.dpi(dpi);
            }

            plot(xs, ys, args).context("Plotting failed")?;
            if let Some(output) = output {
                info!("Plot written to {}", output.display());
            }
        }
        Commands::Hist {
            file,
            column: col,
            bins,
            binsize,
            xlabel,
            output,
            show,
            dpi,
        } => {
            let data = read_columns(&file)?;
            let values = column(&data, col)?;

            let mut axis = AxisOptions::new().ylabel("count");
            if let Some(xlabel) = xlabel {
                axis = axis.xlabel(xlabel);
            }
            let mut args = HistArgs::new().axis(axis);
            if let Some(bins) = bins {
                args = args.bins(bins);
            }
            if let Some(binsize) = binsize {
                args = args.binsize(binsize);
            }
            if let Some(ref output) = output {
                args = args.file(output);
            }
            if show {
                args = args.show(true);
            }
            if let Some(dpi) = dpi {
                args = args.dpi(dpi);
            }

            plot_hist(values, args).context("Histogram failed")?;
            if let Some(output) = output {
                info!("Histogram written to {}", output.display());
            }
        }
        Commands::Backend => {
            let resolver = BackendResolver::global();
            println!("{}", resolver.resolve());
        }
    }
    Ok(())
}

/// 1-based column lookup.
fn column(data: &Columns, col: usize) -> Result<Vec<f64>> {
    if col == 0 {
        bail!("Columns are numbered from 1");
    }
    Ok(data.column(col - 1)?.to_vec())
}

fn select_xy(data: &Columns, x: Option<usize>, y: Option<usize>) -> Result<(Vec<f64>, Vec<f64>)> {
    if data.width() == 1 && x.is_none() {
        let ys = column(data, y.unwrap_or(1))?;
        let xs = (1..=ys.len()).map(|i| i as f64).collect();
        return Ok((xs, ys));
    }
    Ok((column(data, x.unwrap_or(1))?, column(data, y.unwrap_or(2))?))
}
