use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use glam::dvec2;
use miette::{IntoDiagnostic, WrapErr};
use pendraw::{EXAMPLE_SCRIPT, Options, SourceContext, SvgOptions, SvgSurface};
use tracing_subscriber::EnvFilter;

/// Run a drawing script and write the result as SVG
#[derive(Debug, Parser)]
#[command(name = "pendraw", version, about)]
struct Cli {
    /// Script to run; reads stdin when omitted
    script: Option<PathBuf>,

    /// Run the built-in example script instead
    #[arg(long, conflicts_with = "script")]
    example: bool,

    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = pendraw::render::defaults::CANVAS_WIDTH)]
    width: f64,

    #[arg(long, default_value_t = pendraw::render::defaults::CANVAS_HEIGHT)]
    height: f64,

    #[arg(long, default_value_t = pendraw::render::defaults::STROKE_WIDTH)]
    stroke_width: f64,

    /// Size the view box to the drawing instead of the canvas
    #[arg(long)]
    fit: bool,

    /// Start the pen at the centre of the canvas instead of (0, 0)
    #[arg(long)]
    centered: bool,

    /// Log every stage at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load(&self) -> miette::Result<SourceContext> {
        if self.example {
            return Ok(SourceContext::new("<example>", EXAMPLE_SCRIPT));
        }
        match &self.script {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
                Ok(SourceContext::new(path.display().to_string(), source))
            }
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .into_diagnostic()
                    .wrap_err("failed to read script from stdin")?;
                Ok(SourceContext::new("<stdin>", source))
            }
        }
    }

    fn options(&self) -> Options {
        if self.centered {
            Options {
                origin: dvec2(self.width / 2.0, self.height / 2.0),
            }
        } else {
            Options::default()
        }
    }

    fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            width: self.width,
            height: self.height,
            stroke_width: self.stroke_width,
            fit: self.fit,
        }
    }
}

/// `RUST_LOG`-style directives, falling back to `warn` (`debug` with `-v`)
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, &env))
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli.load()?;
    let mut surface = SvgSurface::new(cli.svg_options());

    let report = pendraw::interpret(&ctx.source, &mut surface, &cli.options())
        .map_err(|e| ctx.report(e))?;

    for line in report.log_lines() {
        eprintln!("{}", line);
    }

    // Whatever was drawn before a failure is still written out
    let svg = surface.to_svg()?;
    match &cli.output {
        Some(path) => std::fs::write(path, svg)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", svg),
    }

    match report.failure {
        Some(error) => Err(ctx.report(error)),
        None => Ok(()),
    }
}
