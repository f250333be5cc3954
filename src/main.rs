mod cli;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bitdraw::{
    diagram::Diagram,
    presets::{self, Ieee754Format},
    serde::DiagramDef,
};
use bitdraw_render::{
    Figure, RenderConfig, SvgSurface,
    curve::{Curve, CurveOptions, paint_curve},
    paint::paint_diagram,
    unicode,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Cli, Command, LOG_ENV};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    debug!(?cli, "parsed arguments");

    let config = cli.render_config();
    match cli.command {
        Command::Figure { names, out_dir } => draw_figures(&names, &out_dir, config),
        Command::Render { diagram, output } => render_diagram(&diagram, output, config),
        Command::Float {
            value,
            single,
            output,
        } => draw_float(value, single, &output, config),
        Command::Unicode { blocks, output } => write_unicode(blocks, &output),
        Command::Curve {
            data,
            output,
            width,
            styled,
        } => draw_curve(&data, output, width, styled, config),
        Command::List => {
            for figure in Figure::ALL {
                println!("{:<17}{}", figure.name(), figure.description());
            }
            Ok(())
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn draw_figures(names: &[String], out_dir: &Path, config: RenderConfig) -> Result<()> {
    let figures = if names.is_empty() {
        Figure::ALL.to_vec()
    } else {
        names
            .iter()
            .map(|name| name.parse::<Figure>())
            .collect::<Result<Vec<_>, _>>()?
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    for figure in figures {
        let mut svg = SvgSurface::new(config);
        figure
            .draw(&mut svg)
            .with_context(|| format!("drawing figure {figure}"))?;
        svg.save(out_dir.join(format!("{}.svg", figure.name())))?;
    }

    Ok(())
}

fn render_diagram(path: &Path, output: Option<PathBuf>, config: RenderConfig) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let def: DiagramDef =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let diagram = Diagram::try_from(def).with_context(|| format!("compiling {}", path.display()))?;

    let mut svg = SvgSurface::new(config);
    paint_diagram(&mut svg, &diagram.layout());
    svg.save(output.unwrap_or_else(|| path.with_extension("svg")))?;
    Ok(())
}

fn draw_float(value: f64, single: bool, output: &Path, config: RenderConfig) -> Result<()> {
    let (bits, format) = if single {
        (u64::from((value as f32).to_bits()), Ieee754Format::Binary32)
    } else {
        (value.to_bits(), Ieee754Format::Binary64)
    };
    info!(value, bits = %format!("{bits:#x}"), ?format, "drawing float");

    let diagram = presets::float_bits(bits, format)?;
    let mut svg = SvgSurface::new(config);
    paint_diagram(&mut svg, &diagram.layout());
    svg.save(output)?;
    Ok(())
}

fn write_unicode(blocks: u32, output: &Path) -> Result<()> {
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    unicode::write_table(&mut writer, blocks)
        .with_context(|| format!("writing {}", output.display()))?;
    writer.flush()?;

    info!(path = %output.display(), blocks, "wrote unicode table");
    Ok(())
}

fn draw_curve(
    data: &Path,
    output: Option<PathBuf>,
    width: f64,
    styled: bool,
    config: RenderConfig,
) -> Result<()> {
    let text = fs::read_to_string(data).with_context(|| format!("reading {}", data.display()))?;
    let curve = Curve::parse(&text).with_context(|| format!("parsing {}", data.display()))?;
    let options = if styled {
        CurveOptions::styled(width)
    } else {
        CurveOptions {
            width,
            ..Default::default()
        }
    };

    let mut svg = SvgSurface::new(config);
    paint_curve(&mut svg, &curve, &options);
    svg.save(output.unwrap_or_else(|| data.with_extension("svg")))?;
    Ok(())
}
