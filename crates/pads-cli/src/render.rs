use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pads_core::{layout, resolve, validate, ValidationOptions};
use pads_export::svg::{drawing, render_svg, SvgOptions};
use pads_params::ParamOverrides;

use crate::debug::{self, DebugFlags};
use crate::error::CliError;

pub struct RunOptions {
    /// Output file, `-` writes to stdout.
    pub output: PathBuf,
    pub debug: DebugFlags,
    pub validation: ValidationOptions,
}

/// Merges the parameter layers and writes the resulting SVG.
pub fn run(layers: &[ParamOverrides], opts: &RunOptions) -> Result<(), CliError> {
    let params = pads_params::merge(layers);
    if opts.debug.contains(DebugFlags::SHOW_PARAMS) {
        debug::report_params(&params);
    }

    let config = validate(&params, &opts.validation)?;
    let geometry = resolve(&config);
    let instances = layout(&geometry, &config);

    let mut svg_options = SvgOptions::default();
    if opts.debug.contains(DebugFlags::SCALE_100_TIMES) {
        svg_options = svg_options.scaled_100_times();
    }
    if opts.debug.contains(DebugFlags::SHOW_PAD) {
        debug::report_pad(&config, &geometry, &svg_options);
    }
    if opts.debug.contains(DebugFlags::SHOW_DRAWING) {
        let drawing = drawing(&instances, &svg_options)?;
        debug::report_drawing(&drawing, &svg_options);
    }

    let svg = render_svg(&geometry, &instances, &svg_options)?;
    write_output(&opts.output, &svg).map_err(|e| CliError::processing(format!("{e:#}")))?;
    tracing::info!(
        output = %opts.output.display(),
        connectors = instances.len(),
        "wrote pad SVG"
    );
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .context("failed to write SVG to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
        return Ok(());
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))
}
