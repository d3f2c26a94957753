use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use session_types::{Color, Geometry, JsonData, Point, ReadMode, TokenGenerator};
use tracing::{debug, info};

pub struct ColorArgs {
    pub hex: Option<String>,
    pub name: Option<String>,
}

pub struct PointArgs {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub name: Option<String>,
    pub width: Option<f64>,
    pub color: Option<String>,
}

fn build_color(ids: &dyn TokenGenerator, hex: Option<&str>) -> Result<Color> {
    let color = match hex {
        Some(hex) => Color::from_hex(hex)?.with_guid(ids.generate()),
        None => Color::generated_by(ids, 255, 255, 255, 255).with_name("white"),
    };
    Ok(color)
}

/// Writes `value` to `output`, or pretty-prints it to `out` when no file is given.
fn emit(out: &mut impl Write, value: &impl JsonData, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            value
                .to_json(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "saved");
        }
        None => writeln!(out, "{}", value.to_json_string()?)?,
    }
    Ok(())
}

pub fn color(
    out: &mut impl Write,
    ids: &dyn TokenGenerator,
    args: ColorArgs,
    output: Option<&Path>,
) -> Result<()> {
    let mut color = build_color(ids, args.hex.as_deref())?;
    if let Some(name) = args.name {
        color.name = name;
    }
    debug!(%color, "created color");

    emit(out, &color, output)
}

pub fn point(
    out: &mut impl Write,
    ids: &dyn TokenGenerator,
    args: PointArgs,
    output: Option<&Path>,
) -> Result<()> {
    let mut point = Point::generated_by(ids, args.x, args.y, args.z);
    if let Some(name) = args.name {
        point.name = name;
    }
    if let Some(width) = args.width {
        point.width = width;
    }
    if let Some(hex) = args.color.as_deref() {
        point.color = build_color(ids, Some(hex))?;
    }
    debug!(%point, "created point");

    emit(out, &point, output)
}

pub fn show(out: &mut impl Write, file: &Path, mode: ReadMode) -> Result<()> {
    let geometry = Geometry::from_json_with(file, mode)
        .with_context(|| format!("failed to load {}", file.display()))?;
    debug!(kind = geometry.type_name(), "loaded");

    writeln!(out, "{geometry}")?;
    Ok(())
}

pub fn demo(out: &mut impl Write, ids: &dyn TokenGenerator, output: &Path) -> Result<()> {
    let point = Point::generated_by(ids, 1.5, 2.5, 3.5);
    writeln!(out, "Created point: {point}")?;

    let data = point.to_json_data();
    writeln!(out, "\nSerialized JSON:\n{}", point.to_json_string()?)?;

    let decoded =
        Point::from_json_data(&data).context("failed to decode the serialized point")?;
    writeln!(out, "\nDeserialized point: {decoded}")?;

    point
        .to_json(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writeln!(out, "\nSaved to file: {}", output.display())?;

    Ok(())
}
