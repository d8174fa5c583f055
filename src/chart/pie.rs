// src/chart/pie.rs

use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

use super::{draw_err, palette};
use crate::error::RenderError;

const WIDTH: u32 = 1000;
const MIN_HEIGHT: u32 = 800;
const LEGEND_ROW: u32 = 20;
const START_ANGLE: f64 = 140.0;

/// Proportion chart: one wedge per party, percentage on each wedge, party
/// names in a legend to the right.
pub fn draw(path: &Path, labels: &[&str], sizes: &[f64]) -> Result<(), RenderError> {
    let height = MIN_HEIGHT.max(120 + LEGEND_ROW * labels.len() as u32);
    let root = SVGBackend::new(path, (WIDTH, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(path, e))?;

    root.draw(&Text::new(
        "party-wise vote Share",
        (20, 20),
        ("sans-serif", 28).into_font(),
    ))
    .map_err(|e| draw_err(path, e))?;

    // Everything is placed in absolute pixels on the root area.
    let center = (340, height as i32 / 2);
    let radius = 280.0;
    let colors: Vec<RGBColor> = (0..sizes.len()).map(palette::pick).collect();
    let no_labels = vec![""; sizes.len()];

    let mut pie = Pie::new(&center, &radius, sizes, &colors[..], &no_labels[..]);
    pie.start_angle(START_ANGLE);
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    root.draw(&pie).map_err(|e| draw_err(path, e))?;

    let legend_x = 680;
    let mut y = 60;
    root.draw(&Text::new("Parties", (legend_x, y), ("sans-serif", 18).into_font()))
        .map_err(|e| draw_err(path, e))?;
    for (i, label) in labels.iter().enumerate() {
        y += LEGEND_ROW as i32;
        root.draw(&Rectangle::new(
            [(legend_x, y), (legend_x + 14, y + 14)],
            palette::pick(i).filled(),
        ))
        .map_err(|e| draw_err(path, e))?;
        root.draw(&Text::new(
            label.to_string(),
            (legend_x + 22, y),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(|e| draw_err(path, e))?;
    }

    root.present().map_err(|e| draw_err(path, e))?;
    Ok(())
}
