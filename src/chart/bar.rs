// src/chart/bar.rs

use plotters::prelude::*;
use std::path::Path;

use super::{draw_err, palette};
use crate::error::RenderError;

/// Magnitude chart: one bar per party, bar height = seats won.
pub fn draw(path: &Path, labels: &[&str], values: &[u32]) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(path, e))?;

    let n = values.len() as u32;
    // u64 headroom: a count near u32::MAX plus its margin must not overflow.
    let top = u64::from(values.iter().copied().max().unwrap_or(0));
    let y_max = top + top / 10 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Seats Won by Each Party", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(260)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u64..y_max)
        .map_err(|e| draw_err(path, e))?;

    let name_of = |v: &SegmentValue<u32>| -> String {
        match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&name_of)
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Parties")
        .y_desc("Seats Won")
        .draw()
        .map_err(|e| draw_err(path, e))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(palette::SKY_BLUE.filled())
                .margin(4)
                .data(values.iter().enumerate().map(|(i, v)| (i as u32, u64::from(*v)))),
        )
        .map_err(|e| draw_err(path, e))?;

    root.present().map_err(|e| draw_err(path, e))?;
    Ok(())
}
