//! Bar chart: one bar per student, height = percentage.

use gradebook_core::student::Student;
use plotters::{coord::ranged1d::SegmentValue, prelude::*};

use crate::{CHART_SIZE, Result};

const BAR_FILL: RGBColor = RGBColor(173, 216, 230);

pub fn render(students: &[Student]) -> Result<String> {
  // Segment by position rather than by name so repeated names keep their
  // own bar.
  let slots: Vec<usize> = (0..students.len()).collect();
  let label = |v: &SegmentValue<&usize>| match v {
    SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => students
      .get(**i)
      .map(|s| s.name.clone())
      .unwrap_or_default(),
    SegmentValue::Last => String::new(),
  };

  let mut svg = String::new();
  {
    let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
      .caption("Score of Students", ("sans-serif", 18))
      .margin(10)
      .x_label_area_size(40)
      .y_label_area_size(45)
      .build_cartesian_2d(slots.as_slice().into_segmented(), 0f64..100f64)?;

    chart
      .configure_mesh()
      .disable_x_mesh()
      .bold_line_style(BLACK.mix(0.2))
      .light_line_style(BLACK.mix(0.05))
      .x_labels(slots.len())
      .x_label_formatter(&label)
      .x_desc("Student Name")
      .y_desc("Percentage")
      .axis_desc_style(("sans-serif", 14))
      .draw()?;

    // The axis is fixed to 0..=100; bars are clipped to it.
    chart.draw_series(slots.iter().map(|i| {
      let right  = slots.get(i + 1).map_or(SegmentValue::Last, SegmentValue::Exact);
      let height = students[*i].percentage.clamp(0.0, 100.0);
      let mut bar = Rectangle::new(
        [(SegmentValue::Exact(i), 0.0), (right, height)],
        BAR_FILL.filled(),
      );
      bar.set_margin(0, 0, 6, 6);
      bar
    }))?;

    root.present()?;
  }

  Ok(svg)
}
