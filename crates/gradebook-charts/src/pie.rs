//! Pie chart: one slice per grade, sized by how many students hold it.

use gradebook_core::{
  grade::Grade,
  student::{Student, grade_distribution},
};
use plotters::{element::Pie, prelude::*};

use crate::{CHART_SIZE, Result};

const START_ANGLE: f64 = 140.0;

fn slice_color(grade: Grade) -> RGBColor {
  match grade {
    Grade::A => RGBColor(76, 175, 80),
    Grade::B => RGBColor(66, 133, 244),
    Grade::C => RGBColor(255, 167, 38),
    Grade::F => RGBColor(229, 57, 53),
  }
}

pub fn render(students: &[Student]) -> Result<String> {
  let distribution = grade_distribution(students);
  let sizes:  Vec<f64>      = distribution.iter().map(|(_, n)| *n as f64).collect();
  let colors: Vec<RGBColor> = distribution.iter().map(|(g, _)| slice_color(*g)).collect();
  let labels: Vec<&str>     = distribution.iter().map(|(g, _)| g.label()).collect();

  let mut svg = String::new();
  {
    let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled("Grade Distribution", ("sans-serif", 18))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(START_ANGLE);
    pie.label_style(("sans-serif", 12).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 11).into_font().color(&WHITE));
    area.draw(&pie)?;

    root.present()?;
  }

  Ok(svg)
}
