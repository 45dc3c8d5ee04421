//! Error types for chart rendering.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("drawing error: {0}")]
  Draw(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
  E: std::error::Error + Send + Sync,
{
  fn from(e: DrawingAreaErrorKind<E>) -> Self { Error::Draw(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
