use std::fmt;

use crate::{BYTES_PER_PIXEL, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Row-major RGBA bitmap as served by `/canvas`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CanvasDecodeError {
    EmptyDimensions,
    WrongLength { expected: usize, actual: usize },
}

impl fmt::Display for CanvasDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions => write!(f, "canvas dimensions must be non-zero"),
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {expected} canvas bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for CanvasDecodeError {}

impl CanvasBitmap {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CanvasDecodeError> {
        if width == 0 || height == 0 {
            return Err(CanvasDecodeError::EmptyDimensions);
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(CanvasDecodeError::WrongLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Decodes the full shared canvas.
pub fn decode_canvas(payload: Vec<u8>) -> Result<CanvasBitmap, CanvasDecodeError> {
    CanvasBitmap::from_rgba(CANVAS_WIDTH, CANVAS_HEIGHT, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CANVAS_BYTES;

    #[test]
    fn decode_accepts_exact_length() {
        let bitmap = decode_canvas(vec![0; CANVAS_BYTES]).unwrap();
        assert_eq!(bitmap.width(), 2000);
        assert_eq!(bitmap.height(), 2000);
        assert_eq!(bitmap.as_bytes().len(), CANVAS_BYTES);
    }

    #[test]
    fn decode_rejects_short_payload() {
        let err = decode_canvas(vec![0; 16]).unwrap_err();
        assert_eq!(
            err,
            CanvasDecodeError::WrongLength {
                expected: CANVAS_BYTES,
                actual: 16
            }
        );
        assert_eq!(err.to_string(), "expected 16000000 canvas bytes, got 16");
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            CanvasBitmap::from_rgba(0, 4, Vec::new()).unwrap_err(),
            CanvasDecodeError::EmptyDimensions
        );
    }
}
