use super::{Transformation, TransformationParameters};
use crate::color::{Pixel, MAX_CHANNEL_VALUE};
use crate::image::PixelGrid;
use crate::Result;

const THRESHOLD: i32 = 128;

/// Floyd-Steinberg weights for the right, lower left, lower and lower right neighbor,
/// given as (row offset, column offset, coefficient).
const DIFFUSION_NEIGHBORS: [(isize, isize, f64); 4] = [
    (0, 1, 7.0 / 16.0),
    (1, -1, 3.0 / 16.0),
    (1, 0, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Binarizes a greyscale image with Floyd-Steinberg error diffusion.
///
/// Only the red channel of the input is read. Pixels are visited row by row, left to
/// right, and every neighbor still ahead of the scan receives a share of the
/// quantization error. Shares are truncated toward zero and each neighbor is clamped
/// to `0..=255` right after it is updated. Error pushed past the image border is lost.
pub struct Dithering;

impl Dithering {
    fn quantize(value: i32) -> i32 {
        if value < THRESHOLD {
            0
        } else {
            MAX_CHANNEL_VALUE as i32
        }
    }

    fn distribute_error(image: &mut PixelGrid, row: usize, col: usize, error: i32) {
        for (row_offset, col_offset, coefficient) in DIFFUSION_NEIGHBORS {
            let (Some(neighbor_row), Some(neighbor_col)) = (
                row.checked_add_signed(row_offset),
                col.checked_add_signed(col_offset),
            ) else {
                continue;
            };
            if neighbor_row >= image.rows() || neighbor_col >= image.cols() {
                continue;
            }
            let share = (coefficient * error as f64) as i32;
            let updated = image.pixel(neighbor_row, neighbor_col).red() as i32 + share;
            let updated = updated.clamp(0, MAX_CHANNEL_VALUE as i32) as u8;
            image.set_pixel(neighbor_row, neighbor_col, Pixel::grey(updated));
        }
    }

    pub fn dither(input: &PixelGrid) -> PixelGrid {
        let mut output = input.clone();
        for row in 0..output.rows() {
            for col in 0..output.cols() {
                let old_value = output.pixel(row, col).red() as i32;
                let new_value = Self::quantize(old_value);
                output.set_pixel(row, col, Pixel::grey(new_value as u8));
                Self::distribute_error(&mut output, row, col, old_value - new_value);
            }
        }
        output
    }
}

impl Transformation for Dithering {
    fn name(&self) -> &'static str {
        "dithering"
    }

    fn transform(
        &self,
        input: &PixelGrid,
        parameters: &TransformationParameters,
    ) -> Result<PixelGrid> {
        parameters.warn_unrecognized(self.name());
        log::debug!("Dithering {}x{} image", input.cols(), input.rows());
        Ok(Self::dither(input))
    }
}
