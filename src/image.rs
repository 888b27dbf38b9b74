use std::collections::HashMap;

use crate::color::Pixel;
use crate::error::Error;
use crate::Result;

pub mod reader;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<PixelGrid>;
}

pub trait ImageWriter {
    fn write_image(&mut self, image: &PixelGrid) -> Result<()>;
}

/// A rectangular image stored row-major in a single buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    pub fn new(rows: usize, cols: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyPixelGrid);
        }
        if pixels.len() != rows * cols {
            return Err(Error::MismatchOfSizeBetweenDimensionsAndPixels {
                rows,
                cols,
                pixels: pixels.len(),
            });
        }
        Ok(Self { rows, cols, pixels })
    }

    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(Error::EmptyPixelGrid);
        }
        let number_of_rows = rows.len();
        let mut pixels = Vec::with_capacity(number_of_rows * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedPixelGrid {
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            pixels.extend(row);
        }
        Self::new(number_of_rows, cols, pixels)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "Pixel ({}, {}) is outside of {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn pixel(&self, row: usize, col: usize) -> Pixel {
        self.pixels[self.index(row, col)]
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: Pixel) {
        let index = self.index(row, col);
        self.pixels[index] = pixel;
    }

    pub fn row(&self, index: usize) -> &[Pixel] {
        let start = index * self.cols;
        &self.pixels[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.cols)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

/// Loaded images addressed by their logical name.
#[derive(Default)]
pub struct ImageStore {
    images: HashMap<String, PixelGrid>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: PixelGrid) {
        let name = name.into();
        log::debug!(
            "Storing image '{}' ({}x{})",
            name,
            image.cols(),
            image.rows()
        );
        self.images.insert(name, image);
    }

    pub fn get(&self, name: &str) -> Result<&PixelGrid> {
        self.images
            .get(name)
            .ok_or_else(|| Error::MissingInputImage(name.to_owned()))
    }

    pub fn remove(&mut self, name: &str) -> Result<PixelGrid> {
        self.images
            .remove(name)
            .ok_or_else(|| Error::MissingInputImage(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
