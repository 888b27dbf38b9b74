use std::io::Write;

use super::super::{ImageWriter, PixelGrid};
use crate::color::MAX_CHANNEL_VALUE;
use crate::error::Error;

pub struct PPMImageWriter<T: Write> {
    writer: T,
}

impl<T: Write> PPMImageWriter<T> {
    pub fn new(writer: T) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", image.cols(), image.rows())?;
        writeln!(self.writer, "{}", MAX_CHANNEL_VALUE)
    }

    fn write_rows(&mut self, image: &PixelGrid) -> std::io::Result<()> {
        for row in image.rows_iter() {
            let line = row
                .iter()
                .map(|p| format!("{} {} {}", p.red(), p.green(), p.blue()))
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<T> {
    fn write_image(&mut self, image: &PixelGrid) -> crate::Result<()> {
        self.write_header(image).map_err(Error::FailedToWriteImage)?;
        self.write_rows(image).map_err(Error::FailedToWriteImage)?;
        self.writer.flush().map_err(Error::FailedToWriteImage)
    }
}
