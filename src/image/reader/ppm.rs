use std::io::Read;

use super::super::ImageReader;
use super::super::PixelGrid;
use crate::color::{Pixel, RangeColorFormat};
use crate::error::Error;

pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<PixelGrid> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        // non UTF-8 tokens fail later when parsed as numbers
        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const P3_HEADER_TOKEN_NAME: &str = "P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

const COMPONENTS_PER_PIXEL: usize = 3;

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = String>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<PixelGrid> {
        let header = self.parse_header()?;
        Self::check_header_version(&header)?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        let components = self.parse_all_components()?;
        Self::check_pixels_are_complete(&components)?;
        Self::check_number_of_pixels_match_header_information(&components, width, height)?;
        let pixels = components
            .chunks_exact(COMPONENTS_PER_PIXEL)
            .map(|c| RangeColorFormat::new(max_value, c[0], c[1], c[2]).map(Pixel::from))
            .collect::<crate::Result<Vec<Pixel>>>()?;
        log::debug!(
            "Parsed PPM image of {}x{} with max value {}",
            width,
            height,
            max_value
        );
        PixelGrid::new(height, width, pixels)
    }

    fn check_pixels_are_complete(components: &[u16]) -> crate::Result<()> {
        let surplus = components.len() % COMPONENTS_PER_PIXEL;
        if surplus != 0 {
            return Err(Error::IncompletePixelParsed(surplus));
        }
        Ok(())
    }

    fn check_number_of_pixels_match_header_information(
        components: &[u16],
        width: usize,
        height: usize,
    ) -> crate::Result<()> {
        if components.len() / COMPONENTS_PER_PIXEL != width * height {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn check_header_version(header: &str) -> crate::Result<()> {
        if header != "P3" {
            return Err(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ));
        }
        Ok(())
    }

    fn parse_header(&mut self) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ))
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        let dimension: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))?;
        if dimension == 0 {
            return Err(Error::EmptyPixelGrid);
        }
        Ok(dimension as usize)
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        let max_value: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value == 0 {
            return Err(Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME));
        }
        Ok(max_value)
    }

    fn parse_all_components(&mut self) -> crate::Result<Vec<u16>> {
        self.tokenizer
            .by_ref()
            .map(|token| Self::parse_color_value(&token))
            .collect()
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}
