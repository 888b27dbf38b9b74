use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorValueExceedsMaxValue(u16, u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImage(std::io::Error),
    EmptyPixelGrid,
    RaggedPixelGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    MismatchOfSizeBetweenDimensionsAndPixels {
        rows: usize,
        cols: usize,
        pixels: usize,
    },
    MissingInputImage(String),
    TransformationWorkerFailed(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ColorValueExceedsMaxValue(value, max) => {
                write!(
                    f,
                    "Color value {} must not be greater than max value of {}",
                    value, max
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteImage(error) => write!(f, "Failed to write image: {}", error),
            Self::EmptyPixelGrid => write!(f, "Pixel grid must have at least one row and column"),
            Self::RaggedPixelGrid {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Row {} of pixel grid has {} pixels, expected {}",
                    row, actual, expected
                )
            }
            Self::MismatchOfSizeBetweenDimensionsAndPixels { rows, cols, pixels } => {
                write!(
                    f,
                    "Pixel grid of {}x{} cannot hold {} pixels",
                    rows, cols, pixels
                )
            }
            Self::MissingInputImage(name) => {
                write!(f, "No image named '{}' has been loaded", name)
            }
            Self::TransformationWorkerFailed(row) => {
                write!(f, "Worker for row {} exited without a result", row)
            }
        }
    }
}

impl std::error::Error for Error {}
