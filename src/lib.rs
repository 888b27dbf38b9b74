use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use color::Pixel;
pub use error::Error;
pub use image::{ImageStore, PixelGrid};
pub use transformation::{
    dithering::Dithering, luma::LumaComponent, ImageTransformer, Transformation,
    TransformationKind, TransformationParameters,
};

use image::{
    reader::ppm::PPMImageReader, writer::ppm::PPMImageWriter, ImageReader, ImageWriter,
};
use threadpool::ThreadPool;

mod cli;
mod color;
mod error;
mod image;
mod logger;
mod transformation;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    transformations: Vec<TransformationKind>,
    number_of_threads: usize,
    parameters: TransformationParameters,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

fn image_name(file_path: &Path) -> String {
    file_path
        .file_stem()
        .unwrap_or(file_path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

pub fn transform_ppm(arguments: &Arguments) -> Result<()> {
    let input_file = open_input_file(&arguments.input_file)?;
    let output_file = open_output_file(&arguments.output_file)?;
    let mut reader = PPMImageReader::new(BufReader::new(&input_file));
    let image = reader.read_image()?;

    let input_name = image_name(&arguments.input_file);
    let mut store = ImageStore::new();
    store.insert(input_name.clone(), image);

    let threadpool = ThreadPool::new(arguments.number_of_threads);
    let mut transformer = ImageTransformer::new(store, &threadpool);
    let output_name = transformer.apply_pipeline(
        &input_name,
        &arguments.transformations,
        &arguments.parameters,
    )?;
    let output_image = transformer.store().get(&output_name)?;

    let mut writer = PPMImageWriter::new(BufWriter::new(&output_file));
    writer.write_image(output_image)?;
    log::info!(
        "Wrote '{}' to {}",
        output_name,
        arguments.output_file.display()
    );
    Ok(())
}
