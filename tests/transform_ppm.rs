use ppm_dither::{transform_ppm, CLIParser, Error};
use std::path::{Path, PathBuf};
use std::{env, fs};

const INPUT_IMAGE_PATH: &str = "tests/gradient.ppm";
const INPUT_IMAGE_WIDTH: usize = 16;
const INPUT_IMAGE_HEIGHT: usize = 8;

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_input_image_path() -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(INPUT_IMAGE_PATH);
    root_path
}

fn get_result_image_path(file_name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("ppm-dither-{}-{}", std::process::id(), file_name));
    path
}

fn cleanup(result_image_path: &Path) {
    if result_image_path.exists() && result_image_path.is_file() {
        fs::remove_file(result_image_path).expect("Deletion of output file failed");
    }
}

struct PlainImage {
    width: usize,
    height: usize,
    components: Vec<u16>,
}

fn read_plain_image(path: &Path) -> PlainImage {
    let content = fs::read_to_string(path).expect("Output file is not readable");
    let mut tokens = content.split_whitespace();
    assert_eq!(tokens.next(), Some("P3"), "header does not match");
    let mut next_number = || -> usize { tokens.next().unwrap().parse().unwrap() };
    let width = next_number();
    let height = next_number();
    assert_eq!(next_number(), 255, "max value does not match");
    let components = tokens.map(|t| t.parse().unwrap()).collect();
    PlainImage {
        width,
        height,
        components,
    }
}

fn run(arguments: Vec<&str>) -> ppm_dither::Result<()> {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(arguments);
    transform_ppm(&arguments)
}

#[test]
fn test_dither_ppm() {
    let result_image_path = get_result_image_path("dither.ppm");
    cleanup(&result_image_path);
    run(vec![
        "test",
        get_input_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
    ])
    .expect("Dithering failed");
    assert!(result_image_path.exists(), "Output file was not created");

    let image = read_plain_image(&result_image_path);
    assert_eq!(image.width, INPUT_IMAGE_WIDTH);
    assert_eq!(image.height, INPUT_IMAGE_HEIGHT);
    assert_eq!(image.components.len(), INPUT_IMAGE_WIDTH * INPUT_IMAGE_HEIGHT * 3);
    for pixel in image.components.chunks_exact(3) {
        assert!(
            pixel == [0, 0, 0] || pixel == [255, 255, 255],
            "pixel {:?} is neither black nor white",
            pixel
        );
    }
    // left edge of the gradient is black, right edge is white
    assert_eq!(&image.components[0..3], &[0, 0, 0]);
    let last_of_first_row = (INPUT_IMAGE_WIDTH - 1) * 3;
    assert_eq!(
        &image.components[last_of_first_row..last_of_first_row + 3],
        &[255, 255, 255]
    );
    cleanup(&result_image_path);
}

#[test]
fn test_luma_ppm() {
    let result_image_path = get_result_image_path("luma.ppm");
    cleanup(&result_image_path);
    run(vec![
        "test",
        get_input_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
        "--transformation",
        "luma",
        "--threads",
        "3",
    ])
    .expect("Luma extraction failed");

    let image = read_plain_image(&result_image_path);
    assert_eq!(image.width, INPUT_IMAGE_WIDTH);
    assert_eq!(image.height, INPUT_IMAGE_HEIGHT);
    // white pixel at the end of the first row
    let last_of_first_row = (INPUT_IMAGE_WIDTH - 1) * 3;
    assert_eq!(
        &image.components[last_of_first_row..last_of_first_row + 3],
        &[54, 182, 18]
    );
    cleanup(&result_image_path);
}

#[test]
fn test_chained_transformations_with_parameter() {
    let result_image_path = get_result_image_path("luma-dither.ppm");
    cleanup(&result_image_path);
    run(vec![
        "test",
        get_input_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
        "-x",
        "luma",
        "-x",
        "dither",
        "-p",
        "unknown=1",
    ])
    .expect("Chained transformation failed");

    let image = read_plain_image(&result_image_path);
    assert!(image.components.iter().all(|&c| c == 0 || c == 255));
    cleanup(&result_image_path);
}

#[test]
fn test_missing_input_file() {
    let result_image_path = get_result_image_path("missing.ppm");
    let mut input_path = get_project_root_path();
    input_path.push("tests/does-not-exist.ppm");
    let result = run(vec![
        "test",
        input_path.to_str().unwrap(),
        result_image_path.to_str().unwrap(),
    ]);
    match result {
        Err(Error::UnableToOpenInputFileForReading(path, _)) => {
            assert!(path.ends_with("does-not-exist.ppm"))
        }
        _ => panic!("Missing input file was not reported"),
    }
    cleanup(&result_image_path);
}
