use std::time::{Duration, Instant};

use ppm_dither::{
    Dithering, LumaComponent, Pixel, PixelGrid, Transformation, TransformationParameters,
};
use threadpool::ThreadPool;

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;

fn create_test_image() -> PixelGrid {
    let pixels = (0..IMAGE_WIDTH * IMAGE_HEIGHT)
        .map(|index| {
            let x = index % IMAGE_WIDTH;
            let y = index / IMAGE_WIDTH;
            Pixel::grey(((x + y * 8) % 256) as u8)
        })
        .collect();
    PixelGrid::new(IMAGE_HEIGHT, IMAGE_WIDTH, pixels).expect("Test image dimensions are valid")
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

const NUMBER_OF_ROUNDS: u32 = 10;

fn measure(transformation: &dyn Transformation, image: &PixelGrid) {
    println!("Timing {}", transformation.name());
    let parameters = TransformationParameters::new();
    let mut durations: Vec<Duration> = Vec::new();

    for round in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        transformation
            .transform(image, &parameters)
            .expect("Transformation failed");
        let duration = start.elapsed();
        println!(
            "Finished round {} after {} microseconds",
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }

    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / NUMBER_OF_ROUNDS;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, &durations);

    println!(
        "Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn main() {
    println!("Creating test image");
    let test_image = create_test_image();
    let threadpool = ThreadPool::default();

    measure(&Dithering, &test_image);
    measure(&LumaComponent::new(&threadpool), &test_image);
}
