use std::env::args_os;

use ppm_dither::{transform_ppm, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match transform_ppm(&arguments) {
        Ok(_) => println!("Conversion successful"),
        Err(e) => eprintln!("Conversion failed because of: {}", e),
    }
}
