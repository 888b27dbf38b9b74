use crate::transformation::{TransformationKind, TransformationParameters};
use crate::Arguments;
use clap::{
    arg, builder::RangedU64ValueParser, crate_authors, crate_description, crate_name,
    crate_version, value_parser, Arg, ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_transformation_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_parameter_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_transformation_argument(command: Command) -> Command {
        command.arg(Self::create_transformation_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_parameter_argument(command: Command) -> Command {
        command.arg(Self::create_parameter_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PPM output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_transformation_argument() -> Arg {
        arg!(transformation: -x --transformation <NAME> "Transformation to apply, repeat to chain several")
            .action(ArgAction::Append)
            .default_value("dither")
            .value_parser(value_parser!(TransformationKind))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
    }

    fn create_parameter_argument() -> Arg {
        arg!(parameter: -p --parameter <PARAMETER> "Transformation parameter as KEY=VALUE")
            .action(ArgAction::Append)
            .required(false)
            .value_parser(parse_parameter)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            transformations: Self::extract_transformation_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            parameters: Self::extract_parameter_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_transformation_argument(matches: &ArgMatches) -> Vec<TransformationKind> {
        matches
            .get_many::<TransformationKind>("transformation")
            .expect("Transformation must be provided, but was unset.")
            .copied()
            .collect()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_parameter_argument(matches: &ArgMatches) -> TransformationParameters {
        matches
            .get_many::<(String, String)>("parameter")
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_parameter(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", value)),
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
