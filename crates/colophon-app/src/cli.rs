use std::ffi::OsString;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OcrBackend {
    Auto,
    Onnx,
    Noop,
}

#[derive(Debug, Default)]
pub struct CliSources {
    pub ocr_backend_from_cli: bool,
    pub log_level_from_cli: bool,
}

impl CliSources {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            ocr_backend_from_cli: value_from_cli(matches, "ocr_backend"),
            log_level_from_cli: value_from_cli(matches, "log_level"),
        }
    }
}

fn value_from_cli(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|source| matches!(source, ValueSource::CommandLine))
}

pub fn parse_cli() -> (CliArgs, CliSources) {
    match parse_cli_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    }
}

pub fn parse_cli_from<I, T>(args: I) -> Result<(CliArgs, CliSources), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = CliArgs::command().try_get_matches_from(args)?;
    let args = CliArgs::from_arg_matches(&matches)?;
    let sources = CliSources::from_matches(&matches);
    Ok((args, sources))
}

#[derive(Debug, Parser)]
#[command(
    name = "colophon",
    about = "Recognise a book copyright page and extract its bibliographic fields",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Override the configuration file path
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Preferred OCR backend
    #[arg(long = "ocr-backend", value_enum, default_value_t = OcrBackend::Auto)]
    pub ocr_backend: OcrBackend,

    /// Directory holding the OCR models and character dictionary
    #[arg(long = "models-dir", value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Log filter used when COLOPHON_LOG is unset
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Copyright page image to open on startup
    pub image: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_not_reported_as_cli_values() {
        let (args, sources) = parse_cli_from(["colophon"]).unwrap();
        assert_eq!(args.ocr_backend, OcrBackend::Auto);
        assert_eq!(args.log_level, "info");
        assert!(args.image.is_none());
        assert!(!sources.ocr_backend_from_cli);
        assert!(!sources.log_level_from_cli);
    }

    #[test]
    fn explicit_flags_are_tracked() {
        let (args, sources) = parse_cli_from([
            "colophon",
            "--ocr-backend",
            "noop",
            "--log-level",
            "debug",
            "--models-dir",
            "/opt/models",
            "page.png",
        ])
        .unwrap();
        assert_eq!(args.ocr_backend, OcrBackend::Noop);
        assert_eq!(args.models_dir, Some(PathBuf::from("/opt/models")));
        assert_eq!(args.image, Some(PathBuf::from("page.png")));
        assert!(sources.ocr_backend_from_cli);
        assert!(sources.log_level_from_cli);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse_cli_from(["colophon", "--ocr-backend", "vision"]).is_err());
    }
}
