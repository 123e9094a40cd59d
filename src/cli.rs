use std::path::PathBuf;

use clap::Parser;

use crate::security::memory::{secure_zero, SecureString};
use crate::security::validate::validate_filepath;
use crate::security::{SecurityError, ValidationResult};

/// Single-image viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image to open (PNG, JPEG, BMP, GIF). Starts empty when omitted
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Increase logging verbosity (default: info, -v: debug, -vv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Take the image path out of the arguments as validated text.
    ///
    /// The argument buffer moves into the returned [`SecureString`], so no
    /// unwiped copy is left behind. Paths that are not valid UTF-8 are wiped
    /// and refused as invalid input.
    pub fn take_image_path(&mut self) -> ValidationResult<Option<SecureString>> {
        let Some(path) = self.file_path.take() else {
            return Ok(None);
        };
        let text = match path.into_os_string().into_string() {
            Ok(text) => SecureString::from(text),
            Err(raw) => {
                secure_zero(&mut raw.into_encoded_bytes());
                return Err(SecurityError::InvalidInput);
            }
        };
        validate_filepath(&text)?;
        Ok(Some(text))
    }
}

/// Console logging at the level picked by `-v` (respects RUST_LOG if set).
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("egui", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_argument() {
        let mut args = Args::try_parse_from(["photon"]).unwrap();
        assert_eq!(args.take_image_path(), Ok(None));
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_file_argument_is_validated() {
        let mut args = Args::try_parse_from(["photon", "-vv", "pics/cat.png"]).unwrap();
        let path = args.take_image_path().unwrap().unwrap();
        assert_eq!(path.as_str(), "pics/cat.png");
        assert_eq!(args.verbosity, 2);
        assert!(args.file_path.is_none());

        let mut args = Args::try_parse_from(["photon", "../cat.png"]).unwrap();
        assert_eq!(args.take_image_path(), Err(SecurityError::AccessDenied));
        assert!(args.file_path.is_none());
    }

    #[test]
    fn test_extra_positional_rejected() {
        assert!(Args::try_parse_from(["photon", "a.png", "b.png"]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_invalid_input() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut args = Args {
            file_path: Some(PathBuf::from(OsStr::from_bytes(b"bad\xffname.png"))),
            verbosity: 0,
        };
        assert_eq!(args.take_image_path(), Err(SecurityError::InvalidInput));
    }
}
