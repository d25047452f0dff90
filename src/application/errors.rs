//! Application layer error types

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;

/// Failure to create a cache directory or write a cache file
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create directory {}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What went wrong while generating the language cache
#[derive(Error, Debug)]
pub enum GenerationErrorKind {
    #[error("Error during getting language file: ({application}/{language})")]
    LanguageFile {
        application: String,
        language: String,
        #[source]
        source: ApiError,
    },

    #[error("Unable to generate language file! ({application}/{language})")]
    LanguageFileNotSaved {
        application: String,
        language: String,
        #[source]
        source: Option<OutputError>,
    },

    #[error("Invalid {role} name {value:?}: must be a single plain path component")]
    InvalidCacheName { role: &'static str, value: String },

    #[error("Getting languages for applet ({applet}) was unsuccessful")]
    AppletLanguages {
        applet: String,
        #[source]
        source: ApiError,
    },

    #[error("There is no available languages for the {applet} applet.")]
    NoAppletLanguages { applet: String },

    #[error("Unable to create the applet cache directory {} for {applet}", .path.display())]
    FlashDirectoryNotCreated {
        applet: String,
        path: PathBuf,
        #[source]
        source: OutputError,
    },

    #[error("Getting language xml for applet: ({applet}) on language: ({language}) was unsuccessful")]
    AppletLanguageFile {
        applet: String,
        language: String,
        #[source]
        source: ApiError,
    },

    #[error(
        "Unable to save applet: ({applet}) language: ({language}) xml ({}) - wrote {written} of {expected} bytes",
        .path.display()
    )]
    AppletXmlNotSaved {
        applet: String,
        language: String,
        path: PathBuf,
        expected: usize,
        written: usize,
        #[source]
        source: Option<OutputError>,
    },
}

/// A generation failure together with the place it was raised
#[derive(Debug)]
pub struct GenerationError {
    kind: GenerationErrorKind,
    location: &'static Location<'static>,
}

impl GenerationError {
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        Self {
            kind,
            location: Location::caller(),
        }
    }

    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// Source location where the failure was raised
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl StdError for GenerationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_keeps_api_error_in_chain() {
        let error = GenerationError::new(GenerationErrorKind::LanguageFile {
            application: "intranet".to_string(),
            language: "en".to_string(),
            source: ApiError::NoContent,
        });

        assert_eq!(
            error.to_string(),
            "Error during getting language file: (intranet/en)"
        );
        let source = error.source().expect("source should be present");
        assert_eq!(source.to_string(), "Wrong content!");
    }

    #[test]
    fn test_generation_error_records_location() {
        let line = line!() + 1;
        let error = GenerationError::new(GenerationErrorKind::NoAppletLanguages {
            applet: "JSM2_MemberApplet".to_string(),
        });

        assert!(error.location().file().ends_with("errors.rs"));
        assert_eq!(error.location().line(), line);
        assert_eq!(
            error.to_string(),
            "There is no available languages for the JSM2_MemberApplet applet."
        );
    }

    #[test]
    fn test_invalid_cache_name_message() {
        let error = GenerationErrorKind::InvalidCacheName {
            role: "language",
            value: "../etc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid language name \"../etc\": must be a single plain path component"
        );
    }

    #[test]
    fn test_short_write_message() {
        let error = GenerationErrorKind::AppletXmlNotSaved {
            applet: "JSM2_MemberApplet".to_string(),
            language: "de".to_string(),
            path: PathBuf::from("/cache/flash/lang_de.xml"),
            expected: 14,
            written: 3,
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Unable to save applet: (JSM2_MemberApplet) language: (de) xml (/cache/flash/lang_de.xml) - wrote 3 of 14 bytes"
        );
    }
}
