//! Core types for the batch run

use std::path::PathBuf;

/// An applet whose language XMLs are cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppletDescriptor {
    /// Directory name, only used in log output
    pub directory: String,
    /// Identifier sent to the language API
    pub identifier: String,
}

impl AppletDescriptor {
    pub fn new<D: Into<String>, I: Into<String>>(directory: D, identifier: I) -> Self {
        Self {
            directory: directory.into(),
            identifier: identifier.into(),
        }
    }

    /// The applets handled by every run
    pub fn builtin() -> Vec<AppletDescriptor> {
        vec![AppletDescriptor::new("memberapplet", "JSM2_MemberApplet")]
    }
}

/// Files written by a completed run, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub language_files: Vec<PathBuf>,
    pub applet_files: Vec<PathBuf>,
}

impl BatchReport {
    pub fn total_files(&self) -> usize {
        self.language_files.len() + self.applet_files.len()
    }
}
