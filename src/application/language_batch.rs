//! Use case for generating the language cache
//!
//! A run fetches every configured application language file, then every
//! applet language XML, one request at a time. The first failure aborts the
//! whole run.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::{ApiTransport, LanguageApi};
use crate::application::{
    AppletDescriptor, BatchReport, CacheWriter, GenerationError, GenerationErrorKind, OutputError,
};
use crate::config::SystemSettings;

const CACHE_DIR: &str = "cache";
const APPLET_CACHE_DIR: &str = "flash";

/// Fetches language resources and stores them under the cache root
pub struct LanguageBatch {
    api: LanguageApi,
    writer: Arc<dyn CacheWriter>,
    settings: SystemSettings,
    applets: Vec<AppletDescriptor>,
}

impl LanguageBatch {
    pub fn new(
        settings: SystemSettings,
        transport: Arc<dyn ApiTransport>,
        writer: Arc<dyn CacheWriter>,
    ) -> Self {
        Self {
            api: LanguageApi::new(transport),
            writer,
            settings,
            applets: AppletDescriptor::builtin(),
        }
    }

    /// Replace the applet list
    pub fn with_applets(mut self, applets: Vec<AppletDescriptor>) -> Self {
        self.applets = applets;
        self
    }

    /// Generate the application language files, then the applet language XMLs
    pub async fn run(&self) -> Result<BatchReport, GenerationError> {
        let language_files = self.generate_language_files().await?;
        let applet_files = self.generate_applet_language_xml_files().await?;

        Ok(BatchReport {
            language_files,
            applet_files,
        })
    }

    /// Fetch and store the language file of every configured application and language
    pub async fn generate_language_files(&self) -> Result<Vec<PathBuf>, GenerationError> {
        info!("Generating language files");

        let mut written = Vec::new();
        for target in &self.settings.translated_applications {
            info!("[APPLICATION: {}]", target.application);
            for language in &target.languages {
                let path = self.save_language_file(&target.application, language).await?;
                info!("[LANGUAGE: {}] OK", language);
                written.push(path);
            }
        }

        Ok(written)
    }

    async fn save_language_file(
        &self,
        application: &str,
        language: &str,
    ) -> Result<PathBuf, GenerationError> {
        // 1. Only plain names may become path components
        let directory = self.language_cache_path(application)?;
        let destination = directory.join(format!("{}.php", cache_name("language", language)?));

        // 2. Fetch the content
        let content = self.api.language_file(language).await.map_err(|source| {
            GenerationError::new(GenerationErrorKind::LanguageFile {
                application: application.to_string(),
                language: language.to_string(),
                source,
            })
        })?;

        // 3. Make sure the application directory exists
        debug!("Saving language file to {}", destination.display());

        let not_saved = |source: Option<OutputError>| {
            GenerationError::new(GenerationErrorKind::LanguageFileNotSaved {
                application: application.to_string(),
                language: language.to_string(),
                source,
            })
        };

        self.writer
            .ensure_directory(&directory)
            .await
            .map_err(|source| not_saved(Some(source)))?;

        // 4. Any non-zero write counts; an empty payload writes zero bytes and still counts
        let count = self
            .writer
            .write_file(&destination, content.as_bytes())
            .await
            .map_err(|source| not_saved(Some(source)))?;
        if count == 0 && !content.is_empty() {
            return Err(not_saved(None));
        }

        Ok(destination)
    }

    /// Fetch and store the language XMLs of every applet
    pub async fn generate_applet_language_xml_files(
        &self,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        info!("Getting applet language XMLs..");

        let mut written = Vec::new();
        for applet in &self.applets {
            self.cache_applet(applet, &mut written).await?;
        }

        info!("Applet language XMLs generated.");
        Ok(written)
    }

    async fn cache_applet(
        &self,
        applet: &AppletDescriptor,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), GenerationError> {
        let id = applet.identifier.as_str();
        info!("Getting > {} ({}) language xmls..", id, applet.directory);

        let languages = self.api.applet_languages(id).await.map_err(|source| {
            GenerationError::new(GenerationErrorKind::AppletLanguages {
                applet: id.to_string(),
                source,
            })
        })?;
        if languages.is_empty() {
            return Err(GenerationError::new(
                GenerationErrorKind::NoAppletLanguages {
                    applet: id.to_string(),
                },
            ));
        }
        info!("Available languages: {}", languages.join(", "));

        let directory = self.applet_cache_path();
        self.writer
            .ensure_directory(&directory)
            .await
            .map_err(|source| {
                GenerationError::new(GenerationErrorKind::FlashDirectoryNotCreated {
                    applet: id.to_string(),
                    path: directory.clone(),
                    source,
                })
            })?;

        for language in &languages {
            let xml_file = directory.join(format!("lang_{}.xml", cache_name("language", language)?));
            let xml = self
                .api
                .applet_language_file(id, language)
                .await
                .map_err(|source| {
                    GenerationError::new(GenerationErrorKind::AppletLanguageFile {
                        applet: id.to_string(),
                        language: language.clone(),
                        source,
                    })
                })?;

            let not_saved = |count: usize, source: Option<OutputError>| {
                GenerationError::new(GenerationErrorKind::AppletXmlNotSaved {
                    applet: id.to_string(),
                    language: language.clone(),
                    path: xml_file.clone(),
                    expected: xml.len(),
                    written: count,
                    source,
                })
            };

            // The whole payload must land on disk
            let count = self
                .writer
                .write_file(&xml_file, xml.as_bytes())
                .await
                .map_err(|source| not_saved(0, Some(source)))?;
            if count != xml.len() {
                return Err(not_saved(count, None));
            }

            info!("OK saving {} was successful.", xml_file.display());
            written.push(xml_file);
        }

        info!("< {} ({}) language xml cached.", id, applet.directory);
        Ok(())
    }

    /// `<root>/cache/<application>`
    #[track_caller]
    pub fn language_cache_path(&self, application: &str) -> Result<PathBuf, GenerationError> {
        let application = cache_name("application", application)?;
        Ok(self.settings.root().join(CACHE_DIR).join(application))
    }

    /// `<root>/cache/flash`, shared by all applets
    pub fn applet_cache_path(&self) -> PathBuf {
        self.settings.root().join(CACHE_DIR).join(APPLET_CACHE_DIR)
    }
}

/// Accept `value` only if it is exactly one normal path component, so joining
/// it can never leave the cache root.
#[track_caller]
fn cache_name<'a>(role: &'static str, value: &'a str) -> Result<&'a str, GenerationError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == OsStr::new(value) => Ok(value),
        _ => Err(GenerationError::new(GenerationErrorKind::InvalidCacheName {
            role,
            value: value.to_string(),
        })),
    }
}
