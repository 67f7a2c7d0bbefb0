//! Response resource resolver
//!
//! Turns a response key into display text by searching the response
//! documents of a language directory and rendering the first match with
//! the request's slots. Lookups never fail: every failure becomes either a
//! diagnostic string or the unrendered template text.

use crate::document::{Candidate, ResponseDocument};
use crate::error::{ResolveError, ResolveResult};
use crate::scan::{list_documents, DocumentFilter};
use spotifyplus_core::names::PLATFORM_SPOTIFYPLUS;
use spotifyplus_core::{Slots, DEFAULT_LANGUAGE};
use spotifyplus_template::ResponseRenderer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// One response text lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRequest {
    /// Response key; case-sensitive
    pub key: String,

    /// Intent whose intent layout block is searched
    pub intent: Option<String>,

    /// Platform used for the file name filter and the platform layout
    pub platform: Option<String>,

    /// Language directory; falls back to the resolver default, then `en`
    pub language: Option<String>,

    /// Only consider documents whose file name starts with `platform`
    pub platform_files_only: bool,

    /// Rendering context exposed as `slots`
    pub slots: Slots,
}

impl ResponseRequest {
    /// Lookup of `key` with no intent or platform, in the default language
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            intent: None,
            platform: None,
            language: None,
            platform_files_only: true,
            slots: Slots::new(),
        }
    }

    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Only search documents named after the platform
    pub fn platform_files_only(mut self, only: bool) -> Self {
        self.platform_files_only = only;
        self
    }

    pub fn slots(mut self, slots: Slots) -> Self {
        self.slots = slots;
        self
    }

    pub(crate) fn filter(&self) -> DocumentFilter {
        DocumentFilter::for_request(self.platform.as_deref(), self.platform_files_only)
    }
}

/// Template text chosen for a request
#[derive(Debug, Clone, PartialEq)]
pub struct FoundTemplate {
    pub candidate: Candidate,
    pub document: PathBuf,
}

/// Diagnostic returned when no document holds the key
pub fn not_found_message(key: &str) -> String {
    format!("Resource message for response key \"{}\" could not be found.", key)
}

/// Diagnostic returned when the language directory is unusable
pub fn directory_message(dir: &Path) -> String {
    format!(
        "Response resource directory \"{}\" could not be found or read.",
        dir.display()
    )
}

/// Diagnostic returned for unexpected lookup failures
pub fn failure_message(key: &str, language: &str, platform: &str) -> String {
    format!(
        "Could not find intent resource message for response key \"{}\" (language=\"{}\", platform=\"{}\").",
        key, language, platform
    )
}

/// Searches `<base>/<language>` for response text
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    base_dir: PathBuf,
    default_language: Option<String>,
    renderer: Arc<ResponseRenderer>,
}

impl ResponseResolver {
    /// Resolver over `base_dir`, typically `<config>/custom_sentences`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            default_language: None,
            renderer: Arc::new(ResponseRenderer::new()),
        }
    }

    /// Host language used when a request names none
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.default_language = (!language.trim().is_empty()).then_some(language);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Effective language of a request
    pub fn language_for(&self, request: &ResponseRequest) -> String {
        request
            .language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .or(self.default_language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }

    /// `<base>/<language>`
    pub fn language_dir(&self, language: &str) -> PathBuf {
        self.base_dir.join(language)
    }

    /// Documents a request would search, in search order
    pub fn documents(&self, request: &ResponseRequest) -> ResolveResult<Vec<PathBuf>> {
        let dir = self.language_dir(&self.language_for(request));
        list_documents(&dir, &request.filter())
    }

    /// Locate the template text for a request without rendering it
    ///
    /// Documents that cannot be read or parsed are logged and skipped. The
    /// first document holding any candidate wins.
    pub fn find_template(&self, request: &ResponseRequest) -> ResolveResult<Option<FoundTemplate>> {
        for path in self.documents(request)? {
            let document = match ResponseDocument::load(&path) {
                Ok(document) => document,
                Err(e) => {
                    warn!(error = %e, "skipping response document");
                    continue;
                }
            };

            if let Some(candidate) = document.first_candidate(
                &request.key,
                request.intent.as_deref(),
                request.platform.as_deref(),
            ) {
                debug!(
                    key = %request.key,
                    layout = %candidate.layout,
                    document = %document.file_name(),
                    "response key resolved"
                );
                return Ok(Some(FoundTemplate {
                    candidate,
                    document: path,
                }));
            }
        }

        Ok(None)
    }

    /// Resolve a request to display text
    ///
    /// Runs the directory scan on the calling thread; use
    /// [`ResponseResolver::resolve_async`] from async code.
    pub fn resolve(&self, request: &ResponseRequest) -> String {
        let found = self.find_template(request);
        self.finish(request, found)
    }

    /// Resolve a request with the directory scan on the blocking pool
    pub async fn resolve_async(&self, request: ResponseRequest) -> String {
        let resolver = self.clone();
        let scan_request = request.clone();
        let found = tokio::task::spawn_blocking(move || resolver.find_template(&scan_request))
            .await
            .unwrap_or_else(|e| {
                Err(ResolveError::TaskFailed {
                    message: e.to_string(),
                })
            });
        self.finish(&request, found)
    }

    pub(crate) fn finish(
        &self,
        request: &ResponseRequest,
        found: ResolveResult<Option<FoundTemplate>>,
    ) -> String {
        match found {
            Ok(Some(found)) => self.render(request, &found.candidate.text),
            Ok(None) => {
                debug!(key = %request.key, "response key not found");
                not_found_message(&request.key)
            }
            Err(e) if e.is_directory_error() => {
                let dir = self.language_dir(&self.language_for(request));
                warn!(error = %e, "response resource directory unavailable");
                directory_message(&dir)
            }
            Err(e) => {
                warn!(error = %e, key = %request.key, "response lookup failed");
                failure_message(
                    &request.key,
                    &self.language_for(request),
                    request.platform.as_deref().unwrap_or(PLATFORM_SPOTIFYPLUS),
                )
            }
        }
    }

    /// Render template text, falling back to the raw text on error
    pub(crate) fn render(&self, request: &ResponseRequest, template: &str) -> String {
        match self.renderer.render(template, &request.slots) {
            Ok(text) => text,
            Err(e) => {
                warn!(key = %request.key, error = %e, "response template failed to render; using raw text");
                template.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_fallbacks() {
        let resolver = ResponseResolver::new("/config/custom_sentences");
        let request = ResponseRequest::new("greet");
        assert_eq!(resolver.language_for(&request), "en");

        let resolver = resolver.with_default_language("de");
        assert_eq!(resolver.language_for(&request), "de");
        assert_eq!(resolver.language_for(&request.clone().language("fr")), "fr");
        assert_eq!(resolver.language_for(&request.language("  ")), "de");
    }

    #[test]
    fn test_blank_default_language_ignored() {
        let resolver = ResponseResolver::new("/x").with_default_language("");
        assert_eq!(resolver.language_for(&ResponseRequest::new("k")), "en");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            not_found_message("greet"),
            "Resource message for response key \"greet\" could not be found."
        );
        assert!(directory_message(Path::new("/config/custom_sentences/xx")).contains("/config/custom_sentences/xx"));
        assert!(failure_message("greet", "en", "spotifyplus").contains("language=\"en\""));
    }
}
