//! Priority policy for choosing one extension.

use std::fmt;

use super::router::{ExtensionRouter, RouteRequest, SignatureRouter};
use super::{extension_for_content_type, normalize_extension, FALLBACK_EXTENSION};
use crate::url_model::url_suffix;

/// Where an extension decision came from, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionSource {
    Explicit,
    Router,
    ContentType,
    UrlSuffix,
    Fallback,
}

/// A resolved extension (always with a leading dot) and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDecision {
    pub extension: String,
    pub source: ExtensionSource,
}

impl ExtensionDecision {
    fn new(extension: String, source: ExtensionSource) -> Self {
        Self { extension, source }
    }
}

/// Signals available when picking an extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionInput<'a> {
    pub url: &'a str,
    /// `None` when no response was seen; content-type mapping is skipped.
    pub content_type: Option<&'a str>,
    /// Leading bytes of the body, possibly empty.
    pub content: &'a [u8],
    pub explicit_extension: Option<&'a str>,
}

/// Applies, in order: explicit hint, router, content-type mapping, URL
/// suffix. Placeholder answers at any step count as no answer.
pub struct ExtensionResolver {
    router: Option<Box<dyn ExtensionRouter>>,
}

impl Default for ExtensionResolver {
    fn default() -> Self {
        Self::with_router(SignatureRouter::default())
    }
}

impl fmt::Debug for ExtensionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionResolver")
            .field("router", &self.router.as_ref().map(|_| "dyn ExtensionRouter"))
            .finish()
    }
}

impl ExtensionResolver {
    pub fn with_router<R>(router: R) -> Self
    where
        R: ExtensionRouter + 'static,
    {
        Self {
            router: Some(Box::new(router)),
        }
    }

    /// Content-type and URL-suffix rules only.
    pub fn without_router() -> Self {
        Self { router: None }
    }

    /// Strongest non-placeholder extension, or `None`.
    pub fn detect(&self, input: &ExtensionInput<'_>) -> Option<ExtensionDecision> {
        if let Some(ext) = normalize_extension(input.explicit_extension) {
            return Some(ExtensionDecision::new(ext, ExtensionSource::Explicit));
        }

        if let Some(router) = &self.router {
            let request = RouteRequest {
                url: input.url,
                content: input.content,
                content_type: input.content_type.unwrap_or_default(),
                explicit_extension: input.explicit_extension,
            };
            if let Some(ext) = normalize_extension(router.route(&request).as_deref()) {
                return Some(ExtensionDecision::new(ext, ExtensionSource::Router));
            }
        }

        if let Some(content_type) = input.content_type.filter(|ct| !ct.trim().is_empty()) {
            if let Some(ext) = normalize_extension(extension_for_content_type(content_type)) {
                return Some(ExtensionDecision::new(ext, ExtensionSource::ContentType));
            }
        }

        normalize_extension(Some(&url_suffix(input.url)))
            .map(|ext| ExtensionDecision::new(ext, ExtensionSource::UrlSuffix))
    }

    /// Like [`detect`](Self::detect) but falls back to `.bin`.
    pub fn resolve(&self, input: &ExtensionInput<'_>) -> ExtensionDecision {
        self.detect(input).unwrap_or_else(|| {
            ExtensionDecision::new(FALLBACK_EXTENSION.to_string(), ExtensionSource::Fallback)
        })
    }
}
