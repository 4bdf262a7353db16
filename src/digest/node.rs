//! One template's digest request.

use std::cell::OnceCell;

use crate::core::{DigestError, LookupMode, TemplateRef};
use crate::extract::DependencyExtractor;
use crate::source::{Source, SourceProvider};

/// Ephemeral view of a single template: its reference, lookup mode and lazily
/// loaded source. Created per request and dropped when the request returns.
pub(crate) struct DigestNode<'a> {
    template: TemplateRef,
    mode: LookupMode,
    provider: &'a dyn SourceProvider,
    extractor: &'a DependencyExtractor,
    source: OnceCell<Source>,
}

impl<'a> DigestNode<'a> {
    pub(crate) fn new(
        template: TemplateRef,
        mode: LookupMode,
        provider: &'a dyn SourceProvider,
        extractor: &'a DependencyExtractor,
    ) -> Self {
        Self {
            template,
            mode,
            provider,
            extractor,
            source: OnceCell::new(),
        }
    }

    pub(crate) fn template(&self) -> &TemplateRef {
        &self.template
    }

    /// Source text, loaded on first use.
    pub(crate) fn source(&self) -> Result<&Source, DigestError> {
        if let Some(source) = self.source.get() {
            return Ok(source);
        }

        let formats = [self.template.format().to_string()];
        let source = self.provider.find(
            &self.template.logical_name(),
            &[],
            self.mode.is_partial(),
            &formats,
        )?;
        Ok(self.source.get_or_init(|| source))
    }

    /// Direct dependencies, render references first then explicit annotations.
    ///
    /// A missing template surfaces as [`DigestError::TemplateNotFound`]; callers
    /// decide whether to absorb it.
    pub(crate) fn dependencies(&self) -> Result<Vec<String>, DigestError> {
        let source = self.source()?;
        Ok(self.extractor.dependencies(&source.text, &self.template))
    }
}
