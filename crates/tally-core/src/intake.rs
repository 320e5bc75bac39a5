//! Intake gate between the parser and invoice storage.
//!
//! Screens out speech-engine failures, rejects low-confidence parses and
//! resolves the parsed customer against known customers, producing a draft
//! for the user to confirm.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::IntakeError;
use crate::invoice::VoiceInvoiceParser;
use crate::models::config::{IntakeConfig, TallyConfig};
use crate::models::invoice::{CustomerMatch, InvoiceDraft};

/// Exact-name lookup of known customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    names: HashSet<String>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a customer. Returns `false` if it was already known.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Match `name` exactly; anything else is provisional.
    pub fn resolve(&self, name: &str) -> CustomerMatch {
        if self.contains(name) {
            CustomerMatch::Known(name.to_string())
        } else {
            CustomerMatch::Provisional(name.to_string())
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Turns raw transcripts into invoice drafts.
pub struct InvoiceIntake {
    parser: VoiceInvoiceParser,
    directory: CustomerDirectory,
    config: IntakeConfig,
}

impl InvoiceIntake {
    pub fn new(parser: VoiceInvoiceParser, directory: CustomerDirectory, config: IntakeConfig) -> Self {
        Self {
            parser,
            directory,
            config,
        }
    }

    /// Build the parser and directory from configuration.
    pub fn from_config(config: &TallyConfig) -> Self {
        Self::new(
            VoiceInvoiceParser::from_config(&config.parser),
            CustomerDirectory::from_names(config.intake.known_customers.iter().cloned()),
            config.intake.clone(),
        )
    }

    pub fn parser(&self) -> &VoiceInvoiceParser {
        &self.parser
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut CustomerDirectory {
        &mut self.directory
    }

    /// Reject transcripts that are empty or are really error messages.
    pub fn screen(&self, transcript: &str) -> Result<(), IntakeError> {
        if transcript.trim().is_empty() {
            return Err(IntakeError::EmptyTranscript);
        }

        if let Some(marker) = self
            .config
            .failure_markers
            .iter()
            .find(|m| !m.is_empty() && transcript.contains(m.as_str()))
        {
            return Err(IntakeError::RecognitionFailed {
                marker: marker.clone(),
            });
        }

        Ok(())
    }

    /// Screen, parse and gate a transcript, then resolve its customer.
    pub fn process(&self, transcript: &str) -> Result<InvoiceDraft, IntakeError> {
        self.screen(transcript)?;

        let parsed = self
            .parser
            .parse_voice_input(transcript)
            .ok_or(IntakeError::Unparseable)?;

        if !parsed.meets(self.config.min_confidence) {
            warn!(
                "Rejected parse with confidence {:.2} (threshold {:.2})",
                parsed.confidence, self.config.min_confidence
            );
            return Err(IntakeError::LowConfidence {
                confidence: parsed.confidence,
                threshold: self.config.min_confidence,
                parsed: Box::new(parsed),
            });
        }

        let customer = self.directory.resolve(&parsed.customer_name);
        debug!("Customer resolved as {:?}", customer);

        Ok(InvoiceDraft::from_parsed(parsed, customer))
    }
}
