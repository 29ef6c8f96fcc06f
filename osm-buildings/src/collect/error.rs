use thiserror::Error;

/// Fatal failures of the collection step
///
/// Both abort the run: a partial building list from an untrusted source is
/// worse than none.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Every configured endpoint (and the offline payload, if any) failed
    #[error("{}", format_failures(.failures))]
    SourceUnavailable { failures: Vec<String> },

    /// A payload was retrieved but is not an Overpass element list
    #[error("Invalid Overpass API response: {reason}")]
    DataFormat { reason: String },
}

impl CollectError {
    pub fn data_format(reason: impl Into<String>) -> Self {
        CollectError::DataFormat {
            reason: reason.into(),
        }
    }
}

fn format_failures(failures: &[String]) -> String {
    if failures.is_empty() {
        "Overpass API returned no payload".to_string()
    } else {
        failures.join("; ")
    }
}
