//! Fragment identifier values

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentIdentifierError {
    #[error("fragment identifier needs at least one segment")]
    Empty,
    #[error("blank segment in fragment identifier")]
    BlankSegment,
}

/// Ordered, non-empty sequence of name segments, written `\A\B`.
///
/// Segments never contain a backslash and are never blank. Equality and ordering compare
/// the full sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FragmentIdentifier {
    segments: Vec<String>,
}

impl FragmentIdentifier {
    pub fn new(segment: impl Into<String>) -> Result<Self, FragmentIdentifierError> {
        Self::from_segments([segment.into()])
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, FragmentIdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(FragmentIdentifierError::Empty);
        }
        if segments
            .iter()
            .any(|segment| segment.trim().is_empty() || segment.contains('\\'))
        {
            return Err(FragmentIdentifierError::BlankSegment);
        }
        Ok(FragmentIdentifier { segments })
    }

    /// Parses `\A\B`, `\\A\B` or `A\B`.
    pub fn parse(text: &str) -> Result<Self, FragmentIdentifierError> {
        let trimmed = text.trim_start_matches('\\');
        if trimmed.is_empty() {
            return Err(FragmentIdentifierError::Empty);
        }
        Self::from_segments(trimmed.split('\\'))
    }

    /// This identifier extended by `segment`.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, FragmentIdentifierError> {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::from_segments(segments)
    }

    /// Identifier without its last segment, `None` for a single segment.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() > 1 {
            Some(FragmentIdentifier {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// True when `other` starts with all the segments of this identifier.
    pub fn is_parent_of(&self, other: &FragmentIdentifier) -> bool {
        other.segments.starts_with(&self.segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined by backslashes, without a leading one: `A\B`.
    pub fn path(&self) -> String {
        self.segments.join("\\")
    }

    /// The form stored in identifier marker nodes: `\\A\B`.
    pub fn absolute_representation(&self) -> String {
        format!("\\{}", self)
    }
}

impl fmt::Display for FragmentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "\\{}", segment)?;
        }
        Ok(())
    }
}

impl From<FragmentIdentifier> for String {
    fn from(identifier: FragmentIdentifier) -> Self {
        identifier.to_string()
    }
}

impl TryFrom<String> for FragmentIdentifier {
    type Error = FragmentIdentifierError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        FragmentIdentifier::parse(&text)
    }
}
