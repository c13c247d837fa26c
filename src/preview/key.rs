//! Synthetic page identifiers.
//!
//! A [`PageKey`] ties a preview thumbnail back to exactly one page of one
//! source. It is assigned at render time and carried opaquely through the
//! reorder boundary as its string form, then resolved by exact lookup —
//! never by matching rendered content, which breaks down when two pages
//! produce identical thumbnails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::intake::SourceId;

/// Identifier of one page of one source: `(source, 1-based page index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageKey {
    /// The source this page belongs to.
    pub source: SourceId,
    /// 1-based page index within the source.
    pub page: u32,
}

impl PageKey {
    /// Create a key for a page of a source.
    pub fn new(source: SourceId, page: u32) -> Self {
        Self { source, page }
    }
}

impl fmt::Display for PageKey {
    /// Render the opaque string form, `"<source>:<page>"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.page)
    }
}

impl FromStr for PageKey {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, page) = s
            .split_once(':')
            .ok_or_else(|| DeckError::mapping(format!("malformed page identifier: {s:?}")))?;

        let source: usize = source
            .parse()
            .map_err(|_| DeckError::mapping(format!("malformed page identifier: {s:?}")))?;
        let page: u32 = page
            .parse()
            .map_err(|_| DeckError::mapping(format!("malformed page identifier: {s:?}")))?;

        if page == 0 {
            return Err(DeckError::mapping(format!(
                "page indices are 1-based, got: {s:?}"
            )));
        }

        Ok(Self {
            source: SourceId(source),
            page,
        })
    }
}
