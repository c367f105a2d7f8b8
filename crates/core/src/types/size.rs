//! Size variant labels.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a size selection is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Select Product Size")]
pub struct SizeError;

/// A size variant of a product (`"S"`, `"M"`, `"XL"`, ...).
///
/// Shopper input goes through [`Size::parse`] and is never empty. Labels read
/// from the backend are kept byte for byte, so a server cart decodes to
/// exactly the structure it was stored as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(String);

impl Size {
    /// Parse a size label, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SizeError` if the label is empty after trimming.
    pub fn parse(label: &str) -> Result<Self, SizeError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SizeError);
        }
        Ok(Self(label.to_owned()))
    }

    /// Parse an optional selection, as submitted by a size picker.
    ///
    /// # Errors
    ///
    /// Returns `SizeError` if nothing was selected or the label is empty.
    pub fn from_selection(selection: Option<&str>) -> Result<Self, SizeError> {
        selection.map_or(Err(SizeError), Self::parse)
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.0
    }
}

impl std::str::FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
