//! Virtual table column and sizing configuration.
//!
//! Mirrors the JSON shapes the dashboard's virtual table accepts, so column
//! layouts can be parsed and checked before they are handed to the client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of a single column.
///
/// JSON forms: a number (pixels), `"1fr"`, `"min"`, `"auto"`, any other CSS
/// length string, `{"min": _, "max": _}` or `{"flex": _}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWidth", into = "RawWidth")]
pub enum ColumnWidth {
    /// Fixed pixel width.
    Fixed(u32),
    /// Free CSS value such as `"165px"` or `"15%"`.
    Css(String),
    /// Flex grow (`"1fr"`).
    Fr,
    /// Minimum width based on content.
    Min,
    /// Automatic width based on content.
    Auto,
    /// Responsive range in pixels.
    Range { min: u32, max: u32 },
    /// Flex grow ratio.
    Flex { flex: u32 },
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawWidth {
    Pixels(u32),
    Keyword(String),
    Range { min: u32, max: u32 },
    Flex { flex: u32 },
}

impl From<RawWidth> for ColumnWidth {
    fn from(raw: RawWidth) -> Self {
        match raw {
            RawWidth::Pixels(px) => Self::Fixed(px),
            RawWidth::Keyword(s) => match s.as_str() {
                "1fr" => Self::Fr,
                "min" => Self::Min,
                "auto" => Self::Auto,
                _ => Self::Css(s),
            },
            RawWidth::Range { min, max } => Self::Range { min, max },
            RawWidth::Flex { flex } => Self::Flex { flex },
        }
    }
}

impl From<ColumnWidth> for RawWidth {
    fn from(width: ColumnWidth) -> Self {
        match width {
            ColumnWidth::Fixed(px) => Self::Pixels(px),
            ColumnWidth::Css(s) => Self::Keyword(s),
            ColumnWidth::Fr => Self::Keyword("1fr".to_owned()),
            ColumnWidth::Min => Self::Keyword("min".to_owned()),
            ColumnWidth::Auto => Self::Keyword("auto".to_owned()),
            ColumnWidth::Range { min, max } => Self::Range { min, max },
            ColumnWidth::Flex { flex } => Self::Flex { flex },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableConfigError {
    #[error("column {key}: width range min {min} exceeds max {max}")]
    InvertedRange { key: String, min: u32, max: u32 },
    #[error("column {key}: flex ratio must be positive")]
    ZeroFlex { key: String },
    #[error("column {key}: empty css width")]
    EmptyCss { key: String },
    #[error("column key must not be empty")]
    EmptyKey,
}

impl ColumnWidth {
    fn validate(&self, key: &str) -> Result<(), TableConfigError> {
        match self {
            Self::Range { min, max } if min > max => Err(TableConfigError::InvertedRange {
                key: key.to_owned(),
                min: *min,
                max: *max,
            }),
            Self::Flex { flex: 0 } => Err(TableConfigError::ZeroFlex { key: key.to_owned() }),
            Self::Css(s) if s.trim().is_empty() => {
                Err(TableConfigError::EmptyCss { key: key.to_owned() })
            },
            _ => Ok(()),
        }
    }
}

/// Column definition without its render callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub width: ColumnWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// Disables truncation of cell content.
    #[serde(default)]
    pub no_truncate: bool,
}

impl Column {
    /// Checks the width and the min/max bounds of this column.
    pub fn validate(&self) -> Result<(), TableConfigError> {
        if self.key.is_empty() {
            return Err(TableConfigError::EmptyKey);
        }
        self.width.validate(&self.key)?;
        if let (Some(min), Some(max)) = (self.min_width, self.max_width) {
            if min > max {
                return Err(TableConfigError::InvertedRange { key: self.key.clone(), min, max });
            }
        }
        Ok(())
    }
}

/// Sizing and scrolling parameters of a virtual table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub row_height: u32,
    pub loading_rows: u32,
    pub overscan: u32,
    pub table_border: u32,
    /// Milliseconds between scroll-driven load-more checks.
    pub throttle_delay: u32,
    pub header_height: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: 36,
            loading_rows: 50,
            overscan: 5,
            table_border: 1,
            throttle_delay: 350,
            header_height: 40,
        }
    }
}

/// Partial table config; unset fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfigOverrides {
    pub row_height: Option<u32>,
    pub loading_rows: Option<u32>,
    pub overscan: Option<u32>,
    pub table_border: Option<u32>,
    pub throttle_delay: Option<u32>,
    pub header_height: Option<u32>,
}

impl TableConfig {
    #[must_use]
    pub fn with_overrides(self, overrides: &TableConfigOverrides) -> Self {
        Self {
            row_height: overrides.row_height.unwrap_or(self.row_height),
            loading_rows: overrides.loading_rows.unwrap_or(self.loading_rows),
            overscan: overrides.overscan.unwrap_or(self.overscan),
            table_border: overrides.table_border.unwrap_or(self.table_border),
            throttle_delay: overrides.throttle_delay.unwrap_or(self.throttle_delay),
            header_height: overrides.header_height.unwrap_or(self.header_height),
        }
    }
}
