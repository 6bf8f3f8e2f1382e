//! Schema configuration: which marks are active and how tables are shaped.
//!
//! The product policy is the `Default`; a YAML file can override any part
//! of it without code changes.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Every mark the base catalog defines, in catalog order.
pub const ALL_MARKS: [&str; 7] = [
    "strong",
    "em",
    "code",
    "link",
    "underline",
    "font_size",
    "color",
];

/// Marks the product leaves out of the article schema.
pub const DEFAULT_EXCLUDED_MARKS: [&str; 5] = ["code", "link", "em", "font_size", "color"];

/// Default value of the `color` mark's attribute.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Group the table node joins by default.
pub const DEFAULT_TABLE_GROUP: &str = "block";

/// Content model of table cells by default.
pub const DEFAULT_CELL_CONTENT: &str = "paragraph+";

/// Node type and group names: lowercase identifiers.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TYPE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid regex"));

/// Parameters of the table sub-factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Group the `table` node joins.
    pub table_group: String,

    /// Content model expression for `table_cell` and `table_header`.
    pub cell_content: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            table_group: DEFAULT_TABLE_GROUP.to_string(),
            cell_content: DEFAULT_CELL_CONTENT.to_string(),
        }
    }
}

/// Configuration of the article schema.
///
/// # Examples
/// ```
/// use article_schema::config::SchemaConfig;
///
/// let config = SchemaConfig::from_yaml_str("excluded_marks: [code]\n").unwrap();
/// assert!(config.excluded_marks.contains("code"));
/// assert_eq!(config.table.table_group, "block");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Mark types removed after the base catalog is built.
    pub excluded_marks: BTreeSet<String>,

    pub table: TableOptions,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            excluded_marks: DEFAULT_EXCLUDED_MARKS.iter().map(ToString::to_string).collect(),
            table: TableOptions::default(),
        }
    }
}

impl SchemaConfig {
    /// Keep every mark of the base catalog.
    #[must_use]
    pub fn all_marks() -> Self {
        Self {
            excluded_marks: BTreeSet::new(),
            ..Self::default()
        }
    }

    /// Parse and validate a YAML document.
    ///
    /// Missing keys take their product defaults.
    ///
    /// # Errors
    /// `Config` for malformed YAML, `InvalidConfig` for a table group that
    /// is not a valid type name.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check names that end up in the schema.
    ///
    /// # Errors
    /// `InvalidConfig` when the table group is not a lowercase identifier.
    pub fn validate(&self) -> Result<()> {
        if !TYPE_NAME_PATTERN.is_match(&self.table.table_group) {
            return Err(SchemaError::InvalidConfig(format!(
                "table_group '{}' is not a valid group name",
                self.table.table_group
            )));
        }
        Ok(())
    }
}
