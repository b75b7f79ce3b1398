//! Scalar tuning values for complex-mode rows.
//!
//! [`ListOptions`] gathers every scalar a skin can tune into one serde
//! struct. Missing keys take their defaults, so a skin only lists what it
//! changes:
//!
//! ```
//! use servicelist::{ListOptions, ProgressViewMode};
//!
//! let options = ListOptions::from_toml_str(r#"
//!     item_height = 36
//!     progress_view_mode = "percent"
//! "#).unwrap();
//!
//! assert_eq!(options.item_height, 36);
//! assert_eq!(options.progress_view_mode, ProgressViewMode::Percent);
//! assert_eq!(options.picon_ratio, 167);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the running event's progress is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressViewMode {
    Off,
    /// A bar in the progress element.
    #[default]
    Bar,
    /// Elapsed percentage as text.
    Percent,
    /// Remaining minutes as text.
    Minutes,
}

/// Where an inline icon sits relative to the service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    #[default]
    Off,
    BeforeName,
    AfterName,
}

/// How a service under recording is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordIndicatorMode {
    Off,
    /// Draw the record pixmap next to the name.
    #[default]
    Icon,
    /// Draw the name in the recording color.
    Color,
}

/// What the number column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingMode {
    /// The channel number carried by the reference.
    #[default]
    Channel,
    /// The 1-based visible row.
    Position,
}

/// Scalar tuning values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Row height in pixels.
    pub item_height: u32,
    /// Suppress the number column on marker rows.
    pub hide_number_marker: bool,
    /// Name on the first line, event on the second.
    pub show_two_lines: bool,
    pub progress_view_mode: ProgressViewMode,
    /// Width reserved for percent/minutes progress text.
    pub progress_text_width: u32,
    /// Suffix after minutes progress text.
    pub progress_unit: String,
    /// Pixels trimmed from each side of the picon rect.
    pub picon_downsize: i32,
    /// Target picon aspect ratio in percent (width / height * 100).
    pub picon_ratio: u32,
    pub servicetype_icon_mode: IconMode,
    pub crypto_icon_mode: IconMode,
    pub record_indicator_mode: RecordIndicatorMode,
    /// Fixed width of the name column; 0 measures the name.
    pub column_width: u32,
    pub channel_numbers_visible: bool,
    /// Height of the progress bar; 0 fills the element.
    pub progressbar_height: u32,
    pub progressbar_border_width: u32,
    /// Inset of the selection background on unplayable rows.
    pub nonplayable_margins: u32,
    /// Gap between adjacent inline items.
    pub items_distances: u32,
    pub numbering_mode: NumberingMode,
    /// `strftime` pattern for the time column.
    pub time_format: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            item_height: 28,
            hide_number_marker: false,
            show_two_lines: false,
            progress_view_mode: ProgressViewMode::default(),
            progress_text_width: 0,
            progress_unit: "min".to_string(),
            picon_downsize: 0,
            picon_ratio: 167,
            servicetype_icon_mode: IconMode::default(),
            crypto_icon_mode: IconMode::default(),
            record_indicator_mode: RecordIndicatorMode::default(),
            column_width: 0,
            channel_numbers_visible: true,
            progressbar_height: 0,
            progressbar_border_width: 0,
            nonplayable_margins: 0,
            items_distances: 8,
            numbering_mode: NumberingMode::default(),
            time_format: "%H:%M".to_string(),
        }
    }
}

impl ListOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render the options as TOML text.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceListError;

    #[test]
    fn test_empty_document_is_default() {
        let options = ListOptions::from_toml_str("").unwrap();
        assert_eq!(options, ListOptions::default());
    }

    #[test]
    fn test_partial_document() {
        let options = ListOptions::from_toml_str(
            r#"
            show_two_lines = true
            record_indicator_mode = "color"
            crypto_icon_mode = "after_name"
            numbering_mode = "position"
            time_format = "%H.%M"
            "#,
        )
        .unwrap();

        assert!(options.show_two_lines);
        assert_eq!(options.record_indicator_mode, RecordIndicatorMode::Color);
        assert_eq!(options.crypto_icon_mode, IconMode::AfterName);
        assert_eq!(options.numbering_mode, NumberingMode::Position);
        assert_eq!(options.time_format, "%H.%M");
        assert_eq!(options.item_height, 28);
    }

    #[test]
    fn test_bad_value_is_rejected() {
        let err = ListOptions::from_toml_str("progress_view_mode = \"spinner\"").unwrap_err();
        assert!(matches!(err, ServiceListError::Options(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let options = ListOptions {
            item_height: 40,
            progress_view_mode: ProgressViewMode::Minutes,
            ..Default::default()
        };
        let text = options.to_toml_string().unwrap();
        assert_eq!(ListOptions::from_toml_str(&text).unwrap(), options);
    }
}
