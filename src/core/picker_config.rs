use serde::{Deserialize, Serialize};

use super::document::Element;
use super::markers::MarkerAttributes;

pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";
pub const DEFAULT_DATE_TIME_FORMAT: &str = "Y-m-d H:i";

/// Presence-only picker markers, read once from an element.
///
/// Attribute values are ignored: `data-dtpicker-enable-time="false"` still
/// counts as present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerFlags {
    pub enable_time: bool,
    pub time_24h: bool,
}

impl PickerFlags {
    #[must_use]
    pub fn from_element(element: &Element, markers: &MarkerAttributes) -> Self {
        Self {
            enable_time: element.has_attribute(&markers.picker_enable_time),
            time_24h: element.has_attribute(&markers.picker_time_24h),
        }
    }

    /// Attributes a template emits for these flags, picker marker included.
    #[must_use]
    pub fn to_attributes(self, markers: &MarkerAttributes) -> Vec<(String, String)> {
        let mut attributes = vec![(markers.picker.clone(), String::new())];
        if self.enable_time {
            attributes.push((markers.picker_enable_time.clone(), String::new()));
        }
        if self.time_24h {
            attributes.push((markers.picker_time_24h.clone(), String::new()));
        }
        attributes
    }
}

/// Options handed to the picker library. Serializes to the library's own
/// option names; unset flags are omitted rather than sent as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(rename = "dateFormat")]
    pub date_format: String,
    #[serde(
        rename = "enableTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_time: Option<bool>,
    #[serde(rename = "time_24hr", default, skip_serializing_if = "Option::is_none")]
    pub time_24hr: Option<bool>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            enable_time: None,
            time_24hr: None,
        }
    }
}

impl PickerConfig {
    /// Resolves a config from marker flags.
    ///
    /// `time_24h_requires_time` guards the 24-hour flag behind enable-time;
    /// when `false` the flag is applied even for date-only pickers.
    #[must_use]
    pub fn resolve(
        flags: PickerFlags,
        date_format: &str,
        date_time_format: &str,
        time_24h_requires_time: bool,
    ) -> Self {
        let mut config = Self {
            date_format: date_format.to_owned(),
            enable_time: None,
            time_24hr: None,
        };
        if flags.enable_time {
            config.date_format = date_time_format.to_owned();
            config.enable_time = Some(true);
        }
        if flags.time_24h && (flags.enable_time || !time_24h_requires_time) {
            config.time_24hr = Some(true);
        }
        config
    }

    #[must_use]
    pub fn from_flags(flags: PickerFlags) -> Self {
        Self::resolve(flags, DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT, false)
    }

    #[must_use]
    pub fn time_enabled(&self) -> bool {
        self.enable_time == Some(true)
    }

    #[must_use]
    pub fn uses_24h_clock(&self) -> bool {
        self.time_24hr == Some(true)
    }

    pub fn to_options_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
