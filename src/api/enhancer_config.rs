use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT, DateFormat, MarkerAttributes};
use crate::error::{EnhanceError, EnhanceResult};
use crate::interaction::{DEFAULT_CONFIRM_MESSAGE, HandlerBinding};

pub const DEFAULT_CHART_ID_PREFIX: &str = "chart_";

/// What a binder does when one element fails to bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindFailurePolicy {
    /// Stop the binder's scan and return the error from `on_load`.
    #[default]
    Abort,
    /// Log the failure, record it in the report and keep scanning.
    SkipElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmBehavior {
    #[serde(default = "default_confirm_message")]
    pub message: String,
    #[serde(default)]
    pub binding: HandlerBinding,
}

impl Default for ConfirmBehavior {
    fn default() -> Self {
        Self {
            message: default_confirm_message(),
            binding: HandlerBinding::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerBehavior {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_date_time_format")]
    pub date_time_format: String,
    /// Only honor the 24-hour marker on pickers that also enable time.
    #[serde(default)]
    pub time_24h_requires_time: bool,
}

impl Default for PickerBehavior {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            date_time_format: default_date_time_format(),
            time_24h_requires_time: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBehavior {
    #[serde(default = "default_chart_id_prefix")]
    pub id_prefix: String,
}

impl Default for ChartBehavior {
    fn default() -> Self {
        Self {
            id_prefix: default_chart_id_prefix(),
        }
    }
}

/// Public enhancer configuration.
///
/// Serializable so hosts can ship it next to their templates instead of
/// hard-coding marker names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancerConfig {
    #[serde(default)]
    pub markers: MarkerAttributes,
    #[serde(default)]
    pub confirm: ConfirmBehavior,
    #[serde(default)]
    pub picker: PickerBehavior,
    #[serde(default)]
    pub chart: ChartBehavior,
    #[serde(default)]
    pub failure_policy: BindFailurePolicy,
}

impl EnhancerConfig {
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerAttributes) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_confirm_message(mut self, message: impl Into<String>) -> Self {
        self.confirm.message = message.into();
        self
    }

    #[must_use]
    pub fn with_confirm_binding(mut self, binding: HandlerBinding) -> Self {
        self.confirm.binding = binding;
        self
    }

    #[must_use]
    pub fn with_picker_formats(
        mut self,
        date_format: impl Into<String>,
        date_time_format: impl Into<String>,
    ) -> Self {
        self.picker.date_format = date_format.into();
        self.picker.date_time_format = date_time_format.into();
        self
    }

    #[must_use]
    pub fn with_time_24h_requires_time(mut self, enabled: bool) -> Self {
        self.picker.time_24h_requires_time = enabled;
        self
    }

    #[must_use]
    pub fn with_chart_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.chart.id_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: BindFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn validate(&self) -> EnhanceResult<()> {
        for (field, name) in self.markers.iter() {
            if name.is_empty() || name.chars().any(|ch| ch.is_whitespace() || ch == '=') {
                return Err(EnhanceError::InvalidConfig(format!(
                    "marker `{field}` must be a non-empty attribute name, got `{name}`"
                )));
            }
        }
        if self.confirm.message.trim().is_empty() {
            return Err(EnhanceError::InvalidConfig(
                "confirm message must not be empty".to_owned(),
            ));
        }
        if self.chart.id_prefix.is_empty() || self.chart.id_prefix.chars().any(char::is_whitespace)
        {
            return Err(EnhanceError::InvalidConfig(format!(
                "chart id prefix must be non-empty without whitespace, got `{}`",
                self.chart.id_prefix
            )));
        }
        self.picker_formats()?;
        Ok(())
    }

    /// Parsed `(date_format, date_time_format)`.
    pub(crate) fn picker_formats(&self) -> EnhanceResult<(DateFormat, DateFormat)> {
        let date = DateFormat::parse(&self.picker.date_format).map_err(|e| {
            EnhanceError::InvalidConfig(format!("picker date_format: {e}"))
        })?;
        let date_time = DateFormat::parse(&self.picker.date_time_format).map_err(|e| {
            EnhanceError::InvalidConfig(format!("picker date_time_format: {e}"))
        })?;
        Ok((date, date_time))
    }

    pub fn from_json_str(input: &str) -> EnhanceResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            EnhanceError::InvalidConfig(format!("failed to parse enhancer config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> EnhanceResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            EnhanceError::InvalidConfig(format!("failed to serialize enhancer config: {e}"))
        })
    }
}

fn default_confirm_message() -> String {
    DEFAULT_CONFIRM_MESSAGE.to_owned()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

fn default_date_time_format() -> String {
    DEFAULT_DATE_TIME_FORMAT.to_owned()
}

fn default_chart_id_prefix() -> String {
    DEFAULT_CHART_ID_PREFIX.to_owned()
}
