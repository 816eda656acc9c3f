use serde::{Deserialize, Serialize};

/// Attribute names the binders look for.
///
/// Defaults follow the `data-*` conventions the server templates emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerAttributes {
    pub confirm: String,
    pub picker: String,
    pub picker_enable_time: String,
    pub picker_time_24h: String,
    pub chart: String,
    pub chart_type: String,
    pub chart_labels: String,
    pub chart_datasets: String,
    pub chart_options: String,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self {
            confirm: "data-confirm".to_owned(),
            picker: "data-dtpicker".to_owned(),
            picker_enable_time: "data-dtpicker-enable-time".to_owned(),
            picker_time_24h: "data-dtpicker-time-24h".to_owned(),
            chart: "data-chartjs".to_owned(),
            chart_type: "data-type".to_owned(),
            chart_labels: "data-labels".to_owned(),
            chart_datasets: "data-sets".to_owned(),
            chart_options: "data-options".to_owned(),
        }
    }
}

impl MarkerAttributes {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("confirm", self.confirm.as_str()),
            ("picker", self.picker.as_str()),
            ("picker_enable_time", self.picker_enable_time.as_str()),
            ("picker_time_24h", self.picker_time_24h.as_str()),
            ("chart", self.chart.as_str()),
            ("chart_type", self.chart_type.as_str()),
            ("chart_labels", self.chart_labels.as_str()),
            ("chart_datasets", self.chart_datasets.as_str()),
            ("chart_options", self.chart_options.as_str()),
        ]
        .into_iter()
    }
}
