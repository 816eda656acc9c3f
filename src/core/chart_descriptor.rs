use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{EnhanceError, EnhanceResult};

use super::document::Element;
use super::markers::MarkerAttributes;

/// Chart options, kept in source order.
pub type ChartOptions = IndexMap<String, Value>;

/// One dataset as the charting library expects it.
///
/// The record is opaque: every key, `label` and `data` included, belongs to
/// the charting library and is passed through untouched and in source order.
/// Only the enclosing JSON has to be well formed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetSpec {
    fields: IndexMap<String, Value>,
}

impl DatasetSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, data: impl IntoIterator<Item = Value>) -> Self {
        Self::default()
            .with_field("label", Value::String(label.into()))
            .with_field("data", Value::Array(data.into_iter().collect()))
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn label(&self) -> Option<&Value> {
        self.fields.get("label")
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.fields.get("data")
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
    pub options: ChartOptions,
}

impl ChartDescriptor {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetSpec) -> Self {
        self.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Reads a descriptor from a chart element.
    ///
    /// The chart type is taken verbatim. Labels, datasets and options are
    /// decoded from JSON; an absent attribute reads like the literal `null`.
    pub fn from_element(element: &Element, markers: &MarkerAttributes) -> EnhanceResult<Self> {
        let kind = element
            .attribute(&markers.chart_type)
            .ok_or_else(|| EnhanceError::MissingAttribute {
                attribute: markers.chart_type.clone(),
                element_id: element.display_name(),
            })?
            .to_owned();

        Ok(Self {
            kind,
            labels: decode_structured_attribute(element, &markers.chart_labels)?,
            datasets: decode_structured_attribute(element, &markers.chart_datasets)?,
            options: decode_structured_attribute(element, &markers.chart_options)?,
        })
    }

    /// Attributes a template emits for this descriptor, chart marker included.
    pub fn to_attributes(
        &self,
        markers: &MarkerAttributes,
    ) -> serde_json::Result<Vec<(String, String)>> {
        Ok(vec![
            (markers.chart.clone(), String::new()),
            (markers.chart_type.clone(), self.kind.clone()),
            (
                markers.chart_labels.clone(),
                serde_json::to_string(&self.labels)?,
            ),
            (
                markers.chart_datasets.clone(),
                serde_json::to_string(&self.datasets)?,
            ),
            (
                markers.chart_options.clone(),
                serde_json::to_string(&self.options)?,
            ),
        ])
    }

    /// Constructor payload for the charting library:
    /// `{ type, data: { labels, datasets }, options }`.
    #[must_use]
    pub fn to_chart_config(&self) -> Value {
        json!({
            "type": self.kind,
            "data": {
                "labels": self.labels,
                "datasets": self.datasets,
            },
            "options": self.options,
        })
    }
}

/// Decodes a JSON-valued attribute into `T`.
///
/// Absent attributes and the literal `null` give `T::default()`. Malformed
/// text is an `AttributeDecode` error naming the attribute and element.
pub fn decode_structured_attribute<T>(element: &Element, attribute: &str) -> EnhanceResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(text) = element.attribute(attribute) else {
        return Ok(T::default());
    };
    serde_json::from_str::<Option<T>>(text)
        .map(Option::unwrap_or_default)
        .map_err(|source| EnhanceError::AttributeDecode {
            attribute: attribute.to_owned(),
            element_id: element.display_name(),
            source,
        })
}
