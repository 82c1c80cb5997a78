use std::collections::HashMap;

use anyhow::Result;

use crate::error::PipelineError;

/// Column (sample) annotations from a GCT file, one string per sample and field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMetadata {
    samples: Vec<String>,
    fields: Vec<String>,
    values: Vec<Vec<String>>,
}

impl ColumnMetadata {
    pub fn new(samples: Vec<String>) -> Self {
        Self {
            samples,
            fields: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push_field(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.samples.len() {
            anyhow::bail!(
                "metadata field '{}' has {} values for {} samples",
                name,
                values.len(),
                self.samples.len()
            );
        }
        self.fields.push(name.to_string());
        self.values.push(values);
        Ok(())
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Result<&[String], PipelineError> {
        self.fields
            .iter()
            .position(|f| f == name)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| PipelineError::MetadataColumnMissing(name.to_string()))
    }

    /// Values of `name` in the order of `samples`, looked up by sample id.
    pub fn labels_for(&self, name: &str, samples: &[String]) -> Result<Vec<String>, PipelineError> {
        let column = self.field(name)?;
        let by_id: HashMap<&str, &str> = self
            .samples
            .iter()
            .map(String::as_str)
            .zip(column.iter().map(String::as_str))
            .collect();
        samples
            .iter()
            .map(|s| {
                by_id
                    .get(s.as_str())
                    .map(|v| v.to_string())
                    .ok_or_else(|| PipelineError::SampleMetadataMissing(s.clone()))
            })
            .collect()
    }
}

/// Positions of samples whose label is not exactly `excluded`.
pub fn exocrine_indices(labels: &[String], excluded: &str) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.as_str() != excluded)
        .map(|(i, _)| i)
        .collect()
}
