//! Template registry and per-template value store.
//!
//! The registry maps each distinct line shape to a [`Template`], keeping
//! templates in the order they were first seen. Each template stores every
//! numeric value of every occurrence, column by column, since standard
//! deviation with outlier trimming needs the full set of values.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LinestatsError;
use crate::number::{Column, Number, NumberKind};
use crate::pattern::{Pattern, Shaped};
use crate::tokenizer::Line;
use crate::Result;

/// One numeric position of a template and all values seen there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Index of the segment in the template's pattern
    pub segment: usize,
    pub column: Column,
}

/// A group of lines sharing one shape.
#[derive(Debug, Clone)]
pub struct Template {
    pattern: Pattern,
    count: usize,
    fields: Vec<Field>,
}

impl Template {
    /// Create a template from its first occurrence.
    pub fn new(line: &Line<'_>) -> Self {
        let pattern = Pattern::from_line(line);
        let fields = line
            .segments()
            .iter()
            .enumerate()
            .filter_map(|(segment, s)| {
                s.value().map(|value| Field {
                    segment,
                    column: Column::new(value),
                })
            })
            .collect();

        Self {
            pattern,
            count: 1,
            fields,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Number of lines that matched this template
    pub fn count(&self) -> usize {
        self.count
    }

    /// Numeric fields in left-to-right order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Append one more occurrence.
    ///
    /// `line` must have the same shape as the template; `line_no` is only
    /// used for error reporting.
    pub fn record(&mut self, line: &Line<'_>, line_no: usize) -> Result<()> {
        let values: Vec<Number> = line.numbers().collect();
        if values.len() != self.fields.len() {
            return Err(LinestatsError::ShapeMismatch {
                line: line_no,
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        for (field, value) in self.fields.iter_mut().zip(values) {
            let before = field.column.kind();
            field.column.push(value);
            if before == NumberKind::Integer && field.column.kind() == NumberKind::Float {
                debug!(
                    segment = field.segment,
                    values = field.column.len(),
                    "promoted integer column to float"
                );
            }
        }
        self.count += 1;

        Ok(())
    }

    /// Turn every field whose value never changed into literal text.
    ///
    /// Returns how many fields were converted. Running it again converts
    /// nothing.
    pub fn promote_constants(&mut self) -> usize {
        let pattern = &mut self.pattern;
        let before = self.fields.len();

        self.fields.retain(|field| {
            if field.column.is_constant() {
                pattern.make_literal(field.segment);
                false
            } else {
                true
            }
        });

        before - self.fields.len()
    }

    /// Numeric values of each occurrence, in input order.
    pub fn rows(&self) -> Vec<Vec<Number>> {
        (0..self.count)
            .map(|row| {
                self.fields
                    .iter()
                    .filter_map(|field| field.column.get(row))
                    .collect()
            })
            .collect()
    }
}

/// All templates of one input source, in first-seen order.
#[derive(Debug, Default)]
pub struct Registry {
    templates: Vec<Template>,
    /// Fingerprint to indices into `templates`; collisions are resolved by
    /// comparing shapes.
    buckets: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
    lines: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the template for `line`, creating it if this shape is new.
    ///
    /// Returns the template index and whether it was just created.
    pub fn lookup_or_insert(&mut self, line: &Line<'_>) -> (usize, bool) {
        let fingerprint = line.fingerprint(&self.hasher);

        if let Some(bucket) = self.buckets.get(&fingerprint) {
            if let Some(&index) = bucket
                .iter()
                .find(|&&i| self.templates[i].pattern.same_shape(line))
            {
                return (index, false);
            }
        }

        let index = self.templates.len();
        self.templates.push(Template::new(line));
        self.buckets.entry(fingerprint).or_default().push(index);
        debug!(template = index, line = line.text(), "new template");

        (index, true)
    }

    /// Add a tokenized line to its template.
    pub fn add(&mut self, line: &Line<'_>) -> Result<usize> {
        self.lines += 1;
        let (index, created) = self.lookup_or_insert(line);
        if !created {
            self.templates[index].record(line, self.lines)?;
        }
        Ok(index)
    }

    /// Run the literal-promotion pass over every template.
    pub fn promote_constants(&mut self) -> usize {
        let promoted: usize = self
            .templates
            .iter_mut()
            .map(Template::promote_constants)
            .sum();
        debug!(promoted, "promoted constant fields to literals");
        promoted
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn into_templates(self) -> Vec<Template> {
        self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Number of lines added
    pub fn lines(&self) -> usize {
        self.lines
    }
}
