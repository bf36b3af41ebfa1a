use crate::model::OptionRecord;

/// Round-robin source of replacement records.
///
/// `cursor` walks the template list and wraps; `sequence` only grows, so every
/// record handed out gets an id nobody has seen before.
#[derive(Debug, Clone)]
pub struct ReplacementPool<T> {
    templates: Vec<T>,
    prefix: &'static str,
    cursor: usize,
    sequence: u64,
}

impl<T: OptionRecord> ReplacementPool<T> {
    pub fn new(prefix: &'static str, templates: Vec<T>) -> Self {
        Self {
            templates,
            prefix,
            cursor: 0,
            sequence: 0,
        }
    }

    /// Next template with a fresh id. `None` only for an empty pool.
    pub fn next(&mut self) -> Option<T> {
        if self.templates.is_empty() {
            return None;
        }
        let mut record = self.templates[self.cursor % self.templates.len()].clone();
        self.cursor += 1;
        self.sequence += 1;
        record.set_id(format!("{}-{}", self.prefix, self.sequence));
        Some(record)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
