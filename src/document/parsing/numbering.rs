//! Numbering definitions for list paragraphs
//!
//! A paragraph's `w:numPr` names a `numId` and an `ilvl`. The `numId` points
//! at a `w:num`, which points at a `w:abstractNum` whose level carries the
//! `w:numFmt` ("bullet", "decimal", "lowerLetter", ...). Level overrides on
//! the `w:num` take precedence over the abstract definition.

use std::collections::HashMap;

/// Resolved `(numId, ilvl)` -> `numFmt` table for one document
#[derive(Debug, Default)]
pub(crate) struct NumberingDefinitions {
    formats: HashMap<(usize, usize), String>,
}

impl NumberingDefinitions {
    pub(crate) fn from_numberings(numberings: &docx_rs::Numberings) -> Self {
        let abstract_nums: HashMap<usize, &docx_rs::AbstractNumbering> = numberings
            .abstract_nums
            .iter()
            .map(|abstract_num| (abstract_num.id, abstract_num))
            .collect();

        let mut formats = HashMap::new();
        for num in &numberings.numberings {
            if let Some(abstract_num) = abstract_nums.get(&num.abstract_num_id) {
                for level in &abstract_num.levels {
                    formats.insert((num.id, level.level), level.format.val.clone());
                }
            }
            for level_override in &num.level_overrides {
                if let Some(level) = &level_override.override_level {
                    formats.insert((num.id, level_override.level), level.format.val.clone());
                }
            }
        }

        Self { formats }
    }

    /// Whether the list level is numbered; `None` when the document does not
    /// define it
    pub(crate) fn is_ordered(&self, num_id: usize, level: usize) -> Option<bool> {
        self.formats
            .get(&(num_id, level))
            .map(|format| format != "bullet")
    }
}
