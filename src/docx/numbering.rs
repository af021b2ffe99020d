//! Numbering (list) part parsing.

use std::collections::HashMap;

use crate::model::NumberingLevel;
use crate::xml::XmlElement;

/// Numbering definitions: concrete `w:num` instances pointing at abstract
/// definitions, each with per-level formats.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    /// Abstract numbering ID -> level index -> level
    abstract_nums: HashMap<String, HashMap<String, NumberingLevel>>,
    /// Numbering ID -> abstract numbering ID
    nums: HashMap<String, String>,
}

impl Numbering {
    /// Read numbering from the parsed `w:numbering` element.
    pub fn read(element: &XmlElement) -> Self {
        let abstract_nums = element
            .find_children("w:abstractNum")
            .filter_map(|abstract_num| {
                let id = abstract_num.attribute("w:abstractNumId")?;
                Some((id.to_string(), read_levels(abstract_num)))
            })
            .collect();

        let nums = element
            .find_children("w:num")
            .filter_map(|num| {
                let num_id = num.attribute("w:numId")?;
                let abstract_id = num.find_child("w:abstractNumId")?.attribute("w:val")?;
                Some((num_id.to_string(), abstract_id.to_string()))
            })
            .collect();

        Self {
            abstract_nums,
            nums,
        }
    }

    /// Find the level definition for a paragraph's `w:numId`/`w:ilvl` pair.
    pub fn find_level(&self, num_id: &str, level: &str) -> Option<&NumberingLevel> {
        let abstract_id = self.nums.get(num_id)?;
        self.abstract_nums.get(abstract_id)?.get(level)
    }
}

fn read_levels(abstract_num: &XmlElement) -> HashMap<String, NumberingLevel> {
    abstract_num
        .find_children("w:lvl")
        .filter_map(|level| {
            let index = level.attribute("w:ilvl")?;
            let num_fmt = level
                .find_child("w:numFmt")
                .and_then(|fmt| fmt.attribute("w:val"));
            // numFmt defaults to decimal when absent
            let is_ordered = num_fmt != Some("bullet");
            Some((index.to_string(), NumberingLevel::new(index, is_ordered)))
        })
        .collect()
}
