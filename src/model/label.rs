use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::household::Household;
use crate::error::AbookError;

/// Label sheet stock the layout is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelTemplate {
    /// 1" x 2-5/8" address labels, 30 per sheet.
    Avery5160,
    /// 2" x 4" shipping labels, 10 per sheet.
    Avery5163,
    /// 1" x 2-5/8" clear address labels, 30 per sheet.
    Avery8660,
}

impl LabelTemplate {
    pub const ALL: &'static [LabelTemplate] = &[
        LabelTemplate::Avery5160,
        LabelTemplate::Avery5163,
        LabelTemplate::Avery8660,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            LabelTemplate::Avery5160 => "Avery5160",
            LabelTemplate::Avery5163 => "Avery5163",
            LabelTemplate::Avery8660 => "Avery8660",
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            LabelTemplate::Avery5160 | LabelTemplate::Avery8660 => 3,
            LabelTemplate::Avery5163 => 2,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            LabelTemplate::Avery5160 | LabelTemplate::Avery8660 => 10,
            LabelTemplate::Avery5163 => 5,
        }
    }

    pub fn per_sheet(&self) -> usize {
        self.columns() * self.rows()
    }
}

impl FromStr for LabelTemplate {
    type Err = AbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AbookError::UnknownLabelTemplate(s.to_string()))
    }
}

/// One label: the addressee on the first line, then the postal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingLabel {
    pub addressee: String,
    pub lines: Vec<String>,
}

impl MailingLabel {
    pub fn for_household(household: &Household) -> Self {
        let address = &household.address;
        let addressee = household.addressee();
        let mut lines = vec![addressee.clone(), address.address1.clone()];
        if let Some(a2) = &address.address2 {
            lines.push(a2.clone());
        }
        lines.push(address.city_line());
        Self { addressee, lines }
    }
}

/// Print-ready labels in sheet order. Rendering onto paper happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSheet {
    pub template: LabelTemplate,
    pub labels: Vec<MailingLabel>,
}

impl LabelSheet {
    pub fn new(template: LabelTemplate, labels: Vec<MailingLabel>) -> Self {
        Self { template, labels }
    }

    pub fn addressees(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.addressee.as_str()).collect()
    }

    /// Labels split into physical sheets.
    pub fn pages(&self) -> Vec<&[MailingLabel]> {
        self.labels.chunks(self.template.per_sheet()).collect()
    }
}
