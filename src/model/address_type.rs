use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::contact::Contact;
use crate::error::AbookError;

/// Household category of an address. Drives how the people living there
/// are named on envelopes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    Individual,
    Family,
    MarriedCouple,
    UnmarriedCouple,
    SingleParent,
}

impl AddressType {
    pub const ALL: &'static [AddressType] = &[
        AddressType::Individual,
        AddressType::Family,
        AddressType::MarriedCouple,
        AddressType::UnmarriedCouple,
        AddressType::SingleParent,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            AddressType::Individual => "Individual",
            AddressType::Family => "Family",
            AddressType::MarriedCouple => "Married Couple",
            AddressType::UnmarriedCouple => "Unmarried Couple",
            AddressType::SingleParent => "Single Parent",
        }
    }

    pub fn from_description(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.description() == s)
    }

    /// Types where a second slot contact makes no sense.
    pub fn only_one_main_contact(&self) -> bool {
        matches!(self, AddressType::Individual | AddressType::SingleParent)
    }

    /// Types that may be chosen for an address with `linked` contacts.
    pub fn valid_for_contact_count(linked: usize) -> Vec<AddressType> {
        if linked <= 1 {
            Self::ALL
                .iter()
                .copied()
                .filter(|t| t.only_one_main_contact())
                .collect()
        } else {
            Self::ALL.to_vec()
        }
    }

    /// Error message when this type cannot be chosen for an address with
    /// `linked` contacts.
    pub fn contact_count_error(&self, linked: usize) -> Option<String> {
        if Self::valid_for_contact_count(linked).contains(self) {
            None
        } else {
            Some(format!("{} needs two contacts living at the address", self.description()))
        }
    }

    /// Envelope-style addressee, e.g. "Doe, Mr. & Mrs. John & Jane & Family".
    /// Returns None if a contact the template names is missing.
    pub fn format_for_display(
        &self,
        primary: Option<&Contact>,
        secondary: Option<&Contact>,
    ) -> Option<String> {
        let p = primary?;
        let raw = match self {
            AddressType::Individual => {
                format!("{}, {} {}", p.last_name, p.prefix_str(), p.first_name)
            }
            AddressType::SingleParent => {
                format!("{}, {} {} & Family", p.last_name, p.prefix_str(), p.first_name)
            }
            AddressType::Family => {
                let s = secondary?;
                format!(
                    "{}, {} & {} {} & {} & Family",
                    p.last_name,
                    p.prefix_str(),
                    s.prefix_str(),
                    p.first_name,
                    s.first_name
                )
            }
            AddressType::MarriedCouple => {
                let s = secondary?;
                format!(
                    "{}, {} & {} {} & {}",
                    p.last_name,
                    p.prefix_str(),
                    s.prefix_str(),
                    p.first_name,
                    s.first_name
                )
            }
            AddressType::UnmarriedCouple => {
                let s = secondary?;
                format!(
                    "{}, {} {} {} & {} {}",
                    p.last_name,
                    p.prefix_str(),
                    p.first_name,
                    p.last_name,
                    s.prefix_str(),
                    s.first_name
                )
            }
        };
        Some(squeeze(&raw))
    }

    /// Mailing-label addressee, e.g. "The Doe Family".
    pub fn format_for_label(
        &self,
        primary: Option<&Contact>,
        secondary: Option<&Contact>,
    ) -> Option<String> {
        let p = primary?;
        let raw = match self {
            AddressType::Family | AddressType::SingleParent => format!("The {} Family", p.last_name),
            AddressType::Individual => {
                format!("{} {} {}", p.prefix_str(), p.first_name, p.last_name)
            }
            AddressType::MarriedCouple => {
                let s = secondary?;
                format!(
                    "{} & {} {} & {} {}",
                    p.prefix_str(),
                    s.prefix_str(),
                    p.first_name,
                    s.first_name,
                    p.last_name
                )
            }
            AddressType::UnmarriedCouple => {
                let s = secondary?;
                format!(
                    "{} {} {} & {} {} {}",
                    p.prefix_str(),
                    p.first_name,
                    p.last_name,
                    s.prefix_str(),
                    s.first_name,
                    s.last_name
                )
            }
        };
        Some(squeeze(&raw))
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for AddressType {
    type Err = AbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s.trim()).ok_or_else(|| AbookError::InvalidAddressType(s.to_string()))
    }
}

// Blank prefixes leave doubled or dangling spaces behind.
fn squeeze(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
