//! Well roles and the plate layout

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a single well column on the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellRole {
    /// Test compound, the only role that is fit
    Compound,
    /// Vehicle (mock) control
    Mock,
    /// Positive control
    Control,
    /// No sample
    Empty,
}

impl WellRole {
    /// Classify a well from its label using the reference plate convention
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace:
    /// - `"MOCK"` → [`WellRole::Mock`]
    /// - `"MEK"` → [`WellRole::Control`]
    /// - `"NONE"` or a blank label → [`WellRole::Empty`]
    /// - anything else → [`WellRole::Compound`]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("none") {
            Self::Empty
        } else if label.eq_ignore_ascii_case("mock") {
            Self::Mock
        } else if label.eq_ignore_ascii_case("mek") {
            Self::Control
        } else {
            Self::Compound
        }
    }

    /// Whether wells with this role have an IC50
    pub fn is_fittable(&self) -> bool {
        matches!(self, Self::Compound)
    }
}

impl fmt::Display for WellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compound => "compound",
            Self::Mock => "mock",
            Self::Control => "control",
            Self::Empty => "empty",
        };
        write!(f, "{}", name)
    }
}

/// Ordered mapping from well-column index to [`WellRole`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateLayout {
    roles: Vec<WellRole>,
}

impl PlateLayout {
    pub fn new(roles: Vec<WellRole>) -> Self {
        Self { roles }
    }

    /// Build a layout by classifying each label with [`WellRole::from_label`]
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            roles: labels
                .iter()
                .map(|label| WellRole::from_label(label.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn roles(&self) -> &[WellRole] {
        &self.roles
    }

    pub fn role(&self, well: usize) -> Option<WellRole> {
        self.roles.get(well).copied()
    }

    /// Indices of all wells with the given role, in plate order
    pub fn wells_with_role(&self, role: WellRole) -> impl Iterator<Item = usize> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == role)
            .map(|(idx, _)| idx)
    }

    /// Wells that are subject to a fit
    pub fn compound_wells(&self) -> Vec<usize> {
        self.wells_with_role(WellRole::Compound).collect()
    }

    /// Mock wells drawn as reference traces: the first and the last in
    /// positional order
    ///
    /// Returns zero, one or two indices. A plate with a single mock well yields
    /// that well once.
    pub fn overlay_mock_wells(&self) -> Vec<usize> {
        let mut mocks = self.wells_with_role(WellRole::Mock);
        let first = mocks.next();
        let last = mocks.last();
        first.into_iter().chain(last).collect()
    }
}
