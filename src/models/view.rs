// View identifiers
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three mutually exclusive views over a loaded catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    #[default]
    PrimaryCatalog,
    TimeLimited,
    Discounts,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [ViewId::PrimaryCatalog, ViewId::TimeLimited, ViewId::Discounts];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::PrimaryCatalog => "primary-catalog",
            ViewId::TimeLimited => "time-limited",
            ViewId::Discounts => "discounts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::PrimaryCatalog => "Permanently Free Games",
            ViewId::TimeLimited => "Limited-Time Free Games",
            ViewId::Discounts => "Discounted Games",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown view {:?} (expected primary-catalog, time-limited or discounts)",
                    s
                )
            })
    }
}
