//! Labelled vocabularies carried by the raw snapshot tables.
//!
//! Upstream producers write these as free text. Known labels map onto a
//! variant; anything else is preserved verbatim in `Other` so that scoring can
//! treat it as "unrecognised" without losing the original value.

use serde::{Deserialize, Serialize};

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)+
            /// A label outside the known vocabulary.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw.trim() {
                    $($label => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from(raw))
            }
        }
    };
}

labelled_enum! {
    /// Aircraft component family.
    Category {
        Engine => "Engine",
        Avionics => "Avionics",
        Hydraulics => "Hydraulics",
        LandingGear => "Landing Gear",
        CabinSystems => "Cabin Systems",
        Electrical => "Electrical",
        Structural => "Structural",
    }
}

labelled_enum! {
    /// Operational criticality of a component.
    Criticality {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

labelled_enum! {
    /// How much a component's lead time varies. `Unknown` is written upstream
    /// when no lead time is on record.
    LeadTimeVolatility {
        High => "High",
        Medium => "Medium",
        Low => "Low",
        Unknown => "Unknown",
    }
}

labelled_enum! {
    /// Supplier geography.
    Region {
        AsiaPacific => "Asia-Pacific",
        Europe => "Europe",
        NorthAmerica => "North America",
        MiddleEast => "Middle East",
    }
}

labelled_enum! {
    /// Supplier-level risk rating; drives the supplier multiplier.
    RiskExposure {
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

/// Discrete risk tier derived from the composite score.
///
/// Produced by the pipeline, never by upstream tables, so the vocabulary is closed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
