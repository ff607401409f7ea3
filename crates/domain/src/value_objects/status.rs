//! Status and category enumerations
//!
//! The backend stores these as free-form strings with documented defaults.
//! Known values map to variants; anything else is kept verbatim in
//! `Other` so a record always round-trips unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value not known to this client
            Other(String),
        }

        impl $name {
            /// Wire representation
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from(raw.as_str()))
            }
        }
    };
}

string_enum! {
    /// Physical condition of an infrastructure object
    ConditionStatus, default = Good {
        /// No known defects
        Good => "good",
        /// Usable with minor defects
        Satisfactory => "satisfactory",
        /// Requires repair
        NeedsRepair => "needs_repair",
    }
}

string_enum! {
    /// Outcome of a water-quality measurement
    QualityStatus, default = Good {
        /// Within all limits
        Good => "good",
        /// Borderline
        Satisfactory => "satisfactory",
        /// Outside limits
        Poor => "poor",
    }
}

string_enum! {
    /// Lifecycle of a citizen complaint
    ComplaintStatus, default = Pending {
        /// Not yet picked up
        Pending => "pending",
        /// Assigned and being worked on
        InProgress => "in_progress",
        /// Closed
        Resolved => "resolved",
    }
}

string_enum! {
    /// Urgency of a complaint or notification
    Priority, default = Medium {
        /// Can wait
        Low => "low",
        /// Normal handling
        Medium => "medium",
        /// Needs immediate attention
        High => "high",
    }
}

string_enum! {
    /// Operational status of a water asset
    AssetStatus, default = Operational {
        /// In service
        Operational => "operational",
        /// Working but needs repair
        NeedsRepair => "needs_repair",
        /// Taken out of service
        Decommissioned => "decommissioned",
    }
}

string_enum! {
    /// Status of a distribution or investment plan
    PlanStatus, default = Draft {
        /// Being written
        Draft => "draft",
        /// Being scoped
        Planning => "planning",
        /// Signed off
        Approved => "approved",
        /// Being carried out
        InProgress => "in_progress",
        /// Done
        Completed => "completed",
    }
}

string_enum! {
    /// Kind of a notification
    NotificationKind, default = Info {
        /// Informational
        Info => "info",
        /// Needs attention
        Warning => "warning",
        /// Needs action
        Alert => "alert",
    }
}

impl QualityStatus {
    /// Anything but a good reading counts as an issue
    #[must_use]
    pub fn is_issue(&self) -> bool {
        !matches!(self, Self::Good)
    }
}

impl ComplaintStatus {
    /// Check if the complaint is still open
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved)
    }
}
