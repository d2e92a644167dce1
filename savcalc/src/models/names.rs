// src/models/names.rs
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A name that is not part of one of the fixed name sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name `{name}`")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// A closed set of names declared by page markup.
pub trait FieldName: Copy + Ord + fmt::Display + FromStr<Err = UnknownName> + 'static {
    /// Every member of the set, in display order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

macro_rules! field_names {
    ($(#[$meta:meta])* $kind:literal, $name:ident { $($variant:ident => $attr:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FieldName for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[inline]
            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $attr),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($attr => Ok(Self::$variant),)+
                    other => Err(UnknownName {
                        kind: $kind,
                        name: other.to_owned(),
                    }),
                }
            }
        }
    };
}

field_names! {
    /// Form fields the calculator reads.
    "input",
    InputName {
        Headcount => "headcount",
        RequestsPerYear => "number-of-requests-per-year",
        CompanyRevenue => "company-revenue",
        IndirectSpend => "indirect-spend",
        AverageSalary => "average-salary",
    }
}

field_names! {
    /// Page-authored constants.
    "coefficient",
    CoefficientName {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        E => "E",
        F => "F",
        G => "G",
    }
}

field_names! {
    /// Computed values written back into the page.
    "result",
    ResultName {
        ValueOfTimeSaved => "value-of-time-saved",
        SavingsFromNegotiating => "savings-from-negotiating",
        DaysSavedWaiting => "days-saved-waiting",
        SupplyChainRisk => "supply-chain-risk",
        TotalSavings => "total-savings",
    }
}

impl ResultName {
    /// Whether the value is displayed as whole US dollars.
    #[inline]
    #[must_use]
    pub const fn is_currency(self) -> bool {
        !matches!(self, Self::DaysSavedWaiting)
    }
}
