//! Pricing engine: order totals and role-based subsidy caps.
//!
//! Everything here is a pure function of its inputs. Bounding the requested
//! subsidy to the cap is the caller's job (see `request::bounded_subsidy`);
//! the engine only computes.

use crate::catalog::LineSelection;

/// Subsidy amounts move in slider steps of ₹1,000.
pub const SUBSIDY_STEP: i64 = 1_000;

/// Who filled the form; determines the subsidy cap pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Telecaller,
    BusinessDevelopmentOfficer,
    Manager,
    CoFounder,
}

/// Maximum subsidy by battery tier: one battery set or fewer vs. more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsidyCaps {
    pub single_battery: i64,
    pub double_battery: i64,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Telecaller,
        Role::BusinessDevelopmentOfficer,
        Role::Manager,
        Role::CoFounder,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Telecaller => "Telecaller",
            Role::BusinessDevelopmentOfficer => "Business Development Officer",
            Role::Manager => "Manager",
            Role::CoFounder => "Co-Founder",
        }
    }

    /// Parse a CLI token. Accepts the hyphenated label or the short form.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.to_ascii_lowercase().as_str() {
            "telecaller" => Some(Role::Telecaller),
            "bdo" | "business-development-officer" => Some(Role::BusinessDevelopmentOfficer),
            "manager" => Some(Role::Manager),
            "co-founder" | "cofounder" => Some(Role::CoFounder),
            _ => None,
        }
    }

    pub fn caps(&self) -> SubsidyCaps {
        match self {
            Role::Telecaller => SubsidyCaps {
                single_battery: 55_000,
                double_battery: 75_000,
            },
            Role::BusinessDevelopmentOfficer => SubsidyCaps {
                single_battery: 60_000,
                double_battery: 80_000,
            },
            Role::Manager => SubsidyCaps {
                single_battery: 65_000,
                double_battery: 85_000,
            },
            Role::CoFounder => SubsidyCaps {
                single_battery: 100_000,
                double_battery: 120_000,
            },
        }
    }
}

/// Computed prices for one request. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingResult {
    pub total_price: i64,
    pub subsidy: i64,
    pub final_price: i64,
}

/// Subsidy cap for a role given how many battery sets are on the order.
/// The double tier applies from the second battery set.
pub fn subsidy_cap(role: Role, battery_qty: u32) -> i64 {
    let caps = role.caps();
    if battery_qty > 1 {
        caps.double_battery
    } else {
        caps.single_battery
    }
}

/// Sum of unit price times quantity over the selection vector.
pub fn total_price(selections: &[LineSelection]) -> i64 {
    selections
        .iter()
        .map(|sel| sel.item.unit_price * i64::from(sel.quantity))
        .sum()
}

/// Price a selection with an already-bounded subsidy amount.
/// No floor at zero: the final price goes negative when the subsidy
/// exceeds the total.
pub fn price(selections: &[LineSelection], subsidy: i64) -> PricingResult {
    let total = total_price(selections);
    PricingResult {
        total_price: total,
        subsidy,
        final_price: total - subsidy,
    }
}
