//! The fixed catalog of orderable line items.
//!
//! Prices are whole rupees. The `placeholder` strings are the contract with
//! the DOCX templates and must not change while existing templates are in
//! circulation.

/// A purchasable line item with a fixed unit price and minimum order quantity.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogItem {
    /// Short identifier used on the command line (e.g., `battery:2`).
    pub id: &'static str,
    /// Display name as it appears in documents and listings.
    pub name: &'static str,
    pub unit_price: i64,
    pub min_quantity: u32,
    /// Template placeholder key this item's quantity is written to.
    pub placeholder: &'static str,
}

/// Item id of the battery line, which drives the subsidy tier.
pub const BATTERY_ID: &str = "battery";

pub static CATALOG: &[CatalogItem] = &[
    CatalogItem {
        id: "pt-pro",
        name: "12 HP PT Pro",
        unit_price: 112_000,
        min_quantity: 1,
        placeholder: "quantity_pt_pro",
    },
    CatalogItem {
        id: "battery",
        name: "Battery Sets",
        unit_price: 56_000,
        min_quantity: 1,
        placeholder: "quantity_battery",
    },
    CatalogItem {
        id: "charger",
        name: "Fast Chargers",
        unit_price: 65_000,
        min_quantity: 2,
        placeholder: "quantity_charger",
    },
    CatalogItem {
        id: "front-dead-weight",
        name: "Front Dead Weight",
        unit_price: 0,
        min_quantity: 0,
        placeholder: "quantity_front_dead_weight",
    },
    CatalogItem {
        id: "wheel-dead-weight",
        name: "Wheel Dead Weight",
        unit_price: 0,
        min_quantity: 0,
        placeholder: "quantity_wheel_dead_weight",
    },
    CatalogItem {
        id: "blade-weeding",
        name: "1 Set of Sugarcane Blades(Weeding)",
        unit_price: 4_400,
        min_quantity: 0,
        placeholder: "quantity_blade_weeding",
    },
    CatalogItem {
        id: "blade-earthing",
        name: "1 Set of Sugarcane Blades(Earthing-up)",
        unit_price: 4_400,
        min_quantity: 0,
        placeholder: "quantity_blade_earthing",
    },
    CatalogItem {
        id: "tyres",
        name: "1 Set of Tyres (5x10)",
        unit_price: 8_000,
        min_quantity: 0,
        placeholder: "quantity_tyres",
    },
    CatalogItem {
        id: "toolkit",
        name: "Toolkit",
        unit_price: 1_200,
        min_quantity: 0,
        placeholder: "quantity_toolkit",
    },
    CatalogItem {
        id: "ginger-kit",
        name: "Ginger Kit",
        unit_price: 10_000,
        min_quantity: 0,
        placeholder: "quantity_ginger",
    },
    CatalogItem {
        id: "seat",
        name: "Seat",
        unit_price: 6_500,
        min_quantity: 0,
        placeholder: "quantity_seat",
    },
    CatalogItem {
        id: "jack",
        name: "Jack",
        unit_price: 1_100,
        min_quantity: 0,
        placeholder: "quantity_jack",
    },
    CatalogItem {
        id: "buyback",
        name: "BuyBack Guarantee",
        unit_price: 10_000,
        min_quantity: 0,
        placeholder: "quantity_buyback_guarantee",
    },
];

/// One selected line: a catalog item and the quantity ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    pub item: &'static CatalogItem,
    pub quantity: u32,
}

pub fn find(id: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

pub fn position(id: &str) -> Option<usize> {
    CATALOG.iter().position(|item| item.id == id)
}

/// Battery quantity in a selection, 0 when batteries are not on the order.
pub fn battery_quantity(selections: &[LineSelection]) -> u32 {
    selections
        .iter()
        .find(|sel| sel.item.id == BATTERY_ID)
        .map_or(0, |sel| sel.quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_thirteen_items() {
        assert_eq!(CATALOG.len(), 13);
    }

    #[test]
    fn ids_names_and_placeholders_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|i| i.id).collect();
        let names: HashSet<_> = CATALOG.iter().map(|i| i.name).collect();
        let placeholders: HashSet<_> = CATALOG.iter().map(|i| i.placeholder).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(names.len(), CATALOG.len());
        assert_eq!(placeholders.len(), CATALOG.len());
    }

    #[test]
    fn battery_item_exists() {
        let battery = find(BATTERY_ID).unwrap();
        assert_eq!(battery.name, "Battery Sets");
        assert_eq!(battery.unit_price, 56_000);
        assert_eq!(battery.min_quantity, 1);
    }

    #[test]
    fn battery_quantity_defaults_to_zero() {
        let toolkit = find("toolkit").unwrap();
        let selections = [LineSelection {
            item: toolkit,
            quantity: 3,
        }];
        assert_eq!(battery_quantity(&selections), 0);

        let battery = find(BATTERY_ID).unwrap();
        let selections = [LineSelection {
            item: battery,
            quantity: 2,
        }];
        assert_eq!(battery_quantity(&selections), 2);
    }

    #[test]
    fn unit_prices_are_non_negative() {
        assert!(CATALOG.iter().all(|i| i.unit_price >= 0));
    }
}
