#[cfg(test)]
#[path = "order_updates_test.rs"]
mod tests;

use crate::domain::models::Flavor;
use crate::domain::models::Order;
use crate::domain::models::PriceSchedule;

/// Phrases that make a turn request an AI preview image of the design.
const PREVIEW_KEYWORDS: [&str; 4] = [
    "muéstrame el diseño",
    "muestrame el diseño",
    "ver el diseño",
    "genera una imagen",
];

#[derive(Debug, PartialEq, Eq)]
pub enum PortionScan {
    /// The message never mentions portions.
    Absent,
    /// Portions are mentioned, but the digits in the message don't parse to a
    /// count. Distinguished from Absent so callers can log it.
    Unparseable,
    Found(u32),
}

pub struct OrderUpdates {}

impl OrderUpdates {
    /// Looks for a portion count in a message mentioning "porciones". All
    /// digits in the message are concatenated before parsing, so "quiero 1 2
    /// porciones" reads as 12 and unrelated numbers in the message skew the
    /// count.
    pub fn scan_portions(text: &str) -> PortionScan {
        if !text.to_lowercase().contains("porciones") {
            return PortionScan::Absent;
        }

        let digits = text
            .chars()
            .filter(|c| return c.is_ascii_digit())
            .collect::<String>();

        match digits.parse::<u32>() {
            Ok(portions) => return PortionScan::Found(portions),
            Err(_) => return PortionScan::Unparseable,
        }
    }

    /// First flavor mentioned anywhere in the message, by fixed priority
    /// order. A message naming several flavors resolves to the highest
    /// priority one.
    pub fn scan_flavor(text: &str) -> Option<Flavor> {
        let lowered = text.to_lowercase();
        for flavor in Flavor::PRIORITY {
            if lowered.contains(&flavor.to_string().to_lowercase()) {
                return Some(flavor);
            }
        }

        return None;
    }

    pub fn requests_design_preview(text: &str) -> bool {
        let lowered = text.to_lowercase();
        return PREVIEW_KEYWORDS.iter().any(|keyword| {
            return lowered.contains(keyword);
        });
    }

    /// Updates the order from the latest customer message. Every quote
    /// charges the custom design surcharge, as all cakes here are custom.
    pub fn apply(order: &mut Order, text: &str) {
        match OrderUpdates::scan_portions(text) {
            PortionScan::Found(portions) => {
                order.portions = Some(portions);
                order.price = Some(PriceSchedule::active().quote(portions, true));
            }
            PortionScan::Unparseable => {
                tracing::debug!(text = text, "portions mentioned without a readable count");
            }
            PortionScan::Absent => {}
        }

        if let Some(flavor) = OrderUpdates::scan_flavor(text) {
            order.flavor = Some(flavor);
        }
    }
}
