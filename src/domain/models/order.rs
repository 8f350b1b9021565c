use std::fmt;

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    Chocolate,
    Vainilla,
    Fresa,
    RedVelvet,
}

impl Flavor {
    /// Matching priority when a message mentions several flavors.
    pub const PRIORITY: [Flavor; 4] = [
        Flavor::Chocolate,
        Flavor::Vainilla,
        Flavor::Fresa,
        Flavor::RedVelvet,
    ];
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flavor::Chocolate => "Chocolate",
            Flavor::Vainilla => "Vainilla",
            Flavor::Fresa => "Fresa",
            Flavor::RedVelvet => "Red Velvet",
        };

        return write!(f, "{name}");
    }
}

/// The in-progress customer request assembled over the conversation.
///
/// `design` and `delivery_date` are collected conversationally by the model
/// but no extraction rule writes them back here yet.
/// TODO: extract design and delivery_date once their wording rules are agreed
/// on with the shop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Order {
    pub design: Option<String>,
    pub portions: Option<u32>,
    pub flavor: Option<Flavor>,
    pub delivery_date: Option<NaiveDate>,
    pub price: Option<u64>,
}
