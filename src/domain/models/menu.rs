#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;

use super::Flavor;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub const GREETING: &str =
    "¡Hola! Soy el asistente de Supercakes. Cuéntame cómo imaginas tu pastel y armamos el pedido juntos.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Mxn,
}

impl Currency {
    pub fn parse(text: &str) -> Option<Currency> {
        match text.to_lowercase().as_str() {
            "usd" => return Some(Currency::Usd),
            "mxn" => return Some(Currency::Mxn),
            _ => return None,
        }
    }

    pub fn active() -> Currency {
        return Currency::parse(&Config::get(ConfigKey::Currency)).unwrap_or(Currency::Usd);
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => return "$",
            Currency::Mxn => return "MX$",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceSchedule {
    pub base: u64,
    pub per_portion: u64,
    pub custom_design: u64,
}

impl PriceSchedule {
    pub fn for_currency(currency: Currency) -> PriceSchedule {
        match currency {
            Currency::Usd => {
                return PriceSchedule {
                    base: 30,
                    per_portion: 5,
                    custom_design: 20,
                }
            }
            Currency::Mxn => {
                return PriceSchedule {
                    base: 550,
                    per_portion: 90,
                    custom_design: 350,
                }
            }
        }
    }

    pub fn active() -> PriceSchedule {
        return PriceSchedule::for_currency(Currency::active());
    }

    /// Total for an order. Every current call site charges the custom design
    /// surcharge.
    pub fn quote(&self, portions: u32, custom_design: bool) -> u64 {
        let mut total = self.base + u64::from(portions) * self.per_portion;
        if custom_design {
            total += self.custom_design;
        }

        return total;
    }
}

pub fn assistant_instruction(currency: Currency, strict_replies: bool) -> String {
    let schedule = PriceSchedule::for_currency(currency);
    let symbol = currency.symbol();
    let flavors = Flavor::PRIORITY
        .iter()
        .map(|flavor| {
            return flavor.to_string();
        })
        .collect::<Vec<String>>()
        .join(", ");

    let mut instruction = format!(
        "Eres un asistente virtual para Supercakes, una pastelería personalizada.
Debes ser amable y profesional. Guía al cliente por estos pasos:
1. Solicitar detalles del diseño del pastel
2. Preguntar número de porciones
3. Seleccionar sabor
4. Confirmar fecha de entrega
5. Dar precio final y opciones de pago

Sabores disponibles: {flavors}
Precio base: {symbol}{base} + {symbol}{per_portion} por porción + {symbol}{custom} por diseño personalizado",
        base = schedule.base,
        per_portion = schedule.per_portion,
        custom = schedule.custom_design,
    );

    if strict_replies {
        instruction += "

Responde siempre con un solo párrafo corto, sin listas ni formato markdown.
Al confirmar el pedido completo indica el total exacto y las opciones de pago: transferencia bancaria o efectivo al recoger.";
    }

    return instruction;
}

pub fn active_instruction() -> String {
    return assistant_instruction(
        Currency::active(),
        Config::get(ConfigKey::StrictReplies) == "true",
    );
}
