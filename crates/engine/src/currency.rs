use crate::EngineError;

/// ISO currency code stored with every money event.
///
/// The bot records every expense in a single configured currency, Argentine
/// pesos unless the deployment says otherwise. All supported currencies use
/// two minor units, which is what [`Money`](crate::Money) assumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Ars,
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ARS" => Ok(Currency::Ars),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::InvalidCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("ars").unwrap(), Currency::Ars);
        assert_eq!(Currency::try_from(" USD ").unwrap(), Currency::Usd);
        assert_eq!(
            Currency::try_from("btc"),
            Err(EngineError::InvalidCurrency("BTC".to_string()))
        );
    }
}
