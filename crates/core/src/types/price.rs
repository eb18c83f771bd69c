//! Variant prices.
//!
//! The backend sends amounts as plain JSON numbers in the currency's standard
//! unit and currency codes in lowercase (`"usd"`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole-number amount.
    #[must_use]
    pub fn whole(amount: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(amount), currency_code)
    }
}

/// ISO 4217 currency codes, serialized lowercase.
///
/// Codes without a named variant are kept in [`CurrencyCode::Other`] so a
/// product priced in any currency still parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Dkk,
    /// Any other code, lowercased.
    Other(String),
}

impl CurrencyCode {
    /// The lowercase code as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Cad => "cad",
            Self::Aud => "aud",
            Self::Dkk => "dkk",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        let code = code.to_ascii_lowercase();
        match code.as_str() {
            "usd" => Self::Usd,
            "eur" => Self::Eur,
            "gbp" => Self::Gbp,
            "cad" => Self::Cad,
            "aud" => Self::Aud,
            "dkk" => Self::Dkk,
            _ => Self::Other(code),
        }
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        match code {
            CurrencyCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::whole(1000, CurrencyCode::Usd);
        let value = serde_json::to_value(price).unwrap();
        assert_eq!(value["currency_code"], "usd");
        assert_eq!(value["amount"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_price_accepts_integer_and_float_amounts() {
        let int: Price =
            serde_json::from_str(r#"{"amount": 1000, "currency_code": "usd"}"#).unwrap();
        assert_eq!(int, Price::whole(1000, CurrencyCode::Usd));

        let float: Price =
            serde_json::from_str(r#"{"amount": 12.5, "currency_code": "eur"}"#).unwrap();
        assert_eq!(float.amount, Decimal::new(125, 1));
        assert_eq!(float.currency_code, CurrencyCode::Eur);
    }

    #[test]
    fn test_price_in_unlisted_currency() {
        let price: Price =
            serde_json::from_str(r#"{"amount": 500, "currency_code": "jpy"}"#).unwrap();
        assert_eq!(price.currency_code, CurrencyCode::Other("jpy".to_string()));
        assert_eq!(price.currency_code.as_str(), "jpy");
        assert_eq!(serde_json::to_value(&price).unwrap()["currency_code"], "jpy");
    }

    #[test]
    fn test_currency_code_is_case_insensitive() {
        assert_eq!(CurrencyCode::from("USD".to_string()), CurrencyCode::Usd);
    }
}
