//! ISO 4217 currency metadata used for rounding and formatting.

use argentum_core::helper::round_half_up;

/// Decimal places used when the currency is unknown or unset.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub numeric: &'static str,
    pub decimals: u32,
}

const CURRENCIES: &[Currency] = &[
    Currency { code: "ARS", numeric: "032", decimals: 2 },
    Currency { code: "BHD", numeric: "048", decimals: 3 },
    Currency { code: "BRL", numeric: "986", decimals: 2 },
    Currency { code: "CAD", numeric: "124", decimals: 2 },
    Currency { code: "CHF", numeric: "756", decimals: 2 },
    Currency { code: "CLP", numeric: "152", decimals: 0 },
    Currency { code: "CNY", numeric: "156", decimals: 2 },
    Currency { code: "COP", numeric: "170", decimals: 2 },
    Currency { code: "EUR", numeric: "978", decimals: 2 },
    Currency { code: "GBP", numeric: "826", decimals: 2 },
    Currency { code: "JOD", numeric: "400", decimals: 3 },
    Currency { code: "JPY", numeric: "392", decimals: 0 },
    Currency { code: "KRW", numeric: "410", decimals: 0 },
    Currency { code: "KWD", numeric: "414", decimals: 3 },
    Currency { code: "MXN", numeric: "484", decimals: 2 },
    Currency { code: "OMR", numeric: "512", decimals: 3 },
    Currency { code: "PEN", numeric: "604", decimals: 2 },
    Currency { code: "TND", numeric: "788", decimals: 3 },
    Currency { code: "USD", numeric: "840", decimals: 2 },
    Currency { code: "UYU", numeric: "858", decimals: 2 },
];

impl Currency {
    /// Case-insensitive lookup by alphabetic code.
    pub fn find(code: &str) -> Option<&'static Currency> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

/// Decimal places for `code`, defaulting to two.
pub fn decimal_places(code: Option<&str>) -> u32 {
    code.and_then(Currency::find)
        .map(|c| c.decimals)
        .unwrap_or(DEFAULT_DECIMAL_PLACES)
}

/// Plain fixed-point rendering (`.` separator, no grouping).
pub fn format_amount(amount: f64, places: u32) -> String {
    format!("{:.*}", places as usize, round_half_up(amount, places))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_currency_case_insensitively() {
        let mxn = Currency::find("mxn").unwrap();
        assert_eq!(mxn.numeric, "484");
        assert_eq!(mxn.decimals, 2);
        assert!(Currency::find("XXX").is_none());
    }

    #[test]
    fn decimal_places_default_to_two() {
        assert_eq!(decimal_places(Some("JPY")), 0);
        assert_eq!(decimal_places(Some("KWD")), 3);
        assert_eq!(decimal_places(Some("ZZZ")), 2);
        assert_eq!(decimal_places(None), 2);
    }

    #[test]
    fn formats_with_half_up_rounding() {
        assert_eq!(format_amount(220.4, 2), "220.40");
        assert_eq!(format_amount(1.005, 2), "1.01");
        assert_eq!(format_amount(1234.5, 0), "1235");
        assert_eq!(format_amount(-0.125, 2), "-0.13");
    }
}
