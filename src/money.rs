//! Money Arithmetic
//!
//! Row totals, grand totals and dual-currency display strings. Pure
//! functions of the row inputs and an explicitly passed currency rate.

/// Fixed VAT surcharge
pub const VAT_RATE: f64 = 0.20;

/// BGN per EUR until the server reports a rate
pub const DEFAULT_EUR_RATE: f64 = 1.95583;

/// Rate between the primary (BGN) and secondary (EUR) currency
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrencyRate(f64);

impl CurrencyRate {
    /// Only positive finite rates are accepted
    pub fn new(rate: f64) -> Option<Self> {
        (rate.is_finite() && rate > 0.0).then_some(Self(rate))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn to_secondary(self, amount: f64) -> f64 {
        amount / self.0
    }
}

impl Default for CurrencyRate {
    fn default() -> Self {
        Self(DEFAULT_EUR_RATE)
    }
}

/// Browser `parseFloat` semantics: longest numeric prefix, else 0
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = if matches!(bytes.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `Number.prototype.toFixed(2)`: nearest, ties away from zero
pub fn to_fixed2(amount: f64) -> String {
    let eighths = amount * 8.0;
    // Only multiples of 1/8 can sit exactly on a half-cent in binary
    let value = if eighths.fract() == 0.0 && (eighths as i64) % 2 != 0 {
        (amount * 100.0).round() / 100.0
    } else {
        amount
    };
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// One row's inputs after parsing
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineInput {
    pub quantity: f64,
    pub price: f64,
    pub include_vat: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowAmounts {
    /// quantity × price, before VAT
    pub base_total: f64,
    pub vat: f64,
    pub unit_price_display: f64,
    pub total_display: f64,
}

pub fn row_amounts(line: LineInput) -> RowAmounts {
    let base_total = line.quantity * line.price;
    if line.include_vat {
        RowAmounts {
            base_total,
            vat: base_total * VAT_RATE,
            unit_price_display: line.price * (1.0 + VAT_RATE),
            total_display: base_total * (1.0 + VAT_RATE),
        }
    } else {
        RowAmounts {
            base_total,
            vat: 0.0,
            unit_price_display: line.price,
            total_display: base_total,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrandTotals {
    pub without_vat: f64,
    pub vat: f64,
    pub with_vat: f64,
    pub has_vat_items: bool,
}

pub fn grand_totals<I>(lines: I) -> GrandTotals
where
    I: IntoIterator<Item = LineInput>,
{
    let mut totals = GrandTotals::default();
    for line in lines {
        let amounts = row_amounts(line);
        totals.without_vat += amounts.base_total;
        totals.vat += amounts.vat;
        totals.has_vat_items |= line.include_vat;
    }
    totals.with_vat = totals.without_vat + totals.vat;
    totals
}

pub fn total_label(has_vat_items: bool) -> &'static str {
    if has_vat_items {
        "Общо с ДДС:"
    } else {
        "Общо:"
    }
}

/// Amount rendered in both currencies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DualAmount {
    pub primary: String,
    pub secondary: String,
}

pub fn dual_amount(amount: f64, rate: CurrencyRate) -> DualAmount {
    DualAmount {
        primary: format!("{} лв.", to_fixed2(amount)),
        secondary: format!("{} €", to_fixed2(rate.to_secondary(amount))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: f64, price: f64, include_vat: bool) -> LineInput {
        LineInput { quantity, price, include_vat }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount("  3"), 3.0);
        assert_eq!(parse_amount("2,5"), 2.0);
        assert_eq!(parse_amount("7abc"), 7.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("-4"), -4.0);
        assert_eq!(parse_amount("1e2"), 100.0);
        assert_eq!(parse_amount("1e"), 1.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
    }

    #[test]
    fn test_to_fixed2() {
        assert_eq!(to_fixed2(25.0), "25.00");
        assert_eq!(to_fixed2(0.125), "0.13");
        assert_eq!(to_fixed2(1.005), "1.00");
        assert_eq!(to_fixed2(-0.0), "0.00");
        assert_eq!(to_fixed2(12.345678), "12.35");
    }

    #[test]
    fn test_row_without_vat() {
        let amounts = row_amounts(line(3.0, 4.5, false));
        assert_eq!(amounts.base_total, 13.5);
        assert_eq!(amounts.total_display, 13.5);
        assert_eq!(amounts.unit_price_display, 4.5);
        assert_eq!(amounts.vat, 0.0);
    }

    #[test]
    fn test_row_with_vat() {
        let amounts = row_amounts(line(2.0, 10.0, true));
        assert_eq!(to_fixed2(amounts.unit_price_display), "12.00");
        assert_eq!(to_fixed2(amounts.total_display), "24.00");
        assert_eq!(to_fixed2(amounts.vat), "4.00");
    }

    #[test]
    fn test_grand_totals_mixed_rows() {
        let totals = grand_totals(vec![line(2.0, 10.0, false), line(1.0, 5.0, true)]);
        assert_eq!(to_fixed2(totals.without_vat), "25.00");
        assert_eq!(to_fixed2(totals.vat), "1.00");
        assert_eq!(to_fixed2(totals.with_vat), "26.00");
        assert!(totals.has_vat_items);
        assert_eq!(total_label(totals.has_vat_items), "Общо с ДДС:");
    }

    #[test]
    fn test_grand_totals_without_vat_rows() {
        let totals = grand_totals(vec![line(1.0, 3.0, false)]);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.with_vat, totals.without_vat);
        assert!(!totals.has_vat_items);
        assert_eq!(total_label(false), "Общо:");
        assert_eq!(grand_totals(Vec::new()), GrandTotals::default());
    }

    #[test]
    fn test_dual_amount() {
        let rate = CurrencyRate::new(1.95583).unwrap();
        let display = dual_amount(100.0, rate);
        assert_eq!(display.primary, "100.00 лв.");
        assert_eq!(display.secondary, "51.13 €");
        assert_eq!(dual_amount(0.0, CurrencyRate::default()).secondary, "0.00 €");
    }

    #[test]
    fn test_rate_validation() {
        assert!(CurrencyRate::new(0.0).is_none());
        assert!(CurrencyRate::new(-1.0).is_none());
        assert!(CurrencyRate::new(f64::NAN).is_none());
        assert_eq!(CurrencyRate::new(2.0).unwrap().to_secondary(5.0), 2.5);
    }
}
