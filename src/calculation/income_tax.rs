//! Income tax tariff (§ 32a EStG, 2025).
//!
//! ## Brackets
//!
//! | taxable income (zvE)   | tax                                    |
//! |------------------------|----------------------------------------|
//! | up to 11 784           | 0                                      |
//! | up to 17 005           | `(922.98·y + 1400)·y`, y = (zvE − 11 784) / 10 000 |
//! | up to 66 760           | `(181.19·z + 2397)·z + 1025.38`, z = (zvE − 17 005) / 10 000 |
//! | up to 277 825          | `0.42·zvE − 10 602.13`                 |
//! | above                  | `0.45·zvE − 18 936.88`                 |
//!
//! zvE is rounded down to whole euros before the formulas apply. Each upper
//! bound belongs to its own bracket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Coefficients of one tariff year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTaxTariff {
    /// Upper bound of the tax-free zone (Grundfreibetrag).
    pub basic_allowance: Decimal,
    /// Upper bound of the first progressive zone.
    pub progression_1_end: Decimal,
    /// Quadratic and linear coefficients of the first progressive zone.
    pub progression_1: (Decimal, Decimal),
    /// Upper bound of the second progressive zone.
    pub progression_2_end: Decimal,
    /// Quadratic, linear and constant coefficients of the second zone.
    pub progression_2: (Decimal, Decimal, Decimal),
    /// Upper bound of the first proportional zone.
    pub proportional_1_end: Decimal,
    /// Rate and deduction of the first proportional zone.
    pub proportional_1: (Decimal, Decimal),
    /// Rate and deduction of the top zone.
    pub proportional_2: (Decimal, Decimal),
}

/// The 2025 tariff.
pub const TARIFF_2025: IncomeTaxTariff = IncomeTaxTariff {
    basic_allowance: dec!(11784),
    progression_1_end: dec!(17005),
    progression_1: (dec!(922.98), dec!(1400)),
    progression_2_end: dec!(66760),
    progression_2: (dec!(181.19), dec!(2397), dec!(1025.38)),
    proportional_1_end: dec!(277825),
    proportional_1: (dec!(0.42), dec!(10602.13)),
    proportional_2: (dec!(0.45), dec!(18936.88)),
};

const TEN_THOUSAND: Decimal = dec!(10000);

impl IncomeTaxTariff {
    /// Evaluates the tariff for a taxable income.
    ///
    /// The income is rounded down to whole euros first (§ 32a Abs. 1 EStG).
    /// Incomes at or below zero owe no tax.
    pub fn evaluate(&self, taxable_income: Decimal) -> Decimal {
        let zve = taxable_income.floor();

        if zve <= self.basic_allowance {
            Decimal::ZERO
        } else if zve <= self.progression_1_end {
            let (a, b) = self.progression_1;
            let y = (zve - self.basic_allowance) / TEN_THOUSAND;
            (a * y + b) * y
        } else if zve <= self.progression_2_end {
            let (a, b, c) = self.progression_2;
            let z = (zve - self.progression_1_end) / TEN_THOUSAND;
            (a * z + b) * z + c
        } else if zve <= self.proportional_1_end {
            let (rate, deduction) = self.proportional_1;
            rate * zve - deduction
        } else {
            let (rate, deduction) = self.proportional_2;
            rate * zve - deduction
        }
    }
}

/// Calculates the annual income tax on a taxable income with the 2025 tariff.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::income_tax;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(income_tax(dec!(11784)), dec!(0));
/// assert_eq!(income_tax(dec!(100000)), dec!(31397.87));
/// ```
pub fn income_tax(taxable_income: Decimal) -> Decimal {
    TARIFF_2025.evaluate(taxable_income)
}
