use core::ops::{Add, Div, Mul, Neg, Sub};

/// Number of fractional bits of the firmware-wide fixed point format.
///
/// CONFIGURE HERE THE DESIRED FP FORMAT. Valid range is 0..=30.
pub const GLOBAL_FORMAT: u32 = 12;

/// Fixed point number in the firmware-wide format (see [`GLOBAL_FORMAT`]).
pub type Fp = Fixed<GLOBAL_FORMAT>;

/// Signed fixed point number with `FRAC` fractional bits.
///
/// The raw value is an `i32` scaled by `2^FRAC`, so `Fixed<12>` stores
/// 1.0 as 4096. The fractional width is part of the type; mixing formats
/// requires an explicit [`Fixed::rescale`] or [`Fixed::scale`].
///
/// All arithmetic is silent on overflow: products are computed in `i64`
/// and narrowed back with wrapping semantics, additions wrap. Selecting a
/// format wide enough for the value range is the caller's responsibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Fixed<const FRAC: u32>(i32);

impl<const FRAC: u32> Fixed<FRAC> {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << FRAC);

    /// Builds a fixed point number from a real literal.
    ///
    /// # Arguments
    /// * `value` - The real value, e.g. `0.607253` [f64]
    ///
    /// # Returns
    /// The value scaled by `2^FRAC`, fractional rest truncated toward zero
    pub const fn from_num(value: f64) -> Self {
        Self((value * (1i64 << FRAC) as f64) as i32)
    }

    /// Builds a fixed point number from an integer value (no fraction).
    pub const fn from_int(value: i32) -> Self {
        Self(value << FRAC)
    }

    /// Reinterprets a raw scaled integer as a fixed point number.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw scaled integer.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Converts back to a real value (host side reporting and tests).
    pub const fn to_num(self) -> f64 {
        self.0 as f64 / (1i64 << FRAC) as f64
    }

    /// Converts to another fixed point format.
    ///
    /// Widening (`TO >= FRAC`) is lossless. Narrowing divides the raw
    /// value by `2^(FRAC - TO)`, truncating toward zero - a deliberate,
    /// non-rounding precision drop.
    ///
    /// # Returns
    /// The same value expressed with `TO` fractional bits
    pub const fn rescale<const TO: u32>(self) -> Fixed<TO> {
        if TO >= FRAC {
            Fixed(self.0 << (TO - FRAC))
        } else {
            Fixed(self.0 / (1 << (FRAC - TO)))
        }
    }

    /// Multiplies two numbers of the same format.
    ///
    /// The raw product is computed in `i64` and divided by `2^FRAC`
    /// (truncating toward zero) to restore the format.
    pub const fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) / (1i64 << FRAC)) as i32)
    }

    /// Divides two numbers of the same format.
    ///
    /// The dividend is pre-scaled by `2^FRAC` before the integer division,
    /// so the quotient keeps the format. Division by zero panics.
    pub const fn div(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * (1i64 << FRAC)) / rhs.0 as i64) as i32)
    }

    /// Multiplies by a dimensionless coefficient held in another format.
    ///
    /// # Arguments
    /// * `coeff` - Coefficient with `C` fractional bits, e.g. a Q15 constant
    ///
    /// # Returns
    /// The scaled value, still with `FRAC` fractional bits
    pub const fn scale<const C: u32>(self, coeff: Fixed<C>) -> Self {
        Self(((self.0 as i64 * coeff.0 as i64) / (1i64 << C)) as i32)
    }

    /// Magnitude of the value, format preserved. `i32::MIN` wraps.
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }
}

impl<const FRAC: u32> Add for Fixed<FRAC> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl<const FRAC: u32> Sub for Fixed<FRAC> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl<const FRAC: u32> Neg for Fixed<FRAC> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl<const FRAC: u32> Mul for Fixed<FRAC> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Fixed::mul(self, rhs)
    }
}

impl<const FRAC: u32> Div for Fixed<FRAC> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Fixed::div(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_construction_truncates_toward_zero() {
        assert_eq!(Fp::from_num(0.5).to_bits(), 2048);
        assert_eq!(Fp::from_num(-0.5).to_bits(), -2048);
        // 0.3 * 4096 = 1228.8 -> 1228, same magnitude for both signs
        assert_eq!(Fp::from_num(0.3).to_bits(), 1228);
        assert_eq!(Fp::from_num(-0.3).to_bits(), -1228);
        assert_eq!(Fp::from_int(3).to_bits(), 3 << 12);
        assert_eq!(Fp::ONE.to_bits(), 4096);
        assert_eq!(Fp::ZERO.to_bits(), 0);
        // exactly representable values survive the round trip
        assert_eq!(Fp::from_num(0.25).to_num(), 0.25);
        assert_eq!(Fp::from_num(-1.5).to_num(), -1.5);
    }

    #[test]
    fn rescale_widening_is_lossless() {
        let v = Fixed::<12>::from_bits(-5);
        assert_eq!(v.rescale::<14>().to_bits(), -20);
        assert_eq!(v.rescale::<14>().rescale::<12>(), v);
        assert_eq!(v.rescale::<12>(), v);
    }

    #[test]
    fn rescale_narrowing_truncates_toward_zero() {
        // -5 / 4 = -1.25; truncation gives -1, a floor would give -2
        assert_eq!(Fixed::<12>::from_bits(-5).rescale::<10>().to_bits(), -1);
        assert_eq!(Fixed::<12>::from_bits(5).rescale::<10>().to_bits(), 1);
        assert_eq!(Fixed::<15>::from_num(0.577350279).to_bits(), 18918);
        assert_eq!(
            Fixed::<15>::from_num(0.577350279).rescale::<12>().to_bits(),
            2364
        );
    }

    #[test]
    fn mul_restores_format() {
        assert_eq!(Fp::from_num(2.0).mul(Fp::from_num(3.0)), Fp::from_num(6.0));
        assert_eq!(
            Fp::from_num(0.5).mul(Fp::from_num(0.3)),
            Fp::from_num(0.15)
        );
        assert_eq!(
            Fp::from_num(-0.5).mul(Fp::from_num(0.3)),
            Fp::from_num(-0.15)
        );
    }

    #[test]
    fn mul_truncates_toward_zero() {
        // -5 * 0.5 = -2.5 raw; truncation gives -2, a floor would give -3
        let v = Fp::from_bits(-5).mul(Fp::from_num(0.5));
        assert_eq!(v.to_bits(), -2);
    }

    #[test]
    fn div_restores_format() {
        let third = Fp::from_num(1.0).div(Fp::from_num(3.0));
        assert_eq!(third.to_bits(), 1365); // 4096 / 3 = 1365.33..
        let neg_third = Fp::from_num(-1.0).div(Fp::from_num(3.0));
        assert_eq!(neg_third.to_bits(), -1365); // toward zero, not -1366
        assert_eq!(Fp::from_num(5.0).div(Fp::from_num(2.0)), Fp::from_num(2.5));
    }

    #[test]
    fn scale_applies_foreign_format_coefficient() {
        let coeff = Fixed::<15>::from_num(0.577350279);
        assert_eq!(Fp::from_bits(4096).scale(coeff).to_bits(), 2364);
        assert_eq!(Fp::from_bits(-4096).scale(coeff).to_bits(), -2364);
    }

    #[test]
    fn abs_preserves_format() {
        assert_eq!(Fp::from_num(-2.5).abs(), Fp::from_num(2.5));
        assert_eq!(Fp::from_num(2.5).abs(), Fp::from_num(2.5));
        assert_eq!(Fp::ZERO.abs(), Fp::ZERO);
    }

    #[test]
    fn operators_match_primitives() {
        let a = Fp::from_num(1.5);
        let b = Fp::from_num(0.25);
        assert_eq!((a + b).to_bits(), a.to_bits() + b.to_bits());
        assert_eq!((a - b).to_bits(), a.to_bits() - b.to_bits());
        assert_eq!((-a).to_bits(), -a.to_bits());
        assert_eq!(a * b, a.mul(b));
        assert_eq!(a / b, a.div(b));
    }
}
