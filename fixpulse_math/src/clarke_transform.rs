use crate::cordic::Cartesian;
use crate::fixed_point::Fixed;

/// Instantaneous values of a three phase system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThreePhase<const FRAC: u32> {
    /// Phase A component
    pub a: Fixed<FRAC>,
    /// Phase B component
    pub b: Fixed<FRAC>,
    /// Phase C component
    pub c: Fixed<FRAC>,
}

/// Performs the Clarke transform to calculate the two axis `alpha`/`beta`
/// representation from the phase values `a`, `b`, and `c`.
///
/// Assumes a balanced system (`a + b + c = 0`), so phase C never enters
/// the arithmetic: beta is formed as `(a + 2 * b) / sqrt(3)`.
///
/// # Parameters
/// - `input`: Phase values; any fixed point format.
///
/// # Returns
/// A cartesian vector with `re` on the alpha axis and `im` on the beta axis.
#[inline]
pub fn clarke<const FRAC: u32>(input: ThreePhase<FRAC>) -> Cartesian<FRAC> {
    // Alpha axis coincides with phase A
    let re = input.a;

    // Beta component: (A + 2 * B) / sqrt(3)
    let im = (input.b + input.b + input.a).scale(SQRT3_INV_Q15);

    Cartesian { re, im }
}

/// Performs the inverse Clarke transform to calculate phase values (A, B, C)
/// from a two axis `alpha`/`beta` vector.
///
/// # Parameters
/// - `input`: Cartesian vector with `re` on the alpha axis and `im` on the
///   beta axis; any fixed point format.
///
/// # Returns
/// The phase values. For a zero-sum check note that `a + b + c` may keep a
/// single LSB of truncation residue when `re` is odd.
#[inline]
pub fn inverse_clarke<const FRAC: u32>(input: Cartesian<FRAC>) -> ThreePhase<FRAC> {
    // Project the beta axis onto the 120 degree phase directions
    let beta_sqrt3_div2 = input.im.scale(SQRT3_DIV2_Q16);

    // Phase A coincides with the alpha axis
    let a = input.re;

    let neg_half_alpha = Fixed::from_bits(-(input.re.to_bits() >> 1));

    // Phase B: -1/2 * V_alpha + sqrt(3)/2 * V_beta
    let b = neg_half_alpha + beta_sqrt3_div2;

    // Phase C: -1/2 * V_alpha - sqrt(3)/2 * V_beta
    let c = neg_half_alpha - beta_sqrt3_div2;

    ThreePhase { a, b, c }
}

/// Precalculated 1/sqrt(3) in q15 format
const SQRT3_INV_Q15: Fixed<15> = Fixed::from_num(0.577350279);
/// Precalculated sqrt(3)
const SQRT3: f64 = 1.7320508075688772;
/// Precalculated scaling factor for sqrt(3)/2 in q16 format
const SQRT3_DIV2_Q16: Fixed<16> = Fixed::from_num(SQRT3 / 2.0);
