use crate::fixed_point::Fixed;
use crate::trigonometry::{Angle, NEG_PI_HALF, PI_HALF};

/// Complex number in cartesian format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cartesian<const FRAC: u32> {
    /// Real part of the complex number
    pub re: Fixed<FRAC>,
    /// Imag part of the complex number
    pub im: Fixed<FRAC>,
}

/// Complex number in polar format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polar<const FRAC: u32> {
    /// Magnitude of the complex vector
    pub mag: Fixed<FRAC>,
    /// Angle of the complex vector
    pub angle: Angle,
}

/// No. of CORDIC iterations.
const CORDIC_ITERATIONS: usize = 14;

/// CORDIC angle iteration step sizes (q15 angle units).
///
/// Entry i approximates atan(2^-i); the values halve monotonically and
/// the tail falls below the angle resolution, terminating at zero.
const CORDIC_ANGLE_TAB_Q15: [Angle; 16] = [
    8192, 4836, 2555, 1297, 651, 326, 163, 81, 41, 20, 10, 5, 3, 1, 1, 0,
];

/// Gain compensation of the shift-add rotations, equal to 0.607253 (q16).
const CORDIC_SCALE_Q16: i32 = Fixed::<16>::from_num(0.607253).to_bits();

/// Conversion from cartesian to polar coordinates.
///
/// Vectoring-mode CORDIC: the vector is rotated toward the positive real
/// axis in 14 fixed shift-add steps while the applied rotation angles are
/// accumulated. Inputs in quadrants II/III are pre-rotated by a quarter
/// turn into the right half plane, which guarantees convergence; the
/// quarter turn is added back to the accumulated angle at the end, with
/// the wraparound past +-180 degrees being the defined representation.
///
/// # Arguments
/// * `input` - The cartesian vector; any fixed point format
///
/// # Returns
/// The magnitude (gain corrected, same format as the input) and the angle
/// in wraparound units. The degenerate input `(0, 0)` has no direction
/// and returns magnitude 0 with angle 0.
pub const fn cart2pol<const FRAC: u32>(input: Cartesian<FRAC>) -> Polar<FRAC> {
    let mut re = input.re.to_bits();
    let mut im = input.im.to_bits();

    if re == 0 && im == 0 {
        return Polar {
            mag: Fixed::ZERO,
            angle: 0,
        };
    }

    // Fold quadrants II/III into the right half plane
    let offset: Angle = if re < 0 {
        let tmp = re;
        if im < 0 {
            // Quadrant III: pre-rotate by +90 degrees
            re = im.wrapping_neg();
            im = tmp;
            NEG_PI_HALF
        } else {
            // Quadrant II: pre-rotate by -90 degrees
            re = im;
            im = tmp.wrapping_neg();
            PI_HALF
        }
    } else {
        // Quadrant I or IV
        0
    };

    let mut angle: Angle = 0;
    let mut i = 0;
    while i < CORDIC_ITERATIONS {
        if im < 0 {
            // Imaginary part is negative => rotate counter clock wise
            let re_next = re.wrapping_sub(im >> i);
            let im_next = im.wrapping_add(re >> i);
            re = re_next;
            im = im_next;
            angle = angle.wrapping_sub(CORDIC_ANGLE_TAB_Q15[i]);
        } else {
            // Imaginary part is positive => rotate clock wise
            let re_next = re.wrapping_add(im >> i);
            let im_next = im.wrapping_sub(re >> i);
            re = re_next;
            im = im_next;
            angle = angle.wrapping_add(CORDIC_ANGLE_TAB_Q15[i]);
        }
        i += 1;
    }

    Polar {
        mag: Fixed::from_bits(((CORDIC_SCALE_Q16 as i64 * re as i64) >> 16) as i32),
        angle: angle.wrapping_add(offset),
    }
}
