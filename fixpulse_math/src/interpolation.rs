use crate::fixed_point::Fixed;

/// One sampling point of a two dimensional lookup table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point<const FRAC: u32> {
    /// X-coordinate of the sampling point
    pub x: Fixed<FRAC>,
    /// Y-coordinate of the sampling point
    pub y: Fixed<FRAC>,
}

/// Rectilinear grid of z samples over an x/y axis pair.
///
/// `z_values` stores one row per y sample with the x index running
/// fastest, so the sample for `(x_values[ix], y_values[iy])` lives at
/// `z_values[iy * x_values.len() + ix]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Table3D<'a, const FRAC: u32> {
    /// Grid samples along the x axis, strictly increasing
    pub x_values: &'a [Fixed<FRAC>],
    /// Grid samples along the y axis, strictly increasing
    pub y_values: &'a [Fixed<FRAC>],
    /// Z samples, `x_values.len() * y_values.len()` entries
    pub z_values: &'a [Fixed<FRAC>],
}

/// Linear interpolation on one segment with round to nearest.
///
/// Yinterpol = dx * DeltaY/DeltaX + Y0; half the x-span is added to the
/// numerator (sign matched) before the truncating divide.
fn interpolate_span(pos: i32, x0: i32, x1: i32, y0: i32, y1: i32) -> i32 {
    let dx = x1.wrapping_sub(x0);

    let mut result = pos.wrapping_sub(x0);
    result = result.wrapping_mul(y1.wrapping_sub(y0));
    if result >= 0 {
        result = result.wrapping_add(dx / 2);
    } else {
        result = result.wrapping_sub(dx / 2);
    }
    result /= dx;

    result.wrapping_add(y0)
}

/// Piecewise linear interpolation in a two dimensional lookup table.
///
/// Searches the segment whose x-range contains the input and
/// interpolates linearly between its two points. Inputs left of the
/// first point or right of the last one are extrapolated on the
/// respective border segment.
///
/// ### Arguments
/// * `x` - X-coordinate to evaluate the table at
/// * `lut` - Sampling points, at least two, x strictly increasing
///
/// ### Returns
/// The interpolated y-value, rounded to the nearest representable step.
///
/// ### Notes
/// Equal x-coordinates on neighboring points lead to a division by zero.
pub fn interpolate_2d<const FRAC: u32>(x: Fixed<FRAC>, lut: &[Point<FRAC>]) -> Fixed<FRAC> {
    // Search the matching segment; stop at the last one so inputs
    // beyond the table borders extrapolate
    let mut idx = 1;
    while idx < lut.len() - 1 && x > lut[idx].x {
        idx += 1;
    }

    Fixed::from_bits(interpolate_span(
        x.to_bits(),
        lut[idx - 1].x.to_bits(),
        lut[idx].x.to_bits(),
        lut[idx - 1].y.to_bits(),
        lut[idx].y.to_bits(),
    ))
}

/// Bilinear interpolation in a three dimensional lookup table.
///
/// Locates the grid cell containing the input point, interpolates z in
/// x-direction on the cell's two y-curves and then interpolates the two
/// intermediate values in y-direction. Inputs outside the grid are
/// extrapolated on the border cell of the respective axis.
///
/// ### Arguments
/// * `input` - X/y-coordinates to evaluate the grid at
/// * `lut` - Grid definition, at least two samples per axis
///
/// ### Returns
/// The interpolated z-value, each stage rounded to the nearest step.
///
/// ### Notes
/// Equal coordinates on neighboring grid samples lead to a division by
/// zero.
pub fn interpolate_3d<const FRAC: u32>(input: Point<FRAC>, lut: &Table3D<'_, FRAC>) -> Fixed<FRAC> {
    let nx = lut.x_values.len();

    // Search the x-range in the grid where the x-input-value lies in
    let mut ix2 = 1;
    while ix2 < nx - 1 && input.x > lut.x_values[ix2] {
        ix2 += 1;
    }

    // Search the y-range in the grid where the y-input-value lies in
    let mut iy2 = 1;
    while iy2 < lut.y_values.len() - 1 && input.y > lut.y_values[iy2] {
        iy2 += 1;
    }

    let x0 = lut.x_values[ix2 - 1].to_bits();
    let x1 = lut.x_values[ix2].to_bits();

    // Corner samples of the cell; borders of the cell double as the
    // extrapolation base when the input lies outside the grid
    let z_x1y1 = lut.z_values[(iy2 - 1) * nx + (ix2 - 1)].to_bits();
    let z_x2y1 = lut.z_values[(iy2 - 1) * nx + ix2].to_bits();
    let z_x1y2 = lut.z_values[iy2 * nx + (ix2 - 1)].to_bits();
    let z_x2y2 = lut.z_values[iy2 * nx + ix2].to_bits();

    // Interpolate z in x-direction on both y-curves
    let z1 = interpolate_span(input.x.to_bits(), x0, x1, z_x1y1, z_x2y1);
    let z2 = interpolate_span(input.x.to_bits(), x0, x1, z_x1y2, z_x2y2);

    // Interpolate z in y-direction
    Fixed::from_bits(interpolate_span(
        input.y.to_bits(),
        lut.y_values[iy2 - 1].to_bits(),
        lut.y_values[iy2].to_bits(),
        z1,
        z2,
    ))
}
