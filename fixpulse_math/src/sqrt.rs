/// Integer square root.
///
/// Digit-by-digit method after Jack W. Crenshaw, "Math Toolkit for
/// Real-Time Programming": two radicand bits are consumed per step, so
/// the result is exact after 16 steps with no multiplies or divides.
///
/// # Arguments [u32]
/// * `radicand` - Value for which the square root is computed
///
/// # Returns
/// Largest `root` with `root * root <= radicand`. The result always fits
/// in 16 bits but is kept in the native register width.
pub const fn isqrt(mut radicand: u32) -> u32 {
    let mut rem: u32 = 0;
    let mut root: u32 = 0;

    let mut idx = 0;
    while idx < 16 {
        // Shift the next two radicand bits into the remainder
        root <<= 1;
        rem = (rem << 2) + (radicand >> 30);
        radicand <<= 2;

        // Try the next result bit
        root += 1;
        if root <= rem {
            rem -= root;
            root += 1;
        } else {
            root -= 1;
        }
        idx += 1;
    }

    root >> 1
}
