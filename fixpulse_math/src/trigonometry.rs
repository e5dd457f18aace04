use crate::fixed_point::Fixed;

/// Angle type where the full `i16` range represents one turn (65536
/// angle units per 360 degrees). Arithmetic on angles wraps, which makes
/// an explicit normalization step unnecessary.
pub type Angle = i16;

/// 180 degrees
pub const PI: Angle = 32767;
/// -180 degrees (the wraparound twin of [`PI`])
pub const NEG_PI: Angle = -32768;
/// 90 degrees
pub const PI_HALF: Angle = 16384;
/// -90 degrees
pub const NEG_PI_HALF: Angle = -16384;
/// 45 degrees
pub const PI_QUARTER: Angle = 8192;
/// -45 degrees
pub const NEG_PI_QUARTER: Angle = -8192;
/// 60 degrees
pub const PI_THIRD: Angle = 10923;

/// No. of angle bits mapped onto the sine table index.
const SINE_TAB_ANGLE_BITS: u32 = 8;

/// Shorthand for the q15 table literals below.
const fn q15(value: f64) -> Fixed<15> {
    Fixed::from_num(value)
}

/// Sine look-up-table spanning one full period.
///
/// The table consists of 256 entries in q15 fixed point format. The peak
/// value q15(1.0) = 32768 is one past `i16::MAX`, so the entries are kept
/// as 32-bit fixed point numbers.
const SINE_TAB_Q15: [Fixed<15>; 256] = [
    q15(0.0000000000), q15(0.0245412285), q15(0.0490676743), q15(0.0735645636),
    q15(0.0980171403), q15(0.1224106752), q15(0.1467304745), q15(0.1709618888),
    q15(0.1950903220), q15(0.2191012402), q15(0.2429801799), q15(0.2667127575),
    q15(0.2902846773), q15(0.3136817404), q15(0.3368898534), q15(0.3598950365),
    q15(0.3826834324), q15(0.4052413140), q15(0.4275550934), q15(0.4496113297),
    q15(0.4713967368), q15(0.4928981922), q15(0.5141027442), q15(0.5349976199),
    q15(0.5555702330), q15(0.5758081914), q15(0.5956993045), q15(0.6152315906),
    q15(0.6343932842), q15(0.6531728430), q15(0.6715589548), q15(0.6895405447),
    q15(0.7071067812), q15(0.7242470830), q15(0.7409511254), q15(0.7572088465),
    q15(0.7730104534), q15(0.7883464276), q15(0.8032075315), q15(0.8175848132),
    q15(0.8314696123), q15(0.8448535652), q15(0.8577286100), q15(0.8700869911),
    q15(0.8819212643), q15(0.8932243012), q15(0.9039892931), q15(0.9142097557),
    q15(0.9238795325), q15(0.9329927988), q15(0.9415440652), q15(0.9495281806),
    q15(0.9569403357), q15(0.9637760658), q15(0.9700312532), q15(0.9757021300),
    q15(0.9807852804), q15(0.9852776424), q15(0.9891765100), q15(0.9924795346),
    q15(0.9951847267), q15(0.9972904567), q15(0.9987954562), q15(0.9996988187),
    q15(1.0000000000), q15(0.9996988187), q15(0.9987954562), q15(0.9972904567),
    q15(0.9951847267), q15(0.9924795346), q15(0.9891765100), q15(0.9852776424),
    q15(0.9807852804), q15(0.9757021300), q15(0.9700312532), q15(0.9637760658),
    q15(0.9569403357), q15(0.9495281806), q15(0.9415440652), q15(0.9329927988),
    q15(0.9238795325), q15(0.9142097557), q15(0.9039892931), q15(0.8932243012),
    q15(0.8819212643), q15(0.8700869911), q15(0.8577286100), q15(0.8448535652),
    q15(0.8314696123), q15(0.8175848132), q15(0.8032075315), q15(0.7883464276),
    q15(0.7730104534), q15(0.7572088465), q15(0.7409511254), q15(0.7242470830),
    q15(0.7071067812), q15(0.6895405447), q15(0.6715589548), q15(0.6531728430),
    q15(0.6343932842), q15(0.6152315906), q15(0.5956993045), q15(0.5758081914),
    q15(0.5555702330), q15(0.5349976199), q15(0.5141027442), q15(0.4928981922),
    q15(0.4713967368), q15(0.4496113297), q15(0.4275550934), q15(0.4052413140),
    q15(0.3826834324), q15(0.3598950365), q15(0.3368898534), q15(0.3136817404),
    q15(0.2902846773), q15(0.2667127575), q15(0.2429801799), q15(0.2191012402),
    q15(0.1950903220), q15(0.1709618888), q15(0.1467304745), q15(0.1224106752),
    q15(0.0980171403), q15(0.0735645636), q15(0.0490676743), q15(0.0245412285),
    q15(0.0000000000), q15(-0.0245412285), q15(-0.0490676743), q15(-0.0735645636),
    q15(-0.0980171403), q15(-0.1224106752), q15(-0.1467304745), q15(-0.1709618888),
    q15(-0.1950903220), q15(-0.2191012402), q15(-0.2429801799), q15(-0.2667127575),
    q15(-0.2902846773), q15(-0.3136817404), q15(-0.3368898534), q15(-0.3598950365),
    q15(-0.3826834324), q15(-0.4052413140), q15(-0.4275550934), q15(-0.4496113297),
    q15(-0.4713967368), q15(-0.4928981922), q15(-0.5141027442), q15(-0.5349976199),
    q15(-0.5555702330), q15(-0.5758081914), q15(-0.5956993045), q15(-0.6152315906),
    q15(-0.6343932842), q15(-0.6531728430), q15(-0.6715589548), q15(-0.6895405447),
    q15(-0.7071067812), q15(-0.7242470830), q15(-0.7409511254), q15(-0.7572088465),
    q15(-0.7730104534), q15(-0.7883464276), q15(-0.8032075315), q15(-0.8175848132),
    q15(-0.8314696123), q15(-0.8448535652), q15(-0.8577286100), q15(-0.8700869911),
    q15(-0.8819212643), q15(-0.8932243012), q15(-0.9039892931), q15(-0.9142097557),
    q15(-0.9238795325), q15(-0.9329927988), q15(-0.9415440652), q15(-0.9495281806),
    q15(-0.9569403357), q15(-0.9637760658), q15(-0.9700312532), q15(-0.9757021300),
    q15(-0.9807852804), q15(-0.9852776424), q15(-0.9891765100), q15(-0.9924795346),
    q15(-0.9951847267), q15(-0.9972904567), q15(-0.9987954562), q15(-0.9996988187),
    q15(-1.0000000000), q15(-0.9996988187), q15(-0.9987954562), q15(-0.9972904567),
    q15(-0.9951847267), q15(-0.9924795346), q15(-0.9891765100), q15(-0.9852776424),
    q15(-0.9807852804), q15(-0.9757021300), q15(-0.9700312532), q15(-0.9637760658),
    q15(-0.9569403357), q15(-0.9495281806), q15(-0.9415440652), q15(-0.9329927988),
    q15(-0.9238795325), q15(-0.9142097557), q15(-0.9039892931), q15(-0.8932243012),
    q15(-0.8819212643), q15(-0.8700869911), q15(-0.8577286100), q15(-0.8448535652),
    q15(-0.8314696123), q15(-0.8175848132), q15(-0.8032075315), q15(-0.7883464276),
    q15(-0.7730104534), q15(-0.7572088465), q15(-0.7409511254), q15(-0.7242470830),
    q15(-0.7071067812), q15(-0.6895405447), q15(-0.6715589548), q15(-0.6531728430),
    q15(-0.6343932842), q15(-0.6152315906), q15(-0.5956993045), q15(-0.5758081914),
    q15(-0.5555702330), q15(-0.5349976199), q15(-0.5141027442), q15(-0.4928981922),
    q15(-0.4713967368), q15(-0.4496113297), q15(-0.4275550934), q15(-0.4052413140),
    q15(-0.3826834324), q15(-0.3598950365), q15(-0.3368898534), q15(-0.3136817404),
    q15(-0.2902846773), q15(-0.2667127575), q15(-0.2429801799), q15(-0.2191012402),
    q15(-0.1950903220), q15(-0.1709618888), q15(-0.1467304745), q15(-0.1224106752),
    q15(-0.0980171403), q15(-0.0735645636), q15(-0.0490676743), q15(-0.0245412285),
];

/// Sine of a 16-bit angle.
///
/// ### Arguments
/// * `angle` - Angle in wraparound units, so 16384 is 90 degrees.
///
/// ### Returns
/// * The sine value in q15 format.
///
/// ### Notes
/// * The top 8 bits of the angle form the table index; the lookup returns
///   the nearest lower sample. No interpolation between samples is
///   performed, so the result is exact to the table resolution only.
pub const fn sin(angle: Angle) -> Fixed<15> {
    SINE_TAB_Q15[((angle as u16) >> (16 - SINE_TAB_ANGLE_BITS)) as usize]
}

/// Cosine of a 16-bit angle.
///
/// Adds a quarter turn to the angle and reads the sine table, relying on
/// angle wraparound. No separate cosine table is needed.
pub const fn cos(angle: Angle) -> Fixed<15> {
    sin(angle.wrapping_add(PI_HALF))
}

/// Sine and cosine of the same angle in one call.
///
/// ### Returns
/// * A tuple `(sin, cos)` in q15 format.
pub const fn sin_cos(angle: Angle) -> (Fixed<15>, Fixed<15>) {
    (sin(angle), cos(angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_angles() {
        assert_eq!(sin(0), q15(0.0));
        assert_eq!(sin(PI_HALF).to_bits(), 32768);
        assert_eq!(sin(NEG_PI_HALF).to_bits(), -32768);
        assert_eq!(sin(NEG_PI), q15(0.0));
        assert_eq!(cos(0).to_bits(), 32768);
        assert_eq!(cos(PI_HALF), q15(0.0));
        assert_eq!(cos(NEG_PI).to_bits(), -32768);
        assert_eq!(cos(NEG_PI_HALF), q15(0.0));
    }

    #[test]
    fn intermediate_angles() {
        // 45 degrees: sin = cos = 0.7071 -> 23170 in q15
        assert_eq!(sin(PI_QUARTER).to_bits(), 23170);
        assert_eq!(cos(PI_QUARTER).to_bits(), 23170);
        // 60 degrees: sin = 0.8577 at the nearest lower sample (index 42)
        assert_eq!(sin(PI_THIRD).to_bits(), 28106);
        // one angle unit below the wrap lands on the last positive sample
        assert_eq!(sin(PI).to_bits(), 804);
    }

    #[test]
    fn table_is_quarter_symmetric() {
        for i in 0..=64 {
            assert_eq!(SINE_TAB_Q15[i], SINE_TAB_Q15[128 - i]);
        }
        for i in 0..128 {
            assert_eq!(SINE_TAB_Q15[128 + i], -SINE_TAB_Q15[i]);
        }
    }

    #[test]
    fn truncating_lookup_uses_nearest_lower_sample() {
        // every angle within one table step maps to the same sample
        assert_eq!(sin(0), sin(255));
        assert_eq!(sin(256).to_bits(), 804);
        assert_ne!(sin(255), sin(256));
    }

    #[test]
    fn sin_cos_pairs_match_single_lookups() {
        for angle in Angle::MIN..=Angle::MAX {
            let (s, c) = sin_cos(angle);
            assert_eq!(s, sin(angle));
            assert_eq!(c, cos(angle));
        }
    }
}
