// Module gfgen defines the generic Montgomery prime field macro; the
// pairing base fields (BLS12-381 and BN254) are instantiated from it in
// crate::field.
pub mod gfgen;

// Carrying addition and subtraction should use u64::carrying_add()
// and u64::borrowing_sub(), but these functions are currently only
// experimental.

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_addcarry_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _addcarry_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_add(y as u128).wrapping_add(c as u128);
    (z as u64, (z >> 64) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_subborrow_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _subborrow_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_sub(y as u128).wrapping_sub(c as u128);
    (z as u64, (z >> 127) as u8)
}

// Compute x*y+z over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull_add(x: u64, y: u64, z: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128)).wrapping_add(z as u128);
    (t as u64, (t >> 64) as u64)
}

// Compute x*y+z1+z2 over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull_add2(x: u64, y: u64, z1: u64, z2: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128))
        .wrapping_add(z1 as u128).wrapping_add(z2 as u128);
    (t as u64, (t >> 64) as u64)
}

// Divide the multi-limb integer x (little-endian) by the small non-zero
// divisor d, in place; the remainder is returned. Used when deriving
// exponents such as (p-1)/6 from a modulus.
pub(crate) fn divrem_small(x: &mut [u64], d: u64) -> u64 {
    let mut r = 0u64;
    for i in (0..x.len()).rev() {
        let z = ((r as u128) << 64) | (x[i] as u128);
        x[i] = (z / (d as u128)) as u64;
        r = (z % (d as u128)) as u64;
    }
    r
}

// Subtract the small value s from the multi-limb integer x (little-endian),
// in place. Returns the final borrow (1 if x < s).
pub(crate) fn sub_small(x: &mut [u64], s: u64) -> u8 {
    let mut cc = 0;
    for i in 0..x.len() {
        let y = if i == 0 { s } else { 0 };
        (x[i], cc) = subborrow_u64(x[i], y, cc);
    }
    cc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_helpers() {
        assert_eq!(addcarry_u64(u64::MAX, 1, 0), (0, 1));
        assert_eq!(addcarry_u64(u64::MAX, u64::MAX, 1), (u64::MAX, 1));
        assert_eq!(subborrow_u64(0, 1, 0), (u64::MAX, 1));
        assert_eq!(subborrow_u64(5, 3, 1), (1, 0));
        assert_eq!(umull_add(u64::MAX, u64::MAX, u64::MAX), (0, u64::MAX));
        assert_eq!(umull_add2(u64::MAX, u64::MAX, u64::MAX, u64::MAX),
            (u64::MAX, u64::MAX));
    }

    #[test]
    fn small_division() {
        // 2^128 + 13 = 6*q + 5, with q = floor((2^128 - 1)/6) + 2
        let mut x = [13u64, 0, 1];
        let r = divrem_small(&mut x, 6);
        assert_eq!(r, 5);
        assert_eq!(x[2], 0);
        assert_eq!(((x[1] as u128) << 64) | (x[0] as u128), u128::MAX / 6 + 2);

        let mut y = [0u64, 1];
        assert_eq!(sub_small(&mut y, 1), 0);
        assert_eq!(y, [u64::MAX, 0]);
        let mut z = [0u64, 0];
        assert_eq!(sub_small(&mut z, 1), 1);
    }
}
