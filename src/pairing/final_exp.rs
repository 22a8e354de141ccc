// Final exponentiation: raise a Miller loop output to the power
// (p^12 - 1)/r (up to a fixed factor coprime to r), mapping it into the
// order-r subgroup of Fp12*.
//
// The easy part (p^6 - 1)(p^2 + 1) moves the value into the cyclotomic
// subgroup, where inversion is a conjugation and squarings use the
// cheaper Granger-Scott formulas. The hard part (p^4 - p^2 + 1)/r is
// computed with an addition chain in the curve seed x, which depends on
// the curve family:
//
//   BLS12: Hayashida-Hayasaka-Teruya, exponent 3*(p^4 - p^2 + 1)/r
//   BN:    Duquesne-Ghammam (Fuentes-Castaneda et al. chain), exponent
//          2x*(6x^2 + 3x + 1)*(p^4 - p^2 + 1)/r

use crate::config::{CurveConfig, CurveFamily};
use crate::field::PrimeField;
use crate::tower::Fp12;

/// Compute the final exponentiation of `m`. The zero element (never a
/// Miller loop output) maps to zero.
pub(crate) fn final_exponentiation<F: PrimeField>(cfg: &CurveConfig<F>, m: &Fp12<F>)
    -> Fp12<F>
{
    let fc = &cfg.frobenius;

    // Easy part: m^(p^6 - 1), then ^(p^2 + 1).
    let t = m.conj() * m.invert();
    let r = t.frobenius_map(2, fc) * t;
    if r.is_one() {
        return r;
    }

    match cfg.family {
        CurveFamily::Bls12 { .. } => hard_part_bls12(cfg, r),
        CurveFamily::Bn { .. } => hard_part_bn(cfg, r),
    }
}

// m^x for m in the cyclotomic subgroup, with x the signed seed.
fn expt<F: PrimeField>(cfg: &CurveConfig<F>, m: &Fp12<F>) -> Fp12<F> {
    let r = m.cyclotomic_pow_u64(cfg.family.seed());
    if cfg.family.is_negative() { r.conj() } else { r }
}

// m^(x/2); the seed must be even.
fn expt_half<F: PrimeField>(cfg: &CurveConfig<F>, m: &Fp12<F>) -> Fp12<F> {
    let r = m.cyclotomic_pow_u64(cfg.family.seed() >> 1);
    if cfg.family.is_negative() { r.conj() } else { r }
}

fn hard_part_bls12<F: PrimeField>(cfg: &CurveConfig<F>, mut r: Fp12<F>) -> Fp12<F> {
    let fc = &cfg.frobenius;
    let mut t0 = r.cyclotomic_square();
    let mut t1 = expt_half(cfg, &t0);
    let mut t2 = r.conj();
    t1 *= t2;
    t2 = expt(cfg, &t1);
    t1.set_conj();
    t1 *= t2;
    t2 = expt(cfg, &t1);
    t1 = t1.frobenius_map(1, fc);
    t1 *= t2;
    r *= t0;
    t0 = expt(cfg, &t1);
    t2 = expt(cfg, &t0);
    t0 = t1.frobenius_map(2, fc);
    t1.set_conj();
    t1 *= t2;
    t1 *= t0;
    r *= t1;
    r
}

fn hard_part_bn<F: PrimeField>(cfg: &CurveConfig<F>, r: Fp12<F>) -> Fp12<F> {
    let fc = &cfg.frobenius;
    let mut t0 = expt(cfg, &r).conj();
    t0.set_cyclotomic_square();
    let mut t1 = t0.cyclotomic_square();
    t1 *= t0;
    let t2 = expt(cfg, &t1).conj();
    let mut t3 = t1.conj();
    t1 = t2 * t3;
    t3 = t2.cyclotomic_square();
    let mut t4 = expt(cfg, &t3);
    t4 *= t1;
    t3 = t0 * t4;
    t0 = t2 * t4;
    t0 *= r;
    t0 *= t3.frobenius_map(1, fc);
    t0 *= t4.frobenius_map(2, fc);
    let t5 = (r.conj() * t3).frobenius_map(3, fc);
    t0 *= t5;
    t0
}

#[cfg(all(test, feature = "bls12_381", feature = "bn254"))]
mod tests {
    use super::final_exponentiation;
    use crate::config::CurveConfig;
    use crate::field::{Field, PrimeField};
    use crate::tower::{Fp12, Fp6};
    use crate::{bls12_381, bn254};
    use num_bigint::BigUint;
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn to_big(x: &[u64]) -> BigUint {
        let mut buf = Vec::with_capacity(x.len() << 3);
        for w in x.iter() {
            buf.extend_from_slice(&w.to_le_bytes());
        }
        BigUint::from_bytes_le(&buf)
    }

    // The hard-part chains compute a fixed multiple c of (p^4 - p^2 + 1)/r;
    // the whole map is then m -> m^(c*(p^12 - 1)/r).
    fn check_final_exp<F: PrimeField>(cfg: &CurveConfig<F>, c: &BigUint, seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        assert!(final_exponentiation(cfg, &Fp12::ONE).is_one());

        let p = to_big(F::modulus());
        let r = to_big(&cfg.order);
        let p12m1 = p.pow(12) - 1u32;
        assert!((&p12m1 % &r) == BigUint::from(0u32));
        let full = c * (&p12m1 / &r);
        let full = full.to_u64_digits();
        let reduced = (c * (&p12m1 / &r)) % &r;
        let reduced = reduced.to_u64_digits();

        for _ in 0..3 {
            let a = Fp12::<F>::random(&mut rng);
            let b = Fp12::<F>::random(&mut rng);
            let ea = final_exponentiation(cfg, &a);
            let eb = final_exponentiation(cfg, &b);

            // Exact exponent.
            assert!(ea == a.pow_vartime(&full));

            // Result is in the order-r subgroup.
            assert!(ea.pow_vartime(&cfg.order).is_one());
            assert!(!ea.is_one());

            // Multiplicative.
            assert!(final_exponentiation(cfg, &(a * b)) == ea * eb);

            // On the order-r subgroup, the exponent reduces modulo r.
            assert!(final_exponentiation(cfg, &ea) == ea.pow_vartime(&reduced));

            // Elements killed by the easy part: Fp6 values.
            let d = Fp12::new(a.c0, Fp6::ZERO);
            assert!(final_exponentiation(cfg, &d).is_one());
        }
    }

    #[test]
    fn bls12_381_final_exp() {
        check_final_exp(&bls12_381::config().unwrap(), &BigUint::from(3u32), 1);
    }

    #[test]
    fn bn254_final_exp() {
        // c = 2x*(6x^2 + 3x + 1)
        let x = BigUint::from(bn254::SEED);
        let c = 2u32 * &x * (6u32 * &x * &x + 3u32 * &x + 1u32);
        check_final_exp(&bn254::config().unwrap(), &c, 2);
    }
}
