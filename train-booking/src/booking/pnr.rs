//! PNR generation.

use rand::Rng;

use crate::domain::Pnr;

/// Draw a PNR uniformly from `Pnr::MIN..=Pnr::MAX`.
///
/// PNRs are not checked for uniqueness.
pub fn generate_pnr<R: Rng + ?Sized>(rng: &mut R) -> Pnr {
    Pnr::clamped(rng.gen_range(Pnr::MIN..=Pnr::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_pnr(&mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_pnr(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn generated_pnrs_are_ten_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let pnr = generate_pnr(&mut rng);
            assert_eq!(pnr.as_str().len(), 10);
            assert_ne!(pnr.as_str().as_bytes()[0], b'0');
        }
    }

    #[test]
    fn clamps_out_of_range_numbers() {
        assert_eq!(Pnr::clamped(0).as_str(), "1000000000");
        assert_eq!(Pnr::clamped(u64::MAX).as_str(), "9999999999");
        assert_eq!(Pnr::clamped(2_641_278_193).as_str(), "2641278193");
    }
}
