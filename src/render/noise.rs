//! Seeded value noise.
//!
//! Smooth pseudo-random field in [0, 1] built from a lattice filled by the
//! schema's RNG. Four octaves with halving amplitude give the soft,
//! smoky variation used for erosion and band wobble.

use rand::Rng;

const LATTICE_SIZE: usize = 4096;
const OCTAVES: u32 = 4;
const FALLOFF: f64 = 0.5;

pub struct ValueNoise {
    lattice: Vec<f64>,
}

impl ValueNoise {
    /// Build the lattice from `rng`. Consumes exactly `LATTICE_SIZE` draws.
    pub fn new(rng: &mut impl Rng) -> Self {
        let lattice = (0..LATTICE_SIZE).map(|_| rng.gen::<f64>()).collect();
        Self { lattice }
    }

    fn lattice(&self, x: i64, y: i64, z: i64) -> f64 {
        let h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
            ^ (z as u64).wrapping_mul(0x1656_67B1_9E37_79F9);
        let h = h ^ (h >> 29);
        self.lattice[(h as usize) % LATTICE_SIZE]
    }

    fn single(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
        let (fx, fy, fz) = (fade(x - x0), fade(y - y0), fade(z - z0));
        let (ix, iy, iz) = (x0 as i64, y0 as i64, z0 as i64);

        let corner = |dx: i64, dy: i64, dz: i64| self.lattice(ix + dx, iy + dy, iz + dz);

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), fx);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), fx);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), fx);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), fx);
        let y0 = lerp(x00, x10, fy);
        let y1 = lerp(x01, x11, fy);
        lerp(y0, y1, fz)
    }

    /// Fractal noise at a point, always within [0, 1].
    pub fn get(&self, x: f64, y: f64, z: f64) -> f64 {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return 0.5;
        }
        let mut total: f64 = 0.0;
        let mut amplitude = FALLOFF;
        let mut norm: f64 = 0.0;
        let mut frequency = 1.0;
        for _ in 0..OCTAVES {
            total += self.single(x * frequency, y * frequency, z * frequency) * amplitude;
            norm += amplitude;
            amplitude *= FALLOFF;
            frequency *= 2.0;
        }
        (total / norm).clamp(0.0, 1.0)
    }
}

fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn noise(seed: u64) -> ValueNoise {
        ValueNoise::new(&mut rand::rngs::StdRng::seed_from_u64(seed))
    }

    #[test]
    fn same_seed_same_field() {
        let a = noise(7);
        let b = noise(7);
        for i in 0..50 {
            let p = i as f64 * 0.37;
            assert_eq!(a.get(p, -p, 0.5), b.get(p, -p, 0.5));
        }
    }

    #[test]
    fn values_stay_in_unit_range() {
        let n = noise(1);
        for i in -100..100 {
            let v = n.get(i as f64 * 0.173, i as f64 * 0.041, 3.0);
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(n.get(f64::NAN, 0.0, 0.0), 0.5);
    }

    #[test]
    fn field_is_continuous() {
        let n = noise(3);
        let a = n.get(1.5, 2.5, 0.0);
        let b = n.get(1.5001, 2.5, 0.0);
        assert!((a - b).abs() < 0.01);
    }
}
