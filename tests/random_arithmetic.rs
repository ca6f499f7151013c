//! Randomised agreement between vector operations and scalar lane arithmetic.
//!
//! The scalar side uses the `Scalar` lane operations, so integer results wrap
//! the same way the vector lanes do. Float results are compared exactly for
//! correctly rounded operations and with a tolerance where the build may
//! fuse a multiply-add.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdvec::{Kernel, Scalar, Vector};

const ITERATIONS: usize = 1000;

fn random_f32<const N: usize>(rng: &mut StdRng) -> Vector<f32, N>
where
    f32: Kernel<N>,
{
    Vector::from_array(std::array::from_fn(|_| rng.random_range(-1000.0..=1000.0)))
}

fn random_f64<const N: usize>(rng: &mut StdRng) -> Vector<f64, N>
where
    f64: Kernel<N>,
{
    Vector::from_array(std::array::from_fn(|_| rng.random_range(-1.0e6..=1.0e6)))
}

fn random_i32<const N: usize>(rng: &mut StdRng) -> Vector<i32, N>
where
    i32: Kernel<N>,
{
    Vector::from_array(std::array::from_fn(|_| rng.random::<i32>()))
}

fn random_u32<const N: usize>(rng: &mut StdRng) -> Vector<u32, N>
where
    u32: Kernel<N>,
{
    Vector::from_array(std::array::from_fn(|_| rng.random::<u32>()))
}

fn assert_lanes<T: Kernel<N>, const N: usize>(
    actual: Vector<T, N>,
    a: Vector<T, N>,
    b: Vector<T, N>,
    op: impl Fn(T, T) -> T,
    name: &str,
) {
    for i in 0..N {
        let expected = op(a[i], b[i]);
        assert_eq!(
            actual[i], expected,
            "{name} lane {i}: {:?} and {:?} gave {:?}, expected {:?}",
            a[i], b[i], actual[i], expected
        );
    }
}

macro_rules! random_tests {
    ($name:ident, $random:ident, $t:ty) => {
        mod $name {
            use super::*;

            fn run<const N: usize>(rng: &mut StdRng)
            where
                $t: Kernel<N>,
            {
                for _ in 0..ITERATIONS {
                    let a = $random::<N>(rng);
                    let b = $random::<N>(rng);
                    check_arithmetic(a, b);
                    check_reversed(a);
                }
            }

            #[test]
            fn test_two_lanes() {
                run::<2>(&mut StdRng::seed_from_u64(12345));
            }

            #[test]
            fn test_three_lanes() {
                run::<3>(&mut StdRng::seed_from_u64(12346));
            }

            #[test]
            fn test_four_lanes() {
                run::<4>(&mut StdRng::seed_from_u64(12347));
            }
        }
    };
}

fn check_arithmetic<T: Kernel<N>, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) {
    assert_lanes(a + b, a, b, T::lane_add, "add");
    assert_lanes(a - b, a, b, T::lane_sub, "sub");
    assert_lanes(a * b, a, b, T::lane_mul, "mul");
    assert_lanes(a.abs(), a, b, |x, _| x.lane_abs(), "abs");
    if T::IS_FLOAT {
        assert_lanes(a / b, a, b, T::lane_div, "div");
    }
}

fn check_reversed<T: Kernel<N>, const N: usize>(a: Vector<T, N>) {
    let reversed = a.shuffle_dyn(std::array::from_fn(|i| N - 1 - i));
    for i in 0..N {
        assert_eq!(reversed[i], a[N - 1 - i]);
    }
    assert_eq!(reversed.shuffle_dyn(std::array::from_fn(|i| N - 1 - i)), a);
}

random_tests!(f32_lanes, random_f32, f32);
random_tests!(f64_lanes, random_f64, f64);
random_tests!(i32_lanes, random_i32, i32);
random_tests!(u32_lanes, random_u32, u32);

#[test]
fn test_integer_division_matches_lanes() {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..ITERATIONS {
        let a = random_i32::<4>(&mut rng);
        let b = Vector::<i32, 4>::from_array(std::array::from_fn(|_| {
            let d = rng.random_range(1..=1000);
            if rng.random::<bool>() {
                d
            } else {
                -d
            }
        }));
        assert_lanes(a / b, a, b, i32::lane_div, "div");

        let a = random_u32::<3>(&mut rng);
        let b = Vector::<u32, 3>::from_array(std::array::from_fn(|_| rng.random_range(1..=1000)));
        assert_lanes(a / b, a, b, u32::lane_div, "div");
    }
}

#[test]
fn test_integer_reductions_match_lanes() {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..ITERATIONS {
        let a = random_u32::<3>(&mut rng);
        let b = random_u32::<3>(&mut rng);
        let dot = (0..3).fold(0u32, |acc, i| acc.wrapping_add(a[i].wrapping_mul(b[i])));
        assert_eq!(a.dot(b), dot);
        assert_eq!(a.sum(), a[0].wrapping_add(a[1]).wrapping_add(a[2]));

        let a = random_i32::<4>(&mut rng);
        let sum = a.iter().fold(0i32, |acc, &x| acc.wrapping_add(x));
        assert_eq!(a.sum(), sum);
    }
}

#[test]
fn test_float_reductions_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..ITERATIONS {
        let a = random_f32::<4>(&mut rng);
        let b = random_f32::<4>(&mut rng);
        let expected: f64 = (0..4).map(|i| a[i] as f64 * b[i] as f64).sum();
        let magnitude: f64 = (0..4).map(|i| (a[i] as f64 * b[i] as f64).abs()).sum();
        let error = (a.dot(b) as f64 - expected).abs();
        assert!(
            error <= magnitude * 1e-6 + 1e-6,
            "dot {a:?} . {b:?}: got {}, expected {expected}, error {error:e}",
            a.dot(b)
        );

        let a = random_f64::<3>(&mut rng);
        let b = random_f64::<3>(&mut rng);
        let c = random_f64::<3>(&mut rng);
        let fused = a.mul_add(b, c);
        for i in 0..3 {
            let expected = a[i] * b[i] + c[i];
            let scale = (a[i] * b[i]).abs().max(c[i].abs()).max(1.0);
            assert!(
                (fused[i] - expected).abs() <= scale * 1e-15,
                "mul_add lane {i}: got {}, expected {expected}",
                fused[i]
            );
        }
    }
}
