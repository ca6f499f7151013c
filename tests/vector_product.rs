//! Behaviour shared by every vector type.
//!
//! Each `(scalar, lanes)` combination gets its own module with the same set
//! of tests: broadcast and per-lane construction, named views, lane-wise
//! operators against scalar lane arithmetic, shuffles and equality.

use simdvec::{Kernel, Scalar, Vector};

/// Reads a vector through its positional and colour views.
trait NamedLanes<T> {
    fn positional(&self) -> Vec<T>;
    fn color_lanes(&self) -> Vec<T>;
}

impl<T: Kernel<2>> NamedLanes<T> for Vector<T, 2> {
    fn positional(&self) -> Vec<T> {
        vec![self.x, self.y]
    }

    fn color_lanes(&self) -> Vec<T> {
        let c = self.color();
        vec![c.r, c.g]
    }
}

impl<T: Kernel<3>> NamedLanes<T> for Vector<T, 3> {
    fn positional(&self) -> Vec<T> {
        vec![self.x, self.y, self.z]
    }

    fn color_lanes(&self) -> Vec<T> {
        let c = self.color();
        vec![c.r, c.g, c.b]
    }
}

impl<T: Kernel<4>> NamedLanes<T> for Vector<T, 4> {
    fn positional(&self) -> Vec<T> {
        vec![self.x, self.y, self.z, self.w]
    }

    fn color_lanes(&self) -> Vec<T> {
        let c = self.color();
        vec![c.r, c.g, c.b, c.a]
    }
}

fn assert_views_agree<T: Kernel<N>, const N: usize>(v: &Vector<T, N>)
where
    Vector<T, N>: NamedLanes<T>,
{
    let indexed: Vec<T> = (0..N).map(|i| v[i]).collect();
    assert_eq!(v.positional(), indexed, "positional view of {v:?}");
    assert_eq!(v.color_lanes(), indexed, "colour view of {v:?}");
    assert_eq!(v.as_slice(), indexed.as_slice());
}

/// Every index tuple in `0..N` of length `N`, in lexicographic order.
fn all_index_tuples<const N: usize>() -> Vec<[usize; N]> {
    let count = N.pow(N as u32);
    (0..count)
        .map(|mut code| {
            let mut indices = [0; N];
            for index in indices.iter_mut().rev() {
                *index = code % N;
                code /= N;
            }
            indices
        })
        .collect()
}

macro_rules! vector_tests {
    ($name:ident, $t:ty, $n:literal, [$($lane:literal),+]) => {
        mod $name {
            use super::*;

            type V = Vector<$t, $n>;

            fn one() -> $t {
                1 as $t
            }

            fn two() -> $t {
                2 as $t
            }

            fn lanes() -> [$t; $n] {
                [$($lane as $t),+]
            }

            fn check_lanes(actual: V, a: V, op: fn($t, $t) -> $t) {
                for lane in 0..$n {
                    assert_eq!(actual[lane], op(a[lane], two()), "lane {lane} of {actual:?}");
                }
            }

            #[test]
            fn test_default_and_broadcast() {
                let zero = V::default();
                assert_views_agree(&zero);
                assert!(zero.iter().all(|&lane| lane == <$t>::default()));

                let ones = V::splat(one());
                assert_views_agree(&ones);
                assert!(ones.iter().all(|&lane| lane == one()));
                assert_eq!(V::from(one()), ones);
            }

            #[test]
            fn test_per_lane_construction() {
                let v = V::from_array(lanes());
                assert_views_agree(&v);
                for i in 0..$n {
                    assert_eq!(v[i], lanes()[i]);
                }
                assert_eq!(v.to_array(), lanes());
                assert_eq!(V::try_from_slice(&lanes()).unwrap(), v);
            }

            #[test]
            fn test_operators_match_lane_arithmetic() {
                let a = V::from_array(lanes());
                let b = V::splat(two());
                check_lanes(a + b, a, <$t as Scalar>::lane_add);
                check_lanes(a - b, a, <$t as Scalar>::lane_sub);
                check_lanes(a * b, a, <$t as Scalar>::lane_mul);
                check_lanes(a / b, a, <$t as Scalar>::lane_div);

                assert_eq!(a + two(), a + b);
                assert_eq!(two() * a, a * b);
                assert_eq!(b - two(), V::zero());
            }

            #[test]
            fn test_compound_assignment_matches_operators() {
                let a = V::from_array(lanes());
                let b = V::splat(two());

                let mut c = a;
                c += b;
                assert_eq!(c, a + b);
                c -= b;
                assert_eq!(c, a);
                c *= two();
                assert_eq!(c, a * two());
                c /= b;
                assert_eq!(c, a);
            }

            #[test]
            fn test_shuffle_dyn_exhaustive() {
                let v = V::from_array(lanes());
                for indices in all_index_tuples::<$n>() {
                    let shuffled = v.shuffle_dyn(indices);
                    for (i, &index) in indices.iter().enumerate() {
                        assert_eq!(shuffled[i], v[index], "indices {indices:?}");
                    }
                    assert_views_agree(&shuffled);
                }
            }

            #[test]
            fn test_reductions_match_lanes() {
                let v = V::from_array(lanes());
                let ones = V::splat(one());
                let sum = lanes().iter().fold(<$t>::default(), |acc, &x| acc.lane_add(x));
                assert_eq!(v.sum(), sum);
                assert_eq!(ones.dot(v), sum);
                assert_eq!(ones.sum(), $n as $t);
            }

            #[test]
            fn test_equality() {
                assert_ne!(V::splat(one()), V::splat(two()));
                assert_eq!(V::splat(one()), V::splat(one()));

                let mut v = V::splat(one());
                v[$n - 1] = two();
                assert_ne!(v, V::splat(one()));
            }
        }
    };
}

vector_tests!(f32x2, f32, 2, [1, 2]);
vector_tests!(f32x3, f32, 3, [1, 2, 3]);
vector_tests!(f32x4, f32, 4, [1, 2, 3, 4]);
vector_tests!(f64x2, f64, 2, [1, 2]);
vector_tests!(f64x3, f64, 3, [1, 2, 3]);
vector_tests!(f64x4, f64, 4, [1, 2, 3, 4]);
vector_tests!(i32x2, i32, 2, [1, -2]);
vector_tests!(i32x3, i32, 3, [1, -2, 3]);
vector_tests!(i32x4, i32, 4, [1, -2, 3, -4]);
vector_tests!(u32x2, u32, 2, [1, 2]);
vector_tests!(u32x3, u32, 3, [1, 2, 3]);
vector_tests!(u32x4, u32, 4, [1, 2, 3, 4]);

#[test]
fn test_const_shuffle_reverses() {
    let v = Vector::<f32, 2>::new(5.0, 6.0);
    assert_eq!(v.shuffle::<1, 0>(), Vector::<_, 2>::new(6.0, 5.0));
    assert_eq!(v.shuffle_dyn([1, 0]), v.shuffle::<1, 0>());

    let v = Vector::<u32, 3>::new(5, 6, 7);
    assert_eq!(v.shuffle::<2, 1, 0>(), Vector::<_, 3>::new(7, 6, 5));
    assert_eq!(v.shuffle_dyn([2, 1, 0]), v.shuffle::<2, 1, 0>());

    let v = Vector::<i32, 4>::new(5, 6, 7, 8);
    assert_eq!(v.shuffle::<3, 2, 1, 0>(), Vector::<_, 4>::new(8, 7, 6, 5));
    assert_eq!(v.shuffle_dyn([3, 2, 1, 0]), v.shuffle::<3, 2, 1, 0>());

    let v = Vector::<f64, 4>::new(5.0, 6.0, 7.0, 8.0);
    assert_eq!(v.shuffle::<1, 1, 3, 0>(), Vector::<_, 4>::new(6.0, 6.0, 8.0, 5.0));
    assert_eq!(v.shuffle_dyn([1, 1, 3, 0]), v.shuffle::<1, 1, 3, 0>());
}

#[test]
fn test_three_lane_padding_stays_out_of_reductions() {
    let mut f = Vector::<f32, 3>::splat(1.0);
    let mut d = Vector::<f64, 3>::splat(1.0);
    let mut i = Vector::<i32, 3>::splat(1);
    let mut u = Vector::<u32, 3>::splat(1);
    for _ in 0..5 {
        f = f.shuffle::<1, 2, 0>();
        d = d.shuffle_dyn([2, 2, 1]);
        i = i.shuffle::<0, 0, 2>();
        u = u.shuffle_dyn([1, 0, 1]);
    }
    assert_eq!(f.sum(), 3.0);
    assert_eq!(d.dot(d), 3.0);
    assert_eq!(i.length_squared(), 3);
    assert_eq!(u.sum(), 3);
    assert_eq!(f, Vector::splat(1.0));
}

#[test]
fn test_integer_arithmetic_wraps() {
    let max = Vector::<i32, 4>::splat(i32::MAX);
    assert_eq!(max + 1, Vector::splat(i32::MIN));
    assert_eq!(max * 2, Vector::splat(-2));

    let zero = Vector::<u32, 3>::zero();
    assert_eq!(zero - 1, Vector::splat(u32::MAX));
}

#[test]
#[should_panic]
fn test_integer_division_by_zero_panics() {
    let a = Vector::<i32, 3>::splat(6);
    let b = Vector::<i32, 3>::new(1, 0, 2);
    let _ = a / b;
}
