//! `i32` and `u32` kernels on one `__m128i` register.
//!
//! Both element types share the same register algorithms: two's-complement
//! add, sub and low-half multiply give identical bits for signed and unsigned
//! lanes, so only `abs` differs. Division has no SSE instruction and runs
//! element-wise over the logical lanes, which also keeps a zero padding lane
//! from faulting.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{check_indices, mask32, movemask_bits, permute32, LANE_COUNT};
use crate::simd::portable;
use crate::simd::traits::{Kernel, Register};
use crate::simd::utils::Align16;

#[inline(always)]
fn load<T>(storage: &Align16<T, LANE_COUNT>) -> __m128i {
    unsafe { _mm_load_si128(storage.0.as_ptr().cast()) }
}

#[inline(always)]
fn store<T: Copy + Default>(register: __m128i) -> Align16<T, LANE_COUNT> {
    let mut storage = Align16([T::default(); LANE_COUNT]);
    unsafe { _mm_store_si128(storage.0.as_mut_ptr().cast(), register) };
    storage
}

#[cfg(sse41)]
#[inline(always)]
fn mullo(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_mullo_epi32(a, b) }
}

/// Low 32 bits of each lane product from two `pmuludq` on the even and odd lanes.
#[cfg(not(sse41))]
#[inline(always)]
fn mullo(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let even = _mm_mul_epu32(a, b);
        let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(a), _mm_srli_epi64::<32>(b));
        _mm_unpacklo_epi32(
            _mm_shuffle_epi32::<0b00_00_10_00>(even),
            _mm_shuffle_epi32::<0b00_00_10_00>(odd),
        )
    }
}

#[cfg(ssse3)]
#[inline(always)]
fn hsum(v: __m128i) -> __m128i {
    unsafe {
        let pairs = _mm_hadd_epi32(v, v);
        _mm_hadd_epi32(pairs, pairs)
    }
}

#[cfg(not(ssse3))]
#[inline(always)]
fn hsum(v: __m128i) -> __m128i {
    unsafe {
        let pairs = _mm_add_epi32(v, _mm_shuffle_epi32::<0b10_11_00_01>(v));
        _mm_add_epi32(pairs, _mm_shuffle_epi32::<0b01_00_11_10>(pairs))
    }
}

/// Wrapping sum of the first `N` lanes, returned as raw lane bits.
#[inline(always)]
fn sum_bits<const N: usize>(v: __m128i) -> i32 {
    unsafe { _mm_cvtsi128_si32(hsum(_mm_and_si128(v, mask32::<N>()))) }
}

#[cfg(ssse3)]
#[inline(always)]
fn abs_i32(v: __m128i) -> __m128i {
    unsafe { _mm_abs_epi32(v) }
}

/// `(v ^ sign) - sign`, wrapping `i32::MIN` to itself like `pabsd`.
#[cfg(not(ssse3))]
#[inline(always)]
fn abs_i32(v: __m128i) -> __m128i {
    unsafe {
        let sign = _mm_srai_epi32::<31>(v);
        _mm_sub_epi32(_mm_xor_si128(v, sign), sign)
    }
}

#[inline(always)]
fn abs_u32(v: __m128i) -> __m128i {
    v
}

macro_rules! i32x4_kernel {
    ($t:ty, $abs:ident => $($n:literal),+) => {$(
        impl Kernel<$n> for $t {
            type Storage = Align16<$t, LANE_COUNT>;

            const VECTORIZED: bool = true;

            #[inline(always)]
            fn splat(value: $t) -> Self::Storage {
                Align16::splat(value)
            }

            #[inline(always)]
            fn from_array(lanes: [$t; $n]) -> Self::Storage {
                Align16::from_prefix(lanes)
            }

            #[inline(always)]
            fn lanes(storage: &Self::Storage) -> &[$t; $n] {
                storage.prefix::<$n>()
            }

            #[inline(always)]
            fn lanes_mut(storage: &mut Self::Storage) -> &mut [$t; $n] {
                storage.prefix_mut::<$n>()
            }

            #[inline(always)]
            fn add(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_add_epi32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn sub(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_sub_epi32(load(&a), load(&b)) })
            }

            #[inline(always)]
            fn mul(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                store(mullo(load(&a), load(&b)))
            }

            #[inline(always)]
            fn div(a: Self::Storage, b: Self::Storage) -> Self::Storage {
                Align16::from_prefix(portable::div(*a.prefix::<$n>(), *b.prefix::<$n>()))
            }

            #[inline(always)]
            fn mul_add(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_add_epi32(mullo(load(&a), load(&b)), load(&c)) })
            }

            #[inline(always)]
            fn mul_sub(a: Self::Storage, b: Self::Storage, c: Self::Storage) -> Self::Storage {
                store(unsafe { _mm_sub_epi32(mullo(load(&a), load(&b)), load(&c)) })
            }

            #[inline(always)]
            fn shuffle(v: Self::Storage, indices: [usize; $n]) -> Self::Storage {
                check_indices(&indices);
                store(permute32(load(&v), indices))
            }

            #[inline(always)]
            fn dot(a: Self::Storage, b: Self::Storage) -> $t {
                sum_bits::<$n>(mullo(load(&a), load(&b))) as $t
            }

            #[inline(always)]
            fn sum(v: Self::Storage) -> $t {
                sum_bits::<$n>(load(&v)) as $t
            }

            #[inline(always)]
            fn abs(v: Self::Storage) -> Self::Storage {
                store($abs(load(&v)))
            }

            #[inline(always)]
            fn eq(a: Self::Storage, b: Self::Storage) -> bool {
                let bits = unsafe {
                    _mm_movemask_ps(_mm_castsi128_ps(_mm_cmpeq_epi32(load(&a), load(&b))))
                };
                bits & movemask_bits::<$n>() == movemask_bits::<$n>()
            }
        }

        impl Register<$n> for $t {
            type Register = __m128i;

            #[inline(always)]
            fn from_register(register: __m128i) -> Self::Storage {
                store(register)
            }

            #[inline(always)]
            fn to_register(storage: &Self::Storage) -> __m128i {
                load(storage)
            }
        }
    )+};
}

i32x4_kernel!(i32, abs_i32 => 2, 3, 4);
i32x4_kernel!(u32, abs_u32 => 2, 3, 4);
