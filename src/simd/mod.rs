//! Backend layer.
//!
//! Exactly one backend is compiled per build. `build.rs` selects it from the
//! target's declared features (or the `portable` cargo feature, or the
//! `SIMDVEC_BACKEND` environment variable) and emits the matching cfg flags:
//!
//! - `sse`: 128-bit x86 registers for `f32`, `i32`, `u32` and 2-lane `f64`.
//! - `avx`: adds 256-bit registers for 3 and 4-lane `f64` and variable permutes.
//! - `avx2`: adds the cross-lane permute used by 4-lane `f64` shuffles.
//! - `neon`: 128-bit AArch64 registers for `f32`, `i32`, `u32` and 2-lane `f64`.
//!
//! Combinations a register backend does not cover use the portable kernels.
//! The capability flags `sse3`, `ssse3`, `sse41` and `fma` refine individual
//! register paths without changing which backend is active.

#[macro_use]
pub(crate) mod portable;
pub mod traits;
pub mod utils;

#[cfg(sse)]
pub mod x86;

#[cfg(neon)]
pub mod neon;

use std::fmt;

#[cfg(not(any(sse, neon)))]
mod generic {
    portable_float_kernel!(f32 => 2, 3, 4);
    portable_float_kernel!(f64 => 2, 3, 4);
    portable_kernel!(i32 => 2, 3, 4);
    portable_kernel!(u32 => 2, 3, 4);
}

// No 256-bit register for wide doubles on these backends.
#[cfg(any(all(sse, not(avx)), neon))]
mod wide_f64 {
    portable_float_kernel!(f64 => 3, 4);
}

/// The backend compiled into this build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Element-wise arrays, no SIMD registers.
    Portable,
    /// x86 128-bit SSE registers.
    Sse,
    /// SSE plus 256-bit AVX registers for wide `f64`.
    Avx,
    /// AVX plus AVX2 cross-lane permutes.
    Avx2,
    /// AArch64 128-bit NEON registers.
    Neon,
}

impl Backend {
    /// The backend selected at build time.
    pub const fn active() -> Self {
        if cfg!(avx2) {
            Backend::Avx2
        } else if cfg!(avx) {
            Backend::Avx
        } else if cfg!(sse) {
            Backend::Sse
        } else if cfg!(neon) {
            Backend::Neon
        } else {
            Backend::Portable
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Sse => "sse",
            Backend::Avx => "avx",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// Width of the widest register the backend uses, 0 for the portable backend.
    pub const fn register_bits(self) -> usize {
        match self {
            Backend::Portable => 0,
            Backend::Sse | Backend::Neon => 128,
            Backend::Avx | Backend::Avx2 => 256,
        }
    }

    pub const fn is_vectorized(self) -> bool {
        !matches!(self, Backend::Portable)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The backend compiled into this build.
pub const ACTIVE: Backend = Backend::active();

/// Whether `mul_add`, `mul_sub`, `cross` and `lerp` use a single rounding step.
pub const FUSED_MULTIPLY_ADD: bool = cfg!(fma);

/// Logs the compiled backend configuration at `info` level.
pub fn log_backend() {
    log::info!(
        "simdvec backend: {} ({}-bit registers), fused multiply-add: {}",
        ACTIVE,
        ACTIVE.register_bits(),
        FUSED_MULTIPLY_ADD
    );
    log::debug!(
        "capabilities: sse3={} ssse3={} sse41={}",
        cfg!(sse3),
        cfg!(ssse3),
        cfg!(sse41)
    );
}
