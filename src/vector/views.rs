//! Named-field views over a vector's lanes.
//!
//! Each view is a `#[repr(C)]` struct of `N` fields of `T`, which has the same
//! size, alignment and lane offsets as `[T; N]`. A view is obtained by
//! reinterpreting the vector's logical lane array, so reads and writes go
//! straight to the vector's storage.
//!
//! ```rust
//! use simdvec::Vec4f;
//!
//! let mut v = Vec4f::new(0.1, 0.2, 0.3, 1.0);
//! v.x = 0.5;
//! v.color_mut().a = 0.25;
//!
//! assert_eq!(v[0], 0.5);
//! assert_eq!(v.color().r, 0.5);
//! assert_eq!(v.w, 0.25);
//! ```

use std::mem::{align_of, size_of};
use std::ops::{Deref, DerefMut};

use super::Vector;
use crate::simd::traits::Kernel;

/// Positional view of a 2-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Xy<T> {
    pub x: T,
    pub y: T,
}

/// Positional view of a 3-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Xyz<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// Positional view of a 4-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Xyzw<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

/// Colour view of a 2-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Rg<T> {
    pub r: T,
    pub g: T,
}

/// Colour view of a 3-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Rgb<T> {
    pub r: T,
    pub g: T,
    pub b: T,
}

/// Colour view of a 4-lane vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Rgba<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

/// Reinterprets an array of lanes as a same-layout view.
///
/// # Safety
///
/// `V` must be a `#[repr(C)]` struct of exactly `N` fields of type `T`.
#[inline(always)]
unsafe fn view<T, V, const N: usize>(lanes: &[T; N]) -> &V {
    debug_assert_eq!(size_of::<V>(), size_of::<[T; N]>());
    debug_assert_eq!(align_of::<V>(), align_of::<[T; N]>());
    &*(lanes as *const [T; N]).cast::<V>()
}

/// Mutable counterpart of [`view`].
///
/// # Safety
///
/// Same contract as [`view`].
#[inline(always)]
unsafe fn view_mut<T, V, const N: usize>(lanes: &mut [T; N]) -> &mut V {
    debug_assert_eq!(size_of::<V>(), size_of::<[T; N]>());
    &mut *(lanes as *mut [T; N]).cast::<V>()
}

macro_rules! impl_views {
    ($n:literal, $position:ident, $color:ident) => {
        impl<T: Kernel<$n>> Deref for Vector<T, $n> {
            type Target = $position<T>;

            #[inline(always)]
            fn deref(&self) -> &$position<T> {
                // SAFETY: the view is `#[repr(C)]` with `$n` fields of `T`.
                unsafe { view(self.as_array()) }
            }
        }

        impl<T: Kernel<$n>> DerefMut for Vector<T, $n> {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut $position<T> {
                // SAFETY: as in `deref`.
                unsafe { view_mut(self.as_mut_array()) }
            }
        }

        impl<T: Kernel<$n>> Vector<T, $n> {
            /// The lanes under colour names.
            #[inline(always)]
            pub fn color(&self) -> &$color<T> {
                // SAFETY: the view is `#[repr(C)]` with `$n` fields of `T`.
                unsafe { view(self.as_array()) }
            }

            #[inline(always)]
            pub fn color_mut(&mut self) -> &mut $color<T> {
                // SAFETY: as in `color`.
                unsafe { view_mut(self.as_mut_array()) }
            }
        }
    };
}

impl_views!(2, Xy, Rg);
impl_views!(3, Xyz, Rgb);
impl_views!(4, Xyzw, Rgba);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_layouts_match_arrays() {
        assert_eq!(size_of::<Xyz<f32>>(), size_of::<[f32; 3]>());
        assert_eq!(size_of::<Rgba<f64>>(), size_of::<[f64; 4]>());
        assert_eq!(align_of::<Xy<u32>>(), align_of::<[u32; 2]>());
    }

    #[test]
    fn test_field_order_matches_indices() {
        let v = Vector::<i32, 4>::new(1, 2, 3, 4);
        assert_eq!((v.x, v.y, v.z, v.w), (v[0], v[1], v[2], v[3]));
        let c = v.color();
        assert_eq!((c.r, c.g, c.b, c.a), (1, 2, 3, 4));
    }

    #[test]
    fn test_writes_through_every_view() {
        let mut v = Vector::<f32, 3>::zero();
        v.x = 1.0;
        v.color_mut().g = 2.0;
        v[2] = 3.0;
        assert_eq!(v.as_array(), &[1.0, 2.0, 3.0]);
        assert_eq!(*v, Xyz { x: 1.0, y: 2.0, z: 3.0 });
        assert_eq!(*v.color(), Rgb { r: 1.0, g: 2.0, b: 3.0 });
    }

    #[test]
    fn test_two_lane_views() {
        let mut v = Vector::<u32, 2>::new(7, 8);
        v.y += 1;
        assert_eq!(v.color().g, 9);
        assert_eq!(v.to_array(), [7, 9]);
    }
}
