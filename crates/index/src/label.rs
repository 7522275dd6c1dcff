use byte_slice_cast::{ToByteSlice, ToMutByteSlice};

/// Upper clamp for the path-count field. All counter arithmetic saturates
/// at this bound and stays saturated; the distance answer is unaffected.
pub const UB_C: u32 = u32::MAX;

/// Largest storable distance. `u32::MAX` is reserved as the "unreached"
/// sentinel in scratch arrays and must never appear in a label entry.
pub const D_MAX: u32 = u32::MAX - 1;

/// Scratch-array sentinel for vertices not reached by a traversal.
pub(crate) const INF: u32 = u32::MAX;

/// A single hub label: from the vertex owning the surrounding label list,
/// `hub` is reachable via `dist` edges along `cnt` distinct shortest paths
/// among those passing through `hub`.
///
/// The record is three contiguous `u32` fields (12 bytes) and is written to
/// disk as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct LabelEntry {
    hub: u32,
    dist: u32,
    cnt: u32,
}

impl LabelEntry {
    pub fn new(hub: u32, dist: u32, cnt: u32) -> Self {
        assert!(dist <= D_MAX, "label distance {dist} exceeds D_MAX");
        Self { hub, dist, cnt }
    }

    #[inline]
    pub fn hub(&self) -> u32 {
        self.hub
    }

    #[inline]
    pub fn dist(&self) -> u32 {
        self.dist
    }

    #[inline]
    pub fn cnt(&self) -> u32 {
        self.cnt
    }
}

/// Clamps a 64-bit running count into the stored field width.
#[inline]
pub(crate) fn sat(cnt: u64) -> u32 {
    cnt.min(UB_C as u64) as u32
}

unsafe impl ToByteSlice for LabelEntry {
    fn to_byte_slice<S: AsRef<[Self]> + ?Sized>(slice: &S) -> &[u8] {
        let slice = slice.as_ref();
        let len = slice.len() * std::mem::size_of::<LabelEntry>();
        unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, len) }
    }
}

unsafe impl ToMutByteSlice for LabelEntry {
    fn to_mut_byte_slice<S: AsMut<[Self]> + ?Sized>(slice: &mut S) -> &mut [u8] {
        let slice = slice.as_mut();
        let len = slice.len() * std::mem::size_of::<LabelEntry>();
        unsafe { std::slice::from_raw_parts_mut(slice.as_mut_ptr() as *mut u8, len) }
    }
}
