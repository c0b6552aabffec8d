//! Packet buffer contract.
//!
//! A frame travels between the driver and the stack as a chain of memory
//! segments owned by the stack's allocator. This crate never allocates or
//! frees buffers itself; it only moves them. Ownership is the release
//! mechanism: whoever holds a buffer when it goes out of scope releases it,
//! exactly once.

/// A frame represented as a chain of byte segments.
///
/// Implemented by the network stack's buffer type. Drivers read it through
/// [`segments`](PacketBuffer::segments) or flatten it with
/// [`copy_to`](PacketBuffer::copy_to) before handing bytes to DMA.
pub trait PacketBuffer {
    /// Total frame length across all segments
    fn total_len(&self) -> usize;

    /// Iterate over the segments in order
    fn segments(&self) -> impl Iterator<Item = &[u8]>;

    /// Copy the frame into `out`, returning the number of bytes written.
    ///
    /// Copies at most `out.len()` bytes; a short `out` truncates the frame.
    fn copy_to(&self, out: &mut [u8]) -> usize {
        let mut written = 0;
        for segment in self.segments() {
            let room = out.len() - written;
            if room == 0 {
                break;
            }
            let n = segment.len().min(room);
            out[written..written + n].copy_from_slice(&segment[..n]);
            written += n;
        }
        written
    }

    /// True if the frame carries no bytes
    fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

impl PacketBuffer for &[u8] {
    fn total_len(&self) -> usize {
        self.len()
    }

    fn segments(&self) -> impl Iterator<Item = &[u8]> {
        core::iter::once(&**self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFrame;

    #[test]
    fn slice_is_single_segment() {
        let data: &[u8] = &[1, 2, 3, 4];
        assert_eq!(data.total_len(), 4);
        assert_eq!(data.segments().count(), 1);
    }

    #[test]
    fn copy_to_flattens_chain() {
        let frame = MockFrame::chained(&[&[1, 2], &[3], &[4, 5, 6]]);
        let mut out = [0u8; 8];
        let n = frame.copy_to(&mut out);
        assert_eq!(n, 6);
        assert_eq!(&out[..n], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn copy_to_truncates_at_output_len() {
        let frame = MockFrame::chained(&[&[1, 2, 3], &[4, 5, 6]]);
        let mut out = [0u8; 4];
        assert_eq!(frame.copy_to(&mut out), 4);
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn copy_to_empty_output() {
        let frame = MockFrame::chained(&[&[1, 2, 3]]);
        let mut out = [0u8; 0];
        assert_eq!(frame.copy_to(&mut out), 0);
    }

    #[test]
    fn empty_frame_is_empty() {
        let data: &[u8] = &[];
        assert!(data.is_empty());
        assert!(!MockFrame::chained(&[&[0]]).is_empty());
    }
}
