//! Commit packet: applies every region staged since the last commit
//!
//! `0d 00 02`, zero padding, then one marker byte naming the region.

use crate::layout::Region;

pub const HEADER: [u8; 3] = [0x0d, 0x00, 0x02];

pub const MARKER_MODIFIERS: u8 = 0x2d;
pub const MARKER_ALPHANUMERIC: u8 = 0x08;
pub const MARKER_ENTER: u8 = 0x87;
pub const MARKER_SPECIAL: u8 = 0x44;
pub const MARKER_NONE: u8 = 0x00;

/// Marker of the last touched region in send order
pub fn marker(touched: &[Region]) -> u8 {
    touched
        .iter()
        .max()
        .map_or(MARKER_NONE, Region::commit_marker)
}

pub fn encode(touched: &[Region], packet_size: usize) -> Vec<u8> {
    let mut packet = vec![0u8; packet_size];
    packet[..HEADER.len()].copy_from_slice(&HEADER);
    if let Some(last) = packet.last_mut() {
        *last = marker(touched);
    }
    packet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::COMMIT_PACKET_SIZE;

    #[test]
    fn test_layout() {
        let packet = encode(&Region::ALL, COMMIT_PACKET_SIZE);
        assert_eq!(packet.len(), 64);
        assert_eq!(&packet[..3], &HEADER);
        assert!(packet[3..63].iter().all(|&b| b == 0));
        assert_eq!(packet[63], MARKER_SPECIAL);
    }

    #[test]
    fn test_marker_follows_last_touched_region() {
        assert_eq!(marker(&[Region::Modifiers]), 0x2d);
        assert_eq!(marker(&[Region::Modifiers, Region::Alphanumeric]), 0x08);
        assert_eq!(marker(&[Region::Enter, Region::Modifiers]), 0x87);
        assert_eq!(marker(&[]), MARKER_NONE);
        assert_eq!(encode(&[], COMMIT_PACKET_SIZE)[63], 0x00);
    }
}
