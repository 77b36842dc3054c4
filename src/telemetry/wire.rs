//! Raw byte framing for the UDP payload.
//!
//! The wire format is N consecutive 4-byte little-endian IEEE-754
//! single-precision floats with no header, delimiter, length prefix, or
//! checksum. N is fixed per deployment by the selection spec.

use crate::error::{Result, TelemetryError};

/// Append a frame's little-endian bytes to `buffer`.
///
/// Callers that send every cycle reuse one buffer to avoid a per-packet
/// allocation.
pub fn write_frame(buffer: &mut Vec<u8>, frame: &[f32]) {
    buffer.reserve(frame.len() * 4);
    for value in frame {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

/// Serialize a frame to a fresh byte vector.
pub fn frame_to_bytes(frame: &[f32]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(frame.len() * 4);
    write_frame(&mut buffer, frame);
    buffer
}

/// Decode a payload back into floats. Used by tests and receiver tooling.
pub fn bytes_to_frame(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(TelemetryError::transport_error(format!(
            "payload length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact_bytes_and_values() {
        let frame = [1.5f32, -2.25, 0.0];
        let bytes = frame_to_bytes(&frame);

        assert_eq!(bytes.len(), 12);

        let decoded = bytes_to_frame(&bytes).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_little_endian_layout() {
        let bytes = frame_to_bytes(&[1.0]);
        assert_eq!(bytes, vec![0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_empty_frame_is_empty_payload() {
        assert!(frame_to_bytes(&[]).is_empty());
        assert_eq!(bytes_to_frame(&[]).unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        assert!(bytes_to_frame(&[0x00, 0x00, 0x80]).is_err());
    }

    #[test]
    fn test_write_frame_appends_to_existing_buffer() {
        let mut buffer = vec![0xffu8];
        write_frame(&mut buffer, &[1.0]);
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer[0], 0xff);
    }
}
