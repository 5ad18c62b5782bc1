//! Telemetry packet — the fixed-width record carried over the radio link.
//!
//! Wire layout (6 bytes, no padding — fits the radio's fixed payload width):
//!
//! ```text
//! byte 0    node identifier (0–255, constant per deployment)
//! byte 1    packet type / schema version tag (0x01 = initial schema)
//! bytes 2–3 temperature × 100, signed 16-bit little-endian
//! bytes 4–5 humidity × 100, signed 16-bit little-endian
//! ```
//!
//! A packet is constructed fresh each operational cycle and never retained:
//! an unsent packet is simply discarded when the node goes back to sleep.

use crate::sensors::EncodedSample;

/// Schema version carried in byte 1. Bump when the layout changes so the
/// gateway can dispatch on it.
pub const PACKET_TYPE_V1: u8 = 0x01;

/// Size of the encoded packet on the wire.
pub const WIRE_SIZE: usize = 6;

/// One telemetry record, ready for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryPacket {
    pub node_id: u8,
    pub packet_type: u8,
    /// Temperature in hundredths of a degree Celsius.
    pub temp_centi: i16,
    /// Relative humidity in hundredths of a percent.
    pub hum_centi: i16,
}

impl TelemetryPacket {
    /// Build a packet for the current cycle from an encoded sample.
    pub fn new(node_id: u8, sample: EncodedSample) -> Self {
        Self {
            node_id,
            packet_type: PACKET_TYPE_V1,
            temp_centi: sample.temp_centi,
            hum_centi: sample.hum_centi,
        }
    }

    /// Serialise to the fixed wire layout.
    pub fn to_bytes(&self) -> [u8; WIRE_SIZE] {
        let t = self.temp_centi.to_le_bytes();
        let h = self.hum_centi.to_le_bytes();
        [self.node_id, self.packet_type, t[0], t[1], h[0], h[1]]
    }

    /// Decode a received payload (gateway side; also exercised by tests).
    /// Returns `None` if the type tag is unknown.
    pub fn from_bytes(buf: &[u8; WIRE_SIZE]) -> Option<Self> {
        if buf[1] != PACKET_TYPE_V1 {
            return None;
        }
        Some(Self {
            node_id: buf[0],
            packet_type: buf[1],
            temp_centi: i16::from_le_bytes([buf[2], buf[3]]),
            hum_centi: i16::from_le_bytes([buf[4], buf[5]]),
        })
    }

    /// Temperature in degrees Celsius.
    pub fn temperature_c(&self) -> f32 {
        self.temp_centi as f32 / 100.0
    }

    /// Relative humidity in percent.
    pub fn humidity_pct(&self) -> f32 {
        self.hum_centi as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::Sample;

    #[test]
    fn reference_scenario_encodes_exactly() {
        // temp=23.45 °C, humidity=60.12 % → {2345, 6012}
        let sample = Sample {
            temperature_c: 23.45,
            humidity_pct: 60.12,
        };
        let pkt = TelemetryPacket::new(7, sample.encode());
        assert_eq!(pkt.temp_centi, 2345);
        assert_eq!(pkt.hum_centi, 6012);
    }

    #[test]
    fn wire_layout_is_fixed() {
        let pkt = TelemetryPacket {
            node_id: 42,
            packet_type: PACKET_TYPE_V1,
            temp_centi: -1234,
            hum_centi: 9876,
        };
        let bytes = pkt.to_bytes();
        assert_eq!(bytes.len(), WIRE_SIZE);
        assert_eq!(bytes[0], 42);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), -1234);
        assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), 9876);
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let pkt = TelemetryPacket {
            node_id: 3,
            packet_type: PACKET_TYPE_V1,
            temp_centi: -4000,
            hum_centi: 10_000,
        };
        let decoded = TelemetryPacket::from_bytes(&pkt.to_bytes()).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn unknown_type_tag_rejected() {
        let mut bytes = TelemetryPacket::new(1, Sample::default().encode()).to_bytes();
        bytes[1] = 0x7F;
        assert!(TelemetryPacket::from_bytes(&bytes).is_none());
    }

    #[test]
    fn decode_within_one_hundredth() {
        let sample = Sample {
            temperature_c: 19.994,
            humidity_pct: 55.559,
        };
        let pkt = TelemetryPacket::new(1, sample.encode());
        assert!((pkt.temperature_c() - 19.994).abs() < 0.01);
        assert!((pkt.humidity_pct() - 55.559).abs() < 0.01);
    }
}
