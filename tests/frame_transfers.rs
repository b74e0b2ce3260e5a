use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use hs450::{
    AckPhase, FrameDimensions, FrameTransfer, PixelCodec, ProtocolError, RgbFrame,
    ScriptedTransport, Slot, TransferError,
};

fn slot(value: u8) -> Slot {
    Slot::new(value).expect("test slots are in range")
}

/// Builds the device-side script for a successful get: ready ack, header,
/// then the packed payload.
fn get_script(width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
    let mut script = vec![0x10];
    script.extend_from_slice(&width.to_be_bytes());
    script.extend_from_slice(&height.to_be_bytes());
    script.extend_from_slice(payload);
    script
}

#[test]
fn command_bytes_cover_every_slot() {
    let expected = [(1u8, 0x21u8, 0x24u8), (2, 0x31, 0x34), (3, 0x41, 0x44), (4, 0x51, 0x54)];
    for (index, get, put) in expected {
        assert_eq!(get, slot(index).get_command());
        assert_eq!(put, slot(index).put_command());
    }

    assert_matches!(Slot::new(0), Err(ProtocolError::InvalidSlot { slot: 0 }));
    assert_matches!(Slot::new(5), Err(ProtocolError::InvalidSlot { slot: 5 }));
}

#[test]
fn decoded_frames_are_three_halves_of_packed_length() {
    for (width, height) in [(2u16, 1u16), (4, 4), (16, 9), (640, 2)] {
        let dimensions = FrameDimensions::new(width, height).expect("non-zero dimensions");
        let packed = vec![0x80u8; dimensions.packed_len()];
        let rgb = PixelCodec::packed_to_rgb(&packed).expect("aligned payload should decode");
        assert_eq!(dimensions.rgb_len(), rgb.len());
    }
}

#[tokio::test]
async fn get_yields_black_pixels_for_floor_luma_and_neutral_chroma() {
    let mut transport = ScriptedTransport::new(get_script(2, 1, &[16, 128, 16, 128]));

    let frame = FrameTransfer::get(&mut transport, slot(1))
        .await
        .expect("scripted mid-gray get should succeed");

    assert_eq!(2, frame.dimensions().width());
    assert_eq!(1, frame.dimensions().height());
    assert_eq!(&[0, 0, 0, 0, 0, 0], frame.payload());
    assert_eq!(&[0x21], transport.written());
    assert_eq!(0, transport.remaining());
}

#[tokio::test]
async fn put_of_pure_white_sends_limited_range_luma_and_neutral_chroma() {
    let dimensions = FrameDimensions::new(2, 1).expect("2x1 should be valid");
    let frame = RgbFrame::try_from((dimensions, vec![255u8; 6]))
        .expect("white 2x1 frame should validate");
    let mut transport = ScriptedTransport::new(vec![0xAC, 0xAC]);

    FrameTransfer::put(&mut transport, slot(2), &frame)
        .await
        .expect("scripted put should succeed");

    let written = transport.written();
    // Command for slot 2, big-endian 2x1 header, then the packed payload.
    assert_eq!(0x34, written[0]);
    assert_eq!(&[0x00, 0x02, 0x00, 0x01], &written[1..5]);
    let payload = &written[5..];
    assert_eq!(4, payload.len());
    // Limited-range white luma on both samples, near-neutral chroma.
    assert_eq!(payload[0], payload[2]);
    assert_eq!(235, payload[0]);
    assert_eq!(payload[1], payload[3]);
    assert!((i16::from(payload[1]) - 128).abs() <= 1);
    // Both acks were consumed.
    assert_eq!(0, transport.remaining());
}

#[tokio::test]
async fn get_with_wrong_ready_ack_fails_before_the_header() {
    // Corrupt the ack byte only.
    let mut script = get_script(2, 1, &[16, 128, 16, 128]);
    script[0] = 0x99;
    let mut transport = ScriptedTransport::new(script);

    let result = FrameTransfer::get(&mut transport, slot(4)).await;

    assert_matches!(
        result,
        Err(TransferError::Protocol(ProtocolError::UnexpectedAck {
            phase: AckPhase::GetReady,
            expected: 0x10,
            actual: 0x99,
        }))
    );
    // Header and payload stayed unread.
    assert_eq!(8, transport.remaining());
}

#[tokio::test]
async fn get_with_short_payload_is_a_protocol_fault_not_a_truncated_frame() {
    // Header declares 4x4 (32 payload bytes) but the stream closes after 20.
    let mut transport = ScriptedTransport::new(get_script(4, 4, &vec![0x80; 20]));

    let result = FrameTransfer::get(&mut transport, slot(1)).await;

    assert_matches!(
        result,
        Err(TransferError::Protocol(ProtocolError::ShortFrame {
            expected: 32,
            received: 20,
        }))
    );
}

#[tokio::test]
async fn get_with_zero_width_header_is_rejected() {
    let mut transport = ScriptedTransport::new(vec![0x10, 0x00, 0x00, 0x00, 0x08]);

    let result = FrameTransfer::get(&mut transport, slot(1)).await;

    assert_matches!(
        result,
        Err(TransferError::Protocol(ProtocolError::EmptyDimensions {
            width: 0,
            height: 8,
        }))
    );
}

#[tokio::test]
async fn sequential_transfers_reuse_one_transport() {
    // A put followed by a get on the same connection, as the device allows.
    let mut script = vec![0xAC, 0xAC];
    script.extend(get_script(2, 1, &[235, 127, 235, 127]));
    let mut transport = ScriptedTransport::new(script);

    let dimensions = FrameDimensions::new(2, 1).expect("2x1 should be valid");
    let frame =
        RgbFrame::try_from((dimensions, vec![255u8; 6])).expect("white frame should validate");

    FrameTransfer::put(&mut transport, slot(1), &frame)
        .await
        .expect("scripted put should succeed");
    let fetched = FrameTransfer::get(&mut transport, slot(1))
        .await
        .expect("scripted get should succeed");

    // The fetched frame is the stored white frame after one lossy round trip.
    for channel in fetched.payload() {
        assert!(*channel >= 250, "white should stay near-white, got {channel}");
    }
}
