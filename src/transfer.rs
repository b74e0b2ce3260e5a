use tracing::{debug, info, instrument};

use crate::codec::PixelCodec;
use crate::error::TransferError;
use crate::media::{PackedFrame, RgbFrame};
use crate::protocol::{AckPhase, FrameDimensions, HEADER_LEN, ProtocolError, Slot};
use crate::transport::{Transport, TransportError};

/// Drives one complete get or put exchange against a framestore slot.
///
/// Each call is a single linear pass over the wire grammar; any failure at
/// any step aborts the whole operation and nothing is retried or resumed.
pub struct FrameTransfer;

impl FrameTransfer {
    /// Fetches the frame stored in `slot` and decodes it to RGB888.
    ///
    /// Wire sequence: get command, `0x10` ack, 4-byte header, exactly
    /// `W*H*2` payload bytes. A connection that closes short of the payload
    /// length surfaces as a short-frame protocol error, never a truncated
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure, unexpected ack, malformed
    /// header, or payload inconsistency.
    #[instrument(skip(transport), level = "info", fields(%slot))]
    pub async fn get(
        transport: &mut dyn Transport,
        slot: Slot,
    ) -> Result<RgbFrame, TransferError> {
        transport.send_all(&[slot.get_command()]).await?;

        let ack = transport.recv_byte().await?;
        AckPhase::GetReady.check(ack)?;

        let header_bytes = transport.recv_exact(HEADER_LEN).await?;
        let header = [
            header_bytes[0],
            header_bytes[1],
            header_bytes[2],
            header_bytes[3],
        ];
        let dimensions = FrameDimensions::decode_header(header)?;
        debug!(%dimensions, "received frame header");

        let expected = dimensions.packed_len();
        let payload = match transport.recv_exact(expected).await {
            Ok(payload) => payload,
            Err(TransportError::Closed { received, .. }) => {
                return Err(ProtocolError::ShortFrame { expected, received }.into());
            }
            Err(error) => return Err(error.into()),
        };
        let packed = PackedFrame::try_from((dimensions, payload))?;

        let rgb = PixelCodec::packed_to_rgb(packed.payload())?;
        let frame = RgbFrame::try_from((dimensions, rgb))?;
        info!(%dimensions, "fetched frame");
        Ok(frame)
    }

    /// Encodes `frame` to the packed layout and stores it into `slot`.
    ///
    /// Wire sequence: put command, `0xAC` ready ack, 4-byte header, exactly
    /// `W*H*2` payload bytes, then a second `0xAC` ack confirming storage.
    /// The second ack is the only evidence the device kept the frame; its
    /// absence fails the operation.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure, unexpected ack, or when
    /// the encoded payload does not match the frame's declared dimensions.
    #[instrument(skip(transport, frame), level = "info", fields(%slot, dimensions = %frame.dimensions()))]
    pub async fn put(
        transport: &mut dyn Transport,
        slot: Slot,
        frame: &RgbFrame,
    ) -> Result<(), TransferError> {
        let dimensions = frame.dimensions();
        let encoded = PixelCodec::rgb_to_packed(frame.payload())?;
        // Re-validate against the header we are about to declare.
        let packed = PackedFrame::try_from((dimensions, encoded))?;

        transport.send_all(&[slot.put_command()]).await?;

        let ack = transport.recv_byte().await?;
        AckPhase::PutReady.check(ack)?;

        transport.send_all(&dimensions.encode_header()).await?;
        transport.send_all(packed.payload()).await?;
        debug!(payload_len = packed.payload().len(), "payload sent, awaiting store ack");

        let ack = transport.recv_byte().await?;
        AckPhase::PutComplete.check(ack)?;
        info!(%dimensions, "stored frame");
        Ok(())
    }
}
