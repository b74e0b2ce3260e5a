use thiserror::Error;

use crate::color::ColorMatrix;

/// Bytes per packed group: two luma samples sharing one chroma pair.
const PACKED_GROUP_LEN: usize = 4;
/// Bytes per RGB pixel pair covered by one packed group.
const RGB_GROUP_LEN: usize = 6;

/// Errors returned by pixel-format conversion.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PixelCodecError {
    /// The packed input length is not a whole number of `(y1, cb, y2, cr)` groups.
    #[error("packed buffer length {actual} is not a multiple of {PACKED_GROUP_LEN}")]
    PackedLengthNotGrouped { actual: usize },
    /// The RGB input length is not a whole number of two-pixel groups.
    #[error("rgb buffer length {actual} is not a multiple of {RGB_GROUP_LEN}")]
    RgbLengthNotGrouped { actual: usize },
}

/// Converts between the framestore's packed 4:2:2 layout and RGB888.
///
/// Two horizontally adjacent pixels share one Cb/Cr pair on the wire, so the
/// packed form is exactly two thirds the size of the RGB form. The round
/// trip is lossy: chroma subsampling discards one chroma sample per pixel
/// pair, and all channel arithmetic clamps and truncates.
pub struct PixelCodec;

impl PixelCodec {
    /// Decodes a packed 4:2:2 buffer into interleaved RGB888 bytes.
    ///
    /// Both luma samples in a group are reconstructed against the same
    /// chroma pair; no chroma interpolation is performed. The output is
    /// exactly `input_len / 4 * 6` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error when the input length is not a multiple of 4.
    ///
    /// ```
    /// use hs450::PixelCodec;
    ///
    /// // One group of limited-range black decodes to two black pixels.
    /// let rgb = PixelCodec::packed_to_rgb(&[16, 128, 16, 128])?;
    /// assert_eq!(vec![0, 0, 0, 0, 0, 0], rgb);
    /// # Ok::<(), hs450::PixelCodecError>(())
    /// ```
    pub fn packed_to_rgb(packed: &[u8]) -> Result<Vec<u8>, PixelCodecError> {
        if packed.len() % PACKED_GROUP_LEN != 0 {
            return Err(PixelCodecError::PackedLengthNotGrouped {
                actual: packed.len(),
            });
        }

        let mut rgb = Vec::with_capacity(packed.len() / PACKED_GROUP_LEN * RGB_GROUP_LEN);
        for group in packed.chunks_exact(PACKED_GROUP_LEN) {
            let [y1, cb, y2, cr] = [group[0], group[1], group[2], group[3]];
            rgb.extend_from_slice(&ColorMatrix::ycbcr_to_rgb(y1, cb, cr));
            rgb.extend_from_slice(&ColorMatrix::ycbcr_to_rgb(y2, cb, cr));
        }
        Ok(rgb)
    }

    /// Encodes interleaved RGB888 bytes into the packed 4:2:2 layout.
    ///
    /// Each pixel converts to Y'CbCr independently; the two chroma samples
    /// of a pair are then merged with a truncating integer average. The
    /// output is exactly `input_len / 6 * 4` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error when the input length is not a multiple of 6, i.e.
    /// when the buffer does not hold a whole number of pixel pairs.
    ///
    /// ```
    /// use hs450::PixelCodec;
    ///
    /// let packed = PixelCodec::rgb_to_packed(&[255, 255, 255, 255, 255, 255])?;
    /// assert_eq!(vec![235, 127, 235, 127], packed);
    /// # Ok::<(), hs450::PixelCodecError>(())
    /// ```
    pub fn rgb_to_packed(rgb: &[u8]) -> Result<Vec<u8>, PixelCodecError> {
        if rgb.len() % RGB_GROUP_LEN != 0 {
            return Err(PixelCodecError::RgbLengthNotGrouped { actual: rgb.len() });
        }

        let mut packed = Vec::with_capacity(rgb.len() / RGB_GROUP_LEN * PACKED_GROUP_LEN);
        for pair in rgb.chunks_exact(RGB_GROUP_LEN) {
            let [y1, cb1, cr1] = ColorMatrix::rgb_to_ycbcr(pair[0], pair[1], pair[2]);
            let [y2, cb2, cr2] = ColorMatrix::rgb_to_ycbcr(pair[3], pair[4], pair[5]);
            packed.push(y1);
            packed.push(average_chroma(cb1, cb2));
            packed.push(y2);
            packed.push(average_chroma(cr1, cr2));
        }
        Ok(packed)
    }
}

/// Truncating integer average, matching the device's pairing arithmetic.
fn average_chroma(first: u8, second: u8) -> u8 {
    ((u16::from(first) + u16::from(second)) / 2) as u8
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn packed_to_rgb_expands_each_group_to_two_pixels() {
        let rgb = PixelCodec::packed_to_rgb(&[16, 128, 235, 128])
            .expect("aligned packed buffer should decode");
        assert_eq!(vec![0, 0, 0, 254, 254, 254], rgb);
    }

    #[test]
    fn packed_to_rgb_reuses_the_chroma_pair_for_both_lumas() {
        let rgb = PixelCodec::packed_to_rgb(&[81, 90, 81, 240])
            .expect("aligned packed buffer should decode");
        let first: [u8; 3] = rgb[0..3].try_into().expect("three bytes");
        let second: [u8; 3] = rgb[3..6].try_into().expect("three bytes");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    fn packed_to_rgb_rejects_unaligned_input(#[case] len: usize) {
        let result = PixelCodec::packed_to_rgb(&vec![0u8; len]);
        assert_matches!(
            result,
            Err(PixelCodecError::PackedLengthNotGrouped { actual }) if actual == len
        );
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(9)]
    fn rgb_to_packed_rejects_partial_pixel_pairs(#[case] len: usize) {
        let result = PixelCodec::rgb_to_packed(&vec![0u8; len]);
        assert_matches!(
            result,
            Err(PixelCodecError::RgbLengthNotGrouped { actual }) if actual == len
        );
    }

    #[test]
    fn rgb_to_packed_averages_chroma_with_truncation() {
        // Red then blue: cb 102/239, cr 239/117. Truncating averages are
        // (102+239)/2 = 170 and (239+117)/2 = 178.
        let packed = PixelCodec::rgb_to_packed(&[255, 0, 0, 0, 0, 255])
            .expect("aligned rgb buffer should encode");
        assert_eq!(vec![62, 170, 31, 178], packed);
    }

    #[test]
    fn decode_output_is_three_halves_of_input() {
        for groups in [1usize, 2, 7, 32] {
            let packed = vec![128u8; groups * 4];
            let rgb = PixelCodec::packed_to_rgb(&packed).expect("aligned buffer should decode");
            assert_eq!(groups * 6, rgb.len());
        }
    }

    #[test]
    fn encode_then_decode_stays_close_on_smooth_gradients() {
        // Chroma subsampling and truncation make the round trip lossy, but
        // for slowly varying input every channel must land within a small
        // bound of the original.
        let mut rgb = Vec::new();
        for i in 0u16..128 {
            let base = (i * 2) as u8;
            rgb.extend_from_slice(&[base, base.saturating_add(3), base.saturating_sub(2)]);
        }

        let packed = PixelCodec::rgb_to_packed(&rgb).expect("gradient should encode");
        let recovered = PixelCodec::packed_to_rgb(&packed).expect("gradient should decode");

        assert_eq!(rgb.len(), recovered.len());
        assert_ne!(rgb, recovered, "chroma subsampling must lose information");
        for (index, (&original, &roundtripped)) in rgb.iter().zip(&recovered).enumerate() {
            let error = (i16::from(original) - i16::from(roundtripped)).unsigned_abs();
            assert!(
                error <= 8,
                "channel {index} drifted by {error}: {original} -> {roundtripped}"
            );
        }
    }
}
