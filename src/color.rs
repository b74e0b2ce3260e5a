//! Limited-range HDTV colour conversion.
//!
//! Coefficients follow the BT.709 limited-range convention: luma nominally
//! occupies `[16, 235]` and chroma `[16, 240]` within a `[0, 255]` byte.

/// Row-major Y'CbCr → R'G'B' coefficients applied to `[y-16, cb-128, cr-128]`.
const YCBCR_TO_RGB: [[f64; 3]; 3] = [
    [1.164, 0.0, 1.793],
    [1.164, -0.213, -0.533],
    [1.164, 2.112, 0.0],
];

/// Row-major R'G'B' → Y'CbCr coefficients, offset by `[16, 128, 128]`.
const RGB_TO_YCBCR: [[f64; 3]; 3] = [
    [0.183, 0.614, 0.062],
    [-0.101, -0.339, 0.439],
    [0.439, -0.399, -0.040],
];

const YCBCR_OFFSETS: [f64; 3] = [16.0, 128.0, 128.0];

/// Limited-range conversions between Y'CbCr and R'G'B' channel triples.
///
/// Results are clamped to `[0, 255]` and then truncated toward zero, not
/// rounded. The device stores frames produced by the same truncating
/// arithmetic, so this bias is part of the wire-compatible behaviour.
pub struct ColorMatrix;

impl ColorMatrix {
    /// Converts one limited-range Y'CbCr sample to an RGB triple.
    ///
    /// ```
    /// use hs450::ColorMatrix;
    ///
    /// // Y = 16 is the limited-range black floor.
    /// assert_eq!([0, 0, 0], ColorMatrix::ycbcr_to_rgb(16, 128, 128));
    /// // Y = 235 is limited-range white.
    /// assert_eq!([254, 254, 254], ColorMatrix::ycbcr_to_rgb(235, 128, 128));
    /// ```
    #[must_use]
    pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
        let input = [
            f64::from(y) - 16.0,
            f64::from(cb) - 128.0,
            f64::from(cr) - 128.0,
        ];
        YCBCR_TO_RGB.map(|row| clamp_truncate(dot(row, input)))
    }

    /// Converts one RGB triple to a limited-range Y'CbCr sample.
    ///
    /// ```
    /// use hs450::ColorMatrix;
    ///
    /// assert_eq!([16, 128, 128], ColorMatrix::rgb_to_ycbcr(0, 0, 0));
    /// assert_eq!([235, 127, 127], ColorMatrix::rgb_to_ycbcr(255, 255, 255));
    /// ```
    #[must_use]
    pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> [u8; 3] {
        let input = [f64::from(r), f64::from(g), f64::from(b)];
        let mut out = [0u8; 3];
        for (channel, (row, offset)) in out
            .iter_mut()
            .zip(RGB_TO_YCBCR.into_iter().zip(YCBCR_OFFSETS))
        {
            *channel = clamp_truncate(offset + dot(row, input));
        }
        out
    }
}

fn dot(row: [f64; 3], input: [f64; 3]) -> f64 {
    row[0] * input[0] + row[1] * input[1] + row[2] * input[2]
}

fn clamp_truncate(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
