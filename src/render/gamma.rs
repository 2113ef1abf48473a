//! Square-root gamma correction.

/// Precomputed correction table.
/// Formula: output = round(255 * sqrt(input / 255))
/// Generated with: (0..256).map(|i| (255.0 * (i as f64 / 255.0).sqrt()).round() as u8)
#[rustfmt::skip]
const GAMMA_LUT: [u8; 256] = [
    0, 16, 23, 28, 32, 36, 39, 42, 45, 48, 50, 53, 55, 58, 60, 62,
    64, 66, 68, 70, 71, 73, 75, 77, 78, 80, 81, 83, 84, 86, 87, 89,
    90, 92, 93, 94, 96, 97, 98, 100, 101, 102, 103, 105, 106, 107, 108, 109,
    111, 112, 113, 114, 115, 116, 117, 118, 119, 121, 122, 123, 124, 125, 126, 127,
    128, 129, 130, 131, 132, 133, 134, 135, 135, 136, 137, 138, 139, 140, 141, 142,
    143, 144, 145, 145, 146, 147, 148, 149, 150, 151, 151, 152, 153, 154, 155, 156,
    156, 157, 158, 159, 160, 160, 161, 162, 163, 164, 164, 165, 166, 167, 167, 168,
    169, 170, 170, 171, 172, 173, 173, 174, 175, 176, 176, 177, 178, 179, 179, 180,
    181, 181, 182, 183, 183, 184, 185, 186, 186, 187, 188, 188, 189, 190, 190, 191,
    192, 192, 193, 194, 194, 195, 196, 196, 197, 198, 198, 199, 199, 200, 201, 201,
    202, 203, 203, 204, 204, 205, 206, 206, 207, 208, 208, 209, 209, 210, 211, 211,
    212, 212, 213, 214, 214, 215, 215, 216, 217, 217, 218, 218, 219, 220, 220, 221,
    221, 222, 222, 223, 224, 224, 225, 225, 226, 226, 227, 228, 228, 229, 229, 230,
    230, 231, 231, 232, 233, 233, 234, 234, 235, 235, 236, 236, 237, 237, 238, 238,
    239, 240, 240, 241, 241, 242, 242, 243, 243, 244, 244, 245, 245, 246, 246, 247,
    247, 248, 248, 249, 249, 250, 250, 251, 251, 252, 252, 253, 253, 254, 254, 255,
];

/// Correct a single channel value.
#[inline]
pub fn gamma_correct(value: u8) -> u8 {
    GAMMA_LUT[value as usize]
}

/// Correct the r, g and b channels of a packed BGRA pixel, leaving alpha alone.
#[inline]
pub fn gamma_correct_pixel(pixel: u32) -> u32 {
    let b = gamma_correct(pixel as u8) as u32;
    let g = gamma_correct((pixel >> 8) as u8) as u32;
    let r = gamma_correct((pixel >> 16) as u8) as u32;
    (pixel & 0xFF00_0000) | (r << 16) | (g << 8) | b
}
