// Escape bytes and the CSI macro the palette is built from.

/// ESC as a byte, for scanning rendered text.
pub const ESC_BYTE: u8 = 0x1B;

/// `ESC [` followed by `$suffix`, as a `&'static str`.
#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}
