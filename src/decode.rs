use anyhow::{Result, bail};
use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use tracing::warn;

use crate::cli::InputEncoding;

#[derive(Debug, Clone)]
pub struct DecodedInput {
    pub text: String,
    pub encoding: &'static str,
    pub replaced_malformed: bool,
}

/// Turns raw dump bytes into text. Exchange downloads are usually
/// Shift_JIS (Windows-31J); `auto` prefers UTF-8 when the bytes allow it.
pub fn decode_input(bytes: &[u8], mode: InputEncoding) -> Result<DecodedInput> {
    match mode {
        InputEncoding::Utf8 => decode_strict(bytes, UTF_8),
        InputEncoding::ShiftJis => decode_strict(bytes, SHIFT_JIS),
        InputEncoding::Auto => {
            if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
                return decode_strict(&bytes[bom_length..], encoding);
            }
            if std::str::from_utf8(bytes).is_ok() {
                return decode_strict(bytes, UTF_8);
            }

            let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
            if had_errors {
                warn!(
                    encoding = SHIFT_JIS.name(),
                    "input contained malformed sequences; replaced with U+FFFD"
                );
            }
            Ok(DecodedInput {
                text: text.into_owned(),
                encoding: SHIFT_JIS.name(),
                replaced_malformed: had_errors,
            })
        }
    }
}

fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedInput> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        bail!(
            "input is not valid {}; pass --encoding to choose another decoder",
            encoding.name()
        );
    }
    Ok(DecodedInput {
        text: text.into_owned(),
        encoding: encoding.name(),
        replaced_malformed: false,
    })
}
