//! Text encodings supported for resource content.
//!
//! Names follow the common charset spelling (`UTF-8`, `ISO-8859-1`, ...)
//! and are matched case-insensitively, with a few short aliases.

mod decoder;

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use decoder::{DecodeError, Decoder};
use crate::error::{Error, Result};

/// Character encoding used to turn object bytes into text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum TextEncoding {
    /// UTF-8, the default.
    #[default]
    #[strum(to_string = "UTF-8", serialize = "utf8")]
    Utf8,
    /// UTF-16, little endian, no byte order mark handling.
    #[strum(to_string = "UTF-16LE", serialize = "utf16le")]
    Utf16Le,
    /// UTF-16, big endian, no byte order mark handling.
    #[strum(to_string = "UTF-16BE", serialize = "utf16be")]
    Utf16Be,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    #[strum(
        to_string = "ISO-8859-1",
        serialize = "latin1",
        serialize = "iso8859-1",
        serialize = "iso_8859_1"
    )]
    Latin1,
    /// 7-bit US-ASCII; bytes above `0x7F` are rejected.
    #[strum(to_string = "US-ASCII", serialize = "ascii")]
    Ascii,
}

impl TextEncoding {
    /// Looks up an encoding by name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| Error::UnknownEncoding(name.to_owned()))
    }

    /// Creates a fresh incremental decoder for this encoding.
    pub fn decoder(self) -> Decoder {
        Decoder::new(self)
    }
}
