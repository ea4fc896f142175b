//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog text encoding
//!
//! A catalog declares its encoding in the header's Content-Type line.
//! UTF-8 catalogs are decoded strictly.  Any other charset is carried
//! byte for byte: each byte becomes the character with the same value
//! (the ISO-8859-1 mapping) and is written back as that byte, so the
//! file round-trips exactly without a conversion table.

use super::po_file::PoError;
use std::ffi::OsStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Utf8,
    /// Any non-UTF-8 charset, kept one byte per character
    EightBit,
}

impl Charset {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            // "CHARSET" is the placeholder in freshly extracted templates
            "UTF-8" | "UTF8" | "ASCII" | "US-ASCII" | "CHARSET" => Charset::Utf8,
            _ => Charset::EightBit,
        }
    }

    /// Pick the charset for raw catalog bytes: the declared one, or
    /// UTF-8 when undeclared and the bytes are valid UTF-8.
    pub fn detect(bytes: &[u8]) -> Self {
        match declared_charset(bytes) {
            Some(name) => Charset::from_name(&name),
            None if std::str::from_utf8(bytes).is_ok() => Charset::Utf8,
            None => Charset::EightBit,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String, PoError> {
        match self {
            Charset::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_string()),
                Err(e) => {
                    let line = 1 + bytes[..e.valid_up_to()]
                        .iter()
                        .filter(|&&b| b == b'\n')
                        .count();
                    Err(PoError::InvalidUtf8(line))
                }
            },
            Charset::EightBit => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Inverse of `decode`.  Characters above U+00FF cannot occur in
    /// text decoded as eight-bit; if added later they are written as UTF-8.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::EightBit => {
                let mut out = Vec::with_capacity(text.len());
                let mut buf = [0u8; 4];
                for c in text.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(b) => out.push(b),
                        Err(_) => out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
                    }
                }
                out
            }
        }
    }

    /// Convert a command-line string for use inside catalog text, so
    /// that `encode` reproduces its bytes.  Exact on Unix; elsewhere,
    /// and for bytes that are not UTF-8 in a UTF-8 catalog, lossy.
    pub fn decode_os(self, s: &OsStr) -> String {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            if self == Charset::EightBit {
                return s.as_bytes().iter().map(|&b| char::from(b)).collect();
            }
        }
        s.to_string_lossy().into_owned()
    }
}

/// Charset named on a `"Content-Type: ...; charset=NAME\n"` header line
fn declared_charset(bytes: &[u8]) -> Option<String> {
    for line in bytes.split(|&b| b == b'\n') {
        let line = String::from_utf8_lossy(line);
        let Some(rest) = line.trim_start().strip_prefix("\"Content-Type:") else {
            continue;
        };
        let Some(pos) = rest.find("charset=") else {
            continue;
        };
        let name: String = rest[pos + "charset=".len()..]
            .chars()
            .take_while(|c| !matches!(c, '\\' | '"' | ';') && !c.is_whitespace())
            .collect();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}
