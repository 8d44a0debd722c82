//! Builds the SNS message body for an inserted item.
//!
//! The body is a JSON-structured message: an envelope whose `default`
//! key holds the item image, itself serialized to a JSON string.
//! Subscribers of any protocol receive that `default` rendering.

use crate::record::Image;
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// The `MessageStructure` value that goes along with these bodies.
pub const MESSAGE_STRUCTURE: &str = "json";

/// Per-protocol renderings of a message. Only the fallback rendering
/// is populated.
#[derive(Serialize)]
struct Envelope<'a> {
    default: &'a str,
}

/// JSON formatter emitting `", "` and `": "` separators and escaping
/// every character outside printable ASCII as `\uXXXX`, so that bodies
/// match the ones other producers on the same topic already emit.
struct WireFormatter;

impl Formatter for WireFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if !fragment.chars().any(needs_escape) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if !needs_escape(c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Whether a character that serde_json leaves alone still has to be
/// written as `\uXXXX`. DEL is ASCII but not printable.
fn needs_escape(c: char) -> bool {
    !c.is_ascii() || c == '\x7f'
}

/// Serialize a value with the wire formatter.
fn to_wire_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, WireFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Produce the message body for an item image: the image serialized
/// once, wrapped under `default`, and the envelope serialized again.
pub fn encode(image: &Image) -> Result<String> {
    let rendered = to_wire_string(image)?;
    to_wire_string(&Envelope { default: &rendered })
}
