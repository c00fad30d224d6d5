use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

use crate::container::{Container, Entry, EntryProperties};
use crate::error::{DecodeError, DecodeResult};

pub const GIF87A_MAGIC: &[u8; 6] = b"GIF87a";
pub const GIF89A_MAGIC: &[u8; 6] = b"GIF89a";

const EXTENSION_INTRODUCER: u8 = 0x21;
const APPLICATION_EXTENSION: u8 = 0xFF;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

/// GIF backend of the [`Container`] boundary.
///
/// Opening a container checks the data-stream signature, walks the block
/// stream for the NETSCAPE2.0 loop count, and decodes the per-entry pixel
/// data and delays through the `image` crate. Entries whose pixel data the
/// codec rejects are kept as undecodable slots so callers see the full
/// entry count.
pub struct GifContainer {
    loop_count: Option<u32>,
    entries: Vec<Option<Entry>>,
}

impl GifContainer {
    pub fn open(data: &[u8]) -> DecodeResult<Self> {
        if !is_gif(data) {
            return Err(DecodeError::InvalidData("not a GIF data stream".into()));
        }

        let loop_count = scan_loop_count(data);

        let mut entries = Vec::new();
        match GifDecoder::new(Cursor::new(data)) {
            Ok(decoder) => {
                for (index, frame) in decoder.into_frames().enumerate() {
                    match frame {
                        Ok(frame) => {
                            let (numer, denom) = frame.delay().numer_denom_ms();
                            let delay = f64::from(numer) / f64::from(denom.max(1)) / 1000.0;
                            entries.push(Some(Entry {
                                image: frame.into_buffer(),
                                // GIF carries a single wire delay; there is
                                // no separate unclamped value.
                                properties: EntryProperties {
                                    unclamped_delay: None,
                                    delay: Some(delay),
                                },
                            }));
                        }
                        Err(err) => {
                            log::debug!("GIF entry {index} failed to decode: {err}");
                            entries.push(None);
                        }
                    }
                }
            }
            Err(err) => {
                log::debug!("GIF pixel decode unavailable: {err}");
            }
        }

        Ok(Self {
            loop_count,
            entries,
        })
    }
}

impl Container for GifContainer {
    fn loop_count(&self) -> Option<u32> {
        self.loop_count
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn decode_entry(&mut self, index: usize) -> Option<Entry> {
        self.entries.get_mut(index)?.take()
    }
}

pub fn is_gif(data: &[u8]) -> bool {
    data.len() >= 6 && (&data[..6] == GIF87A_MAGIC || &data[..6] == GIF89A_MAGIC)
}

/// Walk the GIF block stream looking for the NETSCAPE2.0 (or ANIMEXTS1.0)
/// application extension and return its loop count. `None` when the
/// extension is absent or the stream is malformed.
fn scan_loop_count(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    cursor.set_position(6);

    // Logical screen descriptor: width, height, packed fields, background
    // color index, pixel aspect ratio.
    cursor.read_u16::<LittleEndian>().ok()?;
    cursor.read_u16::<LittleEndian>().ok()?;
    let packed = cursor.read_u8().ok()?;
    cursor.read_u8().ok()?;
    cursor.read_u8().ok()?;
    if packed & 0x80 != 0 {
        skip(&mut cursor, color_table_len(packed))?;
    }

    loop {
        match cursor.read_u8().ok()? {
            EXTENSION_INTRODUCER => {
                let label = cursor.read_u8().ok()?;
                if label == APPLICATION_EXTENSION {
                    if let Some(count) = read_application_extension(&mut cursor)? {
                        return Some(count);
                    }
                } else {
                    skip_sub_blocks(&mut cursor)?;
                }
            }
            IMAGE_SEPARATOR => {
                // Image descriptor: left, top, width, height, packed fields,
                // then the LZW minimum code size and the data sub-blocks.
                skip(&mut cursor, 8)?;
                let packed = cursor.read_u8().ok()?;
                if packed & 0x80 != 0 {
                    skip(&mut cursor, color_table_len(packed))?;
                }
                cursor.read_u8().ok()?;
                skip_sub_blocks(&mut cursor)?;
            }
            TRAILER => return None,
            _ => return None,
        }
    }
}

/// Reads the sub-blocks of an application extension. `Ok(Some(count))` when
/// it is a looping extension, `Ok(None)` for any other application
/// extension, `None` on truncation.
#[allow(clippy::option_option)]
fn read_application_extension(cursor: &mut Cursor<&[u8]>) -> Option<Option<u32>> {
    let len = cursor.read_u8().ok()? as usize;
    let mut identifier = vec![0u8; len];
    cursor.read_exact(&mut identifier).ok()?;

    if identifier.as_slice() != b"NETSCAPE2.0" && identifier.as_slice() != b"ANIMEXTS1.0" {
        skip_sub_blocks(cursor)?;
        return Some(None);
    }

    loop {
        let sub_len = cursor.read_u8().ok()? as usize;
        if sub_len == 0 {
            return Some(None);
        }
        if sub_len >= 3 {
            let id = cursor.read_u8().ok()?;
            let count = cursor.read_u16::<LittleEndian>().ok()?;
            skip(cursor, sub_len - 3)?;
            if id == 0x01 {
                return Some(Some(u32::from(count)));
            }
        } else {
            skip(cursor, sub_len)?;
        }
    }
}

fn color_table_len(packed: u8) -> usize {
    3 * (1usize << ((packed & 0x07) + 1))
}

fn skip(cursor: &mut Cursor<&[u8]>, n: usize) -> Option<()> {
    let target = cursor.position().checked_add(n as u64)?;
    if target > cursor.get_ref().len() as u64 {
        return None;
    }
    cursor.set_position(target);
    Some(())
}

fn skip_sub_blocks(cursor: &mut Cursor<&[u8]>) -> Option<()> {
    loop {
        let len = cursor.read_u8().ok()? as usize;
        if len == 0 {
            return Some(());
        }
        skip(cursor, len)?;
    }
}
