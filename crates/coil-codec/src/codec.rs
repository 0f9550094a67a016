//! Binary encode/decode for the traversal record format.
//!
//! All integers are little-endian. Blobs are length-prefixed with a `u32`.
//! The format is intentionally simple — no compression, no alignment
//! padding, no self-describing schema.

use std::io::{Read, Write};

use coil_core::{CarriedImage, CasterId, Direction, GridPos};
use coil_engine::TraversalState;
use indexmap::IndexSet;

use crate::error::CodecError;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), CodecError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u128.
pub fn write_u128_le(w: &mut dyn Write, v: u128) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a position as three little-endian i32s.
pub fn write_pos(w: &mut dyn Write, pos: GridPos) -> Result<(), CodecError> {
    w.write_all(&pos.x.to_le_bytes())?;
    w.write_all(&pos.y.to_le_bytes())?;
    w.write_all(&pos.z.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed byte array (u32 length + bytes).
pub fn write_length_prefixed_bytes(w: &mut dyn Write, b: &[u8]) -> Result<(), CodecError> {
    write_u32_le(w, b.len() as u32)?;
    w.write_all(b)?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian u128.
pub fn read_u128_le(r: &mut dyn Read) -> Result<u128, CodecError> {
    let mut buf = [0u8; 16];
    r.read_exact(&mut buf)?;
    Ok(u128::from_le_bytes(buf))
}

/// Read a position (three little-endian i32s).
pub fn read_pos(r: &mut dyn Read) -> Result<GridPos, CodecError> {
    let x = read_i32_le(r)?;
    let y = read_i32_le(r)?;
    let z = read_i32_le(r)?;
    Ok(GridPos::new(x, y, z))
}

/// Read a length-prefixed byte array.
pub fn read_length_prefixed_bytes(r: &mut dyn Read) -> Result<Vec<u8>, CodecError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read a direction ordinal byte, rejecting values outside `0..=5`.
pub fn read_direction(r: &mut dyn Read) -> Result<Direction, CodecError> {
    let byte = read_u8(r)?;
    Direction::from_ordinal(byte).ok_or(CodecError::BadDirection { byte })
}

/// Read a presence flag, treating clean EOF as field-absent.
///
/// Older records end before the trailing optional fields; a clean EOF where
/// a flag would start means "absent" (`Ok(None)`), while any other byte
/// count or flag value outside `{0, 1}` is corruption.
fn read_optional_flag(r: &mut dyn Read, field: &str) -> Result<Option<bool>, CodecError> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    match buf[0] {
        0 => Ok(Some(false)),
        1 => Ok(Some(true)),
        flag => Err(CodecError::MalformedRecord {
            detail: format!("invalid {field} presence flag: {flag}"),
        }),
    }
}

/// Read a mandatory presence flag (mid-record, EOF is corruption).
fn read_flag(r: &mut dyn Read, field: &str) -> Result<bool, CodecError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        flag => Err(CodecError::MalformedRecord {
            detail: format!("invalid {field} presence flag: {flag}"),
        }),
    }
}

// ── Record encode/decode ────────────────────────────────────────

/// Serialize a traversal state into the binary record format.
pub fn save<I: CarriedImage>(
    state: &TraversalState<I>,
    w: &mut dyn Write,
) -> Result<(), CodecError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    write_pos(w, state.origin_pos)?;
    write_u8(w, state.origin_dir.ordinal())?;

    write_u32_le(w, state.reached.len() as u32)?;
    for &pos in &state.reached {
        write_pos(w, pos)?;
    }

    write_pos(w, state.current_pos)?;
    write_u8(w, state.entered_from.ordinal())?;

    write_length_prefixed_bytes(w, &state.image.to_bytes())?;

    match state.caster {
        Some(id) => {
            write_u8(w, 1)?;
            write_u128_le(w, id.0)?;
        }
        None => write_u8(w, 0)?,
    }
    match &state.caster_attributes {
        Some(blob) => {
            write_u8(w, 1)?;
            write_length_prefixed_bytes(w, blob)?;
        }
        None => write_u8(w, 0)?,
    }

    write_u8(w, 1)?;
    write_u64_le(w, state.step_count)?;

    write_u8(w, 1)?;
    write_pos(w, state.bounds_min)?;
    write_pos(w, state.bounds_max)?;

    Ok(())
}

/// Serialize a traversal state into a fresh byte vector.
pub fn save_to_vec<I: CarriedImage>(state: &TraversalState<I>) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    save(state, &mut buf)?;
    Ok(buf)
}

/// Deserialize a traversal state from the binary record format.
///
/// Tolerates records lacking the trailing step-count and bounds fields:
/// the step count defaults to 0 and both bounding corners to the zero
/// coordinate. Callers that need usable bounds after such a load can
/// re-derive them from the reached set.
pub fn load<I: CarriedImage>(r: &mut dyn Read) -> Result<TraversalState<I>, CodecError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(CodecError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion { found: version });
    }

    let origin_pos = read_pos(r)?;
    let origin_dir = read_direction(r)?;

    let count = read_u32_le(r)? as usize;
    let mut reached = IndexSet::with_capacity(count);
    for _ in 0..count {
        reached.insert(read_pos(r)?);
    }

    let current_pos = read_pos(r)?;
    let entered_from = read_direction(r)?;

    let image_blob = read_length_prefixed_bytes(r)?;
    let image = I::from_bytes(&image_blob)?;

    let caster = if read_flag(r, "caster")? {
        Some(CasterId(read_u128_le(r)?))
    } else {
        None
    };
    let caster_attributes = if read_flag(r, "caster attributes")? {
        Some(read_length_prefixed_bytes(r)?)
    } else {
        None
    };

    let step_count = match read_optional_flag(r, "step count")? {
        Some(true) => read_u64_le(r)?,
        _ => 0,
    };
    let (bounds_min, bounds_max) = match read_optional_flag(r, "bounds")? {
        Some(true) => (read_pos(r)?, read_pos(r)?),
        _ => (GridPos::ZERO, GridPos::ZERO),
    };

    Ok(TraversalState {
        origin_pos,
        origin_dir,
        reached,
        current_pos,
        entered_from,
        image,
        caster,
        caster_attributes,
        step_count,
        bounds_min,
        bounds_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coil_core::Direction::*;
    use coil_test_utils::CountingImage;
    use proptest::prelude::*;

    fn p(x: i32, y: i32, z: i32) -> GridPos {
        GridPos::new(x, y, z)
    }

    fn sample_state() -> TraversalState<CountingImage> {
        let mut reached = IndexSet::new();
        reached.insert(p(0, 0, 0));
        reached.insert(p(0, 0, -1));
        reached.insert(p(1, 0, -1));
        TraversalState {
            origin_pos: p(0, 0, 0),
            origin_dir: North,
            reached,
            current_pos: p(1, 0, -1),
            entered_from: East,
            image: CountingImage {
                ops_used: 0,
                generation: 17,
            },
            caster: Some(CasterId(0xfeed_f00d_dead_beef)),
            caster_attributes: Some(vec![1, 2, 3, 4]),
            step_count: 42,
            bounds_min: p(0, 0, -1),
            bounds_max: p(2, 1, 1),
        }
    }

    #[test]
    fn roundtrip_is_field_for_field() {
        let state = sample_state();
        let buf = save_to_vec(&state).unwrap();
        let got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
        assert_eq!(got, state);
    }

    #[test]
    fn roundtrip_without_caster_omits_fields() {
        let mut state = sample_state();
        state.caster = None;
        state.caster_attributes = None;
        let buf = save_to_vec(&state).unwrap();
        let got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
        assert_eq!(got.caster, None);
        assert_eq!(got.caster_attributes, None);
        assert_eq!(got, state);
        // Absent caster is strictly smaller on the wire.
        assert!(buf.len() < save_to_vec(&sample_state()).unwrap().len());
    }

    #[test]
    fn caster_zero_is_not_none() {
        let mut state = sample_state();
        state.caster = Some(CasterId(0));
        let buf = save_to_vec(&state).unwrap();
        let got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
        assert_eq!(got.caster, Some(CasterId(0)));
    }

    /// A record in the layout used before step count and bounds existed.
    fn legacy_record(state: &TraversalState<CountingImage>) -> Vec<u8> {
        let mut buf = Vec::new();
        let w: &mut dyn Write = &mut buf;
        w.write_all(&MAGIC).unwrap();
        write_u8(w, FORMAT_VERSION).unwrap();
        write_pos(w, state.origin_pos).unwrap();
        write_u8(w, state.origin_dir.ordinal()).unwrap();
        write_u32_le(w, state.reached.len() as u32).unwrap();
        for &pos in &state.reached {
            write_pos(w, pos).unwrap();
        }
        write_pos(w, state.current_pos).unwrap();
        write_u8(w, state.entered_from.ordinal()).unwrap();
        write_length_prefixed_bytes(w, &state.image.to_bytes()).unwrap();
        write_u8(w, 0).unwrap(); // no caster
        write_u8(w, 0).unwrap(); // no attributes
        buf
    }

    #[test]
    fn legacy_record_defaults_step_count_and_bounds() {
        let state = sample_state();
        let buf = legacy_record(&state);
        let mut got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
        assert_eq!(got.step_count, 0);
        assert_eq!(got.bounds_min, GridPos::ZERO);
        assert_eq!(got.bounds_max, GridPos::ZERO);
        // Lossy but recoverable: the bounds fold over the reached set.
        got.rederive_bounds();
        assert_eq!(got.bounds_min, p(0, 0, -1));
        assert_eq!(got.bounds_max, p(2, 1, 1));
    }

    #[test]
    fn bad_magic_rejected() {
        let data = b"LIOC\x01";
        let result = load::<CountingImage>(&mut data.as_slice());
        assert!(matches!(result, Err(CodecError::InvalidMagic)));
    }

    #[test]
    fn bad_version_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.push(99);
        let result = load::<CountingImage>(&mut buf.as_slice());
        assert!(matches!(
            result,
            Err(CodecError::UnsupportedVersion { found: 99 })
        ));
    }

    #[test]
    fn bad_direction_byte_rejected() {
        let state = sample_state();
        let mut buf = save_to_vec(&state).unwrap();
        // Origin direction byte sits right after magic, version, origin pos.
        let dir_offset = 4 + 1 + 12;
        assert_eq!(buf[dir_offset], North.ordinal(), "sanity: origin dir");
        buf[dir_offset] = 6;
        let result = load::<CountingImage>(&mut buf.as_slice());
        assert!(matches!(result, Err(CodecError::BadDirection { byte: 6 })));
    }

    #[test]
    fn invalid_caster_flag_rejected() {
        let state = sample_state();
        let mut buf = save_to_vec(&state).unwrap();
        // caster flag offset: header + origin + dir + count + 3 positions
        // + current pos + dir + image blob (4 + 12).
        let flag_offset = 4 + 1 + 12 + 1 + 4 + 3 * 12 + 12 + 1 + 4 + 12;
        assert_eq!(buf[flag_offset], 1, "sanity: caster present flag");
        buf[flag_offset] = 2;
        let result = load::<CountingImage>(&mut buf.as_slice());
        match result {
            Err(CodecError::MalformedRecord { detail }) => {
                assert!(detail.contains("caster presence flag"), "{detail}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_is_error() {
        let state = sample_state();
        let buf = save_to_vec(&state).unwrap();
        // Cut mid-way through the reached list: unambiguous corruption.
        let cut = 4 + 1 + 12 + 1 + 4 + 5;
        let result = load::<CountingImage>(&mut buf[..cut].as_ref());
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn malformed_image_blob_surfaces() {
        let state = sample_state();
        let mut buf = Vec::new();
        let w: &mut dyn Write = &mut buf;
        w.write_all(&MAGIC).unwrap();
        write_u8(w, FORMAT_VERSION).unwrap();
        write_pos(w, state.origin_pos).unwrap();
        write_u8(w, 0).unwrap();
        write_u32_le(w, 0).unwrap();
        write_pos(w, state.current_pos).unwrap();
        write_u8(w, 0).unwrap();
        // CountingImage expects exactly 12 bytes.
        write_length_prefixed_bytes(w, &[0xAB; 3]).unwrap();
        write_u8(w, 0).unwrap();
        write_u8(w, 0).unwrap();
        let result = load::<CountingImage>(&mut buf.as_slice());
        assert!(matches!(result, Err(CodecError::Image(_))));
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_pos() -> impl Strategy<Value = GridPos> {
        (-1000i32..1000, -1000i32..1000, -1000i32..1000)
            .prop_map(|(x, y, z)| GridPos::new(x, y, z))
    }

    fn arb_dir() -> impl Strategy<Value = Direction> {
        (0u8..6).prop_map(|b| Direction::from_ordinal(b).unwrap())
    }

    fn arb_state() -> impl Strategy<Value = TraversalState<CountingImage>> {
        (
            arb_pos(),
            arb_dir(),
            prop::collection::vec(arb_pos(), 1..32),
            arb_pos(),
            arb_dir(),
            (any::<u32>(), any::<u64>()),
            prop::option::of(any::<u128>()),
            prop::option::of(prop::collection::vec(any::<u8>(), 0..16)),
            any::<u64>(),
            (arb_pos(), arb_pos()),
        )
            .prop_map(
                |(
                    origin_pos,
                    origin_dir,
                    reached,
                    current_pos,
                    entered_from,
                    (ops, generation),
                    caster,
                    caster_attributes,
                    step_count,
                    (bounds_min, bounds_max),
                )| {
                    TraversalState {
                        origin_pos,
                        origin_dir,
                        reached: reached.into_iter().collect(),
                        current_pos,
                        entered_from,
                        image: CountingImage {
                            ops_used: ops,
                            generation,
                        },
                        caster: caster.map(CasterId),
                        caster_attributes,
                        step_count,
                        bounds_min,
                        bounds_max,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn roundtrip_arbitrary_states(state in arb_state()) {
            let buf = save_to_vec(&state).unwrap();
            let got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
            prop_assert_eq!(got, state);
        }

        #[test]
        fn reached_order_is_preserved(state in arb_state()) {
            let buf = save_to_vec(&state).unwrap();
            let got: TraversalState<CountingImage> = load(&mut buf.as_slice()).unwrap();
            let before: Vec<GridPos> = state.reached.iter().copied().collect();
            let after: Vec<GridPos> = got.reached.iter().copied().collect();
            prop_assert_eq!(before, after);
        }
    }
}
