use super::*;

#[test]
fn primitives_round_trip() {
    let mut buf = Vec::new();
    put_u8(&mut buf, 0xAB);
    put_u16(&mut buf, 0xBEEF);
    put_u32(&mut buf, 0xDEAD_BEEF);
    put_i32(&mut buf, -1234);
    put_f64(&mut buf, 10.5);
    put_bool(&mut buf, true);
    put_bool(&mut buf, false);
    put_str(&mut buf, "héllo");
    put_blob(&mut buf, &[1, 2, 3]);
    put_color(&mut buf, Color::rgba(10, 20, 30, 40));

    let mut r = Reader::new(&buf);
    assert_eq!(r.u8().unwrap(), 0xAB);
    assert_eq!(r.u16().unwrap(), 0xBEEF);
    assert_eq!(r.u32().unwrap(), 0xDEAD_BEEF);
    assert_eq!(r.i32().unwrap(), -1234);
    assert!((r.f64().unwrap() - 10.5).abs() < f64::EPSILON);
    assert!(r.bool().unwrap());
    assert!(!r.bool().unwrap());
    assert_eq!(r.string().unwrap(), "héllo");
    assert_eq!(r.blob().unwrap(), vec![1, 2, 3]);
    assert_eq!(r.color().unwrap(), Color::rgba(10, 20, 30, 40));
    assert!(r.is_empty());
}

#[test]
fn encoding_is_big_endian() {
    let mut buf = Vec::new();
    put_u32(&mut buf, 0x0102_0304);
    assert_eq!(buf, vec![1, 2, 3, 4]);

    let mut buf = Vec::new();
    put_u16(&mut buf, 0x0102);
    assert_eq!(buf, vec![1, 2]);

    // f64(10) = 0x4024000000000000 big-endian.
    let mut buf = Vec::new();
    put_f64(&mut buf, 10.0);
    assert_eq!(buf, vec![0x40, 0x24, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn string_is_length_prefixed_utf8() {
    let mut buf = Vec::new();
    put_str(&mut buf, "hi");
    assert_eq!(buf, vec![0, 0, 0, 2, b'h', b'i']);
}

#[test]
fn color_is_four_bytes_rgba() {
    let mut buf = Vec::new();
    put_color(&mut buf, Color::rgba(200, 0, 0, 255));
    assert_eq!(buf, vec![200, 0, 0, 255]);
}

#[test]
fn truncated_read_reports_offset_and_need() {
    let mut r = Reader::new(&[1, 2]);
    assert_eq!(r.u8().unwrap(), 1);
    let err = r.u32().unwrap_err();
    assert_eq!(err, CodecError::Truncated { at: 1, needed: 3 });
}

#[test]
fn truncated_string_body() {
    // Length says 5 bytes, only 2 present.
    let mut buf = Vec::new();
    put_u32(&mut buf, 5);
    buf.extend_from_slice(b"ab");
    let mut r = Reader::new(&buf);
    assert!(matches!(r.string(), Err(CodecError::Truncated { .. })));
}

#[test]
fn invalid_utf8_string() {
    let mut buf = Vec::new();
    put_u32(&mut buf, 2);
    buf.extend_from_slice(&[0xFF, 0xFE]);
    let mut r = Reader::new(&buf);
    assert_eq!(r.string().unwrap_err(), CodecError::InvalidUtf8);
}

#[test]
fn bool_is_strict() {
    let mut r = Reader::new(&[2]);
    assert_eq!(
        r.bool().unwrap_err(),
        CodecError::InvalidEnum { what: "bool", value: 2 }
    );
}

#[test]
fn reader_tracks_remaining() {
    let mut r = Reader::new(&[0; 10]);
    assert_eq!(r.remaining(), 10);
    r.u32().unwrap();
    assert_eq!(r.remaining(), 6);
    assert_eq!(r.offset(), 4);
}

#[test]
fn empty_blob_round_trips() {
    let mut buf = Vec::new();
    put_blob(&mut buf, &[]);
    let mut r = Reader::new(&buf);
    assert!(r.blob().unwrap().is_empty());
    assert!(r.is_empty());
}
