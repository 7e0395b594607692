use lsb_veil::capacity::{max_message_bytes, max_payload_bytes, required_bits, validate};
use lsb_veil::payload::{DELIMITER, DelimiterScanner, bits_to_text, payload_bits, text_to_bits};
use lsb_veil::{PixelGrid, StegoError, decode, encode, encode_in_place, reveal};
use rand::RngCore;

/// 一个辅助函数，用于创建一个带有随机通道值的网格
fn random_grid(rows: usize, cols: usize, channels: usize) -> PixelGrid {
    let mut data = vec![0u8; rows * cols * channels];
    rand::rng().fill_bytes(&mut data);
    PixelGrid::from_raw(rows, cols, channels, data).expect("valid layout")
}

#[test]
fn test_hello_world_round_trip_on_uniform_image() {
    let cover = PixelGrid::filled(100, 100, &[255, 0, 0]).unwrap();
    assert_eq!(max_payload_bytes(100, 100, 3), 3750);

    let stego = encode(&cover, b"Hello World").expect("16 bytes fit into 3750");
    assert_eq!(stego.dimensions(), cover.dimensions());

    let extraction = decode(&stego);
    assert!(extraction.found);
    assert_eq!(extraction.payload, b"Hello World");
    assert_eq!(extraction.text(), "Hello World");
}

#[test]
fn test_round_trip_with_random_binary_payload() {
    let cover = random_grid(64, 48, 3);
    let mut payload = vec![0u8; 300];
    rand::rng().fill_bytes(&mut payload);
    // 随机字节中出现定界符会导致截断，这里将其替换掉
    for byte in payload.iter_mut().filter(|b| **b == b'#') {
        *byte = b'$';
    }

    let stego = encode(&cover, &payload).expect("payload fits");
    assert_eq!(reveal(&stego).expect("delimiter present"), payload);
}

#[test]
fn test_utf8_text_round_trip() {
    let cover = random_grid(40, 40, 3);
    let message = "隐写测试 with ünïcödé";

    let stego = encode(&cover, message.as_bytes()).expect("payload fits");
    let extraction = decode(&stego);
    assert!(extraction.found);
    assert_eq!(extraction.text(), message);
}

#[test]
fn test_empty_payload_round_trip() {
    let cover = random_grid(10, 10, 3);
    let stego = encode(&cover, b"").expect("delimiter alone fits");
    let extraction = decode(&stego);
    assert!(extraction.found);
    assert!(extraction.payload.is_empty());
}

#[test]
fn test_capacity_boundary() {
    // 4 * 10 * 3 = 120 个通道值，容量恰好 15 字节
    let cover = random_grid(4, 10, 3);
    assert_eq!(max_payload_bytes(4, 10, 3), 15);
    assert_eq!(max_message_bytes(cover.dimensions()), 10);

    let exact = [b'x'; 10];
    let stego = encode(&cover, &exact).expect("exactly at capacity");
    assert_eq!(reveal(&stego).expect("delimiter present"), exact);

    let mut too_long = cover.clone();
    let result = encode_in_place(&mut too_long, &[b'x'; 11]);
    assert!(matches!(
        result,
        Err(StegoError::CapacityExceeded {
            required_bytes: 16,
            available_bytes: 15
        })
    ));
    assert_eq!(too_long, cover, "failed embedding must not touch the grid");
}

#[test]
fn test_only_payload_prefix_lsbs_change() {
    let cover = random_grid(20, 20, 3);
    let payload = b"abc";
    let stego = encode(&cover, payload).expect("payload fits");

    let touched = required_bits(payload.len());
    assert_eq!(touched, 8 * (3 + 5));

    for (i, (before, after)) in cover.scan().zip(stego.scan()).enumerate() {
        if i < touched {
            assert_eq!(before & 0xFE, after & 0xFE, "only bit 0 may change at {i}");
        } else {
            assert_eq!(before, after, "value {i} after the payload must be untouched");
        }
    }
}

#[test]
fn test_encode_in_place_reports_written_values() {
    let mut grid = random_grid(8, 8, 3);
    let written = encode_in_place(&mut grid, b"hi").expect("payload fits");
    assert_eq!(written, required_bits(2));
}

#[test]
fn test_bits_follow_scan_order() {
    // 空载荷只写入定界符，第一个字节 '#' = 0b0010_0011
    let cover = PixelGrid::new(4, 4, 3).unwrap();
    let stego = encode(&cover, b"").expect("delimiter fits into 6 bytes");

    let set: Vec<(usize, usize, usize)> = (0..4)
        .flat_map(|col| (0..3).map(move |ch| (0, col, ch)))
        .take(8)
        .filter(|&(r, c, ch)| stego.get(r, c, ch) == Some(1))
        .collect();
    assert_eq!(set, vec![(0, 0, 2), (0, 2, 0), (0, 2, 1)]);
}

#[test]
fn test_text_to_bits_is_msb_first_with_delimiter() {
    let bits = text_to_bits(b"A");
    assert_eq!(bits.len(), (1 + DELIMITER.len()) * 8);
    assert_eq!(&bits[..8], &[0, 1, 0, 0, 0, 0, 0, 1]);
    assert_eq!(&bits[8..16], &[0, 0, 1, 0, 0, 0, 1, 1]);
    assert!(bits.iter().all(|&b| b <= 1));
}

#[test]
fn test_bits_to_text_round_trip() {
    let extraction = bits_to_text(text_to_bits(b"payload"));
    assert!(extraction.found);
    assert_eq!(extraction.payload, b"payload");
}

#[test]
fn test_bits_to_text_without_delimiter() {
    let bits: Vec<u8> = b"no end"
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .chain([1, 0, 1])
        .collect();

    let extraction = bits_to_text(bits);
    assert!(!extraction.found);
    // 不足 8 bit 的尾部被丢弃
    assert_eq!(extraction.payload, b"no end");
    assert!(matches!(
        extraction.into_payload(),
        Err(StegoError::DelimiterNotFound)
    ));
}

#[test]
fn test_delimiter_inside_message_truncates() {
    let cover = random_grid(20, 20, 3);
    let stego = encode(&cover, b"ab#####cd").expect("payload fits");
    let extraction = decode(&stego);
    assert!(extraction.found);
    assert_eq!(extraction.payload, b"ab");
}

#[test]
fn test_scanner_ignores_bits_after_delimiter() {
    let mut scanner = DelimiterScanner::new();
    let mut found = false;
    for bit in text_to_bits(b"x") {
        found = scanner.push_bit(bit);
    }
    assert!(found);
    assert!(scanner.push_bit(1));
    assert_eq!(scanner.bytes_decoded(), 6);
    assert_eq!(scanner.finish().payload, b"x");
}

#[test]
fn test_decode_clean_grid_reports_not_found() {
    let grid = PixelGrid::new(10, 10, 3).unwrap();
    let extraction = decode(&grid);
    assert!(!extraction.found);
    // 300 个通道值只能解出 37 个完整字节
    assert_eq!(extraction.payload.len(), 37);
    assert!(matches!(reveal(&grid), Err(StegoError::DelimiterNotFound)));
}

#[test]
fn test_validate_compares_byte_lengths() {
    assert!(validate(16 * 8, 3750).is_ok());
    assert!(validate(3750 * 8, 3750).is_ok());
    assert!(validate(3750 * 8 + 7, 3750).is_ok());
    assert!(matches!(
        validate(3751 * 8, 3750),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_grid_indexing_and_layout() {
    let mut grid = PixelGrid::new(2, 3, 3).unwrap();
    assert!(grid.set(1, 2, 0, 7));
    assert!(!grid.set(2, 0, 0, 7));
    assert_eq!(grid.get(1, 2, 0), Some(7));
    assert_eq!(grid.get(0, 3, 0), None);
    assert_eq!(grid.as_raw()[15], 7);
    assert_eq!(grid.channel_values(0).filter(|&v| v == 7).count(), 1);
    assert_eq!(grid.channel_values(3).count(), 0);

    assert!(matches!(
        PixelGrid::from_raw(2, 2, 3, vec![0; 11]),
        Err(StegoError::InvalidLayout { len: 11, .. })
    ));
    assert!(matches!(
        PixelGrid::from_raw(2, 2, 0, Vec::new()),
        Err(StegoError::InvalidLayout { .. })
    ));
}

#[test]
fn test_payload_bits_borrow_short_lived_buffer() {
    // 载荷来自堆上的临时缓冲区，而定界符是 'static 常量
    let owned = format!("message #{}", 42).into_bytes();
    let bits = payload_bits(&owned);
    assert_eq!(bits.len(), required_bits(owned.len()));

    let collected: Vec<u8> = bits.collect();
    assert_eq!(collected, text_to_bits(&owned));
    assert_eq!(bits_to_text(collected).payload, owned);
}

#[test]
fn test_constructors_reject_zero_channels() {
    assert!(matches!(
        PixelGrid::new(3, 3, 0),
        Err(StegoError::InvalidLayout { channels: 0, .. })
    ));
    assert!(matches!(
        PixelGrid::filled(3, 3, &[]),
        Err(StegoError::InvalidLayout { channels: 0, .. })
    ));
    assert!(matches!(
        PixelGrid::new(usize::MAX, 2, 3),
        Err(StegoError::InvalidLayout { .. })
    ));

    let grid = PixelGrid::filled(2, 2, &[1, 2, 3]).unwrap();
    assert_eq!(grid.as_raw(), &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
}
