//! Codec Tests
//!
//! Tests for command and response encoding/decoding.

use std::io::Cursor;

use pcbook::error::CatalogError;
use pcbook::filter::Filter;
use pcbook::model::Memory;
use pcbook::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, Command, CommandType, Response, Status,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
use pcbook::sample::Generator;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_create_carries_full_laptop() {
    let laptop = Generator::with_seed(7).new_laptop();
    let cmd = Command::Create {
        laptop: laptop.clone(),
    };

    let encoded = encode_command(&cmd).unwrap();
    assert_eq!(encoded[0], CommandType::Create as u8);

    match decode_command(&encoded).unwrap() {
        Command::Create { laptop: decoded } => assert_eq!(decoded, laptop),
        other => panic!("Expected CREATE command, got {:?}", other),
    }
}

#[test]
fn test_search_carries_filter() {
    let filter = Filter::builder()
        .max_price_usd(2500.0)
        .min_cpu_cores(4)
        .min_cpu_ghz(2.2)
        .min_ram(Memory::gigabytes(16))
        .build();

    let encoded = encode_command(&Command::Search { filter }).unwrap();

    match decode_command(&encoded).unwrap() {
        Command::Search { filter: decoded } => assert_eq!(decoded, filter),
        other => panic!("Expected SEARCH command, got {:?}", other),
    }
}

#[test]
fn test_delete_by_ids_keeps_order_and_duplicates() {
    let ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
    let encoded = encode_command(&Command::DeleteByIds { ids: ids.clone() }).unwrap();

    match decode_command(&encoded).unwrap() {
        Command::DeleteByIds { ids: decoded } => assert_eq!(decoded, ids),
        other => panic!("Expected DELETE_BY_IDS command, got {:?}", other),
    }
}

#[test]
fn test_find_and_delete_use_distinct_type_bytes() {
    let find = encode_command(&Command::Find { id: "x".to_string() }).unwrap();
    let delete = encode_command(&Command::Delete { id: "x".to_string() }).unwrap();

    assert_eq!(find[0], 0x02);
    assert_eq!(delete[0], 0x05);
    assert_eq!(find[1..], delete[1..]);
    assert!(matches!(decode_command(&delete).unwrap(), Command::Delete { .. }));
}

#[test]
fn test_ping_is_header_only() {
    let encoded = encode_command(&Command::Ping).unwrap();

    assert_eq!(encoded, vec![0x08, 0, 0, 0, 0]);
    assert_eq!(decode_command(&encoded).unwrap(), Command::Ping);
}

#[test]
fn test_command_type_from_byte() {
    assert_eq!(CommandType::from_byte(0x01), Some(CommandType::Create));
    assert_eq!(CommandType::from_byte(0x07), Some(CommandType::DeleteByIds));
    assert_eq!(CommandType::from_byte(0x00), None);
    assert_eq!(CommandType::from_byte(0x09), None);
}

// =============================================================================
// Command Error Tests
// =============================================================================

#[test]
fn test_decode_unknown_command_type() {
    let bytes = [0xFF, 0, 0, 0, 0];
    assert!(matches!(decode_command(&bytes), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_header() {
    let bytes = [0x02, 0, 0];
    assert!(matches!(decode_command(&bytes), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_payload() {
    let mut encoded = encode_command(&Command::Find { id: "abc".to_string() }).unwrap();
    encoded.pop();

    assert!(matches!(decode_command(&encoded), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_decode_oversized_length() {
    let mut bytes = vec![0x02];
    bytes.extend_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_be_bytes());

    assert!(matches!(decode_command(&bytes), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_decode_ping_with_payload() {
    let bytes = [0x08, 0, 0, 0, 1, 0xAA];
    assert!(matches!(decode_command(&bytes), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_decode_garbage_body() {
    // FIND wants a length-prefixed string; two bytes cannot be one.
    let bytes = [0x02, 0, 0, 0, 2, 0xFF, 0xFF];
    assert!(matches!(decode_command(&bytes), Err(CatalogError::Protocol(_))));
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_response_ok_without_payload() {
    let encoded = encode_response(&Response::ok(None)).unwrap();

    assert_eq!(encoded.len(), HEADER_SIZE);
    let decoded = decode_response(&encoded).unwrap();
    assert_eq!(decoded.status, Status::Ok);
    assert!(decoded.payload.is_none());
}

#[test]
fn test_response_id_and_count_payloads() {
    let id = decode_response(&encode_response(&Response::id("abc-123")).unwrap()).unwrap();
    assert_eq!(id.text().unwrap(), "abc-123");

    let count = decode_response(&encode_response(&Response::count(42)).unwrap()).unwrap();
    assert_eq!(count.decode_count().unwrap(), 42);
}

#[test]
fn test_response_count_rejects_wrong_width() {
    let response = Response::ok(Some(vec![1, 2, 3]));
    assert!(matches!(response.decode_count(), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_response_item_carries_laptop() {
    let laptop = Generator::with_seed(11).new_laptop();
    let encoded = encode_response(&Response::item(&laptop).unwrap()).unwrap();
    let decoded = decode_response(&encoded).unwrap();

    assert_eq!(decoded.status, Status::Item);
    assert_eq!(decoded.decode_laptop().unwrap(), laptop);
}

#[test]
fn test_decode_unknown_status() {
    let bytes = [0x7F, 0, 0, 0, 0];
    assert!(matches!(decode_response(&bytes), Err(CatalogError::Protocol(_))));
}

#[test]
fn test_from_error_status_mapping() {
    let cases = [
        (CatalogError::NotFound("x".into()), Status::NotFound),
        (CatalogError::AlreadyExists("x".into()), Status::AlreadyExists),
        (CatalogError::Invalid("bad id".into()), Status::InvalidArgument),
        (CatalogError::Cancelled, Status::Cancelled),
        (CatalogError::Serialization("boom".into()), Status::Error),
    ];

    for (err, status) in cases {
        assert_eq!(Response::from_error(&err).status, status, "{:?}", err);
    }
}

#[test]
fn test_into_error_restores_kind() {
    let invalid = Response::from_error(&CatalogError::Invalid("bad id".into()));
    match invalid.into_error("x") {
        CatalogError::Invalid(message) => assert!(message.contains("bad id")),
        other => panic!("Expected Invalid, got {:?}", other),
    }

    let missing = Response::not_found();
    assert!(matches!(missing.into_error("gone"), CatalogError::NotFound(ref id) if id == "gone"));

    assert!(matches!(
        Response::ok(None).into_error("x"),
        CatalogError::Protocol(_)
    ));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_commands_back_to_back() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Ping).unwrap();
    write_command(&mut buffer, &Command::Find { id: "abc".to_string() }).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Ping);
    assert_eq!(
        read_command(&mut cursor).unwrap(),
        Command::Find { id: "abc".to_string() }
    );
    assert!(matches!(read_command(&mut cursor), Err(CatalogError::Io(_))));
}

#[test]
fn test_stream_search_reply_sequence() {
    let mut generator = Generator::with_seed(3);
    let laptops = vec![generator.new_laptop(), generator.new_laptop()];

    let mut buffer = Vec::new();
    for laptop in &laptops {
        write_response(&mut buffer, &Response::item(laptop).unwrap()).unwrap();
    }
    write_response(&mut buffer, &Response::count(laptops.len() as u64)).unwrap();

    let mut cursor = Cursor::new(buffer);
    let mut received = Vec::new();
    let total = loop {
        let response = read_response(&mut cursor).unwrap();
        match response.status {
            Status::Item => received.push(response.decode_laptop().unwrap()),
            Status::Ok => break response.decode_count().unwrap(),
            other => panic!("unexpected status {:?}", other),
        }
    };

    assert_eq!(total, 2);
    assert_eq!(received, laptops);
}

#[test]
fn test_stream_truncated_payload() {
    let encoded = encode_response(&Response::id("abcdef")).unwrap();
    let mut cursor = Cursor::new(encoded[..encoded.len() - 2].to_vec());

    assert!(matches!(read_response(&mut cursor), Err(CatalogError::Io(_))));
}
