//! Integration tests for the preference codec.
//! Tests full workflow: header value -> preference lists -> header value.

use conneg_prefs::{
    format_preferences, parse_character_sets, parse_encodings, parse_languages,
    parse_media_types, AcceptReader, ClientPreferences, Encoding, Error, Language, MediaType,
    Metadata, Preference, ReaderConfig,
};
use http::header::{ACCEPT, ACCEPT_ENCODING};
use http::{HeaderMap, HeaderValue};

#[test]
fn test_normalize_accept_header() {
    let mut client = ClientPreferences::new();
    parse_media_types(
        Some("text/html;level=1 ; q=0.50 ;x=y,application/xhtml+xml ,*/*;q=0.100"),
        &mut client,
    );

    assert_eq!(
        format_preferences(&client.accepted_media_types).unwrap(),
        "text/html;level=1;q=0.5;x=y, application/xhtml+xml, */*;q=0.1"
    );
}

#[test]
fn test_formatted_list_reads_back_identically() {
    let prefs = vec![
        Preference::new(MediaType::new("text/plain").with_parameter(("charset", "utf-8"))),
        Preference::with_quality(MediaType::new("image/png"), 0.75)
            .unwrap()
            .with_parameter(("ext", "1")),
        Preference::with_quality(MediaType::ALL, 0.05).unwrap(),
    ];
    let wire = format_preferences(&prefs).unwrap();

    let read: Vec<Preference<MediaType>> = AcceptReader::default().read_all(&wire).unwrap();
    assert_eq!(read, prefs);
    assert_eq!(format_preferences(&read).unwrap(), wire);
}

#[test]
fn test_browser_style_headers() {
    let mut client = ClientPreferences::new();
    parse_media_types(
        Some("text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
        &mut client,
    );
    parse_encodings(Some("gzip, deflate, br, zstd"), &mut client);
    parse_languages(Some("en-US,en;q=0.5"), &mut client);
    parse_character_sets(None, &mut client);

    assert_eq!(client.accepted_media_types.len(), 6);
    assert!(client.accepted_media_types[5].is_wildcard());
    assert_eq!(client.accepted_encodings.len(), 4);
    assert_eq!(client.accepted_languages[1].metadata(), &Language::new("en"));
    assert_eq!(client.accepted_languages[1].quality(), 0.5);
    assert_eq!(client.accepted_character_sets.len(), 1);
}

#[test]
fn test_legacy_java_accept_header() {
    // Sent by older Java HTTP clients.
    let mut client = ClientPreferences::new();
    parse_media_types(Some("text/html, image/gif, image/jpeg, *; q=.2, */*; q=.2"), &mut client);

    let names: Vec<_> = client
        .accepted_media_types
        .iter()
        .map(|p| p.metadata().name())
        .collect();
    assert_eq!(names, vec!["text/html", "image/gif", "image/jpeg", "*/*", "*/*"]);
    assert_eq!(client.accepted_media_types[3].quality(), 0.2);
}

#[test]
fn test_header_map_round_trip() {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/*;q=0.3"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("br;q=1.0, gzip;q=0.8"));

    let client = ClientPreferences::from_headers(&headers);
    let rendered = client.to_headers().unwrap();

    assert_eq!(rendered[ACCEPT], "application/json, text/*;q=0.3");
    assert_eq!(rendered[ACCEPT_ENCODING], "br, gzip;q=0.8");
    // Absent headers received their defaults.
    assert_eq!(rendered[http::header::ACCEPT_CHARSET], "ISO-8859-1");
    assert_eq!(rendered[http::header::ACCEPT_LANGUAGE], "*");
}

#[test]
fn test_strict_reader_limits() {
    let reader = AcceptReader::new(ReaderConfig::strict());
    let header = vec!["gzip"; 20].join(", ");

    let mut client = ClientPreferences::new();
    conneg_prefs::parse_encodings_with(&reader, Some(&header), &mut client);
    assert_eq!(client.accepted_encodings.len(), 16);

    let result: conneg_prefs::Result<Vec<Preference<Encoding>>> = reader.read_all(&header);
    assert_eq!(result, Err(Error::TooManyElements(16)));
}
