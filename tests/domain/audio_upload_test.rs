use asr_relay::domain::AudioUpload;

#[test]
fn given_empty_bytes_when_creating_upload_then_returns_none() {
    assert!(AudioUpload::from_bytes(Vec::<u8>::new()).is_none());
}

#[test]
fn given_blank_metadata_when_creating_upload_then_metadata_is_dropped() {
    let upload = AudioUpload::from_bytes(b"abc".to_vec())
        .unwrap()
        .with_file_name(Some("  ".to_string()))
        .with_content_type(Some(String::new()));

    assert_eq!(upload.len(), 3);
    assert!(upload.file_name().is_none());
    assert!(upload.content_type().is_none());
}

#[test]
fn given_metadata_when_creating_upload_then_metadata_is_kept() {
    let upload = AudioUpload::from_bytes(b"abc".to_vec())
        .unwrap()
        .with_file_name(Some("clip.mp3".to_string()))
        .with_content_type(Some("audio/mpeg".to_string()));

    assert_eq!(upload.file_name(), Some("clip.mp3"));
    assert_eq!(upload.content_type(), Some("audio/mpeg"));
}
