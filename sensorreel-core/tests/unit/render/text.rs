use super::*;

#[test]
fn garbage_bytes_are_not_a_font() {
    let err = FontBook::from_bytes(vec![0, 1, 2, 3], 0).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn missing_font_files_carry_the_path() {
    let err = FontBook::from_path("/definitely/not/here.ttf").unwrap_err();
    assert!(err.to_string().contains("here.ttf"));
}

