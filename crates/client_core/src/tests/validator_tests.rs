use super::*;
use shared::domain::{CUBE_LEN, DEFAULT_CUBE};

const USER_CUBE: &str = "OBBOBRBYOGYYBOOBOGOBWBWYWWGBGRRRWOORYWYRYRYGWRGWGGWRYG";

fn default_cube() -> CubeState {
    CubeState::parse(DEFAULT_CUBE).expect("default cube")
}

#[test]
fn accepts_valid_cube_unchanged() {
    let state = validate(USER_CUBE, &default_cube()).expect("valid");
    assert_eq!(state.as_str(), USER_CUBE);
}

#[test]
fn empty_input_resolves_to_configured_default() {
    let custom_default = CubeState::parse(USER_CUBE).expect("valid");
    assert_eq!(validate("", &custom_default), Ok(custom_default.clone()));
    assert_eq!(validate("", &default_cube()), validate(DEFAULT_CUBE, &default_cube()));
}

#[test]
fn non_empty_wrong_length_is_invalid_length() {
    for candidate in ["W", "RRRR", &USER_CUBE[..53], &format!("{USER_CUBE}W")] {
        let err = validate(candidate, &default_cube()).expect_err("wrong length");
        assert_eq!(
            err,
            ValidationError::InvalidLength {
                actual: candidate.chars().count()
            }
        );
    }
}

#[test]
fn length_is_checked_before_alphabet() {
    let err = validate("xyz", &default_cube()).expect_err("invalid");
    assert!(matches!(err, ValidationError::InvalidLength { actual: 3 }));
}

#[test]
fn foreign_symbol_is_invalid_character() {
    for bad in ['w', 'X', ' ', '1'] {
        let mut candidate: Vec<char> = USER_CUBE.chars().collect();
        candidate[CUBE_LEN - 1] = bad;
        let candidate: String = candidate.into_iter().collect();

        let err = validate(&candidate, &default_cube()).expect_err("invalid");
        assert_eq!(
            err,
            ValidationError::InvalidCharacter {
                character: bad,
                position: CUBE_LEN - 1
            }
        );
    }
}
