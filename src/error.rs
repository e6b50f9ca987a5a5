use std::error::Error;
use std::fmt;

pub type QuatResult<T> = Result<T, QuatError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuatError {
    ZeroLength,
    NonFinite([f32; 4]),
}
impl fmt::Display for QuatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuatError::ZeroLength => {
                write!(f, "Cannot normalize zero-length quaternion")
            }
            QuatError::NonFinite([x, y, z, w]) => {
                write!(f, "Cannot normalize non-finite quaternion [{x:?}|{y:?}|{z:?}|{w:?}]")
            }
        }
    }
}
impl Error for QuatError {}


#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidNumber(String, String),
    UnexpectedArgument(String),
    DuplicateSource(String),
    MissingAngle,
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => {
                write!(f, "
                    \rMissing value for {flag}",
                )
            }
            ConfigError::InvalidNumber(flag, value) => {
                write!(f, "
                    \rInvalid number for {flag}: {value}",
                )
            }
            ConfigError::UnexpectedArgument(arg) => {
                write!(f, "
                    \rUnexpected argument: {arg}",
                )
            }
            ConfigError::DuplicateSource(flag) => {
                write!(f, "
                    \r{flag} conflicts with an earlier source, separate rotations with r",
                )
            }
            ConfigError::MissingAngle => {
                write!(f, "
                    \r-axis given without -angle",
                )
            }
        }
    }
}
impl Error for ConfigError {}


#[test]
fn quat_error_display() {
    assert_eq!(
        QuatError::ZeroLength.to_string(),
        "Cannot normalize zero-length quaternion"
    );
    assert_eq!(
        QuatError::NonFinite([f32::NAN, 0.0, 1.0, 0.0]).to_string(),
        "Cannot normalize non-finite quaternion [NaN|0.0|1.0|0.0]"
    );
}

#[test]
fn config_error_display() {
    let err = ConfigError::InvalidNumber("-angle".to_string(), "abc".to_string());
    assert!(err.to_string().ends_with("Invalid number for -angle: abc"));

    let err = ConfigError::DuplicateSource("-quat".to_string());
    assert!(err.to_string().ends_with("-quat conflicts with an earlier source, separate rotations with r"));
}
