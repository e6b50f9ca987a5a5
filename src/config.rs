use std::fmt;

use crate::{
    error::{ConfigError, QuatResult},
    quaternion::Quaternion,
    vector::Vec3,
};


/// Parsing states.
enum Parse {
    None,
    NewRotation,
    Quat,
    Axis,
    Angle,
    Euler,
}


/// Rotations requested on the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub rotations: Vec<RotationConfig>,
}
impl Config {
    /// Create a new Config with the specified command line arguments.
    pub fn new(args: Vec<String>) -> Result<Config, ConfigError> {
        let mut parser  = Parse::None;
        let mut cfg     = Config::default();
        let mut rcfg    = RotationConfig::default();
        let mut values  = Vec::new();
        let mut flag    = String::new();
        let mut axis    = None;
        let mut pending = false;
        let mut sourced = false;

        for arg in args.into_iter() {
            // A flag only counts as one once the previous flag has all of its values.
            if values.is_empty() {
                let next = match arg.as_str() {
                    "r"      => Some(Parse::NewRotation),
                    "-quat"  => Some(Parse::Quat),
                    "-axis"  => Some(Parse::Axis),
                    "-angle" => Some(Parse::Angle),
                    "-euler" => Some(Parse::Euler),
                    "-nor" => {
                        rcfg.normalize = true;
                        pending = true;
                        continue;
                    }
                    _ => None,
                };
                if let Some(next) = next {
                    if !matches!(parser, Parse::None | Parse::NewRotation) {
                        return Err(ConfigError::MissingValue(flag));
                    }
                    match next {
                        Parse::NewRotation => {
                            if axis.is_some() {
                                return Err(ConfigError::MissingAngle);
                            }
                            cfg.rotations.push(rcfg);
                            rcfg    = RotationConfig::default();
                            parser  = Parse::None;
                            pending = false;
                            sourced = false;
                            continue;
                        }
                        Parse::Quat | Parse::Axis | Parse::Euler => {
                            if sourced {
                                return Err(ConfigError::DuplicateSource(arg));
                            }
                            sourced = true;
                        }
                        _ => {}
                    }
                    parser  = next;
                    flag    = arg;
                    pending = true;
                    continue;
                }
            }
            match parser {
                Parse::None | Parse::NewRotation => {
                    return Err(
                        ConfigError::UnexpectedArgument(arg)
                    );
                }
                _ => {
                    values.push(parse_number(&flag, &arg)?);
                }
            }
            match (&parser, values.as_slice()) {
                (Parse::Quat, &[x, y, z, w]) => {
                    rcfg.source = Source::Components(Quaternion::new(x, y, z, w));
                }
                (Parse::Axis, &[x, y, z]) => {
                    let vec = Vec3::new(x, y, z);
                    if vec.len() == 0.0 {
                        log::warn!("zero axis {vec} only keeps the angle's cosine");
                    }
                    axis = Some(vec);
                }
                (Parse::Angle, &[angle]) => {
                    match axis.take() {
                        Some(axis) => {
                            rcfg.source = Source::AxisAngle(axis, angle);
                        }
                        None => {
                            return Err(
                                ConfigError::UnexpectedArgument(flag)
                            );
                        }
                    }
                }
                (Parse::Euler, &[yaw, pitch, roll]) => {
                    rcfg.source = Source::Euler { yaw, pitch, roll };
                }
                _ => continue,
            }
            log::trace!("{flag} -> {:?}", values);
            values.clear();
            parser = Parse::None;
        }
        if !matches!(parser, Parse::None) {
            return Err(ConfigError::MissingValue(flag));
        }
        if axis.is_some() {
            return Err(ConfigError::MissingAngle);
        }
        if pending || cfg.rotations.is_empty() {
            cfg.rotations.push(rcfg);
        }
        log::debug!("parsed {} rotation(s)", cfg.rotations.len());
        Ok(cfg)
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rRotations
            \r=============================================================",
        )?;
        for (i, rcfg) in self.rotations.iter().enumerate() {
            write!(f, "
                \rRotation {i}:
                \r{rcfg}",
            )?;
        }
        writeln!(f)
    }
}

fn parse_number(flag: &str, arg: &str) -> Result<f32, ConfigError> {
    match arg.parse::<f32>() {
        Ok(n) => Ok(n),
        Err(_) => {
            Err(
                ConfigError::InvalidNumber(flag.to_string(), arg.to_string())
            )
        }
    }
}


/// Where a rotation's components come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    Components(Quaternion),
    /// Axis and angle in degrees.
    AxisAngle(Vec3, f32),
    Euler { yaw: f32, pitch: f32, roll: f32 },
}
impl Default for Source {
    fn default() -> Self {
        Self::Components(Quaternion::identity())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationConfig {
    pub source: Source,
    pub normalize: bool,
}
impl RotationConfig {
    /// Build the quaternion this configuration describes.
    pub fn build(&self) -> QuatResult<Quaternion> {
        let mut quat = match self.source {
            Source::Components(quat) => quat,
            Source::AxisAngle(axis, angle) => {
                Quaternion::from_axis_angle(&axis, angle)
            }
            Source::Euler { yaw, pitch, roll } => {
                Quaternion::from_euler_angles(yaw, pitch, roll)
            }
        };
        if self.normalize {
            quat.try_normalize()?;
        }
        Ok(quat)
    }
}
impl fmt::Display for RotationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Source::Components(quat) => {
                write!(f, "Components: {quat}")?;
            }
            Source::AxisAngle(axis, angle) => {
                write!(f, "Axis: {axis}, Angle: {angle}")?;
            }
            Source::Euler { yaw, pitch, roll } => {
                write!(f, "Yaw: {yaw}, Pitch: {pitch}, Roll: {roll}")?;
            }
        }
        write!(f, "
            \rNormalize: {}",
            self.normalize,
        )
    }
}


#[cfg(test)]
fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

#[test]
fn no_args_is_identity() {
    let cfg = Config::new(Vec::new()).unwrap();
    assert!(cfg.rotations.len() == 1);
    assert!(cfg.rotations[0].build().unwrap() == Quaternion::identity());
}

#[test]
fn parse_each_source() {
    let cfg = Config::new(args(
        "-quat 1 2 3 4 r -axis 0 0 1 -angle 180 r -euler 90 0 0 -nor"
    )).unwrap();
    assert!(cfg.rotations.len() == 3);

    assert!(cfg.rotations[0] == RotationConfig {
        source: Source::Components(Quaternion::new(1.0, 2.0, 3.0, 4.0)),
        normalize: false,
    });
    assert!(cfg.rotations[1].source == Source::AxisAngle(Vec3::new(0.0, 0.0, 1.0), 180.0));
    assert!(cfg.rotations[2] == RotationConfig {
        source: Source::Euler { yaw: 90.0, pitch: 0.0, roll: 0.0 },
        normalize: true,
    });
}

#[test]
fn negative_values_are_numbers() {
    let cfg = Config::new(args("-euler -90 -45.5 10")).unwrap();
    assert!(cfg.rotations[0].source == Source::Euler { yaw: -90.0, pitch: -45.5, roll: 10.0 });
}

#[test]
fn build_normalizes_on_request() {
    let cfg = Config::new(args("-quat 0 0 0 2 -nor")).unwrap();
    assert!(cfg.rotations[0].build().unwrap() == Quaternion::identity());

    let cfg = Config::new(args("-quat 0 0 0 2")).unwrap();
    assert!(cfg.rotations[0].build().unwrap() == Quaternion::new(0.0, 0.0, 0.0, 2.0));

    let cfg = Config::new(args("-quat 0 0 0 0 -nor")).unwrap();
    assert!(cfg.rotations[0].build() == Err(crate::error::QuatError::ZeroLength));
}

#[test]
fn parse_errors() {
    assert!(
        Config::new(args("-quat 1 2 x 4"))
        == Err(ConfigError::InvalidNumber("-quat".to_string(), "x".to_string()))
    );
    assert!(
        Config::new(args("-euler 1 2"))
        == Err(ConfigError::MissingValue("-euler".to_string()))
    );
    assert!(
        Config::new(args("-axis 1 2 -angle 90"))
        == Err(ConfigError::InvalidNumber("-axis".to_string(), "-angle".to_string()))
    );
    assert!(
        Config::new(args("-axis 0 1 0"))
        == Err(ConfigError::MissingAngle)
    );
    assert!(
        Config::new(args("-angle 90"))
        == Err(ConfigError::UnexpectedArgument("-angle".to_string()))
    );
    assert!(
        Config::new(args("-axis 0 1 0 r -quat 1 0 0 0"))
        == Err(ConfigError::MissingAngle)
    );
    assert!(
        Config::new(args("hello"))
        == Err(ConfigError::UnexpectedArgument("hello".to_string()))
    );
}

#[test]
fn one_source_per_rotation() {
    assert!(
        Config::new(args("-axis 0 0 1 -angle 90 -quat 1 2 3 4"))
        == Err(ConfigError::DuplicateSource("-quat".to_string()))
    );
    assert!(
        Config::new(args("-euler 0 0 0 -axis 0 0 1 -angle 90"))
        == Err(ConfigError::DuplicateSource("-axis".to_string()))
    );

    let cfg = Config::new(args("-axis 0 0 1 -angle 90 r -quat 1 2 3 4")).unwrap();
    assert!(cfg.rotations.len() == 2);
    assert!(cfg.rotations[1].build().unwrap() == Quaternion::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn identity_rotation_is_kept() {
    let cfg = Config::new(args("-quat 1 0 0 0 r -quat 0 0 0 1")).unwrap();
    assert!(cfg.rotations.len() == 2);
    assert!(cfg.rotations[1].build().unwrap() == Quaternion::identity());
}

#[test]
fn build_axis_angle() {
    let half = std::f32::consts::FRAC_1_SQRT_2;
    let rcfg = RotationConfig {
        source: Source::AxisAngle(Vec3::new(0.0, 1.0, 0.0), 90.0),
        normalize: false,
    };
    let quat = rcfg.build().unwrap();
    assert!((quat.y - half).abs() < 1e-6 && (quat.w - half).abs() < 1e-6);
    assert!(rcfg.to_string().starts_with("Axis: (0.0, 1.0, 0.0), Angle: 90"));
}
