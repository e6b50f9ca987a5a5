use std::f64::consts::PI;
use std::fmt;

use crate::error::{QuatError, QuatResult};
use crate::vector::Vec3;

/// Rotation quaternion with vector part `x, y, z` and scalar part `w`.
///
/// Fields are laid out in `x, y, z, w` order, so a quaternion can be cast
/// to `[f32; 4]` or uploaded as-is. Nothing keeps it at unit length; call
/// [`Quaternion::normalize`] after anything that drifts.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}
impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` degrees around `axis`.
    ///
    /// A non-unit axis is accepted but changes the rotation: the axis scales
    /// only the vector part, and normalizing afterwards rescales all four
    /// components together. Pass a unit axis to get exactly `angle` degrees.
    pub fn from_axis_angle(axis: &Vec3, angle: f32) -> Self {
        let mut quat = Self::default();
        quat.set_axis_angle(axis, angle);
        quat
    }

    /// Rotation from yaw, pitch and roll in degrees.
    pub fn from_euler_angles(yaw: f32, pitch: f32, roll: f32) -> Self {
        let mut quat = Self::default();
        quat.set_euler_angles(yaw, pitch, roll);
        quat
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    pub fn set_from(&mut self, quat: &Quaternion) -> &mut Self {
        self.set(quat.x, quat.y, quat.z, quat.w)
    }

    pub fn set_axis_angle(&mut self, axis: &Vec3, angle: f32) -> &mut Self {
        let angle = (angle as f64 * (PI / 180.0)) as f32;
        let half = (angle / 2.0) as f64;
        let sin = half.sin() as f32;
        let cos = half.cos() as f32;

        self.set(axis.x * sin, axis.y * sin, axis.z * sin, cos).normalize()
    }

    pub fn copy(&self) -> Quaternion {
        *self
    }

    pub fn len(&self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f32 {
        self.x*self.x + self.y*self.y + self.z*self.z + self.w*self.w
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Scale to unit length in place.
    ///
    /// There is no zero check: a zero quaternion divides by zero and every
    /// component becomes NaN. Use [`Quaternion::try_normalize`] to get an
    /// error instead.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.len();
        self.set(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Like [`Quaternion::normalize`], but leaves `self` untouched and fails
    /// when the length is zero or a component is not finite.
    ///
    /// The length is accumulated in f64, so components near the f32 limits
    /// neither overflow to infinity nor underflow to zero on the way.
    pub fn try_normalize(&mut self) -> QuatResult<&mut Self> {
        if !self.is_finite() {
            log::warn!("refusing to normalize non-finite quaternion {self}");
            return Err(QuatError::NonFinite((*self).into()));
        }
        let [x, y, z, w] = <[f32; 4]>::from(*self).map(f64::from);
        let len = (x*x + y*y + z*z + w*w).sqrt();
        if len == 0.0 {
            log::warn!("refusing to normalize zero-length quaternion");
            return Err(QuatError::ZeroLength);
        }
        let unit = Quaternion::new(
            (x / len) as f32,
            (y / len) as f32,
            (z / len) as f32,
            (w / len) as f32,
        );
        if !unit.is_finite() || unit.len() == 0.0 {
            log::warn!("normalizing {self} gave {unit}");
            return Err(QuatError::NonFinite((*self).into()));
        }
        Ok(self.set_from(&unit))
    }

    /// Set from aircraft-style Euler angles in degrees.
    ///
    /// Trig runs in f64 and the products in f32, in a fixed order, so results
    /// stay bit-identical across platforms. The result is not renormalized.
    pub fn set_euler_angles(&mut self, yaw: f32, pitch: f32, roll: f32) -> &mut Self {
        let yaw   = (yaw as f64).to_radians() as f32;
        let pitch = (pitch as f64).to_radians() as f32;
        let roll  = (roll as f64).to_radians() as f32;

        let half_roll = (roll * 0.5) as f64;
        let sr = half_roll.sin() as f32;
        let cr = half_roll.cos() as f32;

        let half_pitch = (pitch * 0.5) as f64;
        let sp = half_pitch.sin() as f32;
        let cp = half_pitch.cos() as f32;

        let half_yaw = (yaw * 0.5) as f64;
        let sy = half_yaw.sin() as f32;
        let cy = half_yaw.cos() as f32;

        self.x = ((cy * sp) * cr) + ((sy * cp) * sr);
        self.y = ((sy * cp) * cr) - ((cy * sp) * sr);
        self.z = ((cy * cp) * sr) - ((sy * sp) * cr);
        self.w = ((cy * cp) * cr) + ((sy * sp) * sr);
        self
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(arr: [f32; 4]) -> Quaternion {
        Quaternion::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Quaternion> for [f32; 4] {
    fn from(quat: Quaternion) -> [f32; 4] {
        [quat.x, quat.y, quat.z, quat.w]
    }
}

impl From<cgmath::Quaternion<f32>> for Quaternion {
    fn from(quat: cgmath::Quaternion<f32>) -> Quaternion {
        Quaternion::new(quat.v.x, quat.v.y, quat.v.z, quat.s)
    }
}

impl From<Quaternion> for cgmath::Quaternion<f32> {
    fn from(quat: Quaternion) -> cgmath::Quaternion<f32> {
        cgmath::Quaternion::new(quat.w, quat.x, quat.y, quat.z)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}|{:?}|{:?}|{:?}]", self.x, self.y, self.z, self.w)
    }
}


#[cfg(test)]
fn assert_near(quat: Quaternion, x: f32, y: f32, z: f32, w: f32) {
    let eps = 1e-6;
    assert!(
        (quat.x - x).abs() < eps &&
        (quat.y - y).abs() < eps &&
        (quat.z - z).abs() < eps &&
        (quat.w - w).abs() < eps,
        "{quat} is not near [{x}|{y}|{z}|{w}]"
    );
}

#[test]
fn construct_and_set() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    assert!(q == Quaternion { x: 1.0, y: 2.0, z: 3.0, w: 4.0 });
    assert!(Quaternion::default() == Quaternion::new(0.0, 0.0, 0.0, 0.0));

    let mut p = Quaternion::default();
    p.set(5.0, 6.0, 7.0, 8.0).set_from(&q);
    assert!(p == q);
}

#[test]
fn copy_is_independent() {
    let q = Quaternion::new(0.1, -0.2, 0.3, 0.9);
    let mut c = q.copy();
    assert!(c == q);

    c.set(9.0, 9.0, 9.0, 9.0);
    assert!(q == Quaternion::new(0.1, -0.2, 0.3, 0.9));
}

#[test]
fn len_test() {
    let q = Quaternion::new(1.0, 2.0, 2.0, 4.0);
    assert!(q.len_sq() == 25.0);
    assert!(q.len() == 5.0);
    assert!(Quaternion::default().len() == 0.0);
}

#[test]
fn normalize_gives_unit_length() {
    let samples = [
        Quaternion::new(1.0, 2.0, 3.0, 4.0),
        Quaternion::new(-0.5, 0.0, 0.0, 0.0),
        Quaternion::new(1e-3, 2e-3, -4e-3, 1e-3),
        Quaternion::new(120.0, -75.0, 33.0, 0.25),
    ];
    for mut q in samples {
        q.normalize();
        assert!((q.len() - 1.0).abs() < 1e-6, "{q}");
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut q = Quaternion::new(3.0, -1.0, 2.0, 7.0);
    q.normalize();
    let once = q;
    q.normalize();
    assert_near(q, once.x, once.y, once.z, once.w);
}

#[test]
fn normalize_zero_is_nan() {
    let mut q = Quaternion::default();
    q.normalize();
    assert!(q.x.is_nan() && q.y.is_nan() && q.z.is_nan() && q.w.is_nan());
    assert!(!q.is_finite());
}

#[test]
fn try_normalize_zero_is_error() {
    let mut q = Quaternion::default();
    assert!(q.try_normalize() == Err(QuatError::ZeroLength));
    assert!(q == Quaternion::default());

    let mut q = Quaternion::new(f32::INFINITY, 0.0, 0.0, 1.0);
    assert!(matches!(q.try_normalize(), Err(QuatError::NonFinite(_))));

    let mut q = Quaternion::new(0.0, 0.0, 0.0, 2.0);
    assert!(q.try_normalize().is_ok());
    assert!(q == Quaternion::identity());
}

#[test]
fn try_normalize_extreme_magnitudes() {
    let half = std::f32::consts::FRAC_1_SQRT_2;

    let mut q = Quaternion::new(1e25, 1e25, 0.0, 0.0);
    assert!(q.try_normalize().is_ok());
    assert_near(q, half, half, 0.0, 0.0);

    let mut q = Quaternion::new(1e-25, 0.0, 0.0, 0.0);
    assert!(q.try_normalize().is_ok());
    assert_near(q, 1.0, 0.0, 0.0, 0.0);

    let mut q = Quaternion::new(f32::MAX, -f32::MAX, f32::MAX, f32::MAX);
    assert!(q.try_normalize().is_ok());
    assert_near(q, 0.5, -0.5, 0.5, 0.5);

    let tiny = f32::from_bits(1);
    let mut q = Quaternion::new(0.0, 0.0, tiny, 0.0);
    assert!(q.try_normalize().is_ok());
    assert_near(q, 0.0, 0.0, 1.0, 0.0);
}

#[test]
fn axis_angle_half_turn() {
    let q = Quaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), 180.0);
    assert_near(q, 0.0, 0.0, 1.0, 0.0);
}

#[test]
fn axis_angle_non_unit_axis() {
    let q = Quaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 2.0), 180.0);
    assert_near(q, 0.0, 0.0, 1.0, 0.0);

    // 3 * sin(45) and cos(45) normalized together, not a 90 degree turn
    let q = Quaternion::from_axis_angle(&Vec3::new(3.0, 0.0, 0.0), 90.0);
    assert_near(q, 0.9486833, 0.0, 0.0, 0.3162278);
    assert!((q.len() - 1.0).abs() < 1e-6);
}

#[test]
fn axis_angle_zero_axis() {
    // cos of the rounded half turn is tiny but not zero, so w survives
    let q = Quaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 0.0), 180.0);
    assert_eq!(q.to_string(), "[0.0|0.0|0.0|-1.0]");

    let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    q.set_axis_angle(&Vec3::new(0.0, 0.0, 0.0), 540.0);
    assert!(q.is_finite());

    // only an exactly zero total length reaches the unguarded divide
    let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    let len = q.len();
    q.normalize();
    assert!(len == 0.0);
    assert_eq!(q.to_string(), "[NaN|NaN|NaN|NaN]");
}

#[test]
fn axis_angle_zero_angle_is_identity() {
    for axis in [[1.0, 0.0, 0.0], [0.0, 5.0, 0.0], [1.0, 2.0, 3.0], [0.0, 0.0, 0.0]] {
        let q = Quaternion::from_axis_angle(&axis.into(), 0.0);
        assert_near(q, 0.0, 0.0, 0.0, 1.0);
    }
}

#[test]
fn axis_angle_quarter_turn() {
    let half = std::f32::consts::FRAC_1_SQRT_2;
    let mut q = Quaternion::new(1.0, 1.0, 1.0, 1.0);
    q.set_axis_angle(&Vec3::new(0.0, 1.0, 0.0), 90.0);
    assert_near(q, 0.0, half, 0.0, half);
}

#[test]
fn euler_zero_is_identity() {
    let mut q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    q.set_euler_angles(0.0, 0.0, 0.0);
    assert!(q == Quaternion::identity());
}

#[test]
fn euler_single_axis() {
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert_near(Quaternion::from_euler_angles(90.0, 0.0, 0.0), 0.0, half, 0.0, half);
    assert_near(Quaternion::from_euler_angles(0.0, 90.0, 0.0), half, 0.0, 0.0, half);
    assert_near(Quaternion::from_euler_angles(0.0, 0.0, 90.0), 0.0, 0.0, half, half);
}

#[test]
fn euler_matches_axis_angle() {
    let q = Quaternion::from_euler_angles(0.0, 0.0, 60.0);
    let a = Quaternion::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), 60.0);
    assert_near(q, a.x, a.y, a.z, a.w);
}

#[test]
fn euler_is_near_unit() {
    let q = Quaternion::from_euler_angles(37.0, -12.5, 141.0);
    assert!((q.len() - 1.0).abs() < 1e-6);
}

#[test]
fn display_format() {
    assert_eq!(Quaternion::new(1.0, 2.0, 3.0, 4.0).to_string(), "[1.0|2.0|3.0|4.0]");
    assert_eq!(Quaternion::new(-0.5, 0.0, 0.25, 1.0).to_string(), "[-0.5|0.0|0.25|1.0]");

    let mut q = Quaternion::default();
    q.normalize();
    assert_eq!(q.to_string(), "[NaN|NaN|NaN|NaN]");
}

#[test]
fn memory_layout_is_xyzw() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let arr: [f32; 4] = bytemuck::cast(q);
    assert!(arr == [1.0, 2.0, 3.0, 4.0]);
    assert!(<[f32; 4]>::from(q) == arr);
    assert!(Quaternion::from(arr) == q);
}

#[test]
fn cgmath_conversion() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let cg: cgmath::Quaternion<f32> = q.into();
    assert!(cg.s == 4.0);
    assert!(cg.v == cgmath::Vector3::new(1.0, 2.0, 3.0));
    assert!(Quaternion::from(cg) == q);
}
