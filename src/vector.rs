use std::fmt;

#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn len(&self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f32 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(arr: [f32; 3]) -> Vec3 {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> [f32; 3] {
        [vec.x, vec.y, vec.z]
    }
}

impl From<cgmath::Vector3<f32>> for Vec3 {
    fn from(vec: cgmath::Vector3<f32>) -> Vec3 {
        Vec3::new(vec.x, vec.y, vec.z)
    }
}

impl From<Vec3> for cgmath::Vector3<f32> {
    fn from(vec: Vec3) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(vec.x, vec.y, vec.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}


#[test]
fn len_test() {
    let v = Vec3::new(2.0, 3.0, 6.0);
    assert!(v.len_sq() == 49.0);
    assert!(v.len() == 7.0);
}

#[test]
fn conversions_test() {
    let v: Vec3 = [1.0, 2.0, 3.0].into();
    assert!(<[f32; 3]>::from(v) == [1.0, 2.0, 3.0]);

    let cg: cgmath::Vector3<f32> = v.into();
    assert!(cg == cgmath::Vector3::new(1.0, 2.0, 3.0));
    assert!(Vec3::from(cg) == v);
}

#[test]
fn display_test() {
    let v = Vec3::new(1.0, 0.5, -2.0);
    assert_eq!(v.to_string(), "(1.0, 0.5, -2.0)");
}
