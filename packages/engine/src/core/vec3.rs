/// 3D Vector for physics and projection math
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Read three consecutive floats starting at `base`
    #[inline]
    pub fn from_slice(data: &[f32], base: usize) -> Self {
        Self {
            x: data[base],
            y: data[base + 1],
            z: data[base + 2],
        }
    }

    /// Write three consecutive floats starting at `base`
    #[inline]
    pub fn write_to(&self, data: &mut [f32], base: usize) {
        data[base] = self.x;
        data[base + 1] = self.y;
        data[base + 2] = self.z;
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unit vector in the same direction; a zero vector stays zero
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self * (1.0 / len)
        } else {
            Self::zero()
        }
    }

    /// Scale down so the length lies in `[min, max]`, keeping direction
    pub fn clamp_length(&self, min: f32, max: f32) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        *self * (len.clamp(min, max) / len)
    }

    /// Move `alpha` of the way toward `target`
    pub fn lerp(&self, target: Vec3, alpha: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * alpha,
            y: self.y + (target.y - self.y) * alpha,
            z: self.z + (target.z - self.z) * alpha,
        }
    }

    pub fn distance(&self, other: Vec3) -> f32 {
        (other - *self).length()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl std::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}
