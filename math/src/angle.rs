use glam::Vec2;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

/// An angle in degrees, always wrapped in to `[0, 360)`. Sine and cosine are
/// computed once when the value is made, so repeated lookups in the render
/// loop are free.
#[derive(Default, Copy, Clone)]
pub struct Angle {
    deg: f32,
    sin: f32,
    cos: f32,
}

#[inline]
fn wrap(mut degrees: f32) -> f32 {
    degrees %= 360.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // -tiny + 360 rounds up to 360
    if degrees >= 360.0 { 0.0 } else { degrees }
}

impl Angle {
    /// Will always wrap < 0 to > 0 and >= 360 to < 360
    #[inline]
    pub fn new(degrees: f32) -> Self {
        let deg = wrap(degrees);
        let (sin, cos) = deg.to_radians().sin_cos();
        Angle { deg, sin, cos }
    }

    /// Convert a Binary Angle Measurement, where the full circle is 65536
    #[inline]
    pub fn from_bam(bam: u16) -> Self {
        Angle::new(bam as f32 * 360.0 / 65536.0)
    }

    pub fn from_vector(input: Vec2) -> Self {
        Angle::new(input.y.atan2(input.x).to_degrees())
    }

    #[inline]
    pub const fn deg(&self) -> f32 {
        self.deg
    }

    #[inline]
    pub fn rad(&self) -> f32 {
        self.deg.to_radians()
    }

    /// The same angle in `(-180, 180]`
    #[inline]
    pub fn signed(&self) -> f32 {
        if self.deg > 180.0 {
            self.deg - 360.0
        } else {
            self.deg
        }
    }

    #[inline]
    pub const fn sin(&self) -> f32 {
        self.sin
    }

    #[inline]
    pub const fn cos(&self) -> f32 {
        self.cos
    }

    /// Unbounded at 90 and 270
    #[inline]
    pub fn tan(&self) -> f32 {
        self.sin / self.cos
    }

    #[inline]
    pub const fn sin_cos(&self) -> (f32, f32) {
        (self.sin, self.cos)
    }

    #[inline(always)]
    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({})", self.deg)
    }
}

impl From<f32> for Angle {
    fn from(degrees: f32) -> Self {
        Angle::new(degrees)
    }
}

impl Add for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: Angle) -> Angle {
        Angle::new(self.deg + other.deg)
    }
}

impl Add<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: f32) -> Angle {
        Angle::new(self.deg + other)
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, other: Angle) {
        *self = *self + other;
    }
}

impl AddAssign<f32> for Angle {
    #[inline]
    fn add_assign(&mut self, other: f32) {
        *self = *self + other;
    }
}

impl Sub for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, other: Angle) -> Angle {
        Angle::new(self.deg - other.deg)
    }
}

impl Sub<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, other: f32) -> Angle {
        Angle::new(self.deg - other)
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, other: Angle) {
        *self = *self - other;
    }
}

impl SubAssign<f32> for Angle {
    #[inline]
    fn sub_assign(&mut self, other: f32) {
        *self = *self - other;
    }
}

impl Div for Angle {
    type Output = Angle;
    #[inline]
    fn div(self, other: Angle) -> Angle {
        Angle::new(self.deg / other.deg)
    }
}

impl Div<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn div(self, other: f32) -> Angle {
        Angle::new(self.deg / other)
    }
}

impl Neg for Angle {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Angle::new(360.0 - self.deg)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Angle) -> bool {
        self.deg == other.deg
    }
}

impl PartialEq<f32> for Angle {
    fn eq(&self, other: &f32) -> bool {
        self.deg == *other
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Angle) -> Option<Ordering> {
        self.deg.partial_cmp(&other.deg)
    }
}

impl PartialOrd<f32> for Angle {
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        self.deg.partial_cmp(other)
    }
}

/// Angle of the line from `from` towards `to`, 0 is east, counter-clockwise
#[inline]
pub fn point_to_angle(from: Vec2, to: Vec2) -> Angle {
    Angle::from_vector(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    #[test]
    fn normalise() {
        assert_eq!(Angle::new(370.0).deg(), 10.0);
        assert_eq!(Angle::new(-10.0).deg(), 350.0);
        assert_eq!(Angle::new(720.0).deg(), 0.0);
        assert_eq!(Angle::new(-1e-7).deg(), 0.0);
    }

    #[test]
    fn add_sub_wrap() {
        assert_eq!((Angle::new(0.0) + 360.0).deg(), 0.0);
        assert_eq!((Angle::new(350.0) + Angle::new(20.0)).deg(), 10.0);
        assert_eq!((Angle::new(10.0) - 20.0).deg(), 350.0);

        let mut a = Angle::new(300.0);
        a += 90.0;
        assert_eq!(a, 30.0);
        a -= Angle::new(45.0);
        assert_eq!(a, 345.0);
    }

    #[test]
    fn negate() {
        assert_eq!((-Angle::new(200.0)).deg(), 160.0);
        assert_eq!((-Angle::new(0.0)).deg(), 0.0);
    }

    #[test]
    fn divide() {
        assert_eq!((Angle::new(90.0) / 2.0).deg(), 45.0);
        assert_eq!((Angle::new(90.0) / Angle::new(45.0)).deg(), 2.0);
    }

    #[test]
    fn compare() {
        assert!(Angle::new(10.0) < Angle::new(20.0));
        assert!(Angle::new(370.0) < 20.0);
        assert!(Angle::new(-1.0) > 180.0);
        assert_eq!(Angle::new(45.0), Angle::new(405.0));
    }

    #[test]
    fn trig() {
        let a = Angle::new(90.0);
        assert!((a.sin() - 1.0).abs() < EPS);
        assert!(a.cos().abs() < EPS);
        assert!((Angle::new(45.0).tan() - 1.0).abs() < EPS);
        assert!((Angle::new(180.0).cos() + 1.0).abs() < EPS);
    }

    #[test]
    fn signed_range() {
        assert_eq!(Angle::new(270.0).signed(), -90.0);
        assert_eq!(Angle::new(180.0).signed(), 180.0);
        assert_eq!(Angle::new(90.0).signed(), 90.0);
    }

    #[test]
    fn bam() {
        assert_eq!(Angle::from_bam(0).deg(), 0.0);
        assert_eq!(Angle::from_bam(0x4000).deg(), 90.0);
        assert_eq!(Angle::from_bam(0x8000).deg(), 180.0);
        assert_eq!(Angle::from_bam(0xC000).deg(), 270.0);
    }

    #[test]
    fn point_angles() {
        let o = Vec2::new(128.0, 128.0);
        assert!((point_to_angle(o, Vec2::new(256.0, 256.0)).deg() - 45.0).abs() < EPS);
        assert!((point_to_angle(o, Vec2::new(0.0, 256.0)).deg() - 135.0).abs() < EPS);
        assert!((point_to_angle(o, Vec2::new(0.0, 0.0)).deg() - 225.0).abs() < EPS);
        assert!((point_to_angle(o, Vec2::new(256.0, 0.0)).deg() - 315.0).abs() < EPS);
    }
}
