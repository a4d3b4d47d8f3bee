use bevy::math::{IVec2, Vec2};

pub type Real = f32;

pub type Vector = Vec2;
pub type Point = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

/// Left-hand perpendicular `(-y, x)`.
#[inline(always)]
pub fn perpendicular(v: Vector) -> Vector {
    Vec2::new(-v.y, v.x)
}

/// Unit vector and length of `v`, or `None` when the length is zero or not finite.
#[inline(always)]
pub fn direction_and_length(v: Vector) -> Option<(Vector, Real)> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some((v / length, length))
    } else {
        None
    }
}

/// Mirror `velocity` about the line spanned by the unit `tangent`.
#[inline(always)]
pub fn reflect_about_tangent(velocity: Vector, tangent: Vector) -> Vector {
    2.0 * velocity.dot(tangent) * tangent - velocity
}

/// Grid cell holding `position` for square cells of width `cell_size`.
#[inline(always)]
pub fn cell_of(position: Point, cell_size: Real) -> IVec2 {
    let inv = 1.0 / cell_size;
    IVec2::new(
        (position.x * inv).floor() as i32,
        (position.y * inv).floor() as i32,
    )
}
