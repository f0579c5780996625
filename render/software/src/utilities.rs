use glam::Vec2;
use math::{Angle, point_to_angle};

/// Scale factor bounds, `1/256` to `64`
pub const MIN_SCALE: f32 = 0.00390625;
pub const MAX_SCALE: f32 = 64.0;
/// Smallest perpendicular wall distance used for scaling
const MIN_NORMAL_DIST: f32 = 1.0 / 256.0;

/// Distance from the eye to the projection plane for a screen and fov,
/// rounded to a whole pixel
pub fn projection(fov: Angle, screen_width_half: f32) -> f32 {
    (screen_width_half / (fov / 2.0).tan()).round()
}

/// Used to build a table for drawing process. The angle in degrees, left of
/// centre positive.
pub fn screen_to_angle(x: f32, screen_width_half: f32, dist: f32) -> f32 {
    ((screen_width_half - x) / dist).atan().to_degrees()
}

/// The viewangletox LUT as a function, the inverse of `screen_to_angle`.
/// `angle` is view relative with the left screen edge at `+fov/2`. The
/// column is rounded and clamped to the screen.
pub fn angle_to_screen(angle: Angle, half_screen_width: f32, screen_width: i32, dist: f32) -> i32 {
    let x = half_screen_width - dist * angle.tan();
    (x.round() as i32).clamp(0, screen_width - 1)
}

/// World and view relative angles of a seg's endpoints, after clipping the
/// view relative pair to the field of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegAngles {
    /// World angle from the eye to the start vertex
    pub v1_angle: Angle,
    pub v2_angle: Angle,
    pub v1_from_view: Angle,
    pub v2_from_view: Angle,
}

/// Find the endpoint angles of the wall `v1 -> v2` seen from `xy` facing
/// `view_angle`. `None` if the wall faces away (spans 180 or more) or lies
/// wholly outside the field of view.
pub fn clip_to_fov(xy: Vec2, view_angle: Angle, fov: Angle, v1: Vec2, v2: Vec2) -> Option<SegAngles> {
    let half_fov = fov / 2.0;
    let v1_angle = point_to_angle(xy, v1);
    let v2_angle = point_to_angle(xy, v2);

    let span = v1_angle - v2_angle;
    // Back-face test: the wall's front is to the eye only while its ends
    // are less than half a turn apart. Not a comparison against the fov.
    if span >= 180.0 {
        return None;
    }

    let mut v1_from_view = v1_angle - view_angle;
    let mut v2_from_view = v2_angle - view_angle;

    // Shift so the fov runs 0..fov from the right edge
    let v1_moved = v1_from_view + half_fov;
    if v1_moved > fov {
        // Past the left edge, by how much?
        if v1_moved - fov >= span {
            return None;
        }
        v1_from_view = half_fov;
    }

    let v2_moved = half_fov - v2_from_view;
    if v2_moved > fov {
        if v2_moved - fov >= span {
            return None;
        }
        v2_from_view = -half_fov;
    }

    Some(SegAngles {
        v1_angle,
        v2_angle,
        v1_from_view,
        v2_from_view,
    })
}

/// Perpendicular distance from the eye to the infinite line through a seg,
/// found from the distance to its start and the angle the normal makes with
/// it
pub fn distance_to_normal(normal: Angle, v1_angle: Angle, dist_to_v1: f32) -> f32 {
    let normal_to_v1 = normal - v1_angle;
    let seg_to_player = Angle::new(90.0) - normal_to_v1;
    (seg_to_player.sin() * dist_to_v1).abs().max(MIN_NORMAL_DIST)
}

/// Wall scale at a column whose ray is `screen_angle` degrees from centre.
///
/// Doom function name `R_ScaleFromGlobalAngle`
pub fn scale_from_view_angle(
    screen_angle: f32,
    view_angle: Angle,
    normal: Angle,
    dist_to_screen: f32,
    dist_to_normal: f32,
) -> f32 {
    let skew = Angle::new(screen_angle) + view_angle - normal;
    let num = dist_to_screen * skew.cos();
    let den = dist_to_normal * screen_angle.to_radians().cos();
    (num / den).clamp(MIN_SCALE, MAX_SCALE)
}
