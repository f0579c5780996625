use glam::Vec2;
use math::Angle;

use crate::MapData;

/// Eye height above the floor of the sector the player stands in
pub const VIEWHEIGHT: f32 = 41.0;

/// One step of player input. The binary maps keys to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementCommand {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
}

/// The camera pose. There is no collision or momentum, a move is applied
/// directly to the position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub xy: Vec2,
    /// Focal origin, `VIEWHEIGHT` above the floor
    pub viewz: f32,
    /// Facing, 0 is east, counter-clockwise
    pub angle: Angle,
    pub fov: Angle,
    /// Map units per forward/backward step
    pub move_speed: f32,
    /// Degrees per rotate step
    pub rotation_speed: f32,
}

impl Player {
    pub fn new(xy: Vec2, angle: Angle, fov: Angle) -> Player {
        Player {
            xy,
            viewz: VIEWHEIGHT,
            angle,
            fov,
            move_speed: 8.0,
            rotation_speed: 4.0,
        }
    }

    /// Place the player on the first thing of type `kind`, at eye height
    /// over the floor there. `None` if the map has no such thing.
    pub fn spawn(map: &MapData, kind: u16, fov: Angle) -> Option<Player> {
        let (xy, angle) = map.player_start(kind)?;
        let mut player = Player::new(xy, angle, fov);
        player.update_viewz(map);
        Some(player)
    }

    pub fn update_viewz(&mut self, map: &MapData) {
        if let Some(sector) = map.sector_at(self.xy) {
            self.viewz = sector.floorheight + VIEWHEIGHT;
        }
    }

    /// P_Thrust
    /// Moves the player along a given angle.
    fn thrust(&mut self, angle: Angle, mv: f32) {
        self.xy += angle.unit() * mv;
    }

    pub fn apply(&mut self, cmd: MovementCommand) {
        match cmd {
            MovementCommand::Forward => self.thrust(self.angle, self.move_speed),
            MovementCommand::Backward => self.thrust(self.angle, -self.move_speed),
            MovementCommand::RotateLeft => self.angle += self.rotation_speed,
            MovementCommand::RotateRight => self.angle -= self.rotation_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_maps;
    use wad::WadData;

    #[test]
    fn moves_along_heading() {
        let mut p = Player::new(Vec2::new(128.0, 128.0), Angle::new(90.0), Angle::new(90.0));
        p.apply(MovementCommand::Forward);
        assert!((p.xy - Vec2::new(128.0, 136.0)).length() < 0.001);
        p.apply(MovementCommand::Backward);
        p.apply(MovementCommand::Backward);
        assert!((p.xy - Vec2::new(128.0, 120.0)).length() < 0.001);
    }

    #[test]
    fn rotation_wraps() {
        let mut p = Player::new(Vec2::ZERO, Angle::new(2.0), Angle::new(90.0));
        p.apply(MovementCommand::RotateRight);
        assert_eq!(p.angle, 358.0);
        p.apply(MovementCommand::RotateLeft);
        p.apply(MovementCommand::RotateLeft);
        assert_eq!(p.angle, 6.0);
    }

    #[test]
    fn spawn_at_eye_height() {
        let wad = WadData::from_bytes(test_maps::square_room()).unwrap();
        let map = MapData::load(test_maps::SQUARE_MAP, &wad).unwrap();
        let p = Player::spawn(&map, 1, Angle::new(90.0)).unwrap();
        assert_eq!(p.xy, Vec2::new(128.0, 128.0));
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.viewz, 41.0);
        assert!(Player::spawn(&map, 2, Angle::new(90.0)).is_none());
    }
}
