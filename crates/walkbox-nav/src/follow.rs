use crate::{NavPath, Vec2};

/// Outcome of one [`PathFollower::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowStep {
    pub position: Vec2,
    pub arrived: bool,
}

/// Walks an agent along a [`NavPath`] at a fixed speed.
///
/// The first waypoint is treated as the agent's starting position; movement heads for
/// `points[1]`, then each later waypoint in turn.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: NavPath,
    speed: f32,
    next_index: usize,
}

impl PathFollower {
    pub fn new(path: NavPath, speed: f32) -> Self {
        Self {
            path,
            speed,
            next_index: 1,
        }
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    /// Waypoint the agent is currently heading for.
    pub fn target(&self) -> Option<Vec2> {
        self.path.points.get(self.next_index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.points.len()
    }

    /// Move from `position` by `speed * dt` along the remaining waypoints.
    pub fn advance(&mut self, position: Vec2, dt: f32) -> FollowStep {
        let mut remaining = self.speed.max(0.0) * dt.max(0.0);

        let mut current = position;
        while self.next_index < self.path.points.len() && remaining > 0.0 {
            let target = self.path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= 0.0 {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        // Zero-length tail segments count as reached even without movement budget.
        while let Some(target) = self.target() {
            if target != current {
                break;
            }
            self.next_index += 1;
        }

        FollowStep {
            position: current,
            arrived: self.is_finished(),
        }
    }
}
