use glam::Vec2;

use crate::{
    math_helpers::{distance, scale_to_length},
    options::{PlaneSize, RunOptions},
};

#[derive(Debug, Clone, Copy)]
pub struct Agent {
    // sequential id starting from 0
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Agent {
    /// Creates a new [`Agent`].
    pub fn new(x: f32, y: f32, velocity: Vec2, id: usize) -> Self {
        Agent {
            id,
            position: Vec2::new(x, y),
            velocity,
        }
    }

    /// Advances the position by one frame's worth of velocity.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Wraps the position back onto the plane.
    ///
    /// Deliberately four independent checks, not an else-if chain or a
    /// modulo: a coordinate sitting exactly on the far edge stays put, only
    /// strictly-outside values wrap, and a negative coordinate snaps to the
    /// far edge itself rather than to `edge - 1`.
    pub fn wrap_edges(&mut self, plane: &PlaneSize) {
        if self.position.x < 0. {
            self.position.x = plane.width;
        }
        if self.position.y < 0. {
            self.position.y = plane.height;
        }
        if self.position.x > plane.width {
            self.position.x = 0.;
        }
        if self.position.y > plane.height {
            self.position.y = 0.;
        }
    }

    /// Evaluates the three flocking rules against `all_agents` and returns
    /// the resulting velocity adjustment.
    ///
    /// Neighbours are every *other* agent (compared by id, not by position)
    /// within `perception_radius` of this agent's current position. All
    /// three sums are averaged over the same neighbour count. A neighbour at
    /// exactly zero distance still counts towards alignment and cohesion but
    /// contributes nothing to separation, where its direction is undefined.
    pub fn run_rules(&self, all_agents: &[Agent], run_options: &RunOptions) -> Vec2 {
        let mut sum_velocity = Vec2::ZERO;
        let mut sum_position = Vec2::ZERO;
        let mut sum_separation = Vec2::ZERO;
        let mut neighbour_count = 0;

        for other in all_agents {
            if other.id == self.id {
                continue;
            }

            let dist = distance(self.position, other.position);

            if dist < run_options.perception_radius {
                sum_velocity += other.velocity;
                sum_position += other.position;

                if dist < run_options.separation_distance {
                    // closer neighbours repel harder; length 1/d
                    if let Some(repulse) =
                        scale_to_length(self.position - other.position, 1. / dist)
                    {
                        sum_separation += repulse;
                    }
                }

                neighbour_count += 1;
            }
        }

        if neighbour_count > 0 {
            sum_velocity /= neighbour_count as f32;
            sum_position /= neighbour_count as f32;
            sum_separation /= neighbour_count as f32;
        }

        // cohesion steers by the raw average neighbour position, not by the
        // offset towards it; kept bit-for-bit with the reference behaviour
        sum_velocity * run_options.alignment_coefficient
            + sum_position * run_options.cohesion_coefficient
            - sum_separation * run_options.separation_coefficient
    }

    pub fn apply_steering(&mut self, steering: Vec2) {
        self.velocity += steering;
    }
}
