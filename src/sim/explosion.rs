//! Death explosion particles
//!
//! The snake body bursts into square particles that fall, slide and bounce
//! around the canvas until their life runs out. Frames are display driven,
//! one call per animation frame, independent of the movement tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Cell;
use crate::consts::*;

/// Which part of the snake a particle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Head,
    Body,
}

impl Tint {
    /// CSS color string matching the snake colors
    pub fn css(&self) -> &'static str {
        match self {
            Tint::Head => "#2b6cb0",
            Tint::Body => "#63b3ed",
        }
    }
}

/// A particle for the death effect (canvas pixel space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames left
    pub life: u32,
    pub max_life: u32,
    pub tint: Tint,
}

impl Particle {
    /// Remaining life as 0-1 (used as alpha)
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }

    fn step(&mut self, bounds: Vec2) {
        self.vel.y += PARTICLE_GRAVITY;
        self.vel *= PARTICLE_FRICTION;
        self.pos += self.vel;

        let max = bounds - Vec2::splat(self.size);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x *= WALL_BOUNCE;
        }
        if self.pos.x > max.x {
            self.pos.x = max.x;
            self.vel.x *= WALL_BOUNCE;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y *= WALL_BOUNCE;
        }
        if self.pos.y > max.y {
            self.pos.y = max.y;
            self.vel.y *= FLOOR_BOUNCE;
        }

        self.life = self.life.saturating_sub(1);
    }
}

/// Result of advancing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing burning
    Idle,
    /// Particles still alive after this frame
    Burning(usize),
    /// Last particle expired on this frame. Reported once per ignition.
    Spent,
}

/// Particle arena. Live particles occupy `particles[..live]`; expired ones
/// are swapped past the end and the storage is reused on the next ignition.
#[derive(Debug, Clone, Default)]
pub struct Explosion {
    particles: Vec<Particle>,
    live: usize,
    /// Canvas size particles bounce inside
    bounds: Vec2,
    frames: u32,
}

impl Explosion {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            particles: Vec::new(),
            live: 0,
            bounds,
            frames: 0,
        }
    }

    /// Burst the first `MAX_EXPLODING_SEGMENTS` cells of `snake` into particles
    pub fn ignite<'a, R: Rng>(
        &mut self,
        snake: impl IntoIterator<Item = &'a Cell>,
        rng: &mut R,
    ) -> usize {
        self.particles.clear();
        self.frames = 0;

        for (i, seg) in snake.into_iter().take(MAX_EXPLODING_SEGMENTS).enumerate() {
            let origin = Vec2::new(seg.x as f32, seg.y as f32) * CELL;
            let tint = if i == 0 { Tint::Head } else { Tint::Body };

            for _ in 0..PARTICLES_PER_SEGMENT {
                let size = f32::from(rng.random_range(6u8..=10));
                let offset = Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * (CELL - size);

                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let speed = 2.0 + rng.random::<f32>() * 5.0;
                let lift = 1.0 + rng.random::<f32>() * 2.0;
                let vel = Vec2::new(angle.cos(), angle.sin()) * speed - Vec2::new(0.0, lift);

                let max_life = rng.random_range(40..60);
                self.particles.push(Particle {
                    pos: origin + offset,
                    vel,
                    size,
                    life: max_life,
                    max_life,
                    tint,
                });
            }
        }

        self.live = self.particles.len();
        log::debug!("Explosion ignited with {} particles", self.live);
        self.live
    }

    /// Simulate one frame and drop expired particles
    pub fn advance_frame(&mut self) -> FrameStatus {
        if self.live == 0 {
            return FrameStatus::Idle;
        }

        self.frames += 1;
        let mut i = 0;
        while i < self.live {
            self.particles[i].step(self.bounds);
            if self.particles[i].life == 0 {
                self.live -= 1;
                self.particles.swap(i, self.live);
            } else {
                i += 1;
            }
        }

        if self.live == 0 {
            log::debug!("Explosion spent after {} frames", self.frames);
            FrameStatus::Spent
        } else {
            FrameStatus::Burning(self.live)
        }
    }

    /// Drop all particles immediately
    pub fn clear(&mut self) {
        self.particles.clear();
        self.live = 0;
        self.frames = 0;
    }

    /// Live particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.live]
    }

    pub fn is_active(&self) -> bool {
        self.live > 0
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
