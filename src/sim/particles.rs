//! Cosmetic particle bursts

use glam::Vec2;
use rand::Rng;

use super::state::Color;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub radius: f32,
    /// Ticks left to live
    pub life: u32,
}

/// Spawn `count` particles at `origin`, each with its own random velocity,
/// color and radius
pub fn burst<R: Rng + ?Sized>(origin: Vec2, count: usize, life: u32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            pos: origin,
            vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)),
            color: Color::rgb(rng.random(), rng.random(), rng.random()),
            radius: rng.random_range(1.0..4.0),
            life,
        })
        .collect()
}

/// Move every particle one tick and drop the expired ones
pub fn advance(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(5);
        let origin = Vec2::new(67.5, 40.0);
        let particles = burst(origin, 10, 30, &mut rng);
        assert_eq!(particles.len(), 10);
        for p in &particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.life, 30);
            assert!(p.vel.x.abs() <= 2.0 && p.vel.y.abs() <= 2.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
        }
    }

    #[test]
    fn test_lifetime_runs_out() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut particles = burst(Vec2::ZERO, 10, 30, &mut rng);
        for _ in 0..29 {
            advance(&mut particles);
        }
        assert_eq!(particles.len(), 10);
        assert!(particles.iter().all(|p| p.life == 1));
        advance(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_advance_integrates_velocity() {
        let mut particles = vec![Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.5, -0.5),
            color: Color::rgb(255, 255, 255),
            radius: 2.0,
            life: 5,
        }];
        advance(&mut particles);
        assert_eq!(particles[0].pos, Vec2::new(11.5, 9.5));
        assert_eq!(particles[0].life, 4);
    }
}
