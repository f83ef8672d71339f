//! Pairwise contact resolution between equal-radius balls.
//!
//! Every unordered pair is visited once per tick in storage order. A contact
//! is corrected in a single pass: overlapping balls are pushed apart along
//! the line between their centers and their velocities are mirrored about
//! that line. There is no iteration, so a ball touching two others can be
//! corrected twice in one tick.

use bevy::log::trace;
use bevy::math::Vec2;

use super::world::{Body, World};

/// Geometry of a single overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body toward the second.
    pub normal: Vec2,
    pub overlap: f32,
}

impl World {
    /// Resolve every overlapping pair. Returns the number of contacts found.
    pub fn resolve_collisions(&mut self) -> usize {
        let min_separation = self.config.min_separation();
        let mut contacts = 0;
        for i in 0..self.bodies.len() {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if resolve_pair(a, b, min_separation).is_some() {
                    contacts += 1;
                }
            }
        }
        if contacts > 0 {
            trace!("resolved {contacts} contacts");
        }
        contacts
    }
}

/// Overlap test for two centers. Coincident centers report no contact since
/// there is no direction to separate along.
pub fn detect(a: Vec2, b: Vec2, min_separation: f32) -> Option<Contact> {
    let displacement = b - a;
    let distance = displacement.length();
    if distance >= min_separation {
        return None;
    }
    let normal = displacement.try_normalize()?;
    Some(Contact {
        normal,
        overlap: min_separation - distance,
    })
}

/// Separate and reflect one pair. Only free bodies move; when both are
/// held neither is touched and they may interpenetrate.
pub fn resolve_pair(a: &mut Body, b: &mut Body, min_separation: f32) -> Option<Contact> {
    let contact = detect(a.position, b.position, min_separation)?;
    let Contact { normal, overlap } = contact;

    match (a.held, b.held) {
        (true, false) => {
            b.position += normal * overlap;
            b.velocity = reflect(b.velocity, normal);
        }
        (false, true) => {
            a.position -= normal * overlap;
            a.velocity = reflect(a.velocity, normal);
        }
        (false, false) => {
            let push = normal * overlap * 0.5;
            a.position -= push;
            b.position += push;
            a.velocity = reflect(a.velocity, normal);
            b.velocity = reflect(b.velocity, normal);
        }
        (true, true) => {}
    }
    Some(contact)
}

/// Mirror `v` about the plane with unit normal `n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}
