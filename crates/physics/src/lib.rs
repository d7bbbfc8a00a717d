//! Rigid-body world backed by rapier.
//!
//! Implements [`RigidBodyWorld`] for the stack controller. Layers are fixed
//! bodies (mass 0), fragments are dynamic cuboids that fall under gravity and
//! tumble off the stack. No custom simulation happens here; this crate only
//! translates handles, shapes and poses between the controller and rapier.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;
use tracing::{debug, warn};

use stacker_core::{BodyHandle, RigidBodyWorld};
use stacker_types::{BoxShape, Pose, GRAVITY};

pub use stacker_core as core;
pub use stacker_types as types;

/// Smallest half-extent handed to rapier; a perfect drop yields a
/// zero-width fragment, which rapier cannot collide.
pub const MIN_HALF_EXTENT: f32 = 1e-3;

#[derive(Debug, Clone, Copy)]
struct Entry {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

pub struct RapierWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    entries: HashMap<BodyHandle, Entry>,
    next_id: u32,
}

impl RapierWorld {
    /// World with gravity `gravity_y` along y.
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: vector![0.0, gravity_y, 0.0],
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear velocity of a body, if it exists.
    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        let entry = self.entries.get(&handle)?;
        let v = self.bodies.get(entry.body)?.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }

    fn cuboid(shape: BoxShape) -> SharedShape {
        let h = shape.half_extents().max(Vec3::splat(MIN_HALF_EXTENT));
        SharedShape::cuboid(h.x, h.y, h.z)
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(GRAVITY)
    }
}

impl RigidBodyWorld for RapierWorld {
    fn add_body(&mut self, shape: BoxShape, mass: f32, pose: Pose) -> BodyHandle {
        let builder = if mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = self.bodies.insert(builder.position(to_isometry(pose)).build());

        let mut collider = ColliderBuilder::new(Self::cuboid(shape));
        if mass > 0.0 {
            collider = collider.mass(mass);
        }
        let collider =
            self.colliders
                .insert_with_parent(collider.build(), body, &mut self.bodies);

        let handle = BodyHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert(handle, Entry { body, collider });
        debug!(id = handle.0, mass, "body added");
        handle
    }

    fn replace_shape(&mut self, handle: BodyHandle, shape: BoxShape) {
        let Some(entry) = self.entries.get(&handle) else {
            warn!(id = handle.0, "replace_shape on unknown body");
            return;
        };
        if let Some(collider) = self.colliders.get_mut(entry.collider) {
            collider.set_shape(Self::cuboid(shape));
        }
    }

    fn set_body_pose(&mut self, handle: BodyHandle, pose: Pose) {
        let Some(entry) = self.entries.get(&handle) else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(entry.body) {
            body.set_position(to_isometry(pose), true);
        }
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        let Some(entry) = self.entries.remove(&handle) else {
            return;
        };
        self.bodies.remove(
            entry.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn step(&mut self, dt: f32) {
        self.params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        let entry = self.entries.get(&handle)?;
        let body = self.bodies.get(entry.body)?;
        Some(from_isometry(body.position()))
    }
}

fn to_isometry(pose: Pose) -> Isometry3<Real> {
    let p = pose.position;
    let q = pose.orientation;
    Isometry3::from_parts(
        Translation3::new(p.x, p.y, p.z),
        UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

fn from_isometry(iso: &Isometry3<Real>) -> Pose {
    let t = iso.translation.vector;
    let c = iso.rotation.coords;
    Pose {
        position: Vec3::new(t.x, t.y, t.z),
        orientation: Quat::from_xyzw(c.x, c.y, c.z, c.w),
    }
}
