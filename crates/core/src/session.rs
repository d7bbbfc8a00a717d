//! Stack session - the stack controller.
//!
//! Owns the layers, the falling fragments and both collaborators. The host
//! drives it from a single frame loop: `activate()` on user input, `tick(dt)`
//! once per presented frame, `resize()` on viewport changes.
//!
//! A finished session is never reset in place. Restarting means building a
//! new `StackSession` with fresh collaborators.

use glam::Vec3;
use tracing::{debug, info};

use crate::camera::{CameraRig, OrthoProjection};
use crate::collab::{RigidBodyWorld, SceneSurface};
use crate::config::StackerConfig;
use crate::cut::{self, Cut, CutOutcome};
use crate::layer::{Fragment, Layer, LayerState};
use crate::snapshot::{GameOverReason, SessionEvent, StatusSnapshot};
use crate::types::{layer_hue, Axis, Extent, Phase, Pose};

/// Result of a `place()` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceOutcome {
    /// The session is not running.
    Ignored,
    /// No overlap; the session is now over.
    Missed { overlap: f32 },
    Placed(Cut),
}

/// Result of a `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing gameplay-related moved.
    Idle,
    Advanced,
    /// The moving layer slid out of reach; the session is now over.
    Drifted,
}

/// Result of an `activate()` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Started,
    Place(PlaceOutcome),
    Ignored,
}

pub struct StackSession<S, W> {
    config: StackerConfig,
    scene: S,
    world: W,
    phase: Phase,
    layers: Vec<Layer>,
    fragments: Vec<Fragment>,
    camera: CameraRig,
    projection: OrthoProjection,
    score: u32,
    last_event: Option<SessionEvent>,
}

impl<S: SceneSurface, W: RigidBodyWorld> StackSession<S, W> {
    /// Build a session with its base layer in place.
    pub fn new(config: StackerConfig, scene: S, world: W) -> Self {
        let camera = CameraRig::new(config.camera_offset);
        let projection = OrthoProjection::from_viewport(config.frustum_size, 1, 1);
        let base = Extent::new(config.box_size, config.box_size);

        let mut session = Self {
            config,
            scene,
            world,
            phase: Phase::NotStarted,
            layers: Vec::new(),
            fragments: Vec::new(),
            camera,
            projection,
            score: 0,
            last_event: None,
        };

        session.scene.set_projection(projection, 1, 1);
        session.scene.set_camera(camera.eye(), camera.target());
        // The base sits on z so that the first moving layer slides along x.
        session.push_layer(Vec3::ZERO, base, Axis::Z, LayerState::Base);
        session
    }

    /// Begin play. Only effective once, from `NotStarted`.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Running;

        let base = &self.layers[0];
        let axis = base.axis.other();
        let extent = base.extent;
        let mut origin = base.position;
        axis.set(&mut origin, -self.config.spawn_offset);
        self.push_layer(origin, extent, axis, LayerState::Moving);

        self.last_event = Some(SessionEvent::Started);
        info!(axis = axis.as_str(), "session started");
        true
    }

    /// Single user-input entry point: start, then place.
    pub fn activate(&mut self) -> Activation {
        match self.phase {
            Phase::NotStarted => {
                self.start();
                Activation::Started
            }
            Phase::Running => Activation::Place(self.place()),
            Phase::GameOver => Activation::Ignored,
        }
    }

    /// Advance one presented frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        match self.phase {
            Phase::NotStarted => return TickOutcome::Idle,
            // Pieces already in flight keep falling after the end.
            Phase::GameOver => {
                self.step_world();
                return TickOutcome::Idle;
            }
            Phase::Running => {}
        }

        let step = self.config.motion.step(dt);

        if let Some(top) = self.layers.last_mut().filter(|l| l.is_moving()) {
            let axis = top.axis;
            let moved = axis.of(top.position) + step;
            axis.set(&mut top.position, moved);
            let pose = top.pose();
            self.scene.set_pose(top.visual, pose);
            self.world.set_body_pose(top.body, pose);
        }

        let target_y = self.camera_target();
        if self.camera.climb_toward(target_y, step) {
            self.scene.set_camera(self.camera.eye(), self.camera.target());
        }

        self.step_world();

        if self.config.drift_check && self.drifted() {
            self.finish(GameOverReason::Drift);
            return TickOutcome::Drifted;
        }

        TickOutcome::Advanced
    }

    /// Drop the moving layer onto the one below.
    pub fn place(&mut self) -> PlaceOutcome {
        if self.phase != Phase::Running || self.layers.len() < 2 {
            return PlaceOutcome::Ignored;
        }

        let n = self.layers.len();
        let cut = match cut::resolve(&self.layers[n - 2], &self.layers[n - 1]) {
            CutOutcome::Miss { overlap, .. } => {
                self.finish(GameOverReason::Miss);
                return PlaceOutcome::Missed { overlap };
            }
            CutOutcome::Cut(cut) => cut,
        };

        let height = self.config.box_height;
        let top = &mut self.layers[n - 1];
        let axis = top.axis;
        let untrimmed = top.extent;

        top.extent = untrimmed.with_along(axis, cut.overlap);
        axis.set(&mut top.position, cut.kept_center);
        top.state = LayerState::Placed;

        let shape = top.shape(height);
        let pose = top.pose();
        self.scene.set_shape(top.visual, shape);
        self.scene.set_pose(top.visual, pose);
        self.world.replace_shape(top.body, shape);
        self.world.set_body_pose(top.body, pose);

        let kept_extent = top.extent;
        let kept_position = top.position;
        let hue = layer_hue(top.index);

        let mut fragment_position = kept_position;
        axis.set(&mut fragment_position, cut.fragment_center);
        self.spawn_fragment(
            Pose::at(fragment_position),
            untrimmed.with_along(axis, cut.overhang),
            axis,
            hue,
        );

        let next_axis = axis.other();
        let mut origin = kept_position;
        next_axis.set(&mut origin, -self.config.spawn_offset);
        self.push_layer(origin, kept_extent, next_axis, LayerState::Moving);

        self.score += 1;
        self.last_event = Some(SessionEvent::Placed {
            score: self.score,
            axis,
            overlap: cut.overlap,
            overhang: cut.overhang,
        });
        info!(
            score = self.score,
            axis = axis.as_str(),
            overlap = cut.overlap,
            overhang = cut.overhang,
            "layer placed"
        );

        PlaceOutcome::Placed(cut)
    }

    /// Recompute the projection for a `width` x `height` output.
    pub fn resize(&mut self, width: u32, height: u32) -> OrthoProjection {
        self.projection = OrthoProjection::from_viewport(self.config.frustum_size, width, height);
        self.scene.set_projection(self.projection, width, height);
        debug!(width, height, "viewport resized");
        self.projection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The topmost layer (the moving one while running).
    pub fn top(&self) -> &Layer {
        // The base layer is pushed in `new`, so the stack is never empty.
        &self.layers[self.layers.len() - 1]
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn projection(&self) -> OrthoProjection {
        self.projection
    }

    pub fn config(&self) -> &StackerConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Direct access to the world, e.g. to inject state in tests.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            phase: self.phase,
            score: self.score,
            layers: self.layers.len() as u32,
            fragments: self.fragments.len() as u32,
            camera_y: self.camera.height(),
        }
    }

    /// Take and clear the last status transition.
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    #[cfg(test)]
    pub(crate) fn top_mut(&mut self) -> &mut Layer {
        let n = self.layers.len();
        &mut self.layers[n - 1]
    }

    fn push_layer(&mut self, origin: Vec3, extent: Extent, axis: Axis, state: LayerState) {
        let index = self.layers.len();
        let position = Vec3::new(origin.x, self.config.box_height * index as f32, origin.z);
        let pose = Pose::at(position);
        let shape = extent.to_box(self.config.box_height);

        let visual = self.scene.add_visual(shape, pose, layer_hue(index));
        let body = self.world.add_body(shape, 0.0, pose);

        self.layers.push(Layer {
            index,
            position,
            extent,
            axis,
            state,
            visual,
            body,
        });
    }

    fn spawn_fragment(&mut self, pose: Pose, extent: Extent, cut_axis: Axis, hue: f32) {
        let shape = extent.to_box(self.config.box_height);
        let visual = self.scene.add_visual(shape, pose, hue);
        let body = self
            .world
            .add_body(shape, self.config.fragment_mass, pose);

        debug!(
            x = pose.position.x,
            y = pose.position.y,
            z = pose.position.z,
            size = extent.along(cut_axis),
            "fragment spawned"
        );

        self.fragments.push(Fragment {
            pose,
            extent,
            cut_axis,
            visual,
            body,
        });
    }

    fn step_world(&mut self) {
        self.world.step(self.config.physics_step);

        for fragment in &mut self.fragments {
            if let Some(pose) = self.world.pose(fragment.body) {
                fragment.pose = pose;
                self.scene.set_pose(fragment.visual, pose);
            }
        }

        let floor = self.layers[0].position.y - self.config.prune_depth;
        let scene = &mut self.scene;
        let world = &mut self.world;
        self.fragments.retain(|fragment| {
            if fragment.pose.position.y >= floor {
                return true;
            }
            scene.remove_visual(fragment.visual);
            world.remove_body(fragment.body);
            debug!(y = fragment.pose.position.y, "fragment pruned");
            false
        });
    }

    fn camera_target(&self) -> f32 {
        self.config.box_height * (self.layers.len() as f32 - 2.0) + self.config.camera_offset
    }

    /// Whether the moving layer has slid past any possible overlap.
    fn drifted(&self) -> bool {
        let n = self.layers.len();
        if n < 2 || !self.layers[n - 1].is_moving() {
            return false;
        }
        let (previous, moving) = (&self.layers[n - 2], &self.layers[n - 1]);
        let axis = moving.axis;
        let delta = axis.of(moving.position) - axis.of(previous.position);
        delta > previous.extent.along(axis) + self.config.drift_tolerance
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.phase = Phase::GameOver;
        self.last_event = Some(SessionEvent::GameOver {
            score: self.score,
            reason,
        });
        info!(score = self.score, ?reason, "game over");
    }
}
