//! Simulated hand tracker standing in for a camera and landmark model.
//!
//! The simulator runs on its own thread at a detector-like cadence and emits
//! one landmark frame per tick over a channel. Pointer input from the window
//! positions the wrist and sets how far the fingers reach: higher on screen
//! is a more open hand.

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use zen_core::{FINGERTIP_LANDMARKS, HAND_LANDMARK_COUNT, OPENNESS_MAX_OPEN, OPENNESS_MIN_CLOSED};

/// One processed video frame; `None` when no hand is in view.
pub type LandmarkFrame = Option<Vec<Vec3>>;

const FINGER_FAN: f32 = 0.3; // radians between neighbouring fingers
const TIP_JITTER: f32 = 0.004;

/// Raw input forwarded from the window.
#[derive(Clone, Debug)]
pub enum SimInput {
    /// Pointer in normalized window coordinates, origin top-left.
    Pointer { x: f32, y: f32 },
    ToggleVisible,
}

pub struct HandSimulator {
    rx: Receiver<SimInput>,
    period: Duration,
    visible: bool,
    wrist: Vec2,
    openness: f32,
}

impl HandSimulator {
    pub fn new(rx: Receiver<SimInput>, hz: f32, visible: bool) -> Self {
        Self {
            rx,
            period: Duration::from_secs_f32(1.0 / hz.max(1.0)),
            visible,
            wrist: Vec2::new(0.5, 0.7),
            openness: 0.5,
        }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => {
                self.wrist = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
                self.openness = 1.0 - self.wrist.y;
            }
            SimInput::ToggleVisible => {
                self.visible = !self.visible;
                log::info!("[tracker] hand {}", if self.visible { "shown" } else { "hidden" });
            }
        }
    }

    pub fn run(mut self, tx: Sender<LandmarkFrame>) {
        let mut rng = rand::thread_rng();
        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(input) => self.apply(input),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
            let frame = self
                .visible
                .then(|| synth_landmarks(self.wrist, self.openness, &mut rng));
            if tx.send(frame).is_err() {
                return;
            }
            thread::sleep(self.period);
        }
    }
}

/// Spawn the simulator; returns its input sender and the landmark stream.
pub fn spawn_hand_simulator(
    hz: f32,
    visible: bool,
) -> anyhow::Result<(Sender<SimInput>, Receiver<LandmarkFrame>)> {
    let (input_tx, input_rx) = mpsc::channel();
    let (frame_tx, frame_rx) = mpsc::channel();
    let sim = HandSimulator::new(input_rx, hz, visible);
    thread::Builder::new()
        .name("hand-simulator".into())
        .spawn(move || sim.run(frame_tx))?;
    Ok((input_tx, frame_rx))
}

/// Build a 21-point hand whose mean fingertip reach encodes `openness`.
///
/// Fingers fan upward from the wrist (image y grows downward) with four
/// evenly spaced joints each, ending at the fingertip landmark.
pub fn synth_landmarks(wrist: Vec2, openness: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    let span = OPENNESS_MAX_OPEN - OPENNESS_MIN_CLOSED;
    let reach = OPENNESS_MIN_CLOSED + openness.clamp(0.0, 1.0) * span;
    let mut points = vec![wrist.extend(0.0); HAND_LANDMARK_COUNT];
    for (finger, &tip) in FINGERTIP_LANDMARKS.iter().enumerate() {
        let angle = -FRAC_PI_2 + (finger as f32 - 2.0) * FINGER_FAN;
        let dir = Vec2::new(angle.cos(), angle.sin());
        for joint in 1..=4 {
            let along = reach * joint as f32 / 4.0;
            let jitter = rng.gen_range(-TIP_JITTER..TIP_JITTER);
            points[tip - 4 + joint] = (wrist + dir * (along + jitter)).extend(0.0);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use zen_core::extract;

    #[test]
    fn synthetic_hand_round_trips_openness() {
        let mut rng = StdRng::seed_from_u64(1);
        for openness in [0.0f32, 0.25, 0.5, 0.9] {
            let hand = synth_landmarks(Vec2::new(0.5, 0.7), openness, &mut rng);
            assert_eq!(hand.len(), HAND_LANDMARK_COUNT);
            let sample = extract(Some(hand.as_slice())).unwrap();
            assert!(sample.detected);
            assert!((sample.openness - openness).abs() < 0.03, "{openness}");
            assert_eq!(sample.position, Vec2::new(0.5, 0.7));
        }
    }

    #[test]
    fn simulator_emits_frames_and_honours_visibility() {
        let (tx, rx) = spawn_hand_simulator(200.0, false).unwrap();
        let first = rx.recv().unwrap();
        assert!(first.is_none());
        tx.send(SimInput::ToggleVisible).unwrap();
        let shown = rx.iter().find(|f| f.is_some()).flatten().unwrap();
        assert_eq!(shown.len(), HAND_LANDMARK_COUNT);
    }
}
