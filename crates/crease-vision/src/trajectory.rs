//! Bounded ball trajectory with derived velocity and acceleration.
//!
//! Positions are kept in a fixed-capacity FIFO ring. Each new position
//! derives one velocity sample from the previous position, and each new
//! velocity derives one acceleration sample, so once warmed up the three
//! series hold `N`, `N - 1` and `N - 2` samples.

use std::collections::VecDeque;

use crease_models::Position;
use serde::{Deserialize, Serialize};

/// Default number of positions retained.
pub const DEFAULT_CAPACITY: usize = 30;

/// Smallest capacity that still leaves room for one acceleration sample.
const MIN_CAPACITY: usize = 3;

/// One observed ball position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub position: Position,
    pub frame: u64,
}

/// A derived rate (pixels per frame, or pixels per frame squared).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    /// Frame of the later sample the rate was derived from.
    pub frame: u64,
}

impl MotionSample {
    fn between(dx: f64, dy: f64, from_frame: u64, to_frame: u64) -> Self {
        // Zero or backwards frame deltas yield a zero rate.
        let (x, y) = if to_frame > from_frame {
            let df = (to_frame - from_frame) as f64;
            (dx / df, dy / df)
        } else {
            (0.0, 0.0)
        };
        Self {
            x,
            y,
            frame: to_frame,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Bounded ball position history.
///
/// Owned by a single event engine; there is no reset, a new video gets a
/// new buffer.
#[derive(Debug, Clone)]
pub struct TrajectoryBuffer {
    capacity: usize,
    positions: VecDeque<TrajectorySample>,
    velocities: VecDeque<MotionSample>,
    accelerations: VecDeque<MotionSample>,
}

impl Default for TrajectoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TrajectoryBuffer {
    /// Create a buffer holding up to `capacity` positions (at least 3).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            capacity,
            positions: VecDeque::with_capacity(capacity),
            velocities: VecDeque::with_capacity(capacity - 1),
            accelerations: VecDeque::with_capacity(capacity - 2),
        }
    }

    /// Record the ball position for `frame`.
    ///
    /// A missing position leaves the buffer untouched; gaps are not
    /// interpolated. Returns whether a sample was appended.
    pub fn update(&mut self, position: Option<Position>, frame: u64) -> bool {
        let Some(position) = position else {
            return false;
        };

        push_bounded(
            &mut self.positions,
            TrajectorySample { position, frame },
            self.capacity,
        );

        if self.positions.len() >= 2 {
            let prev = self.positions[self.positions.len() - 2];
            let (dx, dy) = prev.position.delta_to(&position);
            let velocity = MotionSample::between(dx, dy, prev.frame, frame);
            push_bounded(&mut self.velocities, velocity, self.capacity - 1);

            if self.velocities.len() >= 2 {
                let v1 = self.velocities[self.velocities.len() - 2];
                let acceleration =
                    MotionSample::between(velocity.x - v1.x, velocity.y - v1.y, v1.frame, velocity.frame);
                push_bounded(&mut self.accelerations, acceleration, self.capacity - 2);
            }
        }

        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn samples(&self) -> &VecDeque<TrajectorySample> {
        &self.positions
    }

    pub fn velocities(&self) -> &VecDeque<MotionSample> {
        &self.velocities
    }

    pub fn accelerations(&self) -> &VecDeque<MotionSample> {
        &self.accelerations
    }

    pub fn latest(&self) -> Option<&TrajectorySample> {
        self.positions.back()
    }

    /// The most recent `n` positions, oldest first (fewer if not yet stored).
    pub fn recent_positions(&self, n: usize) -> Vec<Position> {
        let skip = self.positions.len().saturating_sub(n);
        self.positions.iter().skip(skip).map(|s| s.position).collect()
    }

    /// All stored positions, oldest first.
    pub fn positions(&self) -> Vec<Position> {
        self.positions.iter().map(|s| s.position).collect()
    }
}

fn push_bounded<T>(queue: &mut VecDeque<T>, item: T, capacity: usize) {
    if queue.len() == capacity {
        queue.pop_front();
    }
    queue.push_back(item);
}
