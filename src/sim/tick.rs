//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one tick. All constants are
//! per-tick quantities, so there is no dt parameter - the host loop owns the
//! frame cadence.

use rand::Rng;

use super::collision::{bird_hits_obstacle, bird_out_of_bounds};
use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The one activation gesture (click/tap/space). Meaning depends on
    /// phase: start when `NotStarted`, flap when `Running`, reset when
    /// `Over`. Always a no-op where the phase doesn't permit it.
    pub activate: bool,
}

/// Advance the game state by one tick, returning the events this tick
/// produced for the audio/UI layer.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.activate {
        match state.phase {
            GamePhase::NotStarted => {
                // Transition only; physics begins next tick
                state.start();
                return events;
            }
            GamePhase::Running => {
                if state.apply_impulse() {
                    events.push(GameEvent::Flapped);
                }
            }
            GamePhase::Over => {
                state.reset();
                return events;
            }
        }
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;

    // Gravity, semi-implicit Euler: velocity first, then position
    state.bird.vel_y += GRAVITY;
    state.bird.pos.y += state.bird.vel_y;

    // Periodic spawn at the right edge with a vertically-random gap
    state.spawn_timer += 1;
    if state.spawn_timer >= SPAWN_INTERVAL_TICKS {
        state.spawn_timer = 0;
        let max_top = FIELD_HEIGHT - GAP_HEIGHT - MIN_GAP_MARGIN;
        let gap_top = state.rng.random_range(MIN_GAP_MARGIN..=max_top);
        state.obstacles.push(Obstacle::new(FIELD_WIDTH, gap_top));
    }

    // Scroll, collide, and score every live obstacle in creation order.
    // Off-screen removal happens after, so an obstacle still gets its
    // collision/scoring checks on its final tick.
    let bird = state.bird;
    let mut collided = false;
    let mut scored = 0u32;
    for obstacle in &mut state.obstacles {
        obstacle.x -= SCROLL_SPEED;

        if bird_hits_obstacle(&bird, obstacle) {
            collided = true;
        }

        if !obstacle.passed && obstacle.right() < bird.pos.x {
            obstacle.passed = true;
            state.score += 1;
            scored += 1;
        }
    }
    // Stable removal - retain preserves creation order among survivors
    state.obstacles.retain(|o| !o.is_offscreen());

    if collided || bird_out_of_bounds(&state.bird) {
        // Exactly one terminal event, even with multiple simultaneous hits
        state.phase = GamePhase::Over;
        events.push(GameEvent::GameOver);
    } else {
        for _ in 0..scored {
            events.push(GameEvent::Scored);
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A state mid-flight with nothing on screen
    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::Running;
        state
    }

    /// Pin the bird mid-field so gravity can't end the session
    fn hold_bird(state: &mut GameState) {
        state.bird.pos.y = FIELD_HEIGHT / 2.0;
        state.bird.vel_y = 0.0;
    }

    #[test]
    fn test_not_started_tick_is_noop() {
        let mut state = GameState::new(1);
        let before = state.bird;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.bird, before);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_activate_starts_without_moving() {
        let mut state = GameState::new(1);
        let events = tick(&mut state, &TickInput { activate: true });
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        // The start tick itself doesn't advance physics
        assert_eq!(state.bird.vel_y, 0.0);
        assert_eq!(state.bird.pos.y, FIELD_HEIGHT / 2.0);
    }

    #[test]
    fn test_gravity_exact_arithmetic() {
        // From rest at y=240: one tick gives v=0.5, y=240.5
        let mut state = running_state();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.vel_y, 0.5);
        assert_eq!(state.bird.pos.y, 240.5);

        // Flap then tick: snap to -8, gravity brings it to -7.5,
        // position moves by the post-update velocity
        let events = tick(&mut state, &TickInput { activate: true });
        assert_eq!(events, vec![GameEvent::Flapped]);
        assert_eq!(state.bird.vel_y, -7.5);
        assert_eq!(state.bird.pos.y, 240.5 - 7.5);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = running_state();
        for t in 1..=250u32 {
            hold_bird(&mut state);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.obstacles.len() as u32, t / SPAWN_INTERVAL_TICKS);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_spawned_gap_within_margins() {
        let mut state = running_state();
        for _ in 0..20 {
            state.spawn_timer = SPAWN_INTERVAL_TICKS - 1;
            hold_bird(&mut state);
            tick(&mut state, &TickInput::default());
            let obstacle = state.obstacles.last().unwrap();
            assert!(obstacle.gap_top >= MIN_GAP_MARGIN);
            assert!(obstacle.gap_top <= FIELD_HEIGHT - GAP_HEIGHT - MIN_GAP_MARGIN);
            assert_eq!(obstacle.gap_bottom - obstacle.gap_top, GAP_HEIGHT);
            state.obstacles.clear();
        }
    }

    #[test]
    fn test_score_exactly_once_per_obstacle() {
        let mut state = running_state();
        // Gap centered on the held bird so it never collides
        let gap_top = FIELD_HEIGHT / 2.0 - GAP_HEIGHT / 2.0;
        state.obstacles.push(Obstacle::new(150.0, gap_top));

        let mut scored_events = 0;
        for _ in 0..120 {
            hold_bird(&mut state);
            let events = tick(&mut state, &TickInput::default());
            scored_events += events
                .iter()
                .filter(|e| **e == GameEvent::Scored)
                .count();
        }
        assert_eq!(state.score, 1);
        assert_eq!(scored_events, 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_score_fires_the_tick_trailing_edge_passes() {
        let mut state = running_state();
        let gap_top = FIELD_HEIGHT / 2.0 - GAP_HEIGHT / 2.0;
        // Trailing edge lands exactly at bird x after one scroll step, which
        // is not yet "past"; the point comes one tick later
        state.obstacles
            .push(Obstacle::new(BIRD_X - OBSTACLE_WIDTH + SCROLL_SPEED, gap_top));

        hold_bird(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);

        hold_bird(&mut state);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert!(events.contains(&GameEvent::Scored));
    }

    #[test]
    fn test_collision_sets_over_on_exact_tick() {
        let mut state = running_state();
        // Obstacle overlapping the bird's x-span, gap well below the bird
        state.obstacles.push(Obstacle::new(BIRD_X - 10.0, 300.0));
        state.bird.pos.y = 100.0; // above the gap → inside the top pipe
        state.bird.vel_y = 0.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(events, vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_bird_in_gap_survives() {
        let mut state = running_state();
        let gap_top = FIELD_HEIGHT / 2.0 - GAP_HEIGHT / 2.0;
        state.obstacles.push(Obstacle::new(BIRD_X - 10.0, gap_top));
        hold_bird(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_floor_ends_the_run() {
        let mut state = running_state();
        state.bird.pos.y = FIELD_HEIGHT - BIRD_RADIUS;
        state.bird.vel_y = 0.0;
        // One more gravity step pushes the bottom edge past the floor
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(events, vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_over_ticks_are_inert() {
        let mut state = running_state();
        state.bird.pos.y = -100.0; // force out of bounds
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::GameOver]);

        // Frozen from here on: no movement, no spawns, no repeat event
        let frozen = state.bird;
        let obstacle_count = state.obstacles.len();
        for _ in 0..200 {
            let events = tick(&mut state, &TickInput::default());
            assert!(events.is_empty());
        }
        assert_eq!(state.bird, frozen);
        assert_eq!(state.obstacles.len(), obstacle_count);
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_activate_from_over_resets() {
        let mut state = running_state();
        state.bird.pos.y = -100.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over);

        let events = tick(&mut state, &TickInput { activate: true });
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.bird.pos.y, FIELD_HEIGHT / 2.0);

        // Next activation starts a fresh run
        tick(&mut state, &TickInput { activate: true });
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_removal_preserves_creation_order() {
        let mut state = running_state();
        let gap_top = FIELD_HEIGHT / 2.0 - GAP_HEIGHT / 2.0;
        // First obstacle about to scroll off, two more behind it
        state.obstacles.push(Obstacle::new(-OBSTACLE_WIDTH + 1.0, gap_top));
        state.obstacles.push(Obstacle::new(300.0, gap_top));
        state.obstacles.push(Obstacle::new(500.0, gap_top));
        state.obstacles[0].passed = true;

        hold_bird(&mut state);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.obstacles.len(), 2);
        assert!(state.obstacles[0].x < state.obstacles[1].x);
        assert_eq!(state.obstacles[0].x, 300.0 - SCROLL_SPEED);
    }

    #[test]
    fn test_death_tick_suppresses_scored_events() {
        let mut state = running_state();
        // One obstacle being passed this tick, another one killing the bird
        let gap_top = FIELD_HEIGHT / 2.0 - GAP_HEIGHT / 2.0;
        state.obstacles
            .push(Obstacle::new(BIRD_X - OBSTACLE_WIDTH - 1.0, gap_top));
        state.obstacles.push(Obstacle::new(BIRD_X - 10.0, 300.0));
        state.bird.pos.y = 100.0;
        state.bird.vel_y = 0.0;

        let events = tick(&mut state, &TickInput::default());
        // Counter still moved, but the tick reports only the terminal event
        assert_eq!(state.score, 1);
        assert_eq!(events, vec![GameEvent::GameOver]);
    }

    proptest! {
        /// Velocity rises by exactly the gravity constant each surviving
        /// tick, and position moves by the post-update velocity.
        #[test]
        fn prop_semi_implicit_euler(initial_vel in -8.0f32..0.0) {
            let mut state = running_state();
            state.bird.vel_y = initial_vel;
            for _ in 0..10 {
                let prev_vel = state.bird.vel_y;
                let prev_y = state.bird.pos.y;
                tick(&mut state, &TickInput::default());
                if state.phase != GamePhase::Running {
                    break;
                }
                prop_assert_eq!(state.bird.vel_y, prev_vel + GRAVITY);
                prop_assert_eq!(state.bird.pos.y, prev_y + state.bird.vel_y);
            }
        }

        /// Obstacle count after T held ticks is floor(T / spawn interval),
        /// as long as nothing has despawned yet.
        #[test]
        fn prop_spawn_count(ticks in 1u32..250) {
            let mut state = running_state();
            for _ in 0..ticks {
                hold_bird(&mut state);
                tick(&mut state, &TickInput::default());
            }
            prop_assert_eq!(
                state.obstacles.len() as u32,
                ticks / SPAWN_INTERVAL_TICKS
            );
        }

        /// The bird's x never changes, whatever the input stream does.
        #[test]
        fn prop_bird_x_fixed(activations in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut state = GameState::new(99);
            for activate in activations {
                tick(&mut state, &TickInput { activate });
                prop_assert_eq!(state.bird.pos.x, BIRD_X);
            }
        }
    }
}
