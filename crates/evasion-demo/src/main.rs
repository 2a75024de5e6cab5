#![forbid(unsafe_code)]

//! Evasion headless demo.
//!
//! Mounts an invitation prompt in a simulated 400×300 arena and sweeps a
//! pointer across it, chasing the decline control. Every dodge prints the
//! taunt that would be shown.
//!
//! # Running
//!
//! ```sh
//! cargo run -p evasion-demo -- [policy.toml|policy.json]
//! RUST_LOG=debug cargo run -p evasion-demo
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use evasion::prelude::*;
use evasion::{Duration, RngSource, TauntLadder};

const ARENA: Rect = Rect::new(40.0, 40.0, 400.0, 300.0);
const DECLINE_START: Rect = Rect::new(300.0, 250.0, 100.0, 40.0);
const STEP: Duration = Duration::from_millis(60);
const STEPS: u32 = 40;
const SEED: u64 = 0x5eed;

fn main() -> Result<()> {
    evasion::core::logging::init_pretty();

    let policy = match std::env::args_os().nth(1) {
        Some(path) => evasion::load_policy(path)?,
        None => EvasionPolicy::default(),
    };
    tracing::info!(policy = %policy.to_jsonl(), "policy loaded");

    let arena = BoxHandle::mounted(ARENA);
    let decline = BoxHandle::mounted(DECLINE_START);
    let prompt = Rc::new(RefCell::new(InvitationPrompt::new(
        TauntLadder::from_policy(&policy.taunts),
    )));
    let button = Rc::new(RefCell::new(
        EvasiveButton::with_rng(
            EvasiveButtonConfig::from(&policy),
            arena,
            decline,
            RngSource::seeded(SEED),
        )
        .on_dodge(InvitationPrompt::dodge_handler(&prompt)),
    ));

    let feed = PointerFeed::new();
    let _subscription = EvasiveButton::attach(&button, &feed);

    let mut now = Instant::now();
    let mut shown = 0;
    for step in 0..STEPS {
        let target = decline_center(&button.borrow());
        let pointer = approach(step, target);
        feed.dispatch(&PointerEvent::moved(pointer.x, pointer.y), now);
        report(&button.borrow(), &prompt.borrow(), &mut shown);
        now += STEP;
    }

    // Finish with a tap on the decline control, then give in.
    let target = decline_center(&button.borrow());
    feed.dispatch(&PointerEvent::touch_start(target.x, target.y), now + STEP * 10);
    report(&button.borrow(), &prompt.borrow(), &mut shown);

    let mut prompt = prompt.borrow_mut();
    prompt.accept();
    println!(
        "accepted after {} dodges ({:?})",
        prompt.dodges(),
        prompt.response()
    );
    Ok(())
}

/// Current center of the decline control, wherever it was last moved.
fn decline_center(button: &EvasiveButton) -> Point {
    button.placed_bounds().unwrap_or(DECLINE_START).center()
}

/// Print a line for each dodge not shown yet.
fn report(button: &EvasiveButton, prompt: &InvitationPrompt, shown: &mut u32) {
    if prompt.dodges() == *shown {
        return;
    }
    *shown = prompt.dodges();
    let offset = button.placement().unwrap_or(Point::ORIGIN);
    println!(
        "dodge #{:>2} -> ({:>5.1}, {:>5.1})  {}",
        *shown,
        offset.x,
        offset.y,
        prompt.taunt().unwrap_or_default()
    );
}

/// Pointer position for `step`: alternate corners of the arena, closing in
/// on the decline control every other step.
fn approach(step: u32, target: Point) -> Point {
    if step % 2 == 0 {
        let corner = match (step / 2) % 4 {
            0 => ARENA.origin(),
            1 => Point::new(ARENA.right(), ARENA.top()),
            2 => Point::new(ARENA.right(), ARENA.bottom()),
            _ => Point::new(ARENA.left(), ARENA.bottom()),
        };
        Point::new(
            (corner.x + target.x) / 2.0,
            (corner.y + target.y) / 2.0,
        )
    } else {
        Point::new(target.x + 8.0, target.y - 4.0)
    }
}
