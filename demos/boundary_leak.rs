//! Example showing the open boundary: a walker started near the edge loses
//! amplitude and probability once it reaches the last site.

use qwalk::{Event, ResetParams, SessionBuilder, SpinAmplitudes, WalkError};

fn main() -> Result<(), WalkError> {
    println!("--- qwalk Example: Open Boundary ---");

    let mut session = SessionBuilder::new()
        .sites(21)
        .initial(ResetParams::new(16, SpinAmplitudes::up()))
        .steps_per_tick(1)
        .build()?;

    session.handle(Event::Toggle)?;
    println!("\n{:>5}  {:>14}  {:>14}", "step", "quantum |ψ|²", "classical mass");
    for _ in 0..12 {
        session.handle(Event::Tick)?;
        println!(
            "{:>5}  {:>14.6}  {:>14.6}",
            session.steps(),
            session.quantum().norm_sqr(),
            session.classical().total_mass()
        );
    }

    println!("\nNothing is reflected or wrapped: whatever steps past site 20 is gone.");
    println!("{}", session.frame()?);
    Ok(())
}
