//! Basic example of using the Queens engine

use queens_core::{Grid, PuzzleDefinition, Solver};

fn main() {
    // A 5x5 puzzle: five color regions, one queen each.
    let rows = ["AAABB", "ACABB", "CCCCB", "DDDCB", "DDDDE"];
    let definition = PuzzleDefinition::new(
        5,
        5,
        rows.iter()
            .map(|r| r.chars().map(String::from).collect())
            .collect(),
    );

    let mut grid = match Grid::from_definition(&definition) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("invalid puzzle: {}", err);
            return;
        }
    };

    println!("Starting board:");
    println!("{}", grid.snapshot());

    // Solve it
    let solver = Solver::new();
    let report = solver.run(&mut grid);

    for (i, step) in report.steps.iter().enumerate() {
        println!("Step {} ({}):", i + 1, step.rule);
        println!("{}", step.snapshot);
    }

    println!("Outcome after {} rounds: {}", report.rounds, report.state);
    if !grid.is_solved() {
        println!("No further deduction was possible.");
    }
}
