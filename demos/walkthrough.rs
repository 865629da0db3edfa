//! Stdout walkthrough of the gridlab engine: a random obstacle grid, the
//! four search strategies, the two maze builders, and an animated reveal
//! of a path.
//!
//! Run: cargo run --bin walkthrough

use std::error::Error;
use std::sync::mpsc;
use std::time::Duration;

use gridlab_anim::Animator;
use gridlab_core::{Grid, GridConfig};
use gridlab_maze::MazeParams;
use gridlab_paths::SearchKind;

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();

    // A random obstacle field with the stock density.
    let config = GridConfig {
        size: 16,
        ..GridConfig::default()
    };
    let grid = Grid::configure(&config, &mut rng);
    println!(
        "Random {}x{} grid, wall probability {}, {} -> {}:",
        config.size,
        config.size,
        config.wall_probability,
        grid.start(),
        grid.end()
    );
    print!("{grid}");
    for kind in SearchKind::ALL {
        match kind.search(&grid) {
            Some(cells) => println!("  {kind}: {} cells", cells.len()),
            None => println!("  {kind}: no path"),
        }
    }

    // A carved maze over the same dimensions.
    let mut maze = Grid::new(config.size);
    gridlab_maze::generate(&mut maze, MazeParams::default(), &mut rng);
    println!("\nMaze, {} open cells:", maze.count_open());
    print!("{maze}");

    // A room-and-corridor layout from the divider.
    let mut rooms = Grid::new(config.size);
    gridlab_maze::recursive_division(&mut rooms, &mut rng);
    println!("\nRecursive division, {} open cells:", rooms.count_open());
    print!("{rooms}");

    // Reveal the maze route step by step. generate() guarantees the maze
    // is solvable, but the demo stays graceful anyway.
    let Some(path) = SearchKind::Astar.search(&maze) else {
        println!("\nMaze route: unreachable");
        return Ok(());
    };
    println!("\nRevealing the {}-cell maze route:", path.len());

    let animator = Animator::with_interval(Duration::from_millis(2));
    let (tx, rx) = mpsc::channel();
    let handle = animator
        .animate(path, move |pos| {
            let _ = tx.send(pos);
        })
        .ok_or("animator is busy")?;

    // A second request while the reveal is live is dropped, not queued.
    if animator.animate(Vec::new(), |_| {}).is_none() {
        println!("  (overlapping animation request dropped)");
    }

    handle.join();
    let reveals: Vec<String> = rx.try_iter().map(|p| p.to_string()).collect();
    println!("  {}", reveals.join(" "));

    Ok(())
}
