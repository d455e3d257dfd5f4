//! Conway's game of life on top of the coordinator. A `Cells` system tracks every entity holding
//! both a `Position` and a `Cell`, and each generation spawns and destroys entities through it.

use std::collections::HashMap;

use sprite_engine::ecs::{Coordinator, Entity, Members, System};
use sprite_macros::Component;

const GRID_WIDTH: usize = 20;
const GRID_HEIGHT: usize = 20;
const GENERATIONS: usize = 8;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[derive(Component)]
struct Cell;

#[derive(Component, PartialEq, Eq, Hash, Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Default)]
struct Cells {
    members: Members,
}

impl System for Cells {
    fn members(&self) -> &Members {
        &self.members
    }

    fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }
}

fn live_cells(coordinator: &Coordinator, cells: &Cells) -> HashMap<Position, Entity> {
    cells
        .members()
        .iter()
        .map(|entity| (*coordinator.component::<Position>(entity), entity))
        .collect()
}

fn spawn(coordinator: &mut Coordinator, position: Position) {
    let entity = coordinator.create_entity();
    coordinator.add_component(entity, position);
    coordinator.add_component(entity, Cell);
}

fn step(coordinator: &mut Coordinator, live: &HashMap<Position, Entity>) {
    let mut born = Vec::new();
    let mut died = Vec::new();

    let min_x = live.keys().map(|p| p.x).min().unwrap_or(0);
    let max_x = live.keys().map(|p| p.x).max().unwrap_or(0);
    let min_y = live.keys().map(|p| p.y).min().unwrap_or(0);
    let max_y = live.keys().map(|p| p.y).max().unwrap_or(0);

    for x in (min_x - 1)..=(max_x + 1) {
        for y in (min_y - 1)..=(max_y + 1) {
            let here = Position { x, y };
            let neighbors = DIRECTIONS
                .iter()
                .filter(|(dx, dy)| live.contains_key(&Position { x: x + dx, y: y + dy }))
                .count();

            match live.get(&here) {
                Some(entity) if !(2..=3).contains(&neighbors) => died.push(*entity),
                None if neighbors == 3 => born.push(here),
                _ => {}
            }
        }
    }

    for entity in died {
        coordinator.destroy_entity(entity);
    }
    for position in born {
        spawn(coordinator, position);
    }
}

fn render(generation: usize, live: &HashMap<Position, Entity>) {
    let mut grid = vec![vec!['.'; GRID_WIDTH]; GRID_HEIGHT];
    for position in live.keys() {
        if (0..GRID_WIDTH as i32).contains(&position.x) && (0..GRID_HEIGHT as i32).contains(&position.y) {
            grid[GRID_HEIGHT - position.y as usize - 1][position.x as usize] = '#';
        }
    }

    println!("\nGeneration {generation}: {} live cells", live.len());
    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }
}

fn main() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>();
    coordinator.register_component::<Cell>();

    let cells = coordinator.register_system(Cells::default());
    coordinator.set_system_signature::<Cells>(coordinator.signature_of::<(Position, Cell)>());

    // A glider
    for (x, y) in [(1, 10), (2, 9), (0, 8), (1, 8), (2, 8)] {
        spawn(&mut coordinator, Position { x, y });
    }

    for generation in 0..GENERATIONS {
        let live = live_cells(&coordinator, &cells.borrow());
        render(generation, &live);
        step(&mut coordinator, &live);
    }
}
