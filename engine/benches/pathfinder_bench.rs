use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashSet;
use std::hint::black_box;
use snake_duel_engine::{Cell, Direction, EngineSettings, GridBounds, Pathfinder, SimulationEngine, Status};

fn serpentine_walls(bounds: GridBounds) -> HashSet<Cell> {
    let mut walls = HashSet::new();
    for column in (2..bounds.width as i32 - 1).step_by(4) {
        let gap_at_top = (column / 4) % 2 == 0;
        for y in 0..bounds.height as i32 {
            let is_gap = if gap_at_top { y == 0 } else { y == bounds.height as i32 - 1 };
            if !is_gap {
                walls.insert(Cell::new(column, y));
            }
        }
    }
    walls
}

fn bench_open_grid() {
    let pathfinder = Pathfinder::new(GridBounds::new(30, 20));
    pathfinder.find_direction(
        black_box(Cell::new(0, 0)),
        black_box(Cell::new(29, 19)),
        Direction::Right,
        |_| false,
        |_| 0,
    );
}

fn bench_serpentine_grid(walls: &HashSet<Cell>) {
    let pathfinder = Pathfinder::new(GridBounds::new(30, 20));
    pathfinder.find_direction(
        black_box(Cell::new(0, 10)),
        black_box(Cell::new(29, 10)),
        Direction::Right,
        |cell| walls.contains(&cell),
        |cell| if cell.y == 10 { 3 } else { 0 },
    );
}

fn bench_full_round(seed: u64) {
    let settings = EngineSettings {
        seed: Some(seed),
        ..EngineSettings::default()
    };
    let Ok(mut engine) = SimulationEngine::new(settings) else {
        return;
    };
    engine.start();
    for step in 0..500usize {
        if engine.status() != Status::Running {
            break;
        }
        engine.set_player_pending_direction(Direction::ALL[(step / 5) % 4]);
        engine.tick();
    }
}

fn pathfinder_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinder");
    let walls = serpentine_walls(GridBounds::new(30, 20));

    group.bench_function("open_grid_corner_to_corner", |b| b.iter(bench_open_grid));

    group.bench_function("serpentine_grid", |b| {
        b.iter(|| bench_serpentine_grid(&walls))
    });

    group.bench_function("full_round_500_ticks", |b| {
        b.iter(|| bench_full_round(black_box(42)))
    });

    group.finish();
}

criterion_group!(benches, pathfinder_bench);
criterion_main!(benches);
